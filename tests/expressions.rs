use wisp_lang::value::{NumKind, Value};

fn eval(src: &str) -> Value {
    let (value, err) = wisp_lang::run("<test>", src);
    assert!(err.is_none(), "unexpected error: {:?}", err.map(|e| e.render()));
    value.expect("expected a value")
}

fn int(v: &Value) -> i64 {
    match v {
        Value::Number(n) => match n.num {
            NumKind::Int(i) => i,
            NumKind::Float(f) => panic!("expected int, got float {}", f),
        },
        other => panic!("expected number, got {:?}", other),
    }
}

fn float(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.num.as_f64(),
        other => panic!("expected number, got {:?}", other),
    }
}

#[test]
fn arithmetic_precedence_matches_standard_order() {
    assert_eq!(int(&eval("1 + 2 * 3")), 7);
    assert_eq!(int(&eval("(1 + 2) * 3")), 9);
    assert_eq!(int(&eval("2 ^ 3 ^ 2")), 512); // right-associative power
}

#[test]
fn division_always_promotes_to_float() {
    assert_eq!(float(&eval("4 / 2")), 2.0);
}

#[test]
fn integer_arithmetic_stays_integer() {
    assert_eq!(int(&eval("3 + 4")), 7);
    assert_eq!(int(&eval("10 - 3")), 7);
    assert_eq!(int(&eval("3 * 4")), 12);
}

#[test]
fn comparisons_yield_boolean_ints() {
    assert_eq!(int(&eval("3 < 4")), 1);
    assert_eq!(int(&eval("3 > 4")), 0);
    assert_eq!(int(&eval("3 == 3")), 1);
    assert_eq!(int(&eval("3 != 3")), 0);
}

#[test]
fn and_or_not_short_circuit_on_truthiness() {
    assert_eq!(int(&eval("1 AND 0")), 0);
    assert_eq!(int(&eval("1 OR 0")), 1);
    assert_eq!(int(&eval("NOT 0")), 1);
}

#[test]
fn string_concatenation_and_repetition() {
    let (value, err) = wisp_lang::run("<test>", "\"foo\" + \"bar\"");
    assert!(err.is_none());
    assert_eq!(value.unwrap().to_display_string(), "foobar");

    let (value, err) = wisp_lang::run("<test>", "\"ab\" * 3");
    assert!(err.is_none());
    assert_eq!(value.unwrap().to_display_string(), "ababab");
}

#[test]
fn unary_minus_negates() {
    assert_eq!(int(&eval("-5 + 10")), 5);
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let (value, err) = wisp_lang::run("<test>", "1 / 0");
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("Division by zero"));
}
