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

#[test]
fn inline_function_auto_returns_its_expression() {
    let src = "\
DEF square(x) -> x * x
square(6)";
    assert_eq!(int(&eval(src)), 36);
}

#[test]
fn block_function_requires_explicit_return() {
    let src = "\
DEF add(a, b)
    RETURN a + b
END
add(2, 3)";
    assert_eq!(int(&eval(src)), 5);
}

#[test]
fn block_function_with_no_return_yields_null() {
    let src = "\
DEF noop(x)
    VAR unused = x
END
noop(1)";
    assert_eq!(int(&eval(src)), 0); // NULL is Number(0)
}

#[test]
fn recursive_functions_compute_factorial() {
    let src = "\
DEF factorial(n)
    IF n <= 1 THEN
        RETURN 1
    ELSE
        RETURN n * factorial(n - 1)
    END
END
factorial(6)";
    assert_eq!(int(&eval(src)), 720);
}

#[test]
fn closures_capture_the_defining_environment() {
    let src = "\
DEF make_adder(n)
    DEF adder(x) -> x + n
    RETURN adder
END
VAR add5 = make_adder(5)
add5(10)";
    assert_eq!(int(&eval(src)), 15);
}

#[test]
fn wrong_arity_is_a_runtime_error() {
    let src = "\
DEF add(a, b) -> a + b
add(1)";
    let (value, err) = wisp_lang::run("<test>", src);
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("too few args"));
}

#[test]
fn calling_a_non_function_is_illegal() {
    let src = "\
VAR x = 5
x(1)";
    let (value, err) = wisp_lang::run("<test>", src);
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("Illegal operation"));
}

#[test]
fn return_inside_a_loop_exits_the_enclosing_function() {
    let src = "\
DEF first_past(limit, threshold)
    FOR i = 0 TO limit THEN
        IF i > threshold THEN
            RETURN i
        END
    END
    RETURN -1
END
first_past(9, 3)";
    assert_eq!(int(&eval(src)), 4);
}
