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
fn indexing_via_div_returns_the_element() {
    assert_eq!(int(&eval("[10, 20, 30] / 1")), 20);
}

#[test]
fn index_out_of_bounds_is_a_runtime_error() {
    let (value, err) = wisp_lang::run("<test>", "[1, 2] / 9");
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("out of bounds"));
}

#[test]
fn concatenation_appends_a_single_element_sharing_storage() {
    assert_eq!(int(&eval("LEN([1, 2] + 3)")), 3);
}

#[test]
fn assigning_a_list_aliases_the_same_backing_storage() {
    // binding a list to a second name does not copy its elements (spec §3):
    // a mutating builtin observed through either alias is visible through
    // both, mirroring the original source's `List.copy()` sharing the same
    // underlying list object with the new wrapper.
    let src = "\
VAR xs = [1, 2]
VAR ys = xs
APPEND(ys, 3)
LEN(xs)";
    assert_eq!(int(&eval(src)), 3);
}

#[test]
fn multiplication_extends_one_list_with_another_in_place() {
    let src = "\
VAR xs = [1]
VAR ys = [2, 3]
VAR zs = xs * ys
LEN(xs)";
    assert_eq!(int(&eval(src)), 3);
}
