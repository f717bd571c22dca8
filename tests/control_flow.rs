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

fn list_len(v: &Value) -> usize {
    match v {
        Value::List(l) => l.len(),
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn inline_if_returns_chosen_branch() {
    assert_eq!(int(&eval("IF 1 THEN 10 ELSE 20")), 10);
    assert_eq!(int(&eval("IF 0 THEN 10 ELSE 20")), 20);
}

#[test]
fn block_if_executes_its_own_case_only() {
    let src = "\
VAR x = 0
IF 1 THEN
    VAR x = 1
END
x";
    assert_eq!(int(&eval(src)), 1);
}

#[test]
fn block_if_swallows_end_leaving_a_trailing_elif_unparseable() {
    // a block IF case consumes END and returns before considering a
    // following ELIF/ELSE (spec §9, preserved as documented) — so a
    // trailing ELIF after a block case is simply a dangling token, not a
    // second branch of the same IF.
    let src = "\
IF 1 THEN
    VAR x = 1
END
ELIF 1 THEN
    VAR x = 2
END";
    let (value, err) = wisp_lang::run("<test>", src);
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("Invalid Syntax"));
}

#[test]
fn for_loop_collects_body_values_into_a_list() {
    assert_eq!(list_len(&eval("FOR i = 0 TO 5 THEN i")), 5);
}

#[test]
fn for_loop_step_can_count_down() {
    let src = "\
VAR total = 0
FOR i = 5 TO 0 STEP -1 THEN VAR total = total + i
total";
    assert_eq!(int(&eval(src)), 15);
}

#[test]
fn while_loop_honors_continue_and_break() {
    let src = "\
VAR i = 0
VAR total = 0
WHILE i < 10 THEN
    VAR i = i + 1
    IF i == 5 THEN CONTINUE
    IF i == 8 THEN BREAK
    VAR total = total + i
END
total";
    // 1+2+3+4 (5 skipped) +6+7 = 23, loop breaks before adding 8
    assert_eq!(int(&eval(src)), 23);
}

#[test]
fn continue_inside_a_called_function_bubbles_to_the_enclosing_loop() {
    // spec §4.3/§9: a bare CONTINUE/BREAK with no enclosing loop of its own
    // propagates out of the function call into whatever loop is iterating
    // the call expression.
    let src = "\
DEF skip_if_even(n)
    IF n == 4 THEN CONTINUE
END

VAR total = 0
FOR i = 1 TO 6 THEN
    skip_if_even(i)
    VAR total = total + i
END
total";
    assert_eq!(int(&eval(src)), 11); // 1+2+3+5 (4 skipped by the bubbled continue)
}
