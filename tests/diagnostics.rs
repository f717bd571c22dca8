#[test]
fn illegal_character_reports_kind_and_file() {
    let (value, err) = wisp_lang::run("main.wisp", "1 @ 2");
    assert!(value.is_none());
    let rendered = err.unwrap().render();
    assert!(rendered.starts_with("Illegal Character"));
    assert!(rendered.contains("main.wisp"));
}

#[test]
fn invalid_syntax_reports_the_unexpected_token() {
    let (value, err) = wisp_lang::run("main.wisp", "VAR = 5");
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("Invalid Syntax"));
}

#[test]
fn runtime_error_in_a_called_function_renders_a_traceback() {
    let src = "\
DEF divide(a, b) -> a / b
divide(1, 0)";
    let (value, err) = wisp_lang::run("main.wisp", src);
    assert!(value.is_none());
    let rendered = err.unwrap().render();
    assert!(rendered.starts_with("Traceback (most recent call last):"));
    assert!(rendered.contains("divide"));
    assert!(rendered.contains("Division by zero"));
}

#[test]
fn undefined_variable_is_a_runtime_error_naming_the_identifier() {
    let (value, err) = wisp_lang::run("main.wisp", "missing_name + 1");
    assert!(value.is_none());
    assert!(err.unwrap().render().contains("'missing_name' is not defined"));
}
