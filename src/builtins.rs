//! The fixed builtin library (spec §6). Dispatch by name; arity is checked
//! per builtin before its body runs.

use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

use crate::config::Config;
use crate::context::Context;
use crate::diagnostic::Diagnostic;
use crate::globals::{bool_value, null_value};
use crate::interpreter::RuntimeResult;
use crate::position::Position;
use crate::value::{Number, StringValue, Value};

pub fn call(
    name: &str,
    args: Vec<Value>,
    call_start: Position,
    call_end: Position,
    context: Rc<Context>,
    config: &Rc<Config>,
) -> RuntimeResult {
    let res = RuntimeResult::new();

    macro_rules! arity_error {
        ($expected:expr) => {{
            return res.failure(Diagnostic::runtime_error(
                format!("'{}' expects exactly {} argument(s), got {}", name, $expected, args.len()),
                call_start,
                call_end,
                context,
            ));
        }};
    }

    match name {
        "PRINT" => {
            if args.len() != 1 {
                arity_error!(1);
            }
            println!("{}", args[0].to_display_string());
            res.success(null_value())
        }
        "PRINT_RET" => {
            if args.len() != 1 {
                arity_error!(1);
            }
            res.success(Value::String(StringValue::new(
                args[0].to_display_string(),
                call_start,
                call_end,
            )))
        }
        "INPUT" => {
            if !args.is_empty() {
                arity_error!(0);
            }
            let mut line = String::new();
            io::stdin().read_line(&mut line).ok();
            let text = line.trim_end_matches(['\n', '\r']).to_string();
            res.success(Value::String(StringValue::new(text, call_start, call_end)))
        }
        "INPUT_INT" => {
            if !args.is_empty() {
                arity_error!(0);
            }
            loop {
                let mut line = String::new();
                io::stdin().read_line(&mut line).ok();
                let text = line.trim_end_matches(['\n', '\r']).to_string();
                match text.parse::<i64>() {
                    Ok(n) => {
                        return res.success(Value::Number(Number::from_int(
                            n,
                            call_start,
                            call_end,
                        )))
                    }
                    Err(_) => println!("'{}' must be an integer. Try again!", text),
                }
            }
        }
        "CLEAR" | "CLS" => {
            if !args.is_empty() {
                arity_error!(0);
            }
            print!("\x1B[2J\x1B[1;1H");
            io::stdout().flush().ok();
            res.success(null_value())
        }
        "IS_NUM" => type_check(args, &call_start, &call_end, context, res, |v| {
            matches!(v, Value::Number(_))
        }),
        "IS_STR" => type_check(args, &call_start, &call_end, context, res, |v| {
            matches!(v, Value::String(_))
        }),
        "IS_LIST" => type_check(args, &call_start, &call_end, context, res, |v| {
            matches!(v, Value::List(_))
        }),
        "IS_DEF" => type_check(args, &call_start, &call_end, context, res, Value::is_callable),
        "APPEND" => {
            if args.len() != 2 {
                arity_error!(2);
            }
            let Value::List(list) = &args[0] else {
                return res.failure(Diagnostic::runtime_error(
                    "First argument must be list",
                    call_start,
                    call_end,
                    context,
                ));
            };
            list.elements.borrow_mut().push(args[1].clone());
            res.success(null_value())
        }
        "POP" => {
            if args.len() != 2 {
                arity_error!(2);
            }
            let (Value::List(list), Value::Number(index)) = (&args[0], &args[1]) else {
                return res.failure(Diagnostic::runtime_error(
                    "Arguments must be a list and a number",
                    call_start,
                    call_end,
                    context,
                ));
            };
            match list.pop(index) {
                Ok(element) => res.success(element),
                Err(err) => res.failure(err),
            }
        }
        "EXTEND" => {
            if args.len() != 2 {
                arity_error!(2);
            }
            let (Value::List(a), Value::List(b)) = (&args[0], &args[1]) else {
                return res.failure(Diagnostic::runtime_error(
                    "Both arguments must be lists",
                    call_start,
                    call_end,
                    context,
                ));
            };
            a.multed_by(b);
            res.success(null_value())
        }
        "LEN" => {
            if args.len() != 1 {
                arity_error!(1);
            }
            let Value::List(list) = &args[0] else {
                return res.failure(Diagnostic::runtime_error(
                    "Argument must be list",
                    call_start,
                    call_end,
                    context,
                ));
            };
            res.success(Value::Number(Number::from_int(
                list.len() as i64,
                call_start,
                call_end,
            )))
        }
        "RUN" => {
            if args.len() != 1 {
                arity_error!(1);
            }
            let Value::String(path) = &args[0] else {
                return res.failure(Diagnostic::runtime_error(
                    "Argument must be string",
                    call_start,
                    call_end,
                    context,
                ));
            };
            let resolved = config.resolve_run_path(path.value.as_ref());
            let text = match fs::read_to_string(&resolved) {
                Ok(t) => t,
                Err(err) => {
                    return res.failure(Diagnostic::runtime_error(
                        format!("Failed to load script \"{}\": {}", path.value, err),
                        call_start,
                        call_end,
                        context,
                    ))
                }
            };

            match crate::run_with_config(&resolved, &text, config) {
                (_, Some(inner_err)) => res.failure(Diagnostic::runtime_error(
                    format!(
                        "Failed to finish executing script \"{}\"\n{}",
                        path.value,
                        inner_err.render()
                    ),
                    call_start,
                    call_end,
                    context,
                )),
                (_, None) => res.success(null_value()),
            }
        }
        other => res.failure(Diagnostic::runtime_error(
            format!("Unknown builtin '{}'", other),
            call_start,
            call_end,
            context,
        )),
    }
}

fn type_check(
    args: Vec<Value>,
    call_start: &Position,
    call_end: &Position,
    context: Rc<Context>,
    res: RuntimeResult,
    predicate: impl Fn(&Value) -> bool,
) -> RuntimeResult {
    if args.len() != 1 {
        return res.failure(Diagnostic::runtime_error(
            "expects exactly 1 argument",
            call_start.clone(),
            call_end.clone(),
            context,
        ));
    }
    res.success(bool_value(predicate(&args[0])))
}
