//! Global environment bootstrap: the named constants and builtin bindings
//! every run of the pipeline starts with (spec §4.5, §6).

use std::cell::RefCell;
use std::rc::Rc;

use crate::environment::Environment;
use crate::position::Position;
use crate::value::{BuiltinFunction, NumKind, Number, Value};

const BUILTIN_NAMES: &[&str] = &[
    "PRINT",
    "PRINT_RET",
    "INPUT",
    "INPUT_INT",
    "CLEAR",
    "CLS",
    "IS_NUM",
    "IS_STR",
    "IS_LIST",
    "IS_DEF",
    "APPEND",
    "POP",
    "EXTEND",
    "LEN",
    "RUN",
];

/// A freshly synthesized `Number(0)` — the NULL/FALSE singleton (spec
/// §4.5). Values synthesized this way carry no real source position until
/// copied to a use site.
pub fn null_value() -> Value {
    Value::Number(Number::from_int(0, Position::synthetic(), Position::synthetic()))
}

pub fn bool_value(b: bool) -> Value {
    Value::Number(Number::from_int(
        if b { 1 } else { 0 },
        Position::synthetic(),
        Position::synthetic(),
    ))
}

pub fn new_global_environment() -> Rc<RefCell<Environment>> {
    let global = Environment::new_global();
    {
        let mut env = global.borrow_mut();
        env.set("NULL", null_value());
        env.set("FALSE", bool_value(false));
        env.set("TRUE", bool_value(true));
        env.set(
            "MATH_PI",
            Value::Number(Number::new(
                NumKind::Float(std::f64::consts::PI),
                Position::synthetic(),
                Position::synthetic(),
            )),
        );
        for name in BUILTIN_NAMES {
            env.set(*name, Value::BuiltinFunction(BuiltinFunction::new(*name)));
        }
    }
    global
}
