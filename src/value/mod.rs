//! Value model (spec §3, §4.5, §4.6): tagged variants with a shared
//! capability surface.

mod function;
mod list_value;
mod number;
mod string_value;

pub use function::{BuiltinFunction, UserFunction};
pub use list_value::ListValue;
pub use number::{NumKind, Number};
pub use string_value::StringValue;

use std::rc::Rc;

use crate::context::Context;
use crate::diagnostic::Diagnostic;
use crate::position::Position;

#[derive(Debug, Clone)]
pub enum Value {
    Number(Number),
    String(StringValue),
    List(ListValue),
    UserFunction(UserFunction),
    BuiltinFunction(BuiltinFunction),
}

impl Value {
    pub fn start(&self) -> &Position {
        match self {
            Value::Number(n) => &n.start,
            Value::String(s) => &s.start,
            Value::List(l) => &l.start,
            Value::UserFunction(f) => &f.start,
            Value::BuiltinFunction(f) => &f.start,
        }
    }

    pub fn end(&self) -> &Position {
        match self {
            Value::Number(n) => &n.end,
            Value::String(s) => &s.end,
            Value::List(l) => &l.end,
            Value::UserFunction(f) => &f.end,
            Value::BuiltinFunction(f) => &f.end,
        }
    }

    pub fn context(&self) -> Option<Rc<Context>> {
        match self {
            Value::Number(n) => n.context.clone(),
            Value::String(s) => s.context.clone(),
            Value::List(l) => l.context.clone(),
            Value::UserFunction(f) => f.context.clone(),
            Value::BuiltinFunction(f) => f.context.clone(),
        }
    }

    /// Copies the value, re-binding its position without altering the
    /// original (spec §3).
    pub fn with_position(&self, start: Position, end: Position) -> Value {
        match self {
            Value::Number(n) => Value::Number(n.with_position(start, end)),
            Value::String(s) => Value::String(s.with_position(start, end)),
            Value::List(l) => Value::List(l.with_position(start, end)),
            Value::UserFunction(f) => Value::UserFunction(f.with_position(start, end)),
            Value::BuiltinFunction(f) => Value::BuiltinFunction(f.with_position(start, end)),
        }
    }

    pub fn with_context(&self, context: Rc<Context>) -> Value {
        match self {
            Value::Number(n) => Value::Number(n.with_context(context)),
            Value::String(s) => Value::String(s.with_context(context)),
            Value::List(l) => Value::List(l.with_context(context)),
            Value::UserFunction(f) => Value::UserFunction(f.with_context(context)),
            Value::BuiltinFunction(f) => Value::BuiltinFunction(f.with_context(context)),
        }
    }

    /// Truthiness (spec §4.5): only Number and String have a defined
    /// reading; List and functions are unspecified by the source language,
    /// so they are truthy by the same "non-empty/non-zero" convention.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => n.is_truthy(),
            Value::String(s) => s.is_truthy(),
            Value::List(l) => l.len() > 0,
            Value::UserFunction(_) | Value::BuiltinFunction(_) => true,
        }
    }

    fn illegal_operation(&self, other: &Value) -> Diagnostic {
        Diagnostic::runtime_error(
            "Illegal operation",
            self.start().clone(),
            other.end().clone(),
            self.context()
                .unwrap_or_else(|| Rc::new(Context::root("<program>"))),
        )
    }

    pub fn added_to(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.added_to(b)?)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(a.added_to(b))),
            (Value::List(a), _) => Ok(Value::List(a.added_to(other.clone()))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn subbed_by(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.subbed_by(b)?)),
            (Value::List(a), Value::Number(b)) => Ok(Value::List(a.subbed_by(b)?)),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn multed_by(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.multed_by(b)?)),
            (Value::String(a), Value::Number(b)) => Ok(Value::String(a.multed_by(b))),
            (Value::List(a), Value::List(b)) => Ok(Value::List(a.multed_by(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn dived_by(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.dived_by(b)?)),
            (Value::List(a), Value::Number(b)) => a.dived_by(b),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn powed_by(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.powed_by(b)?)),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn get_comparison_eq(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.get_comparison_eq(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn get_comparison_ne(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.get_comparison_ne(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn get_comparison_lt(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.get_comparison_lt(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn get_comparison_gt(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.get_comparison_gt(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn get_comparison_lte(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.get_comparison_lte(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn get_comparison_gte(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.get_comparison_gte(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn anded_by(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.anded_by(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn ored_by(&self, other: &Value) -> Result<Value, Diagnostic> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a.ored_by(b))),
            _ => Err(self.illegal_operation(other)),
        }
    }

    pub fn notted(&self) -> Result<Value, Diagnostic> {
        match self {
            Value::Number(a) => Ok(Value::Number(a.notted())),
            _ => Err(Diagnostic::runtime_error(
                "Illegal operation",
                self.start().clone(),
                self.end().clone(),
                self.context()
                    .unwrap_or_else(|| Rc::new(Context::root("<program>"))),
            )),
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::UserFunction(_) | Value::BuiltinFunction(_))
    }

    /// `str(value)` form (spec §6).
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.value.to_string(),
            Value::List(l) => l.to_string(),
            Value::UserFunction(f) => f.to_string(),
            Value::BuiltinFunction(f) => f.to_string(),
        }
    }

    /// Repr form, used only in error/diagnostic contexts (spec §6): strings
    /// are quoted, list elements are rendered in repr form recursively.
    pub fn to_repr_string(&self) -> String {
        match self {
            Value::String(s) => format!("\"{}\"", s.value),
            Value::List(l) => {
                let items: Vec<String> = l
                    .elements
                    .borrow()
                    .iter()
                    .map(|v| v.to_repr_string())
                    .collect();
                format!("[{}]", items.join(", "))
            }
            other => other.to_display_string(),
        }
    }
}
