use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::position::Position;
use crate::value::number::{NumKind, Number};

#[derive(Debug, Clone)]
pub struct StringValue {
    pub value: Rc<str>,
    pub start: Position,
    pub end: Position,
    pub context: Option<Rc<Context>>,
}

impl StringValue {
    pub fn new(value: impl Into<Rc<str>>, start: Position, end: Position) -> Self {
        Self {
            value: value.into(),
            start,
            end,
            context: None,
        }
    }

    pub fn with_position(&self, start: Position, end: Position) -> Self {
        Self {
            value: self.value.clone(),
            start,
            end,
            context: self.context.clone(),
        }
    }

    pub fn with_context(&self, context: Rc<Context>) -> Self {
        Self {
            context: Some(context),
            ..self.clone()
        }
    }

    pub fn is_truthy(&self) -> bool {
        !self.value.is_empty()
    }

    pub fn added_to(&self, other: &StringValue) -> StringValue {
        let mut combined = String::with_capacity(self.value.len() + other.value.len());
        combined.push_str(&self.value);
        combined.push_str(&other.value);
        StringValue {
            value: Rc::from(combined.as_str()),
            start: self.start.clone(),
            end: other.end.clone(),
            context: self.context.clone(),
        }
    }

    pub fn multed_by(&self, other: &Number) -> StringValue {
        let count = match other.num {
            NumKind::Int(n) => n.max(0) as usize,
            NumKind::Float(f) => f.max(0.0) as usize,
        };
        StringValue {
            value: Rc::from(self.value.repeat(count).as_str()),
            start: self.start.clone(),
            end: other.end.clone(),
            context: self.context.clone(),
        }
    }
}

impl fmt::Display for StringValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
