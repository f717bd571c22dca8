use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ast::Node;
use crate::context::Context;
use crate::environment::Environment;
use crate::position::Position;

/// A user-defined function: the call machinery itself lives in the
/// interpreter (it needs to walk `body`), this struct only holds the
/// captured data — crucially `defining_env`, the lexical scope a new call
/// frame's environment is parented to (spec §4.6, closures).
#[derive(Debug, Clone)]
pub struct UserFunction {
    pub name: Option<Rc<str>>,
    pub arg_names: Vec<Rc<str>>,
    pub body: Rc<Node>,
    pub auto_return: bool,
    pub defining_env: Rc<RefCell<Environment>>,
    pub start: Position,
    pub end: Position,
    pub context: Option<Rc<Context>>,
}

impl UserFunction {
    pub fn new(
        name: Option<Rc<str>>,
        arg_names: Vec<Rc<str>>,
        body: Rc<Node>,
        auto_return: bool,
        defining_env: Rc<RefCell<Environment>>,
        start: Position,
        end: Position,
    ) -> Self {
        Self {
            name,
            arg_names,
            body,
            auto_return,
            defining_env,
            start,
            end,
            context: None,
        }
    }

    pub fn display_name(&self) -> Rc<str> {
        self.name.clone().unwrap_or_else(|| Rc::from("<anonymous>"))
    }

    pub fn with_position(&self, start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    pub fn with_context(&self, context: Rc<Context>) -> Self {
        Self {
            context: Some(context),
            ..self.clone()
        }
    }
}

impl fmt::Display for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.display_name())
    }
}

/// A builtin (host) function. Dispatch by name lives in `builtins.rs`.
#[derive(Debug, Clone)]
pub struct BuiltinFunction {
    pub name: Rc<str>,
    pub start: Position,
    pub end: Position,
    pub context: Option<Rc<Context>>,
}

impl BuiltinFunction {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: name.into(),
            start: Position::synthetic(),
            end: Position::synthetic(),
            context: None,
        }
    }

    pub fn with_position(&self, start: Position, end: Position) -> Self {
        Self {
            name: self.name.clone(),
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
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<built-in function {}>", self.name)
    }
}
