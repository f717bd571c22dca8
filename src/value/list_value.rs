use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::diagnostic::Diagnostic;
use crate::position::Position;
use crate::value::number::{NumKind, Number};
use crate::value::Value;

/// The element vector is reference-shared across every copy of a list
/// (spec §3 invariant) — mirroring the original source, where `List.copy()`
/// hands the *same* Python list object to the new wrapper, so mutating
/// builtins are observable through every alias.
#[derive(Debug, Clone)]
pub struct ListValue {
    pub elements: Rc<RefCell<Vec<Value>>>,
    pub start: Position,
    pub end: Position,
    pub context: Option<Rc<Context>>,
}

impl ListValue {
    pub fn new(elements: Vec<Value>, start: Position, end: Position) -> Self {
        Self {
            elements: Rc::new(RefCell::new(elements)),
            start,
            end,
            context: None,
        }
    }

    pub fn with_position(&self, start: Position, end: Position) -> Self {
        Self {
            elements: Rc::clone(&self.elements),
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

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// Appends `other` to the shared element vector, returning a new
    /// wrapper over the same vector (so the mutation is visible through
    /// every alias of this list, including `self`).
    pub fn added_to(&self, other: Value) -> ListValue {
        let end = other.end().clone();
        self.elements.borrow_mut().push(other);
        ListValue {
            elements: Rc::clone(&self.elements),
            start: self.start.clone(),
            end,
            context: self.context.clone(),
        }
    }

    pub fn subbed_by(&self, index: &Number) -> Result<ListValue, Diagnostic> {
        let idx = match index.num {
            NumKind::Int(n) => n,
            NumKind::Float(f) => f as i64,
        };
        let len = self.elements.borrow().len();
        if idx < 0 || idx as usize >= len {
            return Err(Diagnostic::runtime_error(
                "Element at this index could not be removed from list because index is out of bounds",
                self.start.clone(),
                index.end.clone(),
                self.context
                    .clone()
                    .unwrap_or_else(|| Rc::new(Context::root("<program>"))),
            ));
        }
        self.elements.borrow_mut().remove(idx as usize);
        Ok(ListValue {
            elements: Rc::clone(&self.elements),
            start: self.start.clone(),
            end: index.end.clone(),
            context: self.context.clone(),
        })
    }

    /// Removes and returns the element at `index` (spec §6, `POP`). Distinct
    /// from `subbed_by`, which is the `-` operator and returns the list
    /// wrapper rather than the removed element.
    pub fn pop(&self, index: &Number) -> Result<Value, Diagnostic> {
        let idx = match index.num {
            NumKind::Int(n) => n,
            NumKind::Float(f) => f as i64,
        };
        let len = self.elements.borrow().len();
        if idx < 0 || idx as usize >= len {
            return Err(Diagnostic::runtime_error(
                "Element at this index could not be removed from list because index is out of bounds",
                self.start.clone(),
                index.end.clone(),
                self.context
                    .clone()
                    .unwrap_or_else(|| Rc::new(Context::root("<program>"))),
            ));
        }
        Ok(self.elements.borrow_mut().remove(idx as usize))
    }

    pub fn multed_by(&self, other: &ListValue) -> ListValue {
        self.elements
            .borrow_mut()
            .extend(other.elements.borrow().iter().cloned());
        ListValue {
            elements: Rc::clone(&self.elements),
            start: self.start.clone(),
            end: other.end.clone(),
            context: self.context.clone(),
        }
    }

    pub fn dived_by(&self, index: &Number) -> Result<Value, Diagnostic> {
        let idx = match index.num {
            NumKind::Int(n) => n,
            NumKind::Float(f) => f as i64,
        };
        let elements = self.elements.borrow();
        if idx < 0 || idx as usize >= elements.len() {
            return Err(Diagnostic::runtime_error(
                "Element at this index could not be retrieved from list because index is out of bounds",
                self.start.clone(),
                index.end.clone(),
                self.context
                    .clone()
                    .unwrap_or_else(|| Rc::new(Context::root("<program>"))),
            ));
        }
        Ok(elements[idx as usize].clone())
    }
}

impl fmt::Display for ListValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.elements.borrow().iter().map(|v| v.to_display_string()).collect();
        write!(f, "{}", rendered.join(", "))
    }
}
