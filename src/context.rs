//! Call-stack context, used only to enrich runtime diagnostics with a
//! traceback (spec §6, "Diagnostic rendering").

use std::rc::Rc;

use crate::position::Position;

/// One frame of the call stack. `parent_entry_pos` is the position, in the
/// *parent* frame, at which this frame was entered (i.e. the call site);
/// it is `None` for the outermost `<program>` context.
#[derive(Debug, Clone)]
pub struct Context {
    pub display_name: Rc<str>,
    pub parent: Option<Rc<Context>>,
    pub parent_entry_pos: Option<Position>,
}

impl Context {
    pub fn new(
        display_name: impl Into<Rc<str>>,
        parent: Option<Rc<Context>>,
        parent_entry_pos: Option<Position>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            parent,
            parent_entry_pos,
        }
    }

    pub fn root(display_name: impl Into<Rc<str>>) -> Self {
        Self::new(display_name, None, None)
    }
}
