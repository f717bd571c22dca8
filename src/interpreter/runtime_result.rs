//! The `RuntimeResult` envelope (spec §4.3): exactly one of value / error /
//! func_return_value / loop_should_continue / loop_should_break is live at a
//! time, threaded through every visitor.

use crate::diagnostic::Diagnostic;
use crate::value::Value;

#[derive(Debug, Default)]
pub struct RuntimeResult {
    pub value: Option<Value>,
    pub error: Option<Diagnostic>,
    pub func_return_value: Option<Value>,
    pub loop_should_continue: bool,
    pub loop_should_break: bool,
}

impl RuntimeResult {
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self) {
        self.value = None;
        self.error = None;
        self.func_return_value = None;
        self.loop_should_continue = false;
        self.loop_should_break = false;
    }

    /// Copies every non-value signal from `inner` onto `self` — the
    /// "register-before-check" discipline every visitor must follow before
    /// touching `inner`'s value.
    pub fn register(&mut self, inner: RuntimeResult) -> Option<Value> {
        self.error = inner.error;
        self.func_return_value = inner.func_return_value;
        self.loop_should_continue = inner.loop_should_continue;
        self.loop_should_break = inner.loop_should_break;
        inner.value
    }

    pub fn success(mut self, value: Value) -> Self {
        self.reset();
        self.value = Some(value);
        self
    }

    pub fn success_return(mut self, value: Value) -> Self {
        self.reset();
        self.func_return_value = Some(value);
        self
    }

    pub fn success_continue(mut self) -> Self {
        self.reset();
        self.loop_should_continue = true;
        self
    }

    pub fn success_break(mut self) -> Self {
        self.reset();
        self.loop_should_break = true;
        self
    }

    pub fn failure(mut self, error: Diagnostic) -> Self {
        self.reset();
        self.error = Some(error);
        self
    }

    pub fn should_return(&self) -> bool {
        self.error.is_some()
            || self.func_return_value.is_some()
            || self.loop_should_continue
            || self.loop_should_break
    }
}
