//! The `ParseResult` accumulator (spec §4.2/§9): tracks how many tokens a
//! (sub-)parse consumed so a caller can rewind after a speculative attempt,
//! and keeps the *deepest* syntax error seen rather than the last one.

use crate::diagnostic::Diagnostic;

#[derive(Debug)]
pub struct ParseResult<T> {
    pub node: Option<T>,
    pub error: Option<Diagnostic>,
    pub advance_count: usize,
    pub to_reverse_count: usize,
    pub last_registered_advance_count: usize,
}

impl<T> ParseResult<T> {
    pub fn new() -> Self {
        Self {
            node: None,
            error: None,
            advance_count: 0,
            to_reverse_count: 0,
            last_registered_advance_count: 0,
        }
    }

    pub fn register_advancement(&mut self) {
        self.last_registered_advance_count = 1;
        self.advance_count += 1;
    }

    /// Absorb a sub-parse's advancement/error unconditionally and return its node.
    pub fn register<U>(&mut self, res: ParseResult<U>) -> Option<U> {
        self.last_registered_advance_count = res.advance_count;
        self.advance_count += res.advance_count;
        if res.error.is_some() {
            self.error = res.error;
        }
        res.node
    }

    /// Speculatively absorb a sub-parse: on error, record how much it
    /// consumed (for `Parser::reverse`) and report "no match" rather than
    /// failing outright.
    pub fn try_register<U>(&mut self, res: ParseResult<U>) -> Option<U> {
        if res.error.is_some() {
            self.to_reverse_count = res.advance_count;
            return None;
        }
        self.register(res)
    }

    pub fn success(mut self, node: T) -> Self {
        self.node = Some(node);
        self.error = None;
        self
    }

    /// A later, zero-advancement failure never overwrites an earlier,
    /// deeper one — this is what makes the deepest syntax error win.
    pub fn failure(mut self, error: Diagnostic) -> Self {
        if self.error.is_none() || self.last_registered_advance_count == 0 {
            self.error = Some(error);
        }
        self
    }
}

impl<T> Default for ParseResult<T> {
    fn default() -> Self {
        Self::new()
    }
}
