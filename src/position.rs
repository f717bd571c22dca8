//! Source positions.
//!
//! A [`Position`] is copied into every token and AST node so that later
//! stages (parser, interpreter) can point back at the exact source text a
//! diagnostic concerns, without holding a reference into the lexer.

use std::rc::Rc;

/// A single point in a source file, tracked as a byte index plus a
/// human-readable line/column.
///
/// `idx` starts at `-1` and `col` at `-1` before the first call to
/// [`Position::advance`], matching the "nothing consumed yet" state the
/// lexer starts in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub idx: isize,
    pub ln: usize,
    pub col: isize,
    pub file_name: Rc<str>,
    pub full_text: Rc<str>,
}

impl Position {
    pub fn new(idx: isize, ln: usize, col: isize, file_name: Rc<str>, full_text: Rc<str>) -> Self {
        Self {
            idx,
            ln,
            col,
            file_name,
            full_text,
        }
    }

    /// A position for values synthesized by the runtime (builtin constants,
    /// host-constructed lists) that have no source origin. Per the spec's
    /// invariant, such a position must never be the subject of a diagnostic
    /// without first being reassigned via `Value::with_position`.
    pub fn synthetic() -> Self {
        Self::new(0, 0, 0, Rc::from("<native>"), Rc::from(""))
    }

    /// Advance by one character. `current` is the character that was just
    /// consumed (the one sitting at the *old* position); a newline resets
    /// the column and bumps the line.
    pub fn advance(&mut self, current: Option<char>) -> &mut Self {
        self.idx += 1;
        self.col += 1;

        if current == Some('\n') {
            self.ln += 1;
            self.col = 0;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(idx: isize, ln: usize, col: isize) -> Position {
        Position::new(idx, ln, col, Rc::from("<test>"), Rc::from(""))
    }

    #[test]
    fn advance_bumps_idx_and_col() {
        let mut p = pos(-1, 0, -1);
        p.advance(None);
        assert_eq!((p.idx, p.ln, p.col), (0, 0, 0));
    }

    #[test]
    fn advance_on_newline_resets_col() {
        let mut p = pos(3, 0, 3);
        p.advance(Some('\n'));
        assert_eq!((p.idx, p.ln, p.col), (4, 1, 0));
    }
}
