//! Diagnostics: the single error type threaded through every pipeline stage
//! (lexer, parser, interpreter) and rendered to a caret-annotated string for
//! display to a user.

use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::position::Position;

/// The four error kinds produced by this crate (spec §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IllegalCharacter,
    ExpectedCharacter,
    InvalidSyntax,
    RuntimeError,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::IllegalCharacter => "Illegal Character",
            ErrorKind::ExpectedCharacter => "Expected Character",
            ErrorKind::InvalidSyntax => "Invalid Syntax",
            ErrorKind::RuntimeError => "Runtime Error",
        }
    }
}

/// A diagnostic: an error kind, a human-readable detail, the source span it
/// concerns, and — for runtime errors only — the call stack active when it
/// was raised.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub detail: String,
    pub start: Position,
    pub end: Position,
    pub context: Option<Rc<Context>>,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, detail: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            detail: detail.into(),
            start,
            end,
            context: None,
        }
    }

    pub fn illegal_character(detail: impl Into<String>, start: Position, end: Position) -> Self {
        Self::new(ErrorKind::IllegalCharacter, detail, start, end)
    }

    pub fn expected_character(detail: impl Into<String>, start: Position, end: Position) -> Self {
        Self::new(ErrorKind::ExpectedCharacter, detail, start, end)
    }

    pub fn invalid_syntax(detail: impl Into<String>, start: Position, end: Position) -> Self {
        Self::new(ErrorKind::InvalidSyntax, detail, start, end)
    }

    pub fn runtime_error(
        detail: impl Into<String>,
        start: Position,
        end: Position,
        context: Rc<Context>,
    ) -> Self {
        Self {
            kind: ErrorKind::RuntimeError,
            detail: detail.into(),
            start,
            end,
            context: Some(context),
        }
    }

    /// Walk the call-stack context, outermost frame first ("most recent
    /// call last", matching the traceback order a reader of a Python
    /// traceback would expect).
    fn traceback_lines(&self) -> Vec<String> {
        let Some(mut ctx) = self.context.clone() else {
            return Vec::new();
        };
        let mut pos = self.start.clone();
        let mut frames = Vec::new();

        loop {
            frames.push(format!(
                "  File {}, line {}, in {}\n",
                pos.file_name,
                pos.ln + 1,
                ctx.display_name
            ));

            let (Some(next_pos), Some(next_ctx)) =
                (ctx.parent_entry_pos.clone(), ctx.parent.clone())
            else {
                break;
            };
            pos = next_pos;
            ctx = next_ctx;
        }

        frames.reverse();
        frames
    }

    /// Render this diagnostic the way spec §6 describes:
    /// `kind: detail\n  File <name>, line <L+1>[, in <frame>]\n…\n<caret-excerpt>`
    pub fn render(&self) -> String {
        let excerpt = caret_excerpt(&self.start.full_text, &self.start, &self.end);

        if self.context.is_some() {
            let mut out = String::from("Traceback (most recent call last):\n");
            for line in self.traceback_lines() {
                out.push_str(&line);
            }
            out.push_str(&format!("{}: {}", self.kind.label(), self.detail));
            out.push_str("\n\n");
            out.push_str(&excerpt);
            out
        } else {
            format!(
                "{}: {}\nFile {}, line {}\n\n{}",
                self.kind.label(),
                self.detail,
                self.start.file_name,
                self.start.ln + 1,
                excerpt
            )
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl std::error::Error for Diagnostic {}

/// Produce a multi-line excerpt of `text` between `start` and `end`, with a
/// line of `^` underlining the affected columns on each line.
///
/// This is the one piece of the pipeline that is genuinely presentation, not
/// language semantics — spec §6 gives it only by contract, so the shape
/// below (walk back to the previous newline, emit one line + one caret line
/// per source line spanned, trim blank edges, expand tabs) is this crate's
/// own implementation of that contract.
pub fn caret_excerpt(text: &str, start: &Position, end: &Position) -> String {
    let start_idx = (start.idx.max(0) as usize).min(text.len());

    let mut idx_start = text[..start_idx]
        .rfind('\n')
        .map(|i| i + 1)
        .unwrap_or(0);

    let line_count = end.ln.saturating_sub(start.ln) + 1;
    let mut result = String::new();

    for i in 0..line_count {
        let idx_end = text[idx_start..]
            .find('\n')
            .map(|i| idx_start + i)
            .unwrap_or(text.len());

        let line = &text[idx_start..idx_end];
        let col_start = if i == 0 { start.col.max(0) as usize } else { 0 };
        let col_end = if i == line_count - 1 {
            end.col.max(0) as usize
        } else {
            line.len().saturating_sub(1)
        };

        result.push_str(line);
        result.push('\n');
        result.push_str(&" ".repeat(col_start));
        result.push_str(&"^".repeat(col_end.saturating_sub(col_start).max(1)));
        if i + 1 < line_count {
            result.push('\n');
        }

        idx_start = (idx_end + 1).min(text.len());
    }

    result.replace('\t', " ").trim_end_matches('\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn pos(text: &str, idx: isize, ln: usize, col: isize) -> Position {
        Position::new(idx, ln, col, Rc::from("<test>"), Rc::from(text))
    }

    #[test]
    fn single_line_excerpt_underlines_span() {
        let text = "1 + 1";
        let start = pos(text, 4, 0, 4);
        let end = pos(text, 5, 0, 5);
        let excerpt = caret_excerpt(text, &start, &end);
        assert!(excerpt.contains("1 + 1"));
        assert!(excerpt.ends_with('^'));
    }

    #[test]
    fn non_runtime_render_has_single_file_line() {
        let text = "bad";
        let diag = Diagnostic::illegal_character(
            "'b'",
            pos(text, 0, 0, 0),
            pos(text, 1, 0, 1),
        );
        let rendered = diag.render();
        assert!(rendered.starts_with("Illegal Character: 'b'"));
        assert!(rendered.contains("File <test>, line 1"));
        assert!(!rendered.contains("Traceback"));
    }
}
