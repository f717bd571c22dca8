//! Lexer: source text to token stream (spec §4.1).

use std::rc::Rc;

use crate::diagnostic::Diagnostic;
use crate::position::Position;
use crate::token::{Token, TokenType, TokenValue, KEYWORDS};

const DIGITS: &str = "0123456789";
const LETTERS_DIGITS_UNDERSCORE_EXTRA: &str = "_";

pub struct Lexer {
    text: Rc<str>,
    file_name: Rc<str>,
    chars: Vec<char>,
    pos: Position,
    current: Option<char>,
}

impl Lexer {
    pub fn new(file_name: impl Into<Rc<str>>, text: impl Into<Rc<str>>) -> Self {
        let file_name = file_name.into();
        let text = text.into();
        let chars: Vec<char> = text.chars().collect();
        let mut pos = Position::new(-1, 0, -1, file_name.clone(), text.clone());
        pos.advance(None);
        let current = chars.first().copied();
        Self {
            text,
            file_name,
            chars,
            pos,
            current,
        }
    }

    fn advance(&mut self) {
        self.pos.advance(self.current);
        let idx = self.pos.idx;
        self.current = if idx >= 0 {
            self.chars.get(idx as usize).copied()
        } else {
            None
        };
    }

    pub fn make_tokens(mut self) -> Result<Vec<Token>, Diagnostic> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.current {
            if ch == ' ' || ch == '\t' {
                self.advance();
            } else if ch == '#' {
                self.skip_comment();
            } else if ch == '\n' || ch == ';' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::Newline, start.clone(), start));
            } else if DIGITS.contains(ch) || ch == '.' {
                tokens.push(self.make_number());
            } else if ch.is_ascii_alphabetic() || ch == '_' {
                tokens.push(self.make_identifier());
            } else if ch == '"' {
                tokens.push(self.make_string()?);
            } else if ch == '+' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::Sum, start.clone(), self.pos.clone()));
            } else if ch == '-' {
                tokens.push(self.make_minus_or_arrow());
            } else if ch == '*' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::Mul, start, self.pos.clone()));
            } else if ch == '/' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::Div, start, self.pos.clone()));
            } else if ch == '^' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::Pow, start, self.pos.clone()));
            } else if ch == '(' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::LParen, start, self.pos.clone()));
            } else if ch == ')' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::RParen, start, self.pos.clone()));
            } else if ch == '[' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::LSquare, start, self.pos.clone()));
            } else if ch == ']' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::RSquare, start, self.pos.clone()));
            } else if ch == '!' {
                tokens.push(self.make_not_equals()?);
            } else if ch == '=' {
                tokens.push(self.make_equals());
            } else if ch == '<' {
                tokens.push(self.make_less_than());
            } else if ch == '>' {
                tokens.push(self.make_greater_than());
            } else if ch == ',' {
                let start = self.pos.clone();
                self.advance();
                tokens.push(Token::bare(TokenType::Comma, start, self.pos.clone()));
            } else {
                let start = self.pos.clone();
                self.advance();
                return Err(Diagnostic::illegal_character(
                    format!("'{}'", ch),
                    start,
                    self.pos.clone(),
                ));
            }
        }

        let eof_pos = self.pos.clone();
        tokens.push(Token::bare(TokenType::Eof, eof_pos.clone(), eof_pos));
        Ok(tokens)
    }

    /// `#` begins a line comment; the terminating newline is consumed
    /// without emitting a `NEWLINE` token (deliberate, see spec §9).
    fn skip_comment(&mut self) {
        self.advance();
        while let Some(ch) = self.current {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        self.advance();
    }

    fn make_number(&mut self) -> Token {
        let start = self.pos.clone();
        let mut num_str = String::new();
        let mut dot_count = 0;

        while let Some(ch) = self.current {
            if DIGITS.contains(ch) {
                num_str.push(ch);
                self.advance();
            } else if ch == '.' && dot_count == 0 {
                dot_count += 1;
                num_str.push('.');
                self.advance();
            } else {
                break;
            }
        }

        let end = self.pos.clone();
        if dot_count == 0 {
            let value = num_str.parse::<i64>().unwrap_or(0);
            Token::new(TokenType::Int, TokenValue::Int(value), start, end)
        } else {
            let value = num_str.parse::<f64>().unwrap_or(0.0);
            Token::new(TokenType::Float, TokenValue::Float(value), start, end)
        }
    }

    fn make_identifier(&mut self) -> Token {
        let start = self.pos.clone();
        let mut id_str = String::new();

        while let Some(ch) = self.current {
            if ch.is_ascii_alphanumeric() || LETTERS_DIGITS_UNDERSCORE_EXTRA.contains(ch) {
                id_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let end = self.pos.clone();
        let kind = if KEYWORDS.contains(&id_str.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(kind, TokenValue::Str(Rc::from(id_str.as_str())), start, end)
    }

    fn make_string(&mut self) -> Result<Token, Diagnostic> {
        let start = self.pos.clone();
        let mut out = String::new();
        self.advance();

        let mut escape_character = false;
        while let Some(ch) = self.current {
            if escape_character {
                out.push(match ch {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
                escape_character = false;
                self.advance();
                continue;
            }

            if ch == '"' {
                break;
            }

            if ch == '\\' {
                escape_character = true;
                self.advance();
                continue;
            }

            out.push(ch);
            self.advance();
        }

        self.advance();
        let end = self.pos.clone();
        Ok(Token::new(
            TokenType::String,
            TokenValue::Str(Rc::from(out.as_str())),
            start,
            end,
        ))
    }

    fn make_minus_or_arrow(&mut self) -> Token {
        let start = self.pos.clone();
        self.advance();

        if self.current == Some('>') {
            self.advance();
            Token::bare(TokenType::Arrow, start, self.pos.clone())
        } else {
            Token::bare(TokenType::Minus, start, self.pos.clone())
        }
    }

    fn make_not_equals(&mut self) -> Result<Token, Diagnostic> {
        let start = self.pos.clone();
        self.advance();

        if self.current == Some('=') {
            self.advance();
            Ok(Token::bare(TokenType::Ne, start, self.pos.clone()))
        } else {
            let end = self.pos.clone();
            Err(Diagnostic::expected_character("'=' (after '!')", start, end))
        }
    }

    fn make_equals(&mut self) -> Token {
        let start = self.pos.clone();
        self.advance();

        if self.current == Some('=') {
            self.advance();
            Token::bare(TokenType::Ee, start, self.pos.clone())
        } else {
            Token::bare(TokenType::Eq, start, self.pos.clone())
        }
    }

    fn make_less_than(&mut self) -> Token {
        let start = self.pos.clone();
        self.advance();

        if self.current == Some('=') {
            self.advance();
            Token::bare(TokenType::Lte, start, self.pos.clone())
        } else {
            Token::bare(TokenType::Lt, start, self.pos.clone())
        }
    }

    fn make_greater_than(&mut self) -> Token {
        let start = self.pos.clone();
        self.advance();

        if self.current == Some('=') {
            self.advance();
            Token::bare(TokenType::Gte, start, self.pos.clone())
        } else {
            Token::bare(TokenType::Gt, start, self.pos.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(text: &str) -> Vec<TokenType> {
        Lexer::new("<test>", text)
            .make_tokens()
            .expect("should lex")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_arithmetic() {
        assert_eq!(
            lex("2 + 3 * 4"),
            vec![
                TokenType::Int,
                TokenType::Sum,
                TokenType::Int,
                TokenType::Mul,
                TokenType::Int,
                TokenType::Eof
            ]
        );
    }

    #[test]
    fn comment_swallows_trailing_newline() {
        let tokens = lex("VAR a = 1 # comment\nPRINT(a)");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert!(!kinds.contains(&TokenType::Newline));
    }

    #[test]
    fn arrow_vs_minus() {
        assert_eq!(lex("->"), vec![TokenType::Arrow, TokenType::Eof]);
        assert_eq!(lex("- 1"), vec![TokenType::Minus, TokenType::Int, TokenType::Eof]);
    }

    #[test]
    fn bang_without_equals_is_expected_character_error() {
        let err = Lexer::new("<test>", "!1").make_tokens().unwrap_err();
        assert_eq!(err.kind, crate::diagnostic::ErrorKind::ExpectedCharacter);
    }

    #[test]
    fn string_escapes_n_and_t_only() {
        let tokens = Lexer::new("<test>", r#""a\nb\tc\\d""#).make_tokens().unwrap();
        match &tokens[0].value {
            TokenValue::Str(s) => assert_eq!(s.as_ref(), "a\nb\tc\\d"),
            _ => panic!("expected string token"),
        }
    }

    #[test]
    fn keyword_vs_identifier() {
        let tokens = lex("VAR varName");
        assert_eq!(tokens[0], TokenType::Keyword);
        assert_eq!(tokens[1], TokenType::Identifier);
    }

    #[test]
    fn bare_dot_lexes_as_zero_float() {
        let tokens = Lexer::new("<test>", ".").make_tokens().unwrap();
        match &tokens[0] {
            Token {
                kind: TokenType::Float,
                value: TokenValue::Float(f),
                ..
            } => assert_eq!(*f, 0.0),
            other => panic!("expected FLOAT 0.0, got {:?}", other),
        }
    }

    #[test]
    fn illegal_character_is_reported() {
        let err = Lexer::new("<test>", "@").make_tokens().unwrap_err();
        assert_eq!(err.kind, crate::diagnostic::ErrorKind::IllegalCharacter);
    }
}
