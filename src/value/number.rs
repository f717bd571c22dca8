use std::fmt;
use std::rc::Rc;

use crate::context::Context;
use crate::diagnostic::Diagnostic;
use crate::position::Position;

/// Integer/float distinction and promotion rules are this crate's own
/// addition on top of the original source's single dynamic `Number` — see
/// DESIGN.md, open question 5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumKind {
    Int(i64),
    Float(f64),
}

impl NumKind {
    pub fn as_f64(self) -> f64 {
        match self {
            NumKind::Int(n) => n as f64,
            NumKind::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            NumKind::Int(n) => n == 0,
            NumKind::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumKind::Int(n) => write!(f, "{}", n),
            NumKind::Float(x) => write!(f, "{}", x),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Number {
    pub num: NumKind,
    pub start: Position,
    pub end: Position,
    pub context: Option<Rc<Context>>,
}

impl Number {
    pub fn new(num: NumKind, start: Position, end: Position) -> Self {
        Self {
            num,
            start,
            end,
            context: None,
        }
    }

    pub fn from_int(n: i64, start: Position, end: Position) -> Self {
        Self::new(NumKind::Int(n), start, end)
    }

    pub fn from_float(n: f64, start: Position, end: Position) -> Self {
        Self::new(NumKind::Float(n), start, end)
    }

    pub fn with_position(&self, start: Position, end: Position) -> Self {
        Self {
            num: self.num,
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
        !self.num.is_zero()
    }

    pub fn added_to(&self, other: &Number) -> Result<Number, Diagnostic> {
        let num = match (self.num, other.num) {
            (NumKind::Int(a), NumKind::Int(b)) => NumKind::Int(a.wrapping_add(b)),
            _ => NumKind::Float(self.num.as_f64() + other.num.as_f64()),
        };
        Ok(Number::new(num, self.start.clone(), other.end.clone()).with_context_opt(&self.context))
    }

    pub fn subbed_by(&self, other: &Number) -> Result<Number, Diagnostic> {
        let num = match (self.num, other.num) {
            (NumKind::Int(a), NumKind::Int(b)) => NumKind::Int(a.wrapping_sub(b)),
            _ => NumKind::Float(self.num.as_f64() - other.num.as_f64()),
        };
        Ok(Number::new(num, self.start.clone(), other.end.clone()).with_context_opt(&self.context))
    }

    pub fn multed_by(&self, other: &Number) -> Result<Number, Diagnostic> {
        let num = match (self.num, other.num) {
            (NumKind::Int(a), NumKind::Int(b)) => NumKind::Int(a.wrapping_mul(b)),
            _ => NumKind::Float(self.num.as_f64() * other.num.as_f64()),
        };
        Ok(Number::new(num, self.start.clone(), other.end.clone()).with_context_opt(&self.context))
    }

    /// True division always promotes to float, matching the original
    /// Python source's `/` operator.
    pub fn dived_by(&self, other: &Number) -> Result<Number, Diagnostic> {
        if other.num.is_zero() {
            return Err(Diagnostic::runtime_error(
                "Division by zero",
                self.start.clone(),
                other.end.clone(),
                self.context
                    .clone()
                    .unwrap_or_else(|| Rc::new(Context::root("<program>"))),
            ));
        }
        let value = self.num.as_f64() / other.num.as_f64();
        Ok(Number::new(NumKind::Float(value), self.start.clone(), other.end.clone())
            .with_context_opt(&self.context))
    }

    /// Stays integer for a non-negative integer exponent that fits in
    /// `i64`, else promotes to float (see DESIGN.md, open question 5) —
    /// `checked_pow` avoids the panic `pow` would raise on overflow (e.g.
    /// `2 ^ 100`), matching the `wrapping_*` discipline used above.
    pub fn powed_by(&self, other: &Number) -> Result<Number, Diagnostic> {
        let num = match (self.num, other.num) {
            (NumKind::Int(a), NumKind::Int(b)) if b >= 0 => match a.checked_pow(b as u32) {
                Some(n) => NumKind::Int(n),
                None => NumKind::Float(self.num.as_f64().powf(other.num.as_f64())),
            },
            _ => NumKind::Float(self.num.as_f64().powf(other.num.as_f64())),
        };
        Ok(Number::new(num, self.start.clone(), other.end.clone()).with_context_opt(&self.context))
    }

    pub fn get_comparison_eq(&self, other: &Number) -> Number {
        self.bool_result(self.num.as_f64() == other.num.as_f64(), other)
    }

    pub fn get_comparison_ne(&self, other: &Number) -> Number {
        self.bool_result(self.num.as_f64() != other.num.as_f64(), other)
    }

    pub fn get_comparison_lt(&self, other: &Number) -> Number {
        self.bool_result(self.num.as_f64() < other.num.as_f64(), other)
    }

    pub fn get_comparison_gt(&self, other: &Number) -> Number {
        self.bool_result(self.num.as_f64() > other.num.as_f64(), other)
    }

    pub fn get_comparison_lte(&self, other: &Number) -> Number {
        self.bool_result(self.num.as_f64() <= other.num.as_f64(), other)
    }

    pub fn get_comparison_gte(&self, other: &Number) -> Number {
        self.bool_result(self.num.as_f64() >= other.num.as_f64(), other)
    }

    pub fn anded_by(&self, other: &Number) -> Number {
        self.bool_result(self.is_truthy() && other.is_truthy(), other)
    }

    pub fn ored_by(&self, other: &Number) -> Number {
        self.bool_result(self.is_truthy() || other.is_truthy(), other)
    }

    pub fn notted(&self) -> Number {
        Number::new(
            NumKind::Int(if self.is_truthy() { 0 } else { 1 }),
            self.start.clone(),
            self.end.clone(),
        )
        .with_context_opt(&self.context)
    }

    fn bool_result(&self, cond: bool, other: &Number) -> Number {
        Number::new(
            NumKind::Int(if cond { 1 } else { 0 }),
            self.start.clone(),
            other.end.clone(),
        )
        .with_context_opt(&self.context)
    }

    fn with_context_opt(mut self, context: &Option<Rc<Context>>) -> Self {
        self.context = context.clone();
        self
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.num)
    }
}
