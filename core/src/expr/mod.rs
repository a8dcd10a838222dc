//! A small statement language over variables.
//!
//! Operands are typed literals such as `ipv4addr(10.0.0.1)`, bare numbers
//! and strings, and `$name` references to variables held by a [`Session`].
//! The four arithmetic operators map onto [`CgVar::apply`](crate::CgVar::apply),
//! and assignments store results back into the session.

mod error;
mod parser;
mod session;

pub use error::{ExprError, codes};
pub use parser::parse;
pub use session::Session;

use crate::kind::CvType;
use crate::var::arith::ArithOp;

/// Byte range into the statement text.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    /// The smallest span covering both.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl From<pest::Span<'_>> for Span {
    fn from(span: pest::Span<'_>) -> Self {
        Span::new(span.start(), span.end())
    }
}

impl From<Span> for core::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// `kind(text)`.
    Typed {
        kind: CvType,
        text: String,
        span: Span,
    },
    Int {
        value: i64,
        span: Span,
    },
    Float {
        value: f64,
        span: Span,
    },
    Str {
        value: String,
        span: Span,
    },
    /// `$name`.
    Var {
        name: String,
        span: Span,
    },
    Binary {
        op: ArithOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Typed { span, .. }
            | Expr::Int { span, .. }
            | Expr::Float { span, .. }
            | Expr::Str { span, .. }
            | Expr::Var { span, .. }
            | Expr::Binary { span, .. } => *span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `name = value`, or `name op= value` when `op` is set.
    Assign {
        name: String,
        name_span: Span,
        op: Option<ArithOp>,
        value: Expr,
    },
    Expr(Expr),
}
