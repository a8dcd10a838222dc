//! Errors raised by variables and variable vectors.
//!
//! Every error is local to the value being manipulated; none of them leave
//! a variable half-updated.

use miette::Diagnostic;
use thiserror::Error;

use crate::kind::CvType;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum Error {
    /// Text that does not match the grammar of the target kind.
    #[error("invalid format for type '{kind}': `{offending}`")]
    #[diagnostic(code(cligen::parse_error), help("expected {expected}"))]
    Parse {
        kind: CvType,
        /// The complete text that was being parsed.
        input: String,
        /// The part of `input` that could not be parsed.
        offending: String,
        expected: &'static str,
    },

    /// A typed accessor used on a variable of another kind.
    #[error("invalid type: expected {expected}, found {found}")]
    #[diagnostic(code(cligen::type_mismatch))]
    TypeMismatch {
        expected: &'static str,
        found: CvType,
    },

    #[error("unsupported operand type(s) for {op}: '{lhs}' and '{rhs}'")]
    #[diagnostic(code(cligen::unsupported_operation))]
    UnsupportedOperation {
        op: char,
        lhs: String,
        rhs: String,
    },

    #[error("division by zero")]
    #[diagnostic(code(cligen::division_by_zero))]
    DivisionByZero,

    /// An intermediate result does not fit the arithmetic representation.
    #[error("arithmetic overflow in {op}")]
    #[diagnostic(code(cligen::overflow))]
    Overflow { op: char },

    #[error("index {index} out of range for vector of length {len}")]
    #[diagnostic(code(cligen::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no variable named '{name}'")]
    #[diagnostic(code(cligen::not_found))]
    NotFound { name: String },

    #[error("invalid argument: {0}")]
    #[diagnostic(code(cligen::invalid_argument))]
    InvalidArgument(String),
}

impl Error {
    /// Parse error for `input` where the whole text is at fault.
    pub fn parse(kind: CvType, input: &str) -> Self {
        Error::parse_at(kind, input, input)
    }

    /// Parse error pointing at the `offending` part of `input`.
    pub fn parse_at(kind: CvType, input: &str, offending: &str) -> Self {
        Error::Parse {
            kind,
            input: input.to_string(),
            offending: offending.to_string(),
            expected: kind.grammar(),
        }
    }

    pub(crate) fn mismatch(expected: &'static str, found: CvType) -> Self {
        Error::TypeMismatch { expected, found }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }
}
