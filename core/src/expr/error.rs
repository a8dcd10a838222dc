use core::fmt;

use miette::{Diagnostic, LabeledSpan};
use thiserror::Error;

use super::Span;
use crate::error::Error;

/// Stable error codes.
pub mod codes {
    /// The statement does not match the grammar.
    pub const SYNTAX: &str = "P001";
    /// A number literal does not fit its host type.
    pub const LITERAL: &str = "P002";
    /// A typed literal names an unknown type.
    pub const UNKNOWN_TYPE: &str = "E001";
    /// A `$name` reference or compound assignment to an unknown variable.
    pub const UNDEFINED: &str = "E002";
    /// A variable operation failed.
    pub const VALUE: &str = "E003";
}

/// An error in a statement, located by a span of its text.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ExprError {
    pub code: &'static str,
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
    /// The statement text the span points into.
    pub input: String,
    /// The variable error behind an evaluation failure.
    #[source]
    pub cause: Option<Error>,
}

impl ExprError {
    pub fn new(code: &'static str, message: impl Into<String>, span: Span, input: &str) -> Self {
        ExprError {
            code,
            message: message.into(),
            span,
            help: None,
            input: input.to_string(),
            cause: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Wrap a variable error raised while evaluating the text at `span`.
    pub fn from_value(err: Error, span: Span, input: &str) -> Self {
        let help = miette::Diagnostic::help(&err).map(|h| h.to_string());
        ExprError {
            code: codes::VALUE,
            message: err.to_string(),
            span,
            help,
            input: input.to_string(),
            cause: Some(err),
        }
    }
}

impl Diagnostic for ExprError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let label = LabeledSpan::at(
            core::ops::Range::from(self.span),
            self.message.clone(),
        );
        Some(Box::new(core::iter::once(label)))
    }
}
