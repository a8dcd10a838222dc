//! cligen - CLIgen variables and variable vectors
//!
//! # Overview
//!
//! CLIgen parses command lines against a syntax specification and hands the
//! matched arguments to callbacks as typed variables. This crate provides
//! those variables natively:
//!
//! - [`CgVar`]: a named value of one of 21 kinds (integers, decimal64,
//!   booleans, strings, IPv4/IPv6 addresses and prefixes, MAC addresses,
//!   URLs, UUIDs and timestamps), parsed from and formatted to text.
//! - [`Cvec`]: an ordered vector of variables with lookup by position or name.
//! - [`Session`]: a small statement language over variables.
//!
//! # Quick Start
//!
//! ```
//! use cligen::{CgVar, Cvec, CvType};
//!
//! let mut cvec = Cvec::new();
//! cvec.append(CgVar::with_text(CvType::Uint8, Some("x"), "5")?);
//! cvec.append(CgVar::with_text(CvType::Uint32, Some("y"), "10")?);
//!
//! let sum = cvec.get("x")?.add(cvec.get("y")?)?;
//! assert_eq!(sum.kind(), CvType::Uint32);
//! assert_eq!(sum.to_string(), "15");
//! # Ok::<(), cligen::Error>(())
//! ```
//!
//! # Statements
//!
//! ```
//! use cligen::Session;
//!
//! let mut session = Session::new();
//! session.eval("gw = ipv4addr(192.0.2.1)")?;
//! let text = session.eval(r#""via " + $gw"#)?;
//! assert_eq!(text.to_string(), "via 192.0.2.1");
//! # Ok::<(), cligen::Error>(())
//! ```

use miette::Diagnostic;
use thiserror::Error;

// Error rendering utilities
pub mod error_renderer;
pub use error_renderer::{CharSet, RenderConfig, render_error, render_error_to};

// Re-export public API from cligen_core
pub use cligen_core::{
    ArithOp, ArithOptions, CgVar, Cvec, CvType, Dec64, DivPrecision, Ipv4Prefix, Ipv6Prefix, Key,
    MacAddr, Needle, Number, Operand, TimeSpec, Timestamp, Value,
};
pub use cligen_core::expr::{self, ExprError, Session, Span};

/// Any error raised by this crate.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum Error {
    /// A variable or vector operation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Value(#[from] cligen_core::Error),

    /// A statement failed to parse or evaluate.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Expr(#[from] ExprError),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
