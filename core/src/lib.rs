//! Core value model for CLIgen variables.
//!
//! - [`CvType`]: the fixed set of variable kinds and their widening order.
//! - [`CgVar`]: a named, tagged value holding exactly one [`Value`].
//! - [`Cvec`]: an ordered vector of variables with lookup by position or name.
//! - [`expr`]: a small expression language over variables, with a [`expr::Session`]
//!   that keeps named variables in a [`Cvec`].

pub mod cvec;
pub mod error;
pub mod expr;
pub mod kind;
pub mod var;

pub use cvec::{Cvec, Key, Needle};
pub use error::{Error, Result};
pub use kind::CvType;
pub use var::{
    CgVar, Value,
    arith::{ArithOp, ArithOptions, DivPrecision, Operand},
    number::Number,
    scalar::{Dec64, Ipv4Prefix, Ipv6Prefix, MacAddr, TimeSpec, Timestamp},
};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_division_rounding() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
