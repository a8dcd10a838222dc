//! Command implementations.
//!
//! Each subcommand has its own module with a `run` function.

pub mod completions;
pub mod eval;
pub mod parse;
pub mod repl;
pub mod run;
pub mod types;
