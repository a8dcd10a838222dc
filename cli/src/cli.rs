//! Command-line interface definitions.
//!
//! This module contains only clap struct definitions - no business logic.
//! All command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use cligen::{ArithOptions, DivPrecision};

/// cgv - parse, inspect and compute with CLIgen variables
#[derive(Parser, Debug)]
#[command(name = "cgv", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Fractional digits of a decimal64 quotient: dividend, divisor, max or a count
    #[arg(long, global = true, default_value = "dividend", value_name = "PRECISION")]
    pub div_precision: DivPrecision,
}

impl Cli {
    /// Options shared by every command that evaluates statements.
    pub fn global(&self) -> GlobalOptions {
        GlobalOptions {
            no_color: self.no_color,
            arith: ArithOptions {
                div_precision: self.div_precision,
            },
        }
    }
}

/// Global flags in the form commands consume them.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalOptions {
    pub no_color: bool,
    pub arith: ArithOptions,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a statement
    Eval(EvalArgs),

    /// Evaluate a script one statement per line
    Run(RunArgs),

    /// Parse text as a value of the given type
    Parse(ParseArgs),

    /// List the variable types
    Types,

    /// Start interactive REPL
    Repl,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `eval` command.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Statement to evaluate, e.g. `int8(5) + uint32(10)`
    pub expression: String,

    /// Print the type of the result before its value
    #[arg(long, short = 't')]
    pub show_type: bool,
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Script to run, or `-` for stdin
    pub file: String,

    /// Print the type of each result before its value
    #[arg(long, short = 't')]
    pub show_type: bool,
}

/// Arguments for the `parse` command.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Type name (e.g. `ipv4prefix`) or numeric type code
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// Text to parse
    pub text: String,

    /// Name to give the variable
    #[arg(long)]
    pub name: Option<String>,

    /// Print the variable as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
