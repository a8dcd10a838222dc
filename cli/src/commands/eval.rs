//! The `eval` command - evaluate a statement.

use std::process::ExitCode;

use cligen::{CgVar, ExprError, Session};

use crate::cli::{EvalArgs, GlobalOptions};
use crate::common::error::render;

/// Run the eval command.
pub fn run(args: EvalArgs, global: &GlobalOptions) -> ExitCode {
    let mut session = Session::with_options(global.arith);
    match interpret_input(&mut session, &args.expression, None, global.no_color) {
        Some(var) => {
            print_result(&var, args.show_type);
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}

/// Evaluate one statement, rendering any error to stderr.
pub fn interpret_input(
    session: &mut Session,
    input: &str,
    filename: Option<&str>,
    no_color: bool,
) -> Option<CgVar> {
    match session.eval(input) {
        Ok(var) => Some(var),
        Err(e) => {
            report(e, filename, no_color);
            None
        }
    }
}

/// Render a statement error to stderr.
pub fn report(error: ExprError, filename: Option<&str>, no_color: bool) {
    tracing::debug!(code = error.code, span = ?error.span, "statement failed");
    render(&cligen::Error::from(error), filename, no_color);
}

/// Print a result as its canonical text, optionally preceded by its type.
pub fn print_result(var: &CgVar, show_type: bool) {
    if show_type {
        println!("{} {var}", var.type2str());
    } else {
        println!("{var}");
    }
}
