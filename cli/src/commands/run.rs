//! The `run` command - run a script one statement per line.

use std::process::ExitCode;

use cligen::{Session, Span};

use crate::cli::{GlobalOptions, RunArgs};
use crate::common::input::{read_input, statements, strip_shebang};

use super::eval::{print_result, report};

/// Run the run command.
pub fn run(args: RunArgs, global: &GlobalOptions) -> ExitCode {
    let (content, display_name) = match read_input(&args.file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Blank out a shebang line (e.g. #!/usr/bin/env cgv run)
    let (_, content) = strip_shebang(&content);

    let mut session = Session::with_options(global.arith);
    for line in statements(&content) {
        tracing::debug!(line = line.number, "evaluating");
        match session.eval(line.text) {
            Ok(var) => print_result(&var, args.show_type),
            Err(mut e) => {
                // Report against the whole script so line numbers are right.
                e.span = Span::new(e.span.start + line.offset, e.span.end + line.offset);
                e.input = content.clone();
                report(e, Some(&display_name), global.no_color);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
