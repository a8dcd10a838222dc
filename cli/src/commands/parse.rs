//! The `parse` command - parse text as a value of one type.

use std::process::ExitCode;

use cligen::{CgVar, CvType};

use crate::cli::{GlobalOptions, ParseArgs};
use crate::common::CliResult;
use crate::common::error::render;

/// Run the parse command.
pub fn run(args: ParseArgs, global: &GlobalOptions) -> ExitCode {
    match parse(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            render(&e, None, global.no_color);
            ExitCode::FAILURE
        }
    }
}

/// A type given by name or by numeric code.
pub fn resolve_kind(text: &str) -> CliResult<CvType> {
    let kind = match text.parse::<u8>() {
        Ok(code) => CvType::from_code(code)?,
        Err(_) => text.parse::<CvType>()?,
    };
    Ok(kind)
}

fn parse(args: &ParseArgs) -> CliResult<String> {
    let kind = resolve_kind(&args.kind)?;
    let var = CgVar::with_text(kind, args.name.as_deref(), &args.text)?;
    if args.json {
        serde_json::to_string(&var)
            .map_err(|e| cligen_core::Error::InvalidArgument(e.to_string()).into())
    } else {
        Ok(format!("{} {var}", var.type2str()))
    }
}
