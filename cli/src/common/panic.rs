//! Panic handler for user-friendly crash reporting.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::panic::PanicHookInfo;

thread_local! {
    /// The statement being evaluated (for REPL crash reports).
    static CURRENT_EXPRESSION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Set the statement being evaluated.
///
/// Call this before evaluating user input in the REPL.
pub fn set_current_expression(expr: &str) {
    CURRENT_EXPRESSION.with(|cell| {
        *cell.borrow_mut() = Some(expr.to_string());
    });
}

/// Clear the current statement.
pub fn clear_current_expression() {
    CURRENT_EXPRESSION.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

fn get_current_expression() -> Option<String> {
    CURRENT_EXPRESSION.with(|cell| cell.borrow().clone())
}

/// Install the custom panic handler.
///
/// This should be called early in main() before any other initialization.
pub fn install_handler() {
    std::panic::set_hook(Box::new(panic_hook));
}

fn panic_hook(info: &PanicHookInfo<'_>) {
    eprintln!("\ncgv crashed unexpectedly!\n");
    eprintln!("{info}");

    let report = PanicInfo::capture(info);
    if let Some(command_line) = report.format_command_line() {
        eprintln!("\nCommand: {command_line}");
    }
    eprintln!("\nPlease attach this report when filing an issue:");
    eprintln!("  {}", serde_json::to_string(&report).unwrap_or_default());
}

/// Decode panic info from JSON string.
pub fn decode_panic_info(json: &str) -> Option<PanicInfo> {
    serde_json::from_str(json).ok()
}

/// Panic information for bug reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanicInfo {
    pub version: String,
    pub os: String,
    pub arch: String,
    pub location: String,
    /// Command line arguments (each arg as a separate element).
    pub command_line: Vec<String>,
    /// The statement being evaluated (for REPL crashes).
    pub expression: Option<String>,
    pub message: String,
}

impl PanicInfo {
    fn capture(info: &PanicHookInfo<'_>) -> Self {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("unknown");

        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());

        PanicInfo {
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            location,
            command_line: std::env::args().skip(1).collect(),
            expression: get_current_expression(),
            message: message.to_string(),
        }
    }

    /// Format the command line for display, properly shell-escaped.
    pub fn format_command_line(&self) -> Option<String> {
        if self.command_line.is_empty() {
            return None;
        }
        Some(format!(
            "cgv {}",
            shlex::try_join(self.command_line.iter().map(|s| s.as_str())).ok()?
        ))
    }
}
