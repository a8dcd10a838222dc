//! File input utilities.

use std::io::Read;

/// Read input from a file path or stdin if path is "-".
///
/// Returns the content and a display name for error messages.
pub fn read_input(path: &str) -> Result<(String, String), String> {
    if is_stdin(path) {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| format!("<stdin>: {}", e))?;
        Ok((content, "<stdin>".to_string()))
    } else {
        let content = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
        Ok((content, path.to_string()))
    }
}

/// Check if the path represents stdin.
pub fn is_stdin(path: &str) -> bool {
    path == "-"
}

/// Blank out a leading `#!` line, keeping byte offsets intact.
///
/// Returns the shebang line (if any) and the remaining content.
pub fn strip_shebang(content: &str) -> (Option<&str>, String) {
    if !content.starts_with("#!") {
        return (None, content.to_string());
    }
    let end = content.find('\n').unwrap_or(content.len());
    let blanked = " ".repeat(end) + &content[end..];
    (Some(&content[..end]), blanked)
}

/// A statement of a script and the byte offset where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub offset: usize,
    pub text: &'a str,
}

/// The statements of a script: one per line, skipping blank lines and
/// lines whose first non-blank character is `#`.
pub fn statements(content: &str) -> impl Iterator<Item = ScriptLine<'_>> {
    let mut offset = 0;
    content
        .split_inclusive('\n')
        .enumerate()
        .filter_map(move |(index, raw)| {
            let start = offset;
            offset += raw.len();
            let text = raw.trim_end_matches(['\n', '\r']);
            let trimmed = text.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            Some(ScriptLine {
                number: index + 1,
                offset: start,
                text,
            })
        })
}
