//! Error rendering using ariadne
//!
//! Statement errors carry their source text and a span, so they render as a
//! source snippet with the offending part underlined. Variable errors have no
//! source location and render as a single message with an optional hint.

use std::io::Write;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use miette::Diagnostic;

use crate::{Error, ExprError};

/// Character set for rendering error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// Use Unicode characters for rich visual output.
    #[default]
    Unicode,
    /// Use ASCII-only characters for compatibility.
    Ascii,
}

/// Configuration for error rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig<'a> {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The filename to display in error messages.
    /// Defaults to "<input>" if not provided.
    pub filename: Option<&'a str>,
    /// The character set to use for rendering.
    pub charset: CharSet,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        RenderConfig::default()
    }
}

impl RenderConfig<'_> {
    const fn default() -> Self {
        Self {
            color: true,
            filename: None,
            charset: CharSet::Unicode,
        }
    }
}

/// Render an error to stderr using the default config.
///
/// # Example
/// ```no_run
/// use cligen::{Session, render_error};
///
/// let mut session = Session::new();
/// if let Err(e) = session.eval("1 + $missing") {
///     render_error(&e.into());
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to(error, &mut std::io::stderr(), &RenderConfig::default()).ok();
}

/// Render an error to a writer with the given configuration.
///
/// # Example
/// ```
/// use cligen::{RenderConfig, Session, render_error_to};
///
/// let mut session = Session::new();
/// let err = session.eval("int8(1) / 0").unwrap_err();
///
/// let mut buf = Vec::new();
/// let config = RenderConfig { color: false, ..Default::default() };
/// render_error_to(&err.into(), &mut buf, &config).unwrap();
/// assert!(String::from_utf8_lossy(&buf).contains("division by zero"));
/// ```
pub fn render_error_to(
    error: &Error,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    match error {
        Error::Expr(err) => render_expr_error(err, writer, config),
        Error::Value(err) => {
            match err.code() {
                Some(code) => writeln!(writer, "[{code}] Error: {err}")?,
                None => writeln!(writer, "Error: {err}")?,
            }
            if let Some(help) = err.help() {
                writeln!(writer, "Help: {help}")?;
            }
            Ok(())
        }
    }
}

fn render_expr_error(
    error: &ExprError,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    let filename = config.filename.unwrap_or("<input>");
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let ariadne_charset = match config.charset {
        CharSet::Unicode => ariadne::CharSet::Unicode,
        CharSet::Ascii => ariadne::CharSet::Ascii,
    };
    let ariadne_config = ariadne::Config::default()
        .with_color(config.color)
        .with_char_set(ariadne_charset);

    // Spans from the grammar are byte offsets; clamp so a span at end of
    // input still points inside the source.
    let end = error.input.len();
    let range = error.span.start.min(end)..error.span.end.min(end);

    let mut report = Report::build(ReportKind::Error, (filename, range.clone()))
        .with_code(error.code)
        .with_message(&error.message)
        .with_config(ariadne_config)
        .with_label(
            Label::new((filename, range))
                .with_message(&error.message)
                .with_color(colors.next()),
        );
    if let Some(help) = &error.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write((filename, Source::from(error.input.as_str())), &mut *writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;
    use expect_test::expect;

    const UNICODE_CONFIG: RenderConfig = RenderConfig {
        color: false,
        filename: Some("test.cgv"),
        charset: CharSet::Unicode,
    };

    const ASCII_CONFIG: RenderConfig = RenderConfig {
        color: false,
        filename: Some("test.cgv"),
        charset: CharSet::Ascii,
    };

    fn render_statement(source: &str, config: &RenderConfig) -> String {
        let mut session = Session::new();
        session.eval("x = uint8(3)").unwrap();
        match session.eval(source) {
            Err(e) => render(&e.into(), config),
            Ok(v) => panic!("expected an error for {source:?}, got {v}"),
        }
    }

    fn render(error: &Error, config: &RenderConfig) -> String {
        let mut buf = Vec::new();
        render_error_to(error, &mut buf, config).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_undefined_variable_unicode() {
        let output = render_statement("1 + $missing", &UNICODE_CONFIG);
        assert!(
            output.starts_with("[E002] Error: undefined variable 'missing'"),
            "{output}"
        );
        assert!(output.contains("test.cgv:1:5"), "{output}");
        assert!(output.contains("│ 1 + $missing"), "{output}");
        assert!(output.contains("Help: assign it first"), "{output}");
    }

    #[test]
    fn test_value_error_ascii() {
        let output = render_statement("$x + uint8(300)", &ASCII_CONFIG);
        assert!(
            output.starts_with("[E003] Error: invalid format for type 'uint8': `300`"),
            "{output}"
        );
        assert!(output.contains("test.cgv:1:6"), "{output}");
        assert!(output.contains("| $x + uint8(300)"), "{output}");
        assert!(output.contains("Help: expected integer in 0..=255"), "{output}");
        assert!(!output.contains('│'), "{output}");
    }

    #[test]
    fn test_syntax_error_at_end_of_input() {
        let output = render_statement("1 +", &UNICODE_CONFIG);
        assert!(output.starts_with("[P001] Error:"), "{output}");
        assert!(output.contains("1 +"), "{output}");
    }

    #[test]
    fn test_plain_value_error() {
        let error = Error::from(cligen_core::Error::NotFound {
            name: "z".to_string(),
        });
        expect![[r#"
            [cligen::not_found] Error: no variable named 'z'
        "#]]
        .assert_eq(&render(&error, &UNICODE_CONFIG));

        let error = Error::from(cligen_core::Error::parse(crate::CvType::Bool, "maybe"));
        expect![[r#"
            [cligen::parse_error] Error: invalid format for type 'bool': `maybe`
            Help: expected true, false, on or off
        "#]]
        .assert_eq(&render(&error, &ASCII_CONFIG));
    }

    #[test]
    fn test_charset_default_is_unicode() {
        assert_eq!(CharSet::default(), CharSet::Unicode);
        assert_eq!(RenderConfig::default().charset, CharSet::Unicode);
    }
}
