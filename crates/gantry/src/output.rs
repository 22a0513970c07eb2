//! Output rendering for the `--output` formats.
//!
//! Each command hands over a [`View`]: the serde payload the JSON
//! formats serialize, plus the pre-formatted strings the human and
//! scripting formats print. [`table`] builds the text form for
//! commands whose natural shape is rows.

use std::io::{self, IsTerminal, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// One command's printable result.
pub struct View<'a, T: serde::Serialize> {
    /// Payload serialized by the JSON formats.
    pub data: &'a T,
    /// Human-readable form: a detail block or a table.
    pub text: String,
    /// Identifiers only, one per line, for scripting.
    pub plain: String,
}

/// Render a view in the requested format.
pub fn render<T: serde::Serialize>(format: &OutputFormat, view: View<'_, T>) -> String {
    match format {
        OutputFormat::Table => view.text,
        OutputFormat::Plain => view.plain,
        OutputFormat::Json => {
            serde_json::to_string_pretty(view.data).expect("serialization should not fail")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(view.data).expect("serialization should not fail")
        }
    }
}

/// Rounded-border table from `Tabled` rows.
pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Write rendered output to stdout, respecting quiet mode.
pub fn print(rendered: &str, quiet: bool) {
    if quiet || rendered.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{rendered}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Payload {
        id: &'static str,
    }

    fn view(payload: &Payload) -> View<'_, Payload> {
        View {
            data: payload,
            text: "detail block".into(),
            plain: payload.id.into(),
        }
    }

    #[test]
    fn each_format_picks_its_surface() {
        let payload = Payload { id: "tg-0a1b2c" };
        assert_eq!(render(&OutputFormat::Table, view(&payload)), "detail block");
        assert_eq!(render(&OutputFormat::Plain, view(&payload)), "tg-0a1b2c");
        assert_eq!(
            render(&OutputFormat::JsonCompact, view(&payload)),
            r#"{"id":"tg-0a1b2c"}"#
        );
    }

    #[test]
    fn pretty_json_is_indented() {
        let payload = Payload { id: "tg-0a1b2c" };
        let rendered = render(&OutputFormat::Json, view(&payload));
        assert!(rendered.contains("\n  \"id\""));
    }
}
