//! Human and JSON output for the CLI.
//!
//! In JSON mode only `json` payloads and errors are printed; everything
//! else is for people at a terminal.

use console::{style, StyledObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Info,
    Success,
    Warn,
    Error,
    Debug,
}

impl Tone {
    fn glyph(self) -> StyledObject<&'static str> {
        match self {
            Tone::Info => style("ℹ").blue(),
            Tone::Success => style("✓").green(),
            Tone::Warn => style("⚠").yellow(),
            Tone::Error => style("✗").red(),
            Tone::Debug => style("→").dim(),
        }
    }

    fn body<'a>(self, msg: &'a str) -> StyledObject<&'a str> {
        match self {
            Tone::Error => style(msg).red(),
            Tone::Debug => style(msg).dim(),
            _ => style(msg),
        }
    }

    /// Diagnostics go to stderr.
    fn to_stderr(self) -> bool {
        matches!(self, Tone::Warn | Tone::Error | Tone::Debug)
    }
}

/// Where command results and messages are written.
#[derive(Debug, Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn info(&self, msg: &str) {
        self.emit(Tone::Info, msg);
    }

    pub fn success(&self, msg: &str) {
        self.emit(Tone::Success, msg);
    }

    pub fn warn(&self, msg: &str) {
        self.emit(Tone::Warn, msg);
    }

    /// Errors are printed in both modes; as `{"error": ...}` in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            self.emit(Tone::Error, msg);
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose {
            self.emit(Tone::Debug, msg);
        }
    }

    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// A titled table with aligned columns.
    pub fn table<const N: usize>(&self, title: &str, headers: [&str; N], rows: &[[&str; N]]) {
        if self.json {
            return;
        }
        self.header(title);
        for line in layout_table(headers, rows) {
            println!("  {}", line);
        }
    }

    /// Pretty-printed JSON on stdout, regardless of mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!(error = %e, "failed to serialize output"),
        }
    }

    fn emit(&self, tone: Tone, msg: &str) {
        if self.json {
            return;
        }
        let line = format!("{} {}", tone.glyph(), tone.body(msg));
        if tone.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Header line followed by one line per row, each column padded to its
/// widest cell.
fn layout_table<const N: usize>(headers: [&str; N], rows: &[[&str; N]]) -> Vec<String> {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    std::iter::once(&headers)
        .chain(rows)
        .map(|cells| {
            let padded: Vec<String> = cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:width$}", cell))
                .collect();
            padded.join("  ").trim_end().to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_table_aligns_columns() {
        let lines = layout_table(
            ["Product", "Price"],
            &[["Widget", "$9.99"], ["Extra long name", "$100.00"]],
        );
        assert_eq!(
            lines,
            vec![
                "Product          Price",
                "Widget           $9.99",
                "Extra long name  $100.00",
            ]
        );
    }

    #[test]
    fn test_layout_table_counts_chars_not_bytes() {
        let lines = layout_table(["A", "B"], &[["€5", "x"]]);
        assert_eq!(lines, vec!["A   B", "€5  x"]);
    }

    #[test]
    fn test_diagnostics_go_to_stderr() {
        assert!(!Tone::Info.to_stderr());
        assert!(!Tone::Success.to_stderr());
        assert!(Tone::Warn.to_stderr());
        assert!(Tone::Error.to_stderr());
        assert!(Tone::Debug.to_stderr());
    }
}
