// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Rich terminal formatter for diagnostics.
//!
//! Produces multi-line, color-coded error output:
//!
//! ```text
//! error[E0101]: Expected '}' but found 'EOF'
//!   --> main.rt:2:7
//!     |
//!   2 | if x {
//!     |       ^
//!     |
//!     = help: close the block
//! ```

use std::collections::BTreeMap;

use colored::Colorize;

use ritam_ast::LineMap;

use crate::{Diagnostic, Label};

/// Formats diagnostics for terminal output.
pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

impl<'a> DiagnosticFormatter<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            file_name: None,
            line_map: LineMap::new(source),
        }
    }

    pub fn with_file_name(mut self, name: &'a str) -> Self {
        self.file_name = Some(name);
        self
    }

    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();

        // Line 1: error[code]: message
        self.format_header(&mut out, diagnostic);

        // Group labels by source line; labels past the end are dropped.
        let mut by_line: BTreeMap<u32, Vec<&Label>> = BTreeMap::new();
        for label in &diagnostic.labels {
            if self.line_map.line_text(self.source, label.line).is_some() {
                by_line.entry(label.line).or_default().push(label);
            }
        }

        if let Some(first) = diagnostic.primary_label() {
            // Line 2: --> file:line:col
            let file = self.file_name.unwrap_or("<source>");
            out.push_str(&format!("  {} {}:{}:{}\n", "-->".blue(), file, first.line, first.column));
        }

        let max_line = by_line.keys().next_back().copied().unwrap_or(1);
        let gutter_width = max_line.to_string().len().max(2);

        let mut prev_line: Option<u32> = None;
        for (&line, labels) in &by_line {
            match prev_line {
                // Empty pipe line before first source line
                None => out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue())),
                // Gap indicator for non-consecutive lines
                Some(prev) if line > prev + 1 => {
                    out.push_str(&format!("{} {}\n", " ".repeat(gutter_width), "...".blue()))
                }
                Some(_) => {}
            }

            let text = self.line_map.line_text(self.source, line).unwrap_or("");
            out.push_str(&format!(
                "{:>width$} {} {}\n",
                line.to_string().blue().bold(),
                "|".blue(),
                text,
                width = gutter_width + 1,
            ));

            for label in labels {
                self.format_label(&mut out, text, label, gutter_width);
            }

            prev_line = Some(line);
        }

        self.format_footer(&mut out, diagnostic, gutter_width, !by_line.is_empty());

        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let prefix = "error".red().bold();

        if let Some(ref code) = diagnostic.code {
            out.push_str(&format!(
                "{}[{}]: {}\n",
                prefix,
                code.0.clone().red().bold(),
                diagnostic.message.bold()
            ));
        } else {
            out.push_str(&format!("{}: {}\n", prefix, diagnostic.message.bold()));
        }
    }

    fn format_label(&self, out: &mut String, text: &str, label: &Label, gutter_width: usize) {
        let indent = label.column.saturating_sub(1) as usize;
        let width = underline_width(text, indent, label.len);
        out.push_str(&format!(
            "{} {} {}{}",
            " ".repeat(gutter_width + 1),
            "|".blue(),
            " ".repeat(indent),
            "^".repeat(width).red().bold(),
        ));
        if let Some(ref message) = label.message {
            out.push(' ');
            out.push_str(&message.red().bold().to_string());
        }
        out.push('\n');
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter_width: usize, had_source: bool) {
        if had_source && diagnostic.help.is_some() {
            out.push_str(&format!("{} {}\n", " ".repeat(gutter_width + 1), "|".blue()));
        }

        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter_width + 1),
                "=".cyan(),
                "help".cyan().bold(),
                help
            ));
        }
    }
}

/// Number of characters covered by `len` bytes starting at char `indent`.
/// Always at least one.
fn underline_width(text: &str, indent: usize, len: usize) -> usize {
    let mut bytes = 0;
    let mut chars = 0;
    for ch in text.chars().skip(indent) {
        if bytes >= len {
            break;
        }
        bytes += ch.len_utf8();
        chars += 1;
    }
    chars.max(1)
}
