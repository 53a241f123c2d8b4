// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Terminal formatter for diagnostics.
//!
//! ```text
//! error[E0310]: invalid function args: index 5 is out of range for 2 parameter(s)
//!   --> add.py:3:9
//!    |
//!  3 |     y = args[5]
//!    |         ^^^^^^^ argument 5 does not exist
//!    |
//!    = note: operation %1 was left in place
//! ```

use std::collections::BTreeMap;

use colored::Colorize;
use plier_ir::LineMap;

use crate::{Diagnostic, LabelStyle, Severity};

pub struct DiagnosticFormatter<'a> {
    source: &'a str,
    file_name: Option<&'a str>,
    line_map: LineMap,
}

/// Labels grouped under one source line.
struct AnnotatedLine<'d> {
    line: u32,
    text: String,
    marks: Vec<Mark<'d>>,
}

struct Mark<'d> {
    col_start: usize,
    col_end: usize,
    style: LabelStyle,
    message: Option<&'d str>,
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
        self.format_header(&mut out, diagnostic);

        let lines = self.collect_lines(diagnostic);
        let gutter = lines
            .last()
            .map(|l| l.line.to_string().len())
            .unwrap_or(1)
            .max(2);

        if let Some(span) = diagnostic.primary_span() {
            let (line, col) = self.line_map.offset_to_line_col(span.start);
            out.push_str(&format!(
                "{}{} {}:{}:{}\n",
                " ".repeat(gutter),
                "-->".blue(),
                self.file_name.unwrap_or("<source>"),
                line,
                col
            ));
            out.push_str(&format!("{} {}\n", " ".repeat(gutter + 1), "|".blue()));
        }

        for line in &lines {
            out.push_str(&format!(
                "{:>width$} {} {}\n",
                line.line.to_string().blue().bold(),
                "|".blue(),
                line.text,
                width = gutter + 1,
            ));
            for mark in &line.marks {
                let ch = match mark.style {
                    LabelStyle::Primary => "^",
                    LabelStyle::Secondary => "-",
                };
                let underline = ch.repeat(mark.col_end.saturating_sub(mark.col_start).max(1));
                let (underline, message) = match mark.style {
                    LabelStyle::Primary => (
                        underline.red().bold().to_string(),
                        mark.message.unwrap_or("").red().bold().to_string(),
                    ),
                    LabelStyle::Secondary => (
                        underline.blue().to_string(),
                        mark.message.unwrap_or("").blue().to_string(),
                    ),
                };
                out.push_str(&format!(
                    "{} {} {}{} {}\n",
                    " ".repeat(gutter + 1),
                    "|".blue(),
                    " ".repeat(mark.col_start.saturating_sub(1)),
                    underline,
                    message
                ));
            }
        }

        self.format_footer(&mut out, diagnostic, gutter);
        out
    }

    fn format_header(&self, out: &mut String, diagnostic: &Diagnostic) {
        let severity = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        match diagnostic.code {
            Some(ref code) => out.push_str(&format!(
                "{}[{}]: {}\n",
                severity,
                code.0.as_str().red().bold(),
                diagnostic.message.bold()
            )),
            None => out.push_str(&format!("{}: {}\n", severity, diagnostic.message.bold())),
        }
    }

    fn format_footer(&self, out: &mut String, diagnostic: &Diagnostic, gutter: usize) {
        if diagnostic.notes.is_empty() && diagnostic.help.is_none() {
            return;
        }
        if !diagnostic.labels.is_empty() {
            out.push_str(&format!("{} {}\n", " ".repeat(gutter + 1), "|".blue()));
        }
        for note in &diagnostic.notes {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter + 1),
                "=".cyan(),
                "note".cyan().bold(),
                note
            ));
        }
        if let Some(ref help) = diagnostic.help {
            out.push_str(&format!(
                "{} {} {}: {}\n",
                " ".repeat(gutter + 1),
                "=".cyan(),
                "help".cyan().bold(),
                help
            ));
        }
    }

    fn collect_lines<'d>(&self, diagnostic: &'d Diagnostic) -> Vec<AnnotatedLine<'d>> {
        let mut by_line: BTreeMap<u32, AnnotatedLine<'d>> = BTreeMap::new();

        for label in &diagnostic.labels {
            let (line, col_start) = self.line_map.offset_to_line_col(label.span.start);
            let (end_line, col_end) = self.line_map.offset_to_line_col(label.span.end);
            let text = self.line_map.line_text(self.source, line).unwrap_or("");
            // Multi-line spans are underlined to the end of their first line.
            let col_end = if end_line == line { col_end as usize } else { text.len() + 1 };

            by_line
                .entry(line)
                .or_insert_with(|| AnnotatedLine {
                    line,
                    text: text.to_string(),
                    marks: Vec::new(),
                })
                .marks
                .push(Mark {
                    col_start: col_start as usize,
                    col_end,
                    style: label.style,
                    message: label.message.as_deref(),
                });
        }

        for line in by_line.values_mut() {
            line.marks.sort_by_key(|m| (m.style == LabelStyle::Secondary, m.col_start));
        }
        by_line.into_values().collect()
    }
}
