// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Left-aligned table renderer shared by `cronfleet list` and
//! `cronfleet sources`.

use std::io::{self, Write};

use crate::color;

/// How a cell's text is styled after padding.
#[derive(Clone, Copy)]
pub enum CellStyle {
    Plain,
    /// [`color::apply_muted()`]
    Muted,
    /// [`color::apply_status()`]
    Status,
}

/// A column definition in a [`Table`].
pub struct Column {
    pub name: &'static str,
    pub style: CellStyle,
    /// Longer cells are cut to this many characters
    pub max_width: Option<usize>,
}

impl Column {
    fn styled(name: &'static str, style: CellStyle) -> Self {
        Self {
            name,
            style,
            max_width: None,
        }
    }

    pub fn left(name: &'static str) -> Self {
        Self::styled(name, CellStyle::Plain)
    }

    pub fn muted(name: &'static str) -> Self {
        Self::styled(name, CellStyle::Muted)
    }

    pub fn status(name: &'static str) -> Self {
        Self::styled(name, CellStyle::Status)
    }

    pub fn with_max(mut self, max: usize) -> Self {
        self.max_width = Some(max);
        self
    }
}

/// Rows are truncated on insert; widths are computed at render time.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    colorize: bool,
}

const SEP: &str = "  ";

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            colorize: false,
        }
    }

    /// Paint headers and styled columns. Off by default.
    pub fn with_color(mut self, on: bool) -> Self {
        self.colorize = on;
        self
    }

    pub fn row(&mut self, cells: Vec<String>) {
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| truncate(cells.get(i).map_or("", String::as_str), col.max_width))
            .collect();
        self.rows.push(cells);
    }

    /// Write the header and every row. Nothing is written for an empty table.
    ///
    /// The last column is never padded, and color is applied after padding
    /// so escape codes don't count towards widths.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        if self.rows.is_empty() {
            return Ok(());
        }
        let widths = self.widths();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, &width)| {
                let text = pad(col.name, width);
                if self.colorize {
                    color::apply_header(&text)
                } else {
                    text
                }
            })
            .collect();
        writeln!(out, "{}", header.join(SEP))?;

        for row in &self.rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(row)
                .zip(&widths)
                .map(|((col, cell), &width)| self.paint(&pad(cell, width), col.style))
                .collect();
            writeln!(out, "{}", cells.join(SEP))?;
        }
        Ok(())
    }

    /// Character width per column; the last column gets 0 (unpadded).
    fn widths(&self) -> Vec<usize> {
        let last = self.columns.len().saturating_sub(1);
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                if i == last {
                    return 0;
                }
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .fold(col.name.chars().count(), usize::max)
            })
            .collect()
    }

    fn paint(&self, text: &str, style: CellStyle) -> String {
        match style {
            _ if !self.colorize => text.to_string(),
            CellStyle::Plain => text.to_string(),
            CellStyle::Muted => color::apply_muted(text),
            CellStyle::Status => color::apply_status(text),
        }
    }
}

/// Pad `text` with spaces to `width` characters.
fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

/// Cut to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: Option<usize>) -> String {
    match max {
        Some(m) if m > 0 && text.chars().count() > m => {
            let mut cut: String = text.chars().take(m - 1).collect();
            cut.push('…');
            cut
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
