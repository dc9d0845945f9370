// src/system/aligner.rs

use unicode_width::UnicodeWidthStr;

use crate::models::Alignment;

/// Lays out tab-separated cells in aligned columns.
///
/// Every tab-terminated cell belongs to a column whose width is the widest
/// cell in it plus one space of padding. The last cell of each line is not
/// part of a column and is printed as is. Widths are measured in terminal
/// columns, so wide characters line up too.
#[derive(Debug)]
pub struct ColumnAligner {
    alignment: Alignment,
    padding: usize,
    lines: Vec<Vec<String>>,
}

impl ColumnAligner {
    /// An empty aligner with one space between columns.
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            padding: 1,
            lines: Vec::new(),
        }
    }

    /// Buffers one line. Tabs separate its cells.
    pub fn push_line(&mut self, line: &str) {
        self.lines.push(line.split('\t').map(str::to_string).collect());
    }

    /// Returns the buffered lines laid out, one `\n` after each, and empties
    /// the buffer.
    pub fn flush(&mut self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();
        for cells in self.lines.drain(..) {
            let last = cells.len().saturating_sub(1);
            for (column, cell) in cells.into_iter().enumerate() {
                if column == last {
                    out.push_str(&cell);
                    break;
                }
                let width = widths.get(column).copied().unwrap_or_default();
                let fill = " ".repeat(width.saturating_sub(cell.width()));
                match self.alignment {
                    Alignment::Left => {
                        out.push_str(&cell);
                        out.push_str(&fill);
                    }
                    Alignment::Right => {
                        out.push_str(&fill);
                        out.push_str(&cell);
                    }
                }
            }
            out.push('\n');
        }
        out
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for cells in &self.lines {
            let terminated = cells.len().saturating_sub(1);
            for (column, cell) in cells.iter().take(terminated).enumerate() {
                let width = cell.width() + self.padding;
                match widths.get_mut(column) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }
}
