use colored::*;

use crate::models::StoryRecord;
use super::utils::cell_text;

fn border(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&fill.to_string().repeat(width + 2));
        line.push('+');
    }
    line
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn push_row(out: &mut Vec<String>, cells: &[Vec<String>], widths: &[usize], bold: bool) {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    for line_no in 0..height {
        let mut line = String::from("|");
        for (cell, width) in cells.iter().zip(widths) {
            let text = pad(cell.get(line_no).map(String::as_str).unwrap_or(""), *width);
            if bold {
                line.push_str(&format!(" {} |", text.bold()));
            } else {
                line.push_str(&format!(" {} |", text));
            }
        }
        out.push(line);
    }
}

/// Bordered grid with one column per key of the first record. List values
/// become multi-line cells.
pub fn render_table(records: &[StoryRecord], colorize: bool) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let headers: Vec<&String> = first.keys().collect();
    let header_cells: Vec<Vec<String>> = headers.iter().map(|h| vec![h.to_string()]).collect();

    let rows: Vec<Vec<Vec<String>>> = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .map(|key| {
                    let text = record.get(key.as_str()).map(cell_text).unwrap_or_default();
                    text.lines().map(str::to_string).collect()
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            let header_width = headers[col].chars().count();
            rows.iter()
                .flat_map(|row| row[col].iter())
                .map(|line| line.chars().count())
                .max()
                .unwrap_or(0)
                .max(header_width)
        })
        .collect();

    let mut out = Vec::new();
    out.push(border(&widths, '-'));
    push_row(&mut out, &header_cells, &widths, colorize);
    out.push(border(&widths, '='));
    for row in &rows {
        push_row(&mut out, row, &widths, false);
        out.push(border(&widths, '-'));
    }

    let mut table = out.join("\n");
    table.push('\n');
    table
}
