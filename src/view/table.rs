//! Plain-text table rendering of a derived list view.

use std::fmt::Write as _;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::model::Row;
use crate::state::{ListView, PaginationState};

/// Cells wider than this are truncated with an ellipsis.
pub const MAX_CELL_WIDTH: usize = 32;

/// Gap between columns.
const COLUMN_GAP: &str = "  ";

/// Render the visible page of `view` as an aligned text table.
///
/// Each row starts with a two-character marker column: `*` for selected,
/// `+` for expanded. `pagination` is passed separately because a
/// server-paginated view displays the server's counts, not the local ones.
pub fn render_table<T: Row>(
    view: &ListView<'_, T>,
    columns: &[String],
    pagination: &PaginationState,
) -> String {
    let mut out = String::new();

    if view.paginated.is_empty() {
        out.push_str("No rows\n");
        return out;
    }

    let cells: Vec<Vec<String>> = view
        .paginated
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| truncate(&row.field_text(c).unwrap_or_default(), MAX_CELL_WIDTH))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|r| r[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    push_line(&mut out, "  ", columns.iter().map(String::as_str), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, "  ", rule.iter().map(String::as_str), &widths);

    for (pos, row) in cells.iter().enumerate() {
        let marker = marker(view.is_selected(pos), view.is_expanded(pos));
        push_line(&mut out, marker, row.iter().map(String::as_str), &widths);
    }

    out.push('\n');
    out.push_str(&footer(pagination));
    out.push('\n');
    out
}

/// "Showing X–Y of Z (page P of N)".
pub fn footer(pagination: &PaginationState) -> String {
    if pagination.total_rows == 0 {
        return "No rows".to_string();
    }
    format!(
        "Showing {}–{} of {} (page {} of {})",
        pagination.start_item,
        pagination.end_item,
        pagination.total_rows,
        pagination.page,
        pagination.total_pages
    )
}

fn marker(selected: bool, expanded: bool) -> &'static str {
    match (selected, expanded) {
        (true, true) => "*+",
        (true, false) => "* ",
        (false, true) => " +",
        (false, false) => "  ",
    }
}

fn push_line<'a>(
    out: &mut String,
    marker: &str,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) {
    let mut line = String::from(marker);
    for (i, (cell, width)) in cells.zip(widths).enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        line.push_str(cell);
        let pad = width.saturating_sub(cell.width());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

/// Cut `text` to `max` display columns, ending in `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    let text = text.replace(['\n', '\r', '\t'], " ");
    if text.width() <= max {
        return text;
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
