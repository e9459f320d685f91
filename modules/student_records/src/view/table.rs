use std::fmt::Write as _;

use crate::contract::model::StudentId;
use crate::domain::edit::{EditState, Field};
use crate::domain::page::PageSize;
use crate::domain::table::RecordTable;
use crate::view::columns::{Align, Column};
use crate::view::tooltip::TooltipView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Text(String),
    /// Editable input bound to the draft.
    Input { field: Field, value: String },
}

impl CellView {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(t) => t,
            Self::Input { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Delete,
    Save,
}

impl RowAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delete => "Delete",
            Self::Save => "Save",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: Option<StudentId>,
    pub editing: bool,
    /// One cell per data column (everything but `Column::Options`).
    pub cells: Vec<CellView>,
    pub action: RowAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page: usize,
    pub page_count: usize,
    pub page_size: PageSize,
    pub count: usize,
    pub options: [PageSize; 4],
    /// 1-based first and last row shown; both 0 when the table is empty.
    pub from: usize,
    pub to: usize,
}

impl PaginationView {
    pub fn range_label(&self) -> String {
        format!("{}–{} of {}", self.from, self.to, self.count)
    }
}

/// Everything a front end needs to draw the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub columns: [Column; 7],
    pub rows: Vec<RowView>,
    pub pagination: PaginationView,
}

impl TableView {
    pub fn build(table: &RecordTable) -> Self {
        let edit = table.edit_state();
        let rows = table
            .visible_rows()
            .iter()
            .map(|student| {
                let draft = match (edit, student.id) {
                    (EditState::Editing { id, draft }, Some(row_id)) if *id == row_id => {
                        Some(draft)
                    }
                    _ => None,
                };
                let cells = Column::ALL
                    .into_iter()
                    .filter(|c| *c != Column::Options)
                    .map(|c| match (draft, c.field()) {
                        (Some(draft), Some(field)) => CellView::Input {
                            field,
                            value: draft.get(field).to_string(),
                        },
                        _ => CellView::Text(c.value(student)),
                    })
                    .collect();

                RowView {
                    id: student.id,
                    editing: draft.is_some(),
                    cells,
                    action: if draft.is_some() {
                        RowAction::Save
                    } else {
                        RowAction::Delete
                    },
                }
            })
            .collect();

        let window = table.window();
        let count = table.len();
        let range = window.range(count);
        let pagination = PaginationView {
            page: window.page(),
            page_count: window.page_count(count),
            page_size: window.size(),
            count,
            options: PageSize::ALL,
            from: if range.is_empty() { 0 } else { range.start + 1 },
            to: range.end,
        };

        Self {
            columns: Column::ALL,
            rows,
            pagination,
        }
    }
}

fn pad(out: &mut String, text: &str, width: usize, align: Align) {
    let fill = " ".repeat(width.saturating_sub(text.chars().count()));
    match align {
        Align::Left => {
            out.push_str(text);
            out.push_str(&fill);
        }
        Align::Right => {
            out.push_str(&fill);
            out.push_str(text);
        }
    }
}

fn write_line<'a>(
    out: &mut String,
    cells: impl Iterator<Item = &'a str>,
    columns: &[Column],
    widths: &[usize],
) {
    for (i, ((text, col), width)) in cells.zip(columns).zip(widths).enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        pad(out, text, *width, col.align());
    }
    out.push('\n');
}

/// Draw the view as a fixed-width text table. Input cells are bracketed.
pub fn render_text(view: &TableView, tooltip: Option<&TooltipView>) -> String {
    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|row| {
            let mut cells: Vec<String> = row
                .cells
                .iter()
                .map(|c| match c {
                    CellView::Text(t) => t.clone(),
                    CellView::Input { value, .. } => format!("[{value}]"),
                })
                .collect();
            cells.push(row.action.label().to_string());
            cells
        })
        .collect();

    let widths: Vec<usize> = view
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            body.iter()
                .map(|cells| cells[i].chars().count())
                .chain(std::iter::once(col.label().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    write_line(
        &mut out,
        view.columns.iter().map(|c| c.label()),
        &view.columns,
        &widths,
    );
    let rule = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule));
    out.push('\n');
    for cells in &body {
        write_line(
            &mut out,
            cells.iter().map(String::as_str),
            &view.columns,
            &widths,
        );
    }

    let p = &view.pagination;
    let sizes = p
        .options
        .iter()
        .map(|s| {
            if *s == p.page_size {
                format!("[{s}]")
            } else {
                s.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(
        out,
        "Rows per page: {sizes}   {}   page {}/{}",
        p.range_label(),
        p.page + 1,
        p.page_count
    );

    if let Some(tip) = tooltip {
        let _ = writeln!(out, "({}, {}) {}", tip.x, tip.y, tip.text);
    }
    out
}
