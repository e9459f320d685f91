pub mod columns;
pub mod table;
pub mod tooltip;

pub use columns::{Align, Column};
pub use table::{render_text, CellView, PaginationView, RowAction, RowView, TableView};
pub use tooltip::{HoverTooltip, TooltipView};
