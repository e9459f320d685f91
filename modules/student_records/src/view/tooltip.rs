//! Pointer-tracked "double click to edit" hint. Pure view state: the table
//! controller knows nothing about it, and headless front ends skip it.

use crate::domain::edit::EditState;

pub const TOOLTIP_TEXT: &str = "Double click to edit";

/// Distance between the pointer and the tooltip's top-left corner.
pub const POINTER_OFFSET: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipView {
    pub x: i32,
    pub y: i32,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HoverTooltip {
    pointer: Option<(i32, i32)>,
}

impl HoverTooltip {
    /// The pointer moved over a row.
    pub fn pointer_over(&mut self, x: i32, y: i32) {
        self.pointer = Some((x, y));
    }

    /// The pointer left the row.
    pub fn pointer_out(&mut self) {
        self.pointer = None;
    }

    /// Hint to draw, if any. Hidden while a row is being edited.
    pub fn visible(&self, edit: &EditState) -> Option<TooltipView> {
        if edit.editing_id().is_some() {
            return None;
        }
        self.pointer.map(|(x, y)| TooltipView {
            x: x.saturating_add(POINTER_OFFSET),
            y: y.saturating_add(POINTER_OFFSET),
            text: TOOLTIP_TEXT,
        })
    }
}
