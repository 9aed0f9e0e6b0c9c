//! Pagination and layout config handed to the view layer.

use serde::Serialize;

/// Checkbox column width of the selection config.
pub const SELECTION_COLUMN_WIDTH: u32 = 48;
/// Default horizontal scroll width of list tables.
pub const DEFAULT_SCROLL_X: u32 = 702;
/// Space reserved under the table body for the pagination bar.
const PAGINATION_BAR_HEIGHT: u32 = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    #[default]
    Desktop,
    Mobile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current: i64,
    pub page_size: i64,
    pub total: i64,
    pub show_size_changer: bool,
    pub page_size_options: Vec<String>,
    pub simple: bool,
}

impl Pagination {
    pub fn new(current: i64, page_size: i64, total: i64, options: &[i64], viewport: Viewport) -> Self {
        Self {
            current,
            page_size,
            total,
            show_size_changer: true,
            page_size_options: options.iter().map(|o| o.to_string()).collect(),
            simple: viewport == Viewport::Mobile,
        }
    }

    /// Number of pages, at least one.
    pub fn page_count(&self) -> i64 {
        if self.page_size <= 0 || self.total <= 0 {
            return 1;
        }
        (self.total + self.page_size - 1) / self.page_size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSelection<K> {
    pub column_width: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub selected_row_keys: Vec<K>,
}

impl<K> RowSelection<K> {
    pub fn checkbox(selected_row_keys: Vec<K>) -> Self {
        Self {
            column_width: SELECTION_COLUMN_WIDTH,
            kind: "checkbox",
            selected_row_keys,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollConfig {
    pub x: u32,
    pub y: u32,
}

impl ScrollConfig {
    /// Fit the table body into a wrapper of `wrapper_height` pixels.
    pub fn fit(wrapper_height: u32, scroll_x: u32) -> Self {
        Self {
            x: scroll_x,
            y: wrapper_height.saturating_sub(PAGINATION_BAR_HEIGHT),
        }
    }
}
