//! Headless table state for list pages.

pub mod columns;
pub mod controller;
pub mod operate;
pub mod pagination;

pub use columns::{Align, ColumnCheck, ColumnState, TableColumn};
pub use controller::{EndpointTable, IndexedRow, TableApi, TableController, TableStatus};
pub use operate::{OperateType, RowKey, TableOperate};
pub use pagination::{Pagination, RowSelection, ScrollConfig, Viewport};
