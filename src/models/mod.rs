//! Typed request and response bodies for the backend endpoints.

pub mod auth;
pub mod common;
pub mod coupon;
pub mod order;
pub mod system;
pub mod wechat;

pub use common::{IdParam, PageInfo, PageRecord, RecordMeta, RoleIdParam, SearchParams};
