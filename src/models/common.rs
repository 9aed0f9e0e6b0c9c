//! Shapes shared by every paginated endpoint.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_current() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

/// `page` block of a list payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default = "default_current")]
    pub current: i64,
    #[serde(default = "default_page_size")]
    pub request_page_size: i64,
    #[serde(default)]
    pub total: i64,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            current: default_current(),
            request_page_size: default_page_size(),
            total: 0,
        }
    }
}

/// `{ list, page }` payload of list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord<T> {
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    #[serde(default)]
    pub page: PageInfo,
}

impl<T> Default for PageRecord<T> {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            page: PageInfo::default(),
        }
    }
}

/// Paging fields every search request carries, plus free-form filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

impl SearchParams {
    pub fn page(current: i64, page_size: i64) -> Self {
        Self {
            current: Some(current),
            page_size: Some(page_size),
            filters: Map::new(),
        }
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// Audit columns most records carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

/// `{ id }` body of delete endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdParam {
    pub id: i64,
}

/// `{ role_id }` body of the per-role menu endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleIdParam {
    pub role_id: i64,
}
