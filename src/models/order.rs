//! CPS orders. Order rows are passed through as JSON objects.

use serde_json::{Map, Value};

use crate::models::common::PageRecord;

pub type CpsOrder = Map<String, Value>;

pub type CpsOrderList = PageRecord<CpsOrder>;
