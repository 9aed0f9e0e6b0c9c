//! Paginated table controller.
//!
//! # Responsibilities
//! - Own the query parameters sent to the list endpoint
//! - Fetch a page and index its rows from 1
//! - Track pagination (current, page size, total)
//! - Keep column checks in sync with the active locale
//!
//! ```text
//! set_page / on_page_change / update_search_params
//!     → params → TableApi::fetch → PageRecord<Row>
//!     → rows (IndexedRow) + pagination
//! ```
//!
//! Status moves `Idle → Loading → Idle`. A failed fetch keeps the rows from
//! the previous page; the client has already notified the user.

use std::future::Future;
use std::marker::PhantomData;
use std::ops::Deref;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::config::TableConfig;
use crate::error::ClientResult;
use crate::models::PageRecord;
use crate::service::{FlatClient, RequestDescriptor};
use crate::table::columns::{ColumnCheck, ColumnState, TableColumn};
use crate::table::pagination::{Pagination, Viewport};

pub const CURRENT_PARAM: &str = "current";
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// List endpoint behind a table.
pub trait TableApi: Send + Sync {
    type Row: Send;

    fn fetch(&self, params: Map<String, Value>) -> impl Future<Output = ClientResult<PageRecord<Self::Row>>> + Send;
}

/// `POST path` with the params as JSON body.
pub struct EndpointTable<T> {
    client: FlatClient,
    path: String,
    _row: PhantomData<fn() -> T>,
}

impl<T> EndpointTable<T> {
    pub fn new(client: FlatClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _row: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl<T: DeserializeOwned + Send> TableApi for EndpointTable<T> {
    type Row = T;

    fn fetch(&self, params: Map<String, Value>) -> impl Future<Output = ClientResult<PageRecord<T>>> + Send {
        let client = self.client.clone();
        let desc = RequestDescriptor::post(self.path.clone()).json_value(Value::Object(params));
        async move { client.request(desc).await }
    }
}

/// A row plus its 1-based position on the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedRow<T> {
    #[serde(flatten)]
    pub record: T,
    pub index: usize,
}

impl<T> Deref for IndexedRow<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStatus {
    #[default]
    Idle,
    Loading,
}

type ColumnFactory = Box<dyn Fn(&str) -> Vec<TableColumn> + Send + Sync>;

pub struct TableController<A: TableApi> {
    api: A,
    initial_params: Map<String, Value>,
    params: Map<String, Value>,
    rows: Vec<IndexedRow<A::Row>>,
    status: TableStatus,
    current: i64,
    page_size: i64,
    total: i64,
    default_page_size: i64,
    page_size_options: Vec<i64>,
    columns: ColumnState,
    column_factory: ColumnFactory,
    locale: watch::Receiver<String>,
}

impl<A: TableApi> TableController<A> {
    /// `initial_params` gets `current = 1` and the default page size unless it
    /// already sets them. `columns` builds the declarations for a locale.
    pub fn new<F>(
        api: A,
        config: &TableConfig,
        mut initial_params: Map<String, Value>,
        columns: F,
        mut locale: watch::Receiver<String>,
    ) -> Self
    where
        F: Fn(&str) -> Vec<TableColumn> + Send + Sync + 'static,
    {
        initial_params
            .entry(CURRENT_PARAM)
            .or_insert(Value::from(1));
        initial_params
            .entry(PAGE_SIZE_PARAM)
            .or_insert(Value::from(config.default_page_size));

        let current = initial_params
            .get(CURRENT_PARAM)
            .and_then(Value::as_i64)
            .unwrap_or(1);
        let page_size = initial_params
            .get(PAGE_SIZE_PARAM)
            .and_then(Value::as_i64)
            .filter(|s| *s > 0)
            .unwrap_or(config.default_page_size);

        let declared = {
            let active = locale.borrow_and_update();
            columns(active.as_str())
        };

        Self {
            api,
            params: initial_params.clone(),
            initial_params,
            rows: Vec::new(),
            status: TableStatus::Idle,
            current,
            page_size,
            total: 0,
            default_page_size: config.default_page_size,
            page_size_options: config.page_size_options.clone(),
            columns: ColumnState::new(declared),
            column_factory: Box::new(columns),
            locale,
        }
    }

    /// Fetch with the current params.
    pub async fn fetch(&mut self) -> ClientResult<()> {
        self.status = TableStatus::Loading;
        let params = self.params.clone();
        tracing::debug!(
            current = ?params.get(CURRENT_PARAM),
            page_size = ?params.get(PAGE_SIZE_PARAM),
            filters = params.len(),
            "Fetching table page"
        );

        let result = self.api.fetch(params).await;
        self.status = TableStatus::Idle;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(error = %e, "Table fetch failed, keeping previous rows");
                return Err(e);
            }
        };

        self.rows = record
            .list
            .into_iter()
            .enumerate()
            .map(|(i, record)| IndexedRow { record, index: i + 1 })
            .collect();
        self.current = if record.page.current >= 1 {
            record.page.current
        } else {
            tracing::warn!(current = record.page.current, "Invalid current page in response, using 1");
            1
        };
        self.page_size = if record.page.request_page_size > 0 {
            record.page.request_page_size
        } else {
            tracing::warn!(
                page_size = record.page.request_page_size,
                default = self.default_page_size,
                "Invalid page size in response, using default"
            );
            self.default_page_size
        };
        self.total = record.page.total;

        tracing::debug!(
            rows = self.rows.len(),
            current = self.current,
            total = self.total,
            "Table page loaded"
        );
        Ok(())
    }

    /// Jump to `page` (1 when `None`) keeping the page size.
    pub async fn set_page(&mut self, page: Option<i64>) -> ClientResult<()> {
        let page = page.unwrap_or(1).max(1);
        self.current = page;
        self.params.insert(CURRENT_PARAM.into(), Value::from(page));
        self.params
            .insert(PAGE_SIZE_PARAM.into(), Value::from(self.page_size));
        self.fetch().await
    }

    /// Pagination widget callback.
    /// A non-positive page size falls back to the configured default.
    pub async fn on_page_change(&mut self, current: i64, page_size: i64) -> ClientResult<()> {
        let current = current.max(1);
        let page_size = if page_size > 0 {
            page_size
        } else {
            tracing::warn!(page_size, default = self.default_page_size, "Invalid page size, using default");
            self.default_page_size
        };
        self.current = current;
        self.page_size = page_size;
        self.params.insert(CURRENT_PARAM.into(), Value::from(current));
        self.params.insert(PAGE_SIZE_PARAM.into(), Value::from(page_size));
        self.fetch().await
    }

    /// Merge `patch` into the params. No fetch.
    pub fn update_search_params(&mut self, patch: Map<String, Value>) {
        for (key, value) in patch {
            self.params.insert(key, value);
        }
    }

    /// Restore the initial params. No fetch.
    pub fn reset_search_params(&mut self) {
        self.params = self.initial_params.clone();
    }

    pub fn search_params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Rebuild column titles for the active locale.
    pub fn reload_columns(&mut self) {
        let declared = {
            let active = self.locale.borrow();
            (self.column_factory)(active.as_str())
        };
        self.columns.reload(declared);
    }

    /// Reload columns if the locale changed since the last sync.
    pub fn sync_locale(&mut self) -> bool {
        if !self.locale.has_changed().unwrap_or(false) {
            return false;
        }
        let locale = self.locale.borrow_and_update().clone();
        tracing::debug!(locale = %locale, "Locale changed, reloading columns");
        self.reload_columns();
        true
    }

    pub fn toggle_column(&mut self, key: &str) -> Option<bool> {
        self.columns.toggle(key)
    }

    pub fn set_column_checked(&mut self, key: &str, checked: bool) -> bool {
        self.columns.set_checked(key, checked)
    }

    pub fn column_checks(&self) -> &[ColumnCheck] {
        self.columns.checks()
    }

    /// Visible columns in order.
    pub fn columns(&self) -> Vec<&TableColumn> {
        self.columns.visible()
    }

    pub fn rows(&self) -> &[IndexedRow<A::Row>] {
        &self.rows
    }

    pub fn pagination(&self, viewport: Viewport) -> Pagination {
        Pagination::new(
            self.current,
            self.page_size,
            self.total,
            &self.page_size_options,
            viewport,
        )
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == TableStatus::Loading
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
