//! Add/edit drawer and row selection state of a list page.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ClientResult;
use crate::models::coupon::{CouponLink, CouponLinkCategory};
use crate::models::system::{Menu, Role, User};
use crate::models::wechat::{WechatEnterprise, WechatFan};
use crate::session::SessionContext;
use crate::table::controller::{TableApi, TableController};
use crate::table::pagination::RowSelection;

pub const DELETE_SUCCESS_MESSAGE: &str = "Delete succeeded";

/// Rows addressable by a numeric id.
pub trait RowKey {
    fn row_key(&self) -> Option<i64>;
}

macro_rules! row_key_field {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(impl RowKey for $ty {
            fn row_key(&self) -> Option<i64> {
                Some(self.$field)
            }
        })*
    };
}

row_key_field! {
    User => id,
    Role => id,
    Menu => id,
    CouponLink => id,
    CouponLinkCategory => id,
    WechatEnterprise => id,
    WechatFan => company_fans_id,
}

impl RowKey for Map<String, Value> {
    fn row_key(&self) -> Option<i64> {
        self.get("id").and_then(Value::as_i64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperateType {
    #[default]
    Add,
    Edit,
}

pub struct TableOperate<R> {
    session: Arc<SessionContext>,
    operate_type: OperateType,
    drawer_visible: bool,
    editing: Option<R>,
    checked_keys: Vec<i64>,
}

impl<R: RowKey + Clone> TableOperate<R> {
    pub fn new(session: Arc<SessionContext>) -> Self {
        Self {
            session,
            operate_type: OperateType::Add,
            drawer_visible: false,
            editing: None,
            checked_keys: Vec::new(),
        }
    }

    pub fn handle_add(&mut self) {
        self.operate_type = OperateType::Add;
        self.drawer_visible = true;
    }

    /// Open the drawer on a copy of the row with `id`, if it is on the page.
    pub fn handle_edit<A>(&mut self, table: &TableController<A>, id: i64)
    where
        A: TableApi<Row = R>,
    {
        self.operate_type = OperateType::Edit;
        self.editing = table
            .rows()
            .iter()
            .find(|row| row.record.row_key() == Some(id))
            .map(|row| row.record.clone());
        self.drawer_visible = true;
    }

    pub fn open_drawer(&mut self) {
        self.drawer_visible = true;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_visible = false;
    }

    pub fn on_select_change(&mut self, keys: Vec<i64>) {
        self.checked_keys = keys;
    }

    /// After a single delete: confirm and refetch the page.
    pub async fn on_deleted<A>(&mut self, table: &mut TableController<A>) -> ClientResult<()>
    where
        A: TableApi<Row = R>,
    {
        self.session.notify_success(DELETE_SUCCESS_MESSAGE);
        table.fetch().await
    }

    /// After a batch delete: confirm, clear the selection and refetch.
    pub async fn on_batch_deleted<A>(&mut self, table: &mut TableController<A>) -> ClientResult<()>
    where
        A: TableApi<Row = R>,
    {
        self.session.notify_success(DELETE_SUCCESS_MESSAGE);
        self.checked_keys.clear();
        table.fetch().await
    }

    pub fn operate_type(&self) -> OperateType {
        self.operate_type
    }

    pub fn drawer_visible(&self) -> bool {
        self.drawer_visible
    }

    pub fn editing(&self) -> Option<&R> {
        self.editing.as_ref()
    }

    pub fn checked_keys(&self) -> &[i64] {
        &self.checked_keys
    }

    pub fn row_selection(&self) -> RowSelection<i64> {
        RowSelection::checkbox(self.checked_keys.clone())
    }
}
