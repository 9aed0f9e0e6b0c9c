//! System manage endpoints: users, roles, menus.

use serde_json::Value;

use crate::api::post;
use crate::error::ClientResult;
use crate::models::system::{EditMenuRequest, EditRole, EditUser, MenuList, MenuTree, RoleList, UserList};
use crate::models::{IdParam, RoleIdParam, SearchParams};
use crate::service::{FlatClient, RequestDescriptor};

pub async fn fetch_user_list(client: &FlatClient, params: &SearchParams) -> ClientResult<UserList> {
    post(client, "/manage/user/list", params).await
}

pub async fn edit_user(client: &FlatClient, body: &EditUser) -> ClientResult<Value> {
    post(client, "/manage/user/edit", body).await
}

pub async fn delete_user(client: &FlatClient, id: i64) -> ClientResult<Value> {
    post(client, "/manage/user/delete", &IdParam { id }).await
}

pub async fn fetch_role_list(client: &FlatClient, params: &SearchParams) -> ClientResult<RoleList> {
    post(client, "/manage/role/list", params).await
}

pub async fn edit_role(client: &FlatClient, body: &EditRole) -> ClientResult<Value> {
    post(client, "/manage/role/edit", body).await
}

pub async fn delete_role(client: &FlatClient, id: i64) -> ClientResult<Value> {
    post(client, "/manage/role/delete", &IdParam { id }).await
}

pub async fn fetch_menu_list(client: &FlatClient, params: &SearchParams) -> ClientResult<MenuList> {
    post(client, "/manage/router/list", params).await
}

/// Route names of every page granted to a role.
pub async fn fetch_all_pages(client: &FlatClient, role_id: i64) -> ClientResult<Vec<String>> {
    post(client, "/manage/router/pages", &RoleIdParam { role_id }).await
}

pub async fn fetch_menu_tree(client: &FlatClient) -> ClientResult<Vec<MenuTree>> {
    client.request(RequestDescriptor::get("/manage/router/tree")).await
}

pub async fn edit_menu(client: &FlatClient, body: &EditMenuRequest) -> ClientResult<Value> {
    post(client, "/manage/router/edit", body).await
}

pub async fn delete_menu(client: &FlatClient, id: i64) -> ClientResult<Value> {
    post(client, "/manage/router/delete", &IdParam { id }).await
}

/// Menu ids granted to a role.
pub async fn fetch_menu_ids_by_role(client: &FlatClient, role_id: i64) -> ClientResult<Vec<i64>> {
    post(client, "/manage/router/role", &RoleIdParam { role_id }).await
}
