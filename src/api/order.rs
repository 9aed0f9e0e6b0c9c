//! CPS order endpoints.

use crate::api::post;
use crate::error::ClientResult;
use crate::models::order::CpsOrderList;
use crate::models::SearchParams;
use crate::service::FlatClient;

pub async fn fetch_order_list(client: &FlatClient, params: &SearchParams) -> ClientResult<CpsOrderList> {
    post(client, "/cps/order/list", params).await
}
