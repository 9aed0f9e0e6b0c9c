//! Endpoint wrappers. Each function pins the path and method of one backend
//! endpoint and decodes its payload.

pub mod auth;
pub mod coupon;
pub mod order;
pub mod system;
pub mod wechat;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientResult;
use crate::service::{FlatClient, RequestDescriptor};

/// `POST path` with a JSON body through the flat-envelope client.
pub(crate) async fn post<T, B>(client: &FlatClient, path: &str, body: &B) -> ClientResult<T>
where
    T: DeserializeOwned,
    B: Serialize + ?Sized,
{
    client.request(RequestDescriptor::post(path).json(body)?).await
}
