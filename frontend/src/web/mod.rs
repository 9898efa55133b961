//! 浏览器 API 适配层
//!
//! 把 `schooladmin-shared` 中与平台无关的接口落到浏览器上：
//! HTTP 走 `gloo-net`，存储走 `gloo-storage`，确认框与 History 走 `web-sys`。

mod dialog;
mod http;
pub mod router;
mod storage;

pub use dialog::BrowserConfirm;
pub use http::FetchHttpClient;
pub use storage::LocalStorage;
