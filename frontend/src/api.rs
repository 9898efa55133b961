use crate::auth::use_auth;
use crate::web::FetchHttpClient;
use leptos::prelude::*;
use schooladmin_shared::SchoolApi;

/// 浏览器中使用的 API 客户端
pub type Api = SchoolApi<FetchHttpClient>;

/// 以当前会话构造 API 客户端（不追踪依赖）
pub fn use_api() -> Api {
    use_auth().state.with_untracked(|s| s.api())
}
