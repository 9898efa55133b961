//! 后端地址配置
//!
//! 编译期通过 `SCHOOLADMIN_API_URL` 指定默认值；登录表单可以覆盖，
//! 成功登录后的地址记在持久化存储中，下次自动填充。

use crate::session::KeyValueStore;

pub const STORAGE_API_URL_KEY: &str = "api_base_url";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// 构建时配置的后端地址
pub fn default_api_url() -> &'static str {
    match option_env!("SCHOOLADMIN_API_URL") {
        Some(url) if !url.trim().is_empty() => url,
        _ => DEFAULT_API_URL,
    }
}

/// 启动时使用的后端地址：上次成功登录的地址优先
pub fn initial_api_url<S: KeyValueStore>(storage: &S) -> String {
    storage
        .get(STORAGE_API_URL_KEY)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| default_api_url().to_string())
}

/// 规范化用户输入的地址；空输入回退到默认值
pub fn normalize_api_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        default_api_url().trim_end_matches('/').to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn remember_api_url<S: KeyValueStore>(storage: &S, url: &str) {
    if !storage.set(STORAGE_API_URL_KEY, url) {
        log::warn!("[Config] Failed to remember API url {}", url);
    }
}
