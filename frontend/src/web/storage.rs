//! LocalStorage 适配
//!
//! 值按原样字符串保存，便于在开发者工具中直接查看。

use gloo_storage::{LocalStorage as BrowserStorage, Storage};
use schooladmin_shared::KeyValueStore;

/// 浏览器 LocalStorage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorage;

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        BrowserStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        BrowserStorage::raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        BrowserStorage::raw().remove_item(key).is_ok()
    }
}
