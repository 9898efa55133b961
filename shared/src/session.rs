//! 会话存储
//!
//! 会话是显式传递的上下文对象：登录时创建，注销时销毁。
//! 内存中保存完整会话，同时把 token 与用户身份镜像到持久化键值存储，
//! 以便页面刷新后恢复。不做过期检查，也不会用 refresh token 自动续期。

use crate::{LoginResponse, STORAGE_REFRESH_KEY, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, UserInfo};
use serde::{Deserialize, Serialize};

/// 持久化键值存储（浏览器中为 LocalStorage）
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    /// 返回是否写入成功
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserInfo,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<LoginResponse> for Session {
    fn from(res: LoginResponse) -> Self {
        Self {
            user: res.user,
            access_token: res.access,
            refresh_token: res.refresh,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    current: Option<Session>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// 空会话
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// 从持久化存储恢复会话
    ///
    /// token 与用户身份必须同时存在；只有 token 时视为未登录。
    pub fn restore(storage: S) -> Self {
        let current = match (
            storage.get(STORAGE_TOKEN_KEY),
            storage.get(STORAGE_USER_KEY),
        ) {
            (Some(access_token), Some(user_json)) if !access_token.is_empty() => {
                match serde_json::from_str::<UserInfo>(&user_json) {
                    Ok(user) => Some(Session {
                        user,
                        access_token,
                        refresh_token: storage.get(STORAGE_REFRESH_KEY).unwrap_or_default(),
                    }),
                    Err(e) => {
                        log::warn!("[Session] Stored user identity is unreadable: {}", e);
                        None
                    }
                }
            }
            (Some(_), None) => {
                log::info!("[Session] Token found without user identity, login required.");
                None
            }
            _ => None,
        };

        Self { storage, current }
    }

    /// 登录并持久化会话
    ///
    /// 内存中的会话总会生效；返回值表示三个键是否都已写入持久化存储。
    pub fn login(&mut self, session: Session) -> bool {
        let user_json = match serde_json::to_string(&session.user) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("[Session] Failed to encode user identity: {}", e);
                None
            }
        };

        let mut persisted = true;
        let entries = [
            (STORAGE_TOKEN_KEY, Some(session.access_token.as_str())),
            (STORAGE_REFRESH_KEY, Some(session.refresh_token.as_str())),
            (STORAGE_USER_KEY, user_json.as_deref()),
        ];
        for (key, value) in entries {
            let written = value.is_some_and(|v| self.storage.set(key, v));
            if !written {
                log::warn!("[Session] Failed to persist {}", key);
                persisted = false;
            }
        }

        log::info!("[Session] Logged in as {}", session.user.username);
        self.current = Some(session);
        persisted
    }

    pub fn logout(&mut self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_REFRESH_KEY);
        self.storage.delete(STORAGE_USER_KEY);
        if let Some(session) = self.current.take() {
            log::info!("[Session] Logged out {}", session.user.username);
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.access_token.as_str())
    }

    /// 守卫的唯一判据：是否存在用户身份
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// 内存键值存储，克隆后共享同一份数据（模拟刷新前后的 LocalStorage）
    #[derive(Clone, Default)]
    pub(crate) struct MemoryStore(Rc<RefCell<HashMap<String, String>>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) -> bool {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
            true
        }

        fn delete(&self, key: &str) -> bool {
            self.0.borrow_mut().remove(key).is_some()
        }
    }

    pub(crate) fn session() -> Session {
        Session {
            user: UserInfo {
                username: "admin".into(),
                email: "admin@school.test".into(),
            },
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
        }
    }

    #[test]
    fn test_login_persists_tokens() {
        let storage = MemoryStore::default();
        let mut store = SessionStore::new(storage.clone());
        assert!(!store.is_authenticated());

        assert!(store.login(session()));

        assert!(store.is_authenticated());
        assert_eq!(store.bearer_token(), Some("access-1"));
        assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("access-1"));
        assert_eq!(storage.get(STORAGE_REFRESH_KEY).as_deref(), Some("refresh-1"));
        assert!(storage.get(STORAGE_USER_KEY).is_some());
    }

    /// 写入总是失败的存储（如浏览器禁用了 LocalStorage）
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> bool {
            false
        }

        fn delete(&self, _key: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_login_reports_failed_persistence() {
        let mut store = SessionStore::new(ReadOnlyStore);
        assert!(!store.login(session()));
        // 内存中的会话仍然可用
        assert!(store.is_authenticated());
        assert_eq!(store.bearer_token(), Some("access-1"));
    }

    #[test]
    fn test_logout_clears_memory_and_storage() {
        let storage = MemoryStore::default();
        let mut store = SessionStore::new(storage.clone());
        store.login(session());
        store.logout();

        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(storage.get(STORAGE_TOKEN_KEY).is_none());
        assert!(storage.get(STORAGE_REFRESH_KEY).is_none());
        assert!(storage.get(STORAGE_USER_KEY).is_none());
    }

    #[test]
    fn test_restore_after_reload() {
        let storage = MemoryStore::default();
        SessionStore::new(storage.clone()).login(session());

        let restored = SessionStore::restore(storage);
        assert_eq!(restored.current(), Some(&session()));
    }

    #[test]
    fn test_restore_requires_identity() {
        let storage = MemoryStore::default();
        storage.set(STORAGE_TOKEN_KEY, "orphan");
        assert!(!SessionStore::restore(storage.clone()).is_authenticated());

        storage.set(STORAGE_USER_KEY, "not json");
        assert!(!SessionStore::restore(storage).is_authenticated());
    }

    #[test]
    fn test_session_from_login_response() {
        let res: LoginResponse = serde_json::from_value(serde_json::json!({
            "access": "a",
            "refresh": "r",
            "user": {"username": "jo", "email": "jo@x.test"}
        }))
        .unwrap();
        let s = Session::from(res);
        assert_eq!(s.access_token, "a");
        assert_eq!(s.refresh_token, "r");
        assert_eq!(s.user.username, "jo");
    }
}
