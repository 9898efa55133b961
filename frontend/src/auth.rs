//! 认证模块
//!
//! 会话以显式上下文的形式提供给组件。路由服务只拿到派生的认证信号，
//! 不直接依赖会话本身。

use crate::api::Api;
use crate::web::{FetchHttpClient, LocalStorage};
use leptos::prelude::*;
use schooladmin_shared::config;
use schooladmin_shared::{ApiResult, SchoolApi, SessionStore, UserInfo};

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 会话（内存 + LocalStorage 镜像）
    pub store: SessionStore<LocalStorage>,
    /// 后端地址（用于 UI 显示和自动填充）
    pub api_base_url: String,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.store.user()
    }

    /// 以当前会话构造 API 客户端
    pub fn api(&self) -> Api {
        SchoolApi::new(self.api_base_url.as_str(), FetchHttpClient)
            .with_session(self.store.current())
    }
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复会话与后端地址
    pub fn restore() -> Self {
        let store = SessionStore::restore(LocalStorage);
        let api_base_url = config::initial_api_url(&LocalStorage);
        if let Some(user) = store.user() {
            log::info!("[Auth] Restored session for {}", user.username);
        }

        let (state, set_state) = signal(AuthState {
            store,
            api_base_url,
        });
        Self { state, set_state }
    }

    /// 认证状态信号（注入路由服务）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_authenticated()))
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录
///
/// 成功后写入会话并记住本次使用的后端地址；失败时状态不变。
pub async fn login(
    ctx: AuthContext,
    api_base_url: String,
    username: String,
    password: String,
) -> ApiResult<()> {
    let api_base_url = config::normalize_api_url(&api_base_url);
    let api = SchoolApi::new(api_base_url.as_str(), FetchHttpClient);

    let session = api.login(&username, &password).await.inspect_err(|e| {
        log::warn!("[Auth] Login failed for {}: {}", username, e);
    })?;

    config::remember_api_url(&LocalStorage, &api_base_url);
    ctx.set_state.update(|state| {
        state.store.login(session);
        state.api_base_url = api_base_url;
    });
    Ok(())
}

/// 注销
///
/// 不需要手动导航，路由服务会监听认证状态变化并重定向。
pub fn logout(ctx: AuthContext) {
    ctx.set_state.update(|state| state.store.logout());
}
