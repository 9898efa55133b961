//! 路由服务
//!
//! 封装 `window.history`，所有导航都先交给 [`guard`] 判定，
//! 再写入 History 并更新当前路由信号。

use leptos::prelude::*;
use schooladmin_shared::route::{AppRoute, Navigation, guard};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

fn replace_history_state(path: &str) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
    }
}

/// 路由器服务
///
/// 认证状态以信号注入，路由层不直接依赖会话。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(requested);
        let router = Self {
            current_route,
            set_route,
            is_authenticated,
        };

        // 首次加载同样经过守卫，重定向时替换而非追加历史
        let nav = guard(requested, is_authenticated.get_untracked());
        if nav.is_redirect() {
            router.apply(nav, false);
        }
        router
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到指定路由
    pub fn navigate(&self, target: AppRoute) {
        let nav = guard(target, self.is_authenticated.get_untracked());
        self.apply(nav, true);
    }

    /// 执行守卫结果
    ///
    /// `use_push` 为 true 时写入新历史记录，否则替换当前记录。
    fn apply(&self, nav: Navigation, use_push: bool) {
        if let Navigation::Redirect(to) = nav {
            log::info!("[Router] Redirecting to {}", to);
        }
        let route = nav.route();
        if use_push {
            push_history_state(route.to_path());
        } else {
            replace_history_state(route.to_path());
        }
        self.set_route.set(route);
    }

    /// 浏览器后退/前进
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = AppRoute::from_path(&current_path());
            let nav = guard(target, router.is_authenticated.get_untracked());
            if nav.is_redirect() {
                log::info!("[Router] Access to {} denied", target);
                router.apply(nav, false);
            } else {
                router.set_route.set(target);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 监听器与应用同寿命
        closure.forget();
    }

    /// 认证状态变化时对当前路由重新执行守卫
    fn setup_auth_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            let is_auth = router.is_authenticated.get();
            let route = router.current_route.get_untracked();
            let nav = guard(route, is_auth);
            if nav.is_redirect() {
                log::info!(
                    "[Router] Auth state changed (authenticated: {}), leaving {}",
                    is_auth,
                    route
                );
                router.apply(nav, true);
            }
        });
    }
}

fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(is_authenticated: Signal<bool>, children: Children) -> impl IntoView {
    provide_router(is_authenticated);

    children()
}

/// 路由出口：按当前路由渲染视图
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，点击时走路由服务而不是整页刷新
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
