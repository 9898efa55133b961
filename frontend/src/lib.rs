//! 学校管理后台前端
//!
//! 以 Context 驱动的结构：
//! - `auth`: 会话上下文（恢复、登录、注销）
//! - `web::router`: 路由服务，所有导航经过 `schooladmin_shared::route::guard`
//! - `components`: UI 组件层，四个实体页共用 `entity_page`

mod api;
mod auth;
mod components {
    pub mod entity_form;
    pub mod entity_page;
    pub mod home;
    pub mod icons;
    pub mod layout;
    pub mod login;
    pub mod notice;
}
mod web;

use crate::auth::AuthContext;
use crate::components::entity_page::{entity_create_page, entity_page};
use crate::components::home::HomePage;
use crate::components::layout::Layout;
use crate::components::login::LoginPage;
use crate::components::notice::{NoticeModal, provide_notice};
use crate::web::router::{Link, Router, RouterOutlet};

use leptos::prelude::*;
use schooladmin_shared::route::AppRoute;
use schooladmin_shared::{Grade, Student, Subject, Teacher};

/// 路由匹配函数
///
/// 受保护页面统一包在 [`Layout`] 中。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Home => view! { <Layout><HomePage /></Layout> }.into_any(),
        AppRoute::Teachers => view! { <Layout>{entity_page::<Teacher>()}</Layout> }.into_any(),
        AppRoute::Students => view! { <Layout>{entity_page::<Student>()}</Layout> }.into_any(),
        AppRoute::Classes => view! { <Layout>{entity_page::<Grade>()}</Layout> }.into_any(),
        AppRoute::Subjects => view! { <Layout>{entity_page::<Subject>()}</Layout> }.into_any(),
        AppRoute::AddTeacher => {
            view! { <Layout>{entity_create_page::<Teacher>()}</Layout> }.into_any()
        }
        AppRoute::AddSubject => {
            view! { <Layout>{entity_create_page::<Subject>()}</Layout> }.into_any()
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Home class="btn btn-primary mt-6">"Back to Dashboard"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 会话上下文：启动时从 LocalStorage 恢复
    let auth_ctx = AuthContext::restore();
    provide_context(auth_ctx);

    // 2. 全局提示框
    provide_notice();

    // 3. 认证信号注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router is_authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <NoticeModal />
    }
}
