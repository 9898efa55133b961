//! 受保护页面的外壳：顶部栏 + 侧边栏

use crate::auth::{logout, use_auth};
use crate::components::icons::{LogOut, route_icon};
use crate::web::router::{Link, use_router};
use leptos::prelude::*;
use schooladmin_shared::route::AppRoute;

#[component]
fn Header() -> impl IntoView {
    let auth = use_auth();
    let username = move || {
        auth.state
            .with(|s| s.user().map(|u| u.username.clone()).unwrap_or_default())
    };

    view! {
        <div class="navbar bg-base-100 shadow-md px-4">
            <div class="flex-1">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl">"School Admin"</Link>
            </div>
            <div class="flex-none gap-3 items-center">
                <span class="badge badge-neutral">{username}</span>
                <button on:click=move |_| logout(auth) class="btn btn-outline btn-error btn-sm gap-2">
                    <LogOut attr:class="h-4 w-4" /> "Logout"
                </button>
            </div>
        </div>
    }
}

#[component]
fn Sidebar() -> impl IntoView {
    let current = use_router().current_route();

    view! {
        <aside class="w-56 shrink-0 bg-base-100 min-h-full shadow-md">
            <ul class="menu p-4 gap-1">
                {AppRoute::SIDEBAR
                    .into_iter()
                    .map(|route| {
                        let active = move || current.get() == route;
                        view! {
                            <li class:font-bold=active>
                                <Link to=route>{route_icon(route)} {route.title()}</Link>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </aside>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 flex flex-col font-sans">
            <Header />
            <div class="flex flex-1">
                <Sidebar />
                <main class="flex-1 p-4 md:p-8 space-y-6">{children()}</main>
            </div>
        </div>
    }
}
