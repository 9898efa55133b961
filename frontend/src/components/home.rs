use crate::api::use_api;
use crate::components::icons::route_icon;
use crate::components::notice::use_notice;
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use schooladmin_shared::DashboardCounts;
use schooladmin_shared::route::AppRoute;

#[component]
fn StatCard(
    route: AppRoute,
    label: &'static str,
    count: Signal<usize>,
    loading: ReadSignal<bool>,
) -> impl IntoView {
    view! {
        <Link to=route class="stat bg-base-100 rounded-box shadow hover:shadow-lg transition-shadow">
            <div class="stat-figure text-primary">{route_icon(route)}</div>
            <div class="stat-title">{label}</div>
            <div class="stat-value text-primary">
                {move || if loading.get() {
                    view! { <span class="loading loading-dots loading-md"></span> }.into_any()
                } else {
                    count.get().into_any()
                }}
            </div>
        </Link>
    }
}

/// 首页统计面板
#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let notice = use_notice();

    let (counts, set_counts) = signal(DashboardCounts::default());
    let (loading, set_loading) = signal(true);

    // 四个集合并发请求；失败时计数保持为 0
    spawn_local(async move {
        match api.dashboard_counts().await {
            Ok(c) => set_counts.set(c),
            Err(e) => {
                log::error!("[Home] {}", e);
                notice.error(&e);
            }
        }
        set_loading.set(false);
    });

    let teachers = Signal::derive(move || counts.get().teachers);
    let students = Signal::derive(move || counts.get().students);
    let classes = Signal::derive(move || counts.get().classes);
    let subjects = Signal::derive(move || counts.get().subjects);

    view! {
        <h2 class="text-2xl font-bold">"Dashboard"</h2>
        <div class="grid gap-4 grid-cols-1 sm:grid-cols-2 xl:grid-cols-4">
            <StatCard route=AppRoute::Teachers label="Teachers" count=teachers loading=loading />
            <StatCard route=AppRoute::Students label="Students" count=students loading=loading />
            <StatCard route=AppRoute::Classes label="Classes" count=classes loading=loading />
            <StatCard route=AppRoute::Subjects label="Subjects" count=subjects loading=loading />
        </div>
    }
}
