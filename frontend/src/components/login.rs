use crate::auth::{login, use_auth};
use crate::components::icons::ShieldCheck;
use leptos::prelude::*;
use leptos::task::spawn_local;
use schooladmin_shared::ApiErrorKind;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let api_url = RwSignal::new(auth.state.with_untracked(|s| s.api_base_url.clone()));
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 登录成功后由路由服务跳转到首页
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get_untracked().trim().is_empty() || password.get_untracked().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let result = login(
                auth,
                api_url.get_untracked(),
                username.get_untracked(),
                password.get_untracked(),
            )
            .await;
            if let Err(e) = result {
                let message = match e.kind {
                    ApiErrorKind::Status(400 | 401) => "Invalid Credentials".to_string(),
                    _ => e.to_string(),
                };
                set_error_msg.set(Some(message));
                set_is_submitting.set(false);
            }
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"School Admin"</h1>
                        <p class="text-base-content/70">"Sign in to manage your school"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                on:input=move |ev| username.set(event_target_value(&ev))
                                prop:value=username
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="••••••••"
                                on:input=move |ev| password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="collapse collapse-arrow bg-base-200 mt-2">
                            <input type="checkbox" />
                            <div class="collapse-title text-sm">"Server"</div>
                            <div class="collapse-content">
                                <input
                                    id="api_url"
                                    type="url"
                                    placeholder="http://localhost:8000"
                                    on:input=move |ev| api_url.set(event_target_value(&ev))
                                    prop:value=api_url
                                    class="input input-bordered input-sm w-full"
                                />
                            </div>
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
