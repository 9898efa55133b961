//! 模态提示框
//!
//! 所有请求失败和操作成功都通过这里提示，页面只管调用 [`NoticeContext`]。

use crate::components::icons::{CircleAlert, CircleCheck};
use leptos::prelude::*;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NoticeContext(RwSignal<Option<Notice>>);

impl NoticeContext {
    pub fn success(&self, message: impl Into<String>) {
        self.0.set(Some(Notice {
            level: NoticeLevel::Success,
            title: "Success",
            message: message.into(),
        }));
    }

    pub fn error(&self, error: &impl Display) {
        self.0.set(Some(Notice {
            level: NoticeLevel::Error,
            title: "Error",
            message: error.to_string(),
        }));
    }

    pub fn dismiss(&self) {
        self.0.set(None);
    }
}

pub fn provide_notice() -> NoticeContext {
    let ctx = NoticeContext(RwSignal::new(None));
    provide_context(ctx);
    ctx
}

pub fn use_notice() -> NoticeContext {
    use_context::<NoticeContext>().expect("NoticeContext should be provided")
}

#[component]
pub fn NoticeModal() -> impl IntoView {
    let ctx = use_notice();
    let notice = ctx.0;
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if notice.with(Option::is_some) {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let is_error = move || {
        notice.with(|n| n.as_ref().is_some_and(|n| n.level == NoticeLevel::Error))
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| ctx.dismiss()>
            <div class="modal-box text-center">
                <div class="flex justify-center mb-2">
                    {move || if is_error() {
                        view! { <CircleAlert attr:class="h-12 w-12 text-error" /> }.into_any()
                    } else {
                        view! { <CircleCheck attr:class="h-12 w-12 text-success" /> }.into_any()
                    }}
                </div>
                <h3 class="font-bold text-lg">
                    {move || notice.with(|n| n.as_ref().map(|n| n.title).unwrap_or_default())}
                </h3>
                <p class="py-4 whitespace-pre-line">
                    {move || notice.with(|n| n.as_ref().map(|n| n.message.clone()).unwrap_or_default())}
                </p>
                <div class="modal-action justify-center">
                    <button
                        class=move || if is_error() { "btn btn-error" } else { "btn btn-primary" }
                        on:click=move |_| ctx.dismiss()
                    >
                        "OK"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
