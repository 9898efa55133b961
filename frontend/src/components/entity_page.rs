//! 通用实体页面
//!
//! 教师、学生、班级、科目四个列表页共用同一套视图：挂载时加载集合，
//! 表格展示，模态框新增/更新，确认后删除。请求成功后在本地修补集合，
//! 失败时集合不变并弹出提示。

use crate::api::use_api;
use crate::components::entity_form::EntityFields;
use crate::components::icons::{Pencil, Plus, Trash2};
use crate::components::notice::use_notice;
use crate::web::BrowserConfirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use schooladmin_shared::sync::{self, EditTarget, PageData};
use schooladmin_shared::{Entity, FormValues, GradeDirectory, Mutation};

fn success_message<T: Entity>(mutation: &Mutation<T>) -> String {
    let singular = T::schema().singular;
    match mutation {
        Mutation::Created(_) => format!("{} added successfully", singular),
        Mutation::Updated(_) => format!("{} updated successfully", singular),
        Mutation::Removed(_) => format!("{} deleted successfully", singular),
    }
}

/// 列表页
pub fn entity_page<T: Entity>() -> impl IntoView {
    let schema = T::schema();
    let api = StoredValue::new(use_api());
    let notice = use_notice();

    let data = RwSignal::new(PageData::<T>::default());
    let (loading, set_loading) = signal(true);
    let (load_error, set_load_error) = signal(Option::<String>::None);

    // 模态框：`Some` 表示打开
    let target = RwSignal::new(Option::<EditTarget<T>>::None);
    let form = RwSignal::new(FormValues::new());
    let (submitting, set_submitting) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    spawn_local(async move {
        match sync::load::<T, _>(&api.get_value()).await {
            Ok(page) => data.set(page),
            Err(e) => {
                log::error!("[{}] {}", schema.plural, e);
                set_load_error.set(Some(e.to_string()));
            }
        }
        set_loading.set(false);
    });

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if target.with(Option::is_some) {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let open_editor = move |edit: EditTarget<T>| {
        form.set(data.with_untracked(|d| edit.prefill(&d.grades)));
        target.set(Some(edit));
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(edit) = target.get_untracked() else {
            return;
        };
        let values = form.get_untracked();
        let grades = data.with_untracked(|d| d.grades.clone());
        let api = api.get_value();

        set_submitting.set(true);
        spawn_local(async move {
            match sync::submit(&api, &edit, &values, &grades).await {
                Ok(mutation) => {
                    let message = success_message(&mutation);
                    data.update(|d| d.records.apply(mutation));
                    target.set(None);
                    notice.success(message);
                }
                Err(e) => notice.error(&e),
            }
            set_submitting.set(false);
        });
    };

    let on_delete = move |record: T| {
        let api = api.get_value();
        spawn_local(async move {
            match sync::remove(&api, &record, &BrowserConfirm).await {
                Ok(Some(mutation)) => {
                    let message = success_message(&mutation);
                    data.update(|d| d.records.apply(mutation));
                    notice.success(message);
                }
                Ok(None) => {}
                Err(e) => notice.error(&e),
            }
        });
    };

    let grades = Signal::derive(move || data.with(|d| d.grades.clone()));
    let rows = move || {
        data.with(|d| {
            d.records
                .items()
                .iter()
                .map(|r| (r.clone(), r.cells(&d.grades)))
                .collect::<Vec<_>>()
        })
    };
    let colspan = move || (schema.columns.len() + 1).to_string();

    view! {
        <div class="flex items-center justify-between">
            <h2 class="text-2xl font-bold">{schema.plural}</h2>
            <button
                class="btn btn-primary gap-2"
                disabled=move || loading.get() || load_error.get().is_some()
                on:click=move |_| open_editor(EditTarget::Create)
            >
                <Plus attr:class="h-4 w-4" /> {format!("Add {}", schema.singular)}
            </button>
        </div>

        <div class="card bg-base-100 shadow-xl">
            <div class="card-body p-0 overflow-x-auto">
                {move || match load_error.get() {
                    Some(message) => view! {
                        <div role="alert" class="alert alert-error m-6">
                            <span>{message}</span>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    {schema.columns.iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                                    <th class="text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || loading.get()>
                                    <tr>
                                        <td colspan=colspan class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span> " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || !loading.get() && data.with(|d| d.records.is_empty())>
                                    <tr>
                                        <td colspan=colspan class="text-center py-8 text-base-content/50">
                                            {format!("No {} yet.", schema.plural.to_lowercase())}
                                        </td>
                                    </tr>
                                </Show>
                                // 以 (id, 单元格) 为 key，更新后的行会重新渲染
                                <For
                                    each=rows
                                    key=|(record, cells)| (record.id(), cells.clone())
                                    children=move |(record, cells)| {
                                        let for_update = record.clone();
                                        view! {
                                            <tr>
                                                {cells.into_iter().map(|c| view! { <td>{c}</td> }).collect_view()}
                                                <td class="text-right whitespace-nowrap">
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square"
                                                        title="Update"
                                                        on:click=move |_| open_editor(EditTarget::Update(for_update.clone()))
                                                    >
                                                        <Pencil attr:class="h-4 w-4" />
                                                    </button>
                                                    <button
                                                        class="btn btn-ghost btn-sm btn-square text-error"
                                                        title="Delete"
                                                        on:click=move |_| on_delete(record.clone())
                                                    >
                                                        <Trash2 attr:class="h-4 w-4" />
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }
                    .into_any(),
                }}
            </div>
        </div>

        <dialog class="modal" node_ref=dialog_ref on:close=move |_| target.set(None)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">
                    {move || target.with(|t| t.as_ref().map(EditTarget::title).unwrap_or_default())}
                </h3>
                <form on:submit=on_submit class="space-y-4 mt-4">
                    <EntityFields schema=schema form=form grades=grades />
                    <div class="modal-action">
                        <button type="button" class="btn" on:click=move |_| target.set(None)>"Cancel"</button>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> }.into_any()
                            } else {
                                "Save".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </dialog>
    }
}

/// 独立的新增页面（`/add-teacher`、`/add-subjects`）
///
/// 与模态框共用字段和校验；成功后提示并清空表单。
pub fn entity_create_page<T: Entity>() -> impl IntoView {
    let schema = T::schema();
    let api = StoredValue::new(use_api());
    let notice = use_notice();

    let grades = RwSignal::new(GradeDirectory::default());
    let form = RwSignal::new(FormValues::new());
    let (submitting, set_submitting) = signal(false);

    if schema.needs_grades {
        spawn_local(async move {
            match sync::load_grades(&api.get_value()).await {
                Ok(directory) => grades.set(directory),
                Err(e) => {
                    log::error!("[{}] {}", schema.plural, e);
                    notice.error(&e);
                }
            }
        });
    }

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form.get_untracked();
        let directory = grades.get_untracked();
        let api = api.get_value();

        set_submitting.set(true);
        spawn_local(async move {
            match sync::submit::<T, _>(&api, &EditTarget::Create, &values, &directory).await {
                Ok(mutation) => {
                    notice.success(success_message(&mutation));
                    form.set(FormValues::new());
                }
                Err(e) => notice.error(&e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <h2 class="text-2xl font-bold">{format!("Add {}", schema.singular)}</h2>
        <div class="card bg-base-100 shadow-xl max-w-xl">
            <form class="card-body space-y-2" on:submit=on_submit>
                <EntityFields schema=schema form=form grades=grades />
                <div class="card-actions justify-end mt-4">
                    <button type="button" class="btn" on:click=move |_| form.set(FormValues::new())>"Reset"</button>
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() {
                            view! { <span class="loading loading-spinner"></span> }.into_any()
                        } else {
                            "Submit".into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
