//! 由 [`FieldSpec`] 驱动的表单字段

use leptos::prelude::*;
use schooladmin_shared::{EntitySchema, FieldKind, FieldSpec, FormValues, GradeDirectory};

fn input_id(schema: &EntitySchema, field: &FieldSpec) -> String {
    format!("{}-{}", schema.collection, field.key)
}

/// 下拉框：首项为空占位，选中项由 `form` 决定
fn select_field(
    id: String,
    key: &'static str,
    placeholder: String,
    options: Signal<Vec<(String, String)>>,
    form: RwSignal<FormValues>,
) -> AnyView {
    let selected = move || form.with(|f| f.get(key).to_string());
    view! {
        <select
            id=id
            class="select select-bordered w-full"
            on:change=move |ev| form.update(|f| f.set(key, event_target_value(&ev)))
        >
            <option value="" disabled selected=move || selected().is_empty()>{placeholder}</option>
            <For
                each=move || options.get()
                key=|(value, label)| (value.clone(), label.clone())
                children=move |(value, label)| {
                    let is_selected = {
                        let value = value.clone();
                        move || selected() == value
                    };
                    view! { <option value=value selected=is_selected>{label}</option> }
                }
            />
        </select>
    }
    .into_any()
}

fn field_input(
    schema: &'static EntitySchema,
    field: &'static FieldSpec,
    form: RwSignal<FormValues>,
    grades: Signal<GradeDirectory>,
) -> AnyView {
    let id = input_id(schema, field);
    let key = field.key;
    let value = move || form.with(|f| f.get(key).to_string());
    let on_input =
        move |ev: leptos::ev::Event| form.update(|f| f.set(key, event_target_value(&ev)));

    match field.kind {
        FieldKind::Text => view! {
            <input id=id type="text" class="input input-bordered w-full"
                required=field.required
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
        FieldKind::Number => view! {
            <input id=id type="number" min="0" class="input input-bordered w-full"
                required=field.required
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
        FieldKind::Choice(choices) => {
            let options = Signal::derive(move || {
                choices
                    .iter()
                    .map(|c| (c.to_string(), c.to_string()))
                    .collect::<Vec<_>>()
            });
            select_field(id, key, format!("Select {}", field.label), options, form)
        }
        FieldKind::GradeSelect => {
            let options = Signal::derive(move || grades.with(|g| g.options()));
            select_field(id, key, "Select Grade".to_string(), options, form)
        }
    }
}

/// 实体表单的全部字段
#[component]
pub fn EntityFields(
    schema: &'static EntitySchema,
    form: RwSignal<FormValues>,
    #[prop(into)] grades: Signal<GradeDirectory>,
) -> impl IntoView {
    schema
        .fields
        .iter()
        .map(|field| {
            view! {
                <div class="form-control">
                    <label class="label" for=input_id(schema, field)>
                        <span class="label-text">{field.label}</span>
                    </label>
                    {field_input(schema, field, form, grades)}
                </div>
            }
        })
        .collect_view()
}
