use super::*;
use crate::error::ApiErrorKind;
use crate::http::{HttpMethod, MockHttpClient};
use crate::{Gender, GradeRef, Subject, Teacher};
use serde_json::json;
use std::cell::Cell;

const BASE: &str = "http://api.school.test";

// =========================================================
// Shared Fixtures
// =========================================================

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

fn api() -> SchoolApi<MockHttpClient> {
    SchoolApi::new(BASE, MockHttpClient::new())
}

fn grades() -> GradeDirectory {
    GradeDirectory::new(vec![
        Grade {
            id: 1,
            name: "Form One".into(),
            level: "1".into(),
        },
        Grade {
            id: 2,
            name: "Form Two".into(),
            level: "2".into(),
        },
    ])
}

fn teacher(id: u64, first_name: &str) -> Teacher {
    Teacher {
        id,
        first_name: first_name.into(),
        last_name: "Smith".into(),
        age: 40,
        gender: Gender::Male,
        grade: Some(GradeRef::Id(1)),
    }
}

fn teacher_collection() -> EntityCollection<Teacher> {
    EntityCollection::from_vec(vec![teacher(1, "John"), teacher(2, "Jane")])
}

fn teacher_form(first_name: &str) -> FormValues {
    FormValues::new()
        .with("first_name", first_name)
        .with("last_name", "Doe")
        .with("age", "33")
        .with("gender", "Female")
        .with("grade", "2")
}

/// 模拟一次页面操作：成功时修补集合，失败时什么也不做
fn apply<T: Entity>(collection: &mut EntityCollection<T>, result: &ApiResult<Mutation<T>>) {
    if let Ok(m) = result {
        collection.apply(m.clone());
    }
}

// =========================================================
// Load
// =========================================================

#[tokio::test]
async fn test_load_fetches_grades_for_dependent_entities() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Get,
        &url("/subjects/"),
        200,
        json!([{"id": 3, "name": "Maths", "grade": "Form Two"}]),
    );
    api.client().mock_response(
        HttpMethod::Get,
        &url("/grade/"),
        200,
        json!([{"id": 2, "name": "Form Two", "level": 2}]),
    );

    let data = load::<Subject, _>(&api).await.unwrap();
    assert_eq!(data.records.len(), 1);
    let subject = data.records.get(3).unwrap();
    assert_eq!(data.grades.canonicalize(subject.grade.as_ref().unwrap()), GradeRef::Id(2));
    assert_eq!(api.client().request_count(), 2);
}

#[tokio::test]
async fn test_load_grades_only_once_for_grade_page() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Get, &url("/grade/"), 200, json!([]));
    let data = load::<Grade, _>(&api).await.unwrap();
    assert!(data.records.is_empty());
    assert_eq!(api.client().request_count(), 1);
}

#[tokio::test]
async fn test_load_failure_surfaces_error() {
    let api = api();
    api.client()
        .mock_network_failure(HttpMethod::Get, &url("/teacher/"));
    api.client()
        .mock_response(HttpMethod::Get, &url("/grade/"), 200, json!([]));
    let err = load::<Teacher, _>(&api).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
}

// =========================================================
// Create / Update
// =========================================================

#[tokio::test]
async fn test_create_appears_once_with_server_id() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Post,
        &url("/teacher/"),
        201,
        json!({"id": 77, "first_name": "Ada", "last_name": "Doe", "age": 33, "gender": "Female", "grade": 2}),
    );

    let mut collection = teacher_collection();
    let result =
        submit::<Teacher, _>(&api, &EditTarget::Create, &teacher_form("Ada"), &grades()).await;
    apply(&mut collection, &result);

    assert_eq!(collection.len(), 3);
    let matching: Vec<_> = collection
        .items()
        .iter()
        .filter(|t| t.first_name == "Ada")
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].id, 77);

    // 提交的 grade 是 id
    let requests = api.client().requests.borrow();
    let body: serde_json::Value = serde_json::from_str(requests[0].3.as_ref().unwrap()).unwrap();
    assert_eq!(body["grade"], json!(2));
}

#[tokio::test]
async fn test_update_keeps_id_and_shows_submitted_values() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Put, &url("/teacher/2/"), 200, json!({}));

    let mut collection = teacher_collection();
    let target = EditTarget::Update(collection.get(2).unwrap().clone());
    let result = submit(&api, &target, &teacher_form("Janet"), &grades()).await;
    apply(&mut collection, &result);

    assert_eq!(collection.len(), 2);
    let updated = collection.get(2).unwrap();
    assert_eq!(updated.id, 2);
    assert_eq!(updated.first_name, "Janet");
    assert_eq!(updated.last_name, "Doe");
    assert_eq!(updated.age, 33);
    assert_eq!(updated.gender, Gender::Female);
    assert_eq!(updated.grade, Some(GradeRef::Id(2)));
    // 其它记录不受影响
    assert_eq!(collection.get(1), Some(&teacher(1, "John")));
}

#[tokio::test]
async fn test_failed_mutations_leave_collection_unchanged() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Post, &url("/teacher/"), 500, json!({"detail": "boom"}));
    api.client()
        .mock_network_failure(HttpMethod::Put, &url("/teacher/1/"));
    api.client()
        .mock_response(HttpMethod::Delete, &url("/teacher/2/"), 403, json!({}));

    let mut collection = teacher_collection();
    let before = collection.clone();

    let created =
        submit::<Teacher, _>(&api, &EditTarget::Create, &teacher_form("X"), &grades()).await;
    assert_eq!(created.as_ref().unwrap_err().kind, ApiErrorKind::Status(500));
    apply(&mut collection, &created);

    let target = EditTarget::Update(teacher(1, "John"));
    let updated = submit(&api, &target, &teacher_form("Y"), &grades()).await;
    assert_eq!(updated.as_ref().unwrap_err().kind, ApiErrorKind::Network);
    apply(&mut collection, &updated);

    let removed = remove(&api, &teacher(2, "Jane"), &|_: &str| true).await;
    assert_eq!(removed.unwrap_err().kind, ApiErrorKind::Status(403));

    assert_eq!(collection, before);
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let api = api();
    let form = teacher_form("").with("age", "");
    let err = submit::<Teacher, _>(&api, &EditTarget::Create, &form, &grades())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Validation);
    assert!(err.message.contains("First Name"));
    assert!(err.message.contains("Age"));
    assert_eq!(api.client().request_count(), 0);
}

// =========================================================
// Delete
// =========================================================

#[tokio::test]
async fn test_confirmed_delete_removes_record() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Delete, &url("/teacher/1/"), 204, json!(null));

    let mut collection = teacher_collection();
    let record = collection.get(1).unwrap().clone();
    let prompted = Cell::new(false);
    let confirm = |msg: &str| {
        prompted.set(true);
        msg.contains("teacher")
    };

    let mutation = remove(&api, &record, &confirm).await.unwrap();
    assert_eq!(mutation, Some(Mutation::Removed(1)));
    collection.apply(mutation.unwrap());

    assert!(prompted.get());
    assert!(!collection.contains(1));
    assert!(collection.contains(2));
}

#[tokio::test]
async fn test_declined_delete_keeps_record_and_sends_nothing() {
    let api = api();
    let collection = teacher_collection();
    let before = collection.clone();
    let record = collection.get(1).unwrap().clone();

    let mutation = remove(&api, &record, &|_: &str| false).await.unwrap();
    assert!(mutation.is_none());
    assert_eq!(collection, before);
    assert_eq!(api.client().request_count(), 0);
}

#[test]
fn test_edit_target_prefill() {
    let create: EditTarget<Teacher> = EditTarget::Create;
    assert_eq!(create.title(), "Add Teacher");
    assert_eq!(create.prefill(&grades()), FormValues::new());

    let update = EditTarget::Update(teacher(1, "John"));
    assert_eq!(update.title(), "Update Teacher");
    let form = update.prefill(&grades());
    assert_eq!(form.get("first_name"), "John");
    assert_eq!(form.get("grade"), "1");
}
