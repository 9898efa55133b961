use super::*;
use crate::error::ApiErrorKind;
use crate::http::MockHttpClient;
use crate::{Gender, GradeRef, PersonDraft, UserInfo};
use serde_json::json;

const BASE: &str = "http://api.school.test";

fn api() -> SchoolApi<MockHttpClient> {
    SchoolApi::new(format!("{}/", BASE), MockHttpClient::new())
}

fn session() -> Session {
    Session {
        user: UserInfo {
            username: "admin".into(),
            email: String::new(),
        },
        access_token: "tok".into(),
        refresh_token: "ref".into(),
    }
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{}/login/", BASE),
        200,
        json!({"access": "a1", "refresh": "r1", "user": {"username": "admin", "email": "a@s.test"}}),
    );

    let session = api.login("admin", "secret").await.unwrap();
    assert_eq!(session.access_token, "a1");
    assert_eq!(session.user.email, "a@s.test");

    let requests = api.client().requests.borrow();
    let (method, url, headers, body) = &requests[0];
    assert_eq!(*method, HttpMethod::Post);
    assert_eq!(url, &format!("{}/login/", BASE));
    assert_eq!(headers.get("Content-Type").map(String::as_str), Some("application/json"));
    assert!(!headers.contains_key(HEADER_AUTHORIZATION));
    let body: serde_json::Value = serde_json::from_str(body.as_ref().unwrap()).unwrap();
    assert_eq!(body, json!({"username": "admin", "password": "secret"}));
}

#[tokio::test]
async fn test_login_rejected() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Post,
        &format!("{}/login/", BASE),
        401,
        json!({"detail": "No active account"}),
    );
    let err = api.login("admin", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status(401));
    assert_eq!(err.operation.as_deref(), Some("/login/"));
}

#[tokio::test]
async fn test_list_sends_bearer_token() {
    let api = api().with_session(Some(&session()));
    api.client().mock_response(
        HttpMethod::Get,
        &format!("{}/teacher/", BASE),
        200,
        json!([
            {"id": 1, "first_name": "A", "last_name": "B", "age": 30, "gender": "Male", "grade": "Form One"},
            {"id": 2, "first_name": "C", "last_name": "D", "age": "41", "gender": "Female", "grade": 3}
        ]),
    );

    let teachers = api.list::<Teacher>().await.unwrap();
    assert_eq!(teachers.len(), 2);
    assert_eq!(teachers[0].grade, Some(GradeRef::Name("Form One".into())));
    assert_eq!(teachers[1].grade, Some(GradeRef::Id(3)));

    let requests = api.client().requests.borrow();
    assert_eq!(
        requests[0].2.get(HEADER_AUTHORIZATION).map(String::as_str),
        Some("Bearer tok")
    );
}

#[tokio::test]
async fn test_list_decode_failure() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Get,
        &format!("{}/grade/", BASE),
        200,
        json!({"unexpected": true}),
    );
    let err = api.list::<Grade>().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
    assert_eq!(err.operation.as_deref(), Some("grade.list"));
}

#[tokio::test]
async fn test_create_update_delete_paths() {
    let api = api();
    let client = api.client();
    client.mock_response(
        HttpMethod::Post,
        &format!("{}/students/", BASE),
        201,
        json!({"id": 10, "first_name": "E", "last_name": "F", "age": 12, "gender": "Female", "grade": 2}),
    );
    client.mock_response(HttpMethod::Put, &format!("{}/students/10/", BASE), 200, json!({}));
    client.mock_response(HttpMethod::Delete, &format!("{}/students/10/", BASE), 204, json!(null));

    let draft = PersonDraft {
        first_name: "E".into(),
        last_name: "F".into(),
        age: 12,
        gender: Gender::Female,
        grade: 2,
    };
    let created = api.create::<Student>(&draft).await.unwrap();
    assert_eq!(created.id, 10);
    api.update::<Student>(10, &draft).await.unwrap();
    api.delete::<Student>(10).await.unwrap();

    let methods: Vec<_> = client.requests.borrow().iter().map(|r| r.0).collect();
    assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]);
}

#[tokio::test]
async fn test_network_failure_is_tagged_with_operation() {
    let api = api();
    api.client()
        .mock_network_failure(HttpMethod::Delete, &format!("{}/subjects/5/", BASE));
    let err = api.delete::<Subject>(5).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
    assert_eq!(err.operation.as_deref(), Some("subjects.delete"));
}

#[tokio::test]
async fn test_dashboard_counts() {
    let api = api();
    let client = api.client();
    client.mock_response(HttpMethod::Get, &format!("{}/teacher/", BASE), 200, json!([]));
    client.mock_response(
        HttpMethod::Get,
        &format!("{}/students/", BASE),
        200,
        json!([
            {"id": 1, "first_name": "A", "last_name": "B", "age": 9, "gender": "Male"},
            {"id": 2, "first_name": "C", "last_name": "D", "age": 9, "gender": "Female"}
        ]),
    );
    client.mock_response(
        HttpMethod::Get,
        &format!("{}/grade/", BASE),
        200,
        json!([{"id": 1, "name": "Form One", "level": "1"}]),
    );
    client.mock_response(
        HttpMethod::Get,
        &format!("{}/subjects/", BASE),
        200,
        json!([{"id": 1, "name": "Maths", "grade": "Form One"}]),
    );

    let counts = api.dashboard_counts().await.unwrap();
    assert_eq!(
        counts,
        DashboardCounts {
            teachers: 0,
            students: 2,
            classes: 1,
            subjects: 1,
        }
    );
    assert_eq!(client.request_count(), 4);
}

#[tokio::test]
async fn test_dashboard_counts_fails_if_any_list_fails() {
    let api = api();
    // 只 mock 了部分端点，其余返回 404
    api.client()
        .mock_response(HttpMethod::Get, &format!("{}/teacher/", BASE), 200, json!([]));
    let err = api.dashboard_counts().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Status(404));
}
