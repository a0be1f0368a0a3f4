use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nido::api::{ApiClient, ApiError, RequestHooks};
use nido::nursery::{NewChild, NewPayment, NewTeacher, NurseryApi};
use nido::session::MemorySessionStore;

fn api_for(server: &MockServer) -> NurseryApi {
    NurseryApi::new(ApiClient::new(
        server.uri(),
        Arc::new(MemorySessionStore::with_token("tok")),
    ))
}

// ── Children ──────────────────────────────────────────────────────

#[tokio::test]
async fn list_children_parses_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/children"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": 1, "name": "Mia", "classroom_id": 3},
                {"id": 2, "name": "Noa"}
            ],
            "total": 2
        })))
        .mount(&server)
        .await;

    let paged = api_for(&server)
        .list_children(
            RequestHooks::new(),
            &[("page".to_string(), "1".to_string())],
        )
        .await
        .unwrap();

    assert_eq!(paged.items.len(), 2);
    assert_eq!(paged.total, Some(2));
    assert_eq!(paged.items[0].classroom_id, Some(3));
    assert_eq!(paged.items[1].classroom_id, None);
}

#[tokio::test]
async fn enroll_child_posts_and_returns_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/children"))
        .and(body_json(json!({"name": "Mia", "birth_date": "2023-04-01"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 7, "name": "Mia", "birth_date": "2023-04-01"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let child = api_for(&server)
        .enroll_child(
            &NewChild {
                name: "Mia".to_string(),
                birth_date: Some("2023-04-01".to_string()),
                classroom_id: None,
            },
            RequestHooks::new(),
        )
        .await
        .unwrap();

    assert_eq!(child.id, 7);
}

#[tokio::test]
async fn missing_child_surfaces_http_404() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/children/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "child not found"})))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .child(999, RequestHooks::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), Some("child not found"));
}

#[tokio::test]
async fn wrong_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/children/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "one"})))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .child(1, RequestHooks::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn remove_child_issues_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/children/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .remove_child(7, RequestHooks::new())
        .await
        .unwrap();
}

// ── Classrooms and teachers ───────────────────────────────────────

#[tokio::test]
async fn assign_teacher_puts_to_classroom() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/classrooms/3/teacher"))
        .and(body_json(json!({"teacher_id": 12})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "Sunflowers", "teacher_id": 12
        })))
        .mount(&server)
        .await;

    let room = api_for(&server)
        .assign_teacher(3, 12, RequestHooks::new())
        .await
        .unwrap();
    assert_eq!(room.teacher_id, Some(12));
}

#[tokio::test]
async fn add_teacher_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/teachers"))
        .and(body_json(json!({"name": "Rosa", "email": "rosa@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12, "name": "Rosa", "email": "rosa@example.com"
        })))
        .mount(&server)
        .await;

    let teacher = api_for(&server)
        .add_teacher(
            &NewTeacher {
                name: "Rosa".to_string(),
                email: Some("rosa@example.com".to_string()),
            },
            RequestHooks::new(),
        )
        .await
        .unwrap();
    assert_eq!(teacher.id, 12);
}

// ── Payments ──────────────────────────────────────────────────────

#[tokio::test]
async fn list_payments_filters_by_child() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/payments"))
        .and(query_param("child_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "child_id": 7, "amount": 45000, "paid_at": "2026-08-01"}],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let paged = api_for(&server)
        .list_payments(Some(7), RequestHooks::new(), &[])
        .await
        .unwrap();
    assert_eq!(paged.items[0].amount, 45000);
}

#[tokio::test]
async fn record_payment_posts_cents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payments"))
        .and(body_json(json!({"child_id": 7, "amount": 45000})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 31, "child_id": 7, "amount": 45000
        })))
        .mount(&server)
        .await;

    let payment = api_for(&server)
        .record_payment(
            &NewPayment {
                child_id: 7,
                amount: 45000,
                note: None,
            },
            RequestHooks::new(),
        )
        .await
        .unwrap();
    assert_eq!(payment.id, 31);
}

// ── Reports ───────────────────────────────────────────────────────

#[tokio::test]
async fn daily_reports_pass_date_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/children/7/reports/daily"))
        .and(query_param("date", "2026-08-24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{"id": 1, "child_id": 7, "date": "2026-08-24", "notes": "good nap"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reports = api_for(&server)
        .daily_reports(7, Some("2026-08-24"), RequestHooks::new())
        .await
        .unwrap();
    assert_eq!(reports.items[0].notes.as_deref(), Some("good nap"));
}

#[tokio::test]
async fn attendance_parses_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/children/7/attendance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"date": "2026-08-20", "present": true},
                {"date": "2026-08-21", "present": false, "reason": "sick"}
            ]
        })))
        .mount(&server)
        .await;

    let entries = api_for(&server)
        .attendance(7, None, None, RequestHooks::new())
        .await
        .unwrap();
    assert_eq!(entries.items.len(), 2);
    assert!(!entries.items[1].present);
    assert_eq!(entries.items[1].extra["reason"], "sick");
}

// ── Uploads ───────────────────────────────────────────────────────

#[tokio::test]
async fn upload_posts_multipart_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploads"))
        .and(wiremock::matchers::header("Authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 5, "url": "https://media.mynido.app/consent.pdf"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let record = api_for(&server)
        .upload_document("consent.pdf", b"%PDF-1.4".to_vec(), Some(7), RequestHooks::new())
        .await
        .unwrap();
    assert_eq!(record["url"], "https://media.mynido.app/consent.pdf");
}

#[tokio::test]
async fn upload_failure_maps_like_any_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/uploads"))
        .respond_with(ResponseTemplate::new(413).set_body_json(json!({"message": "too large"})))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .upload_document("huge.bin", vec![0; 64], None, RequestHooks::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(413));
    assert_eq!(err.message(), Some("too large"));
}
