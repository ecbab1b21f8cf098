mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{CLASSMATE_CODE, OUTSIDER_CODE, STUDENT_CODE, error_message, setup_test_app};
use registrar::modules::enrollments::service::{
    ALREADY_ENROLLED, ENROLLMENT_NOT_FOUND, INVALID_TIME_TO_ENROLL, NOT_YOUR_PROGRAM,
};
use registrar_db::RecordStore;
use registrar_models::{EnrollmentId, SessionOfferingId};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_enroll_creates_enrollment_and_result_placeholder() {
    let t = setup_test_app().await;
    let session = t.login_student(STUDENT_CODE).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/v1/student-enrolls",
            Some(&session),
            Some(json!({ "session_id": t.fx.offering })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["student_id"], json!(t.fx.student));
    assert_eq!(data["session_offering_id"], json!(t.fx.offering));
    assert_eq!(data["session"]["id"], json!(t.fx.offering));
    assert_eq!(data["student"]["student_code"], STUDENT_CODE);
    assert_eq!(data["created_by"], json!(t.fx.student));

    let (status, body) = t.send("GET", "/api/v1/student/results", Some(&session), None).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["enrollment_id"], data["id"]);
    assert!(results[0]["marks"].is_null());
    assert!(results[0]["grade"].is_null());
}

#[tokio::test]
async fn test_duplicate_enrollment_is_rejected() {
    let t = setup_test_app().await;
    t.enroll(STUDENT_CODE, t.fx.offering).await;
    let session = t.login_student(STUDENT_CODE).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/v1/student-enrolls",
            Some(&session),
            Some(json!({ "session_id": t.fx.offering })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), ALREADY_ENROLLED);
    assert_eq!(t.store.enrollment_history(t.fx.student).await.len(), 1);
}

#[tokio::test]
async fn test_concurrent_enrollments_admit_exactly_one() {
    let t = setup_test_app().await;
    let session = t.login_student(STUDENT_CODE).await;
    let payload = serde_json::to_vec(&json!({ "session_id": t.fx.offering })).unwrap();

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let app = t.app.clone();
            let request = Request::builder()
                .method("POST")
                .uri("/api/v1/student-enrolls")
                .header("session", &session)
                .header("content-type", "application/json")
                .body(Body::from(payload.clone()))
                .unwrap();
            tokio::spawn(async move { app.oneshot(request).await.unwrap().status() })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            StatusCode::CREATED => created += 1,
            other => assert_eq!(other, StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(t.store.enrollment_history(t.fx.student).await.len(), 1);
}

#[tokio::test]
async fn test_enrollment_outside_window_is_rejected() {
    let t = setup_test_app().await;
    let session = t.login_student(STUDENT_CODE).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/v1/student-enrolls",
            Some(&session),
            Some(json!({ "session_id": t.fx.closed_offering })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), INVALID_TIME_TO_ENROLL);
    assert!(t.store.enrollment_history(t.fx.student).await.is_empty());
}

#[tokio::test]
async fn test_enrollment_into_other_program_is_rejected() {
    let t = setup_test_app().await;
    let session = t.login_student(OUTSIDER_CODE).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/v1/student-enrolls",
            Some(&session),
            Some(json!({ "session_id": t.fx.offering })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), NOT_YOUR_PROGRAM);
}

#[tokio::test]
async fn test_unknown_offering_is_internal_error() {
    let t = setup_test_app().await;
    let session = t.login_student(STUDENT_CODE).await;

    let (status, body) = t
        .send(
            "POST",
            "/api/v1/student-enrolls",
            Some(&session),
            Some(json!({ "session_id": SessionOfferingId::new() })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_message(&body), "Internal Server Error");
}

#[tokio::test]
async fn test_malformed_enroll_body_is_bad_request() {
    let t = setup_test_app().await;
    let session = t.login_student(STUDENT_CODE).await;

    let (status, _) = t
        .send(
            "POST",
            "/api/v1/student-enrolls",
            Some(&session),
            Some(json!({ "session_id": "not-a-uuid" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_withdraw_cascades_and_allows_reenrollment() {
    let t = setup_test_app().await;
    let enrollment_id = t.enroll(STUDENT_CODE, t.fx.offering).await;
    let admin = t.login_admin().await;
    let student = t.login_student(STUDENT_CODE).await;
    let uri = format!("/api/v1/student-enrolls/{enrollment_id}");

    let (status, _) = t.send("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = t.send("GET", &uri, Some(&student), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), ENROLLMENT_NOT_FOUND);

    let id: EnrollmentId = enrollment_id.parse().unwrap();
    assert!(t.store.list_results_by_enrollment(id).await.unwrap().is_empty());
    assert!(t.store.result_history(id).await.iter().all(|r| r.is_delete));

    let (_, body) = t.send("GET", "/api/v1/student/results", Some(&student), None).await;
    assert_eq!(body["data"], json!([]));

    let again = t.enroll(STUDENT_CODE, t.fx.offering).await;
    assert_ne!(again, enrollment_id);
}

#[tokio::test]
async fn test_withdrawing_twice_is_not_found() {
    let t = setup_test_app().await;
    let enrollment_id = t.enroll(STUDENT_CODE, t.fx.offering).await;
    let admin = t.login_admin().await;
    let uri = format!("/api/v1/student-enrolls/{enrollment_id}");

    let (status, _) = t.send("DELETE", &uri, Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = t.send("DELETE", &uri, Some(&admin), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), ENROLLMENT_NOT_FOUND);
}

#[tokio::test]
async fn test_get_enrollment_returns_nested_response() {
    let t = setup_test_app().await;
    let enrollment_id = t.enroll(STUDENT_CODE, t.fx.offering).await;
    let lecturer = t.login_lecturer().await;

    let (status, body) = t
        .send(
            "GET",
            &format!("/api/v1/student-enrolls/{enrollment_id}"),
            Some(&lecturer),
            None,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], enrollment_id.as_str());
    assert_eq!(body["data"]["session"]["id"], json!(t.fx.offering));
    assert_eq!(body["data"]["student"]["student_code"], STUDENT_CODE);
}

#[tokio::test]
async fn test_student_lists_only_own_enrollments() {
    let t = setup_test_app().await;
    let mine = t.enroll(STUDENT_CODE, t.fx.offering).await;
    t.enroll(STUDENT_CODE, t.fx.foreign_offering).await;
    t.enroll(CLASSMATE_CODE, t.fx.offering).await;
    let session = t.login_student(STUDENT_CODE).await;

    let (status, body) = t
        .send("GET", "/api/v1/student/student-enrolls", Some(&session), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|e| e["student_id"] == json!(t.fx.student)));
    assert_eq!(listed[0]["id"], mine.as_str());

    let (_, body) = t
        .send("GET", "/api/v1/student/student-enrolls?limit=1&dir=desc", Some(&session), None)
        .await;
    let listed = body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_ne!(listed[0]["id"], mine.as_str());
}

#[tokio::test]
async fn test_lecturer_lists_enrollments_of_own_offering_only() {
    let t = setup_test_app().await;
    t.enroll(STUDENT_CODE, t.fx.offering).await;
    t.enroll(CLASSMATE_CODE, t.fx.offering).await;
    let lecturer = t.login_lecturer().await;

    let (status, body) = t
        .send(
            "GET",
            &format!("/api/v1/lecturer/sessions/{}/student-enrolls", t.fx.offering),
            Some(&lecturer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = t
        .send(
            "GET",
            &format!("/api/v1/lecturer/sessions/{}/student-enrolls", t.fx.foreign_offering),
            Some(&lecturer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error_message(&body), "This Session Is Not Yours");

    let (status, _) = t
        .send(
            "GET",
            &format!("/api/v1/lecturer/sessions/{}/student-enrolls", SessionOfferingId::new()),
            Some(&lecturer),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
