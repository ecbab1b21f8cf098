mod common;

use axum::http::StatusCode;
use common::{STUDENT_CODE, error_message, setup_test_app};
use serde_json::{Value, json};

/// Enrolls the fixture student and returns `(enrollment_id, result_id)`.
async fn enrolled_result(t: &common::TestApp) -> (String, String) {
    let enrollment_id = t.enroll(STUDENT_CODE, t.fx.offering).await;
    let student = t.login_student(STUDENT_CODE).await;
    let (_, body) = t.send("GET", "/api/v1/student/results", Some(&student), None).await;
    let result_id = body["data"][0]["id"].as_str().unwrap().to_string();
    (enrollment_id, result_id)
}

async fn put_marks(t: &common::TestApp, session: &str, result_id: &str, marks: Value) -> (StatusCode, Value) {
    t.send(
        "PUT",
        &format!("/api/v1/results/{result_id}"),
        Some(session),
        Some(json!({ "marks": marks })),
    )
    .await
}

#[tokio::test]
async fn test_lecturer_records_marks_and_grade_is_derived() {
    let t = setup_test_app().await;
    let (_, result_id) = enrolled_result(&t).await;
    let lecturer = t.login_lecturer().await;

    for (marks, grade) in [(75, "A"), (74, "B"), (59, "C"), (40, "D"), (39, "F")] {
        let (status, body) = put_marks(&t, &lecturer, &result_id, json!(marks)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["marks"], marks);
        assert_eq!(body["data"]["grade"], grade);
        assert_eq!(body["data"]["updated_by"], json!(t.fx.lecturer));
    }
}

#[tokio::test]
async fn test_admin_may_record_marks() {
    let t = setup_test_app().await;
    let (_, result_id) = enrolled_result(&t).await;
    let admin = t.login_admin().await;

    let (status, body) = put_marks(&t, &admin, &result_id, json!(100)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["grade"], "A");
}

#[tokio::test]
async fn test_marks_out_of_range_are_bad_request() {
    let t = setup_test_app().await;
    let (_, result_id) = enrolled_result(&t).await;
    let lecturer = t.login_lecturer().await;

    for marks in [json!(101), json!(-1), json!("eighty")] {
        let (status, body) = put_marks(&t, &lecturer, &result_id, marks).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"].is_null());
    }
}

#[tokio::test]
async fn test_students_cannot_record_marks() {
    let t = setup_test_app().await;
    let (_, result_id) = enrolled_result(&t).await;
    let student = t.login_student(STUDENT_CODE).await;

    let (status, _) = put_marks(&t, &student, &result_id, json!(90)).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_get_result_and_missing_result() {
    let t = setup_test_app().await;
    let (enrollment_id, result_id) = enrolled_result(&t).await;
    let student = t.login_student(STUDENT_CODE).await;

    let (status, body) = t
        .send("GET", &format!("/api/v1/results/{result_id}"), Some(&student), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enrollment_id"], enrollment_id.as_str());

    let (status, body) = t
        .send(
            "GET",
            &format!("/api/v1/results/{}", uuid::Uuid::new_v4()),
            Some(&student),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Result not found");
}

#[tokio::test]
async fn test_lecturer_lists_results_of_enrollment_in_own_offering() {
    let t = setup_test_app().await;
    let (enrollment_id, result_id) = enrolled_result(&t).await;
    let uri = format!("/api/v1/lecturer/student-enrolls/{enrollment_id}/results");

    let lecturer = t.login_lecturer().await;
    let (status, body) = t.send("GET", &uri, Some(&lecturer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], result_id.as_str());

    let stranger = t.login_other_lecturer().await;
    let (status, _) = t.send("GET", &uri, Some(&stranger), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
