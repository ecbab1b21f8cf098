#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, NaiveTime, Utc};
use http_body_util::BodyExt;
use registrar::router::init_router;
use registrar::state::AppState;
use registrar_cache::MemoryTokenStore;
use registrar_config::{CorsConfig, SessionConfig};
use registrar_core::hash_password;
use registrar_db::MemoryRecordStore;
use registrar_models::{
    Admin, AdminId, ClassroomId, Intake, IntakeId, Lecturer, LecturerId, ProgramId,
    SessionOffering, SessionOfferingId, Student, StudentId, SubjectId,
};
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PASSWORD: &str = "s3cret-pass";
pub const ADMIN_USERNAME: &str = "registrar";
/// `Basic base64("registrar:s3cret-pass")`
pub const ADMIN_BASIC: &str = "Basic cmVnaXN0cmFyOnMzY3JldC1wYXNz";
/// `Basic base64("registrar:wrong-pass")`
pub const ADMIN_BASIC_WRONG: &str = "Basic cmVnaXN0cmFyOndyb25nLXBhc3M=";

pub const LECTURER_EMAIL: &str = "turing@example.com";
pub const OTHER_LECTURER_EMAIL: &str = "hopper@example.com";
pub const STUDENT_CODE: &str = "S0001";
pub const CLASSMATE_CODE: &str = "S0002";
pub const OUTSIDER_CODE: &str = "S0003";

/// bcrypt is slow; every fixture principal shares one hash.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(PASSWORD).unwrap())
}

pub struct Fixture {
    pub admin: AdminId,
    pub lecturer: LecturerId,
    pub other_lecturer: LecturerId,
    pub student: StudentId,
    pub classmate: StudentId,
    pub outsider: StudentId,
    /// Offering whose intake starts in two days, so enrollment is open.
    pub offering: SessionOfferingId,
    /// Offering whose intake starts in thirty days.
    pub closed_offering: SessionOfferingId,
    /// Open offering taught by the other lecturer.
    pub foreign_offering: SessionOfferingId,
}

pub struct TestApp {
    pub app: Router,
    pub store: MemoryRecordStore,
    pub tokens: MemoryTokenStore,
    pub fx: Fixture,
}

pub async fn setup_test_app() -> TestApp {
    let store = MemoryRecordStore::new();
    let tokens = MemoryTokenStore::new();
    let fx = seed(&store).await;

    let state = AppState::new(
        Arc::new(store.clone()),
        Arc::new(tokens.clone()),
        SessionConfig::default(),
        CorsConfig::parse("http://localhost:5173"),
    );

    TestApp {
        app: init_router(state),
        store,
        tokens,
        fx,
    }
}

async fn seed(store: &MemoryRecordStore) -> Fixture {
    let now = Utc::now();
    let program = ProgramId::new();
    let other_program = ProgramId::new();

    let admin = Admin {
        id: AdminId::new(),
        username: ADMIN_USERNAME.into(),
        password: password_hash().into(),
        created_at: now,
        updated_at: None,
    };
    let lecturer = lecturer_row(LECTURER_EMAIL, "Alan Turing");
    let other_lecturer = lecturer_row(OTHER_LECTURER_EMAIL, "Grace Hopper");

    let open_intake = intake_row("Open intake", now + Duration::days(2));
    let closed_intake = intake_row("Later intake", now + Duration::days(30));

    let student = student_row(STUDENT_CODE, program, open_intake.id);
    let classmate = student_row(CLASSMATE_CODE, program, open_intake.id);
    let outsider = student_row(OUTSIDER_CODE, other_program, open_intake.id);

    let offering = offering_row(lecturer.id, open_intake.id, program);
    let closed_offering = offering_row(lecturer.id, closed_intake.id, program);
    let foreign_offering = offering_row(other_lecturer.id, open_intake.id, program);

    let fx = Fixture {
        admin: admin.id,
        lecturer: lecturer.id,
        other_lecturer: other_lecturer.id,
        student: student.id,
        classmate: classmate.id,
        outsider: outsider.id,
        offering: offering.id,
        closed_offering: closed_offering.id,
        foreign_offering: foreign_offering.id,
    };

    store.insert_admin(admin).await;
    store.insert_lecturer(lecturer).await;
    store.insert_lecturer(other_lecturer).await;
    store.insert_intake(open_intake).await;
    store.insert_intake(closed_intake).await;
    for s in [student, classmate, outsider] {
        store.insert_student(s).await;
    }
    for o in [offering, closed_offering, foreign_offering] {
        store.insert_session_offering(o).await;
    }

    fx
}

fn lecturer_row(email: &str, name: &str) -> Lecturer {
    Lecturer {
        id: LecturerId::new(),
        name: name.into(),
        email: email.into(),
        password: password_hash().into(),
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn intake_row(name: &str, start: chrono::DateTime<Utc>) -> Intake {
    Intake {
        id: IntakeId::new(),
        name: name.into(),
        start_date: start,
        end_date: start + Duration::days(120),
    }
}

fn student_row(code: &str, program: ProgramId, intake: IntakeId) -> Student {
    Student {
        id: StudentId::new(),
        program_id: program,
        intake_id: intake,
        student_code: code.into(),
        name: format!("Student {code}"),
        email: format!("{}@example.com", code.to_lowercase()),
        password: password_hash().into(),
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn offering_row(lecturer: LecturerId, intake: IntakeId, program: ProgramId) -> SessionOffering {
    SessionOffering {
        id: SessionOfferingId::new(),
        subject_id: SubjectId::new(),
        lecturer_id: lecturer,
        intake_id: intake,
        classroom_id: ClassroomId::new(),
        program_id: program,
        day: "Tuesday".into(),
        start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        created_at: Utc::now(),
    }
}

impl TestApp {
    /// Sends a request and returns the status with the parsed body.
    /// Non-JSON bodies come back as `Value::Null`.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        send_to(&self.app, method, uri, session, body).await
    }

    pub async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        dispatch_to(&self.app, request).await
    }

    pub async fn login_admin(&self) -> String {
        self.login("/api/v1/admin/login", json!({ "username": ADMIN_USERNAME, "password": PASSWORD }))
            .await
    }

    pub async fn login_lecturer(&self) -> String {
        self.login("/api/v1/lecturer/login", json!({ "email": LECTURER_EMAIL, "password": PASSWORD }))
            .await
    }

    pub async fn login_other_lecturer(&self) -> String {
        self.login(
            "/api/v1/lecturer/login",
            json!({ "email": OTHER_LECTURER_EMAIL, "password": PASSWORD }),
        )
        .await
    }

    pub async fn login_student(&self, code: &str) -> String {
        self.login("/api/v1/student/login", json!({ "student_code": code, "password": PASSWORD }))
            .await
    }

    async fn login(&self, uri: &str, body: Value) -> String {
        let (status, body) = self.send("POST", uri, None, Some(body)).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["session"].as_str().unwrap().to_string()
    }

    /// Enrolls `code` into `offering` and returns the enrollment id.
    pub async fn enroll(&self, code: &str, offering: SessionOfferingId) -> String {
        let session = self.login_student(code).await;
        let (status, body) = self
            .send(
                "POST",
                "/api/v1/student-enrolls",
                Some(&session),
                Some(json!({ "session_id": offering })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "enroll failed: {body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

/// Like [`TestApp::send`] for a router built outside the fixture.
pub async fn send_to(
    app: &Router,
    method: &str,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        builder = builder.header("session", session);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    dispatch_to(app, request).await
}

pub async fn dispatch_to(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn error_message(body: &Value) -> &str {
    body["errors"][0].as_str().unwrap_or_default()
}
