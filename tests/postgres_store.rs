//! Record store behaviour against a real database.
//!
//! Run with `DATABASE_URL` pointing at a disposable Postgres and
//! `cargo test -- --ignored`.

use chrono::{NaiveDate, Utc};
use registrar_db::{PgRecordStore, RecordStore, StoreError};
use registrar_models::{SessionOfferingId, StudentId};
use sqlx::PgPool;
use uuid::Uuid;

struct Catalog {
    offering: SessionOfferingId,
    students: Vec<StudentId>,
}

async fn seed_catalog(pool: &PgPool, students: usize) -> Catalog {
    let faculty = Uuid::new_v4();
    let program = Uuid::new_v4();
    let intake = Uuid::new_v4();
    let lecturer = Uuid::new_v4();
    let subject = Uuid::new_v4();
    let classroom = Uuid::new_v4();
    let offering = Uuid::new_v4();
    let start = Utc::now() + chrono::Duration::days(2);

    sqlx::query("INSERT INTO faculties (id, name) VALUES ($1, 'Computing')")
        .bind(faculty)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO programs (id, faculty_id, code, name) VALUES ($1, $2, 'CS', 'Computer Science')")
        .bind(program)
        .bind(faculty)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO intakes (id, name, start_date, end_date) VALUES ($1, 'Test', $2, $3)")
        .bind(intake)
        .bind(start)
        .bind(start + chrono::Duration::days(120))
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO lecturers (id, name, email, password) VALUES ($1, 'L', 'l@example.com', 'x')")
        .bind(lecturer)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO subjects (id, code, name) VALUES ($1, 'SUB1', 'Subject')")
        .bind(subject)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO classrooms (id, name) VALUES ($1, 'Room 1')")
        .bind(classroom)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO session_offerings
         (id, subject_id, lecturer_id, intake_id, classroom_id, program_id, day, start_time, end_time)
         VALUES ($1, $2, $3, $4, $5, $6, 'Monday', '09:00', '11:00')",
    )
    .bind(offering)
    .bind(subject)
    .bind(lecturer)
    .bind(intake)
    .bind(classroom)
    .bind(program)
    .execute(pool)
    .await
    .unwrap();

    let mut ids = Vec::with_capacity(students);
    for i in 0..students {
        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO students (id, program_id, intake_id, student_code, name, email, password)
             VALUES ($1, $2, $3, $4, 'S', 's@example.com', 'x')",
        )
        .bind(id)
        .bind(program)
        .bind(intake)
        .bind(format!("S{i:04}"))
        .execute(pool)
        .await
        .unwrap();
        ids.push(StudentId::from(id));
    }

    Catalog {
        offering: SessionOfferingId::from(offering),
        students: ids,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_active_enrollment_is_unique_even_when_racing(pool: PgPool) {
    let catalog = seed_catalog(&pool, 1).await;
    let store = PgRecordStore::new(pool);
    let student = catalog.students[0];

    let attempts: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            let offering = catalog.offering;
            tokio::spawn(async move {
                store
                    .create_enrollment(student, offering, student.into_inner())
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for attempt in attempts {
        match attempt.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, StoreError::Conflict(_)), "{err:?}"),
        }
    }
    assert_eq!(created, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_withdraw_cascades_and_frees_the_slot(pool: PgPool) {
    let catalog = seed_catalog(&pool, 1).await;
    let store = PgRecordStore::new(pool);
    let student = catalog.students[0];
    let actor = Uuid::new_v4();

    let (enrollment, result) = store
        .create_enrollment(student, catalog.offering, actor)
        .await
        .unwrap();
    assert_eq!(result.enrollment_id, enrollment.id);

    assert_eq!(store.withdraw_enrollment(enrollment.id, actor).await.unwrap(), 1);
    assert!(store.list_results_by_enrollment(enrollment.id).await.unwrap().is_empty());
    assert!(matches!(
        store.withdraw_enrollment(enrollment.id, actor).await,
        Err(StoreError::NotFound)
    ));

    store
        .create_enrollment(student, catalog.offering, actor)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires Postgres"]
async fn test_class_fan_out_covers_active_enrollments(pool: PgPool) {
    let catalog = seed_catalog(&pool, 3).await;
    let store = PgRecordStore::new(pool);
    let actor = Uuid::new_v4();

    for student in &catalog.students {
        store
            .create_enrollment(*student, catalog.offering, actor)
            .await
            .unwrap();
    }
    let dropped = store
        .find_active_enrollment(catalog.students[2], catalog.offering)
        .await
        .unwrap()
        .unwrap();
    store.withdraw_enrollment(dropped.id, actor).await.unwrap();

    let (class, rows) = store
        .create_class_with_attendance(
            catalog.offering,
            NaiveDate::from_ymd_opt(2026, 9, 7).unwrap(),
            actor,
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| !r.attended && r.class_meeting_id == class.id));
    assert_eq!(store.list_attendance_by_class(class.id).await.unwrap().len(), 2);
}
