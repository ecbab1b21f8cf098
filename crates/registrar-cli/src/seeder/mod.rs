//! Demo catalog seeding.
//!
//! One run inserts a faculty, program, intake, lecturer, subject, classroom,
//! a single session offering and a batch of students, all in one transaction.

mod models;

pub use models::{SEED_PASSWORD, SeedConfig, SeedSummary, StudentSeed};

use chrono::{Datelike, NaiveTime, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Word;
use fake::faker::name::en::Name;
use registrar_core::hash_password;
use registrar_models::{
    ClassroomId, FacultyId, IntakeId, LecturerId, ProgramId, SessionOfferingId, StudentId,
    SubjectId,
};
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use crate::CliResult;

const BATCH_SIZE: usize = 500;

/// Student codes are `S<year><sequence>`, unique within a run.
pub fn generate_students(count: usize, year: i32, run_tag: &str) -> Vec<StudentSeed> {
    (0..count)
        .map(|i| {
            let name: String = Name().fake();
            StudentSeed {
                student_code: format!("S{year}{run_tag}{:04}", i + 1),
                email: format!("{}.{}", i + 1, SafeEmail().fake::<String>()),
                name,
            }
        })
        .collect()
}

pub async fn seed_catalog(db: &PgPool, config: SeedConfig) -> CliResult<SeedSummary> {
    let start_time = Instant::now();
    println!("🌱 Seeding demo catalog with {} students...", config.students);

    let password_hash =
        hash_password(SEED_PASSWORD).map_err(|e| format!("Failed to hash password: {}", e.error))?;
    let now = Utc::now();
    let run_tag = format!("{:03}", now.timestamp_subsec_millis());
    let subject_word: String = Word().fake();

    let mut tx = db.begin().await?;

    let faculty_id = FacultyId::new();
    sqlx::query("INSERT INTO faculties (id, name) VALUES ($1, $2)")
        .bind(faculty_id)
        .bind("Faculty of Computing")
        .execute(&mut *tx)
        .await?;

    let program_id = ProgramId::new();
    sqlx::query("INSERT INTO programs (id, faculty_id, code, name) VALUES ($1, $2, $3, $4)")
        .bind(program_id)
        .bind(faculty_id)
        .bind(format!("CS{run_tag}"))
        .bind("Computer Science")
        .execute(&mut *tx)
        .await?;

    let intake_id = IntakeId::new();
    let intake_start = config.intake_start(now);
    sqlx::query("INSERT INTO intakes (id, name, start_date, end_date) VALUES ($1, $2, $3, $4)")
        .bind(intake_id)
        .bind(format!("Intake {}", intake_start.format("%B %Y")))
        .bind(intake_start)
        .bind(intake_start + chrono::Duration::days(120))
        .execute(&mut *tx)
        .await?;

    let lecturer_id = LecturerId::new();
    let lecturer_email = format!("lecturer{run_tag}.{}", SafeEmail().fake::<String>());
    sqlx::query("INSERT INTO lecturers (id, name, email, password) VALUES ($1, $2, $3, $4)")
        .bind(lecturer_id)
        .bind(Name().fake::<String>())
        .bind(&lecturer_email)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await?;

    let subject_id = SubjectId::new();
    sqlx::query("INSERT INTO subjects (id, code, name) VALUES ($1, $2, $3)")
        .bind(subject_id)
        .bind(format!("SUB{run_tag}"))
        .bind(format!("Introduction to {subject_word}"))
        .execute(&mut *tx)
        .await?;

    let classroom_id = ClassroomId::new();
    sqlx::query("INSERT INTO classrooms (id, name) VALUES ($1, $2)")
        .bind(classroom_id)
        .bind("Room 101")
        .execute(&mut *tx)
        .await?;

    let session_offering_id = SessionOfferingId::new();
    sqlx::query(
        "INSERT INTO session_offerings
         (id, subject_id, lecturer_id, intake_id, classroom_id, program_id, day, start_time, end_time)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(session_offering_id)
    .bind(subject_id)
    .bind(lecturer_id)
    .bind(intake_id)
    .bind(classroom_id)
    .bind(program_id)
    .bind("Monday")
    .bind(NaiveTime::from_hms_opt(9, 0, 0).ok_or("invalid start time")?)
    .bind(NaiveTime::from_hms_opt(11, 0, 0).ok_or("invalid end time")?)
    .execute(&mut *tx)
    .await?;

    let students = generate_students(config.students, intake_start.year(), &run_tag);
    for chunk in students.chunks(BATCH_SIZE) {
        insert_students_chunk(&mut tx, chunk, program_id, intake_id, &password_hash).await?;
    }

    tx.commit().await?;

    println!("   ✓ Seeded catalog in {:?}", start_time.elapsed());

    Ok(SeedSummary {
        program_id,
        intake_id,
        lecturer_id,
        lecturer_email,
        session_offering_id,
        student_codes: students.into_iter().map(|s| s.student_code).collect(),
    })
}

async fn insert_students_chunk(
    tx: &mut Transaction<'_, Postgres>,
    students: &[StudentSeed],
    program_id: ProgramId,
    intake_id: IntakeId,
    password_hash: &str,
) -> CliResult<()> {
    if students.is_empty() {
        return Ok(());
    }

    let mut query = String::from(
        "INSERT INTO students (id, program_id, intake_id, student_code, name, email, password) VALUES ",
    );
    for i in 0..students.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 4;
        query.push_str(&format!(
            "(${}, $1, $2, ${}, ${}, ${}, $3)",
            p + 4,
            p + 5,
            p + 6,
            p + 7
        ));
    }

    let mut q = sqlx::query(&query)
        .bind(program_id)
        .bind(intake_id)
        .bind(password_hash);
    for student in students {
        q = q
            .bind(StudentId::new())
            .bind(&student.student_code)
            .bind(&student.name)
            .bind(&student.email);
    }

    q.execute(&mut **tx).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    #[test]
    fn student_codes_are_unique_and_prefixed() {
        let students = generate_students(50, 2026, "042");

        let codes: HashSet<_> = students.iter().map(|s| s.student_code.as_str()).collect();
        assert_eq!(codes.len(), 50);
        assert_eq!(students[0].student_code, "S20260420001");
        assert!(students.iter().all(|s| !s.name.is_empty()));
    }

    #[test]
    fn intake_starts_after_configured_days() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let config = SeedConfig::new(5).with_opens_in_days(4);

        assert_eq!(
            config.intake_start(now),
            Utc.with_ymd_and_hms(2026, 1, 5, 12, 0, 0).unwrap()
        );
    }
}
