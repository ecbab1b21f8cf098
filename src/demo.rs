//! Demo records for the in-memory backend.
//!
//! A memory-backed server has no database for the CLI seeder to write to, so
//! it starts with one admin, one lecturer, one student and an offering whose
//! enrollment window is open. Every account uses [`DEMO_PASSWORD`].

use chrono::{DateTime, Duration, NaiveTime, Utc};
use registrar_core::hash_password;
use registrar_db::MemoryRecordStore;
use registrar_models::{
    Admin, AdminId, ClassroomId, Intake, IntakeId, Lecturer, LecturerId, ProgramId,
    SessionOffering, SessionOfferingId, Student, StudentId, SubjectId,
};

pub const DEMO_PASSWORD: &str = "password123";
pub const DEMO_ADMIN_USERNAME: &str = "admin";
pub const DEMO_LECTURER_EMAIL: &str = "lecturer@example.com";
pub const DEMO_STUDENT_CODE: &str = "S0001";

/// Days until the demo intake starts; inside the five-day enrollment window.
const OPENS_IN_DAYS: i64 = 3;

#[derive(Debug, Clone)]
pub struct DemoRecords {
    pub admin_id: AdminId,
    pub lecturer_id: LecturerId,
    pub student_id: StudentId,
    pub session_offering_id: SessionOfferingId,
}

pub async fn seed_memory_store(
    store: &MemoryRecordStore,
    now: DateTime<Utc>,
) -> anyhow::Result<DemoRecords> {
    let password = hash_password(DEMO_PASSWORD).map_err(|e| e.error)?;
    let program_id = ProgramId::new();

    let intake = Intake {
        id: IntakeId::new(),
        name: "Demo intake".into(),
        start_date: now + Duration::days(OPENS_IN_DAYS),
        end_date: now + Duration::days(OPENS_IN_DAYS + 120),
    };
    let admin = Admin {
        id: AdminId::new(),
        username: DEMO_ADMIN_USERNAME.into(),
        password: password.clone(),
        created_at: now,
        updated_at: None,
    };
    let lecturer = Lecturer {
        id: LecturerId::new(),
        name: "Demo Lecturer".into(),
        email: DEMO_LECTURER_EMAIL.into(),
        password: password.clone(),
        created_at: now,
        updated_at: None,
    };
    let student = Student {
        id: StudentId::new(),
        program_id,
        intake_id: intake.id,
        student_code: DEMO_STUDENT_CODE.into(),
        name: "Demo Student".into(),
        email: "student@example.com".into(),
        password,
        is_active: true,
        created_at: now,
        updated_at: None,
    };
    let offering = SessionOffering {
        id: SessionOfferingId::new(),
        subject_id: SubjectId::new(),
        lecturer_id: lecturer.id,
        intake_id: intake.id,
        classroom_id: ClassroomId::new(),
        program_id,
        day: "Monday".into(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
        end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap_or_default(),
        created_at: now,
    };

    let records = DemoRecords {
        admin_id: admin.id,
        lecturer_id: lecturer.id,
        student_id: student.id,
        session_offering_id: offering.id,
    };

    store.insert_intake(intake).await;
    store.insert_admin(admin).await;
    store.insert_lecturer(lecturer).await;
    store.insert_student(student).await;
    store.insert_session_offering(offering).await;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::verify_password;
    use registrar_db::RecordStore;

    #[tokio::test]
    async fn demo_offering_is_open_for_the_demo_student() {
        let store = MemoryRecordStore::new();
        let now = Utc::now();

        let records = seed_memory_store(&store, now).await.unwrap();

        let student = store.find_student_by_code(DEMO_STUDENT_CODE).await.unwrap().unwrap();
        assert!(verify_password(DEMO_PASSWORD, &student.password).unwrap());
        let offering = store.get_session_offering(records.session_offering_id).await.unwrap();
        assert_eq!(offering.program_id, student.program_id);
        assert_eq!(offering.lecturer_id, records.lecturer_id);
        let intake = store.get_intake(offering.intake_id).await.unwrap();
        assert!(intake.is_enrollment_open(now));
    }
}
