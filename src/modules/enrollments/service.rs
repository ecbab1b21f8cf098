use chrono::{DateTime, Utc};
use registrar_core::{AppError, PaginationParams};
use registrar_db::{RecordStore, StoreError};
use registrar_models::{
    Enrollment, EnrollmentId, EnrollmentResponse, LecturerId, SessionOfferingId, StudentId,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::{
    track_enrollment_created, track_enrollment_rejected, track_enrollment_withdrawn,
};
use crate::utils::auth_helpers::lecturer_offering;
use crate::utils::errors::{store_failure, store_internal};

const COMPONENT: &str = "module/enrollment";

pub const ALREADY_ENROLLED: &str = "You have already enrolled in this session";
pub const INVALID_TIME_TO_ENROLL: &str = "Invalid Time To Enroll";
pub const NOT_YOUR_PROGRAM: &str = "This Session Is Not For Your Program";
pub const ENROLLMENT_NOT_FOUND: &str = "Enrollment not found";

pub struct EnrollmentService;

impl EnrollmentService {
    /// Enrolls a student into a session offering.
    ///
    /// Checks run in a fixed order and the first failure wins: student,
    /// offering, duplicate, enrollment window, program. The enrollment and
    /// its empty result row are then written together.
    #[instrument(skip(store))]
    pub async fn enroll(
        store: &dyn RecordStore,
        student_id: StudentId,
        offering_id: SessionOfferingId,
        now: DateTime<Utc>,
    ) -> Result<EnrollmentResponse, AppError> {
        let student = store
            .get_student(student_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "Enroll/GetOneStudent"))?;

        let session = store
            .get_session_offering(offering_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "Enroll/GetOneSession"))?;

        let existing = store
            .find_active_enrollment(student_id, offering_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "Enroll/GetOneStudentEnroll"))?;
        if existing.is_some() {
            return Err(reject("duplicate", ALREADY_ENROLLED, "Enroll/CheckDuplicate"));
        }

        let intake = store
            .get_intake(session.intake_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "Enroll/GetOneIntake"))?;
        if !intake.is_enrollment_open(now) {
            return Err(reject("window", INVALID_TIME_TO_ENROLL, "Enroll/CheckTime"));
        }

        if session.program_id != student.program_id {
            return Err(reject("program", NOT_YOUR_PROGRAM, "Enroll/CheckProgram"));
        }

        let (enrollment, _result) = store
            .create_enrollment(student_id, offering_id, student_id.into_inner())
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    reject("duplicate", ALREADY_ENROLLED, "Enroll/InsertStudentEnroll")
                }
                other => store_internal(other, COMPONENT, "Enroll/InsertStudentEnroll"),
            })?;

        track_enrollment_created();
        info!(enrollment_id = %enrollment.id, "Student enrolled");

        Ok(EnrollmentResponse {
            enrollment,
            session,
            student,
        })
    }

    /// Withdraws an active enrollment together with its results.
    #[instrument(skip(store))]
    pub async fn withdraw(
        store: &dyn RecordStore,
        id: EnrollmentId,
        actor: Uuid,
    ) -> Result<(), AppError> {
        let results = store
            .withdraw_enrollment(id, actor)
            .await
            .map_err(|e| {
                store_failure(e, ENROLLMENT_NOT_FOUND, COMPONENT, "Withdraw/DeleteStudentEnroll")
            })?;

        track_enrollment_withdrawn();
        info!(enrollment_id = %id, results, "Enrollment withdrawn");
        Ok(())
    }

    #[instrument(skip(store))]
    pub async fn get_enrollment(
        store: &dyn RecordStore,
        id: EnrollmentId,
    ) -> Result<EnrollmentResponse, AppError> {
        let enrollment = store
            .get_enrollment(id)
            .await
            .map_err(|e| {
                store_failure(e, ENROLLMENT_NOT_FOUND, COMPONENT, "GetOne/GetOneStudentEnroll")
            })?;
        let session = store
            .get_session_offering(enrollment.session_offering_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "GetOne/GetOneSession"))?;
        let student = store
            .get_student(enrollment.student_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "GetOne/GetOneStudent"))?;

        Ok(EnrollmentResponse {
            enrollment,
            session,
            student,
        })
    }

    #[instrument(skip(store))]
    pub async fn list_for_student(
        store: &dyn RecordStore,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, AppError> {
        store
            .list_enrollments_by_student(student_id, page)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "ListByStudent/GetStudentEnrolls"))
    }

    /// Enrollments of an offering taught by `lecturer_id`.
    #[instrument(skip(store))]
    pub async fn list_for_offering(
        store: &dyn RecordStore,
        lecturer_id: LecturerId,
        offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, AppError> {
        lecturer_offering(store, lecturer_id, offering_id).await?;

        store
            .list_enrollments_by_offering(offering_id, page)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "ListBySession/GetStudentEnrolls"))
    }
}

fn reject(reason: &'static str, message: &'static str, operation: &str) -> AppError {
    track_enrollment_rejected(reason);
    AppError::domain(message).tagged(COMPONENT, operation)
}
