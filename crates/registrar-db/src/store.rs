use async_trait::async_trait;
use chrono::NaiveDate;
use registrar_core::PaginationParams;
use registrar_models::{
    Admin, AdminId, Attendance, AttendanceId, ClassMeeting, ClassMeetingId, Enrollment,
    EnrollmentId, Grade, Intake, IntakeId, Lecturer, LecturerId, ResultId, ResultRecord,
    SessionOffering, SessionOfferingId, Student, StudentId,
};
use uuid::Uuid;

use crate::error::StoreError;

/// A principal whose password can be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    Admin(AdminId),
    Lecturer(LecturerId),
    Student(StudentId),
}

/// Persistence operations used by the API.
///
/// Getters return `StoreError::NotFound` for missing or soft-deleted rows.
/// List operations only return active rows, ordered by creation time.
/// `actor` is the id of the authenticated principal, stamped into audit columns.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError>;

    async fn find_lecturer_by_email(&self, email: &str) -> Result<Option<Lecturer>, StoreError>;

    async fn find_student_by_code(&self, student_code: &str)
    -> Result<Option<Student>, StoreError>;

    async fn get_admin(&self, id: AdminId) -> Result<Admin, StoreError>;

    async fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, StoreError>;

    async fn get_student(&self, id: StudentId) -> Result<Student, StoreError>;

    async fn update_password(&self, account: Account, password_hash: &str)
    -> Result<(), StoreError>;

    async fn get_session_offering(&self, id: SessionOfferingId)
    -> Result<SessionOffering, StoreError>;

    /// Offerings taught by a lecturer, ordered by creation time.
    async fn list_offerings_by_lecturer(
        &self,
        lecturer_id: LecturerId,
        page: &PaginationParams,
    ) -> Result<Vec<SessionOffering>, StoreError>;

    async fn get_intake(&self, id: IntakeId) -> Result<Intake, StoreError>;

    async fn find_active_enrollment(
        &self,
        student_id: StudentId,
        session_offering_id: SessionOfferingId,
    ) -> Result<Option<Enrollment>, StoreError>;

    /// Inserts an enrollment and its empty result row atomically.
    ///
    /// Fails with `StoreError::Conflict` if the student already has an
    /// active enrollment in the offering, even when racing another call.
    async fn create_enrollment(
        &self,
        student_id: StudentId,
        session_offering_id: SessionOfferingId,
        actor: Uuid,
    ) -> Result<(Enrollment, ResultRecord), StoreError>;

    async fn get_enrollment(&self, id: EnrollmentId) -> Result<Enrollment, StoreError>;

    /// Soft-deletes an active enrollment and every active result it owns,
    /// atomically. Returns the number of results withdrawn.
    async fn withdraw_enrollment(&self, id: EnrollmentId, actor: Uuid) -> Result<u64, StoreError>;

    async fn list_enrollments_by_student(
        &self,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, StoreError>;

    async fn list_enrollments_by_offering(
        &self,
        session_offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, StoreError>;

    async fn get_result(&self, id: ResultId) -> Result<ResultRecord, StoreError>;

    async fn list_results_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<ResultRecord>, StoreError>;

    async fn list_results_by_student(
        &self,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<ResultRecord>, StoreError>;

    async fn update_result_marks(
        &self,
        id: ResultId,
        marks: i32,
        grade: Grade,
        actor: Uuid,
    ) -> Result<ResultRecord, StoreError>;

    /// Inserts a class meeting plus one unattended attendance row for every
    /// student actively enrolled in the offering at this moment, atomically.
    async fn create_class_with_attendance(
        &self,
        session_offering_id: SessionOfferingId,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<(ClassMeeting, Vec<Attendance>), StoreError>;

    async fn get_class(&self, id: ClassMeetingId) -> Result<ClassMeeting, StoreError>;

    async fn list_classes_by_offering(
        &self,
        session_offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<ClassMeeting>, StoreError>;

    async fn list_attendance_by_class(
        &self,
        class_meeting_id: ClassMeetingId,
    ) -> Result<Vec<Attendance>, StoreError>;

    async fn get_attendance(&self, id: AttendanceId) -> Result<Attendance, StoreError>;

    async fn update_attendance(
        &self,
        id: AttendanceId,
        attended: bool,
        actor: Uuid,
    ) -> Result<Attendance, StoreError>;
}
