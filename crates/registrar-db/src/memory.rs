//! In-process [`RecordStore`].
//!
//! Every operation takes the same lock, so multi-row writes are atomic and
//! the active-enrollment uniqueness check cannot race. Rows are kept in
//! insertion order, which doubles as creation order for listings.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use registrar_core::{PaginationParams, SortDirection};
use registrar_models::{
    Admin, AdminId, Attendance, AttendanceId, ClassMeeting, ClassMeetingId, Enrollment,
    EnrollmentId, Grade, Intake, IntakeId, Lecturer, LecturerId, ResultId, ResultRecord,
    SessionOffering, SessionOfferingId, Student, StudentId,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{Account, RecordStore};

#[derive(Debug, Default)]
struct Tables {
    admins: Vec<Admin>,
    lecturers: Vec<Lecturer>,
    students: Vec<Student>,
    intakes: Vec<Intake>,
    offerings: Vec<SessionOffering>,
    enrollments: Vec<Enrollment>,
    results: Vec<ResultRecord>,
    classes: Vec<ClassMeeting>,
    attendances: Vec<Attendance>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    tables: Arc<Mutex<Tables>>,
}

fn page_of<T: Clone>(rows: Vec<T>, page: &PaginationParams) -> Vec<T> {
    let mut rows = rows;
    if page.dir() == SortDirection::Desc {
        rows.reverse();
    }
    page.apply(rows)
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_admin(&self, admin: Admin) {
        self.tables.lock().await.admins.push(admin);
    }

    pub async fn insert_lecturer(&self, lecturer: Lecturer) {
        self.tables.lock().await.lecturers.push(lecturer);
    }

    pub async fn insert_student(&self, student: Student) {
        self.tables.lock().await.students.push(student);
    }

    pub async fn insert_intake(&self, intake: Intake) {
        self.tables.lock().await.intakes.push(intake);
    }

    pub async fn insert_session_offering(&self, offering: SessionOffering) {
        self.tables.lock().await.offerings.push(offering);
    }

    /// All enrollment rows for a student, withdrawn ones included.
    pub async fn enrollment_history(&self, student_id: StudentId) -> Vec<Enrollment> {
        self.tables
            .lock()
            .await
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect()
    }

    /// All result rows for an enrollment, withdrawn ones included.
    pub async fn result_history(&self, enrollment_id: EnrollmentId) -> Vec<ResultRecord> {
        self.tables
            .lock()
            .await
            .results
            .iter()
            .filter(|r| r.enrollment_id == enrollment_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.admins.iter().find(|a| a.username == username).cloned())
    }

    async fn find_lecturer_by_email(&self, email: &str) -> Result<Option<Lecturer>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .lecturers
            .iter()
            .find(|l| l.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_student_by_code(
        &self,
        student_code: &str,
    ) -> Result<Option<Student>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .students
            .iter()
            .find(|s| s.student_code == student_code && s.is_active)
            .cloned())
    }

    async fn get_admin(&self, id: AdminId) -> Result<Admin, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .admins
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .lecturers
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_student(&self, id: StudentId) -> Result<Student, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_password(
        &self,
        account: Account,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let (password, updated_at) = match account {
            Account::Admin(id) => tables
                .admins
                .iter_mut()
                .find(|a| a.id == id)
                .map(|a| (&mut a.password, &mut a.updated_at)),
            Account::Lecturer(id) => tables
                .lecturers
                .iter_mut()
                .find(|l| l.id == id)
                .map(|l| (&mut l.password, &mut l.updated_at)),
            Account::Student(id) => tables
                .students
                .iter_mut()
                .find(|s| s.id == id)
                .map(|s| (&mut s.password, &mut s.updated_at)),
        }
        .ok_or(StoreError::NotFound)?;

        *password = password_hash.to_string();
        *updated_at = Some(now);
        Ok(())
    }

    async fn get_session_offering(
        &self,
        id: SessionOfferingId,
    ) -> Result<SessionOffering, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .offerings
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_offerings_by_lecturer(
        &self,
        lecturer_id: LecturerId,
        page: &PaginationParams,
    ) -> Result<Vec<SessionOffering>, StoreError> {
        let tables = self.tables.lock().await;
        let rows = tables
            .offerings
            .iter()
            .filter(|o| o.lecturer_id == lecturer_id)
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }

    async fn get_intake(&self, id: IntakeId) -> Result<Intake, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .intakes
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_active_enrollment(
        &self,
        student_id: StudentId,
        session_offering_id: SessionOfferingId,
    ) -> Result<Option<Enrollment>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .enrollments
            .iter()
            .find(|e| {
                e.student_id == student_id
                    && e.session_offering_id == session_offering_id
                    && e.is_active()
            })
            .cloned())
    }

    async fn create_enrollment(
        &self,
        student_id: StudentId,
        session_offering_id: SessionOfferingId,
        actor: Uuid,
    ) -> Result<(Enrollment, ResultRecord), StoreError> {
        let mut tables = self.tables.lock().await;

        let duplicate = tables.enrollments.iter().any(|e| {
            e.student_id == student_id
                && e.session_offering_id == session_offering_id
                && e.is_active()
        });
        if duplicate {
            return Err(StoreError::Conflict(
                "active enrollment already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let enrollment = Enrollment {
            id: EnrollmentId::new(),
            session_offering_id,
            student_id,
            is_delete: false,
            created_by: actor,
            created_at: now,
            updated_by: None,
            updated_at: None,
        };
        let result = ResultRecord {
            id: ResultId::new(),
            enrollment_id: enrollment.id,
            marks: None,
            grade: None,
            is_delete: false,
            created_by: actor,
            created_at: now,
            updated_by: None,
            updated_at: None,
        };

        tables.enrollments.push(enrollment.clone());
        tables.results.push(result.clone());

        Ok((enrollment, result))
    }

    async fn get_enrollment(&self, id: EnrollmentId) -> Result<Enrollment, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .enrollments
            .iter()
            .find(|e| e.id == id && e.is_active())
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn withdraw_enrollment(&self, id: EnrollmentId, actor: Uuid) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let enrollment = tables
            .enrollments
            .iter_mut()
            .find(|e| e.id == id && e.is_active())
            .ok_or(StoreError::NotFound)?;
        enrollment.is_delete = true;
        enrollment.updated_by = Some(actor);
        enrollment.updated_at = Some(now);

        let mut withdrawn = 0;
        for result in tables
            .results
            .iter_mut()
            .filter(|r| r.enrollment_id == id && !r.is_delete)
        {
            result.is_delete = true;
            result.updated_by = Some(actor);
            result.updated_at = Some(now);
            withdrawn += 1;
        }

        Ok(withdrawn)
    }

    async fn list_enrollments_by_student(
        &self,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, StoreError> {
        let tables = self.tables.lock().await;
        let rows = tables
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id && e.is_active())
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }

    async fn list_enrollments_by_offering(
        &self,
        session_offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, StoreError> {
        let tables = self.tables.lock().await;
        let rows = tables
            .enrollments
            .iter()
            .filter(|e| e.session_offering_id == session_offering_id && e.is_active())
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }

    async fn get_result(&self, id: ResultId) -> Result<ResultRecord, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .results
            .iter()
            .find(|r| r.id == id && !r.is_delete)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_results_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<ResultRecord>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .results
            .iter()
            .filter(|r| r.enrollment_id == enrollment_id && !r.is_delete)
            .cloned()
            .collect())
    }

    async fn list_results_by_student(
        &self,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<ResultRecord>, StoreError> {
        let tables = self.tables.lock().await;
        let rows = tables
            .results
            .iter()
            .filter(|r| !r.is_delete)
            .filter(|r| {
                tables
                    .enrollments
                    .iter()
                    .any(|e| e.id == r.enrollment_id && e.student_id == student_id && e.is_active())
            })
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }

    async fn update_result_marks(
        &self,
        id: ResultId,
        marks: i32,
        grade: Grade,
        actor: Uuid,
    ) -> Result<ResultRecord, StoreError> {
        let mut tables = self.tables.lock().await;
        let result = tables
            .results
            .iter_mut()
            .find(|r| r.id == id && !r.is_delete)
            .ok_or(StoreError::NotFound)?;

        result.marks = Some(marks);
        result.grade = Some(grade);
        result.updated_by = Some(actor);
        result.updated_at = Some(Utc::now());

        Ok(result.clone())
    }

    async fn create_class_with_attendance(
        &self,
        session_offering_id: SessionOfferingId,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<(ClassMeeting, Vec<Attendance>), StoreError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();

        let class = ClassMeeting {
            id: ClassMeetingId::new(),
            session_offering_id,
            date,
            is_delete: false,
            created_by: actor,
            created_at: now,
            updated_by: None,
            updated_at: None,
        };

        let attendances: Vec<Attendance> = tables
            .enrollments
            .iter()
            .filter(|e| e.session_offering_id == session_offering_id && e.is_active())
            .map(|e| Attendance {
                id: AttendanceId::new(),
                class_meeting_id: class.id,
                student_id: e.student_id,
                attended: false,
                created_by: actor,
                created_at: now,
                updated_by: None,
                updated_at: None,
            })
            .collect();

        tables.classes.push(class.clone());
        tables.attendances.extend(attendances.iter().cloned());

        Ok((class, attendances))
    }

    async fn get_class(&self, id: ClassMeetingId) -> Result<ClassMeeting, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .classes
            .iter()
            .find(|c| c.id == id && !c.is_delete)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_classes_by_offering(
        &self,
        session_offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<ClassMeeting>, StoreError> {
        let tables = self.tables.lock().await;
        let rows = tables
            .classes
            .iter()
            .filter(|c| c.session_offering_id == session_offering_id && !c.is_delete)
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }

    async fn list_attendance_by_class(
        &self,
        class_meeting_id: ClassMeetingId,
    ) -> Result<Vec<Attendance>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .attendances
            .iter()
            .filter(|a| a.class_meeting_id == class_meeting_id)
            .cloned()
            .collect())
    }

    async fn get_attendance(&self, id: AttendanceId) -> Result<Attendance, StoreError> {
        let tables = self.tables.lock().await;
        tables
            .attendances
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update_attendance(
        &self,
        id: AttendanceId,
        attended: bool,
        actor: Uuid,
    ) -> Result<Attendance, StoreError> {
        let mut tables = self.tables.lock().await;
        let attendance = tables
            .attendances
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;

        attendance.attended = attended;
        attendance.updated_by = Some(actor);
        attendance.updated_at = Some(Utc::now());

        Ok(attendance.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (StudentId, SessionOfferingId, Uuid) {
        (StudentId::new(), SessionOfferingId::new(), Uuid::new_v4())
    }

    #[tokio::test]
    async fn create_enrollment_writes_enrollment_and_empty_result() {
        let store = MemoryRecordStore::new();
        let (student, offering, actor) = ids();

        let (enrollment, result) = store
            .create_enrollment(student, offering, actor)
            .await
            .unwrap();

        assert_eq!(result.enrollment_id, enrollment.id);
        assert_eq!(result.marks, None);
        assert_eq!(result.grade, None);
        assert_eq!(enrollment.created_by, actor);
        assert_eq!(
            store.list_results_by_enrollment(enrollment.id).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn second_active_enrollment_conflicts() {
        let store = MemoryRecordStore::new();
        let (student, offering, actor) = ids();

        store.create_enrollment(student, offering, actor).await.unwrap();
        let err = store
            .create_enrollment(student, offering, actor)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn concurrent_enrollments_create_exactly_one() {
        let store = MemoryRecordStore::new();
        let (student, offering, actor) = ids();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create_enrollment(student, offering, actor).await })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.enrollment_history(student).await.len(), 1);
    }

    #[tokio::test]
    async fn withdraw_cascades_to_results_and_frees_the_slot() {
        let store = MemoryRecordStore::new();
        let (student, offering, actor) = ids();
        let (enrollment, _) = store
            .create_enrollment(student, offering, actor)
            .await
            .unwrap();

        let withdrawn = store.withdraw_enrollment(enrollment.id, actor).await.unwrap();

        assert_eq!(withdrawn, 1);
        assert!(store.list_results_by_enrollment(enrollment.id).await.unwrap().is_empty());
        assert!(store.result_history(enrollment.id).await.iter().all(|r| r.is_delete));
        assert!(matches!(
            store.get_enrollment(enrollment.id).await.unwrap_err(),
            StoreError::NotFound
        ));
        assert!(store.create_enrollment(student, offering, actor).await.is_ok());
    }

    #[tokio::test]
    async fn withdrawing_twice_is_not_found() {
        let store = MemoryRecordStore::new();
        let (student, offering, actor) = ids();
        let (enrollment, _) = store
            .create_enrollment(student, offering, actor)
            .await
            .unwrap();

        store.withdraw_enrollment(enrollment.id, actor).await.unwrap();
        let err = store
            .withdraw_enrollment(enrollment.id, actor)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn class_fan_out_skips_withdrawn_enrollments() {
        let store = MemoryRecordStore::new();
        let offering = SessionOfferingId::new();
        let actor = Uuid::new_v4();

        let (kept, _) = store
            .create_enrollment(StudentId::new(), offering, actor)
            .await
            .unwrap();
        let (dropped, _) = store
            .create_enrollment(StudentId::new(), offering, actor)
            .await
            .unwrap();
        store.withdraw_enrollment(dropped.id, actor).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
        let (class, attendances) = store
            .create_class_with_attendance(offering, date, actor)
            .await
            .unwrap();

        assert_eq!(attendances.len(), 1);
        assert_eq!(attendances[0].student_id, kept.student_id);
        assert!(!attendances[0].attended);
        assert_eq!(attendances[0].class_meeting_id, class.id);
    }

    #[tokio::test]
    async fn listing_respects_direction_and_limit() {
        let store = MemoryRecordStore::new();
        let student = StudentId::new();
        let actor = Uuid::new_v4();
        let mut created = Vec::new();
        for _ in 0..3 {
            let (e, _) = store
                .create_enrollment(student, SessionOfferingId::new(), actor)
                .await
                .unwrap();
            created.push(e.id);
        }

        let page = PaginationParams {
            limit: Some(2),
            dir: Some("desc".into()),
            ..Default::default()
        };
        let listed: Vec<_> = store
            .list_enrollments_by_student(student, &page)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(listed, vec![created[2], created[1]]);
    }
}
