use async_trait::async_trait;
use chrono::NaiveDate;
use registrar_core::PaginationParams;
use registrar_models::{
    Admin, AdminId, Attendance, AttendanceId, ClassMeeting, ClassMeetingId, Enrollment,
    EnrollmentId, Grade, Intake, IntakeId, Lecturer, LecturerId, ResultId, ResultRecord,
    SessionOffering, SessionOfferingId, Student, StudentId,
};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{Account, RecordStore};

const ADMIN_COLUMNS: &str = "id, username, password, created_at, updated_at";
const LECTURER_COLUMNS: &str = "id, name, email, password, created_at, updated_at";
const STUDENT_COLUMNS: &str = "id, program_id, intake_id, student_code, name, email, password, \
     is_active, created_at, updated_at";
const ENROLLMENT_COLUMNS: &str = "id, session_offering_id, student_id, is_delete, \
     created_by, created_at, updated_by, updated_at";
const RESULT_COLUMNS: &str = "id, enrollment_id, marks, grade, is_delete, \
     created_by, created_at, updated_by, updated_at";
const CLASS_COLUMNS: &str = "id, session_offering_id, date, is_delete, \
     created_by, created_at, updated_by, updated_at";
const ATTENDANCE_COLUMNS: &str = "id, class_meeting_id, student_id, attended, \
     created_by, created_at, updated_by, updated_at";

#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[instrument(skip(self))]
    async fn find_admin_by_username(&self, username: &str) -> Result<Option<Admin>, StoreError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE username = $1");
        Ok(sqlx::query_as::<_, Admin>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_lecturer_by_email(&self, email: &str) -> Result<Option<Lecturer>, StoreError> {
        let sql = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE LOWER(email) = LOWER($1)");
        Ok(sqlx::query_as::<_, Lecturer>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn find_student_by_code(
        &self,
        student_code: &str,
    ) -> Result<Option<Student>, StoreError> {
        let sql = format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE student_code = $1 AND is_active"
        );
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(student_code)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_admin(&self, id: AdminId) -> Result<Admin, StoreError> {
        let sql = format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1");
        Ok(sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_lecturer(&self, id: LecturerId) -> Result<Lecturer, StoreError> {
        let sql = format!("SELECT {LECTURER_COLUMNS} FROM lecturers WHERE id = $1");
        Ok(sqlx::query_as::<_, Lecturer>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_student(&self, id: StudentId) -> Result<Student, StoreError> {
        let sql = format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1");
        Ok(sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(
        &self,
        account: Account,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let (table, id) = match account {
            Account::Admin(id) => ("admins", id.into_inner()),
            Account::Lecturer(id) => ("lecturers", id.into_inner()),
            Account::Student(id) => ("students", id.into_inner()),
        };
        let sql = format!("UPDATE {table} SET password = $2, updated_at = NOW() WHERE id = $1");

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_session_offering(
        &self,
        id: SessionOfferingId,
    ) -> Result<SessionOffering, StoreError> {
        Ok(sqlx::query_as::<_, SessionOffering>(
            r#"
            SELECT id, subject_id, lecturer_id, intake_id, classroom_id, program_id,
                   day, start_time, end_time, created_at
            FROM session_offerings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?)
    }

    #[instrument(skip(self))]
    async fn list_offerings_by_lecturer(
        &self,
        lecturer_id: LecturerId,
        page: &PaginationParams,
    ) -> Result<Vec<SessionOffering>, StoreError> {
        let sql = format!(
            "SELECT id, subject_id, lecturer_id, intake_id, classroom_id, program_id, \
                    day, start_time, end_time, created_at \
             FROM session_offerings \
             WHERE lecturer_id = $1 \
             ORDER BY created_at {} LIMIT $2 OFFSET $3",
            page.dir().as_sql()
        );
        Ok(sqlx::query_as::<_, SessionOffering>(&sql)
            .bind(lecturer_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_intake(&self, id: IntakeId) -> Result<Intake, StoreError> {
        Ok(sqlx::query_as::<_, Intake>(
            "SELECT id, name, start_date, end_date FROM intakes WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?)
    }

    #[instrument(skip(self))]
    async fn find_active_enrollment(
        &self,
        student_id: StudentId,
        session_offering_id: SessionOfferingId,
    ) -> Result<Option<Enrollment>, StoreError> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments \
             WHERE student_id = $1 AND session_offering_id = $2 AND NOT is_delete"
        );
        Ok(sqlx::query_as::<_, Enrollment>(&sql)
            .bind(student_id)
            .bind(session_offering_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn create_enrollment(
        &self,
        student_id: StudentId,
        session_offering_id: SessionOfferingId,
        actor: Uuid,
    ) -> Result<(Enrollment, ResultRecord), StoreError> {
        let mut tx = self.pool.begin().await?;

        // the partial unique index on active rows turns a racing insert into a conflict
        let sql = format!(
            "INSERT INTO enrollments (id, session_offering_id, student_id, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING {ENROLLMENT_COLUMNS}"
        );
        let enrollment = sqlx::query_as::<_, Enrollment>(&sql)
            .bind(EnrollmentId::new())
            .bind(session_offering_id)
            .bind(student_id)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

        let sql = format!(
            "INSERT INTO results (id, enrollment_id, created_by) \
             VALUES ($1, $2, $3) RETURNING {RESULT_COLUMNS}"
        );
        let result = sqlx::query_as::<_, ResultRecord>(&sql)
            .bind(ResultId::new())
            .bind(enrollment.id)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((enrollment, result))
    }

    #[instrument(skip(self))]
    async fn get_enrollment(&self, id: EnrollmentId) -> Result<Enrollment, StoreError> {
        let sql =
            format!("SELECT {ENROLLMENT_COLUMNS} FROM enrollments WHERE id = $1 AND NOT is_delete");
        Ok(sqlx::query_as::<_, Enrollment>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn withdraw_enrollment(&self, id: EnrollmentId, actor: Uuid) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let withdrawn = sqlx::query(
            r#"
            UPDATE enrollments
            SET is_delete = TRUE, updated_by = $2, updated_at = NOW()
            WHERE id = $1 AND NOT is_delete
            "#,
        )
        .bind(id)
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        if withdrawn.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        let results = sqlx::query(
            r#"
            UPDATE results
            SET is_delete = TRUE, updated_by = $2, updated_at = NOW()
            WHERE enrollment_id = $1 AND NOT is_delete
            "#,
        )
        .bind(id)
        .bind(actor)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(results.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_enrollments_by_student(
        &self,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, StoreError> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments \
             WHERE student_id = $1 AND NOT is_delete \
             ORDER BY created_at {} LIMIT $2 OFFSET $3",
            page.dir().as_sql()
        );
        Ok(sqlx::query_as::<_, Enrollment>(&sql)
            .bind(student_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn list_enrollments_by_offering(
        &self,
        session_offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<Enrollment>, StoreError> {
        let sql = format!(
            "SELECT {ENROLLMENT_COLUMNS} FROM enrollments \
             WHERE session_offering_id = $1 AND NOT is_delete \
             ORDER BY created_at {} LIMIT $2 OFFSET $3",
            page.dir().as_sql()
        );
        Ok(sqlx::query_as::<_, Enrollment>(&sql)
            .bind(session_offering_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_result(&self, id: ResultId) -> Result<ResultRecord, StoreError> {
        let sql = format!("SELECT {RESULT_COLUMNS} FROM results WHERE id = $1 AND NOT is_delete");
        Ok(sqlx::query_as::<_, ResultRecord>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn list_results_by_enrollment(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<ResultRecord>, StoreError> {
        let sql = format!(
            "SELECT {RESULT_COLUMNS} FROM results \
             WHERE enrollment_id = $1 AND NOT is_delete ORDER BY created_at"
        );
        Ok(sqlx::query_as::<_, ResultRecord>(&sql)
            .bind(enrollment_id)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn list_results_by_student(
        &self,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<ResultRecord>, StoreError> {
        let sql = format!(
            "SELECT r.id, r.enrollment_id, r.marks, r.grade, r.is_delete, \
                    r.created_by, r.created_at, r.updated_by, r.updated_at \
             FROM results r \
             JOIN enrollments e ON e.id = r.enrollment_id \
             WHERE e.student_id = $1 AND NOT e.is_delete AND NOT r.is_delete \
             ORDER BY r.created_at {} LIMIT $2 OFFSET $3",
            page.dir().as_sql()
        );
        Ok(sqlx::query_as::<_, ResultRecord>(&sql)
            .bind(student_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn update_result_marks(
        &self,
        id: ResultId,
        marks: i32,
        grade: Grade,
        actor: Uuid,
    ) -> Result<ResultRecord, StoreError> {
        let sql = format!(
            "UPDATE results \
             SET marks = $2, grade = $3, updated_by = $4, updated_at = NOW() \
             WHERE id = $1 AND NOT is_delete \
             RETURNING {RESULT_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, ResultRecord>(&sql)
            .bind(id)
            .bind(marks)
            .bind(grade)
            .bind(actor)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn create_class_with_attendance(
        &self,
        session_offering_id: SessionOfferingId,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<(ClassMeeting, Vec<Attendance>), StoreError> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO class_meetings (id, session_offering_id, date, created_by) \
             VALUES ($1, $2, $3, $4) RETURNING {CLASS_COLUMNS}"
        );
        let class = sqlx::query_as::<_, ClassMeeting>(&sql)
            .bind(ClassMeetingId::new())
            .bind(session_offering_id)
            .bind(date)
            .bind(actor)
            .fetch_one(&mut *tx)
            .await?;

        let sql = format!(
            "INSERT INTO attendances (id, class_meeting_id, student_id, created_by) \
             SELECT gen_random_uuid(), $1, e.student_id, $2 \
             FROM enrollments e \
             WHERE e.session_offering_id = $3 AND NOT e.is_delete \
             ORDER BY e.created_at \
             RETURNING {ATTENDANCE_COLUMNS}"
        );
        let attendances = sqlx::query_as::<_, Attendance>(&sql)
            .bind(class.id)
            .bind(actor)
            .bind(session_offering_id)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((class, attendances))
    }

    #[instrument(skip(self))]
    async fn get_class(&self, id: ClassMeetingId) -> Result<ClassMeeting, StoreError> {
        let sql =
            format!("SELECT {CLASS_COLUMNS} FROM class_meetings WHERE id = $1 AND NOT is_delete");
        Ok(sqlx::query_as::<_, ClassMeeting>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn list_classes_by_offering(
        &self,
        session_offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<ClassMeeting>, StoreError> {
        let sql = format!(
            "SELECT {CLASS_COLUMNS} FROM class_meetings \
             WHERE session_offering_id = $1 AND NOT is_delete \
             ORDER BY created_at {} LIMIT $2 OFFSET $3",
            page.dir().as_sql()
        );
        Ok(sqlx::query_as::<_, ClassMeeting>(&sql)
            .bind(session_offering_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn list_attendance_by_class(
        &self,
        class_meeting_id: ClassMeetingId,
    ) -> Result<Vec<Attendance>, StoreError> {
        let sql = format!(
            "SELECT {ATTENDANCE_COLUMNS} FROM attendances \
             WHERE class_meeting_id = $1 ORDER BY created_at, id"
        );
        Ok(sqlx::query_as::<_, Attendance>(&sql)
            .bind(class_meeting_id)
            .fetch_all(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn get_attendance(&self, id: AttendanceId) -> Result<Attendance, StoreError> {
        let sql = format!("SELECT {ATTENDANCE_COLUMNS} FROM attendances WHERE id = $1");
        Ok(sqlx::query_as::<_, Attendance>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
    }

    #[instrument(skip(self))]
    async fn update_attendance(
        &self,
        id: AttendanceId,
        attended: bool,
        actor: Uuid,
    ) -> Result<Attendance, StoreError> {
        let sql = format!(
            "UPDATE attendances \
             SET attended = $2, updated_by = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {ATTENDANCE_COLUMNS}"
        );
        Ok(sqlx::query_as::<_, Attendance>(&sql)
            .bind(id)
            .bind(attended)
            .bind(actor)
            .fetch_one(&self.pool)
            .await?)
    }
}
