use registrar_core::{AppError, PaginationParams};
use registrar_db::RecordStore;
use registrar_models::{EnrollmentId, Grade, LecturerId, ResultId, ResultRecord, StudentId};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::modules::enrollments::service::ENROLLMENT_NOT_FOUND;
use crate::utils::auth_helpers::lecturer_offering;
use crate::utils::errors::{store_failure, store_internal};

const COMPONENT: &str = "module/result";

pub const RESULT_NOT_FOUND: &str = "Result not found";

pub struct ResultService;

impl ResultService {
    #[instrument(skip(store))]
    pub async fn get_result(store: &dyn RecordStore, id: ResultId) -> Result<ResultRecord, AppError> {
        store
            .get_result(id)
            .await
            .map_err(|e| store_failure(e, RESULT_NOT_FOUND, COMPONENT, "GetOne/GetOneResult"))
    }

    /// Records marks and the grade derived from them.
    #[instrument(skip(store))]
    pub async fn update_marks(
        store: &dyn RecordStore,
        id: ResultId,
        marks: i32,
        actor: Uuid,
    ) -> Result<ResultRecord, AppError> {
        let grade = Grade::from_marks(marks);
        let result = store
            .update_result_marks(id, marks, grade, actor)
            .await
            .map_err(|e| store_failure(e, RESULT_NOT_FOUND, COMPONENT, "Update/UpdateResult"))?;

        info!(result_id = %id, marks, ?grade, "Result updated");
        Ok(result)
    }

    #[instrument(skip(store))]
    pub async fn list_for_student(
        store: &dyn RecordStore,
        student_id: StudentId,
        page: &PaginationParams,
    ) -> Result<Vec<ResultRecord>, AppError> {
        store
            .list_results_by_student(student_id, page)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "ListByStudent/GetResults"))
    }

    /// Results of an enrollment in an offering taught by `lecturer_id`.
    #[instrument(skip(store))]
    pub async fn list_for_enrollment(
        store: &dyn RecordStore,
        lecturer_id: LecturerId,
        enrollment_id: EnrollmentId,
    ) -> Result<Vec<ResultRecord>, AppError> {
        let enrollment = store.get_enrollment(enrollment_id).await.map_err(|e| {
            store_failure(e, ENROLLMENT_NOT_FOUND, COMPONENT, "ListByEnroll/GetOneStudentEnroll")
        })?;
        lecturer_offering(store, lecturer_id, enrollment.session_offering_id).await?;

        store
            .list_results_by_enrollment(enrollment_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "ListByEnroll/GetResults"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use registrar_db::MemoryRecordStore;
    use registrar_models::SessionOfferingId;

    #[tokio::test]
    async fn update_marks_derives_grade() {
        let store = MemoryRecordStore::new();
        let (_, placeholder) = store
            .create_enrollment(StudentId::new(), SessionOfferingId::new(), Uuid::new_v4())
            .await
            .unwrap();
        let lecturer = Uuid::new_v4();

        let updated = ResultService::update_marks(&store, placeholder.id, 62, lecturer)
            .await
            .unwrap();

        assert_eq!(updated.marks, Some(62));
        assert_eq!(updated.grade, Some(Grade::B));
        assert_eq!(updated.updated_by, Some(lecturer));
    }

    #[tokio::test]
    async fn results_of_withdrawn_enrollment_are_gone() {
        let store = MemoryRecordStore::new();
        let (enrollment, placeholder) = store
            .create_enrollment(StudentId::new(), SessionOfferingId::new(), Uuid::new_v4())
            .await
            .unwrap();
        store.withdraw_enrollment(enrollment.id, Uuid::new_v4()).await.unwrap();

        let err = ResultService::get_result(&store, placeholder.id).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ResultService::update_marks(&store, placeholder.id, 80, Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.message, RESULT_NOT_FOUND);
    }
}
