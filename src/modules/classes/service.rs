use chrono::NaiveDate;
use registrar_core::{AppError, PaginationParams};
use registrar_db::RecordStore;
use registrar_models::{
    ClassMeeting, ClassMeetingId, ClassResponse, LecturerId, SessionOffering, SessionOfferingId,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::track_class_created;
use crate::utils::auth_helpers::{SESSION_NOT_FOUND, lecturer_offering};
use crate::utils::errors::{store_failure, store_internal};

const COMPONENT: &str = "module/class";

pub const CLASS_NOT_FOUND: &str = "Class not found";

pub struct ClassService;

impl ClassService {
    /// Creates a class meeting and one unattended attendance row for every
    /// student actively enrolled in the offering right now.
    ///
    /// Students who enroll later get no row for this meeting.
    #[instrument(skip(store))]
    pub async fn create_class_meeting(
        store: &dyn RecordStore,
        offering_id: SessionOfferingId,
        date: NaiveDate,
        actor: Uuid,
    ) -> Result<ClassResponse, AppError> {
        let session = store
            .get_session_offering(offering_id)
            .await
            .map_err(|e| store_failure(e, SESSION_NOT_FOUND, COMPONENT, "Create/GetOneSession"))?;

        let (class, attendances) = store
            .create_class_with_attendance(offering_id, date, actor)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "Create/InsertClassWithAttendances"))?;

        track_class_created(attendances.len());
        info!(class_id = %class.id, attendances = attendances.len(), "Class meeting created");

        Ok(ClassResponse {
            class,
            session,
            attendances,
        })
    }

    #[instrument(skip(store))]
    pub async fn get_class(
        store: &dyn RecordStore,
        id: ClassMeetingId,
    ) -> Result<ClassResponse, AppError> {
        let class = store
            .get_class(id)
            .await
            .map_err(|e| store_failure(e, CLASS_NOT_FOUND, COMPONENT, "GetOne/GetOneClass"))?;
        let session = store
            .get_session_offering(class.session_offering_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "GetOne/GetOneSession"))?;
        let attendances = store
            .list_attendance_by_class(id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "GetOne/GetAttendances"))?;

        Ok(ClassResponse {
            class,
            session,
            attendances,
        })
    }

    /// Class meetings of an offering taught by `lecturer_id`.
    #[instrument(skip(store))]
    pub async fn list_for_offering(
        store: &dyn RecordStore,
        lecturer_id: LecturerId,
        offering_id: SessionOfferingId,
        page: &PaginationParams,
    ) -> Result<Vec<ClassMeeting>, AppError> {
        lecturer_offering(store, lecturer_id, offering_id).await?;

        store
            .list_classes_by_offering(offering_id, page)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "ListBySession/GetClasses"))
    }

    /// Offerings taught by `lecturer_id`; the entry point for every other
    /// lecturer listing.
    #[instrument(skip(store))]
    pub async fn list_lecturer_offerings(
        store: &dyn RecordStore,
        lecturer_id: LecturerId,
        page: &PaginationParams,
    ) -> Result<Vec<SessionOffering>, AppError> {
        store
            .list_offerings_by_lecturer(lecturer_id, page)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "ListByLecturer/GetSessions"))
    }
}
