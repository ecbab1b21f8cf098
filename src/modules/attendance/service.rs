use registrar_core::AppError;
use registrar_db::RecordStore;
use registrar_models::{Attendance, AttendanceId, ClassMeetingId, LecturerId};
use tracing::{info, instrument};

use crate::modules::classes::service::CLASS_NOT_FOUND;
use crate::utils::auth_helpers::lecturer_offering;
use crate::utils::errors::{store_failure, store_internal};

const COMPONENT: &str = "module/attendance";

pub const ATTENDANCE_NOT_FOUND: &str = "Attendance not found";

pub struct AttendanceService;

impl AttendanceService {
    /// The attendance sheet of a class meeting, for the lecturer teaching it.
    #[instrument(skip(store))]
    pub async fn list_for_class(
        store: &dyn RecordStore,
        lecturer_id: LecturerId,
        class_id: ClassMeetingId,
    ) -> Result<Vec<Attendance>, AppError> {
        let class = store
            .get_class(class_id)
            .await
            .map_err(|e| store_failure(e, CLASS_NOT_FOUND, COMPONENT, "ListByClass/GetOneClass"))?;
        lecturer_offering(store, lecturer_id, class.session_offering_id).await?;

        store
            .list_attendance_by_class(class_id)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "ListByClass/GetAttendances"))
    }

    #[instrument(skip(store))]
    pub async fn mark(
        store: &dyn RecordStore,
        lecturer_id: LecturerId,
        id: AttendanceId,
        attended: bool,
    ) -> Result<Attendance, AppError> {
        let attendance = store.get_attendance(id).await.map_err(|e| {
            store_failure(e, ATTENDANCE_NOT_FOUND, COMPONENT, "Update/GetOneAttendance")
        })?;
        let class = store
            .get_class(attendance.class_meeting_id)
            .await
            .map_err(|e| store_failure(e, CLASS_NOT_FOUND, COMPONENT, "Update/GetOneClass"))?;
        lecturer_offering(store, lecturer_id, class.session_offering_id).await?;

        let updated = store
            .update_attendance(id, attended, lecturer_id.into_inner())
            .await
            .map_err(|e| store_failure(e, ATTENDANCE_NOT_FOUND, COMPONENT, "Update/UpdateAttendance"))?;

        info!(attendance_id = %id, attended, "Attendance marked");
        Ok(updated)
    }
}
