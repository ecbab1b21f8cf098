use anyhow::anyhow;
use registrar_core::AppError;
use registrar_db::RecordStore;
use registrar_models::{LecturerId, SessionOffering, SessionOfferingId};

use crate::utils::errors::store_failure;

pub const SESSION_NOT_FOUND: &str = "Session not found";
pub const SESSION_NOT_YOURS: &str = "This Session Is Not Yours";

/// Loads an offering and checks that `lecturer_id` teaches it.
///
/// 404 if the offering does not exist, 403 if it belongs to another lecturer.
pub async fn lecturer_offering(
    store: &dyn RecordStore,
    lecturer_id: LecturerId,
    offering_id: SessionOfferingId,
) -> Result<SessionOffering, AppError> {
    let offering = store
        .get_session_offering(offering_id)
        .await
        .map_err(|e| store_failure(e, SESSION_NOT_FOUND, "utils/auth_helpers", "GetOneSession"))?;

    if offering.lecturer_id != lecturer_id {
        return Err(AppError::forbidden(anyhow!(SESSION_NOT_YOURS)));
    }

    Ok(offering)
}
