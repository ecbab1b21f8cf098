use anyhow::anyhow;
use registrar_core::AppError;
use registrar_db::StoreError;

/// Maps a store failure to 404 with `not_found` as the message, and
/// everything else to a logged 500.
pub fn store_failure(
    err: StoreError,
    not_found: &str,
    component: &str,
    operation: &str,
) -> AppError {
    match err {
        StoreError::NotFound => AppError::not_found(anyhow!(not_found.to_string())),
        other => AppError::internal(other),
    }
    .tagged(component, operation)
}

/// Maps any store failure, including a missing row, to a logged 500.
pub fn store_internal(err: StoreError, component: &str, operation: &str) -> AppError {
    AppError::internal(err).tagged(component, operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn not_found_maps_to_404_with_message() {
        let err = store_failure(StoreError::NotFound, "Result not found", "test", "Get");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Result not found");
    }

    #[test]
    fn conflict_is_internal() {
        let err = store_failure(StoreError::Conflict("dup".into()), "x", "test", "Insert");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal Server Error");
    }
}
