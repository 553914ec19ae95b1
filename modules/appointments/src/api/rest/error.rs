use axum::http::StatusCode;

use crate::api::problem::{Problem, ProblemResponse};
use crate::domain::error::DomainError;

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    instance: &str,
) -> ProblemResponse {
    ProblemResponse(
        Problem::new(status, title, detail)
            .with_code(code)
            .with_instance(instance),
    )
}

/// Map domain error to RFC9457 ProblemResponse.
///
/// `SlotConflict` gets its structured `{proposedEvent, conflicts}` body in
/// the propose/create handlers; this mapping is the fallback for the other
/// entry points (update).
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::NotFound { id } => from_parts(
            StatusCode::NOT_FOUND,
            "EVENTS_NOT_FOUND",
            "Event not found",
            format!("Event with id {} was not found", id),
            instance,
        ),
        DomainError::SlotConflict { conflicts } => from_parts(
            StatusCode::CONFLICT,
            "EVENTS_SLOT_CONFLICT",
            "Slot conflict",
            format!(
                "Requested slot overlaps {} existing appointment(s)",
                conflicts.len()
            ),
            instance,
        ),
        DomainError::Validation { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "EVENTS_VALIDATION",
            "Validation error",
            format!("{}", e),
            instance,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                instance,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn not_found_maps_to_404() {
        let resp = map_domain_error(&DomainError::not_found(Uuid::nil()), "/events/x");
        assert_eq!(resp.0.status, 404);
        assert_eq!(resp.0.code, "EVENTS_NOT_FOUND");
        assert_eq!(resp.0.instance, "/events/x");
    }

    #[test]
    fn database_error_detail_is_generic() {
        let resp = map_domain_error(
            &DomainError::database("connection refused to 10.0.0.5"),
            "/events",
        );
        assert_eq!(resp.0.status, 500);
        assert!(!resp.0.detail.contains("10.0.0.5"));
    }

    #[test]
    fn validation_maps_to_400() {
        let resp = map_domain_error(&DomainError::validation("title", "must not be empty"), "/e");
        assert_eq!(resp.0.status, 400);
        assert!(resp.0.detail.contains("title"));
    }
}
