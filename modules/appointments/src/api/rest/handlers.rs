use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Extension, Json,
};
use tracing::{error, info};
use uuid::Uuid;

use crate::api::openapi::ApiDoc;
use crate::api::problem::{Problem, ProblemResponse};
use crate::api::rest::dto::{
    parse_timestamp, AppointmentDto, ConflictDto, EventListDto, ListEventsQuery, MessageDto,
    ProposalAcceptedDto, ProposalRejectedDto, ProposeEventReq, UpdateEventReq,
};
use crate::api::rest::error::{from_parts, map_domain_error};
use crate::domain::error::DomainError;
use crate::domain::service::Service;
use utoipa::OpenApi;

/// List events, optionally restricted to a `[startDate, endDate)` window.
/// The bounds come as a pair; exactly one of them is a validation error.
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "List of events", body = EventListDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn list_events(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListEventsQuery>,
    uri: Uri,
) -> Result<Json<EventListDto>, ProblemResponse> {
    info!("Listing events with query: {:?}", query);

    let result = match (query.start_date, query.end_date) {
        (None, None) => svc.list().await,
        (Some(from), Some(to)) => {
            let from = parse_timestamp(&from, "startDate")
                .map_err(|e| map_domain_error(&e, uri.path()))?;
            let to =
                parse_timestamp(&to, "endDate").map_err(|e| map_domain_error(&e, uri.path()))?;
            svc.list_range(from, to).await
        }
        _ => {
            return Err(from_parts(
                StatusCode::BAD_REQUEST,
                "EVENTS_VALIDATION",
                "Validation error",
                "startDate and endDate must be provided together",
                uri.path(),
            ))
        }
    };

    match result {
        Ok(items) => Ok(Json(EventListDto {
            items: items.into_iter().map(AppointmentDto::from).collect(),
        })),
        Err(e) => {
            error!("Failed to list events: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event UUID")),
    responses(
        (status = 200, description = "Event found", body = AppointmentDto),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn get_event(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    info!("Getting event with id: {}", id);

    match svc.get(id).await {
        Ok(appt) => Ok(Json(AppointmentDto::from(appt))),
        Err(e) => {
            error!("Failed to get event {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Propose an event: validate, check the slot and commit atomically.
/// A conflicting slot returns 409 with the proposed record and the full
/// conflict list; nothing is persisted in that case.
#[utoipa::path(
    post,
    path = "/events/propose",
    tag = "events",
    request_body = ProposeEventReq,
    responses(
        (status = 200, description = "Slot free, event committed", body = ProposalAcceptedDto),
        (status = 409, description = "Slot conflict", body = ProposalRejectedDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn propose_event(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<ProposeEventReq>,
) -> Result<Response, ProblemResponse> {
    info!("Proposing event: {:?}", req);

    let candidate = req
        .clone()
        .into_candidate()
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.propose(candidate).await {
        Ok(appt) => Ok((
            StatusCode::OK,
            Json(ProposalAcceptedDto {
                message: "Appointment scheduled".to_string(),
                event: AppointmentDto::from(appt),
            }),
        )
            .into_response()),
        Err(DomainError::SlotConflict { conflicts }) => Ok((
            StatusCode::CONFLICT,
            Json(ProposalRejectedDto {
                message: "Requested time slot is unavailable".to_string(),
                proposed_event: req,
                conflicts: conflicts.iter().map(ConflictDto::from).collect(),
            }),
        )
            .into_response()),
        Err(e) => {
            error!("Failed to propose event: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create an event. Same conflict-checked commit as propose; only the
/// success body differs (the bare persisted record).
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = ProposeEventReq,
    responses(
        (status = 200, description = "Persisted event", body = AppointmentDto),
        (status = 409, description = "Slot conflict", body = ProposalRejectedDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn create_event(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req): Json<ProposeEventReq>,
) -> Result<Response, ProblemResponse> {
    info!("Creating event: {:?}", req);

    let candidate = req
        .clone()
        .into_candidate()
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.propose(candidate).await {
        Ok(appt) => Ok((StatusCode::OK, Json(AppointmentDto::from(appt))).into_response()),
        Err(DomainError::SlotConflict { conflicts }) => Ok((
            StatusCode::CONFLICT,
            Json(ProposalRejectedDto {
                message: "Requested time slot is unavailable".to_string(),
                proposed_event: req,
                conflicts: conflicts.iter().map(ConflictDto::from).collect(),
            }),
        )
            .into_response()),
        Err(e) => {
            error!("Failed to create event: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Update an existing event
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event UUID")),
    request_body = UpdateEventReq,
    responses(
        (status = 200, description = "Updated event", body = AppointmentDto),
        (status = 400, description = "Bad Request", body = Problem),
        (status = 404, description = "Not Found", body = Problem),
        (status = 409, description = "Slot conflict", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn update_event(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateEventReq>,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    info!("Updating event {} with: {:?}", id, req);

    let patch = req
        .into_patch()
        .map_err(|e| map_domain_error(&e, uri.path()))?;

    match svc.update(id, patch).await {
        Ok(appt) => Ok(Json(AppointmentDto::from(appt))),
        Err(e) => {
            error!("Failed to update event {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete an event by ID
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    params(("id" = Uuid, Path, description = "Event UUID")),
    responses(
        (status = 200, description = "Event deleted", body = MessageDto),
        (status = 404, description = "Not Found", body = Problem),
        (status = 500, description = "Internal Server Error", body = Problem)
    )
)]
pub async fn delete_event(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> Result<Json<MessageDto>, ProblemResponse> {
    info!("Deleting event: {}", id);

    match svc.delete(id).await {
        Ok(()) => Ok(Json(MessageDto {
            message: "Event deleted".to_string(),
        })),
        Err(e) => {
            error!("Failed to delete event {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Liveness probe.
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Serve the generated OpenAPI document.
pub async fn openapi_doc() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
