use utoipa::OpenApi;

use crate::api::problem::Problem;
use crate::api::rest::dto::{
    AppointmentDto, ConflictDto, EventListDto, MessageDto, ProposalAcceptedDto,
    ProposalRejectedDto, ProposeEventReq, UpdateEventReq,
};

/// OpenAPI document for the appointments REST surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Appointments API",
        description = "Appointment scheduling with interval conflict detection"
    ),
    paths(
        crate::api::rest::handlers::list_events,
        crate::api::rest::handlers::get_event,
        crate::api::rest::handlers::propose_event,
        crate::api::rest::handlers::create_event,
        crate::api::rest::handlers::update_event,
        crate::api::rest::handlers::delete_event,
    ),
    components(schemas(
        AppointmentDto,
        EventListDto,
        ProposeEventReq,
        UpdateEventReq,
        ConflictDto,
        ProposalAcceptedDto,
        ProposalRejectedDto,
        MessageDto,
        Problem,
    )),
    tags((name = "events", description = "Appointment scheduling"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn document_lists_every_event_path() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert!(paths.contains_key("/events"));
        assert!(paths.contains_key("/events/propose"));
        assert!(paths.contains_key("/events/{id}"));
    }
}
