//! REST surface tests: router built over the in-memory store, exercised
//! with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use appointments::api::rest::routes;
use appointments::domain::ports::NoopNotifier;
use appointments::domain::service::{Service, ServiceConfig};
use appointments::infra::storage::memory::InMemoryAppointmentsRepository;

fn router() -> axum::Router {
    let service = Service::new(
        Arc::new(InMemoryAppointmentsRepository::new()),
        Arc::new(NoopNotifier),
        ServiceConfig::default(),
    );
    routes::router(Arc::new(service))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn proposal(title: &str, start: &str, end: &str) -> Value {
    json!({
        "title": title,
        "start": start,
        "end": end,
        "platform": "Zoom",
        "serviceId": "svc-1",
    })
}

#[tokio::test]
async fn clean_proposal_returns_200_with_committed_event() -> Result<()> {
    let app = router();

    let response = app
        .oneshot(json_request(
            "POST",
            "/events/propose",
            proposal("First", "2025-01-01T10:00:00Z", "2025-01-01T11:00:00Z"),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Appointment scheduled");
    assert!(body["event"]["id"].is_string());
    assert_eq!(body["event"]["title"], "First");
    Ok(())
}

#[tokio::test]
async fn back_to_back_proposal_is_not_a_conflict() -> Result<()> {
    let app = router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/events/propose",
            proposal("First", "2025-01-01T10:00:00Z", "2025-01-01T11:00:00Z"),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/events/propose",
            proposal("Second", "2025-01-01T11:00:00Z", "2025-01-01T12:00:00Z"),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn overlapping_proposal_returns_409_with_conflicts() -> Result<()> {
    let app = router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/events/propose",
            proposal("First", "2025-01-01T10:00:00Z", "2025-01-01T11:00:00Z"),
        ))
        .await?;
    let first = body_json(response).await?;
    let first_id = first["event"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            "POST",
            "/events/propose",
            proposal("Second", "2025-01-01T10:30:00Z", "2025-01-01T11:30:00Z"),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await?;
    assert_eq!(body["proposedEvent"]["title"], "Second");
    let conflicts = body["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["id"], first_id.as_str());
    assert_eq!(conflicts[0]["serviceId"], "svc-1");
    Ok(())
}

#[tokio::test]
async fn missing_title_returns_400_problem() -> Result<()> {
    let app = router();

    let response = app
        .oneshot(json_request(
            "POST",
            "/events/propose",
            json!({
                "start": "2025-01-01T10:00:00Z",
                "end": "2025-01-01T11:00:00Z",
                "platform": "Zoom",
            }),
        ))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "EVENTS_VALIDATION");
    assert!(body["detail"].as_str().unwrap().contains("title"));
    Ok(())
}

#[tokio::test]
async fn committed_event_appears_in_the_full_list() -> Result<()> {
    let app = router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/events/propose",
            proposal("First", "2025-01-01T10:00:00Z", "2025-01-01T11:00:00Z"),
        ))
        .await?;
    let committed = body_json(response).await?;
    let id = committed["event"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    let items = body["items"].as_array().unwrap();
    assert!(items.iter().any(|item| item["id"] == id.as_str()));
    Ok(())
}

#[tokio::test]
async fn range_listing_requires_both_bounds() -> Result<()> {
    let app = router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/events?startDate=2025-01-01T00:00:00Z")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events?startDate=2025-01-01T00:00:00Z&endDate=2025-01-02T00:00:00Z")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn range_listing_filters_by_window() -> Result<()> {
    let app = router();

    for (title, start, end) in [
        ("Morning", "2025-01-01T09:00:00Z", "2025-01-01T10:00:00Z"),
        ("Evening", "2025-01-01T18:00:00Z", "2025-01-01T19:00:00Z"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/events/propose",
                proposal(title, start, end),
            ))
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events?startDate=2025-01-01T08:00:00Z&endDate=2025-01-01T12:00:00Z")
                .body(Body::empty())?,
        )
        .await?;
    let body = body_json(response).await?;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Morning");
    Ok(())
}

#[tokio::test]
async fn get_update_delete_round_trip() -> Result<()> {
    let app = router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/events",
            proposal("First", "2025-01-01T10:00:00Z", "2025-01-01T11:00:00Z"),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await?;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/events/{id}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/events/{id}"),
            json!({"title": "Renamed"}),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await?;
    assert_eq!(updated["title"], "Renamed");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/events/{id}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Event deleted");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/events/{id}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn unknown_event_returns_404_problem() -> Result<()> {
    let app = router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "EVENTS_NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> Result<()> {
    let app = router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert!(body["paths"]["/events/propose"].is_object());
    Ok(())
}
