//! Appointment scheduling module.
//!
//! Layout follows a DDD-light split:
//! - `domain` — models, the interval conflict checker, the proposal/commit
//!   workflow and the ports it depends on,
//! - `infra` — SeaORM-backed and in-memory repository implementations plus
//!   the outgoing confirmation-notification client,
//! - `api` — REST surface (DTOs, handlers, routes, problem mapping).

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
