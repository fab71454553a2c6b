//! # wardhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** under `/api` (`/api/spaces`,
//!   `/api/ambulances`, `/api/health`)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//! - Apply the cross-origin policy for browser front-ends
//! - Reject malformed bodies and identifiers with `400` before any service
//!   call is made
//!
//! ## Dependency rule
//! Depends on `wardhub-app` (for port traits and services) and `wardhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod cors;
pub mod error;
pub mod router;
pub mod state;
