//! Axum router assembly.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use wardhub_app::ports::{AmbulanceRepository, SpaceRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api`, answers CORS preflights through `cors`,
/// and includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<SR, AR>(state: AppState<SR, AR>, cors: CorsLayer) -> Router
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    Router::new()
        .nest("/api", crate::api::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
