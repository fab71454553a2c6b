//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod ambulances;
pub mod health;
#[allow(clippy::missing_errors_doc)]
pub mod spaces;

use axum::Router;
use axum::routing::{get, put};

use wardhub_app::ports::{AmbulanceRepository, SpaceRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<SR, AR>() -> Router<AppState<SR, AR>>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    Router::new()
        // Spaces
        .route(
            "/spaces",
            get(spaces::list::<SR, AR>).post(spaces::create::<SR, AR>),
        )
        .route(
            "/spaces/{id}",
            put(spaces::update::<SR, AR>).delete(spaces::delete::<SR, AR>),
        )
        // Ambulances
        .route(
            "/ambulances",
            get(ambulances::list::<SR, AR>).post(ambulances::create::<SR, AR>),
        )
        .route("/health", get(health::check))
}
