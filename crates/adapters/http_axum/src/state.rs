//! Shared application state for axum handlers.

use std::sync::Arc;

use wardhub_app::ports::{AmbulanceRepository, SpaceRepository};
use wardhub_app::services::ambulance_service::AmbulanceService;
use wardhub_app::services::space_service::SpaceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`. Only the `Arc` wrappers are cloned.
pub struct AppState<SR, AR> {
    /// Space CRUD and assignment service.
    pub space_service: Arc<SpaceService<SR>>,
    /// Ambulance registration service.
    pub ambulance_service: Arc<AmbulanceService<AR>>,
}

impl<SR, AR> Clone for AppState<SR, AR> {
    fn clone(&self) -> Self {
        Self {
            space_service: Arc::clone(&self.space_service),
            ambulance_service: Arc::clone(&self.ambulance_service),
        }
    }
}

impl<SR, AR> AppState<SR, AR>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(space_service: SpaceService<SR>, ambulance_service: AmbulanceService<AR>) -> Self {
        Self {
            space_service: Arc::new(space_service),
            ambulance_service: Arc::new(ambulance_service),
        }
    }
}
