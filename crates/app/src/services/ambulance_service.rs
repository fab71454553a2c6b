//! Ambulance service: use-cases for managing ambulances.

use wardhub_domain::ambulance::Ambulance;
use wardhub_domain::error::WardHubError;

use crate::ports::AmbulanceRepository;

/// Application service for registering and listing ambulances.
pub struct AmbulanceService<R> {
    repo: R,
}

impl<R: AmbulanceRepository> AmbulanceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new ambulance after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, ambulance), fields(ambulance_id = %ambulance.ambulance_id, ambulance_name = %ambulance.name))]
    pub async fn create_ambulance(&self, ambulance: Ambulance) -> Result<Ambulance, WardHubError> {
        ambulance.validate()?;
        self.repo.create(ambulance).await
    }

    /// List all ambulances.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_ambulances(&self) -> Result<Vec<Ambulance>, WardHubError> {
        self.repo.get_all().await
    }
}
