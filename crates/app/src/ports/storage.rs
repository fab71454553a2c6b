//! Storage port: repository traits for persistence.
//!
//! Lookups go through the domain identity, never the storage identity. A
//! missing record is `Ok(None)` or a zero count, never an error.

use std::future::Future;

use wardhub_domain::ambulance::Ambulance;
use wardhub_domain::error::WardHubError;
use wardhub_domain::id::SpaceId;
use wardhub_domain::space::{AssignmentPatch, Space};

/// Repository for persisting and querying [`Space`]s.
pub trait SpaceRepository {
    /// Persist a new space and return it with its storage identity set.
    fn create(&self, space: Space) -> impl Future<Output = Result<Space, WardHubError>> + Send;

    /// Get all spaces, in no particular order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Space>, WardHubError>> + Send;

    /// Get a space by its domain identity.
    fn get_by_id(
        &self,
        id: SpaceId,
    ) -> impl Future<Output = Result<Option<Space>, WardHubError>> + Send;

    /// Write the assignment columns of a space. Returns how many records matched.
    fn update_assignment(
        &self,
        id: SpaceId,
        patch: AssignmentPatch,
    ) -> impl Future<Output = Result<u64, WardHubError>> + Send;

    /// Delete a space. Returns how many records were removed.
    fn delete(&self, id: SpaceId) -> impl Future<Output = Result<u64, WardHubError>> + Send;
}

/// Repository for persisting and querying [`Ambulance`]s.
pub trait AmbulanceRepository {
    /// Persist a new ambulance and return it with its storage identity set.
    fn create(
        &self,
        ambulance: Ambulance,
    ) -> impl Future<Output = Result<Ambulance, WardHubError>> + Send;

    /// Get all ambulances, in no particular order.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Ambulance>, WardHubError>> + Send;
}
