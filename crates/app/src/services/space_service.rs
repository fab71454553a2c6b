//! Space service: use-cases for managing hospital spaces.

use wardhub_domain::error::{NotFoundError, WardHubError};
use wardhub_domain::id::SpaceId;
use wardhub_domain::space::{AssignmentRequest, Space};
use wardhub_domain::time::now;

use crate::ports::SpaceRepository;

fn not_found(id: SpaceId) -> WardHubError {
    NotFoundError {
        entity: "Space",
        id: id.to_string(),
    }
    .into()
}

/// Application service for space CRUD and assignment changes.
pub struct SpaceService<R> {
    repo: R,
}

impl<R: SpaceRepository> SpaceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persist a new space after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, space), fields(space_id = %space.space_id, space_name = %space.name))]
    pub async fn create_space(&self, space: Space) -> Result<Space, WardHubError> {
        space.validate()?;
        self.repo.create(space).await
    }

    /// List all spaces.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_spaces(&self) -> Result<Vec<Space>, WardHubError> {
        self.repo.get_all().await
    }

    /// Change who a space is assigned to.
    ///
    /// Reads the current space, applies the transition, then writes only the
    /// assignment columns back. The two steps are not atomic: a concurrent
    /// writer may land in between, and the last write wins.
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::NotFound`] when no space with `id` exists
    /// (or it vanished before the write), or a storage error.
    #[tracing::instrument(skip(self, request))]
    pub async fn update_assignment(
        &self,
        id: SpaceId,
        request: AssignmentRequest,
    ) -> Result<Space, WardHubError> {
        let mut space = self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
        space.apply_assignment(request, now());

        let matched = self
            .repo
            .update_assignment(id, space.assignment_patch())
            .await?;
        if matched == 0 {
            return Err(not_found(id));
        }

        tracing::debug!(status = %space.status(), "space assignment updated");
        Ok(space)
    }

    /// Delete a space by id.
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::NotFound`] when nothing was removed, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_space(&self, id: SpaceId) -> Result<(), WardHubError> {
        match self.repo.delete(id).await? {
            0 => Err(not_found(id)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use wardhub_domain::error::ValidationError;
    use wardhub_domain::id::RecordId;
    use wardhub_domain::space::{AssignmentPatch, SpaceStatus};

    #[derive(Default)]
    struct InMemorySpaceRepo {
        store: Mutex<HashMap<SpaceId, Space>>,
        patches: Mutex<Vec<AssignmentPatch>>,
    }

    impl SpaceRepository for InMemorySpaceRepo {
        fn create(&self, mut space: Space) -> impl Future<Output = Result<Space, WardHubError>> + Send {
            let mut store = self.store.lock().unwrap();
            let next = i64::try_from(store.len()).unwrap() + 1;
            space.id = Some(RecordId::new(next));
            store.insert(space.space_id, space.clone());
            async { Ok(space) }
        }

        fn get_all(&self) -> impl Future<Output = Result<Vec<Space>, WardHubError>> + Send {
            let store = self.store.lock().unwrap();
            let result: Vec<Space> = store.values().cloned().collect();
            async { Ok(result) }
        }

        fn get_by_id(
            &self,
            id: SpaceId,
        ) -> impl Future<Output = Result<Option<Space>, WardHubError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&id).cloned();
            async { Ok(result) }
        }

        fn update_assignment(
            &self,
            id: SpaceId,
            patch: AssignmentPatch,
        ) -> impl Future<Output = Result<u64, WardHubError>> + Send {
            let mut store = self.store.lock().unwrap();
            let matched = match store.get_mut(&id) {
                Some(space) => {
                    space.apply_assignment(
                        AssignmentRequest {
                            assigned_to: patch.assigned_to.clone(),
                            assigned_type: patch.assigned_type.clone(),
                            assigned_id: patch.assigned_id.clone(),
                        },
                        patch.updated_at,
                    );
                    1
                }
                None => 0,
            };
            self.patches.lock().unwrap().push(patch);
            async move { Ok(matched) }
        }

        fn delete(&self, id: SpaceId) -> impl Future<Output = Result<u64, WardHubError>> + Send {
            let mut store = self.store.lock().unwrap();
            let removed = u64::from(store.remove(&id).is_some());
            async move { Ok(removed) }
        }
    }

    /// Finds spaces but loses them before the write lands.
    struct VanishingSpaceRepo(Space);

    impl SpaceRepository for VanishingSpaceRepo {
        async fn create(&self, space: Space) -> Result<Space, WardHubError> {
            Ok(space)
        }
        async fn get_all(&self) -> Result<Vec<Space>, WardHubError> {
            Ok(vec![])
        }
        async fn get_by_id(&self, _id: SpaceId) -> Result<Option<Space>, WardHubError> {
            Ok(Some(self.0.clone()))
        }
        async fn update_assignment(
            &self,
            _id: SpaceId,
            _patch: AssignmentPatch,
        ) -> Result<u64, WardHubError> {
            Ok(0)
        }
        async fn delete(&self, _id: SpaceId) -> Result<u64, WardHubError> {
            Ok(0)
        }
    }

    struct FailingSpaceRepo;

    fn storage_down() -> WardHubError {
        WardHubError::Storage(Box::new(std::io::Error::other("storage down")))
    }

    impl SpaceRepository for FailingSpaceRepo {
        async fn create(&self, _space: Space) -> Result<Space, WardHubError> {
            Err(storage_down())
        }
        async fn get_all(&self) -> Result<Vec<Space>, WardHubError> {
            Err(storage_down())
        }
        async fn get_by_id(&self, _id: SpaceId) -> Result<Option<Space>, WardHubError> {
            Err(storage_down())
        }
        async fn update_assignment(
            &self,
            _id: SpaceId,
            _patch: AssignmentPatch,
        ) -> Result<u64, WardHubError> {
            Err(storage_down())
        }
        async fn delete(&self, _id: SpaceId) -> Result<u64, WardHubError> {
            Err(storage_down())
        }
    }

    fn make_service() -> SpaceService<InMemorySpaceRepo> {
        SpaceService::new(InMemorySpaceRepo::default())
    }

    fn icu() -> Space {
        Space::builder()
            .name("ICU-1")
            .kind("ICU")
            .floor(3)
            .capacity(2)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_create_space_with_storage_identity() {
        let svc = make_service();

        let created = svc.create_space(icu()).await.unwrap();

        assert_eq!(created.id, Some(RecordId::new(1)));
        assert_eq!(created.status(), SpaceStatus::Available);
    }

    #[tokio::test]
    async fn should_reject_create_when_capacity_is_zero() {
        let svc = make_service();
        let mut space = icu();
        space.capacity = 0;

        let result = svc.create_space(space).await;

        assert!(matches!(
            result,
            Err(WardHubError::Validation(ValidationError::ZeroCapacity))
        ));
        assert!(svc.list_spaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_created_space_exactly_once() {
        let svc = make_service();
        let created = svc.create_space(icu()).await.unwrap();

        let all = svc.list_spaces().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0], created);
    }

    #[tokio::test]
    async fn should_return_empty_list_when_nothing_stored() {
        let svc = make_service();
        assert!(svc.list_spaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_occupy_space_and_write_patch() {
        let svc = make_service();
        let created = svc.create_space(icu()).await.unwrap();

        let updated = svc
            .update_assignment(
                created.space_id,
                AssignmentRequest::assign("patient-42")
                    .with_type("patient")
                    .with_id("42"),
            )
            .await
            .unwrap();

        assert_eq!(updated.status(), SpaceStatus::Occupied);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        let patches = svc.repo.patches.lock().unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].assigned_to.as_deref(), Some("patient-42"));
        assert_eq!(patches[0].status, SpaceStatus::Occupied);
        drop(patches);

        let stored = svc.list_spaces().await.unwrap();
        assert_eq!(stored[0].status(), SpaceStatus::Occupied);
    }

    #[tokio::test]
    async fn should_release_occupied_space() {
        let svc = make_service();
        let created = svc.create_space(icu()).await.unwrap();
        svc.update_assignment(created.space_id, AssignmentRequest::assign("patient-42"))
            .await
            .unwrap();

        let released = svc
            .update_assignment(created.space_id, AssignmentRequest::release())
            .await
            .unwrap();

        assert_eq!(released.status(), SpaceStatus::Available);
        assert!(released.assignment().is_none());
    }

    #[tokio::test]
    async fn should_be_idempotent_when_releasing_twice() {
        let svc = make_service();
        let created = svc.create_space(icu()).await.unwrap();

        let first = svc
            .update_assignment(created.space_id, AssignmentRequest::release())
            .await
            .unwrap();
        let second = svc
            .update_assignment(created.space_id, AssignmentRequest::release())
            .await
            .unwrap();

        assert_eq!(first.status(), second.status());
        assert_eq!(first.assignment(), second.assignment());
        assert_eq!(second.status(), SpaceStatus::Available);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_space() {
        let svc = make_service();

        let result = svc
            .update_assignment(SpaceId::new(), AssignmentRequest::assign("x"))
            .await;

        assert!(matches!(result, Err(WardHubError::NotFound(_))));
        assert!(svc.repo.patches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_space_vanishes_before_write() {
        let svc = SpaceService::new(VanishingSpaceRepo(icu()));

        let result = svc
            .update_assignment(SpaceId::new(), AssignmentRequest::assign("x"))
            .await;

        assert!(matches!(result, Err(WardHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_space() {
        let svc = make_service();
        let created = svc.create_space(icu()).await.unwrap();

        svc.delete_space(created.space_id).await.unwrap();

        assert!(svc.list_spaces().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_space() {
        let svc = make_service();
        let result = svc.delete_space(SpaceId::new()).await;
        assert!(matches!(result, Err(WardHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_propagate_storage_errors() {
        let svc = SpaceService::new(FailingSpaceRepo);

        assert!(matches!(
            svc.create_space(icu()).await,
            Err(WardHubError::Storage(_))
        ));
        assert!(matches!(svc.list_spaces().await, Err(WardHubError::Storage(_))));
        assert!(matches!(
            svc.update_assignment(SpaceId::new(), AssignmentRequest::release())
                .await,
            Err(WardHubError::Storage(_))
        ));
        assert!(matches!(
            svc.delete_space(SpaceId::new()).await,
            Err(WardHubError::Storage(_))
        ));
    }
}
