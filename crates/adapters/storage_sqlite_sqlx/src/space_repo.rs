//! `SQLite` implementation of [`SpaceRepository`].

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use wardhub_app::ports::SpaceRepository;
use wardhub_domain::error::WardHubError;
use wardhub_domain::id::{RecordId, SpaceId};
use wardhub_domain::space::{Assignment, AssignmentPatch, Space, SpaceStatus};

use crate::decode::{decode_err, parse_timestamp};
use crate::error::bounded;
use crate::pool::DEFAULT_OPERATION_TIMEOUT;

/// A stored status that disagrees with the stored assignment columns.
#[derive(Debug, thiserror::Error)]
#[error("space {space_id} is stored as `{stored}` but its assignment implies `{derived}`")]
struct InconsistentStatus {
    space_id: SpaceId,
    stored: SpaceStatus,
    derived: SpaceStatus,
}

/// Wrapper for converting database rows into domain [`Space`].
struct Wrapper(Space);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Space> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let space_id: String = row.try_get("space_id")?;
        let name: String = row.try_get("name")?;
        let kind: String = row.try_get("kind")?;
        let floor: i32 = row.try_get("floor")?;
        let capacity: u32 = row.try_get("capacity")?;
        let status: String = row.try_get("status")?;
        let assigned_to: Option<String> = row.try_get("assigned_to")?;
        let assigned_type: Option<String> = row.try_get("assigned_type")?;
        let assigned_id: Option<String> = row.try_get("assigned_id")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let space_id = SpaceId::from_str(&space_id).map_err(decode_err)?;
        let stored = SpaceStatus::from_str(&status).map_err(decode_err)?;

        let space = Space::builder()
            .id(RecordId::new(id))
            .space_id(space_id)
            .name(name)
            .kind(kind)
            .floor(floor)
            .capacity(capacity)
            .assignment(Assignment::maybe(assigned_to, assigned_type, assigned_id))
            .created_at(parse_timestamp(&created_at)?)
            .updated_at(parse_timestamp(&updated_at)?)
            .build()
            .map_err(decode_err)?;

        if space.status() != stored {
            return Err(decode_err(InconsistentStatus {
                space_id,
                stored,
                derived: space.status(),
            }));
        }

        Ok(Self(space))
    }
}

const INSERT: &str = r"
    INSERT INTO spaces (
        space_id, name, kind, floor, capacity, status,
        assigned_to, assigned_type, assigned_id, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const SELECT_BY_SPACE_ID: &str = "SELECT * FROM spaces WHERE space_id = ?";
const SELECT_ALL: &str = "SELECT * FROM spaces";
const UPDATE_ASSIGNMENT: &str = r"
    UPDATE spaces
    SET assigned_to = ?, assigned_type = ?, assigned_id = ?, status = ?, updated_at = ?
    WHERE space_id = ?
";
const DELETE_BY_SPACE_ID: &str = "DELETE FROM spaces WHERE space_id = ?";

/// `SQLite`-backed space repository.
pub struct SqliteSpaceRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteSpaceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Override the bound applied to each query.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl SpaceRepository for SqliteSpaceRepository {
    fn create(&self, mut space: Space) -> impl Future<Output = Result<Space, WardHubError>> + Send {
        let pool = self.pool.clone();
        let timeout = self.timeout;
        async move {
            let patch = space.assignment_patch();
            let result = bounded(
                timeout,
                sqlx::query(INSERT)
                    .bind(space.space_id.to_string())
                    .bind(&space.name)
                    .bind(&space.kind)
                    .bind(space.floor)
                    .bind(space.capacity)
                    .bind(patch.status.as_str())
                    .bind(patch.assigned_to)
                    .bind(patch.assigned_type)
                    .bind(patch.assigned_id)
                    .bind(space.created_at.to_rfc3339())
                    .bind(space.updated_at.to_rfc3339())
                    .execute(&pool),
            )
            .await?;

            space.id = Some(RecordId::new(result.last_insert_rowid()));
            Ok(space)
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Space>, WardHubError>> + Send {
        let pool = self.pool.clone();
        let timeout = self.timeout;
        async move {
            let rows: Vec<Wrapper> =
                bounded(timeout, sqlx::query_as(SELECT_ALL).fetch_all(&pool)).await?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn get_by_id(
        &self,
        id: SpaceId,
    ) -> impl Future<Output = Result<Option<Space>, WardHubError>> + Send {
        let pool = self.pool.clone();
        let timeout = self.timeout;
        async move {
            let row: Option<Wrapper> = bounded(
                timeout,
                sqlx::query_as(SELECT_BY_SPACE_ID)
                    .bind(id.to_string())
                    .fetch_optional(&pool),
            )
            .await?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn update_assignment(
        &self,
        id: SpaceId,
        patch: AssignmentPatch,
    ) -> impl Future<Output = Result<u64, WardHubError>> + Send {
        let pool = self.pool.clone();
        let timeout = self.timeout;
        async move {
            let result = bounded(
                timeout,
                sqlx::query(UPDATE_ASSIGNMENT)
                    .bind(patch.assigned_to)
                    .bind(patch.assigned_type)
                    .bind(patch.assigned_id)
                    .bind(patch.status.as_str())
                    .bind(patch.updated_at.to_rfc3339())
                    .bind(id.to_string())
                    .execute(&pool),
            )
            .await?;

            Ok(result.rows_affected())
        }
    }

    fn delete(&self, id: SpaceId) -> impl Future<Output = Result<u64, WardHubError>> + Send {
        let pool = self.pool.clone();
        let timeout = self.timeout;
        async move {
            let result = bounded(
                timeout,
                sqlx::query(DELETE_BY_SPACE_ID)
                    .bind(id.to_string())
                    .execute(&pool),
            )
            .await?;

            Ok(result.rows_affected())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;
    use wardhub_domain::space::AssignmentRequest;
    use wardhub_domain::time::now;

    async fn setup() -> SqliteSpaceRepository {
        let db = Config::new("sqlite::memory:").build().await.unwrap();
        SqliteSpaceRepository::new(db.pool().clone())
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
    async fn should_assign_storage_identity_on_create() {
        let repo = setup().await;

        let first = repo.create(icu()).await.unwrap();
        let second = repo.create(icu()).await.unwrap();

        assert!(first.id.is_some());
        assert!(second.id.is_some());
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn should_create_and_retrieve_space_by_domain_identity() {
        let repo = setup().await;
        let created = repo.create(icu()).await.unwrap();

        let fetched = repo.get_by_id(created.space_id).await.unwrap().unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn should_return_none_when_space_not_found() {
        let repo = setup().await;
        let result = repo.get_by_id(SpaceId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_return_empty_vec_when_table_empty() {
        let repo = setup().await;
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_list_all_spaces() {
        let repo = setup().await;
        repo.create(icu()).await.unwrap();
        repo.create(
            Space::builder()
                .name("Ward B")
                .kind("general")
                .floor(0)
                .capacity(12)
                .build()
                .unwrap(),
        )
        .await
        .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_reject_duplicate_domain_identity() {
        let repo = setup().await;
        let space = icu();
        repo.create(space.clone()).await.unwrap();

        let result = repo.create(space).await;

        assert!(matches!(result, Err(WardHubError::Storage(_))));
    }

    #[tokio::test]
    async fn should_patch_assignment_columns() {
        let repo = setup().await;
        let mut space = repo.create(icu()).await.unwrap();
        space.apply_assignment(
            AssignmentRequest::assign("patient-42")
                .with_type("patient")
                .with_id("42"),
            now(),
        );

        let matched = repo
            .update_assignment(space.space_id, space.assignment_patch())
            .await
            .unwrap();

        assert_eq!(matched, 1);
        let fetched = repo.get_by_id(space.space_id).await.unwrap().unwrap();
        assert_eq!(fetched.status(), SpaceStatus::Occupied);
        assert_eq!(fetched.assignment(), space.assignment());
        assert_eq!(fetched.created_at, space.created_at);
        assert_eq!(fetched.name, "ICU-1");
    }

    #[tokio::test]
    async fn should_clear_assignment_columns_on_release() {
        let repo = setup().await;
        let mut space = repo.create(icu()).await.unwrap();
        space.apply_assignment(AssignmentRequest::assign("patient-42"), now());
        repo.update_assignment(space.space_id, space.assignment_patch())
            .await
            .unwrap();

        space.apply_assignment(AssignmentRequest::release(), now());
        repo.update_assignment(space.space_id, space.assignment_patch())
            .await
            .unwrap();

        let fetched = repo.get_by_id(space.space_id).await.unwrap().unwrap();
        assert_eq!(fetched.status(), SpaceStatus::Available);
        assert!(fetched.assignment().is_none());
    }

    #[tokio::test]
    async fn should_report_zero_matched_when_patching_missing_space() {
        let repo = setup().await;
        let patch = icu().assignment_patch();

        let matched = repo.update_assignment(SpaceId::new(), patch).await.unwrap();

        assert_eq!(matched, 0);
    }

    #[tokio::test]
    async fn should_delete_space_and_report_count() {
        let repo = setup().await;
        let space = repo.create(icu()).await.unwrap();

        assert_eq!(repo.delete(space.space_id).await.unwrap(), 1);
        assert_eq!(repo.delete(space.space_id).await.unwrap(), 0);
        assert!(repo.get_by_id(space.space_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_fail_decoding_row_with_inconsistent_status() {
        let db = Config::new("sqlite::memory:").build().await.unwrap();
        let repo = SqliteSpaceRepository::new(db.pool().clone());
        let space = repo.create(icu()).await.unwrap();
        sqlx::query("UPDATE spaces SET status = 'occupied' WHERE space_id = ?")
            .bind(space.space_id.to_string())
            .execute(db.pool())
            .await
            .unwrap();

        let result = repo.get_by_id(space.space_id).await;

        assert!(matches!(result, Err(WardHubError::Storage(_))));
    }
}
