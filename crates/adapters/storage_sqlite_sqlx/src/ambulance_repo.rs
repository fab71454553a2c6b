//! `SQLite` implementation of [`AmbulanceRepository`].

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use wardhub_app::ports::AmbulanceRepository;
use wardhub_domain::ambulance::{Ambulance, AmbulanceStatus};
use wardhub_domain::error::WardHubError;
use wardhub_domain::id::{AmbulanceId, RecordId};

use crate::decode::{decode_err, parse_timestamp};
use crate::error::bounded;
use crate::pool::DEFAULT_OPERATION_TIMEOUT;

/// Wrapper for converting database rows into domain [`Ambulance`].
struct Wrapper(Ambulance);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let ambulance_id: String = row.try_get("ambulance_id")?;
        let name: String = row.try_get("name")?;
        let kind: String = row.try_get("kind")?;
        let location: String = row.try_get("location")?;
        let status: String = row.try_get("status")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let ambulance_id = AmbulanceId::from_str(&ambulance_id).map_err(decode_err)?;
        let status = AmbulanceStatus::from_str(&status).map_err(decode_err)?;

        Ambulance::builder()
            .id(RecordId::new(id))
            .ambulance_id(ambulance_id)
            .name(name)
            .kind(kind)
            .location(location)
            .status(status)
            .created_at(parse_timestamp(&created_at)?)
            .updated_at(parse_timestamp(&updated_at)?)
            .build()
            .map(Self)
            .map_err(decode_err)
    }
}

const INSERT: &str = r"
    INSERT INTO ambulances (ambulance_id, name, kind, location, status, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const SELECT_ALL: &str = "SELECT * FROM ambulances";

/// `SQLite`-backed ambulance repository.
pub struct SqliteAmbulanceRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl SqliteAmbulanceRepository {
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

impl AmbulanceRepository for SqliteAmbulanceRepository {
    fn create(
        &self,
        mut ambulance: Ambulance,
    ) -> impl Future<Output = Result<Ambulance, WardHubError>> + Send {
        let pool = self.pool.clone();
        let timeout = self.timeout;
        async move {
            let result = bounded(
                timeout,
                sqlx::query(INSERT)
                    .bind(ambulance.ambulance_id.to_string())
                    .bind(&ambulance.name)
                    .bind(&ambulance.kind)
                    .bind(&ambulance.location)
                    .bind(ambulance.status.as_str())
                    .bind(ambulance.created_at.to_rfc3339())
                    .bind(ambulance.updated_at.to_rfc3339())
                    .execute(&pool),
            )
            .await?;

            ambulance.id = Some(RecordId::new(result.last_insert_rowid()));
            Ok(ambulance)
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Ambulance>, WardHubError>> + Send {
        let pool = self.pool.clone();
        let timeout = self.timeout;
        async move {
            let rows: Vec<Wrapper> =
                bounded(timeout, sqlx::query_as(SELECT_ALL).fetch_all(&pool)).await?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
