//! # wardhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `wardhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run embedded sqlx migrations, including the uniqueness constraints on
//!   domain identities
//! - Bound every round trip with a fixed timeout
//! - Map between domain types and database rows
//!
//! ## Dependency rule
//! Depends on `wardhub-app` (for port traits) and `wardhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod ambulance_repo;
mod decode;
mod error;
mod pool;
mod space_repo;

pub use ambulance_repo::SqliteAmbulanceRepository;
pub use error::StorageError;
pub use pool::{Config, DEFAULT_OPERATION_TIMEOUT, Database};
pub use space_repo::SqliteSpaceRepository;
