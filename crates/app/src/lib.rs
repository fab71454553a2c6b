//! # wardhub-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SpaceRepository`: insert, list, find, patch assignment, delete
//!   - `AmbulanceRepository`: insert, list
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SpaceService`: create, list, change assignment, delete
//!   - `AmbulanceService`: create, list
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `wardhub-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
