//! # wardhub-domain
//!
//! Pure domain model for the wardhub hospital space registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - Define **Spaces** (rooms and bays) and their assignment state machine
//! - Define **Ambulances**
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod ambulance;
pub mod space;
