//! Ambulance: a vehicle registered with the hospital.
//!
//! Ambulances are created and listed. Nothing mutates them afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WardHubError};
use crate::id::{AmbulanceId, RecordId};
use crate::time::{Timestamp, now};

/// Availability of an [`Ambulance`]. New ambulances are always `available`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbulanceStatus {
    #[default]
    Available,
}

impl AmbulanceStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
        }
    }
}

impl fmt::Display for AmbulanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ambulance status `{0}`")]
pub struct UnknownAmbulanceStatus(pub String);

impl FromStr for AmbulanceStatus {
    type Err = UnknownAmbulanceStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            other => Err(UnknownAmbulanceStatus(other.to_string())),
        }
    }
}

/// A registered ambulance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ambulance {
    /// Storage identity, set once the ambulance has been persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub ambulance_id: AmbulanceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub status: AmbulanceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ambulance {
    /// Create a builder for constructing an [`Ambulance`].
    #[must_use]
    pub fn builder() -> AmbulanceBuilder {
        AmbulanceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::Validation`] when `name`, `type` or `location`
    /// is empty.
    pub fn validate(&self) -> Result<(), WardHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if self.kind.is_empty() {
            return Err(ValidationError::MissingField("type").into());
        }
        if self.location.is_empty() {
            return Err(ValidationError::MissingField("location").into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Ambulance`].
#[derive(Debug, Default)]
pub struct AmbulanceBuilder {
    id: Option<RecordId>,
    ambulance_id: Option<AmbulanceId>,
    name: Option<String>,
    kind: Option<String>,
    location: Option<String>,
    status: AmbulanceStatus,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl AmbulanceBuilder {
    #[must_use]
    pub fn id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn ambulance_id(mut self, ambulance_id: AmbulanceId) -> Self {
        self.ambulance_id = Some(ambulance_id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: AmbulanceStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn updated_at(mut self, updated_at: Timestamp) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Consume the builder, validate, and return an [`Ambulance`].
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::Validation`] if a required field is missing.
    pub fn build(self) -> Result<Ambulance, WardHubError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let ambulance = Ambulance {
            id: self.id,
            ambulance_id: self.ambulance_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            status: self.status,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        ambulance.validate()?;
        Ok(ambulance)
    }
}
