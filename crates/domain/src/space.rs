//! Space: a hospital room or bay that can be assigned to someone.
//!
//! A space is either `available` or `occupied`. The only way to move between
//! the two is [`Space::apply_assignment`], which keeps the status and the
//! assignment fields in lockstep:
//!
//! - `occupied` ⟺ an [`Assignment`] with a non-empty `assigned_to` is present
//! - `available` ⟺ no assignment at all
//!
//! Descriptive attributes (`name`, `type`, `floor`, `capacity`) are fixed at
//! creation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, WardHubError};
use crate::id::{RecordId, SpaceId};
use crate::time::{Timestamp, now};

/// Occupancy status of a [`Space`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceStatus {
    Available,
    Occupied,
}

impl SpaceStatus {
    /// Lowercase wire and storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

impl fmt::Display for SpaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown space status `{0}`")]
pub struct UnknownSpaceStatus(pub String);

impl FromStr for SpaceStatus {
    type Err = UnknownSpaceStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            other => Err(UnknownSpaceStatus(other.to_string())),
        }
    }
}

/// Who or what currently holds a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Reference to the assignee. Never empty.
    pub assigned_to: String,
    /// Classifier of the assignee (e.g. `patient`, `department`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_type: Option<String>,
    /// External identifier of the assignee.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_id: Option<String>,
}

impl Assignment {
    /// Build an assignment, or `None` when `assigned_to` is absent or empty.
    ///
    /// `assigned_type` and `assigned_id` are dropped together with an empty
    /// `assigned_to`.
    #[must_use]
    pub fn maybe(
        assigned_to: Option<String>,
        assigned_type: Option<String>,
        assigned_id: Option<String>,
    ) -> Option<Self> {
        assigned_to
            .filter(|value| !value.is_empty())
            .map(|assigned_to| Self {
                assigned_to,
                assigned_type,
                assigned_id,
            })
    }
}

/// Requested change of a space's assignment.
///
/// Every field is optional. A missing or empty `assigned_to` means "release
/// the space".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentRequest {
    pub assigned_to: Option<String>,
    pub assigned_type: Option<String>,
    pub assigned_id: Option<String>,
}

impl AssignmentRequest {
    /// Request that releases the space.
    #[must_use]
    pub fn release() -> Self {
        Self::default()
    }

    /// Request that assigns the space to `assigned_to`.
    #[must_use]
    pub fn assign(assigned_to: impl Into<String>) -> Self {
        Self {
            assigned_to: Some(assigned_to.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_type(mut self, assigned_type: impl Into<String>) -> Self {
        self.assigned_type = Some(assigned_type.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, assigned_id: impl Into<String>) -> Self {
        self.assigned_id = Some(assigned_id.into());
        self
    }
}

/// The exact set of columns an assignment change writes.
///
/// Nothing outside these five fields is ever patched after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentPatch {
    pub assigned_to: Option<String>,
    pub assigned_type: Option<String>,
    pub assigned_id: Option<String>,
    pub status: SpaceStatus,
    pub updated_at: Timestamp,
}

/// A hospital space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Space {
    /// Storage identity, set once the space has been persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub space_id: SpaceId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub floor: i32,
    pub capacity: u32,
    status: SpaceStatus,
    #[serde(flatten)]
    assignment: Option<Assignment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Space {
    /// Create a builder for constructing a [`Space`].
    #[must_use]
    pub fn builder() -> SpaceBuilder {
        SpaceBuilder::default()
    }

    #[must_use]
    pub fn status(&self) -> SpaceStatus {
        self.status
    }

    /// Current assignment, present exactly when the space is occupied.
    #[must_use]
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Apply an assignment change and stamp `updated_at`.
    ///
    /// A request with a non-empty `assigned_to` occupies the space with all
    /// three fields taken from the request. Anything else releases it and
    /// clears the assignment.
    pub fn apply_assignment(&mut self, request: AssignmentRequest, at: Timestamp) {
        self.assignment = Assignment::maybe(
            request.assigned_to,
            request.assigned_type,
            request.assigned_id,
        );
        self.status = status_for(self.assignment.as_ref());
        self.updated_at = at;
    }

    /// Columns to write after [`Space::apply_assignment`].
    #[must_use]
    pub fn assignment_patch(&self) -> AssignmentPatch {
        let (assigned_to, assigned_type, assigned_id) = match &self.assignment {
            Some(assignment) => (
                Some(assignment.assigned_to.clone()),
                assignment.assigned_type.clone(),
                assignment.assigned_id.clone(),
            ),
            None => (None, None, None),
        };
        AssignmentPatch {
            assigned_to,
            assigned_type,
            assigned_id,
            status: self.status,
            updated_at: self.updated_at,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::Validation`] when a required attribute is
    /// empty or the capacity is zero.
    pub fn validate(&self) -> Result<(), WardHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if self.kind.is_empty() {
            return Err(ValidationError::MissingField("type").into());
        }
        if self.capacity == 0 {
            return Err(ValidationError::ZeroCapacity.into());
        }
        Ok(())
    }
}

fn status_for(assignment: Option<&Assignment>) -> SpaceStatus {
    if assignment.is_some() {
        SpaceStatus::Occupied
    } else {
        SpaceStatus::Available
    }
}

/// Step-by-step builder for [`Space`].
///
/// Without an explicit `space_id` or timestamps, `build` stamps a fresh
/// identity and sets both timestamps to the same instant. The adapters use the
/// explicit setters to restore persisted spaces.
#[derive(Debug, Default)]
pub struct SpaceBuilder {
    id: Option<RecordId>,
    space_id: Option<SpaceId>,
    name: Option<String>,
    kind: Option<String>,
    floor: i32,
    capacity: u32,
    assignment: Option<Assignment>,
    created_at: Option<Timestamp>,
    updated_at: Option<Timestamp>,
}

impl SpaceBuilder {
    #[must_use]
    pub fn id(mut self, id: RecordId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn space_id(mut self, space_id: SpaceId) -> Self {
        self.space_id = Some(space_id);
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
    pub fn floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    #[must_use]
    pub fn assignment(mut self, assignment: Option<Assignment>) -> Self {
        self.assignment = assignment.filter(|a| !a.assigned_to.is_empty());
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

    /// Consume the builder, validate, and return a [`Space`].
    ///
    /// # Errors
    ///
    /// Returns [`WardHubError::Validation`] if `name` or `type` is missing or
    /// empty, or `capacity` is zero.
    pub fn build(self) -> Result<Space, WardHubError> {
        let created_at = self.created_at.unwrap_or_else(now);
        let space = Space {
            id: self.id,
            space_id: self.space_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            floor: self.floor,
            capacity: self.capacity,
            status: status_for(self.assignment.as_ref()),
            assignment: self.assignment,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        };
        space.validate()?;
        Ok(space)
    }
}
