//! JSON REST handlers for hospital spaces.

use std::str::FromStr;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use wardhub_app::ports::{AmbulanceRepository, SpaceRepository};
use wardhub_domain::error::ValidationError;
use wardhub_domain::id::SpaceId;
use wardhub_domain::space::{AssignmentRequest, Space};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a space.
#[derive(Deserialize)]
pub struct CreateSpaceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub floor: i32,
    pub capacity: u32,
}

/// Request body for changing a space's assignment.
///
/// An empty object releases the space.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct UpdateSpaceRequest {
    pub assigned_to: Option<String>,
    pub assigned_type: Option<String>,
    pub assigned_id: Option<String>,
}

impl From<UpdateSpaceRequest> for AssignmentRequest {
    fn from(req: UpdateSpaceRequest) -> Self {
        Self {
            assigned_to: req.assigned_to,
            assigned_type: req.assigned_type,
            assigned_id: req.assigned_id,
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Space>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Space>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the update endpoint.
pub enum UpdateResponse {
    Ok(Json<Space>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

fn parse_space_id(raw: &str) -> Result<SpaceId, ApiError> {
    SpaceId::from_str(raw).map_err(|_| ValidationError::InvalidId { entity: "space" }.into())
}

/// `GET /api/spaces`
pub async fn list<SR, AR>(State(state): State<AppState<SR, AR>>) -> Result<ListResponse, ApiError>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    let spaces = state.space_service.list_spaces().await?;
    Ok(ListResponse::Ok(Json(spaces)))
}

/// `POST /api/spaces`
pub async fn create<SR, AR>(
    State(state): State<AppState<SR, AR>>,
    body: Result<Json<CreateSpaceRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let space = Space::builder()
        .name(req.name)
        .kind(req.kind)
        .floor(req.floor)
        .capacity(req.capacity)
        .build()?;
    let created = state.space_service.create_space(space).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/spaces/:id`
pub async fn update<SR, AR>(
    State(state): State<AppState<SR, AR>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateSpaceRequest>, JsonRejection>,
) -> Result<UpdateResponse, ApiError>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    let space_id = parse_space_id(&id)?;
    let Json(req) = body?;
    let updated = state
        .space_service
        .update_assignment(space_id, req.into())
        .await?;
    Ok(UpdateResponse::Ok(Json(updated)))
}

/// `DELETE /api/spaces/:id`
pub async fn delete<SR, AR>(
    State(state): State<AppState<SR, AR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    let space_id = parse_space_id(&id)?;
    state.space_service.delete_space(space_id).await?;
    Ok(DeleteResponse::NoContent)
}
