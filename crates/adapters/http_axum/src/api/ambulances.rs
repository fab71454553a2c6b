//! JSON REST handlers for ambulances.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use wardhub_app::ports::{AmbulanceRepository, SpaceRepository};
use wardhub_domain::ambulance::Ambulance;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering an ambulance.
#[derive(Deserialize)]
pub struct CreateAmbulanceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Ambulance>>),
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
    Created(Json<Ambulance>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/ambulances`
pub async fn list<SR, AR>(
    State(state): State<AppState<SR, AR>>,
) -> Result<ListResponse, ApiError>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    let ambulances = state.ambulance_service.list_ambulances().await?;
    Ok(ListResponse::Ok(Json(ambulances)))
}

/// `POST /api/ambulances`
pub async fn create<SR, AR>(
    State(state): State<AppState<SR, AR>>,
    body: Result<Json<CreateAmbulanceRequest>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    SR: SpaceRepository + Send + Sync + 'static,
    AR: AmbulanceRepository + Send + Sync + 'static,
{
    let Json(req) = body?;
    let ambulance = Ambulance::builder()
        .name(req.name)
        .kind(req.kind)
        .location(req.location)
        .build()?;
    let created = state.ambulance_service.create_ambulance(ambulance).await?;
    Ok(CreateResponse::Created(Json(created)))
}
