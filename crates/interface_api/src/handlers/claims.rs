//! Claims handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::info;
use validator::Validate;

use core_kernel::{CarId, ClaimId};
use domain_motor::MotorError;

use crate::dto::claims::{ClaimResponse, CreateClaimRequest};
use crate::handlers::cars::ensure_car_exists;
use crate::{error::ApiError, AppState};

/// Records a new claim against a car
///
/// Responds 201 with a `Location` header pointing at the stored claim.
pub async fn create_claim(
    State(state): State<AppState>,
    Path(car_id): Path<CarId>,
    payload: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    request.validate()?;

    ensure_car_exists(&state, car_id).await?;
    let claim = state.store.save_claim(request.into_new_claim(car_id)).await?;

    info!(car_id = %car_id, claim_id = %claim.id, amount = %claim.amount, "Claim recorded");

    let location = format!("/api/cars/{}/claims/{}", car_id.as_uuid(), claim.id.as_uuid());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClaimResponse::from(claim)),
    ))
}

/// Fetches one claim of a car
pub async fn get_claim(
    State(state): State<AppState>,
    Path((car_id, claim_id)): Path<(CarId, ClaimId)>,
) -> Result<Json<ClaimResponse>, ApiError> {
    ensure_car_exists(&state, car_id).await?;
    let claim = state
        .store
        .find_claim(car_id, claim_id)
        .await?
        .ok_or(MotorError::ClaimNotFound(claim_id))?;

    Ok(Json(claim.into()))
}
