//! Car handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use core_kernel::temporal::parse_supported_date;
use core_kernel::CarId;
use domain_motor::MotorError;

use crate::dto::cars::{CarResponse, ValidityQuery, ValidityResponse};
use crate::dto::history::HistoryEventResponse;
use crate::{error::ApiError, AppState};

/// Lists every car with its owner
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let cars = state.store.list_cars().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}

/// Tells whether a car is insured on the requested date
///
/// The date is checked before anything is read from the store.
pub async fn insurance_valid(
    State(state): State<AppState>,
    Path(car_id): Path<CarId>,
    Query(query): Query<ValidityQuery>,
) -> Result<Json<ValidityResponse>, ApiError> {
    let raw = query
        .date
        .ok_or_else(|| ApiError::BadRequest("Missing required query parameter 'date'".to_string()))?;
    let date = parse_supported_date(&raw)?;

    ensure_car_exists(&state, car_id).await?;
    let valid = state.evaluator.is_insurance_valid(car_id, date).await?;

    Ok(Json(ValidityResponse {
        car_id: *car_id.as_uuid(),
        date,
        valid,
    }))
}

/// Returns the car's policies and claims in chronological order
pub async fn car_history(
    State(state): State<AppState>,
    Path(car_id): Path<CarId>,
) -> Result<Json<Vec<HistoryEventResponse>>, ApiError> {
    ensure_car_exists(&state, car_id).await?;
    let events = state.merger.car_history(car_id).await?;

    debug!(car_id = %car_id, events = events.len(), "Built car history");
    Ok(Json(events.into_iter().map(HistoryEventResponse::from).collect()))
}

pub(crate) async fn ensure_car_exists(state: &AppState, car_id: CarId) -> Result<(), ApiError> {
    match state.store.find_car_by_id(car_id).await? {
        Some(_) => Ok(()),
        None => Err(MotorError::CarNotFound(car_id).into()),
    }
}
