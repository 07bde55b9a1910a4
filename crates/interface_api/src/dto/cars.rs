//! Car DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_motor::Car;

/// A car with its owner flattened in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: Uuid,
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner_id: Option<Uuid>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

impl From<Car> for CarResponse {
    fn from(car: Car) -> Self {
        let (owner_id, owner_name, owner_email) = match car.owner {
            Some(owner) => (Some(*owner.id.as_uuid()), Some(owner.name), owner.email),
            None => (None, None, None),
        };

        Self {
            id: *car.id.as_uuid(),
            vin: car.vin,
            make: car.make,
            model: car.model,
            year_of_manufacture: car.year_of_manufacture,
            owner_id,
            owner_name,
            owner_email,
        }
    }
}

/// Query string of the validity endpoint
///
/// `date` stays a raw string so parsing errors become a 400 with our own
/// message instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct ValidityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidityResponse {
    pub car_id: Uuid,
    pub date: NaiveDate,
    pub valid: bool,
}
