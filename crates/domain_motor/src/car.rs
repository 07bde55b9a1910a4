//! Car aggregate root

use serde::{Deserialize, Serialize};

use core_kernel::{CarId, OwnerId};

/// Person who owns a car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub email: Option<String>,
}

/// An insurable vehicle
///
/// Policies and claims hang off a car and are never moved to another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    /// Vehicle identification number
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner: Option<Owner>,
}

impl Car {
    pub fn new(
        vin: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
        year_of_manufacture: i32,
    ) -> Self {
        Self {
            id: CarId::new_v7(),
            vin: vin.into(),
            make: make.into(),
            model: model.into(),
            year_of_manufacture,
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = Some(owner);
        self
    }
}
