//! History DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_motor::HistoryEvent;

/// One entry of a car's history as sent over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEventResponse {
    #[serde(rename_all = "camelCase")]
    Policy {
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        provider: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Claim {
        claim_date: NaiveDate,
        amount: Decimal,
        description: String,
    },
}

impl From<HistoryEvent> for HistoryEventResponse {
    fn from(event: HistoryEvent) -> Self {
        match event {
            HistoryEvent::Policy {
                start_date,
                end_date,
                provider,
            } => HistoryEventResponse::Policy {
                start_date,
                end_date,
                provider,
            },
            HistoryEvent::Claim {
                claim_date,
                amount,
                description,
            } => HistoryEventResponse::Claim {
                claim_date,
                amount,
                description,
            },
        }
    }
}
