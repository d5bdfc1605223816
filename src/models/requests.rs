use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Trip;

/// Request to create a rider or passenger trip
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub source: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default, alias = "source_longitude", rename = "sourceLongitude")]
    pub source_longitude: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default, alias = "source_latitude", rename = "sourceLatitude")]
    pub source_latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default, alias = "destination_longitude", rename = "destinationLongitude")]
    pub destination_longitude: Option<f64>,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default, alias = "destination_latitude", rename = "destinationLatitude")]
    pub destination_latitude: Option<f64>,
    #[validate(length(min = 1))]
    pub time: String,
}

impl CreateTripRequest {
    /// Build the stored record for this request
    pub fn into_trip(self, id: i64, created_at: DateTime<Utc>) -> Trip {
        Trip {
            id,
            name: self.name,
            source: self.source,
            destination: self.destination,
            source_longitude: self.source_longitude,
            source_latitude: self.source_latitude,
            destination_longitude: self.destination_longitude,
            destination_latitude: self.destination_latitude,
            time: self.time,
            created_at,
        }
    }
}

/// Ad-hoc match query by place names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchQuery {
    pub source: String,
    pub destination: String,
}
