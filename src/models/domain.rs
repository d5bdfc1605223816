use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of a ride a trip offer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripKind {
    Rider,
    Passenger,
}

impl TripKind {
    /// Name of the collection this kind is stored in
    pub fn collection(&self) -> &'static str {
        match self {
            TripKind::Rider => "riders",
            TripKind::Passenger => "passengers",
        }
    }

    /// The kind a trip of this kind is matched against
    ///
    /// Riders look for passengers and passengers look for riders.
    pub fn counterpart(&self) -> TripKind {
        match self {
            TripKind::Rider => TripKind::Passenger,
            TripKind::Passenger => TripKind::Rider,
        }
    }
}

impl std::fmt::Display for TripKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripKind::Rider => write!(f, "rider"),
            TripKind::Passenger => write!(f, "passenger"),
        }
    }
}

/// A stored rider or passenger travel offer
///
/// Coordinates are kept for clients but play no part in matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub source: String,
    pub destination: String,
    #[serde(rename = "sourceLongitude", default)]
    pub source_longitude: Option<f64>,
    #[serde(rename = "sourceLatitude", default)]
    pub source_latitude: Option<f64>,
    #[serde(rename = "destinationLongitude", default)]
    pub destination_longitude: Option<f64>,
    #[serde(rename = "destinationLatitude", default)]
    pub destination_latitude: Option<f64>,
    pub time: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Next trip id given the last issued one and the current time in epoch millis
///
/// Ids track wall-clock time but never repeat or go backwards.
#[inline]
pub fn next_trip_id(last_issued: i64, now_millis: i64) -> i64 {
    now_millis.max(last_issued.saturating_add(1))
}
