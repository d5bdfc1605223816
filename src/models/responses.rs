use serde::{Deserialize, Serialize};
use crate::models::domain::Trip;

/// Response for match queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<Trip>,
    pub total_candidates: usize,
}

/// Response for listing a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripListResponse {
    pub trips: Vec<Trip>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Delete trip response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTripResponse {
    pub success: bool,
    pub id: i64,
}
