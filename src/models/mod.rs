// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Trip, TripKind, next_trip_id};
pub use requests::{CreateTripRequest, MatchQuery};
pub use responses::{MatchesResponse, TripListResponse, HealthResponse, ErrorResponse, DeleteTripResponse};
