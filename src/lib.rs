//! Ride Match - rider and passenger trip matching service
//!
//! Stores rider and passenger trip offers in flat JSON files and answers
//! match queries by comparing place names of the two sides.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{MatchEvaluator, MatchQuality, score};
pub use crate::models::{Trip, TripKind, CreateTripRequest, MatchQuery, MatchesResponse};
pub use crate::services::{TripStore, StoreError};
