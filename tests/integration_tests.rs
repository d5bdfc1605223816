// Integration tests for Ride Match

use actix_web::{http::StatusCode, test, web, App};
use ride_match::core::MatchEvaluator;
use ride_match::models::{
    CreateTripRequest, DeleteTripResponse, ErrorResponse, HealthResponse, MatchesResponse, Trip,
    TripKind, TripListResponse,
};
use ride_match::routes::{self, AppState};
use ride_match::services::{StoreFiles, TripStore};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn create_request(name: &str, source: &str, destination: &str) -> CreateTripRequest {
    CreateTripRequest {
        name: name.to_string(),
        source: source.to_string(),
        destination: destination.to_string(),
        source_longitude: None,
        source_latitude: None,
        destination_longitude: None,
        destination_latitude: None,
        time: "2024-05-01T08:00:00Z".to_string(),
    }
}

fn create_state(dir: &TempDir) -> AppState {
    AppState {
        store: Arc::new(TripStore::new(dir.path(), StoreFiles::default(), 16, 60)),
        evaluator: MatchEvaluator::default(),
    }
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(routes::configure_extractors)
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_end_to_end_rider_query_against_passengers() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);

    let airport = state
        .store
        .insert(TripKind::Passenger, create_request("Ana", "Airport", "Downtown"))
        .await
        .unwrap();
    state
        .store
        .insert(TripKind::Passenger, create_request("Ben", "Mall", "Suburb"))
        .await
        .unwrap();

    let passengers = state.store.list(TripKind::Passenger).await.unwrap();
    let result = state.evaluator.find_matches("Airport", "City", &passengers);

    assert_eq!(result.total_candidates, 2);
    assert_eq!(result.matches, vec![airport]);
}

#[actix_web::test]
async fn test_create_and_list_riders() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/riders")
        .set_json(json!({
            "name": "Cleo",
            "source": "Airport",
            "destination": "Downtown",
            "sourceLatitude": 40.64,
            "sourceLongitude": -73.78,
            "time": "08:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Trip = test::read_body_json(resp).await;
    assert_eq!(created.source, "Airport");
    assert_eq!(created.source_latitude, Some(40.64));

    let req = test::TestRequest::get().uri("/api/v1/riders").to_request();
    let list: TripListResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.count, 1);
    assert_eq!(list.trips[0].id, created.id);

    let req = test::TestRequest::get().uri("/api/v1/passengers").to_request();
    let list: TripListResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list.count, 0);
}

#[actix_web::test]
async fn test_create_rejects_empty_fields() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/passengers")
        .set_json(json!({
            "name": "Dee",
            "source": "",
            "destination": "Downtown",
            "time": "08:00"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.status_code, 400);
    assert_eq!(body.error, "validation_failed");

    assert!(state.store.list(TripKind::Passenger).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_rejects_missing_fields() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/riders")
        .set_json(json!({ "name": "Eli" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_json");
}

#[actix_web::test]
async fn test_get_and_delete_trip() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let trip = state
        .store
        .insert(TripKind::Rider, create_request("Fay", "Harbor", "Station"))
        .await
        .unwrap();
    let passenger = state
        .store
        .insert(TripKind::Passenger, create_request("Gus", "Harbor", "Station"))
        .await
        .unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/riders/{}", trip.id))
        .to_request();
    let fetched: Trip = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, trip);

    // A rider id does not resolve in the passenger collection
    assert_ne!(passenger.id, trip.id);
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/passengers/{}", trip.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/passengers/{}", passenger.id))
        .to_request();
    let fetched: Trip = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched, passenger);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/riders/{}", trip.id))
        .to_request();
    let deleted: DeleteTripResponse = test::call_and_read_body_json(&app, req).await;
    assert!(deleted.success);
    assert_eq!(deleted.id, trip.id);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/riders/{}", trip.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_id() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/riders/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_path");
}

#[actix_web::test]
async fn test_match_query_endpoints() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let first = state
        .store
        .insert(TripKind::Passenger, create_request("Ana", "Airport", "Downtown"))
        .await
        .unwrap();
    state
        .store
        .insert(TripKind::Passenger, create_request("Ben", "Mall", "Suburb"))
        .await
        .unwrap();
    let rider = state
        .store
        .insert(TripKind::Rider, create_request("Cleo", "airport", "Old Town"))
        .await
        .unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/matches/passengers?source=Airport&destination=City")
        .to_request();
    let body: MatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.total_candidates, 2);
    assert_eq!(body.matches, vec![first]);

    let req = test::TestRequest::get()
        .uri("/api/v1/matches/riders?source=Mall&destination=old%20town")
        .to_request();
    let body: MatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.total_candidates, 1);
    assert_eq!(body.matches, vec![rider]);

    let req = test::TestRequest::get()
        .uri("/api/v1/matches/riders?source=Harbor&destination=Stadium")
        .to_request();
    let body: MatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.matches.is_empty());
}

#[actix_web::test]
async fn test_empty_query_matches_everything() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    for (name, source, destination) in [("Ana", "Airport", "Downtown"), ("Ben", "Mall", "Suburb")] {
        state
            .store
            .insert(TripKind::Passenger, create_request(name, source, destination))
            .await
            .unwrap();
    }
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/matches/passengers?source=&destination=")
        .to_request();
    let body: MatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.matches.len(), 2);
    assert_eq!(body.matches[0].name, "Ana");
    assert_eq!(body.matches[1].name, "Ben");
}

#[actix_web::test]
async fn test_match_query_requires_both_fields() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/v1/matches/passengers?source=Airport")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_query");
}

#[actix_web::test]
async fn test_matches_for_stored_trip() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let rider = state
        .store
        .insert(TripKind::Rider, create_request("Cleo", "Airport", "City"))
        .await
        .unwrap();
    let passenger = state
        .store
        .insert(TripKind::Passenger, create_request("Ana", "Airport", "Downtown"))
        .await
        .unwrap();
    state
        .store
        .insert(TripKind::Passenger, create_request("Ben", "Mall", "Suburb"))
        .await
        .unwrap();
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/riders/{}/matches", rider.id))
        .to_request();
    let body: MatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.matches, vec![passenger.clone()]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/passengers/{}/matches", passenger.id))
        .to_request();
    let body: MatchesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.matches, vec![rider]);

    let req = test::TestRequest::get()
        .uri("/api/v1/riders/1/matches")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_check() {
    let dir = TempDir::new().unwrap();
    let state = create_state(&dir);
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.status, "healthy");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}
