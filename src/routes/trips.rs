use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;
use crate::models::{CreateTripRequest, DeleteTripResponse, TripKind, TripListResponse};
use crate::routes::{error_response, matches, store_error_response, AppState};

/// Configure rider and passenger collection routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .service(
            web::scope("/riders")
                .app_data(web::Data::new(TripKind::Rider))
                .configure(collection_routes),
        )
        .service(
            web::scope("/passengers")
                .app_data(web::Data::new(TripKind::Passenger))
                .configure(collection_routes),
        );
}

fn collection_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .route("", web::get().to(list_trips))
        .route("", web::post().to(create_trip))
        .route("/{id}", web::get().to(get_trip))
        .route("/{id}", web::delete().to(delete_trip))
        .route("/{id}/matches", web::get().to(matches::matches_for_trip));
}

/// List a collection
///
/// GET /api/v1/riders, GET /api/v1/passengers
async fn list_trips(state: web::Data<AppState>, kind: web::Data<TripKind>) -> HttpResponse {
    match state.store.list(*kind.get_ref()).await {
        Ok(trips) => HttpResponse::Ok().json(TripListResponse {
            count: trips.len(),
            trips: trips.to_vec(),
        }),
        Err(e) => store_error_response(&e),
    }
}

/// Create a trip
///
/// POST /api/v1/riders, POST /api/v1/passengers
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "source": "string",
///   "destination": "string",
///   "sourceLongitude": 0.0,
///   "sourceLatitude": 0.0,
///   "destinationLongitude": 0.0,
///   "destinationLatitude": 0.0,
///   "time": "string"
/// }
/// ```
async fn create_trip(
    state: web::Data<AppState>,
    kind: web::Data<TripKind>,
    req: web::Json<CreateTripRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for new {}: field_errors={:?}", kind.get_ref(), errors);
        return error_response(StatusCode::BAD_REQUEST, "validation_failed", errors);
    }

    match state.store.insert(*kind.get_ref(), req.into_inner()).await {
        Ok(trip) => {
            tracing::info!("Created {} {} ({} -> {})", kind.get_ref(), trip.id, trip.source, trip.destination);
            HttpResponse::Created().json(trip)
        }
        Err(e) => store_error_response(&e),
    }
}

/// GET /api/v1/{riders|passengers}/{id}
async fn get_trip(
    state: web::Data<AppState>,
    kind: web::Data<TripKind>,
    id: web::Path<i64>,
) -> HttpResponse {
    match state.store.get(*kind.get_ref(), id.into_inner()).await {
        Ok(trip) => HttpResponse::Ok().json(trip),
        Err(e) => store_error_response(&e),
    }
}

/// DELETE /api/v1/{riders|passengers}/{id}
async fn delete_trip(
    state: web::Data<AppState>,
    kind: web::Data<TripKind>,
    id: web::Path<i64>,
) -> HttpResponse {
    match state.store.delete(*kind.get_ref(), id.into_inner()).await {
        Ok(trip) => {
            tracing::info!("Deleted {} {}", kind.get_ref(), trip.id);
            HttpResponse::Ok().json(DeleteTripResponse {
                success: true,
                id: trip.id,
            })
        }
        Err(e) => store_error_response(&e),
    }
}
