use actix_web::{web, HttpResponse};
use crate::models::{MatchQuery, MatchesResponse, TripKind};
use crate::routes::{store_error_response, AppState};

/// Configure ad-hoc match query routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/matches/passengers", web::get().to(find_passengers))
        .route("/matches/riders", web::get().to(find_riders));
}

/// Passengers a rider could take along
///
/// GET /api/v1/matches/passengers?source={source}&destination={destination}
async fn find_passengers(state: web::Data<AppState>, query: web::Query<MatchQuery>) -> HttpResponse {
    find_counterparts(&state, TripKind::Rider, &query.source, &query.destination).await
}

/// Riders a passenger could travel with
///
/// GET /api/v1/matches/riders?source={source}&destination={destination}
async fn find_riders(state: web::Data<AppState>, query: web::Query<MatchQuery>) -> HttpResponse {
    find_counterparts(&state, TripKind::Passenger, &query.source, &query.destination).await
}

/// Counterparts of a stored trip
///
/// GET /api/v1/riders/{id}/matches, GET /api/v1/passengers/{id}/matches
pub(crate) async fn matches_for_trip(
    state: web::Data<AppState>,
    kind: web::Data<TripKind>,
    id: web::Path<i64>,
) -> HttpResponse {
    let trip = match state.store.get(*kind.get_ref(), id.into_inner()).await {
        Ok(trip) => trip,
        Err(e) => return store_error_response(&e),
    };

    find_counterparts(&state, *kind.get_ref(), &trip.source, &trip.destination).await
}

/// Filter the counterpart collection of `kind` against a (source, destination) pair
async fn find_counterparts(
    state: &AppState,
    kind: TripKind,
    source: &str,
    destination: &str,
) -> HttpResponse {
    let pool = kind.counterpart();

    let candidates = match state.store.list(pool).await {
        Ok(candidates) => candidates,
        Err(e) => return store_error_response(&e),
    };

    let result = state.evaluator.find_matches(source, destination, &candidates);

    tracing::info!(
        "Returning {} {} matches for {} query {:?} -> {:?} (from {} candidates)",
        result.matches.len(),
        pool,
        kind,
        source,
        destination,
        result.total_candidates
    );

    HttpResponse::Ok().json(MatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}
