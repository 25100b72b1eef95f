use axum::{extract::Query, http::StatusCode, Json};
use tracing::{debug, warn};

use super::models::*;
use crate::geo::Coordinate;
use crate::polyline;

/// Intermediate vertices on the synthetic straight-line route
const SEGMENTS: usize = 8;

pub async fn walking_directions(
    Query(query): Query<DirectionsQuery>,
) -> Result<Json<DirectionsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let origin = parse_point("origin", &query.origin)?;
    let destination = parse_point("destination", &query.destination)?;

    debug!(origin = %query.origin, destination = %query.destination, mode = %query.mode, "directions request");

    if query.mode != "walking" {
        return Ok(Json(DirectionsResponse::failure("UNSUPPORTED_MODE")));
    }
    if origin == destination {
        return Ok(Json(DirectionsResponse::failure("ZERO_RESULTS")));
    }

    let path = straight_line(origin, destination);
    Ok(Json(DirectionsResponse::success(polyline::encode(&path))))
}

fn parse_point(name: &str, value: &str) -> Result<Coordinate, (StatusCode, Json<ErrorResponse>)> {
    Coordinate::parse_query_value(value).ok_or_else(|| {
        warn!(%name, %value, "rejecting malformed coordinate");
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid {} '{}', expected lat,lng", name, value),
            }),
        )
    })
}

/// Evenly spaced points from `from` to `to`, both included
pub fn straight_line(from: Coordinate, to: Coordinate) -> Vec<Coordinate> {
    (0..=SEGMENTS)
        .map(|i| {
            let t = i as f64 / SEGMENTS as f64;
            Coordinate::new(
                from.latitude + (to.latitude - from.latitude) * t,
                from.longitude + (to.longitude - from.longitude) * t,
            )
        })
        .collect()
}
