//! Reservation API handlers
//!
//! Creation and deletion are nested under a customer path so the owning
//! customer id always comes from the URL, never the body.

use crate::db::{models::Reservation, Db};
use crate::error::AppError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

/// Create reservation request body
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    /// Restaurant to reserve
    pub restaurant_id: String,
    /// Calendar date of the booking (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Number of people in the party
    pub party_count: i64,
}

/// GET /api/reservations - List all reservations
pub async fn list_reservations(State(db): State<Db>) -> Result<Json<Vec<Reservation>>, AppError> {
    Ok(Json(db.list_reservations().await?))
}

/// POST /api/customers/:customer_id/reservations - Create a reservation
///
/// No validation of `party_count` positivity or `date` pastness; anything the
/// schema accepts is accepted here, and constraint violations surface as 500.
pub async fn create_reservation(
    State(db): State<Db>,
    Path(customer_id): Path<String>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let reservation = db
        .create_reservation(
            request.date,
            request.party_count,
            &request.restaurant_id,
            &customer_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// DELETE /api/customers/:customer_id/reservations/:id - Delete a reservation
///
/// Responds 204 whether or not a row was actually deleted; a mismatched
/// id/customer pair is "nothing to delete", not an authorization error.
pub async fn delete_reservation(
    State(db): State<Db>,
    Path((customer_id, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    db.delete_reservation(&id, &customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
