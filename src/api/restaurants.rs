//! Restaurant API handlers

use crate::db::{models::Restaurant, Db};
use crate::error::AppError;
use axum::{extract::State, response::Json};

/// GET /api/restaurants - List all restaurants
pub async fn list_restaurants(State(db): State<Db>) -> Result<Json<Vec<Restaurant>>, AppError> {
    Ok(Json(db.list_restaurants().await?))
}
