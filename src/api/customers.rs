//! Customer API handlers

use crate::db::{models::Customer, Db};
use crate::error::AppError;
use axum::{extract::State, response::Json};

/// GET /api/customers - List all customers
pub async fn list_customers(State(db): State<Db>) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(db.list_customers().await?))
}
