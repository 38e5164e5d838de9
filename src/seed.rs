//! Startup demo seeding
//!
//! Inserts the fixed demo records once at startup: four customers, four
//! restaurants, and one reservation. Each batch is a parallel all-or-nothing
//! fan-out; the first failure aborts the whole seed step.

use crate::db::Db;
use crate::error::AppError;
use chrono::NaiveDate;
use tracing::info;

/// Seed the database with demo customers, restaurants, and one reservation
pub async fn seed_demo_data(db: &Db) -> Result<(), AppError> {
    info!("Seeding demo data...");

    let (alexis, _erick, _kelsey, _esti) = tokio::try_join!(
        db.create_customer("Alexis"),
        db.create_customer("Erick"),
        db.create_customer("Kelsey"),
        db.create_customer("Esti"),
    )?;

    let (mcdonalds, _pizza_hut, _burger_king, _chick_fil_a) = tokio::try_join!(
        db.create_restaurant("McDonalds"),
        db.create_restaurant("Pizza Hut"),
        db.create_restaurant("Burger King"),
        db.create_restaurant("Chick-fil-A"),
    )?;

    let date = NaiveDate::from_ymd_opt(2024, 12, 25)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("invalid seed date")))?;
    db.create_reservation(date, 4, &mcdonalds.id, &alexis.id)
        .await?;

    info!(
        customers = db.list_customers().await?.len(),
        restaurants = db.list_restaurants().await?.len(),
        reservations = db.list_reservations().await?.len(),
        "Demo data seeded"
    );

    Ok(())
}
