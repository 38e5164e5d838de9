//! Storage access layer
//!
//! Owns the connection pool to the SQLite store, defines the schema, and
//! provides typed create/fetch/delete operations for the three entities.
//! Every statement uses parameter binding; no business logic lives here.

pub mod models;

use crate::error::AppError;
use chrono::NaiveDate;
use models::{Customer, Reservation, Restaurant};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Database handle shared by all request handlers
///
/// Constructed once in `main` and handed to the API layer at router
/// construction; cloning shares the underlying pool.
#[derive(Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    /// Connect to the database
    ///
    /// # Arguments
    /// * `database_url` - SQLite connection string (`sqlite:path/to/db.db`);
    ///   a bare file path is accepted and prefixed
    ///
    /// Foreign key enforcement is switched on for every connection so that
    /// reservation inserts referencing unknown rows fail at the store.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let connection_string = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite:{}", database_url)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to database at: {}", database_url);

        Ok(Self { pool })
    }

    /// Drop and recreate all three tables
    ///
    /// Destructive: all prior data is lost. Safe to call once at startup,
    /// never concurrently with live traffic.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        info!("Initializing database schema...");

        let schema_sql = include_str!("../../migrations/001_create_tables.sql");

        // Strip comment lines, then split on semicolons into single statements
        // since the SQLite driver executes one statement per query.
        let cleaned: String = schema_sql
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("--"))
            .collect::<Vec<_>>()
            .join(" ");

        for statement in cleaned.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Database schema initialized");
        Ok(())
    }

    /// Insert a new customer with a freshly generated identifier
    ///
    /// Fails with a uniqueness violation if the name already exists.
    pub async fn create_customer(&self, name: &str) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            "INSERT INTO customers (id, name) VALUES (?, ?) RETURNING id, name",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = %customer.id, name = %customer.name, "Created customer");
        Ok(customer)
    }

    /// Insert a new restaurant with a freshly generated identifier
    ///
    /// Fails with a uniqueness violation if the name already exists.
    pub async fn create_restaurant(&self, name: &str) -> Result<Restaurant, AppError> {
        let restaurant = sqlx::query_as::<_, Restaurant>(
            "INSERT INTO restaurants (id, name) VALUES (?, ?) RETURNING id, name",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = %restaurant.id, name = %restaurant.name, "Created restaurant");
        Ok(restaurant)
    }

    /// Insert a new reservation with a freshly generated identifier
    ///
    /// Existence of the referenced customer and restaurant is not checked
    /// here; a foreign key violation surfaces as a storage error.
    pub async fn create_reservation(
        &self,
        date: NaiveDate,
        party_count: i64,
        restaurant_id: &str,
        customer_id: &str,
    ) -> Result<Reservation, AppError> {
        let reservation = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (id, date, party_count, restaurant_id, customer_id) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING id, date, party_count, restaurant_id, customer_id",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(date)
        .bind(party_count)
        .bind(restaurant_id)
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = %reservation.id, customer_id = %customer_id, "Created reservation");
        Ok(reservation)
    }

    /// Delete the reservation matching both `id` and `customer_id`
    ///
    /// Matching on both columns is the ownership check: a customer may only
    /// delete their own reservation. A mismatched pair deletes zero rows and
    /// is not an error.
    pub async fn delete_reservation(&self, id: &str, customer_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ? AND customer_id = ?")
            .bind(id)
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        debug!(
            id = %id,
            customer_id = %customer_id,
            rows = result.rows_affected(),
            "Deleted reservation"
        );
        Ok(())
    }

    /// Fetch all customers, store-default order
    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>("SELECT id, name FROM customers")
            .fetch_all(&self.pool)
            .await?;

        Ok(customers)
    }

    /// Fetch all restaurants, store-default order
    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let restaurants = sqlx::query_as::<_, Restaurant>("SELECT id, name FROM restaurants")
            .fetch_all(&self.pool)
            .await?;

        Ok(restaurants)
    }

    /// Fetch all reservations, store-default order
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT id, date, party_count, restaurant_id, customer_id FROM reservations",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reservations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_db() -> (TempDir, Db) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("test.db");
        let db = Db::connect(&format!("sqlite:{}", path.display()))
            .await
            .expect("failed to connect");
        db.init_schema().await.expect("failed to init schema");
        (dir, db)
    }

    fn christmas() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()
    }

    #[tokio::test]
    async fn duplicate_customer_name_is_rejected() {
        let (_dir, db) = test_db().await;

        db.create_customer("Alexis").await.unwrap();
        let result = db.create_customer("Alexis").await;
        assert!(result.is_err(), "second insert with same name must fail");

        let customers = db.list_customers().await.unwrap();
        assert_eq!(customers.len(), 1, "failed insert must not leave a row");
    }

    #[tokio::test]
    async fn duplicate_restaurant_name_is_rejected() {
        let (_dir, db) = test_db().await;

        db.create_restaurant("McDonalds").await.unwrap();
        assert!(db.create_restaurant("McDonalds").await.is_err());
        assert_eq!(db.list_restaurants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn reservation_requires_existing_customer_and_restaurant() {
        let (_dir, db) = test_db().await;
        let customer = db.create_customer("Kelsey").await.unwrap();
        let restaurant = db.create_restaurant("Pizza Hut").await.unwrap();

        let bogus = Uuid::new_v4().to_string();
        assert!(db
            .create_reservation(christmas(), 2, &bogus, &customer.id)
            .await
            .is_err());
        assert!(db
            .create_reservation(christmas(), 2, &restaurant.id, &bogus)
            .await
            .is_err());

        assert!(
            db.list_reservations().await.unwrap().is_empty(),
            "no reservation row after failed inserts"
        );
    }

    #[tokio::test]
    async fn created_reservation_round_trips() {
        let (_dir, db) = test_db().await;
        let customer = db.create_customer("Erick").await.unwrap();
        let restaurant = db.create_restaurant("Burger King").await.unwrap();

        let created = db
            .create_reservation(christmas(), 4, &restaurant.id, &customer.id)
            .await
            .unwrap();

        let listed = db.list_reservations().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].date, christmas());
        assert_eq!(listed[0].party_count, 4);
        assert_eq!(listed[0].restaurant_id, restaurant.id);
        assert_eq!(listed[0].customer_id, customer.id);
    }

    #[tokio::test]
    async fn owner_can_delete_reservation() {
        let (_dir, db) = test_db().await;
        let customer = db.create_customer("Esti").await.unwrap();
        let restaurant = db.create_restaurant("Chick-fil-A").await.unwrap();
        let reservation = db
            .create_reservation(christmas(), 3, &restaurant.id, &customer.id)
            .await
            .unwrap();

        db.delete_reservation(&reservation.id, &customer.id)
            .await
            .unwrap();

        assert!(db.list_reservations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mismatched_customer_delete_is_a_silent_no_op() {
        let (_dir, db) = test_db().await;
        let owner = db.create_customer("Alexis").await.unwrap();
        let other = db.create_customer("Erick").await.unwrap();
        let restaurant = db.create_restaurant("McDonalds").await.unwrap();
        let reservation = db
            .create_reservation(christmas(), 4, &restaurant.id, &owner.id)
            .await
            .unwrap();

        // Wrong customer: zero rows match, still Ok.
        db.delete_reservation(&reservation.id, &other.id)
            .await
            .unwrap();

        let listed = db.list_reservations().await.unwrap();
        assert_eq!(listed.len(), 1, "reservation must survive mismatched delete");
        assert_eq!(listed[0].id, reservation.id);
    }

    #[tokio::test]
    async fn init_schema_wipes_existing_data() {
        let (_dir, db) = test_db().await;
        db.create_customer("Alexis").await.unwrap();

        db.init_schema().await.unwrap();

        assert!(db.list_customers().await.unwrap().is_empty());
    }
}
