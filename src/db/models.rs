//! Data models for the reservation planner
//!
//! Defines the three persisted entities. Each row maps straight onto JSON for
//! the API layer, so the structs double as response bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person who books reservations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    /// Unique identifier (UUID string)
    pub id: String,
    /// Customer name, globally unique
    pub name: String,
}

/// A venue that can be reserved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Restaurant {
    /// Unique identifier (UUID string)
    pub id: String,
    /// Restaurant name, globally unique
    pub name: String,
}

/// A booking linking one customer, one restaurant, a date, and a party size
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    /// Unique identifier (UUID string)
    pub id: String,
    /// Calendar date of the booking
    pub date: NaiveDate,
    /// Number of people in the party
    pub party_count: i64,
    /// The reserved restaurant
    pub restaurant_id: String,
    /// The customer who owns the booking
    pub customer_id: String,
}
