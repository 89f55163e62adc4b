//! Persistence layer for Slotbook
//!
//! This crate is agnostic of the specific database backend: SQLx's `Any`
//! driver carries the connection (SQLite by default, Postgres/MySQL behind
//! features), and every entity is exposed through a repository trait so the
//! feature crates never see SQL.

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use factory::{DbClientFactory, SqlStores};
pub use repositories::{
    BookingChanges, BookingRepository, BookingWindowRepository, DayRepository,
    SqlBookingRepository, SqlBookingWindowRepository, SqlDayRepository,
};
