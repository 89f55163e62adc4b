//! Repositories for database access
//!
//! Each entity gets a trait describing its store contract and a SQL
//! implementation of that trait. Handlers and the reconciliation engine
//! depend on the traits, so tests can substitute lightweight fakes.

pub mod booking;
pub mod booking_sql;
pub mod day;
pub mod day_sql;
pub mod window;
pub mod window_sql;

pub use booking::{BookingChanges, BookingRepository};
pub use booking_sql::SqlBookingRepository;
pub use day::DayRepository;
pub use day_sql::SqlDayRepository;
pub use window::BookingWindowRepository;
pub use window_sql::SqlBookingWindowRepository;
