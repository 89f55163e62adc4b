//! Repository contract for the booking-window singleton
//!
//! One global record: the furthest-out date clients may request. The record
//! is created lazily on first write.

use crate::error::DbError;

/// Repository for the booking-window singleton
pub trait BookingWindowRepository {
    /// Create the booking_window table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// The current max date, if one has been set.
    fn get(&self) -> impl std::future::Future<Output = Result<Option<String>, DbError>> + Send;

    /// Set (or create) the max date.
    fn set(
        &self,
        max_date: &str,
    ) -> impl std::future::Future<Output = Result<String, DbError>> + Send;
}
