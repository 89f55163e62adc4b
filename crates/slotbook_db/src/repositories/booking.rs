//! Repository contract for booking records
//!
//! Operations are atomic at the single-record level; there is no
//! multi-record transaction guarantee.

use crate::error::DbError;

// Re-export the entity from slotbook_common for convenience
pub use slotbook_common::models::{Booking, BookingStatus, PaymentMethod, PaymentStatus};

/// A partial update to a booking's status/payment fields.
///
/// Fields left as `None` are not touched.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub payment_method: Option<PaymentMethod>,
}

impl BookingChanges {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.payment_status.is_none() && self.payment_method.is_none()
    }
}

/// Repository for booking records
pub trait BookingRepository {
    /// Create the bookings table if it doesn't already exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Store a new booking.
    fn create(
        &self,
        booking: Booking,
    ) -> impl std::future::Future<Output = Result<Booking, DbError>> + Send;

    /// All bookings.
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<Booking>, DbError>> + Send;

    /// Look a booking up by its id.
    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// Apply a partial status/payment update.
    ///
    /// # Returns
    ///
    /// The updated booking, or `None` if no booking with that id exists.
    fn update_fields(
        &self,
        id: &str,
        changes: BookingChanges,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// Move a booking to a new date/hour-slot.
    ///
    /// # Returns
    ///
    /// The updated booking, or `None` if no booking with that id exists.
    fn update_date_hours(
        &self,
        id: &str,
        date: &str,
        hours: &str,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, DbError>> + Send;

    /// Remove a booking.
    ///
    /// # Returns
    ///
    /// `true` if a record was deleted, `false` if the id was unknown.
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
