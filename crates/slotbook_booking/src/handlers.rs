// File: crates/slotbook_booking/src/handlers.rs
use crate::logic::{
    self, CreateBookingRequest, CreateBookingResponse, EmailOutcome, EmailStatus,
    MessageResponse, RescheduleBookingRequest, UpdateBookingRequest,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use slotbook_common::models::{
    Booking, BookingStatus, Day, HourCatalogue, PaymentMethod, PaymentStatus,
};
use slotbook_common::logging::log_error;
use slotbook_common::services::{BoxedError, NotificationService};
use slotbook_common::{HttpStatusCode, SlotbookError};
use slotbook_config::AppConfig;
use slotbook_db::{BookingChanges, BookingRepository, DayRepository, DbError, SqlStores};
use slotbook_notify::templates;
use std::sync::Arc;
use tracing::{info, warn};

// Define shared state needed by booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub catalogue: HourCatalogue,
    pub stores: SqlStores,
    /// Absent when the email feature is disabled; booking writes then report
    /// both channels as skipped.
    pub notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

/// JSON error envelope, `{"error": "..."}`.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn db_error(e: DbError) -> ApiError {
    let err: SlotbookError = e.into();
    log_error(&err, "Store error");
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    api_error(status, "Internal server error")
}

// --- Request validation ---

fn require(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("{} is required", field),
        )),
    }
}

fn validate_date(date: &str) -> Result<(), ApiError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map(|_| ()).map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            "Invalid date format (YYYY-MM-DD)",
        )
    })
}

fn validate_hours(state: &BookingState, hours: &str) -> Result<(), ApiError> {
    if state.catalogue.contains(hours) {
        Ok(())
    } else {
        Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("Unknown hour-slot label: {}", hours),
        ))
    }
}

// --- Handlers ---

/// Handler to create a booking request.
///
/// The day record for the requested date is created lazily with an empty
/// hour list; availability is only pruned later, on confirmation.
#[axum::debug_handler]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), ApiError> {
    let name = require(payload.name, "name")?;
    let email = require(payload.email, "email")?;
    let phone_number = require(payload.phone_number, "phoneNumber")?;
    let date = require(payload.date, "date")?;
    let hours = require(payload.hours, "hours")?;
    validate_date(&date)?;
    validate_hours(&state, &hours)?;

    let existing_day = state
        .stores
        .days
        .find_by_date(&date)
        .await
        .map_err(db_error)?;
    if existing_day.is_none() {
        state
            .stores
            .days
            .create(Day::empty(date.as_str()))
            .await
            .map_err(db_error)?;
    }

    let booking = Booking {
        id: uuid::Uuid::new_v4().to_string(),
        name,
        email,
        phone_number,
        message: payload.message,
        how_did_you_hear: payload.how_did_you_hear,
        date,
        hours,
        status: BookingStatus::Unconfirmed,
        payment_status: PaymentStatus::Unpaid,
        payment_method: PaymentMethod::None,
    };

    let booking = state
        .stores
        .bookings
        .create(booking)
        .await
        .map_err(db_error)?;

    let email_status = dispatch_booking_emails(&state, &booking).await;
    info!(
        "Created booking {} for {} on {}",
        booking.id, booking.email, booking.date
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking,
            email_status,
            message: "Booking request received".to_string(),
        }),
    ))
}

/// Customer acknowledgment first, then the admin alert. Sequential on
/// purpose: each channel's outcome is recorded independently, and neither
/// failure reaches the caller as an error once the booking is stored.
async fn dispatch_booking_emails(state: &BookingState, booking: &Booking) -> EmailStatus {
    let Some(notifier) = state.notifier.as_ref() else {
        return EmailStatus::skipped();
    };

    let (subject, body) = templates::booking_received(booking);
    let customer_result = notifier
        .send_email(&booking.email, &subject, &body, false)
        .await;
    let customer = EmailOutcome::from_result(&customer_result, "customer acknowledgment");

    let admin = match state
        .config
        .booking
        .as_ref()
        .and_then(|b| b.admin_email.as_deref())
    {
        Some(admin_address) => {
            let (subject, body) = templates::booking_request_alert(booking);
            let admin_result = notifier
                .send_email(admin_address, &subject, &body, false)
                .await;
            EmailOutcome::from_result(&admin_result, "admin alert")
        }
        None => EmailOutcome::Skipped,
    };

    EmailStatus { customer, admin }
}

/// Handler to list all bookings.
#[axum::debug_handler]
pub async fn list_bookings_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    state
        .stores
        .bookings
        .find_all()
        .await
        .map(Json)
        .map_err(db_error)
}

/// Handler to fetch one booking.
#[axum::debug_handler]
pub async fn get_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<Booking>, ApiError> {
    state
        .stores
        .bookings
        .find_by_id(&booking_id)
        .await
        .map_err(db_error)?
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Booking not found"))
}

/// Handler to update a booking's status/payment fields.
///
/// Status moves are one-way from `unconfirmed`. Re-submitting the current
/// status is a no-op success; any other move off a terminal status is
/// rejected before anything is written.
#[axum::debug_handler]
pub async fn update_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, ApiError> {
    let booking = state
        .stores
        .bookings
        .find_by_id(&booking_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Booking not found"))?;

    let mut changes = BookingChanges::default();
    let mut status_transition: Option<BookingStatus> = None;

    if let Some(raw) = payload.status.as_deref() {
        let new_status = BookingStatus::parse(raw).ok_or_else(|| {
            api_error(StatusCode::BAD_REQUEST, format!("Unknown status: {}", raw))
        })?;

        if new_status != booking.status {
            if booking.status != BookingStatus::Unconfirmed {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    format!("Cannot change status of a {} booking", booking.status),
                ));
            }
            changes.status = Some(new_status);
            status_transition = Some(new_status);
        }
    }

    if let Some(raw) = payload.payment_status.as_deref() {
        changes.payment_status = Some(PaymentStatus::parse(raw).ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Unknown payment status: {}", raw),
            )
        })?);
    }

    if let Some(raw) = payload.payment_method.as_deref() {
        changes.payment_method = Some(PaymentMethod::parse(raw).ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("Unknown payment method: {}", raw),
            )
        })?);
    }

    if changes.is_empty() {
        // Nothing to write; covers the repeated-confirmation no-op.
        return Ok(Json(booking));
    }

    let updated = state
        .stores
        .bookings
        .update_fields(&booking_id, changes)
        .await
        .map_err(db_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Booking not found"))?;

    if let Some(new_status) = status_transition {
        // The status change has committed; slot accounting failures are
        // logged and skipped rather than rolled back.
        if let Err(e) = logic::reconcile_status_change(
            &state.stores.days,
            &updated,
            new_status,
            &state.catalogue,
        )
        .await
        {
            warn!(
                "Slot accounting failed for booking {} on {}: {}",
                updated.id, updated.date, e
            );
        }
    }

    Ok(Json(updated))
}

/// Handler to move a booking to a new date/hour-slot.
#[axum::debug_handler]
pub async fn reschedule_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<String>,
    Json(payload): Json<RescheduleBookingRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let date = require(payload.date, "date")?;
    let hours = require(payload.hours, "hours")?;
    validate_date(&date)?;
    validate_hours(&state, &hours)?;

    let booking = state
        .stores
        .bookings
        .find_by_id(&booking_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Booking not found"))?;

    let old_date = booking.date.clone();
    let old_hours = booking.hours.clone();

    state
        .stores
        .bookings
        .update_date_hours(&booking_id, &date, &hours)
        .await
        .map_err(db_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Booking not found"))?;

    if let Err(e) = logic::reconcile_reschedule(
        &state.stores.days,
        &old_date,
        &old_hours,
        &date,
        &hours,
        &state.catalogue,
    )
    .await
    {
        warn!(
            "Slot accounting failed rescheduling booking {}: {}",
            booking_id, e
        );
    }

    Ok(Json(MessageResponse {
        message: "Booking updated successfully".to_string(),
    }))
}

/// Handler to delete a booking, returning its slot to the day first.
#[axum::debug_handler]
pub async fn delete_booking_handler(
    State(state): State<Arc<BookingState>>,
    Path(booking_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let booking = state
        .stores
        .bookings
        .find_by_id(&booking_id)
        .await
        .map_err(db_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Booking not found"))?;

    // The release runs before the record goes away, so a store failure here
    // aborts the delete instead of orphaning the slot.
    logic::release_deleted_booking(
        &state.stores.days,
        &booking.date,
        &booking.hours,
        &state.catalogue,
    )
    .await
    .map_err(db_error)?;

    let deleted = state
        .stores
        .bookings
        .delete(&booking_id)
        .await
        .map_err(db_error)?;
    if !deleted {
        return Err(api_error(StatusCode::NOT_FOUND, "Booking not found"));
    }

    Ok(Json(MessageResponse {
        message: "Booking deleted successfully".to_string(),
    }))
}
