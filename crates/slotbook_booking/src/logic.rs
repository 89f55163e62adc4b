// --- File: crates/slotbook_booking/src/logic.rs ---
//! The availability reconciliation engine.
//!
//! A day's hour list is the set of slots still offered to clients. Every
//! booking lifecycle event maps to one mutation of that list:
//!
//! * confirm: the slot leaves the list (with a repopulate rule when the
//!   list empties, see [`claim_confirmed_hour`])
//! * deny: the slot returns to the list if it is missing
//! * reschedule: the old date's slot is restored, the new date's slot is
//!   taken
//! * delete: the slot is restored, matching loosely by its duration title
//!
//! The pure functions below mutate an hour list in place; the async
//! functions load the day, apply the mutation, and write it back through a
//! version-guarded save with a short retry loop, degrading to a plain
//! last-writer-wins save when the retry budget runs out.

use serde::{Deserialize, Serialize};
use slotbook_common::models::{Booking, BookingStatus, Day, HourBlock, HourCatalogue};
use slotbook_common::services::NotificationResult;
use slotbook_db::{DayRepository, DbError};
use tracing::{debug, warn};

/// Attempts of the version-guarded save before degrading to a plain save.
const GUARDED_SAVE_ATTEMPTS: u32 = 3;

// --- Data Structures ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub message: Option<String>,
    pub how_did_you_hear: Option<String>,
    /// Calendar date in YYYY-MM-DD format
    pub date: Option<String>,
    /// Hour-slot label from the catalogue
    pub hours: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking: Booking,
    pub email_status: EmailStatus,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RescheduleBookingRequest {
    /// New calendar date in YYYY-MM-DD format
    pub date: Option<String>,
    /// New hour-slot label from the catalogue
    pub hours: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

/// Per-channel outcome of the transactional emails around a booking write.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EmailOutcome {
    Sent,
    Failed,
    Skipped,
}

impl EmailOutcome {
    pub fn from_result<E: std::fmt::Display>(
        result: &Result<NotificationResult, E>,
        channel: &str,
    ) -> Self {
        match result {
            Ok(_) => EmailOutcome::Sent,
            Err(e) => {
                warn!("Failed to send {} email: {}", channel, e);
                EmailOutcome::Failed
            }
        }
    }
}

/// Outcome of the customer acknowledgment and admin alert sends.
///
/// Failures here never fail the booking write that triggered them; they are
/// reported back to the caller in the 201 body instead.
#[derive(Serialize, Debug, Clone, Copy)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmailStatus {
    pub customer: EmailOutcome,
    pub admin: EmailOutcome,
}

impl EmailStatus {
    pub fn skipped() -> Self {
        Self {
            customer: EmailOutcome::Skipped,
            admin: EmailOutcome::Skipped,
        }
    }
}

// --- Slot accounting (pure) ---

/// Take a confirmed slot off the day's list.
///
/// If the removal leaves the list empty, the day is treated as freshly
/// exhausted and every catalogue label except the confirmed one is put back
/// enabled: booking one duration on an otherwise-empty day leaves the rest
/// of the day's duration options open to other clients.
pub fn claim_confirmed_hour(
    hours: &mut Vec<HourBlock>,
    confirmed: &str,
    catalogue: &HourCatalogue,
) {
    hours.retain(|block| block.hour != confirmed);

    if hours.is_empty() {
        for label in catalogue.labels() {
            if label != confirmed {
                hours.push(HourBlock::available(label.clone()));
            }
        }
    }

    catalogue.sort_blocks(hours);
}

/// Return a denied slot to the day's list if it is not already present.
pub fn restore_denied_hour(hours: &mut Vec<HourBlock>, label: &str, catalogue: &HourCatalogue) {
    let already_present = hours.iter().any(|block| block.hour == label);
    if !already_present {
        hours.push(HourBlock::available(label));
        catalogue.sort_blocks(hours);
    }
}

/// Make a slot available again: re-enable a matching entry, or push one.
pub fn restore_slot(hours: &mut Vec<HourBlock>, label: &str, catalogue: &HourCatalogue) {
    match hours.iter_mut().find(|block| block.hour == label) {
        Some(block) => block.enabled = true,
        None => hours.push(HourBlock::available(label)),
    }
    catalogue.sort_blocks(hours);
}

/// Take a slot on an existing day: disable the matching entry if present.
pub fn claim_slot(hours: &mut [HourBlock], label: &str) {
    if let Some(block) = hours.iter_mut().find(|b| b.hour == label) {
        block.enabled = false;
    }
}

/// Delete-release: make the slot available again, matching stored entries by
/// the label's duration title (the part before `/`). Stored day data may
/// carry labels with drifted price text; the title is the stable join key.
pub fn restore_slot_by_title(hours: &mut Vec<HourBlock>, label: &str, catalogue: &HourCatalogue) {
    let title = HourCatalogue::title(label);
    match hours.iter_mut().find(|block| block.hour.contains(title)) {
        Some(block) => block.enabled = true,
        None => hours.push(HourBlock::available(label)),
    }
    catalogue.sort_blocks(hours);
}

// --- Slot accounting (store orchestration) ---

/// Load a day, apply `mutate`, and write it back under the version guard.
///
/// # Returns
///
/// `false` if no record exists for the date (the caller decides whether
/// that is a soft skip or a create).
async fn mutate_day<D, F>(days: &D, date: &str, mutate: F) -> Result<bool, DbError>
where
    D: DayRepository,
    F: Fn(&mut Day),
{
    for attempt in 1..=GUARDED_SAVE_ATTEMPTS {
        let Some(mut day) = days.find_by_date(date).await? else {
            return Ok(false);
        };
        mutate(&mut day);
        if days.save_guarded(&day).await? {
            return Ok(true);
        }
        debug!(
            "Version conflict updating day {} (attempt {}/{})",
            date, attempt, GUARDED_SAVE_ATTEMPTS
        );
    }

    // Retry budget exhausted: degrade to the unconditional write rather
    // than dropping the slot accounting on the floor.
    warn!("Guarded save for day {} kept conflicting, saving unguarded", date);
    let Some(mut day) = days.find_by_date(date).await? else {
        return Ok(false);
    };
    mutate(&mut day);
    days.save(day).await?;
    Ok(true)
}

/// Reconcile a confirm/deny transition against the booking's day.
///
/// A missing day record is a soft skip: the status change has already
/// committed and stands on its own.
pub async fn reconcile_status_change<D: DayRepository>(
    days: &D,
    booking: &Booking,
    new_status: BookingStatus,
    catalogue: &HourCatalogue,
) -> Result<(), DbError> {
    let applied = match new_status {
        BookingStatus::Confirmed => {
            mutate_day(days, &booking.date, |day| {
                claim_confirmed_hour(&mut day.hours, &booking.hours, catalogue)
            })
            .await?
        }
        BookingStatus::Denied => {
            mutate_day(days, &booking.date, |day| {
                restore_denied_hour(&mut day.hours, &booking.hours, catalogue)
            })
            .await?
        }
        BookingStatus::Unconfirmed => true,
    };

    if !applied {
        debug!(
            "No day record for {}; skipping slot accounting for booking {}",
            booking.date, booking.id
        );
    }

    Ok(())
}

/// Reconcile a date/hours move: restore the slot on the old day, take it on
/// the new one.
///
/// A missing old day is skipped silently. A missing new day is created
/// holding only the new slot, already taken.
pub async fn reconcile_reschedule<D: DayRepository>(
    days: &D,
    old_date: &str,
    old_hours: &str,
    new_date: &str,
    new_hours: &str,
    catalogue: &HourCatalogue,
) -> Result<(), DbError> {
    mutate_day(days, old_date, |day| {
        restore_slot(&mut day.hours, old_hours, catalogue)
    })
    .await?;

    let new_day_existed = mutate_day(days, new_date, |day| {
        claim_slot(&mut day.hours, new_hours)
    })
    .await?;

    if !new_day_existed {
        let mut day = Day::empty(new_date);
        day.hours.push(HourBlock {
            hour: new_hours.to_string(),
            enabled: false,
        });
        catalogue.sort_blocks(&mut day.hours);
        days.create(day).await?;
    }

    Ok(())
}

/// Release a booking's slot ahead of deleting the record.
///
/// A missing day means the slot is simply lost; deletion proceeds anyway.
pub async fn release_deleted_booking<D: DayRepository>(
    days: &D,
    date: &str,
    hours_label: &str,
    catalogue: &HourCatalogue,
) -> Result<(), DbError> {
    let applied = mutate_day(days, date, |day| {
        restore_slot_by_title(&mut day.hours, hours_label, catalogue)
    })
    .await?;

    if !applied {
        debug!("No day record for {}; deleted booking's slot is not restored", date);
    }

    Ok(())
}
