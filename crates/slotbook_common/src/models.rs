// --- File: crates/slotbook_common/src/models.rs ---
//! Shared domain models for the Slotbook application.
//!
//! These types are the vocabulary of the booking engine: the booking record
//! itself, the per-date availability record (`Day`), and the fixed catalogue
//! of bookable hour-slot labels. They live here so the persistence crate and
//! the feature crates agree on one definition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a booking request.
///
/// Transitions are one-way: `unconfirmed` may move to `confirmed` or
/// `denied`; both of those are terminal for the status field.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Unconfirmed,
    Confirmed,
    Denied,
}

impl BookingStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unconfirmed" => Some(Self::Unconfirmed),
            "confirmed" => Some(Self::Confirmed),
            "denied" => Some(Self::Denied),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unconfirmed => "unconfirmed",
            Self::Confirmed => "confirmed",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment progress label. No money moves through this system; the label is
/// bookkeeping for staff.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "unpaid")]
    Unpaid,
    #[serde(rename = "deposit paid")]
    DepositPaid,
    #[serde(rename = "paid")]
    Paid,
}

impl PaymentStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unpaid" => Some(Self::Unpaid),
            "deposit paid" => Some(Self::DepositPaid),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::DepositPaid => "deposit paid",
            Self::Paid => "paid",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    None,
    Venmo,
    Cashapp,
    Zelle,
    Cash,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "none" => Some(Self::None),
            "venmo" => Some(Self::Venmo),
            "cashapp" => Some(Self::Cashapp),
            "zelle" => Some(Self::Zelle),
            "cash" => Some(Self::Cash),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Venmo => "venmo",
            Self::Cashapp => "cashapp",
            Self::Zelle => "zelle",
            Self::Cash => "cash",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking request as stored.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: Option<String>,
    pub how_did_you_hear: Option<String>,
    /// Calendar date key, `YYYY-MM-DD`.
    pub date: String,
    /// Catalogue hour-slot label, e.g. `4 Hours/$130`.
    pub hours: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
}

/// One bookable hour-slot entry on a day's availability list.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBlock {
    pub hour: String,
    pub enabled: bool,
}

impl HourBlock {
    pub fn available(hour: impl Into<String>) -> Self {
        Self {
            hour: hour.into(),
            enabled: true,
        }
    }
}

/// Per-date availability record. `hours` lists slots that remain *bookable*;
/// an absent or disabled entry is not offered to clients.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Day {
    /// Unique calendar date key, `YYYY-MM-DD`.
    pub date: String,
    /// A disabled day is blacked out entirely.
    pub disabled: bool,
    pub hours: Vec<HourBlock>,
    /// Optimistic-concurrency counter, managed by the store.
    #[serde(skip)]
    pub version: i64,
}

impl Day {
    /// A freshly referenced day: not blacked out, no explicit hour list yet.
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            disabled: false,
            hours: Vec::new(),
            version: 0,
        }
    }
}

/// The fixed, ordered catalogue of hour-slot labels.
///
/// Every sort of a day's hour list goes through [`HourCatalogue::sort_blocks`]
/// so rendering order is consistent everywhere. Labels that are not in the
/// catalogue sort before all known labels (index −1), which matches how
/// legacy data behaved and keeps stray labels visible rather than lost.
#[derive(Debug, Clone)]
pub struct HourCatalogue {
    labels: Vec<String>,
}

impl HourCatalogue {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn from_config(config: Option<&slotbook_config::BookingConfig>) -> Self {
        match config {
            Some(cfg) => Self::new(cfg.hour_catalogue.clone()),
            None => Self::default(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Index of a label in catalogue order.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.position(label).is_some()
    }

    /// Stable sort by catalogue index; unknown labels take index −1 and so
    /// land first, preserving their relative order.
    pub fn sort_blocks(&self, blocks: &mut [HourBlock]) {
        blocks.sort_by_key(|block| {
            self.position(&block.hour)
                .map(|p| p as i64)
                .unwrap_or(-1)
        });
    }

    /// The duration part of a label, before the price: `"4 Hours/$130"`
    /// yields `"4 Hours"`. Used only by the delete-release shim that has to
    /// tolerate formatting drift in stored data.
    pub fn title(label: &str) -> &str {
        label.split('/').next().map(str::trim).unwrap_or(label)
    }
}

impl Default for HourCatalogue {
    fn default() -> Self {
        Self::new(slotbook_config::default_hour_catalogue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_status_round_trips_through_parse() {
        for status in ["unconfirmed", "confirmed", "denied"] {
            assert_eq!(BookingStatus::parse(status).unwrap().as_str(), status);
        }
        assert!(BookingStatus::parse("cancelled").is_none());
    }

    #[test]
    fn payment_status_uses_spaced_label() {
        assert_eq!(PaymentStatus::DepositPaid.as_str(), "deposit paid");
        assert_eq!(
            PaymentStatus::parse("deposit paid"),
            Some(PaymentStatus::DepositPaid)
        );
        let json = serde_json::to_string(&PaymentStatus::DepositPaid).unwrap();
        assert_eq!(json, "\"deposit paid\"");
    }

    #[test]
    fn catalogue_sorts_unknown_labels_first() {
        let catalogue = HourCatalogue::default();
        let mut blocks = vec![
            HourBlock::available("8 Hours/$270"),
            HourBlock::available("Half Day Special"),
            HourBlock::available("2 Hours/$70"),
        ];
        catalogue.sort_blocks(&mut blocks);
        assert_eq!(blocks[0].hour, "Half Day Special");
        assert_eq!(blocks[1].hour, "2 Hours/$70");
        assert_eq!(blocks[2].hour, "8 Hours/$270");
    }

    #[test]
    fn catalogue_title_strips_price() {
        assert_eq!(HourCatalogue::title("4 Hours/$130"), "4 Hours");
        assert_eq!(HourCatalogue::title("no separator"), "no separator");
    }

    #[test]
    fn booking_serializes_camel_case() {
        let booking = Booking {
            id: "b1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone_number: "555-0100".into(),
            message: None,
            how_did_you_hear: None,
            date: "2025-06-01".into(),
            hours: "2 Hours/$70".into(),
            status: BookingStatus::Unconfirmed,
            payment_status: PaymentStatus::Unpaid,
            payment_method: PaymentMethod::None,
        };
        let json = serde_json::to_value(&booking).unwrap();
        assert!(json.get("phoneNumber").is_some());
        assert_eq!(json["status"], "unconfirmed");
        assert_eq!(json["paymentMethod"], "none");
    }
}
