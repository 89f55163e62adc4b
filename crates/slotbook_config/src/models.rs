// --- File: crates/slotbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g., sqlite:slotbook.db, loaded via SLOTBOOK_DATABASE__URL
}

/// The hour-slot labels clients may book, in display/sort order.
///
/// These are the canonical duration/price strings that appear verbatim in
/// booking requests and in each day's availability list. Deployments can
/// replace the catalogue wholesale through configuration; the default
/// mirrors the studio's published rates.
pub fn default_hour_catalogue() -> Vec<String> {
    [
        "2 Hours/$70",
        "4 Hours/$130",
        "8 Hours/$270",
        "10 Hours/$340",
        "Full Day 14+ Hours/$550",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// --- Booking Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// Bookable hour-slot labels in catalogue order.
    #[serde(default = "default_hour_catalogue")]
    pub hour_catalogue: Vec<String>,
    /// Recipient for new-booking admin alerts.
    pub admin_email: Option<String>,
    /// Deposit payment link included in confirmation emails.
    pub deposit_link: Option<String>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            hour_catalogue: default_hour_catalogue(),
            admin_email: None,
            deposit_link: None,
        }
    }
}

// --- Email Config ---
// Holds non-secret mail-relay config. API key loaded via env var marker.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmailConfig {
    /// Base URL of the HTTP mail-relay API.
    pub api_base_url: String,
    /// Sender address for all outgoing mail.
    pub from_address: String,
    /// Bearer token for the relay. Loaded via SLOTBOOK_EMAIL__API_KEY.
    pub api_key: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_email: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub booking: Option<BookingConfig>,
    #[serde(default)]
    pub email: Option<EmailConfig>,
}
