// --- File: crates/slotbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod models;    // Shared domain models
pub mod error;     // Error handling
pub mod http;      // HTTP utilities
pub mod services;  // Service abstractions
pub mod logging;   // Logging utilities
pub mod features;  // Feature flag handling

// Re-export error types and utilities for easier access
pub use error::{
    SlotbookError,
    HttpStatusCode,
    config_error,
    validation_error,
    not_found,
    conflict,
    external_service_error,
    internal_error,
};

// Re-export HTTP utilities for easier access
pub use http::{
    IntoHttpResponse,
    handle_json_result,
    map_json_error,
    client::{
        HTTP_CLIENT,
        create_client,
    },
};

// Re-export the domain vocabulary
pub use models::{
    Booking,
    BookingStatus,
    Day,
    HourBlock,
    HourCatalogue,
    PaymentMethod,
    PaymentStatus,
};

// Re-export feature flag handling utilities for easier access
pub use features::is_feature_enabled;

#[cfg(feature = "email")]
pub use features::is_email_enabled;
