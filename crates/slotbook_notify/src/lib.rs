// --- File: crates/slotbook_notify/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod templates;

// Re-export the pieces the backend wires together
pub use routes::routes;
pub use service::{EmailNotificationService, NotifyError};
