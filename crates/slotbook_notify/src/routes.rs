// --- File: crates/slotbook_notify/src/routes.rs ---

use crate::handlers::{
    send_booking_change_email_handler, send_email_handler, send_payment_status_email_handler,
    send_status_email_handler, NotifyState,
};
use axum::{routing::post, Router};
use slotbook_common::services::{BoxedError, NotificationService};
use slotbook_config::AppConfig;
use slotbook_db::SqlBookingRepository;
use std::sync::Arc;

/// Creates a router containing all routes for the email notification feature.
pub fn routes(
    config: Arc<AppConfig>,
    notifier: Arc<dyn NotificationService<Error = BoxedError>>,
    bookings: SqlBookingRepository,
) -> Router {
    let state = Arc::new(NotifyState {
        config,
        notifier,
        bookings,
    });

    Router::new()
        .route("/send-email", post(send_email_handler))
        .route("/send-status-email", post(send_status_email_handler))
        .route(
            "/send-booking-change-email",
            post(send_booking_change_email_handler),
        )
        .route(
            "/send-payment-status-email",
            post(send_payment_status_email_handler),
        )
        .with_state(state)
}
