// --- File: crates/slotbook_booking/src/routes.rs ---

use crate::handlers::{
    create_booking_handler, delete_booking_handler, get_booking_handler, list_bookings_handler,
    reschedule_booking_handler, update_booking_handler, BookingState,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use slotbook_common::models::HourCatalogue;
use slotbook_common::services::{BoxedError, NotificationService};
use slotbook_config::AppConfig;
use slotbook_db::SqlStores;
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
pub fn routes(
    config: Arc<AppConfig>,
    stores: SqlStores,
    notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
) -> Router {
    let catalogue = HourCatalogue::from_config(config.booking.as_ref());
    let state = Arc::new(BookingState {
        config,
        catalogue,
        stores,
        notifier,
    });

    Router::new()
        .route(
            "/bookings",
            post(create_booking_handler).get(list_bookings_handler),
        )
        .route(
            "/bookings/{id}",
            get(get_booking_handler)
                .put(update_booking_handler)
                .delete(delete_booking_handler),
        )
        .route("/bookings/datehour/{id}", put(reschedule_booking_handler))
        .with_state(state)
}
