// --- File: crates/slotbook_calendar/src/routes.rs ---

use crate::handlers::{
    create_day_handler, edit_day_handler, get_day_handler, get_max_date_handler,
    list_blackout_days_handler, list_days_handler, update_max_date_handler,
    update_or_create_day_handler, CalendarState,
};
use axum::{
    routing::{get, post},
    Router,
};
use slotbook_common::models::HourCatalogue;
use slotbook_config::AppConfig;
use slotbook_db::{SqlBookingWindowRepository, SqlDayRepository};
use std::sync::Arc;

/// Creates a router containing all routes for the calendar admin feature.
pub fn routes(
    config: Arc<AppConfig>,
    days: SqlDayRepository,
    window: SqlBookingWindowRepository,
) -> Router {
    let catalogue = HourCatalogue::from_config(config.booking.as_ref());
    let state = Arc::new(CalendarState {
        config,
        catalogue,
        days,
        window,
    });

    Router::new()
        .route("/days", get(list_days_handler).post(create_day_handler))
        .route("/days/{date}", get(get_day_handler))
        .route("/blackoutDays", get(list_blackout_days_handler))
        .route("/editDay", post(edit_day_handler))
        .route("/updateOrCreateDay", post(update_or_create_day_handler))
        .route("/getMaxDate", get(get_max_date_handler))
        .route("/updateMaxDate", post(update_max_date_handler))
        .with_state(state)
}
