// File: crates/slotbook_calendar/src/handlers.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Json, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use slotbook_common::logging::log_error;
use slotbook_common::models::{Day, HourBlock, HourCatalogue};
use slotbook_common::{handle_json_result, HttpStatusCode, SlotbookError};
use slotbook_config::AppConfig;
use slotbook_db::{
    BookingWindowRepository, DayRepository, DbError, SqlBookingWindowRepository,
    SqlDayRepository,
};
use std::sync::Arc;

// Define shared state needed by calendar handlers
#[derive(Clone)]
pub struct CalendarState {
    pub config: Arc<AppConfig>,
    pub catalogue: HourCatalogue,
    pub days: SqlDayRepository,
    pub window: SqlBookingWindowRepository,
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

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateDayRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub hours: Vec<HourBlock>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EditDayRequest {
    pub date: Option<String>,
    pub disabled: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrCreateDayRequest {
    pub date: Option<String>,
    pub selected_hours: Option<Vec<HourBlock>>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MaxDateBody {
    pub max_date: Option<String>,
}

/// Handler to list all day records.
#[axum::debug_handler]
pub async fn list_days_handler(
    State(state): State<Arc<CalendarState>>,
) -> Result<Json<Vec<Day>>, Response> {
    handle_json_result(state.days.find_all().await.map_err(Into::into))
}

/// Handler to list blacked-out days.
#[axum::debug_handler]
pub async fn list_blackout_days_handler(
    State(state): State<Arc<CalendarState>>,
) -> Result<Json<Vec<Day>>, Response> {
    handle_json_result(state.days.find_disabled().await.map_err(Into::into))
}

/// Handler to fetch one day record.
#[axum::debug_handler]
pub async fn get_day_handler(
    State(state): State<Arc<CalendarState>>,
    Path(date): Path<String>,
) -> Result<Json<Day>, ApiError> {
    state
        .days
        .find_by_date(&date)
        .await
        .map_err(db_error)?
        .map(Json)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Day not found"))
}

/// Handler to create a day record. Rejects dates that already exist.
#[axum::debug_handler]
pub async fn create_day_handler(
    State(state): State<Arc<CalendarState>>,
    Json(payload): Json<CreateDayRequest>,
) -> Result<Json<Day>, ApiError> {
    let date = require(payload.date, "date")?;
    validate_date(&date)?;

    if state.days.exists(&date).await.map_err(db_error)? {
        return Err(api_error(StatusCode::BAD_REQUEST, "Date already exists"));
    }

    let mut day = Day {
        date,
        disabled: payload.disabled,
        hours: payload.hours,
        version: 0,
    };
    state.catalogue.sort_blocks(&mut day.hours);

    state.days.create(day).await.map(Json).map_err(db_error)
}

/// Handler to blackout or reopen a day.
///
/// A day that doesn't exist yet is created; disabling a day clears its hour
/// list so nothing on it is offered.
#[axum::debug_handler]
pub async fn edit_day_handler(
    State(state): State<Arc<CalendarState>>,
    Json(payload): Json<EditDayRequest>,
) -> Result<Json<Day>, ApiError> {
    let date = require(payload.date, "date")?;
    validate_date(&date)?;
    let disabled = payload.disabled.unwrap_or(false);

    let existing = state.days.find_by_date(&date).await.map_err(db_error)?;

    let day = match existing {
        None => {
            let mut day = Day::empty(date.as_str());
            day.disabled = disabled;
            state.days.create(day).await.map_err(db_error)?
        }
        Some(mut day) => {
            day.disabled = disabled;
            if disabled {
                day.hours.clear();
            }
            state.days.save(day).await.map_err(db_error)?
        }
    };

    Ok(Json(day))
}

/// Handler to replace a day's hour list, creating and re-enabling as needed.
#[axum::debug_handler]
pub async fn update_or_create_day_handler(
    State(state): State<Arc<CalendarState>>,
    Json(payload): Json<UpdateOrCreateDayRequest>,
) -> Result<Json<Day>, ApiError> {
    let date = require(payload.date, "date")?;
    validate_date(&date)?;
    let mut selected_hours = payload.selected_hours.unwrap_or_default();
    state.catalogue.sort_blocks(&mut selected_hours);

    let existing = state.days.find_by_date(&date).await.map_err(db_error)?;

    let day = match existing {
        None => {
            let day = Day {
                date,
                disabled: false,
                hours: selected_hours,
                version: 0,
            };
            state.days.create(day).await.map_err(db_error)?
        }
        Some(mut day) => {
            day.hours = selected_hours;
            day.disabled = false;
            state.days.save(day).await.map_err(db_error)?
        }
    };

    Ok(Json(day))
}

/// Handler to read the booking-window ceiling.
#[axum::debug_handler]
pub async fn get_max_date_handler(
    State(state): State<Arc<CalendarState>>,
) -> Result<Json<MaxDateBody>, ApiError> {
    match state.window.get().await.map_err(db_error)? {
        Some(max_date) => Ok(Json(MaxDateBody {
            max_date: Some(max_date),
        })),
        None => Err(api_error(StatusCode::NOT_FOUND, "Max date not found")),
    }
}

/// Handler to set the booking-window ceiling.
#[axum::debug_handler]
pub async fn update_max_date_handler(
    State(state): State<Arc<CalendarState>>,
    Json(payload): Json<MaxDateBody>,
) -> Result<Json<MaxDateBody>, ApiError> {
    let max_date = require(payload.max_date, "maxDate")?;
    validate_date(&max_date)?;

    let stored = state.window.set(&max_date).await.map_err(db_error)?;

    Ok(Json(MaxDateBody {
        max_date: Some(stored),
    }))
}
