// File: crates/slotbook_calendar/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    CreateDayRequest, EditDayRequest, ErrorBody, MaxDateBody, UpdateOrCreateDayRequest,
};
use slotbook_common::models::{Day, HourBlock};

#[utoipa::path(
    get,
    path = "/days",
    responses(
        (status = 200, description = "All day records", body = [Day]),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
fn doc_list_days_handler() {}

#[utoipa::path(
    get,
    path = "/days/{date}",
    params(
        ("date" = String, Path, description = "Calendar date in YYYY-MM-DD format")
    ),
    responses(
        (status = 200, description = "The day record", body = Day),
        (status = 404, description = "Day not found", body = ErrorBody)
    )
)]
fn doc_get_day_handler() {}

#[utoipa::path(
    get,
    path = "/blackoutDays",
    responses(
        (status = 200, description = "Disabled (blacked-out) days", body = [Day])
    )
)]
fn doc_list_blackout_days_handler() {}

#[utoipa::path(
    post,
    path = "/days",
    request_body = CreateDayRequest,
    responses(
        (status = 200, description = "Created day record", body = Day),
        (status = 400, description = "Date already exists", body = ErrorBody)
    )
)]
fn doc_create_day_handler() {}

#[utoipa::path(
    post,
    path = "/editDay",
    request_body = EditDayRequest,
    responses(
        (status = 200, description = "Day created or its blackout flag updated; disabling clears the hour list", body = Day),
        (status = 400, description = "Missing or malformed field", body = ErrorBody)
    )
)]
fn doc_edit_day_handler() {}

#[utoipa::path(
    post,
    path = "/updateOrCreateDay",
    request_body = UpdateOrCreateDayRequest,
    responses(
        (status = 200, description = "Day created or its hour list replaced", body = Day),
        (status = 400, description = "Missing or malformed field", body = ErrorBody)
    )
)]
fn doc_update_or_create_day_handler() {}

#[utoipa::path(
    get,
    path = "/getMaxDate",
    responses(
        (status = 200, description = "Current booking-window ceiling", body = MaxDateBody),
        (status = 404, description = "No ceiling set yet", body = ErrorBody)
    )
)]
fn doc_get_max_date_handler() {}

#[utoipa::path(
    post,
    path = "/updateMaxDate",
    request_body = MaxDateBody,
    responses(
        (status = 200, description = "Stored booking-window ceiling", body = MaxDateBody),
        (status = 400, description = "Missing or malformed field", body = ErrorBody)
    )
)]
fn doc_update_max_date_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_list_days_handler,
        doc_get_day_handler,
        doc_list_blackout_days_handler,
        doc_create_day_handler,
        doc_edit_day_handler,
        doc_update_or_create_day_handler,
        doc_get_max_date_handler,
        doc_update_max_date_handler
    ),
    components(
        schemas(
            CreateDayRequest,
            EditDayRequest,
            UpdateOrCreateDayRequest,
            MaxDateBody,
            ErrorBody,
            Day,
            HourBlock
        )
    ),
    tags(
        (name = "calendar", description = "Day Availability Admin API")
    ),
    servers(
        (url = "/api", description = "Main API Prefix")
    )
)]
pub struct CalendarApiDoc;
