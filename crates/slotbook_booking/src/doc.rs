// File: crates/slotbook_booking/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::ErrorBody;
use crate::logic::{
    CreateBookingRequest, CreateBookingResponse, EmailOutcome, EmailStatus, MessageResponse,
    RescheduleBookingRequest, UpdateBookingRequest,
};
use slotbook_common::models::{Booking, BookingStatus, PaymentMethod, PaymentStatus};

#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking request created; per-channel email outcomes included", body = CreateBookingResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorBody)
    )
)]
fn doc_create_booking_handler() {}

#[utoipa::path(
    get,
    path = "/bookings",
    responses(
        (status = 200, description = "All bookings", body = [Booking]),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
fn doc_list_bookings_handler() {}

#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(
        ("id" = String, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "The booking", body = Booking),
        (status = 404, description = "Booking not found", body = ErrorBody)
    )
)]
fn doc_get_booking_handler() {}

#[utoipa::path(
    put,
    path = "/bookings/{id}",
    params(
        ("id" = String, Path, description = "Booking id")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Updated booking; confirm/deny transitions also reconcile the day's availability", body = Booking),
        (status = 400, description = "Unknown field value or invalid status transition", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody)
    )
)]
fn doc_update_booking_handler() {}

#[utoipa::path(
    put,
    path = "/bookings/datehour/{id}",
    params(
        ("id" = String, Path, description = "Booking id")
    ),
    request_body = RescheduleBookingRequest,
    responses(
        (status = 200, description = "Booking moved; old slot released, new slot taken", body = MessageResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 404, description = "Booking not found", body = ErrorBody)
    )
)]
fn doc_reschedule_booking_handler() {}

#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    params(
        ("id" = String, Path, description = "Booking id")
    ),
    responses(
        (status = 200, description = "Booking deleted after releasing its slot", body = MessageResponse),
        (status = 404, description = "Booking not found", body = ErrorBody),
        (status = 500, description = "Store unavailable", body = ErrorBody)
    )
)]
fn doc_delete_booking_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_create_booking_handler,
        doc_list_bookings_handler,
        doc_get_booking_handler,
        doc_update_booking_handler,
        doc_reschedule_booking_handler,
        doc_delete_booking_handler
    ),
    components(
        schemas(
            CreateBookingRequest,
            CreateBookingResponse,
            UpdateBookingRequest,
            RescheduleBookingRequest,
            MessageResponse,
            EmailStatus,
            EmailOutcome,
            ErrorBody,
            Booking,
            BookingStatus,
            PaymentStatus,
            PaymentMethod
        )
    ),
    tags(
        (name = "bookings", description = "Booking Lifecycle API")
    ),
    servers(
        (url = "/api", description = "Main API Prefix")
    )
)]
pub struct BookingApiDoc;
