// File: crates/slotbook_notify/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    MessageResponse, SendBookingChangeEmailRequest, SendEmailRequest,
    SendPaymentStatusEmailRequest, SendStatusEmailRequest,
};

#[utoipa::path(
    post,
    path = "/send-email",
    request_body = SendEmailRequest,
    responses(
        (status = 200, description = "Email sent", body = MessageResponse),
        (status = 500, description = "Email dispatch failed", body = String)
    )
)]
fn doc_send_email_handler() {}

#[utoipa::path(
    post,
    path = "/send-status-email",
    request_body = SendStatusEmailRequest,
    responses(
        (status = 200, description = "Status email sent (or skipped for an already-confirmed booking)", body = MessageResponse),
        (status = 404, description = "Booking not found", body = String),
        (status = 500, description = "Email dispatch failed", body = String)
    )
)]
fn doc_send_status_email_handler() {}

#[utoipa::path(
    post,
    path = "/send-booking-change-email",
    request_body = SendBookingChangeEmailRequest,
    responses(
        (status = 200, description = "Booking change email sent", body = MessageResponse),
        (status = 500, description = "Email dispatch failed", body = String)
    )
)]
fn doc_send_booking_change_email_handler() {}

#[utoipa::path(
    post,
    path = "/send-payment-status-email",
    request_body = SendPaymentStatusEmailRequest,
    responses(
        (status = 200, description = "Payment status email sent", body = MessageResponse),
        (status = 500, description = "Email dispatch failed", body = String)
    )
)]
fn doc_send_payment_status_email_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_send_email_handler,
        doc_send_status_email_handler,
        doc_send_booking_change_email_handler,
        doc_send_payment_status_email_handler
    ),
    components(
        schemas(
            SendEmailRequest,
            SendStatusEmailRequest,
            SendBookingChangeEmailRequest,
            SendPaymentStatusEmailRequest,
            MessageResponse
        )
    ),
    tags(
        (name = "notify", description = "Transactional Email API")
    ),
    servers(
        (url = "/api", description = "Main API Prefix")
    )
)]
pub struct NotifyApiDoc;
