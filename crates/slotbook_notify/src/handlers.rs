// File: crates/slotbook_notify/src/handlers.rs
use crate::templates;
use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use slotbook_common::models::BookingStatus;
use slotbook_common::services::{BoxedError, NotificationService};
use slotbook_config::AppConfig;
use slotbook_db::{BookingRepository, SqlBookingRepository};
use std::sync::Arc;
use tracing::error;

// Define shared state needed by notification handlers
#[derive(Clone)]
pub struct NotifyState {
    pub config: Arc<AppConfig>,
    pub notifier: Arc<dyn NotificationService<Error = BoxedError>>,
    pub bookings: SqlBookingRepository,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendEmailRequest {
    pub to: String,
    pub subject: String,
    pub text: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SendStatusEmailRequest {
    pub to: String,
    pub status: String,
    pub booking_id: String,
    pub deposit_link: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SendBookingChangeEmailRequest {
    pub to: String,
    pub name: String,
    pub id: String,
    pub new_date: String,
    pub new_hours: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentStatusEmailRequest {
    pub to: String,
    pub name: String,
    pub id: String,
    pub payment_status: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MessageResponse {
    pub message: String,
}

/// Handler to send a free-form email.
#[axum::debug_handler]
pub async fn send_email_handler(
    State(state): State<Arc<NotifyState>>,
    Json(request): Json<SendEmailRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    match state
        .notifier
        .send_email(&request.to, &request.subject, &request.text, false)
        .await
    {
        Ok(_) => Ok(Json(MessageResponse {
            message: "Email sent successfully".to_string(),
        })),
        Err(e) => {
            error!("Error sending email: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error sending email".to_string(),
            ))
        }
    }
}

/// Handler to send a confirmation/denial notice for a booking.
///
/// Looks the booking up first: an already-confirmed booking gets no second
/// confirmation email.
#[axum::debug_handler]
pub async fn send_status_email_handler(
    State(state): State<Arc<NotifyState>>,
    Json(request): Json<SendStatusEmailRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let booking = state
        .bookings
        .find_by_id(&request.booking_id)
        .await
        .map_err(|e| {
            error!("Error loading booking {}: {}", request.booking_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error sending status email".to_string(),
            )
        })?;

    let Some(booking) = booking else {
        return Err((StatusCode::NOT_FOUND, "Booking not found".to_string()));
    };

    if booking.status == BookingStatus::Confirmed {
        return Ok(Json(MessageResponse {
            message: "Booking already confirmed; no email sent.".to_string(),
        }));
    }

    let deposit_link = request.deposit_link.as_deref().or_else(|| {
        state
            .config
            .booking
            .as_ref()
            .and_then(|b| b.deposit_link.as_deref())
    });

    let (subject, body) =
        templates::status_update(&request.status, &request.booking_id, deposit_link);

    match state
        .notifier
        .send_email(&request.to, &subject, &body, false)
        .await
    {
        Ok(_) => Ok(Json(MessageResponse {
            message: format!(
                "Status email ({}) sent successfully to {}",
                request.status, request.to
            ),
        })),
        Err(e) => {
            error!("Error sending status email: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error sending status email".to_string(),
            ))
        }
    }
}

/// Handler to send a reschedule notice.
#[axum::debug_handler]
pub async fn send_booking_change_email_handler(
    State(state): State<Arc<NotifyState>>,
    Json(request): Json<SendBookingChangeEmailRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let (subject, body) = templates::booking_change(
        &request.name,
        &request.id,
        &request.new_date,
        &request.new_hours,
    );

    match state
        .notifier
        .send_email(&request.to, &subject, &body, false)
        .await
    {
        Ok(_) => Ok(Json(MessageResponse {
            message: format!("Booking change email sent successfully to {}", request.to),
        })),
        Err(e) => {
            error!("Error sending booking change email: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error sending booking change email".to_string(),
            ))
        }
    }
}

/// Handler to send a payment-status notice.
#[axum::debug_handler]
pub async fn send_payment_status_email_handler(
    State(state): State<Arc<NotifyState>>,
    Json(request): Json<SendPaymentStatusEmailRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let (subject, body) =
        templates::payment_status(&request.name, &request.id, &request.payment_status);

    match state
        .notifier
        .send_email(&request.to, &subject, &body, false)
        .await
    {
        Ok(_) => Ok(Json(MessageResponse {
            message: format!(
                "Payment status email sent successfully to {}",
                request.to
            ),
        })),
        Err(e) => {
            error!("Error sending payment status email: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error sending payment status email".to_string(),
            ))
        }
    }
}
