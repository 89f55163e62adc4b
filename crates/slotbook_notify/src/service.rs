use slotbook_common::services::{BoxFuture, NotificationResult, NotificationService};
use slotbook_common::HTTP_CLIENT;
use slotbook_config::AppConfig;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Email-dispatch-specific error types.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error occurred during a mail-relay API request
    #[error("Mail relay request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the mail-relay API
    #[error("Mail relay returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Missing or incomplete email configuration
    #[error("Email configuration missing or incomplete")]
    ConfigError,
}

/// Email notification service backed by an HTTP mail-relay API.
///
/// The relay endpoint, sender address, and bearer token come from
/// `AppConfig.email`; there is no process-wide transporter state.
pub struct EmailNotificationService {
    config: Arc<AppConfig>,
}

impl EmailNotificationService {
    /// Create a new email notification service
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }
}

impl NotificationService for EmailNotificationService {
    type Error = NotifyError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        // Clone the values to avoid lifetime issues
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();
        let config = self.config.clone();

        Box::pin(async move {
            let email_config = config.email.as_ref().ok_or(NotifyError::ConfigError)?;

            let url = format!(
                "{}/messages",
                email_config.api_base_url.trim_end_matches('/')
            );

            let body_field = if is_html { "html" } else { "text" };
            let payload = json!({
                "from": email_config.from_address,
                "to": to,
                "subject": subject,
                body_field: body,
            });

            info!("Sending email to {}: {}", to, subject);
            let mut request = HTTP_CLIENT.post(&url).json(&payload);
            if let Some(api_key) = &email_config.api_key {
                request = request.bearer_auth(api_key);
            }

            let resp = request.send().await?;

            let status = resp.status();
            if !status.is_success() {
                // Bubble up the relay's JSON error so it can be debugged
                let message = resp.text().await.unwrap_or_default();
                error!("Mail relay returned {}: {}", status, message);
                return Err(NotifyError::ApiError {
                    status_code: status.as_u16(),
                    message,
                });
            }

            let response_body: serde_json::Value =
                resp.json().await.unwrap_or_else(|_| json!({}));
            let id = response_body
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();

            Ok(NotificationResult {
                id,
                status: "sent".to_string(),
            })
        })
    }
}
