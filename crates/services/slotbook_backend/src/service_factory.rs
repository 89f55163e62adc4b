// --- File: crates/services/slotbook_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module provides an implementation of the ServiceFactory trait for the
//! backend service. Services are initialized from configuration and handed to
//! the feature routers as trait objects.
use slotbook_config::AppConfig;
use std::sync::Arc;
#[allow(unused_imports)]
use {
    slotbook_common::services::{
        BoxFuture, BoxedError, NotificationResult, NotificationService, ServiceFactory,
    },
    tracing::info,
};

#[cfg(feature = "notify")]
use slotbook_common::is_email_enabled;
#[cfg(feature = "notify")]
use slotbook_notify::EmailNotificationService;

/// Service factory implementation.
///
/// Initializes the external services the application uses based on the
/// configuration and feature flags, and exposes them through the
/// `ServiceFactory` trait.
pub struct SlotbookServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    #[cfg(feature = "notify")]
    notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl SlotbookServiceFactory {
    /// Create a new service factory.
    pub fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            #[cfg(feature = "notify")]
            notification_service: None,
        };

        #[cfg(feature = "notify")]
        {
            if is_email_enabled(&config) {
                info!("Initializing email notification service...");

                // Wrapper that converts NotifyError to the factory's
                // concrete BoxedError type
                struct BoxedNotificationService {
                    inner: EmailNotificationService,
                }

                impl NotificationService for BoxedNotificationService {
                    type Error = BoxedError;

                    fn send_email(
                        &self,
                        to: &str,
                        subject: &str,
                        body: &str,
                        is_html: bool,
                    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
                        let to = to.to_string();
                        let subject = subject.to_string();
                        let body = body.to_string();
                        let inner = &self.inner;

                        Box::pin(async move {
                            inner
                                .send_email(&to, &subject, &body, is_html)
                                .await
                                .map_err(|e| BoxedError(Box::new(e)))
                        })
                    }
                }

                let service = EmailNotificationService::new(config.clone());
                factory.notification_service =
                    Some(Arc::new(BoxedNotificationService { inner: service }));
                info!("Email notification service initialized.");
            } else {
                info!(
                    "Email feature compiled, but disabled via runtime config \
                     or missing email config section."
                );
            }
        }

        factory
    }
}

impl ServiceFactory for SlotbookServiceFactory {
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        #[cfg(feature = "notify")]
        {
            if let Some(service) = self.notification_service.clone() {
                return Some(service);
            }
        }

        None
    }
}
