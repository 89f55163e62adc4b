//! Integration tests for the booking API: each test drives the real router
//! over an in-memory SQLite store and inspects the day records behind it.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use slotbook_booking::routes::routes;
use slotbook_common::services::{
    BoxFuture, BoxedError, NotificationResult, NotificationService,
};
use slotbook_config::{AppConfig, BookingConfig, ServerConfig};
use slotbook_db::{DayRepository, DbClient, SqlStores};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

const TWO: &str = "2 Hours/$70";
const FOUR: &str = "4 Hours/$130";

/// Notification double that records sends, or fails every send.
struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingNotifier {
    fn recording() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationService for RecordingNotifier {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        _body: &str,
        _is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let subject = subject.to_string();
        Box::pin(async move {
            if self.fail {
                return Err(BoxedError(Box::new(std::io::Error::other(
                    "mail relay unreachable",
                ))));
            }
            self.sent.lock().unwrap().push((to, subject));
            Ok(NotificationResult {
                id: "n1".to_string(),
                status: "sent".to_string(),
            })
        })
    }
}

fn test_config() -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_email: true,
        database: None,
        booking: Some(BookingConfig {
            hour_catalogue: slotbook_config::default_hour_catalogue(),
            admin_email: Some("admin@example.com".to_string()),
            deposit_link: None,
        }),
        email: None,
    })
}

async fn test_app(
    notifier: Option<Arc<RecordingNotifier>>,
) -> (Router, SqlStores) {
    let client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let stores = SqlStores::new(client);
    stores.init_schema().await.unwrap();

    let notifier = notifier
        .map(|n| n as Arc<dyn NotificationService<Error = BoxedError>>);
    let app = routes(test_config(), stores.clone(), notifier);
    (app, stores)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn booking_payload(date: &str, hours: &str) -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "phoneNumber": "555-0100",
        "message": "first session",
        "date": date,
        "hours": hours,
    })
}

async fn create_booking(app: &Router, date: &str, hours: &str) -> String {
    let (status, body) =
        send_json(app, "POST", "/bookings", Some(booking_payload(date, hours))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["booking"]["id"].as_str().unwrap().to_string()
}

fn day_labels(hours: &[slotbook_common::models::HourBlock]) -> Vec<String> {
    hours.iter().map(|b| b.hour.clone()).collect()
}

#[tokio::test]
async fn create_on_fresh_date_creates_empty_day_and_unconfirmed_booking() {
    let notifier = RecordingNotifier::recording();
    let (app, stores) = test_app(Some(notifier.clone())).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/bookings",
        Some(booking_payload("2025-06-01", TWO)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["booking"]["status"], "unconfirmed");
    assert_eq!(body["booking"]["paymentStatus"], "unpaid");
    assert_eq!(body["emailStatus"]["customer"], "sent");
    assert_eq!(body["emailStatus"]["admin"], "sent");

    let day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert!(!day.disabled);
    assert!(day.hours.is_empty());

    // Customer acknowledgment first, then the admin alert
    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].0, "ada@example.com");
    assert_eq!(sent[1].0, "admin@example.com");
}

#[tokio::test]
async fn create_does_not_touch_an_existing_day() {
    let (app, stores) = test_app(None).await;
    create_booking(&app, "2025-06-01", TWO).await;

    let mut day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    day.hours
        .push(slotbook_common::models::HourBlock::available(FOUR));
    stores.days.save(day).await.unwrap();

    // A second request on the same date leaves the hour list alone.
    create_booking(&app, "2025-06-01", TWO).await;
    let day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day_labels(&day.hours), vec![FOUR.to_string()]);
}

#[tokio::test]
async fn email_failures_never_fail_the_booking() {
    let (app, _stores) = test_app(Some(RecordingNotifier::failing())).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/bookings",
        Some(booking_payload("2025-06-01", TWO)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["emailStatus"]["customer"], "failed");
    assert_eq!(body["emailStatus"]["admin"], "failed");
}

#[tokio::test]
async fn emails_are_skipped_without_a_notifier() {
    let (app, _stores) = test_app(None).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/bookings",
        Some(booking_payload("2025-06-01", TWO)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["emailStatus"]["customer"], "skipped");
    assert_eq!(body["emailStatus"]["admin"], "skipped");
}

#[tokio::test]
async fn create_rejects_missing_and_malformed_fields() {
    let (app, _stores) = test_app(None).await;

    let mut missing_name = booking_payload("2025-06-01", TWO);
    missing_name.as_object_mut().unwrap().remove("name");
    let (status, body) = send_json(&app, "POST", "/bookings", Some(missing_name)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));

    let (status, _) = send_json(
        &app,
        "POST",
        "/bookings",
        Some(booking_payload("June 1st", TWO)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_json(
        &app,
        "POST",
        "/bookings",
        Some(booking_payload("2025-06-01", "3 Hours/$99")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("3 Hours/$99"));
}

#[tokio::test]
async fn get_and_list_bookings() {
    let (app, _stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let (status, body) = send_json(&app, "GET", "/bookings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send_json(&app, "GET", &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());

    let (status, _) = send_json(&app, "GET", "/bookings/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn confirming_on_an_empty_day_repopulates_the_remaining_hours() {
    let (app, stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/bookings/{}", id),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    let day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        day_labels(&day.hours),
        vec![
            "4 Hours/$130".to_string(),
            "8 Hours/$270".to_string(),
            "10 Hours/$340".to_string(),
            "Full Day 14+ Hours/$550".to_string(),
        ]
    );
    assert!(day.hours.iter().all(|b| b.enabled));
}

#[tokio::test]
async fn confirming_twice_changes_nothing_the_second_time() {
    let (app, stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let confirm = json!({"status": "confirmed"});
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/bookings/{}", id),
        Some(confirm.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let after_first = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();

    let (status, body) =
        send_json(&app, "PUT", &format!("/bookings/{}", id), Some(confirm)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "confirmed");

    let after_second = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day_labels(&after_first.hours), day_labels(&after_second.hours));
    assert_eq!(after_first.version, after_second.version);
}

#[tokio::test]
async fn denying_releases_the_slot_back_to_the_day() {
    let (app, stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", FOUR).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/bookings/{}", id),
        Some(json!({"status": "denied"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "denied");

    let day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day_labels(&day.hours), vec![FOUR.to_string()]);
    assert!(day.hours[0].enabled);
}

#[tokio::test]
async fn denied_bookings_cannot_be_confirmed() {
    let (app, _stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/bookings/{}", id),
        Some(json!({"status": "denied"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/bookings/{}", id),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("denied"));
}

#[tokio::test]
async fn unknown_status_and_payment_values_are_rejected() {
    let (app, _stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    for payload in [
        json!({"status": "cancelled"}),
        json!({"paymentStatus": "partial"}),
        json!({"paymentMethod": "paypal"}),
    ] {
        let (status, _) =
            send_json(&app, "PUT", &format!("/bookings/{}", id), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn payment_fields_update_without_touching_the_day() {
    let (app, stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/bookings/{}", id),
        Some(json!({"paymentStatus": "deposit paid", "paymentMethod": "venmo"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paymentStatus"], "deposit paid");
    assert_eq!(body["paymentMethod"], "venmo");
    assert_eq!(body["status"], "unconfirmed");

    let day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert!(day.hours.is_empty());
}

#[tokio::test]
async fn reschedule_moves_the_slot_between_days() {
    let (app, stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let (status, body) = send_json(
        &app,
        "PUT",
        &format!("/bookings/datehour/{}", id),
        Some(json!({"date": "2025-06-02", "hours": FOUR})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking updated successfully");

    let (status, body) = send_json(&app, "GET", &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2025-06-02");
    assert_eq!(body["hours"], FOUR);

    // Old slot released on the old day
    let old_day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day_labels(&old_day.hours), vec![TWO.to_string()]);
    assert!(old_day.hours[0].enabled);

    // New day created holding only the taken slot
    let new_day = stores
        .days
        .find_by_date("2025-06-02")
        .await
        .unwrap()
        .unwrap();
    assert!(!new_day.disabled);
    assert_eq!(day_labels(&new_day.hours), vec![FOUR.to_string()]);
    assert!(!new_day.hours[0].enabled);
}

#[tokio::test]
async fn reschedule_validates_its_fields() {
    let (app, _stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/bookings/datehour/{}", id),
        Some(json!({"date": "2025-06-02"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/bookings/datehour/nope",
        Some(json!({"date": "2025-06-02", "hours": FOUR})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_booking_restores_its_slot_into_an_empty_day() {
    let (app, stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", FOUR).await;

    let (status, body) = send_json(&app, "DELETE", &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking deleted successfully");

    let (status, _) = send_json(&app, "GET", &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(day_labels(&day.hours), vec![FOUR.to_string()]);
    assert!(day.hours[0].enabled);
}

#[tokio::test]
async fn create_confirm_delete_round_trip_leaves_the_day_fully_available() {
    let (app, stores) = test_app(None).await;
    let id = create_booking(&app, "2025-06-01", TWO).await;

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/bookings/{}", id),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(&app, "DELETE", &format!("/bookings/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let day = stores
        .days
        .find_by_date("2025-06-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        day_labels(&day.hours),
        slotbook_config::default_hour_catalogue()
    );
    assert!(day.hours.iter().all(|b| b.enabled));
}

#[tokio::test]
async fn delete_of_unknown_booking_is_a_404() {
    let (app, _stores) = test_app(None).await;
    let (status, _) = send_json(&app, "DELETE", "/bookings/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
