//! Transactional email templates.
//!
//! Each function renders one message kind to a `(subject, body)` pair.
//! Plain text throughout; the studio's clients read these on phones and the
//! formatting survives every mail client that way.

use slotbook_common::models::Booking;

/// The booking-details block appended to customer and admin messages.
fn booking_details(booking: &Booking) -> String {
    format!(
        "Booking Details:\n\
         ----------------\n\
         Name: {}\n\
         Email: {}\n\
         Phone Number: {}\n\
         Message: {}\n\
         How Did You Hear: {}\n\
         Date: {}\n\
         Hours: {}",
        booking.name,
        booking.email,
        booking.phone_number,
        booking.message.as_deref().unwrap_or("-"),
        booking.how_did_you_hear.as_deref().unwrap_or("-"),
        booking.date,
        booking.hours,
    )
}

/// Customer acknowledgment sent right after a booking request lands.
pub fn booking_received(booking: &Booking) -> (String, String) {
    let subject = "Booking Request Received".to_string();
    let body = format!(
        "Hi {},\n\n\
         Thanks for your booking request! We have it on file and will \
         confirm or get back to you shortly.\n\n{}",
        booking.name,
        booking_details(booking),
    );
    (subject, body)
}

/// Admin alert for a new booking request.
pub fn booking_request_alert(booking: &Booking) -> (String, String) {
    let subject = format!("New Booking Request: {} on {}", booking.name, booking.date);
    let body = format!(
        "A new booking request just came in.\n\n{}",
        booking_details(booking),
    );
    (subject, body)
}

/// Confirmation/denial notice for a booking request.
///
/// A confirmed booking includes the deposit link when one is configured.
pub fn status_update(
    status: &str,
    booking_id: &str,
    deposit_link: Option<&str>,
) -> (String, String) {
    match status {
        "confirmed" => {
            let subject = "Your Booking Is Confirmed".to_string();
            let mut body = format!(
                "Good news: your booking request ({}) has been confirmed.",
                booking_id
            );
            if let Some(link) = deposit_link {
                body.push_str(&format!(
                    "\n\nTo lock in your session, please pay the deposit here:\n{}",
                    link
                ));
            }
            body.push_str("\n\nSee you at the studio!");
            (subject, body)
        }
        _ => {
            let subject = "Update on Your Booking Request".to_string();
            let body = format!(
                "Unfortunately we couldn't accommodate your booking request ({}). \
                 Feel free to submit a new request for a different date or time.",
                booking_id
            );
            (subject, body)
        }
    }
}

/// Notice that a booking was moved to a new date/hour-slot.
pub fn booking_change(name: &str, booking_id: &str, new_date: &str, new_hours: &str) -> (String, String) {
    let subject = "Your Booking Has Been Updated".to_string();
    let body = format!(
        "Hi {},\n\n\
         Your booking ({}) has been moved.\n\n\
         New Date: {}\n\
         New Hours: {}\n\n\
         If this doesn't work for you, just reply to this email.",
        name, booking_id, new_date, new_hours,
    );
    (subject, body)
}

/// Receipt-style notice that the payment status label changed.
pub fn payment_status(name: &str, booking_id: &str, payment_status: &str) -> (String, String) {
    let subject = "Payment Status Updated".to_string();
    let body = format!(
        "Hi {},\n\n\
         The payment status for your booking ({}) is now: {}.",
        name, booking_id, payment_status,
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotbook_common::models::{BookingStatus, PaymentMethod, PaymentStatus};

    fn sample_booking() -> Booking {
        Booking {
            id: "b1".into(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            phone_number: "555-0100".into(),
            message: None,
            how_did_you_hear: Some("a friend".into()),
            date: "2025-06-01".into(),
            hours: "4 Hours/$130".into(),
            status: BookingStatus::Unconfirmed,
            payment_status: PaymentStatus::Unpaid,
            payment_method: PaymentMethod::None,
        }
    }

    #[test]
    fn acknowledgment_carries_the_details_block() {
        let (subject, body) = booking_received(&sample_booking());
        assert_eq!(subject, "Booking Request Received");
        assert!(body.contains("Booking Details:"));
        assert!(body.contains("Date: 2025-06-01"));
        assert!(body.contains("Hours: 4 Hours/$130"));
        assert!(body.contains("How Did You Hear: a friend"));
    }

    #[test]
    fn confirmed_status_includes_deposit_link_when_configured() {
        let (_, with_link) = status_update("confirmed", "b1", Some("https://pay.example/b1"));
        assert!(with_link.contains("https://pay.example/b1"));

        let (_, without_link) = status_update("confirmed", "b1", None);
        assert!(!without_link.contains("deposit"));
    }

    #[test]
    fn denied_status_reads_as_a_denial() {
        let (subject, body) = status_update("denied", "b1", None);
        assert_eq!(subject, "Update on Your Booking Request");
        assert!(body.contains("couldn't accommodate"));
    }
}
