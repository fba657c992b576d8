//! Stand-in for a payment gateway. Nothing here touches the database.

use crate::models::booking::BookingConfirmation;
use crate::models::payment::{PaymentForm, PaymentSuccessView, PaymentView};
use crate::utils::session::{PendingPayment, Session};

// Shown until a real booking id has been staged
pub const PLACEHOLDER_BOOKING_ID: i64 = 1;

pub struct PaymentService;

impl PaymentService {
    /// Parks the posted booking fields in the session and builds the payment page.
    pub fn stage(session: &mut Session, form: PaymentForm) -> PaymentView {
        let booking_id = session
            .pending_payment
            .as_ref()
            .and_then(|pending| pending.booking_id);

        let pending = PendingPayment {
            booking_id,
            name: form.passenger_name,
            contact: form.contact,
            email: form.email,
            flight_id: form.flight_id,
            seat_no: form.seat_no,
            amount: form.amount,
        };
        let view = PaymentService::display(&pending);
        session.pending_payment = Some(pending);
        view
    }

    /// Stages a confirmed reservation so the payment step knows its booking id.
    pub fn stage_confirmation(
        session: &mut Session,
        confirmation: &BookingConfirmation,
        contact: Option<String>,
        email: String,
    ) {
        session.pending_payment = Some(PendingPayment {
            booking_id: Some(confirmation.booking_id),
            name: Some(confirmation.passenger_name.clone()),
            contact,
            email: Some(email),
            flight_id: Some(confirmation.flight_id.clone()),
            seat_no: Some(confirmation.seat_no.clone()),
            amount: Some(confirmation.amount.to_string()),
        });
    }

    pub fn display(pending: &PendingPayment) -> PaymentView {
        PaymentView {
            booking_id: pending.booking_id.unwrap_or(PLACEHOLDER_BOOKING_ID),
            name: pending.name.clone(),
            flight_id: pending.flight_id.clone(),
            seat_no: pending.seat_no.clone(),
            amount: pending.amount.clone(),
        }
    }

    pub fn success(booking_id: Option<i64>, amount: Option<String>) -> PaymentSuccessView {
        PaymentSuccessView { booking_id, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PaymentForm {
        PaymentForm {
            passenger_name: Some("Jane".into()),
            contact: None,
            email: Some("jane@x.com".into()),
            flight_id: Some("AA100".into()),
            seat_no: Some("12A".into()),
            amount: Some("199.99".into()),
        }
    }

    #[test]
    fn staging_without_booking_uses_placeholder() {
        let mut session = Session::default();
        let view = PaymentService::stage(&mut session, form());

        assert_eq!(view.booking_id, PLACEHOLDER_BOOKING_ID);
        assert_eq!(view.amount.as_deref(), Some("199.99"));
        let pending = session.pending_payment.expect("pending payment staged");
        assert_eq!(pending.flight_id.as_deref(), Some("AA100"));
        assert_eq!(pending.booking_id, None);
    }

    #[test]
    fn staging_keeps_confirmed_booking_id() {
        let mut session = Session::default();
        let confirmation = BookingConfirmation {
            booking_id: 501,
            passenger_name: "Jane".into(),
            flight_id: "AA100".into(),
            seat_no: "12A".into(),
            amount: 199.99,
        };
        PaymentService::stage_confirmation(&mut session, &confirmation, None, "jane@x.com".into());

        let view = PaymentService::stage(&mut session, form());
        assert_eq!(view.booking_id, 501);
    }
}
