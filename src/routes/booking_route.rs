use crate::models::booking::{BookingForm, BookingFormView, BookingsView, MyBookingsView};
use crate::models::payment::PaymentView;
use crate::services::booking_service::BookingService;
use crate::services::flight_service::FlightService;
use crate::services::payment_service::{PaymentService, PLACEHOLDER_BOOKING_ID};
use crate::utils::error::AppError;
use crate::utils::session::Session;
use crate::utils::view::View;
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket::State;

fn back_to_form() -> Redirect {
    Redirect::to(uri!(book_form))
}

fn back_to_my_bookings() -> Redirect {
    Redirect::to(uri!(my_bookings))
}

/// Booking form with every flight to pick from
#[get("/book")]
pub async fn book_form(
    flash: Option<FlashMessage<'_>>,
    flight_service: &State<FlightService>,
) -> Result<Json<View<BookingFormView>>, AppError> {
    let flights = flight_service.list_flights().await?;
    Ok(View::new(flash, BookingFormView { flights }))
}

#[post("/book", data = "<form>")]
pub async fn book_submit(
    form: Form<BookingForm>,
    mut session: Session,
    cookies: &CookieJar<'_>,
    booking_service: &State<BookingService>,
) -> Result<Redirect, Flash<Redirect>> {
    let session_email = session.traveler.as_ref().map(|t| t.email.as_str());
    let request = form
        .into_inner()
        .into_request(session_email)
        .map_err(|e| e.into_flash(back_to_form()))?;

    let contact = request.contact.clone();
    let email = request.email.clone();
    let confirmation = booking_service
        .submit(request)
        .await
        .map_err(|e| e.into_flash(back_to_form()))?;

    PaymentService::stage_confirmation(&mut session, &confirmation, contact, email);
    session.save(cookies);

    Ok(Redirect::to(uri!(payment_page(
        booking_id = Some(confirmation.booking_id),
        name = Some(confirmation.passenger_name),
        flight_id = Some(confirmation.flight_id),
        amount = Some(confirmation.amount.to_string())
    ))))
}

/// Payment page reached right after a booking went through
#[get("/payment?<booking_id>&<name>&<flight_id>&<amount>")]
pub fn payment_page(
    booking_id: Option<i64>,
    name: Option<String>,
    flight_id: Option<String>,
    amount: Option<String>,
    session: Session,
    flash: Option<FlashMessage<'_>>,
) -> Json<View<PaymentView>> {
    let pending = session.pending_payment.unwrap_or_default();
    let view = PaymentView {
        booking_id: booking_id
            .or(pending.booking_id)
            .unwrap_or(PLACEHOLDER_BOOKING_ID),
        name: name.or(pending.name),
        flight_id: flight_id.or(pending.flight_id),
        seat_no: pending.seat_no,
        amount: amount.or(pending.amount),
    };
    View::new(flash, view)
}

/// Cancel a booking together with its payment
#[get("/cancel_payment?<booking_id>")]
pub async fn cancel_payment(
    booking_id: Option<i64>,
    booking_service: &State<BookingService>,
) -> Flash<Redirect> {
    match booking_service.cancel(booking_id).await {
        Ok(()) => Flash::new(
            back_to_my_bookings(),
            "info",
            "Payment cancelled. Booking cancelled.",
        ),
        Err(e) => e.into_flash(back_to_my_bookings()),
    }
}

// Not behind a login, unlike /admin/bookings
#[get("/bookings")]
pub async fn view_bookings(
    flash: Option<FlashMessage<'_>>,
    booking_service: &State<BookingService>,
) -> Result<Json<View<BookingsView>>, AppError> {
    let bookings = booking_service
        .list_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(View::new(flash, BookingsView { bookings }))
}

#[get("/mybookings")]
pub async fn my_bookings(
    session: Session,
    flash: Option<FlashMessage<'_>>,
    booking_service: &State<BookingService>,
) -> Result<Json<View<MyBookingsView>>, Flash<Redirect>> {
    let traveler = session
        .require_traveler()
        .map_err(|e| e.into_flash(Redirect::to(uri!(crate::routes::user_route::login_form))))?;

    let bookings = booking_service
        .list_for_traveler(&traveler.email)
        .await
        .map_err(|e| e.into_flash(Redirect::to(uri!(crate::routes::home_route::home))))?;

    Ok(View::new(flash, MyBookingsView { bookings }))
}
