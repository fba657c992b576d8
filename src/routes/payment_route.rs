use crate::models::payment::{PaymentForm, PaymentSuccessView, PaymentView};
use crate::services::payment_service::PaymentService;
use crate::utils::session::Session;
use crate::utils::view::View;
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::Redirect;
use rocket::serde::json::Json;

/// Stage the booking fields in the session and show the payment page
#[post("/payment", data = "<form>")]
pub fn payment_page(
    form: Form<PaymentForm>,
    mut session: Session,
    cookies: &CookieJar<'_>,
) -> Json<View<PaymentView>> {
    let view = PaymentService::stage(&mut session, form.into_inner());
    session.save(cookies);
    View::new(None, view)
}

// Practice mode: confirming a payment changes nothing
#[post("/confirm_payment")]
pub fn confirm_payment() -> Redirect {
    Redirect::to(uri!(crate::routes::booking_route::book_form))
}

#[get("/success?<booking_id>&<amount>")]
pub fn payment_success(
    booking_id: Option<i64>,
    amount: Option<String>,
    flash: Option<FlashMessage<'_>>,
) -> Json<View<PaymentSuccessView>> {
    View::new(flash, PaymentService::success(booking_id, amount))
}
