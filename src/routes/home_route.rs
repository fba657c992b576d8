use crate::utils::session::Session;
use crate::utils::view::{Page, View};
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::Either;

/// Landing page; logged-in travelers go straight to their welcome page
#[get("/")]
pub fn home(
    session: Session,
    flash: Option<FlashMessage<'_>>,
) -> Either<Redirect, Json<View<Page>>> {
    if session.traveler.is_some() {
        return Either::Left(Redirect::to(uri!(crate::routes::user_route::welcome)));
    }
    Either::Right(View::new(flash, Page::named("index")))
}

/// Drop every identity and any staged payment
#[get("/reset")]
pub fn reset(cookies: &CookieJar<'_>) -> Redirect {
    Session::clear(cookies);
    Redirect::to(uri!(home))
}
