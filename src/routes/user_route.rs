use crate::models::user::{LoginForm, LoginRequest, SignupForm, WelcomeView};
use crate::services::user_service::UserService;
use crate::utils::session::Session;
use crate::utils::view::{Page, View};
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket::State;

fn already_logged_in() -> Flash<Redirect> {
    Flash::new(Redirect::to(uri!(welcome)), "info", "You are already logged in.")
}

#[get("/signup")]
pub fn signup_form(
    session: Session,
    flash: Option<FlashMessage<'_>>,
) -> Result<Json<View<Page>>, Redirect> {
    if session.traveler.is_some() {
        return Err(Redirect::to(uri!(welcome)));
    }
    Ok(View::new(flash, Page::named("signup")))
}

/// Register a traveler and log them in
#[post("/signup", data = "<form>")]
pub async fn signup(
    form: Form<SignupForm>,
    mut session: Session,
    cookies: &CookieJar<'_>,
    user_service: &State<UserService>,
) -> Result<Flash<Redirect>, Flash<Redirect>> {
    if session.traveler.is_some() {
        return Ok(already_logged_in());
    }

    let back = || Redirect::to(uri!(signup_form));
    let request = form.into_inner().into_request().map_err(|e| e.into_flash(back()))?;
    let identity = user_service
        .signup(request)
        .await
        .map_err(|e| e.into_flash(back()))?;

    let message = format!("Welcome to Airline Reservation System, {}!", identity.name);
    session.traveler = Some(identity);
    session.save(cookies);

    Ok(Flash::success(Redirect::to(uri!(welcome)), message))
}

#[get("/login")]
pub fn login_form(
    session: Session,
    flash: Option<FlashMessage<'_>>,
) -> Result<Json<View<Page>>, Redirect> {
    if session.traveler.is_some() {
        return Err(Redirect::to(uri!(welcome)));
    }
    Ok(View::new(flash, Page::named("login")))
}

#[post("/login", data = "<form>")]
pub async fn login(
    form: Form<LoginForm>,
    mut session: Session,
    cookies: &CookieJar<'_>,
    user_service: &State<UserService>,
) -> Result<Flash<Redirect>, Flash<Redirect>> {
    if session.traveler.is_some() {
        return Ok(already_logged_in());
    }

    let identity = user_service
        .login(LoginRequest::from(form.into_inner()))
        .await
        .map_err(|e| e.into_flash(Redirect::to(uri!(login_form))))?;

    let message = format!("Welcome to Airline Reservation System, {}!", identity.name);
    session.traveler = Some(identity);
    session.save(cookies);

    Ok(Flash::success(Redirect::to(uri!(welcome)), message))
}

#[get("/welcome")]
pub fn welcome(
    session: Session,
    flash: Option<FlashMessage<'_>>,
) -> Result<Json<View<WelcomeView>>, Flash<Redirect>> {
    let traveler = session
        .require_traveler()
        .map_err(|e| e.into_flash(Redirect::to(uri!(login_form))))?;

    Ok(View::new(
        flash,
        WelcomeView {
            user: traveler.name.clone(),
        },
    ))
}

#[get("/logout")]
pub fn logout(mut session: Session, cookies: &CookieJar<'_>) -> Flash<Redirect> {
    session.log_out_traveler();
    session.save(cookies);
    Flash::new(
        Redirect::to(uri!(login_form)),
        "info",
        "You've been logged out successfully.",
    )
}
