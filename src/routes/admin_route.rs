use crate::models::admin::{AdminBookingsView, AdminLoginForm, AdminPassengersView, DashboardView};
use crate::models::flight::{FlightForm, FlightFormView, FlightListView};
use crate::services::admin_service::AdminService;
use crate::services::booking_service::BookingService;
use crate::services::flight_service::FlightService;
use crate::services::passenger_service::PassengerService;
use crate::utils::error::AppError;
use crate::utils::session::Session;
use crate::utils::view::{Page, View};
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket::State;

// Mounted under /admin
const DASHBOARD: &str = "/admin";

fn to_dashboard() -> Redirect {
    Redirect::to(DASHBOARD)
}

fn to_login() -> Redirect {
    Redirect::to(uri!("/admin", login_form))
}

fn to_flights() -> Redirect {
    Redirect::to(uri!("/admin", flights_list))
}

type AdminPage<T> = Result<Json<View<T>>, Flash<Redirect>>;

#[get("/login")]
pub fn login_form(flash: Option<FlashMessage<'_>>) -> Json<View<Page>> {
    View::new(flash, Page::named("admin_login"))
}

#[post("/login", data = "<form>")]
pub async fn login(
    form: Form<AdminLoginForm>,
    mut session: Session,
    cookies: &CookieJar<'_>,
    admin_service: &State<AdminService>,
) -> Result<Flash<Redirect>, Flash<Redirect>> {
    let form = form.into_inner();
    let admin = admin_service
        .login(
            form.username.as_deref().unwrap_or_default(),
            form.password.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| e.into_flash(to_login()))?;

    let message = format!("Welcome, {}!", admin.name);
    session.admin = Some(admin);
    session.save(cookies);

    Ok(Flash::success(to_dashboard(), message))
}

#[get("/logout")]
pub fn logout(mut session: Session, cookies: &CookieJar<'_>) -> Flash<Redirect> {
    if let Err(e) = session.require_admin() {
        return e.into_flash(to_login());
    }

    session.log_out_admin();
    session.save(cookies);
    Flash::new(to_login(), "info", "Logged out.")
}

#[get("/")]
pub fn dashboard(session: Session, flash: Option<FlashMessage<'_>>) -> AdminPage<DashboardView> {
    let admin = session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    Ok(View::new(
        flash,
        DashboardView {
            admin_name: admin.name.clone(),
        },
    ))
}

#[get("/flights")]
pub async fn flights_list(
    session: Session,
    flash: Option<FlashMessage<'_>>,
    flight_service: &State<FlightService>,
) -> AdminPage<FlightListView> {
    session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    let flights = flight_service
        .list_flights()
        .await
        .map_err(|e| e.into_flash(to_dashboard()))?;

    Ok(View::new(flash, FlightListView { flights }))
}

#[get("/flights/new")]
pub fn flight_new_form(session: Session, flash: Option<FlashMessage<'_>>) -> AdminPage<FlightFormView> {
    session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    Ok(View::new(
        flash,
        FlightFormView {
            mode: "new",
            flight: None,
        },
    ))
}

#[post("/flights/new", data = "<form>")]
pub async fn flight_new(
    form: Form<FlightForm>,
    session: Session,
    flight_service: &State<FlightService>,
) -> Result<Flash<Redirect>, Flash<Redirect>> {
    session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    let back = || Redirect::to(uri!("/admin", flight_new_form));
    let input = form.into_inner().into_input(None).map_err(|e| e.into_flash(back()))?;
    flight_service
        .create_flight(input)
        .await
        .map_err(|e| e.into_flash(back()))?;

    Ok(Flash::success(to_flights(), "Flight created."))
}

#[get("/flights/<flight_id>/edit")]
pub async fn flight_edit_form(
    flight_id: &str,
    session: Session,
    flash: Option<FlashMessage<'_>>,
    flight_service: &State<FlightService>,
) -> AdminPage<FlightFormView> {
    session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    let flight = flight_service
        .get_flight(flight_id)
        .await
        .map_err(|e| e.into_flash(to_flights()))?;

    Ok(View::new(
        flash,
        FlightFormView {
            mode: "edit",
            flight: Some(flight.into()),
        },
    ))
}

#[post("/flights/<flight_id>/edit", data = "<form>")]
pub async fn flight_edit(
    flight_id: &str,
    form: Form<FlightForm>,
    session: Session,
    flight_service: &State<FlightService>,
) -> Result<Flash<Redirect>, Flash<Redirect>> {
    session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    let back = || Redirect::to(uri!("/admin", flight_edit_form(flight_id)));
    let input = form
        .into_inner()
        .into_input(Some(flight_id.to_string()))
        .map_err(|e| e.into_flash(back()))?;

    flight_service
        .update_flight(input)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => e.into_flash(to_flights()),
            _ => e.into_flash(back()),
        })?;

    Ok(Flash::success(to_flights(), "Flight updated."))
}

#[post("/flights/<flight_id>/delete")]
pub async fn flight_delete(
    flight_id: &str,
    session: Session,
    flight_service: &State<FlightService>,
) -> Flash<Redirect> {
    if let Err(e) = session.require_admin() {
        return e.into_flash(to_login());
    }

    match flight_service.delete_flight(flight_id).await {
        Ok(()) => Flash::new(to_flights(), "info", "Flight deleted."),
        Err(e) => e.into_flash(to_flights()),
    }
}

#[get("/bookings")]
pub async fn bookings_view(
    session: Session,
    flash: Option<FlashMessage<'_>>,
    booking_service: &State<BookingService>,
) -> AdminPage<AdminBookingsView> {
    session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    let bookings = booking_service
        .list_all()
        .await
        .map_err(|e| e.into_flash(to_dashboard()))?;

    Ok(View::new(flash, AdminBookingsView { bookings }))
}

#[get("/passengers")]
pub async fn passengers_view(
    session: Session,
    flash: Option<FlashMessage<'_>>,
    passenger_service: &State<PassengerService>,
) -> AdminPage<AdminPassengersView> {
    session.require_admin().map_err(|e| e.into_flash(to_login()))?;

    let passengers = passenger_service
        .list_all()
        .await
        .map_err(|e| e.into_flash(to_dashboard()))?;

    Ok(View::new(flash, AdminPassengersView { passengers }))
}
