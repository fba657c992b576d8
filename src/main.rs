use airline_reservation::build_rocket;
use airline_reservation::db::Database;
use airline_reservation::services::admin_service::AdminService;
use airline_reservation::utils::config::AppConfig;
use dotenv::dotenv;

#[rocket::launch]
async fn rocket() -> _ {
    dotenv().ok();

    let config = AppConfig::from_env().expect("Invalid configuration");

    if config.has_database_credentials() {
        tracing::warn!("DATABASE_USER and DATABASE_PASSWORD are ignored by the SQLite driver");
    }

    // Connect to the database
    let database = Database::new(&config.database_url)
        .await
        .expect("Failed to connect to database");
    database
        .migrate()
        .await
        .expect("Failed to create database schema");

    if let Some(admin) = &config.admin {
        AdminService::new(database.get_pool().clone(), config.bcrypt_cost)
            .ensure_admin(&admin.username, &admin.password, admin.full_name.as_deref())
            .await
            .expect("Failed to create admin account");
    }

    build_rocket(database, config)
}
