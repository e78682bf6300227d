//! Inventra Server - Asset Management System
//!
//! A Rust REST API server for asset tracking and assignment.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventra_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("inventra_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Inventra Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.assignments.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Assets (catalog)
        .route("/assets", get(api::assets::list_assets))
        .route("/assets", post(api::assets::create_asset))
        .route("/assets/:id", get(api::assets::get_asset))
        .route("/assets/:id", put(api::assets::update_asset))
        .route("/assets/:id", delete(api::assets::delete_asset))
        .route(
            "/assets/:id/assignment-history",
            get(api::assignments::asset_history),
        )
        .route(
            "/assets/:id/maintenance-history",
            get(api::maintenance::asset_maintenance_history),
        )
        .route(
            "/assets/:id/documents",
            get(api::documents::list_asset_documents),
        )
        // Categories
        .route("/categories", get(api::categories::list_categories))
        .route("/categories", post(api::categories::create_category))
        .route("/categories/:id", get(api::categories::get_category))
        .route("/categories/:id", put(api::categories::update_category))
        .route("/categories/:id", delete(api::categories::delete_category))
        // Employees
        .route("/employees", get(api::employees::list_employees))
        .route("/employees", post(api::employees::create_employee))
        .route("/employees/:id", get(api::employees::get_employee))
        .route("/employees/:id", put(api::employees::update_employee))
        .route("/employees/:id", delete(api::employees::delete_employee))
        .route(
            "/employees/:id/assets",
            get(api::employees::get_employee_assets),
        )
        // Assignment lifecycle
        .route("/assignment-history", get(api::assignments::list_assignments))
        .route("/assignment-history/assign", post(api::assignments::assign))
        .route(
            "/assignment-history/unassign",
            post(api::assignments::unassign),
        )
        // Maintenance lifecycle
        .route(
            "/maintenance-history/request",
            post(api::maintenance::request_maintenance),
        )
        .route(
            "/maintenance-history/update",
            post(api::maintenance::update_maintenance),
        )
        // Analytics
        .route("/analytics/assets", get(api::analytics::get_asset_stats))
        .route(
            "/analytics/departments",
            get(api::analytics::get_department_stats),
        )
        .route(
            "/analytics/maintenance",
            get(api::analytics::get_maintenance_stats),
        )
        .route(
            "/analytics/employees",
            get(api::analytics::get_employee_stats),
        )
        // Approval requests
        .route("/requests", get(api::requests::list_requests))
        .route("/requests", post(api::requests::create_request))
        .route("/requests/:id", get(api::requests::get_request))
        .route("/requests/:id", put(api::requests::decide_request))
        // Documents
        .route("/documents", post(api::documents::create_document))
        .route("/documents/:id", get(api::documents::get_document))
        .route("/documents/:id", delete(api::documents::delete_document))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
