use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use habitbreak::config::Config;
use habitbreak::{db, handlers, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habitbreak=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();

    // Database
    let db = db::create_pool(&config.database_url).await;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState { db };

    let app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/habits/",
            get(handlers::habits::list_habits).post(handlers::habits::create_habit),
        )
        .route("/habits/:id", delete(handlers::habits::delete_habit))
        .route(
            "/habits/complete/",
            post(handlers::completions::record_completion),
        )
        .route(
            "/habits/:id/completions/",
            get(handlers::habits::list_completions),
        )
        .route("/analytics/", get(handlers::analytics::get_analytics))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
