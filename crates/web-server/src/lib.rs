use axum::{
    routing::get,
    Router,
};
use database::PlanetsDao;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub planets: Arc<dyn PlanetsDao>,
}

/// Builds the application router.
///
/// `/api/planets/findByName` is a static segment, so it takes precedence over
/// the `/api/planets/:id` capture.
pub fn router(planets: Arc<dyn PlanetsDao>) -> Router {
    let app_state = Arc::new(AppState { planets });
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", get(handlers::index))
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/planets",
            get(handlers::list_planets).post(handlers::create_planet),
        )
        .route("/api/planets/findByName", get(handlers::find_planets_by_name))
        .route(
            "/api/planets/:id",
            get(handlers::get_planet).delete(handlers::delete_planet),
        )
        .with_state(app_state)
        .layer(cors)
        // Logs every incoming request and its response status.
        .layer(TraceLayer::new_for_http())
}

/// Binds `addr` and serves the planets API until the process is stopped.
///
/// Tracing must already be initialized by the caller.
pub async fn run_server(addr: SocketAddr, planets: Arc<dyn PlanetsDao>) -> anyhow::Result<()> {
    let app = router(planets);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Star Wars planets API is listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
