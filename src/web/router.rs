//! Web application router and middleware setup.

use crate::status::StatusAggregator;
use crate::web::config::WebConfig;
use crate::web::handlers;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Create the axum application with all routes and middleware.
pub fn create_app(aggregator: StatusAggregator, config: &WebConfig) -> Router {
    let mut app = Router::new()
        .route("/api/command", post(handlers::api_command))
        .route("/api/status", get(handlers::get_status))
        .route("/api/health", get(handlers::health_check))
        .with_state(aggregator);

    match (config.dashboard(), &config.dashboard_dir) {
        (Some(dir), _) => {
            info!("Serving dashboard from: {:?}", dir);
            app = app.fallback_service(ServeDir::new(dir));
        }
        (None, Some(dir)) => warn!("Dashboard directory {:?} does not exist, serving API only", dir),
        (None, None) => {}
    }

    if config.enable_cors {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
