//! Public and portal HTTP API.

pub mod error;
pub mod routes;
pub mod state;

use crate::errors::AppResult;
use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use routes::*;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use state::{AppState, SharedState};

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{o}'");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, HeaderName::from_static(PORTAL_KEY_HEADER)])
        .max_age(Duration::from_secs(60 * 60))
}

pub fn build_router(state: SharedState) -> Router {
    let portal = Router::new()
        .route("/events/:id/registrations", get(portal_registrations_handler))
        .route(
            "/events/:id/registrations.csv",
            get(portal_registrations_csv_handler),
        )
        .route("/events/:id/feedback.csv", get(portal_feedback_csv_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), portal_gate));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/events", get(list_events_handler))
        .route("/api/events/:id", get(event_handler))
        .route("/api/events/:id/feedback-form", get(feedback_form_handler))
        .route("/api/events/:id/registrations", post(register_handler))
        .route("/api/events/:id/feedback", post(feedback_handler))
        .route("/api/conductors", get(conductors_handler))
        .nest("/api/portal", portal)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.server.allowed_origins))
        .with_state(state)
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn start_server(state: SharedState) -> AppResult<()> {
    if state.config.portal_key.is_none() {
        warn!("No portal key configured: portal endpoints will refuse every request");
    }

    let address = format!("0.0.0.0:{}", state.config.server.port);
    let app = build_router(state);

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
