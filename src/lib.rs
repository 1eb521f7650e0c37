pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod services;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use config::AppConfig;
use handlers::{delete_inquiry, list_inquiries, submit_inquiry, update_inquiry_flag};

pub fn create_app(config: AppConfig) -> Router {
    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(header_val) => Some(header_val),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(cors_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/submit", post(submit_inquiry))
        .route("/inq", get(list_inquiries))
        .route("/inq/:id", delete(delete_inquiry))
        .route("/inq/:id", put(update_inquiry_flag))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(config)
        .layer(axum::middleware::from_fn(
            |req: Request<Body>, next: Next| async move {
                tracing::info!("{} {}", req.method(), req.uri());
                let response = next.run(req).await;
                tracing::info!("Response status: {}", response.status());
                response
            },
        ))
}
