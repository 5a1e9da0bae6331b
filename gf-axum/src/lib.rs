#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod auth;
mod order_routes;
mod product_routes;

pub mod error;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::OpenApi,
};
use axum::{Extension, Json, response::IntoResponse};
use gf_core::ports::{Application, OrderRepository, ProductRepository};
use headers::{Authorization, authorization::Bearer};
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use auth::AccessToken;

mod openapi;
use openapi::{api_docs, docs_routes};

pub mod config;
use config::AxumConfig;

/// Response for the health check endpoint
#[derive(Serialize, JsonSchema)]
#[schemars(inline)]
struct HealthResponse {
    status: String,
}

/// Simple health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Plain-text banner at the root path
async fn welcome() -> impl IntoApiResponse {
    "Welcome to the Grocery Farm warehouse".into_response()
}

/// Construct the full API router with the given state, along with the OpenAPI
/// document describing it.
pub fn router<T: ApiApplication>(state: T, config: AxumConfig) -> (axum::Router, Arc<OpenApi>) {
    let mut api = OpenApi::default();
    let router = ApiRouter::new()
        .api_route("/", get(welcome))
        .api_route("/health", get(health_check))
        .nest("/login", auth::router())
        .nest("/product", product_routes::router())
        .nest("/order", order_routes::router())
        .nest_api_service("/docs", docs_routes())
        .finish_api_with(&mut api, api_docs);

    // Share one copy of the document across requests
    let api = Arc::new(api);
    let router = router
        .layer(Extension(api.clone()))
        .layer(Extension(Arc::new(config)))
        .layer(CorsLayer::permissive())
        .with_state(state);

    (router, api)
}

/// Serve the API until `shutdown` resolves, then finish in-flight requests.
pub async fn start_server<T: ApiApplication>(
    config: AxumConfig,
    app: T,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening for requests on {}", listener.local_addr()?);

    let (service, _) = router(app, config);
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolves when the process receives ctrl-c.
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received shutdown signal"),
        Err(err) => {
            tracing::error!(err = err.to_string(), "unable to listen for shutdown signal");
            // Without a signal handler there is nothing to wait for; keep serving.
            std::future::pending::<()>().await
        }
    }
}

/// Axum imposes all sorts of constraints on what can pass for state. This
/// trait, coupled with a blanket implementation, specifies them upfront and in
/// one place. If a function takes a generic `T: ApiApplication`, every handler
/// in this crate can be built from it.
pub trait ApiApplication:
    Clone
    + Send
    + Sync
    + 'static
    + Application<
        Context = Authorization<Bearer>,
        Repository: Send + Sync + 'static + ProductRepository + OrderRepository,
    >
{
}

// this is the blanket implementation
impl<T: Clone + Send + Sync + 'static> ApiApplication for T where
    T: Application<
            Context = Authorization<Bearer>,
            Repository: Send + Sync + 'static + ProductRepository + OrderRepository,
        >
{
}
