//! OpenAPI document generation and serving.
//!
//! `/docs` renders the generated document with RapiDoc; `/docs/api.json`
//! serves the raw JSON.

use std::sync::Arc;

use aide::{
    axum::{ApiRouter, IntoApiResponse, routing::get},
    openapi::{OpenApi, SecurityScheme, Tag},
    transform::TransformOpenApi,
};
use axum::{
    Extension, Json,
    response::{Html, IntoResponse},
};

const RAPIDOC: &str = r#"<!doctype html>
<html>
  <head>
    <meta charset="utf-8">
    <title>Grocery Farm Warehouse API</title>
    <script type="module" src="https://unpkg.com/rapidoc/dist/rapidoc-min.js"></script>
  </head>
  <body>
    <rapi-doc spec-url="/docs/api.json"
        show-method-in-nav-bar="as-colored-text"
        use-path-in-nav-bar="true"
    ></rapi-doc>
  </body>
</html>"#;

async fn serve_rapidoc() -> impl IntoApiResponse {
    Html(RAPIDOC).into_response()
}

/// Serve the generated document as JSON.
async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(api).into_response()
}

/// Creates a router for documentation endpoints.
pub(crate) fn docs_routes() -> ApiRouter {
    ApiRouter::new()
        .route("/", get(serve_rapidoc))
        .route("/api.json", get(serve_docs))
}

/// Configure the document metadata.
pub(crate) fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("Grocery Farm Warehouse API")
        .summary("Inventory and order storage for the Grocery Farm warehouse.")
        .description("Schema-less CRUD over the product and order collections, with bearer tokens issued by `/login`.")
        .version(env!("CARGO_PKG_VERSION"))
        .security_scheme(
            "jwt",
            SecurityScheme::Http {
                scheme: "bearer".into(),
                bearer_format: Some("JWT".into()),
                description: None,
                extensions: Default::default(),
            },
        )
        .tag(Tag {
            name: "auth".into(),
            description: Some("Access token issuance".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "products".into(),
            description: Some("CRUD operations on products".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "orders".into(),
            description: Some("Placing, listing and removing orders".into()),
            ..Default::default()
        })
}
