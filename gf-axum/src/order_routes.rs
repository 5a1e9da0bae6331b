//! REST API endpoints for order operations.
//!
//! Orders are schema-less documents that carry the purchaser's `email` by
//! convention. Listing orders is the one gated operation: the caller must
//! present a token whose `email` claim matches the requested email.

use crate::{
    ApiApplication,
    auth::{BearerToken, authorize_email},
    error::{ApiError, Message},
};
use aide::{
    axum::{
        ApiRouter,
        routing::{get, get_with},
    },
    transform::TransformOperation,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use gf_core::{
    models::{DeleteOutcome, Document, DocumentId, InsertOutcome},
    ports::OrderRepository as _,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Creates a router with order-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get_with(query_orders::<T>, query_orders_docs).post(create_order::<T>),
            |route| route.tag("orders"),
        )
        .api_route_with(
            "/{order_id}",
            get(get_order::<T>).delete(delete_order::<T>),
            |route| route.tag("orders"),
        )
}

/// Path parameter for order-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct Id {
    /// The unique identifier of the order
    order_id: DocumentId,
}

/// Query string for listing orders.
#[derive(Deserialize, JsonSchema)]
struct OrderQuery {
    /// The purchaser whose orders to list; must match the token's `email`
    email: Option<String>,
}

fn query_orders_docs(op: TransformOperation) -> TransformOperation<'_> {
    op.summary("List orders")
        .description("Query the orders of the purchaser named by the `email` parameter.")
        .security_requirement("jwt")
        .response_with::<401, Json<Message>, _>(|res| res.description("Missing credentials"))
        .response_with::<403, Json<Message>, _>(|res| {
            res.description("Token rejected or issued to another email")
        })
}

/// List the caller's orders.
///
/// # Authorization
///
/// Requires a bearer token whose `email` claim equals the `email` query
/// parameter.
///
/// # Returns
///
/// - `200 OK`: Every order whose `email` field equals the requested email
/// - `401 Unauthorized`: No `Authorization` header
/// - `403 Forbidden`: The token fails verification, or its `email` claim
///   differs from the query
/// - `500 Internal Server Error`: Database query failed
async fn query_orders<T: ApiApplication>(
    State(app): State<T>,
    BearerToken(auth): BearerToken,
    Query(OrderQuery { email }): Query<OrderQuery>,
) -> Result<Json<Vec<Document>>, ApiError> {
    authorize_email(&app, &auth, email.as_deref())?;
    let email = email.unwrap_or_default();

    app.database()
        .query_orders(&email)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, "failed to query orders"))
}

/// Place a new order.
///
/// # Request Body
///
/// Any JSON object, conventionally with the purchaser's `email` and the
/// products ordered. An `_id` field is ignored; the store assigns the id.
///
/// # Returns
///
/// - `200 OK`: The insert acknowledgement, carrying the new `insertedId`
/// - `500 Internal Server Error`: Database operation failed
async fn create_order<T: ApiApplication>(
    State(app): State<T>,
    Json(mut order): Json<Document>,
) -> Result<Json<InsertOutcome>, ApiError> {
    order.take_id();
    app.database()
        .create_order(order)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, "failed to create order"))
}

/// Retrieve an order.
///
/// # Returns
///
/// - `200 OK`: A list holding the order, or an empty list
/// - `400 Bad Request`: The id is not a valid document id
/// - `500 Internal Server Error`: Database query failed
async fn get_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { order_id }): Path<Id>,
) -> Result<Json<Vec<Document>>, ApiError> {
    app.database()
        .find_orders(order_id)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, format!("failed to get order {order_id}")))
}

/// Delete an order.
///
/// # Returns
///
/// - `200 OK`: The delete acknowledgement; `deletedCount` is 0 if nothing
///   had this id
/// - `400 Bad Request`: The id is not a valid document id
/// - `500 Internal Server Error`: Database operation failed
async fn delete_order<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { order_id }): Path<Id>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    app.database()
        .delete_order(order_id)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, format!("failed to delete order {order_id}")))
}
