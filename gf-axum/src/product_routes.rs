//! REST API endpoints for product operations.
//!
//! Products are schema-less documents. Each endpoint performs exactly one
//! operation against the product collection and returns its result as-is.

use crate::{ApiApplication, error::ApiError};
use aide::axum::{
    ApiRouter,
    routing::{get, patch},
};
use axum::{
    Json,
    extract::{Path, State},
};
use gf_core::{
    models::{DeleteOutcome, Document, DocumentId, InsertOutcome, UpdateOutcome},
    ports::ProductRepository as _,
};
use schemars::JsonSchema;
use serde::Deserialize;

/// Creates a router with product-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_products::<T>).post(create_product::<T>),
            |route| route.tag("products"),
        )
        .api_route_with(
            "/{product_id}",
            get(get_product::<T>)
                .put(update_product::<T>)
                .delete(delete_product::<T>),
            |route| route.tag("products"),
        )
        .api_route_with(
            "/{product_id}/quantity",
            patch(adjust_quantity::<T>),
            |route| route.tag("products"),
        )
}

/// Path parameter for product-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
struct Id {
    /// The unique identifier of the product
    product_id: DocumentId,
}

/// List every product.
///
/// # Returns
///
/// - `200 OK`: All products, unfiltered and unpaginated
/// - `500 Internal Server Error`: Database query failed
async fn list_products<T: ApiApplication>(
    State(app): State<T>,
) -> Result<Json<Vec<Document>>, ApiError> {
    app.database()
        .list_products()
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, "failed to list products"))
}

/// Retrieve a product.
///
/// # Returns
///
/// - `200 OK`: The product, or `null` if no product has this id
/// - `400 Bad Request`: The id is not a valid document id
/// - `500 Internal Server Error`: Database query failed
async fn get_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
) -> Result<Json<Option<Document>>, ApiError> {
    app.database()
        .get_product(product_id)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, format!("failed to get product {product_id}")))
}

/// Create a new product.
///
/// # Request Body
///
/// Any JSON object. An `_id` field is ignored; the store assigns the id.
///
/// # Returns
///
/// - `200 OK`: The insert acknowledgement, carrying the new `insertedId`
/// - `500 Internal Server Error`: Database operation failed
async fn create_product<T: ApiApplication>(
    State(app): State<T>,
    Json(mut product): Json<Document>,
) -> Result<Json<InsertOutcome>, ApiError> {
    product.take_id();
    app.database()
        .create_product(product)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, "failed to create product"))
}

/// Set fields on a product, creating it if it does not exist.
///
/// Only the top-level fields in the request body are written; all other
/// fields of an existing product are left alone. This is how stock levels are
/// both restocked and depleted: the client sends the new `quantity`.
///
/// # Returns
///
/// - `200 OK`: The update acknowledgement; `upsertedId` is set when the
///   product was created
/// - `400 Bad Request`: The id is not a valid document id
/// - `500 Internal Server Error`: Database operation failed
async fn update_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
    Json(mut fields): Json<Document>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    fields.take_id();
    app.database()
        .update_product(product_id, fields)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, format!("failed to update product {product_id}")))
}

/// Request body for a stock adjustment.
#[derive(Deserialize, JsonSchema)]
struct QuantityAdjustment {
    /// Amount to add to `quantity`; negative to deplete
    delta: i64,
}

/// Add a signed amount to a product's `quantity`.
///
/// Restocking and depleting are the same operation with opposite signs. A
/// product without a `quantity` is treated as holding zero.
///
/// # Returns
///
/// - `200 OK`: The update acknowledgement
/// - `400 Bad Request`: The id is not a valid document id
/// - `404 Not Found`: No product has this id
/// - `500 Internal Server Error`: Database operation failed, or `quantity`
///   is not a number
async fn adjust_quantity<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
    Json(QuantityAdjustment { delta }): Json<QuantityAdjustment>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    let outcome = app
        .database()
        .adjust_product_quantity(product_id, delta)
        .await
        .map_err(|err| ApiError::internal(err, format!("failed to adjust product {product_id}")))?;

    if outcome.matched_count == 0 {
        return Err(ApiError::not_found(format!("unknown product {product_id}")));
    }

    Ok(Json(outcome))
}

/// Delete a product.
///
/// # Returns
///
/// - `200 OK`: The delete acknowledgement; `deletedCount` is 0 if nothing
///   had this id
/// - `400 Bad Request`: The id is not a valid document id
/// - `500 Internal Server Error`: Database operation failed
async fn delete_product<T: ApiApplication>(
    State(app): State<T>,
    Path(Id { product_id }): Path<Id>,
) -> Result<Json<DeleteOutcome>, ApiError> {
    app.database()
        .delete_product(product_id)
        .await
        .map(Json)
        .map_err(|err| ApiError::internal(err, format!("failed to delete product {product_id}")))
}
