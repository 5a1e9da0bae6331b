use axum::http::{HeaderName, HeaderValue, StatusCode};
use rstest::*;
use serde_json::{Value, json};

mod app;
use app::{server, token};

/// Insert `body` at `path`, returning the new id.
async fn insert(server: &axum_test::TestServer, path: &str, body: Value) -> String {
    let response = server.post(path).json(&body).await;
    response.assert_status_ok();
    let outcome: Value = response.json();
    assert_eq!(outcome["acknowledged"], json!(true));
    outcome["insertedId"]
        .as_str()
        .expect("insertedId is a string")
        .to_owned()
}

fn with_id(mut body: Value, id: &str) -> Value {
    body["_id"] = json!(id);
    body
}

#[test_log::test(tokio::test)]
async fn welcome_and_health() {
    let server = server();

    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text("Welcome to the Grocery Farm warehouse");

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok"}));
}

#[test_log::test(tokio::test)]
async fn openapi_document_lists_routes() {
    let server = server();
    let response = server.get("/docs/api.json").await;
    response.assert_status_ok();

    let doc: Value = response.json();
    assert_eq!(doc["info"]["title"], json!("Grocery Farm Warehouse API"));
    for path in [
        "/login",
        "/product",
        "/product/{product_id}",
        "/product/{product_id}/quantity",
        "/order",
        "/order/{order_id}",
    ] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
}

#[test_log::test(tokio::test)]
async fn list_products_after_insert() {
    let server = server();

    let id = insert(&server, "/product", json!({"name": "Rice", "qty": 10})).await;
    assert_eq!(id.len(), 24);

    let response = server.get("/product").await;
    response.assert_status_ok();
    let products: Vec<Value> = response.json();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], json!("Rice"));
    assert_eq!(products[0]["qty"], json!(10));
    assert_eq!(products[0]["_id"], json!(id));
}

#[rstest]
#[case::flat(json!({"name": "Rice", "qty": 10}))]
#[case::nested(json!({"name": "Flour", "supplier": {"name": "Mill", "tags": ["a", "b"]}}))]
#[case::empty(json!({}))]
#[test_log::test(tokio::test)]
async fn get_product_returns_what_was_posted(#[case] product: Value) {
    let server = server();
    let id = insert(&server, "/product", product.clone()).await;

    let response = server.get(&format!("/product/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&with_id(product, &id));
}

#[test_log::test(tokio::test)]
async fn client_supplied_id_is_ignored() {
    let server = server();
    let forced = "0123456789abcdef01234567";
    let id = insert(&server, "/product", json!({"_id": forced, "name": "Oats"})).await;
    assert_ne!(id, forced);

    let response = server.get(&format!("/product/{forced}")).await;
    response.assert_json(&Value::Null);
}

#[test_log::test(tokio::test)]
async fn deleted_product_reads_as_null() {
    let server = server();
    let id = insert(&server, "/product", json!({"name": "Rice"})).await;

    let response = server.delete(&format!("/product/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!({"acknowledged": true, "deletedCount": 1}));

    let response = server.get(&format!("/product/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&Value::Null);

    // Deleting again removes nothing
    let response = server.delete(&format!("/product/{id}")).await;
    response.assert_json(&json!({"acknowledged": true, "deletedCount": 0}));
}

#[test_log::test(tokio::test)]
async fn put_creates_missing_product() {
    let server = server();
    let id = "65a1b2c3d4e5f60718293a4b";

    let response = server
        .put(&format!("/product/{id}"))
        .json(&json!({"name": "Beans", "quantity": 4}))
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({
        "acknowledged": true,
        "matchedCount": 0,
        "modifiedCount": 0,
        "upsertedCount": 1,
        "upsertedId": id,
    }));

    let response = server.get(&format!("/product/{id}")).await;
    response.assert_json(&json!({"_id": id, "name": "Beans", "quantity": 4}));
}

#[test_log::test(tokio::test)]
async fn put_sets_only_supplied_fields() {
    let server = server();
    let id = insert(&server, "/product", json!({"name": "Rice", "quantity": 10})).await;

    let response = server
        .put(&format!("/product/{id}"))
        .json(&json!({"quantity": 3}))
        .await;
    response.assert_status_ok();
    let outcome: Value = response.json();
    assert_eq!(outcome["matchedCount"], json!(1));
    assert_eq!(outcome["modifiedCount"], json!(1));
    assert_eq!(outcome["upsertedId"], Value::Null);

    let response = server.get(&format!("/product/{id}")).await;
    response.assert_json(&json!({"_id": id, "name": "Rice", "quantity": 3}));
}

#[test_log::test(tokio::test)]
async fn put_dotted_keys_set_nested_fields() {
    let server = server();
    let id = insert(
        &server,
        "/product",
        json!({"name": "Rice", "supplier": {"name": "Mill", "city": "Leeds"}}),
    )
    .await;

    server
        .put(&format!("/product/{id}"))
        .json(&json!({"supplier.name": "Farm"}))
        .await
        .assert_status_ok();

    let response = server.get(&format!("/product/{id}")).await;
    response.assert_json(&json!({
        "_id": id,
        "name": "Rice",
        "supplier": {"name": "Farm", "city": "Leeds"},
    }));

    // A path through a scalar is refused and nothing changes
    server
        .put(&format!("/product/{id}"))
        .json(&json!({"name.first": "R", "quantity": 1}))
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let stored: Value = server.get(&format!("/product/{id}")).await.json();
    assert!(stored.get("quantity").is_none());
}

#[rstest]
#[case::deplete(json!({"quantity": 10}), -3, json!(7))]
#[case::restock(json!({"quantity": 10}), 5, json!(15))]
#[case::missing_counts_as_zero(json!({"name": "Salt"}), 2, json!(2))]
#[test_log::test(tokio::test)]
async fn patch_adjusts_quantity(#[case] product: Value, #[case] delta: i64, #[case] expected: Value) {
    let server = server();
    let id = insert(&server, "/product", product).await;

    let response = server
        .patch(&format!("/product/{id}/quantity"))
        .json(&json!({"delta": delta}))
        .await;
    response.assert_status_ok();

    let stored: Value = server.get(&format!("/product/{id}")).await.json();
    assert_eq!(stored["quantity"], expected);
}

#[test_log::test(tokio::test)]
async fn patch_on_unknown_product_is_not_found() {
    let server = server();
    let id = "65a1b2c3d4e5f60718293a4b";

    let response = server
        .patch(&format!("/product/{id}/quantity"))
        .json(&json!({"delta": 1}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    // No upsert happened
    let response = server.get(&format!("/product/{id}")).await;
    response.assert_json(&Value::Null);
}

#[rstest]
#[case::get_product("GET", "/product/rice")]
#[case::put_product("PUT", "/product/123")]
#[case::delete_product("DELETE", "/product/zzzzzzzzzzzzzzzzzzzzzzzz")]
#[case::get_order("GET", "/order/not-an-id")]
#[case::delete_order("DELETE", "/order/0123")]
#[test_log::test(tokio::test)]
async fn malformed_ids_are_bad_requests(#[case] method: &str, #[case] path: &str) {
    let server = server();
    let request = match method {
        "GET" => server.get(path),
        "PUT" => server.put(path).json(&json!({"name": "x"})),
        "DELETE" => server.delete(path),
        _ => unreachable!(),
    };
    request.await.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn login_embeds_body_as_claims() {
    let server = server();

    let response = server
        .post("/login")
        .json(&json!({"email": "a@b.com", "name": "Ada"}))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let access_token = body["accessToken"].as_str().expect("token is a string");
    assert_eq!(access_token, token(json!({"email": "a@b.com", "name": "Ada"})));
}

#[rstest]
#[case::exp("exp")]
#[case::iat("iat")]
#[case::nbf("nbf")]
#[test_log::test(tokio::test)]
async fn login_rejects_time_claims(#[case] claim: &str) {
    let server = server();
    let mut body = json!({"email": "a@b.com"});
    body[claim] = json!(0);

    let response = server.post("/login").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::numeric_subject("sub", json!(7))]
#[case::object_issuer("iss", json!({"x": 1}))]
#[case::boolean_token_id("jti", json!(true))]
#[case::null_nonce("nonce", Value::Null)]
#[case::numeric_audience("aud", json!(42))]
#[case::mixed_audience("aud", json!(["shop", 1]))]
#[test_log::test(tokio::test)]
async fn login_rejects_mistyped_registered_claims(#[case] claim: &str, #[case] value: Value) {
    let server = server();
    let mut body = json!({"email": "a@b.com"});
    body[claim] = value;

    let response = server.post("/login").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::subject("sub", json!("customer-7"))]
#[case::single_audience("aud", json!("shop"))]
#[case::audience_list("aud", json!(["pos", "shop"]))]
#[test_log::test(tokio::test)]
async fn login_accepts_well_typed_registered_claims(#[case] claim: &str, #[case] value: Value) {
    let server = server();
    let mut body = json!({"email": "a@b.com"});
    body[claim] = value;

    server.post("/login").json(&body).await.assert_status_ok();
}

#[test_log::test(tokio::test)]
async fn orders_require_credentials() {
    let server = server();

    let response = server
        .get("/order")
        .add_query_param("email", "a@b.com")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    response.assert_json(&json!({"message": "unauthorized access"}));
}

#[rstest]
#[case::other_email(token(json!({"email": "mallory@b.com"})), Some("a@b.com"))]
#[case::no_email_claim(token(json!({"name": "Ada"})), Some("a@b.com"))]
#[case::no_email_query(token(json!({"email": "a@b.com"})), None)]
#[case::unverifiable("definitely-not-a-token".to_owned(), Some("a@b.com"))]
#[test_log::test(tokio::test)]
async fn orders_are_forbidden_to_others(#[case] bearer: String, #[case] email: Option<&str>) {
    let server = server();
    insert(&server, "/order", json!({"email": "a@b.com", "item": "Rice"})).await;

    let mut request = server.get("/order").authorization_bearer(bearer);
    if let Some(email) = email {
        request = request.add_query_param("email", email);
    }

    let response = request.await;
    response.assert_status(StatusCode::FORBIDDEN);
    response.assert_json(&json!({"message": "Forbidden Access"}));
}

#[test_log::test(tokio::test)]
async fn orders_reject_non_bearer_credentials() {
    let server = server();

    let response = server
        .get("/order")
        .add_query_param("email", "a@b.com")
        .add_header(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Basic YUBiLmNvbTpwYXNz"),
        )
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[test_log::test(tokio::test)]
async fn orders_are_filtered_by_email() {
    let server = server();
    insert(&server, "/order", json!({"email": "a@b.com", "item": "Rice"})).await;
    insert(&server, "/order", json!({"email": "c@d.com", "item": "Oats"})).await;
    insert(&server, "/order", json!({"email": "a@b.com", "item": "Beans"})).await;

    // Tokens come from the login endpoint like any client would get them
    let login: Value = server
        .post("/login")
        .json(&json!({"email": "a@b.com"}))
        .await
        .json();
    let bearer = login["accessToken"].as_str().unwrap().to_owned();

    let response = server
        .get("/order")
        .authorization_bearer(bearer)
        .add_query_param("email", "a@b.com")
        .await;
    response.assert_status_ok();

    let orders: Vec<Value> = response.json();
    let mut items: Vec<&str> = orders.iter().map(|o| o["item"].as_str().unwrap()).collect();
    items.sort();
    assert_eq!(items, ["Beans", "Rice"]);
    assert!(orders.iter().all(|o| o["email"] == json!("a@b.com")));
}

#[test_log::test(tokio::test)]
async fn order_lookup_and_delete() {
    let server = server();
    let order = json!({"email": "a@b.com", "products": [{"name": "Rice", "quantity": 2}]});
    let id = insert(&server, "/order", order.clone()).await;

    let response = server.get(&format!("/order/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!([with_id(order, &id)]));

    let response = server.delete(&format!("/order/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!({"acknowledged": true, "deletedCount": 1}));

    let response = server.get(&format!("/order/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}
