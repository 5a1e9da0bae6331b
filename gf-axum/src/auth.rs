//! Token issuance and the bearer-token gate.
//!
//! `POST /login` signs whatever JSON object it receives into an access token.
//! Routes that need an identity extract [`BearerToken`] and resolve it to
//! claims through the application.

use crate::{ApiApplication, error::ApiError};
use aide::{OperationInput, axum::ApiRouter, axum::routing::post};
use axum::{
    Json,
    extract::{FromRequestParts, State},
    http::request::Parts,
};
use axum_extra::TypedHeader;
use gf_core::models::Document;
use headers::{Authorization, authorization::Bearer};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{Level, event};

/// Registered claims the token authority sets itself; a login payload may
/// not carry them.
const RESERVED_CLAIMS: [&str; 3] = ["exp", "iat", "nbf"];

/// Registered claims a token may only carry as strings.
const STRING_CLAIMS: [&str; 4] = ["iss", "sub", "jti", "nonce"];

/// The audience claim, a string or an array of strings.
const AUDIENCE_CLAIM: &str = "aud";

/// Creates a router with the login endpoint.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new().api_route_with("/", post(login::<T>), |route| route.tag("auth"))
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// A bearer token valid for one day
    pub access_token: String,
}

/// Issue an access token.
///
/// The request body becomes the token's claims verbatim. No password is
/// checked: the token only records who the caller says they are, and routes
/// such as `GET /order` compare it against the request.
///
/// # Returns
///
/// - `200 OK`: The signed token
/// - `400 Bad Request`: The body sets `exp`, `iat` or `nbf`, or gives a
///   registered claim (`iss`, `sub`, `jti`, `nonce`, `aud`) a value of the
///   wrong type
/// - `500 Internal Server Error`: Signing failed
async fn login<T: ApiApplication>(
    State(app): State<T>,
    Json(claims): Json<Document>,
) -> Result<Json<AccessToken>, ApiError> {
    check_claims(&claims)?;

    let access_token = app
        .issue_token(claims)
        .map_err(|err| ApiError::internal(err, "failed to issue access token"))?;

    Ok(Json(AccessToken { access_token }))
}

/// Reject payloads whose registered claims would make the token unverifiable.
fn check_claims(claims: &Document) -> Result<(), ApiError> {
    if let Some(claim) = RESERVED_CLAIMS
        .into_iter()
        .find(|claim| claims.contains_key(*claim))
    {
        return Err(ApiError::bad_request(format!(
            "`{claim}` is set by the server and cannot be requested"
        )));
    }

    if let Some(claim) = STRING_CLAIMS
        .into_iter()
        .find(|claim| claims.get(*claim).is_some_and(|value| !value.is_string()))
    {
        return Err(ApiError::bad_request(format!("`{claim}` must be a string")));
    }

    match claims.get(AUDIENCE_CLAIM) {
        None | Some(Value::String(_)) => Ok(()),
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => Ok(()),
        Some(_) => Err(ApiError::bad_request(format!(
            "`{AUDIENCE_CLAIM}` must be a string or an array of strings"
        ))),
    }
}

/// The `Authorization: Bearer` credentials of a request.
///
/// Rejects with 401 when the header is absent, and with 403 when it is
/// present but is not a bearer credential.
pub struct BearerToken(pub Authorization<Bearer>);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(auth) =
            Option::<TypedHeader<Authorization<Bearer>>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::forbidden())?
                .ok_or_else(ApiError::unauthorized)?;
        Ok(Self(auth))
    }
}

impl OperationInput for BearerToken {}

/// Check that the caller's verified claims name `email`.
///
/// Verification and comparison form a single linear check: the first failure
/// ends the request with 403, and nothing downstream runs.
pub(crate) fn authorize_email<T: ApiApplication>(
    app: &T,
    auth: &Authorization<Bearer>,
    email: Option<&str>,
) -> Result<(), ApiError> {
    let Some(claims) = app.claims(auth) else {
        event!(Level::DEBUG, "rejected unverifiable token");
        return Err(ApiError::forbidden());
    };

    match (claims.email(), email) {
        (Some(claimed), Some(requested)) if claimed == requested => Ok(()),
        _ => Err(ApiError::forbidden()),
    }
}
