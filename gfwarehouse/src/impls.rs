//! Application implementation with JWT-based access tokens.

use gf_core::{
    models::Document,
    ports::{Application, Repository},
};
use headers::{Authorization, authorization::Bearer};
use jwt_simple::{
    claims::Audiences,
    prelude::{Claims, Duration, HS256Key, MACLike},
};
use serde_json::Value;

/// How long an issued access token stays valid.
pub const TOKEN_LIFETIME: Duration = Duration::from_days(1);

/// The shortest secret HS256 signing accepts (96 bits).
pub const MIN_SECRET_LEN: usize = 12;

/// The warehouse application: a document store plus an HS256 token authority.
#[derive(Clone)]
pub struct WarehouseApp<R> {
    /// The store serving both collections
    pub db: R,
    /// HMAC key that signs and verifies access tokens
    pub key: HS256Key,
}

impl<R> WarehouseApp<R> {
    /// Bind a store to the key derived from `secret`.
    pub fn new(db: R, secret: &str) -> Result<Self, WeakSecret> {
        Ok(Self {
            db,
            key: signing_key(secret)?,
        })
    }
}

/// The token signing secret is too short to sign with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("the access token secret must be at least {MIN_SECRET_LEN} bytes, got {0}")]
pub struct WeakSecret(pub usize);

/// Derive the HS256 key for `secret`, refusing secrets every signature
/// would fail with.
pub fn signing_key(secret: &str) -> Result<HS256Key, WeakSecret> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(WeakSecret(secret.len()));
    }
    Ok(HS256Key::from_bytes(secret.as_bytes()))
}

/// An access token could not be signed.
#[derive(Debug, thiserror::Error)]
#[error("unable to sign access token: {0}")]
pub struct TokenError(jwt_simple::Error);

impl<R: Repository> Application for WarehouseApp<R> {
    type Context = Authorization<Bearer>;
    type Repository = R;
    type TokenError = TokenError;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn issue_token(&self, claims: Document) -> Result<String, Self::TokenError> {
        self.key
            .authenticate(Claims::with_custom_claims(claims, TOKEN_LIFETIME))
            .map_err(TokenError)
    }

    fn claims(&self, context: &Self::Context) -> Option<Document> {
        let claims = self
            .key
            .verify_token::<Document>(context.token(), None)
            .ok()?;

        // Registered claims a client asked for are parsed out of the custom
        // set; put them back so the caller sees the payload it logged in with.
        let mut custom = claims.custom;
        let registered = [
            ("iss", claims.issuer),
            ("sub", claims.subject),
            ("jti", claims.jwt_id),
            ("nonce", claims.nonce),
        ];
        for (name, value) in registered {
            if let Some(value) = value {
                custom.insert(name.to_owned(), Value::String(value));
            }
        }
        if let Some(audiences) = claims.audiences {
            custom.insert("aud".to_owned(), audiences_to_json(audiences));
        }
        Some(custom)
    }
}

/// A string audience stays a string; a set comes back as a sorted array.
fn audiences_to_json(audiences: Audiences) -> Value {
    match audiences {
        Audiences::AsString(audience) => Value::String(audience),
        Audiences::AsSet(set) => {
            let mut audiences: Vec<String> = set.into_iter().collect();
            audiences.sort();
            Value::from(audiences)
        }
    }
}
