use crate::models::Document;

/// The top-level trait binding a document store to a token authority.
///
/// The HTTP layer is generic over this trait: it asks the application for its
/// store, and delegates issuing and verifying bearer tokens to it.
pub trait Application {
    /// The request context carrying a caller's credentials (e.g. an
    /// `Authorization: Bearer` header).
    type Context;

    /// The document store backing both collections.
    type Repository: super::Repository;

    /// The error reported when a token cannot be issued.
    type TokenError: std::error::Error + Send + Sync + 'static;

    /// Get the document store.
    fn database(&self) -> &Self::Repository;

    /// Sign `claims` into an access token that expires one day from now.
    ///
    /// The claims are embedded as given; no password or identity check is
    /// performed.
    fn issue_token(&self, claims: Document) -> Result<String, Self::TokenError>;

    /// Verify the credentials in `context`, returning the claims they carry.
    ///
    /// Returns `None` for a bad signature, an expired token, or anything else
    /// that fails verification.
    fn claims(&self, context: &Self::Context) -> Option<Document>;
}
