use gf_core::{models::Document, ports::Application};
use gf_memory::MemoryDb;
use headers::{Authorization, authorization::Bearer};
use std::convert::Infallible;

// Tokens here are the URL-encoded JSON claims themselves, unsigned. This keeps
// the gate's behavior under test independent of any signing scheme: a token
// that does not decode to a JSON object plays the part of a forged one.
#[derive(Clone)]
pub struct TestApp(pub MemoryDb);

impl Application for TestApp {
    type Context = Authorization<Bearer>;
    type Repository = MemoryDb;
    type TokenError = Infallible;

    fn database(&self) -> &Self::Repository {
        &self.0
    }

    fn issue_token(&self, claims: Document) -> Result<String, Self::TokenError> {
        Ok(super::token(claims.into()))
    }

    fn claims(&self, context: &Self::Context) -> Option<Document> {
        let json = urlencoding::decode(context.token()).ok()?;
        serde_json::from_str(&json).ok()
    }
}
