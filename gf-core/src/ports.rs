mod application;
mod order;
mod product;

pub use application::Application;
pub use order::OrderRepository;
pub use product::ProductRepository;

/// Base trait for a document store.
///
/// The collection-specific traits ([`ProductRepository`], [`OrderRepository`])
/// extend this, so every operation of a store reports the same error type.
pub trait Repository {
    /// The error reported when the underlying store fails.
    type Error: std::error::Error + Send + Sync + 'static;
}
