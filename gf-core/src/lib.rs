#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Core domain models for the warehouse service.
///
/// Products and orders are schema-less documents, so the models here are
/// deliberately thin: a JSON object, the identifier the store assigns to it,
/// and the acknowledgements returned by write operations.
pub mod models;

/// Interface traits for the warehouse service.
///
/// These are the "ports" of the hexagonal architecture: the contract between
/// the HTTP layer and whichever document store backs it. Keeping the contract
/// here lets the router be exercised against an in-memory store while the
/// production binary talks to MongoDB.
pub mod ports;
