//! Configuration types for the MongoDB connection.
//!
//! This module provides the options used to reach the deployment and to name
//! the database and collections the service works against.

use serde::{Deserialize, Serialize};

/// Configuration for the MongoDB connection.
///
/// Credentials are kept out of the connection string so that they never need
/// URL escaping; when both are present they are attached to the parsed client
/// options.
///
/// # Examples
///
/// ```
/// use gf_mongodb::config::MongoConfig;
///
/// // Local deployment, default database and collections
/// let config = MongoConfig::default();
///
/// // Hosted cluster with credentials
/// let config = MongoConfig {
///     uri: "mongodb+srv://cluster0.example.mongodb.net/?retryWrites=true&w=majority".into(),
///     username: Some("warehouse".into()),
///     password: Some("hunter2".into()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MongoConfig {
    /// The connection string of the deployment
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Username to authenticate as, if any
    #[serde(default)]
    pub username: Option<String>,

    /// Password for `username`
    #[serde(default)]
    pub password: Option<String>,

    /// Name of the database holding both collections
    #[serde(default = "default_database")]
    pub database: String,

    /// Name of the product collection
    #[serde(default = "default_product_collection")]
    pub product_collection: String,

    /// Name of the order collection
    #[serde(default = "default_order_collection")]
    pub order_collection: String,

    /// Application name reported to the server in the connection handshake
    #[serde(default)]
    pub app_name: Option<String>,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_owned()
}

fn default_database() -> String {
    "groceryProduct".to_owned()
}

fn default_product_collection() -> String {
    "product".to_owned()
}

fn default_order_collection() -> String {
    "order".to_owned()
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            username: None,
            password: None,
            database: default_database(),
            product_collection: default_product_collection(),
            order_collection: default_order_collection(),
            app_name: None,
        }
    }
}
