#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use mongodb::{
    Client, Collection,
    bson::{self, doc},
    options::{ClientOptions, Credential},
};
use tracing::{Level, event};

pub mod config;
mod convert;
mod r#impl;

use config::MongoConfig;

/// Database operations fail for a handful of reasons; this is the unified
/// error type every repository method returns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reported by the driver or the server
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// A JSON payload that has no BSON representation
    #[error("serialization error: {0}")]
    Serialization(#[from] bson::ser::Error),

    /// The server reported a document id that is not an ObjectId
    #[error("unexpected document id: {0}")]
    UnexpectedId(bson::Bson),
}

/// MongoDB implementation of the warehouse repositories.
///
/// Cloning is cheap: the driver client is reference counted and manages its
/// own connection pool, so one `Db` is opened at startup and shared by every
/// request handler.
///
/// # Example
///
/// ```no_run
/// # use gf_mongodb::{Db, config::MongoConfig};
/// # async fn example() -> Result<(), gf_mongodb::Error> {
/// let db = Db::open(&MongoConfig::default()).await?;
/// // ... serve requests ...
/// db.shutdown().await;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    client: Client,
    products: Collection<bson::Document>,
    orders: Collection<bson::Document>,
}

impl Db {
    /// Connect to the deployment described by `config`.
    ///
    /// The driver connects lazily, so this pings the database before
    /// returning: a bad connection string or credentials fail here, before
    /// the server starts accepting requests.
    pub async fn open(config: &MongoConfig) -> Result<Self, Error> {
        let mut options = ClientOptions::parse(&config.uri).await?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            let mut credential = Credential::default();
            credential.username = Some(username.clone());
            credential.password = Some(password.clone());
            options.credential = Some(credential);
        } else if config.username.is_some() || config.password.is_some() {
            event!(
                Level::WARN,
                "ignoring incomplete database credentials, both username and password are required"
            );
        }

        if let Some(app_name) = &config.app_name {
            options.app_name = Some(app_name.clone());
        }

        let client = Client::with_options(options)?;
        let database = client.database(&config.database);
        database.run_command(doc! { "ping": 1 }).await?;

        event!(
            Level::INFO,
            database = %config.database,
            "connected to mongodb"
        );

        Ok(Self {
            products: database.collection(&config.product_collection),
            orders: database.collection(&config.order_collection),
            client,
        })
    }

    /// Close every connection held by the client.
    ///
    /// Call this once the server has stopped; operations still in flight on
    /// other clones are allowed to finish first.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        event!(Level::INFO, "disconnected from mongodb");
    }
}
