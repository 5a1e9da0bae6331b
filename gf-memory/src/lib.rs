#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use gf_core::{
    models::{DeleteOutcome, Document, DocumentId, InsertOutcome, InvalidPath, UpdateOutcome},
    ports::{OrderRepository, ProductRepository, Repository},
};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{Level, event};

/// Configuration for the in-memory store.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Maximum number of documents per collection, unlimited if omitted
    #[serde(default)]
    pub max_documents: Option<usize>,
}

/// Failures of the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The collection already holds the configured maximum
    #[error("collection `{collection}` is full ({limit} documents)")]
    CollectionFull {
        /// Name of the collection
        collection: &'static str,
        /// The configured maximum
        limit: usize,
    },

    /// `$inc` applied to a field that is not a number
    #[error("cannot increment non-numeric field `{0}`")]
    NonNumeric(&'static str),

    /// An increment that does not fit in a 64-bit integer
    #[error("incrementing `{0}` overflowed")]
    Overflow(&'static str),

    /// A `$set` key that does not address a settable field
    #[error(transparent)]
    InvalidPath(#[from] InvalidPath),
}

/// One named bucket of documents, ordered by id (and so by creation time).
#[derive(Debug, Default)]
struct Collection {
    documents: BTreeMap<DocumentId, Document>,
}

impl Collection {
    fn insert(
        &mut self,
        name: &'static str,
        limit: Option<usize>,
        id: DocumentId,
        document: Document,
    ) -> Result<(), Error> {
        if let Some(limit) = limit {
            if self.documents.len() >= limit {
                return Err(Error::CollectionFull {
                    collection: name,
                    limit,
                });
            }
        }
        self.documents.insert(id, document.with_id(id));
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Collections {
    products: Collection,
    orders: Collection,
}

/// In-memory implementation of the warehouse repositories.
///
/// Clones share the same underlying collections.
#[derive(Debug, Clone, Default)]
pub struct MemoryDb {
    collections: Arc<RwLock<Collections>>,
    config: Arc<MemoryConfig>,
}

impl MemoryDb {
    /// An empty store.
    pub fn open(config: &MemoryConfig) -> Self {
        event!(
            Level::INFO,
            max_documents = ?config.max_documents,
            "using in-memory document store"
        );
        Self {
            collections: Default::default(),
            config: Arc::new(config.clone()),
        }
    }
}

const PRODUCTS: &str = "product";
const ORDERS: &str = "order";
const QUANTITY: &str = "quantity";

impl Repository for MemoryDb {
    type Error = Error;
}

impl ProductRepository for MemoryDb {
    async fn list_products(&self) -> Result<Vec<Document>, Self::Error> {
        let collections = self.collections.read().await;
        Ok(collections.products.documents.values().cloned().collect())
    }

    async fn get_product(&self, product_id: DocumentId) -> Result<Option<Document>, Self::Error> {
        let collections = self.collections.read().await;
        Ok(collections.products.documents.get(&product_id).cloned())
    }

    async fn create_product(&self, product: Document) -> Result<InsertOutcome, Self::Error> {
        let id = DocumentId::generate();
        let mut collections = self.collections.write().await;
        collections
            .products
            .insert(PRODUCTS, self.config.max_documents, id, product)?;
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn update_product(
        &self,
        product_id: DocumentId,
        fields: Document,
    ) -> Result<UpdateOutcome, Self::Error> {
        let mut collections = self.collections.write().await;

        if let Some(product) = collections.products.documents.get_mut(&product_id) {
            let modified = product.set_fields(fields)?;
            return Ok(UpdateOutcome::matched(modified));
        }

        let mut product = Document::new();
        product.set_fields(fields)?;
        collections
            .products
            .insert(PRODUCTS, self.config.max_documents, product_id, product)?;
        event!(Level::DEBUG, %product_id, "product created by update");
        Ok(UpdateOutcome::upserted(product_id))
    }

    async fn adjust_product_quantity(
        &self,
        product_id: DocumentId,
        delta: i64,
    ) -> Result<UpdateOutcome, Self::Error> {
        let mut collections = self.collections.write().await;

        let Some(product) = collections.products.documents.get_mut(&product_id) else {
            return Ok(UpdateOutcome::unmatched());
        };

        let quantity = increment(product.get(QUANTITY), delta)?;
        product.insert(QUANTITY.to_owned(), quantity);
        Ok(UpdateOutcome::matched(delta != 0))
    }

    async fn delete_product(&self, product_id: DocumentId) -> Result<DeleteOutcome, Self::Error> {
        let mut collections = self.collections.write().await;
        let removed = collections.products.documents.remove(&product_id);
        Ok(DeleteOutcome::acknowledged(removed.is_some().into()))
    }
}

impl OrderRepository for MemoryDb {
    async fn query_orders(&self, email: &str) -> Result<Vec<Document>, Self::Error> {
        let collections = self.collections.read().await;
        Ok(collections
            .orders
            .documents
            .values()
            .filter(|order| order.email() == Some(email))
            .cloned()
            .collect())
    }

    async fn find_orders(&self, order_id: DocumentId) -> Result<Vec<Document>, Self::Error> {
        let collections = self.collections.read().await;
        Ok(collections
            .orders
            .documents
            .get(&order_id)
            .cloned()
            .into_iter()
            .collect())
    }

    async fn create_order(&self, order: Document) -> Result<InsertOutcome, Self::Error> {
        let id = DocumentId::generate();
        let mut collections = self.collections.write().await;
        collections
            .orders
            .insert(ORDERS, self.config.max_documents, id, order)?;
        Ok(InsertOutcome::acknowledged(id))
    }

    async fn delete_order(&self, order_id: DocumentId) -> Result<DeleteOutcome, Self::Error> {
        let mut collections = self.collections.write().await;
        let removed = collections.orders.documents.remove(&order_id);
        Ok(DeleteOutcome::acknowledged(removed.is_some().into()))
    }
}

/// Apply `$inc` semantics: a missing field counts as zero, integers stay
/// integers, and floats absorb the delta.
fn increment(current: Option<&Value>, delta: i64) -> Result<Value, Error> {
    match current {
        None | Some(Value::Null) => Ok(Value::from(delta)),
        Some(Value::Number(n)) => {
            if let Some(n) = n.as_i64() {
                n.checked_add(delta)
                    .map(Value::from)
                    .ok_or(Error::Overflow(QUANTITY))
            } else {
                let n = n.as_f64().unwrap_or_default() + delta as f64;
                Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or(Error::Overflow(QUANTITY))
            }
        }
        Some(_) => Err(Error::NonNumeric(QUANTITY)),
    }
}
