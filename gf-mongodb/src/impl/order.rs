use super::{delete, find_all, insert};
use crate::{Db, convert::by_id};
use gf_core::{
    models::{DeleteOutcome, Document, DocumentId, InsertOutcome},
    ports::OrderRepository,
};
use mongodb::bson::doc;

impl OrderRepository for Db {
    async fn query_orders(&self, email: &str) -> Result<Vec<Document>, Self::Error> {
        find_all(&self.orders, doc! { "email": email }).await
    }

    async fn find_orders(&self, order_id: DocumentId) -> Result<Vec<Document>, Self::Error> {
        find_all(&self.orders, by_id(order_id)).await
    }

    async fn create_order(&self, order: Document) -> Result<InsertOutcome, Self::Error> {
        insert(&self.orders, order).await
    }

    async fn delete_order(&self, order_id: DocumentId) -> Result<DeleteOutcome, Self::Error> {
        delete(&self.orders, order_id).await
    }
}
