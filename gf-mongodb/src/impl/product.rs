use super::{delete, find_all, insert, set, update_outcome};
use crate::{
    Db,
    convert::{by_id, to_json},
};
use gf_core::{
    models::{DeleteOutcome, Document, DocumentId, InsertOutcome, UpdateOutcome},
    ports::ProductRepository,
};
use mongodb::bson::doc;
use tracing::{Level, event};

impl ProductRepository for Db {
    async fn list_products(&self) -> Result<Vec<Document>, Self::Error> {
        find_all(&self.products, doc! {}).await
    }

    async fn get_product(&self, product_id: DocumentId) -> Result<Option<Document>, Self::Error> {
        let product = self.products.find_one(by_id(product_id)).await?;
        Ok(product.map(to_json))
    }

    async fn create_product(&self, product: Document) -> Result<InsertOutcome, Self::Error> {
        insert(&self.products, product).await
    }

    async fn update_product(
        &self,
        product_id: DocumentId,
        fields: Document,
    ) -> Result<UpdateOutcome, Self::Error> {
        let result = self
            .products
            .update_one(by_id(product_id), set(&fields)?)
            .upsert(true)
            .await?;

        if result.upserted_id.is_some() {
            event!(Level::DEBUG, %product_id, "product created by update");
        }

        update_outcome(result)
    }

    async fn adjust_product_quantity(
        &self,
        product_id: DocumentId,
        delta: i64,
    ) -> Result<UpdateOutcome, Self::Error> {
        let result = self
            .products
            .update_one(by_id(product_id), doc! { "$inc": { "quantity": delta } })
            .await?;
        update_outcome(result)
    }

    async fn delete_product(&self, product_id: DocumentId) -> Result<DeleteOutcome, Self::Error> {
        delete(&self.products, product_id).await
    }
}
