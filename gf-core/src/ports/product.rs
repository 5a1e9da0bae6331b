use crate::models::{DeleteOutcome, Document, DocumentId, InsertOutcome, UpdateOutcome};

/// Repository interface for the product collection.
///
/// Every method maps onto exactly one operation against the store; there is no
/// caching and no coordination between calls, so concurrent writes to one
/// product race and the last write wins.
pub trait ProductRepository: super::Repository {
    /// Every product in the collection, unfiltered.
    fn list_products(&self) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send;

    /// The product with the given identifier, if it exists.
    fn get_product(
        &self,
        product_id: DocumentId,
    ) -> impl Future<Output = Result<Option<Document>, Self::Error>> + Send;

    /// Insert `product` as a new document, letting the store assign its id.
    fn create_product(
        &self,
        product: Document,
    ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send;

    /// Set the supplied top-level `fields` on the product.
    ///
    /// This is an upsert: if no product has this identifier, a new one is
    /// created holding exactly `fields` under `product_id`.
    ///
    /// Keys follow MongoDB `$set` paths: `"supplier.name"` sets `name` inside
    /// the `supplier` object, creating it if absent. A key with an empty
    /// segment, or one that runs through a non-object field, fails the whole
    /// update.
    fn update_product(
        &self,
        product_id: DocumentId,
        fields: Document,
    ) -> impl Future<Output = Result<UpdateOutcome, Self::Error>> + Send;

    /// Add the signed `delta` to the product's `quantity`.
    ///
    /// A missing `quantity` counts as zero. Unlike [`Self::update_product`]
    /// this never creates a product; an unknown id yields
    /// [`UpdateOutcome::unmatched`].
    fn adjust_product_quantity(
        &self,
        product_id: DocumentId,
        delta: i64,
    ) -> impl Future<Output = Result<UpdateOutcome, Self::Error>> + Send;

    /// Remove the product, if present.
    fn delete_product(
        &self,
        product_id: DocumentId,
    ) -> impl Future<Output = Result<DeleteOutcome, Self::Error>> + Send;
}
