use crate::models::{DeleteOutcome, Document, DocumentId, InsertOutcome};

/// Repository interface for the order collection.
///
/// Orders carry an `email` field by convention; nothing ties an order to the
/// products it references.
pub trait OrderRepository: super::Repository {
    /// All orders whose `email` field equals `email` exactly.
    fn query_orders(
        &self,
        email: &str,
    ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send;

    /// All orders with the given identifier.
    ///
    /// Identifiers are unique, so this holds at most one document; it is a
    /// list because clients of the order lookup have always received one.
    fn find_orders(
        &self,
        order_id: DocumentId,
    ) -> impl Future<Output = Result<Vec<Document>, Self::Error>> + Send;

    /// Insert `order` as a new document, letting the store assign its id.
    fn create_order(
        &self,
        order: Document,
    ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send;

    /// Remove the order, if present.
    fn delete_order(
        &self,
        order_id: DocumentId,
    ) -> impl Future<Output = Result<DeleteOutcome, Self::Error>> + Send;
}
