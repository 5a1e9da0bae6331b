//! Conversions between JSON documents and their BSON storage form.

use crate::Error;
use gf_core::models::{Document, DocumentId};
use mongodb::bson::{self, Bson};
use serde_json::Value;

/// Encode a JSON document for storage.
pub(crate) fn to_bson(document: &Document) -> Result<bson::Document, Error> {
    Ok(bson::to_document(document)?)
}

/// Decode a stored document, rendering ObjectIds as plain hex strings.
pub(crate) fn to_json(document: bson::Document) -> Document {
    Document(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::Document(document) => Value::Object(to_json(document).into_inner()),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

/// Interpret an id reported by the server.
pub(crate) fn to_id(value: Bson) -> Result<DocumentId, Error> {
    match value {
        Bson::ObjectId(oid) => Ok(oid.into()),
        other => Err(Error::UnexpectedId(other)),
    }
}

/// The filter selecting a single document by id.
pub(crate) fn by_id(id: DocumentId) -> bson::Document {
    bson::doc! { "_id": bson::oid::ObjectId::from(id) }
}
