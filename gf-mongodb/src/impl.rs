//! Repository trait implementations for the MongoDB database.
//!
//! This module contains the implementations of the repository traits defined
//! in `gf-core` for the MongoDB backend. Each method issues exactly one
//! operation against one collection.

use crate::{
    Db, Error,
    convert::{by_id, to_bson, to_id, to_json},
};
use futures::TryStreamExt as _;
use gf_core::{
    models::{DeleteOutcome, Document, DocumentId, InsertOutcome, UpdateOutcome},
    ports::Repository,
};
use mongodb::{
    Collection,
    bson::{self, doc},
    results::UpdateResult,
};

mod order;
mod product;

impl Repository for Db {
    type Error = Error;
}

async fn find_all(
    collection: &Collection<bson::Document>,
    filter: bson::Document,
) -> Result<Vec<Document>, Error> {
    let documents: Vec<bson::Document> = collection.find(filter).await?.try_collect().await?;
    Ok(documents.into_iter().map(to_json).collect())
}

async fn insert(
    collection: &Collection<bson::Document>,
    document: Document,
) -> Result<InsertOutcome, Error> {
    let result = collection.insert_one(to_bson(&document)?).await?;
    Ok(InsertOutcome::acknowledged(to_id(result.inserted_id)?))
}

async fn delete(
    collection: &Collection<bson::Document>,
    id: DocumentId,
) -> Result<DeleteOutcome, Error> {
    let result = collection.delete_one(by_id(id)).await?;
    Ok(DeleteOutcome::acknowledged(result.deleted_count))
}

fn update_outcome(result: UpdateResult) -> Result<UpdateOutcome, Error> {
    let upserted_id = result.upserted_id.map(to_id).transpose()?;
    Ok(UpdateOutcome {
        acknowledged: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        upserted_count: upserted_id.is_some().into(),
        upserted_id,
    })
}

/// The `$set` update applying `fields`.
fn set(fields: &Document) -> Result<bson::Document, Error> {
    Ok(doc! { "$set": to_bson(fields)? })
}
