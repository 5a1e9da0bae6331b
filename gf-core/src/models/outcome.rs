use super::DocumentId;
use serde::{Deserialize, Serialize};

/// Acknowledgement of a single-document insert.
///
/// Field names follow the results of the MongoDB drivers, which clients of
/// this service already consume.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Whether the store acknowledged the write
    pub acknowledged: bool,
    /// The identifier assigned to the new document
    pub inserted_id: DocumentId,
}

impl InsertOutcome {
    /// An acknowledged insert of the document `id`.
    pub fn acknowledged(id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id,
        }
    }
}

/// Acknowledgement of a single-document update.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    /// Whether the store acknowledged the write
    pub acknowledged: bool,
    /// Number of documents matching the filter (0 or 1)
    pub matched_count: u64,
    /// Number of documents actually changed (0 or 1)
    pub modified_count: u64,
    /// Number of documents created by the upsert (0 or 1)
    pub upserted_count: u64,
    /// Identifier of the created document, if the update inserted one
    pub upserted_id: Option<DocumentId>,
}

impl UpdateOutcome {
    /// An update that matched an existing document.
    pub fn matched(modified: bool) -> Self {
        Self {
            acknowledged: true,
            matched_count: 1,
            modified_count: modified.into(),
            upserted_count: 0,
            upserted_id: None,
        }
    }

    /// An update that found nothing and created the document `id`.
    pub fn upserted(id: DocumentId) -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        }
    }

    /// An update that found nothing and created nothing.
    pub fn unmatched() -> Self {
        Self {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 0,
            upserted_id: None,
        }
    }
}

/// Acknowledgement of a single-document delete.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// Whether the store acknowledged the write
    pub acknowledged: bool,
    /// Number of documents removed (0 or 1)
    pub deleted_count: u64,
}

impl DeleteOutcome {
    /// An acknowledged delete that removed `deleted_count` documents.
    pub fn acknowledged(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcomes_use_driver_field_names() {
        let id = DocumentId::generate();

        assert_eq!(
            serde_json::to_value(InsertOutcome::acknowledged(id)).unwrap(),
            json!({ "acknowledged": true, "insertedId": id.to_string() })
        );

        assert_eq!(
            serde_json::to_value(UpdateOutcome::upserted(id)).unwrap(),
            json!({
                "acknowledged": true,
                "matchedCount": 0,
                "modifiedCount": 0,
                "upsertedCount": 1,
                "upsertedId": id.to_string(),
            })
        );

        assert_eq!(
            serde_json::to_value(DeleteOutcome::acknowledged(1)).unwrap(),
            json!({ "acknowledged": true, "deletedCount": 1 })
        );
    }

    #[test]
    fn matched_update_reports_no_upsert() {
        let outcome = UpdateOutcome::matched(false);
        assert_eq!(outcome.matched_count, 1);
        assert_eq!(outcome.modified_count, 0);
        assert_eq!(outcome.upserted_id, None);
    }
}
