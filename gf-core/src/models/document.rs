use super::DocumentId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

/// A schema-less record stored in a collection.
///
/// Documents are plain JSON objects. The only field the service itself
/// interprets is the store-assigned `_id`; `email` is read by convention for
/// order ownership.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(pub Map<String, Value>);

impl Document {
    /// The field holding the store-assigned identifier.
    pub const ID_FIELD: &'static str = "_id";

    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The store-assigned identifier, if present and well-formed.
    pub fn id(&self) -> Option<DocumentId> {
        self.get_str(Self::ID_FIELD)?.parse().ok()
    }

    /// Return this document with its `_id` set to `id`.
    pub fn with_id(mut self, id: DocumentId) -> Self {
        self.0
            .insert(Self::ID_FIELD.to_owned(), Value::String(id.to_string()));
        self
    }

    /// Remove and return whatever the caller put in `_id`.
    ///
    /// Identifiers belong to the store, so payloads are stripped of this
    /// field before they are inserted or applied as an update.
    pub fn take_id(&mut self) -> Option<Value> {
        self.0.remove(Self::ID_FIELD)
    }

    /// A string-valued field.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// The `email` field, used to associate orders with their owner.
    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    /// Apply `fields` with MongoDB `$set` semantics, reporting whether
    /// anything changed.
    ///
    /// A dotted key such as `"supplier.name"` addresses a nested field,
    /// creating intermediate objects as needed. Fields not named are left
    /// untouched. If any key cannot be applied the document is unchanged.
    pub fn set_fields(&mut self, fields: Document) -> Result<bool, InvalidPath> {
        let mut updated = self.0.clone();
        let mut modified = false;
        for (key, value) in fields.0 {
            modified |= set_path(&mut updated, &key, &key, value)?;
        }
        self.0 = updated;
        Ok(modified)
    }

    /// Consume the document, returning the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// A `$set` key that does not address a settable field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot set `{0}`: it has an empty segment or runs through a non-object field")]
pub struct InvalidPath(pub String);

fn set_path(
    target: &mut Map<String, Value>,
    path: &str,
    key: &str,
    value: Value,
) -> Result<bool, InvalidPath> {
    let invalid = || InvalidPath(key.to_owned());
    match path.split_once('.') {
        None if path.is_empty() => Err(invalid()),
        None => {
            let changed = target.get(path) != Some(&value);
            target.insert(path.to_owned(), value);
            Ok(changed)
        }
        Some((head, _)) if head.is_empty() => Err(invalid()),
        Some((head, rest)) => match target
            .entry(head)
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(child) => set_path(child, rest, key, value),
            _ => Err(invalid()),
        },
    }
}

impl Deref for Document {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Map<String, Value>> for Document {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Object(value.0)
    }
}

impl TryFrom<Value> for Document {
    type Error = Value;

    /// Only JSON objects are documents; anything else is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}
