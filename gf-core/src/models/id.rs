use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};
use std::{borrow::Cow, fmt, str::FromStr};

/// Identifier assigned by the document store to every stored document.
///
/// This is a MongoDB ObjectId, exchanged on the wire in its 24 character
/// hexadecimal form (the `_id` field of a document, or an `{id}` path segment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct DocumentId(pub ObjectId);

impl DocumentId {
    /// Generate a fresh identifier, as the store would for a new document.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }
}

/// A string that does not parse as a [`DocumentId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{0}` is not a valid document id")]
pub struct InvalidId(pub String);

impl From<ObjectId> for DocumentId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl From<DocumentId> for ObjectId {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidId(s.to_owned()))
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Cow::<'de, str>::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

#[cfg(feature = "schemars")]
impl schemars::JsonSchema for DocumentId {
    fn schema_name() -> Cow<'static, str> {
        "DocumentId".into()
    }

    fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "pattern": "^[0-9a-fA-F]{24}$",
            "description": "A 24 character hexadecimal document identifier",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_displays_it_back() {
        let id: DocumentId = "64b7f0c2a1e4d3b2c1a09f8e".parse().unwrap();
        assert_eq!(id.to_string(), "64b7f0c2a1e4d3b2c1a09f8e");
    }

    #[test]
    fn rejects_malformed_ids() {
        let err = "not-an-id".parse::<DocumentId>().unwrap_err();
        assert_eq!(err, InvalidId("not-an-id".to_owned()));
        assert!("64b7f0c2a1e4d3b2c1a09f8".parse::<DocumentId>().is_err());
    }

    #[test]
    fn serializes_as_a_plain_string() {
        let id = DocumentId::generate();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
        assert_eq!(serde_json::from_value::<DocumentId>(json).unwrap(), id);
    }
}
