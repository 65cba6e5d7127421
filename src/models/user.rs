use mongodb::bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of the user logging in, as handed over by the login pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoginUser {
    pub email: String,
    /// Remaining profile attributes, carried through untouched.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

#[cfg(test)]
impl LoginUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            profile: Map::new(),
        }
    }
}

/// A document from the `users` collection. Only `foo` is consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct DbUserRecord {
    document: Document,
}

impl DbUserRecord {
    /// The `foo` field as JSON, or `None` when it is missing or null.
    pub fn foo(&self) -> Option<Value> {
        match self.document.get("foo") {
            None | Some(Bson::Null) => None,
            Some(value) => Some(value.clone().into_relaxed_extjson()),
        }
    }
}

impl From<Document> for DbUserRecord {
    fn from(document: Document) -> Self {
        Self { document }
    }
}
