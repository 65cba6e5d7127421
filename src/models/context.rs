use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mutable state of one login transaction, shared by every rule in the pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    /// Claims added to the identity token.
    #[serde(default)]
    pub id_token: Map<String, Value>,
    /// Claims added to the access token.
    #[serde(default)]
    pub access_token: Map<String, Value>,
    /// Anything else the pipeline put on the context (client, connection, request...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AuthContext {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn id_token_claim(&self, name: &str) -> Option<&Value> {
        self.id_token.get(name)
    }

    pub fn set_id_token_claim(&mut self, name: impl Into<String>, value: Value) {
        self.id_token.insert(name.into(), value);
    }
}
