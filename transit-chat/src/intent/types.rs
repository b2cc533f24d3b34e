//! NLU response DTOs.

use std::collections::HashMap;

use serde::Deserialize;

/// Response from the `message` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WitResponse {
    #[serde(rename = "_text")]
    pub text: Option<String>,

    /// Entity name -> detected entities, most confident first.
    #[serde(default)]
    pub entities: HashMap<String, Vec<Entity>>,
}

impl WitResponse {
    /// Entities detected under `name`; empty if none.
    pub fn entity(&self, name: &str) -> &[Entity] {
        self.entities.get(name).map(Vec::as_slice).unwrap_or_default()
    }
}

/// One detected entity.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    pub value: Option<serde_json::Value>,
    pub confidence: Option<f64>,
}

impl Entity {
    /// The entity value as text. Non-string values are rendered as JSON.
    pub fn text(&self) -> Option<String> {
        match self.value.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
