//! Group catalog records. A group is a named toggle target with its own
//! enable boolean, cascaded onto member layers by the engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub enable: bool,
}

/// The versioned group catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupDocument {
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
}

impl GroupDocument {
    /// Parse a document from an already-decoded JSON value.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }
}
