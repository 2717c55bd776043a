//! Category catalog records. Categories are a pure grouping key for ordered
//! display; they carry no enable state of their own.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// The versioned category catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDocument {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
}

impl CategoryDocument {
    /// Parse a document from an already-decoded JSON value.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }
}
