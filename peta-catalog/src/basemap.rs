//! Basemap catalog records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasemapConfig {
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Whether this basemap is the initial selection.
    #[serde(default)]
    pub default: bool,
    /// Active sublayer name, for tiled services that require one.
    #[serde(default)]
    pub active_layer: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasemapRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub config: BasemapConfig,
}

/// The versioned basemap catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasemapDocument {
    #[serde(default)]
    pub basemap: Vec<BasemapRecord>,
}

impl BasemapDocument {
    /// Parse a document from an already-decoded JSON value.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }
}
