//! Layer catalog records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, QueryTemplate};

/// Visibility state configured for (and later toggled on) a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnableState {
    /// Always shown.
    On,
    /// Shown only while the map scale is at or below the layer's configured
    /// minimum scale.
    Scale,
    /// Hidden.
    #[default]
    Off,
}

impl EnableState {
    /// Whether a source in this state is drawn at all.
    pub fn is_visible(&self) -> bool {
        matches!(self, Self::On | Self::Scale)
    }
}

/// The kind of source a layer materializes into.
///
/// Kinds this crate does not recognize still parse (as [`LayerKind::Other`]);
/// whether such a layer can be drawn is the renderer's call, not a catalog
/// parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Image,
    Wms,
    Geojson,
    Other,
}

impl<'de> Deserialize<'de> for LayerKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "image" => Self::Image,
            "wms" => Self::Wms,
            "geojson" => Self::Geojson,
            _ => Self::Other,
        })
    }
}

/// Per-layer configuration as authored in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Source kind, e.g. `wms` or `geojson`.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub url: String,
    #[serde(default)]
    pub enable: EnableState,
    /// Scale denominator below which the layer is shown while in `scale`
    /// state. A layer without one can never enter `scale` state.
    #[serde(default)]
    pub min_scale: Option<f64>,
    #[serde(default)]
    pub max_scale: Option<f64>,
    /// Ordinal display slot within the layer's category.
    #[serde(default)]
    pub order: usize,
    /// Ordinal slot within the layer's group.
    #[serde(default)]
    pub order_group: usize,
    /// Percent, 0..100.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub zindex: Option<u32>,
    /// Free-text search descriptor, present when the layer is searchable.
    #[serde(default)]
    pub search: Option<QueryTemplate>,
    /// On-demand GeoJSON descriptor, present when the layer loads
    /// feature-scoped overlays.
    #[serde(default)]
    pub geojson: Option<QueryTemplate>,
    /// Renderer-specific settings passed through untouched (sublayer ids,
    /// renderers, label classes, proxies and the like).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

fn default_opacity() -> f64 {
    100.0
}

/// One catalog layer entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerRecord {
    /// Stable identifier, unique across reloads.
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub category: String,
    pub group: String,
    /// Logical tag shared by layers representing the same real-world content
    /// at different scales or styles. Not unique.
    #[serde(default)]
    pub content: Option<String>,
    pub config: LayerConfig,
}

/// The versioned layer catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerDocument {
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
}

impl LayerDocument {
    /// Parse a document from an already-decoded JSON value.
    pub fn from_json(value: Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_layer_document() {
        let doc = LayerDocument::from_json(json!({
            "layers": [
                {
                    "id": "roads",
                    "name": "Road network",
                    "category": "infra",
                    "group": "transport",
                    "content": "roads",
                    "config": {
                        "type": "wms",
                        "url": "https://geo.example.com/wms?service=WMS",
                        "enable": "scale",
                        "min_scale": 50000.0,
                        "max_scale": 0.0,
                        "order": 2,
                        "order_group": 0,
                        "opacity": 80.0,
                        "zindex": 4,
                        "name": "workspace:roads"
                    }
                },
                {
                    "id": "water",
                    "category": "infra",
                    "group": "hydro",
                    "config": {
                        "type": "geojson",
                        "url": "https://geo.example.com/geojson/water"
                    }
                }
            ]
        }))
        .unwrap();

        assert_eq!(doc.layers.len(), 2);

        let roads = &doc.layers[0];
        assert_eq!(roads.id, "roads");
        assert_eq!(roads.config.kind, LayerKind::Wms);
        assert_eq!(roads.config.enable, EnableState::Scale);
        assert_eq!(roads.config.order, 2);
        assert_eq!(roads.config.opacity, 80.0);
        // Renderer-specific keys survive in the passthrough map.
        assert_eq!(
            roads.config.extra.get("name").and_then(Value::as_str),
            Some("workspace:roads")
        );

        let water = &doc.layers[1];
        assert_eq!(water.config.enable, EnableState::Off);
        assert_eq!(water.config.order, 0);
        assert_eq!(water.config.opacity, 100.0);
        assert!(water.config.search.is_none());
        assert!(water.content.is_none());
    }

    #[test]
    fn unknown_kind_still_parses() {
        let doc = LayerDocument::from_json(json!({
            "layers": [{
                "id": "tiles",
                "category": "base",
                "group": "base",
                "config": { "type": "vector-tile", "url": "https://example.com" }
            }]
        }))
        .unwrap();
        assert_eq!(doc.layers[0].config.kind, LayerKind::Other);
    }

    #[test]
    fn missing_layers_array_is_empty() {
        let doc = LayerDocument::from_json(json!({})).unwrap();
        assert!(doc.layers.is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(LayerDocument::from_json(json!({ "layers": [{ "id": 1 }] })).is_err());
    }
}
