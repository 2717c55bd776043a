//! Free-text search across searchable layers, and result labeling.

use std::collections::BTreeMap;

use futures::future::join_all;
use log::error;
use peta_catalog::{LabelFragment, QueryTemplate};
use serde::Serialize;
use serde_json::Value;

use crate::registry::LayerIndex;
use crate::template::{build_search_url, property_string};
use crate::{Engine, Renderer, RequestClient};

/// One search hit: the raw GeoJSON feature plus its synthesized display
/// label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledFeature {
    pub label: String,
    pub feature: Value,
}

impl<R: Renderer, C: RequestClient> Engine<R, C> {
    /// Run a free-text search across every layer registered as searchable.
    ///
    /// The per-layer requests are started together and collected
    /// independently; a failing layer is logged and excluded without
    /// aborting its siblings. The call completes once every per-layer
    /// outcome, success or caught failure, has settled.
    pub async fn search(&self, query_text: &str) -> BTreeMap<LayerIndex, Vec<LabeledFeature>> {
        let lookups = self.registry.searchable.iter().map(|(index, descriptor)| {
            let url = build_search_url(descriptor, query_text);
            async move {
                match self.client.request_json(&url).await {
                    Ok(data) => Some((*index, label_features(descriptor, &data))),
                    Err(e) => {
                        error!("searching layer {}: {}", index, e);
                        None
                    }
                }
            }
        });
        join_all(lookups).await.into_iter().flatten().collect()
    }
}

/// Synthesize a display label for every feature in a response by walking the
/// descriptor's label fragments in order: literals verbatim, property
/// markers as the property's value plus a trailing space.
fn label_features(descriptor: &QueryTemplate, data: &Value) -> Vec<LabeledFeature> {
    let features = match data.get("features").and_then(Value::as_array) {
        Some(features) => features,
        None => return Vec::new(),
    };
    features
        .iter()
        .map(|feature| {
            let mut label = String::new();
            for fragment in &descriptor.label {
                match fragment {
                    LabelFragment::Literal(text) => label.push_str(text),
                    LabelFragment::Property { prop } => {
                        let value = feature
                            .get("properties")
                            .and_then(|properties| properties.get(prop))
                            .map(property_string)
                            .unwrap_or_default();
                        label.push_str(&value);
                        label.push(' ');
                    }
                }
            }
            LabeledFeature {
                label,
                feature: feature.clone(),
            }
        })
        .collect()
}
