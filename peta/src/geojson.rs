//! On-demand GeoJSON loading: feature-scoped overlays compiled from a
//! layer's geojson descriptor and the clicked feature's properties.

use eyre::Result;
use log::{debug, error};
use peta_catalog::EnableState;
use serde_json::{Map, Value};

use crate::registry::{LayerIndex, Materialization, SourceKey};
use crate::template::build_request_url;
use crate::{Engine, Error, Renderer, RequestClient};

impl<R: Renderer, C: RequestClient> Engine<R, C> {
    /// Compile the layer's geojson descriptor against the given feature's
    /// properties, fetch the result, and have the renderer materialize it as
    /// a feature-scoped overlay keyed `<layerIndex>_<featureIndex>`.
    ///
    /// Returns the fetched GeoJSON document. A renderer that produces no
    /// overlay source degrades to "no overlay" — the data still comes back
    /// and a later call retries the materialization.
    pub async fn load_feature_overlay(
        &mut self,
        index: LayerIndex,
        feature_index: u32,
        properties: &Map<String, Value>,
    ) -> Result<Value> {
        let url = {
            let descriptor = self
                .registry
                .geojsonable
                .get(&index)
                .ok_or(Error::NotGeojsonLoadable(index))?;
            build_request_url(descriptor, properties)
        };
        let overlay = {
            let layer = self
                .registry
                .layers
                .get(&index)
                .ok_or(Error::NoSuchLayer(index))?;
            // Derived record: the parent layer pointed at the compiled URL.
            let mut overlay = layer.clone();
            overlay.record.config.url = url.clone();
            overlay.record.config.enable = EnableState::On;
            overlay
        };

        let data = self.client.request_json(&url).await?;

        let key = SourceKey::Feature(index, feature_index);
        match self.registry.materialization(&key) {
            Materialization::Ready(_) | Materialization::Pending => {
                debug!("overlay {} already materialized", key);
            }
            Materialization::Unmaterialized => {
                self.registry.sources.insert(key, Materialization::Pending);
                match self.renderer.materialize(&overlay).await {
                    Ok(Some(handle)) => {
                        debug!("overlay {} materialized from {}", key, url);
                        self.registry
                            .sources
                            .insert(key, Materialization::Ready(handle));
                    }
                    Ok(None) => {
                        error!("renderer produced no source for overlay {}", key);
                        self.registry.sources.remove(&key);
                    }
                    Err(e) => {
                        error!("materializing overlay {}: {}", key, e);
                        self.registry.sources.remove(&key);
                    }
                }
            }
        }
        Ok(data)
    }
}
