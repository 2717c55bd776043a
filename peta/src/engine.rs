//! The engine: one owned object bringing together the layer registry, the
//! group roster and the collaborator handles. Nothing here is ambient or
//! global; every subsystem reaches the registry through this object.

use eyre::Result;
use serde::Serialize;

use crate::registry::{LayerIndex, Registry, SourceKey};
use crate::{Error, Renderer};

/// One entry in the group roster: a named toggle target with its own enable
/// boolean, cascaded onto member layers by
/// [`toggle_group`](Engine::toggle_group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupState {
    pub name: String,
    pub enable: bool,
}

/// Owns the layer registry and drives it on behalf of the renderer and
/// request collaborators.
pub struct Engine<R: Renderer, C> {
    pub(crate) registry: Registry<R::Handle>,
    pub(crate) groups: Vec<GroupState>,
    pub(crate) renderer: R,
    pub(crate) client: C,
}

impl<R: Renderer, C> Engine<R, C> {
    /// Constructor.
    pub fn new(renderer: R, client: C) -> Self {
        Self {
            registry: Registry::new(),
            groups: Vec::new(),
            renderer,
            client,
        }
    }

    pub fn registry(&self) -> &Registry<R::Handle> {
        &self.registry
    }

    /// The group roster, in document order.
    pub fn groups(&self) -> &[GroupState] {
        &self.groups
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Update a layer's configured opacity (percent, 0..100) and apply the
    /// normalized value to its live source, if one exists. The stored config
    /// and the applied value stay consistent: re-deriving `percent / 100`
    /// from the config always reproduces what the source was given.
    pub fn set_opacity(&mut self, index: LayerIndex, percent: f64) -> Result<()> {
        let layer = self
            .registry
            .layers
            .get_mut(&index)
            .ok_or(Error::NoSuchLayer(index))?;
        layer.record.config.opacity = percent;
        if let Some(handle) = self.registry.handle(&SourceKey::Layer(index)) {
            self.renderer.set_opacity(handle, percent / 100.0);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use peta_catalog::EnableState;
    use serde_json::json;

    use crate::testutil::{engine, layer_document, MockClient, MockRenderer};
    use crate::registry::SourceKey;

    #[tokio::test]
    async fn set_opacity_updates_config_and_live_source() {
        let mut engine = engine(MockRenderer::default(), MockClient::default());
        let doc = layer_document(json!({
            "layers": [
                {
                    "id": "roads",
                    "category": "infra",
                    "group": "transport",
                    "config": { "type": "wms", "url": "https://example.com/wms" }
                }
            ]
        }));
        engine.load_catalog(Some(&doc)).await;

        // No live source yet: only the config changes.
        engine.set_opacity(0, 40.0).unwrap();
        assert_eq!(engine.registry().get(0).unwrap().config().opacity, 40.0);
        assert!(engine.renderer().calls().is_empty());

        engine.toggle_layer(0, Some(EnableState::On)).await.unwrap();
        let handle = *engine
            .registry()
            .handle(&SourceKey::Layer(0))
            .expect("materialized");

        engine.set_opacity(0, 55.0).unwrap();
        assert_eq!(engine.registry().get(0).unwrap().config().opacity, 55.0);
        assert!(engine
            .renderer()
            .calls()
            .contains(&format!("set_opacity {} 0.55", handle)));
    }

    #[test]
    fn set_opacity_on_unknown_layer_is_an_error() {
        let mut engine = engine(MockRenderer::default(), MockClient::default());
        assert!(engine.set_opacity(42, 10.0).is_err());
    }
}
