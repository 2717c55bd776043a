//! Catalog loading: the pure indexing pass plus the engine entry points that
//! swap the fresh registry in and auto-enable configured layers.

use log::{debug, warn};
use peta_catalog::{GroupDocument, LayerDocument};

use crate::registry::{Layer, LayerIndex, Registry};
use crate::{CatalogSource, Engine, GroupState, Renderer};

/// Build a fresh registry from a decoded layer document.
///
/// Layers are indexed in array order starting from zero. Category and group
/// buckets are created on first sight; each layer is placed at its
/// configured ordinal slot, later layers overwriting earlier claims to the
/// same slot (last write wins).
pub(crate) fn build_registry<H>(document: &LayerDocument) -> Registry<H> {
    let mut registry = Registry::new();
    for (i, record) in document.layers.iter().enumerate() {
        let index = i as LayerIndex;
        place_slot(
            registry.categories.entry(record.category.clone()).or_default(),
            record.config.order,
            index,
        );
        place_slot(
            registry.groups.entry(record.group.clone()).or_default(),
            record.config.order_group,
            index,
        );
        if let Some(search) = &record.config.search {
            registry.searchable.insert(index, search.clone());
        }
        if let Some(geojson) = &record.config.geojson {
            registry.geojsonable.insert(index, geojson.clone());
        }
        registry.layers.insert(
            index,
            Layer {
                index,
                record: record.clone(),
            },
        );
    }
    registry
}

fn place_slot(slots: &mut Vec<Option<LayerIndex>>, ordinal: usize, index: LayerIndex) {
    if slots.len() <= ordinal {
        slots.resize(ordinal + 1, None);
    }
    if let Some(previous) = slots[ordinal] {
        warn!(
            "ordinal slot {} already held layer {}; layer {} overwrites it",
            ordinal, previous, index
        );
    }
    slots[ordinal] = Some(index);
}

impl<R: Renderer, C> Engine<R, C> {
    /// Replace the registry with one built from the given document, then
    /// perform the enable side effect for every layer configured `on` or
    /// `scale`. One layer failing to materialize does not abort the rest.
    ///
    /// A `None` document yields an empty registry; loading never fails. The
    /// swap is atomic: no reader ever sees a mix of old and new entries, and
    /// every previously held source handle is dropped.
    pub async fn load_catalog(&mut self, document: Option<&LayerDocument>) {
        self.registry = match document {
            Some(document) => build_registry(document),
            None => Registry::new(),
        };
        debug!("loaded {} layers", self.registry.len());

        let auto: Vec<_> = self
            .registry
            .layers()
            .filter(|layer| layer.config().enable.is_visible())
            .map(|layer| (layer.index, layer.config().enable))
            .collect();
        for (index, state) in auto {
            if let Err(e) = self.toggle_layer(index, Some(state)).await {
                warn!("auto-enabling layer {}: {}", index, e);
            }
        }
    }

    /// Fetch the layer catalog from a versioned URL through the catalog
    /// source collaborator. An absent fetch or a malformed document is
    /// treated as an empty catalog, never as a fault.
    pub async fn load_catalog_from_source<S: CatalogSource>(&mut self, source: &S, url: &str) {
        let document = match source.get_json(url).await {
            Some(value) => match LayerDocument::from_json(value) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!("malformed layer catalog at {}: {}", url, e);
                    None
                }
            },
            None => None,
        };
        self.load_catalog(document.as_ref()).await;
    }

    /// Replace the group roster from a decoded group document. A `None`
    /// document clears the roster.
    pub fn load_groups(&mut self, document: Option<&GroupDocument>) {
        self.groups = document
            .map(|document| {
                document
                    .groups
                    .iter()
                    .map(|group| GroupState {
                        name: group.name.clone(),
                        enable: group.enable,
                    })
                    .collect()
            })
            .unwrap_or_default();
    }

    /// Fetch the group roster from a versioned URL through the catalog
    /// source collaborator, with the same tolerance as
    /// [`load_catalog_from_source`](Engine::load_catalog_from_source).
    pub async fn load_groups_from_source<S: CatalogSource>(&mut self, source: &S, url: &str) {
        let document = match source.get_json(url).await {
            Some(value) => match GroupDocument::from_json(value) {
                Ok(document) => Some(document),
                Err(e) => {
                    warn!("malformed group catalog at {}: {}", url, e);
                    None
                }
            },
            None => None,
        };
        self.load_groups(document.as_ref());
    }
}
