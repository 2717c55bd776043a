//! The layer registry: the indexed collection of layers, their category and
//! group placement, and per-layer runtime source state.

use std::collections::BTreeMap;
use std::fmt;

use peta_catalog::{LayerConfig, LayerRecord, QueryTemplate};

/// Session-scoped primary key for a layer. Assigned sequentially from zero
/// at load time, unique and immutable until the next catalog reload.
pub type LayerIndex = u32;

/// One cartographic data source and its load-time placement.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Registry primary key for this session.
    pub index: LayerIndex,
    /// The catalog record this layer was loaded from. `config.enable` is
    /// mutated in place as the layer is toggled.
    pub record: LayerRecord,
}

impl Layer {
    pub fn config(&self) -> &LayerConfig {
        &self.record.config
    }
}

/// Key under which a materialized source is stored.
///
/// Feature-scoped overlays render as `"<layerIndex>_<featureIndex>"`, whole
/// layers as the bare index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceKey {
    Layer(LayerIndex),
    Feature(LayerIndex, u32),
}

impl SourceKey {
    /// The layer this source belongs to.
    pub fn layer_index(&self) -> LayerIndex {
        match self {
            Self::Layer(index) => *index,
            Self::Feature(index, _) => *index,
        }
    }
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layer(index) => write!(f, "{}", index),
            Self::Feature(index, feature) => write!(f, "{}_{}", index, feature),
        }
    }
}

/// Per-source materialization state.
///
/// A source is materialized by the renderer at most once per session; every
/// later toggle only mutates the existing handle in place. `Pending` marks
/// the window between requesting materialization and the renderer resolving
/// it; a failed request falls back to `Unmaterialized` so a later toggle
/// retries.
#[derive(Debug, Clone, PartialEq)]
pub enum Materialization<H> {
    Unmaterialized,
    Pending,
    Ready(H),
}

impl<H> Materialization<H> {
    /// The live handle, if the source has resolved.
    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Ready(handle) => Some(handle),
            Self::Unmaterialized | Self::Pending => None,
        }
    }

    /// Whether materialization has at least been requested.
    pub fn requested(&self) -> bool {
        !matches!(self, Self::Unmaterialized)
    }
}

/// The indexed collection of layers and their runtime source state.
///
/// All five maps are rebuilt atomically on each catalog (re)load: the loader
/// builds a fresh registry and swaps it in whole, so readers never observe a
/// mix of old and new entries.
#[derive(Debug)]
pub struct Registry<H> {
    pub(crate) layers: BTreeMap<LayerIndex, Layer>,
    // Name -> ordinal slot list. Gaps stay `None`; duplicate ordinals within
    // one bucket overwrite, last write wins.
    pub(crate) categories: BTreeMap<String, Vec<Option<LayerIndex>>>,
    pub(crate) groups: BTreeMap<String, Vec<Option<LayerIndex>>>,
    pub(crate) sources: BTreeMap<SourceKey, Materialization<H>>,
    pub(crate) searchable: BTreeMap<LayerIndex, QueryTemplate>,
    pub(crate) geojsonable: BTreeMap<LayerIndex, QueryTemplate>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Registry<H> {
    /// Constructor.
    pub fn new() -> Self {
        Self {
            layers: BTreeMap::new(),
            categories: BTreeMap::new(),
            groups: BTreeMap::new(),
            sources: BTreeMap::new(),
            searchable: BTreeMap::new(),
            geojsonable: BTreeMap::new(),
        }
    }

    pub fn get(&self, index: LayerIndex) -> Option<&Layer> {
        self.layers.get(&index)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All layers in index order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Ordinal slot list for a category, gaps included.
    pub fn category_slots(&self, name: &str) -> Option<&[Option<LayerIndex>]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Ordinal slot list for a group, gaps included.
    pub fn group_slots(&self, name: &str) -> Option<&[Option<LayerIndex>]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Search descriptors by layer index.
    pub fn searchable(&self) -> &BTreeMap<LayerIndex, QueryTemplate> {
        &self.searchable
    }

    /// GeoJSON descriptors by layer index.
    pub fn geojsonable(&self) -> &BTreeMap<LayerIndex, QueryTemplate> {
        &self.geojsonable
    }

    /// The live handle stored under the given key, if any.
    pub fn handle(&self, key: &SourceKey) -> Option<&H> {
        self.sources.get(key).and_then(Materialization::handle)
    }

    /// Reverse lookup from a source handle to its layer. Feature overlay
    /// handles resolve to their parent layer.
    ///
    /// Linear scan; catalogs are tens of layers, so O(n) is acceptable here.
    pub fn find_layer_by_source(&self, handle: &H) -> Option<&Layer>
    where
        H: PartialEq,
    {
        self.sources
            .iter()
            .find(|(_, state)| state.handle() == Some(handle))
            .and_then(|(key, _)| self.layers.get(&key.layer_index()))
    }
}

impl<H: Clone> Registry<H> {
    /// Materialization state for the given key. Keys never requested read as
    /// [`Materialization::Unmaterialized`].
    pub fn materialization(&self, key: &SourceKey) -> Materialization<H> {
        self.sources
            .get(key)
            .cloned()
            .unwrap_or(Materialization::Unmaterialized)
    }
}
