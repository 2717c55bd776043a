//! Peta catalog documents: the declarative descriptions of map layers,
//! basemaps, categories and groups that the engine ingests, plus the
//! query-template descriptor shared by free-text search and on-demand
//! GeoJSON loading.
//!
//! This crate is pure data. Parsing starts from already-decoded JSON values;
//! fetching, runtime state and side effects all live in the `peta` crate.

mod basemap;
mod category;
mod error;
mod group;
mod layer;
mod query;

pub use basemap::{BasemapConfig, BasemapDocument, BasemapRecord};
pub use category::{CategoryDocument, CategoryRecord};
pub use error::Error;
pub use group::{GroupDocument, GroupRecord};
pub use layer::{EnableState, LayerConfig, LayerDocument, LayerKind, LayerRecord};
pub use query::{LabelFragment, QueryTemplate};

/// Append the cache-busting version token used by catalog fetches, e.g.
/// `versioned("/json/layer.json", "12")` yields `/json/layer.json?v=12`.
pub fn versioned(path: &str, token: &str) -> String {
    format!("{}?v={}", path, token)
}
