//! Peta is a renderer-agnostic engine for browser-style map clients: it owns
//! the layer catalog, drives per-layer visibility as a three-state machine,
//! cascades toggles across named groups and content tags, and compiles
//! declarative query templates plus live feature properties into concrete
//! request URLs for search and on-demand GeoJSON loading.
//!
//! Rendering, transport and authentication are collaborator contracts — see
//! [`Renderer`], [`RequestClient`] and [`CatalogSource`]. The engine only
//! emits intents such as "materialize this layer" or "fetch this URL"; it
//! never draws a pixel or opens a socket itself.

mod api;
mod basemap;
mod engine;
mod error;
mod geojson;
mod loader;
mod registry;
mod renderer;
mod search;
mod template;
#[cfg(test)]
mod testutil;
mod visibility;

pub use api::{CatalogSource, RequestClient};
pub use basemap::Basemaps;
pub use engine::{Engine, GroupState};
pub use error::Error;
pub use registry::{Layer, LayerIndex, Materialization, Registry, SourceKey};
pub use renderer::Renderer;
pub use search::LabeledFeature;
pub use template::{build_request_url, build_search_url, FILTER_PARAM, PROPERTY_PARAM};
pub use visibility::WORLD_SCALE_DENOMINATOR;
