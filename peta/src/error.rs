use thiserror::Error;

use crate::registry::LayerIndex;

/// The primary error type that can be produced by the engine.
///
/// Failures inside the engine degrade rather than abort: catalog faults read
/// as an empty catalog, materialization faults leave a layer un-materialized
/// for a later retry, and per-layer request faults are logged and excluded
/// from aggregate results. The variants here cover the remaining cases where
/// a caller asked for something the registry simply does not have.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no layer with index {0} in the registry")]
    NoSuchLayer(LayerIndex),
    #[error("layer {0} has no geojson descriptor")]
    NotGeojsonLoadable(LayerIndex),
}
