//! The renderer collaborator contract.

use async_trait::async_trait;
use eyre::Result;

use crate::registry::Layer;

/// Materializes layers into drawable sources and mutates them in place.
///
/// Handles are opaque and renderer-owned. The engine stores them in its
/// registry, mutates them through this trait for later visibility, scale and
/// opacity changes, and never destroys them itself; `remove_layer` exists
/// for callers that want to prune.
#[async_trait]
pub trait Renderer {
    /// Opaque handle to a materialized source.
    type Handle: Clone + PartialEq + Send + Sync;

    /// Materialize the given layer into a drawable source.
    ///
    /// Returning `Ok(None)` means the renderer cannot draw this layer; the
    /// engine leaves it un-materialized so a later toggle retries.
    async fn materialize(&self, layer: &Layer) -> Result<Option<Self::Handle>>;

    /// Flip a materialized source's visibility.
    fn set_visibility(&self, handle: &Self::Handle, visible: bool);

    /// Set the scale denominator above which a source is hidden.
    fn set_min_scale(&self, handle: &Self::Handle, min_scale: f64);

    /// Apply a normalized opacity (0..1) to a materialized source.
    fn set_opacity(&self, handle: &Self::Handle, opacity: f64);

    /// Destroy a materialized source. Never invoked by the engine itself.
    fn remove_layer(&self, handle: &Self::Handle);
}
