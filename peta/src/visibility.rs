//! The toggle state machine and the group/content cascade logic.

use eyre::Result;
use log::{debug, error};
use peta_catalog::EnableState;

use crate::registry::{LayerIndex, Materialization, SourceKey};
use crate::{Engine, Error, Renderer};

/// Scale denominator at which the whole world is in view. Setting a source's
/// minimum scale to this value means "never hide due to scale".
pub const WORLD_SCALE_DENOMINATOR: f64 = 279_541_132.014_358_9;

// Next state in the pure cycle toggle: `on -> scale` when the layer has a
// minimum scale, `on -> off` otherwise, `scale -> off`, `off -> on`.
fn cycle(current: EnableState, has_min_scale: bool) -> EnableState {
    match current {
        EnableState::On if has_min_scale => EnableState::Scale,
        EnableState::On => EnableState::Off,
        EnableState::Scale => EnableState::Off,
        EnableState::Off => EnableState::On,
    }
}

impl<R: Renderer, C> Engine<R, C> {
    /// Toggle a layer: cycle its state, or force the given target state.
    ///
    /// The first toggle of a layer requests materialization from the
    /// renderer and stores the returned handle; every later toggle mutates
    /// the existing source's scale threshold and visibility in place. A
    /// failed materialization leaves the layer un-materialized so a later
    /// toggle retries it.
    pub async fn toggle_layer(
        &mut self,
        index: LayerIndex,
        force: Option<EnableState>,
    ) -> Result<()> {
        let layer = self
            .registry
            .layers
            .get_mut(&index)
            .ok_or(Error::NoSuchLayer(index))?;
        let has_min_scale = layer.record.config.min_scale.is_some();
        let next = match force {
            // A layer without a minimum scale can never enter `scale`.
            Some(EnableState::Scale) if !has_min_scale => EnableState::On,
            Some(target) => target,
            None => cycle(layer.record.config.enable, has_min_scale),
        };
        layer.record.config.enable = next;
        let snapshot = layer.clone();
        debug!("layer {} ({}) -> {:?}", index, snapshot.record.id, next);

        let key = SourceKey::Layer(index);
        match self.registry.materialization(&key) {
            Materialization::Unmaterialized => {
                self.registry.sources.insert(key, Materialization::Pending);
                match self.renderer.materialize(&snapshot).await {
                    Ok(Some(handle)) => {
                        // The config as it stands now wins: if the state
                        // changed while the request was in flight, the fresh
                        // handle still ends up reflecting the latest toggle.
                        self.apply_state(&handle, index);
                        self.registry
                            .sources
                            .insert(key, Materialization::Ready(handle));
                    }
                    Ok(None) => {
                        error!("renderer produced no source for layer {}", index);
                        self.registry.sources.remove(&key);
                    }
                    Err(e) => {
                        error!("materializing layer {}: {}", index, e);
                        self.registry.sources.remove(&key);
                    }
                }
            }
            // Materialization already in flight: the config update above is
            // all this toggle contributes.
            Materialization::Pending => {}
            Materialization::Ready(handle) => {
                self.apply_state(&handle, index);
            }
        }
        Ok(())
    }

    /// Flip or force a named group's enable flag and cascade the resulting
    /// state onto every member layer, in ordinal order, skipping empty
    /// slots. The boolean maps to layer state as `true => on`,
    /// `false => off`. An unknown group name is a no-op.
    pub async fn toggle_group(&mut self, name: &str, force: Option<bool>) -> Result<()> {
        let enable = {
            let group = match self.groups.iter_mut().find(|g| g.name == name) {
                Some(group) => group,
                None => return Ok(()),
            };
            group.enable = force.unwrap_or(!group.enable);
            group.enable
        };
        let target = if enable {
            EnableState::On
        } else {
            EnableState::Off
        };

        let members: Vec<LayerIndex> = self
            .registry
            .groups
            .get(name)
            .map(|slots| slots.iter().flatten().copied().collect())
            .unwrap_or_default();
        for index in members {
            // Sequential on purpose: each member's materialization settles
            // before the next begins.
            self.toggle_layer(index, Some(target)).await?;
        }
        Ok(())
    }

    /// Apply a toggle to every layer whose content tag matches and whose
    /// materialization has been requested. A layer never enabled is not
    /// affected: a content toggle re-styles what is already on the map, it
    /// does not pull new layers in.
    pub async fn toggle_content(
        &mut self,
        tag: &str,
        force: Option<EnableState>,
    ) -> Result<()> {
        let targets: Vec<LayerIndex> = self
            .registry
            .sources
            .keys()
            .filter_map(|key| match key {
                SourceKey::Layer(index) => Some(*index),
                SourceKey::Feature(..) => None,
            })
            .filter(|index| {
                self.registry
                    .layers
                    .get(index)
                    .and_then(|layer| layer.record.content.as_deref())
                    .map_or(false, |content| content == tag)
            })
            .collect();
        for index in targets {
            self.toggle_layer(index, force).await?;
        }
        Ok(())
    }

    // Push a layer's current enable state onto its materialized source:
    // `scale` applies the configured minimum scale, every other state resets
    // the threshold to the always-visible sentinel.
    fn apply_state(&self, handle: &R::Handle, index: LayerIndex) {
        let config = match self.registry.layers.get(&index) {
            Some(layer) => &layer.record.config,
            None => return,
        };
        let min_scale = match config.enable {
            EnableState::Scale => config.min_scale.unwrap_or(WORLD_SCALE_DENOMINATOR),
            _ => WORLD_SCALE_DENOMINATOR,
        };
        self.renderer.set_min_scale(handle, min_scale);
        self.renderer.set_visibility(handle, config.enable.is_visible());
    }
}
