//! Basemap selection: which of the configured basemaps is active and which
//! one a fresh map starts with. Applying the choice is the renderer's
//! business; this type only picks the record.

use log::warn;
use peta_catalog::{BasemapDocument, BasemapRecord};

/// The configured basemaps and the active selection.
#[derive(Debug, Default)]
pub struct Basemaps {
    list: Vec<BasemapRecord>,
    active: Option<usize>,
}

impl Basemaps {
    /// Constructor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list from a decoded basemap document. A `None` document
    /// clears the list; either way the active selection resets.
    pub fn load(&mut self, document: Option<&BasemapDocument>) {
        self.list = document
            .map(|document| document.basemap.clone())
            .unwrap_or_default();
        self.active = None;
    }

    pub fn list(&self) -> &[BasemapRecord] {
        &self.list
    }

    /// The basemap flagged as the default initial selection, if any.
    pub fn initial(&self) -> Option<&BasemapRecord> {
        self.list.iter().find(|basemap| basemap.config.default)
    }

    /// Mark the basemap with the given id active and return it as the
    /// intent for the renderer. An unknown id leaves the selection
    /// unchanged.
    pub fn set_active(&mut self, id: &str) -> Option<&BasemapRecord> {
        match self.list.iter().position(|basemap| basemap.id == id) {
            Some(position) => {
                self.active = Some(position);
                self.list.get(position)
            }
            None => {
                warn!("unknown basemap id {:?}", id);
                None
            }
        }
    }

    pub fn active(&self) -> Option<&BasemapRecord> {
        self.active.and_then(|position| self.list.get(position))
    }
}
