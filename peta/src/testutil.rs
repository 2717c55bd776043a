//! Shared mock collaborators for the engine's tests.

use std::sync::Mutex;

use async_trait::async_trait;
use eyre::{eyre, Result};
use peta_catalog::{LayerDocument, LayerRecord};
use serde_json::Value;

use crate::registry::Layer;
use crate::{CatalogSource, Engine, Renderer, RequestClient};

/// Renderer that hands out integer handles and records every call.
#[derive(Debug, Default)]
pub struct MockRenderer {
    pub calls: Mutex<Vec<String>>,
    pub next_handle: Mutex<u32>,
    /// Layer ids this renderer refuses to materialize.
    pub refuse: Vec<String>,
}

impl MockRenderer {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn materialize_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with("materialize"))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    type Handle = u32;

    async fn materialize(&self, layer: &Layer) -> Result<Option<u32>> {
        self.record(format!("materialize {}", layer.record.id));
        if self.refuse.contains(&layer.record.id) {
            return Ok(None);
        }
        let mut next = self.next_handle.lock().unwrap();
        *next += 1;
        Ok(Some(*next))
    }

    fn set_visibility(&self, handle: &u32, visible: bool) {
        self.record(format!("set_visibility {} {}", handle, visible));
    }

    fn set_min_scale(&self, handle: &u32, min_scale: f64) {
        self.record(format!("set_min_scale {} {}", handle, min_scale));
    }

    fn set_opacity(&self, handle: &u32, opacity: f64) {
        self.record(format!("set_opacity {} {}", handle, opacity));
    }

    fn remove_layer(&self, handle: &u32) {
        self.record(format!("remove_layer {}", handle));
    }
}

/// Request client serving canned JSON keyed by URL substring, failing every
/// other request.
#[derive(Debug, Default)]
pub struct MockClient {
    pub responses: Vec<(String, Value)>,
    pub requested: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestClient for MockClient {
    async fn request_json(&self, url: &str) -> Result<Value> {
        self.requested.lock().unwrap().push(url.to_string());
        self.responses
            .iter()
            .find(|(fragment, _)| url.contains(fragment))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| eyre!("no canned response for {}", url))
    }
}

/// Catalog source serving canned documents keyed by URL substring, absent
/// for everything else.
#[derive(Debug, Default)]
pub struct MockSource {
    pub documents: Vec<(String, Value)>,
}

#[async_trait]
impl CatalogSource for MockSource {
    async fn get_json(&self, url: &str) -> Option<Value> {
        self.documents
            .iter()
            .find(|(fragment, _)| url.contains(fragment))
            .map(|(_, value)| value.clone())
    }
}

pub fn engine(renderer: MockRenderer, client: MockClient) -> Engine<MockRenderer, MockClient> {
    Engine::new(renderer, client)
}

pub fn layer_document(value: Value) -> LayerDocument {
    LayerDocument::from_json(value).unwrap()
}

/// Bare layer for registry-level tests that bypass the loader.
pub fn layer(index: u32, id: &str, category: &str) -> Layer {
    let record: LayerRecord = serde_json::from_value(serde_json::json!({
        "id": id,
        "category": category,
        "group": category,
        "config": { "type": "wms", "url": "https://example.com/wms" }
    }))
    .unwrap();
    Layer { index, record }
}
