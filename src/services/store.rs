//! In-memory resource store
//!
//! Holds every item of a resource and serves the table one page at a time.
//! Implements `TableHandler`, so table events land here.

use crate::handler::TableHandler;
use crate::model::Item;
use crate::services::resource::{ResourceFile, ResourceFormat, StoreError};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub struct MemoryStore {
    resource: ResourceFile,
    source: Option<(PathBuf, ResourceFormat)>,
    page: usize,
    per_page: usize,
    dirty: bool,
    /// Last user-facing message produced by a handler call
    pub status: Option<String>,
}

impl MemoryStore {
    pub fn new(resource: ResourceFile, default_per_page: usize) -> Self {
        let per_page = resource.per_page.unwrap_or(default_per_page).max(1);
        Self {
            resource,
            source: None,
            page: 0,
            per_page,
            dirty: false,
            status: None,
        }
    }

    /// Load from a resource file; `save` writes back to it
    pub fn open(path: &Path, default_per_page: usize) -> Result<Self, StoreError> {
        let (resource, format) = ResourceFile::load(path)?;
        let mut store = Self::new(resource, default_per_page);
        store.source = Some((path.to_path_buf(), format));
        Ok(store)
    }

    pub fn resource(&self) -> &ResourceFile {
        &self.resource
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.resource.items.len()
    }

    pub fn page_count(&self) -> usize {
        self.len().div_ceil(self.per_page)
    }

    /// Items of the current page, in stored order
    pub fn page_items(&self) -> Vec<Item> {
        self.resource
            .items
            .iter()
            .skip(self.page * self.per_page)
            .take(self.per_page)
            .cloned()
            .collect()
    }

    fn clamp_page(&mut self) {
        self.page = self.page.min(self.page_count().saturating_sub(1));
    }

    fn position(&self, id: &Value) -> Option<usize> {
        if id.is_null() {
            return None;
        }
        self.resource.items.iter().position(|item| item.id() == id)
    }

    /// Next integer id: one past the largest numeric id in the store
    fn next_id(&self) -> u64 {
        self.resource
            .items
            .iter()
            .filter_map(|item| item.id().as_u64())
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Write the resource back to the file it was loaded from
    pub fn save(&mut self) -> Result<(), StoreError> {
        if let Some((path, format)) = &self.source {
            self.resource.save(path, *format)?;
            tracing::info!(path = %path.display(), items = self.len(), "saved resource");
            self.dirty = false;
            self.status = Some(format!("Saved {}", path.display()));
        } else {
            self.status = Some("Nothing to save to: resource was not loaded from a file".to_string());
        }
        Ok(())
    }
}

impl TableHandler for MemoryStore {
    fn on_create(&mut self, mut item: Item) {
        if item.id().is_null() {
            item.set("id", Value::from(self.next_id()));
        }
        tracing::info!(id = %item.id(), "create item");
        self.status = Some(format!("Created {} {}", self.resource.schema.title, item.id()));
        self.resource.items.push(item);
        self.dirty = true;
        // Show the page the new item landed on
        self.page = self.page_count().saturating_sub(1);
    }

    fn on_update(&mut self, item: Item) {
        match self.position(item.id()) {
            Some(index) => {
                tracing::info!(id = %item.id(), "update item");
                self.status = Some(format!("Updated {} {}", self.resource.schema.title, item.id()));
                self.resource.items[index] = item;
                self.dirty = true;
            }
            None => {
                tracing::warn!(id = %item.id(), "update for unknown item ignored");
                self.status = Some(format!("No {} with id {}", self.resource.schema.title, item.id()));
            }
        }
    }

    fn on_destroy(&mut self, item: Item) {
        match self.position(item.id()) {
            Some(index) => {
                tracing::info!(id = %item.id(), "destroy item");
                self.resource.items.remove(index);
                self.status = Some(format!("Destroyed {} {}", self.resource.schema.title, item.id()));
                self.dirty = true;
                self.clamp_page();
            }
            None => {
                tracing::warn!(id = %item.id(), "destroy for unknown item ignored");
                self.status = Some(format!("No {} with id {}", self.resource.schema.title, item.id()));
            }
        }
    }

    fn on_action(&mut self, name: &str, item: Item) {
        tracing::info!(action = name, id = %item.id(), "row action");
        self.status = Some(format!("{} on {} {}", name, self.resource.schema.title, item.id()));
    }

    fn on_page_change(&mut self, selected_page: usize, per_page: usize) {
        tracing::debug!(selected_page, per_page, "page change");
        self.per_page = per_page.max(1);
        self.page = selected_page;
        self.clamp_page();
    }
}
