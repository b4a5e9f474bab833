//! Custom cell renderers
//!
//! `ui:widget: {"custom": "<name>"}` names a renderer registered by the host.
//! Data only carries the name; the code lives here.

use crate::model::{FieldDisplay, Item};
use ratatui::text::Line;
use serde_json::Value;
use std::collections::HashMap;

/// Everything a custom renderer gets to see
#[derive(Debug, Clone, Copy)]
pub struct CustomCell<'a> {
    pub value: &'a Value,
    pub name: &'a str,
    pub item: &'a Item,
    /// The field's table-schema descriptor
    pub schema: Option<&'a FieldDisplay>,
}

/// Renders a custom cell
pub trait CellRenderer {
    fn render(&self, cell: &CustomCell<'_>) -> Line<'static>;
}

impl<F> CellRenderer for F
where
    F: Fn(&CustomCell<'_>) -> Line<'static>,
{
    fn render(&self, cell: &CustomCell<'_>) -> Line<'static> {
        self(cell)
    }
}

/// Named custom renderers
#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn CellRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, renderer: impl CellRenderer + 'static) {
        self.renderers.insert(name.to_string(), Box::new(renderer));
    }

    pub fn with(mut self, name: &str, renderer: impl CellRenderer + 'static) -> Self {
        self.register(name, renderer);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn CellRenderer> {
        self.renderers.get(name).map(|r| r.as_ref())
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.renderers.keys().collect();
        names.sort();
        f.debug_struct("RendererRegistry").field("renderers", &names).finish()
    }
}
