//! Table schema - per-field display configuration
//!
//! Mirrors the `ui:*` conventions: a map from field name to a descriptor with
//! an optional `ui:widget`, plus the top-level `ui:order` and `ui:actions` keys.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// `ui:widget` hint for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "RawWidget")]
pub enum WidgetHint {
    /// `"img"` - render data-url strings as images
    Img,
    /// `"audio"` - render data-url strings as an audio player
    Audio,
    /// `"hidden"` - never display the field
    Hidden,
    /// Any other token; has no effect on classification
    Named(String),
    /// `{"custom": "<renderer>"}` - a renderer looked up in the registry
    Custom(String),
}

#[derive(Serialize)]
#[serde(untagged)]
enum RawWidget {
    Custom { custom: String },
    Name(String),
}

impl WidgetHint {
    /// Read a `ui:widget` value: a token string or `{"custom": "<name>"}`
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(match name.as_str() {
                "img" => WidgetHint::Img,
                "audio" => WidgetHint::Audio,
                "hidden" => WidgetHint::Hidden,
                _ => WidgetHint::Named(name.clone()),
            }),
            Value::Object(map) => map
                .get("custom")
                .and_then(Value::as_str)
                .map(|custom| WidgetHint::Custom(custom.to_string())),
            _ => None,
        }
    }
}

impl From<WidgetHint> for RawWidget {
    fn from(hint: WidgetHint) -> Self {
        match hint {
            WidgetHint::Img => RawWidget::Name("img".to_string()),
            WidgetHint::Audio => RawWidget::Name("audio".to_string()),
            WidgetHint::Hidden => RawWidget::Name("hidden".to_string()),
            WidgetHint::Named(name) => RawWidget::Name(name),
            WidgetHint::Custom(custom) => RawWidget::Custom { custom },
        }
    }
}

/// Display descriptor for one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDisplay {
    #[serde(rename = "ui:widget", skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetHint>,
}

impl FieldDisplay {
    /// Read one field descriptor; an unusable `ui:widget` is dropped so the
    /// field renders as text
    fn from_map(field: &str, map: &Map<String, Value>) -> Self {
        let widget = map.get("ui:widget").and_then(|value| {
            let hint = WidgetHint::from_value(value);
            if hint.is_none() {
                tracing::warn!(field, widget = %value, "unrecognized ui:widget, treating as text");
            }
            hint
        });
        Self { widget }
    }

    pub fn is_hidden(&self) -> bool {
        self.widget == Some(WidgetHint::Hidden)
    }
}

/// Extra per-row action button (`ui:actions` entry)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowActionSpec {
    pub name: String,
    #[serde(default)]
    pub icon: String,
}

/// Per-field display configuration for the table
///
/// Read leniently: entries that cannot be understood are logged and
/// skipped, never failing the resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    /// Display-order override
    #[serde(rename = "ui:order", skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    /// Extra per-row action buttons, in display order
    #[serde(rename = "ui:actions", skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<RowActionSpec>,
    /// Field descriptors by field name
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldDisplay>,
}

fn parse_order(value: Value) -> Option<Vec<String>> {
    match value {
        Value::Array(names) => Some(
            names
                .into_iter()
                .filter_map(|name| match name {
                    Value::String(name) => Some(name),
                    other => {
                        tracing::warn!(entry = %other, "ignoring non-string ui:order entry");
                        None
                    }
                })
                .collect(),
        ),
        other => {
            tracing::warn!(value = %other, "ui:order is not a list, ignoring it");
            None
        }
    }
}

fn parse_actions(value: Value) -> Vec<RowActionSpec> {
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            tracing::warn!(value = %other, "ui:actions is not a list, ignoring it");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(action) => Some(action),
            Err(err) => {
                tracing::warn!(entry = %entry, %err, "ignoring malformed ui:actions entry");
                None
            }
        })
        .collect()
}

impl From<Map<String, Value>> for TableSchema {
    fn from(raw: Map<String, Value>) -> Self {
        let mut table = TableSchema::default();
        for (key, value) in raw {
            match key.as_str() {
                "ui:order" => table.order = parse_order(value),
                "ui:actions" => table.actions = parse_actions(value),
                _ => match value {
                    Value::Object(map) => {
                        let display = FieldDisplay::from_map(&key, &map);
                        table.fields.insert(key, display);
                    }
                    other => {
                        tracing::debug!(key = %key, value = %other, "skipping non-field table schema key");
                    }
                },
            }
        }
        table
    }
}

impl<'de> Deserialize<'de> for TableSchema {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(TableSchema::from)
    }
}

impl TableSchema {
    /// Descriptor for a field; fields absent from the table schema get the
    /// default (visible, no hint)
    pub fn field(&self, name: &str) -> Option<&FieldDisplay> {
        self.fields.get(name)
    }
}

#[cfg(test)]
impl FieldDisplay {
    pub fn widget(hint: WidgetHint) -> Self {
        Self { widget: Some(hint) }
    }
}

#[cfg(test)]
impl RowActionSpec {
    pub fn new(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }
}

#[cfg(test)]
impl TableSchema {
    pub fn with_field(mut self, name: &str, display: FieldDisplay) -> Self {
        self.fields.insert(name.to_string(), display);
        self
    }

    pub fn with_order(mut self, order: &[&str]) -> Self {
        self.order = Some(order.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn with_action(mut self, action: RowActionSpec) -> Self {
        self.actions.push(action);
        self
    }
}
