//! Item - one record of the resource

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record: field name -> value, with `id` as the row identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    values: Map<String, Value>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row identity; `Value::Null` when the item has no id yet
    pub fn id(&self) -> &Value {
        self.values.get("id").unwrap_or(&Value::Null)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Value of a field, `Null` when absent
    pub fn value(&self, name: &str) -> &Value {
        self.get(name).unwrap_or(&Value::Null)
    }

    pub fn set(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }
}

#[cfg(test)]
impl Item {
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value.into());
        self
    }
}

/// Text shown for a raw value: strings unquoted, everything else as JSON
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
