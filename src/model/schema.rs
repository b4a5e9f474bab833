//! Resource schema - the JSON-Schema-like description of a resource's fields

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema of a single field (`properties.<name>`)
///
/// Every attribute is optional so that malformed or partial entries still
/// deserialize; unknown combinations simply render as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl FieldSchema {
    pub fn is_type(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }

    pub fn is_format(&self, format: &str) -> bool {
        self.format.as_deref() == Some(format)
    }
}

/// A (name, field-schema) pair drawn from the schema's `properties`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub schema: FieldSchema,
}

impl FieldEntry {
    pub fn new(name: &str, schema: FieldSchema) -> Self {
        Self {
            name: name.to_string(),
            schema,
        }
    }
}

#[derive(Deserialize)]
struct RawSchema {
    #[serde(default)]
    title: String,
    #[serde(default)]
    properties: Map<String, Value>,
}

/// Resource schema
///
/// `properties` keeps declaration order; that order is the default column
/// order of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSchema")]
pub struct Schema {
    pub title: String,
    pub properties: Vec<FieldEntry>,
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        let properties = raw
            .properties
            .into_iter()
            .map(|(name, value)| {
                let schema = serde_json::from_value(value).unwrap_or_else(|err| {
                    tracing::warn!(field = %name, %err, "malformed field schema, treating as text");
                    FieldSchema::default()
                });
                FieldEntry { name, schema }
            })
            .collect();

        Self {
            title: raw.title,
            properties,
        }
    }
}

impl Serialize for Schema {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|entry| {
                let value = serde_json::to_value(&entry.schema).unwrap_or(Value::Null);
                (entry.name.clone(), value)
            })
            .collect();

        let mut state = serializer.serialize_struct("Schema", 2)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("properties", &properties)?;
        state.end()
    }
}

impl Schema {
    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&FieldSchema> {
        self.properties
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.schema)
    }
}

#[cfg(test)]
impl FieldSchema {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

#[cfg(test)]
impl Schema {
    pub fn new(title: &str, properties: Vec<FieldEntry>) -> Self {
        Self {
            title: title.to_string(),
            properties,
        }
    }
}
