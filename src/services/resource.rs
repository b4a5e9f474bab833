//! Resource file loading and saving
//!
//! A resource file bundles everything the table needs: the schema, the
//! table/form schemas, the items and the capability flags. JSON and YAML
//! are both accepted, picked by file extension.

use crate::model::{Item, Schema, TableSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Error types for resource file operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid JSON for a resource.
    #[error("Invalid JSON resource {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The file is not valid YAML for a resource.
    #[error("Invalid YAML resource {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// The extension is neither JSON nor YAML.
    #[error("Unsupported resource file: {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    Json,
    Yaml,
}

impl ResourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ResourceFormat::Json),
            Some("yaml") | Some("yml") => Ok(ResourceFormat::Yaml),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn default_true() -> bool {
    true
}

fn is_true(value: &bool) -> bool {
    *value
}

/// On-disk resource document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFile {
    pub schema: Schema,
    #[serde(default)]
    pub table_schema: TableSchema,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub form_schema: Value,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub can_create: bool,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub can_edit: bool,
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub can_destroy: bool,
}

impl ResourceFile {
    pub fn parse(contents: &str, format: ResourceFormat, path: &Path) -> Result<Self, StoreError> {
        match format {
            ResourceFormat::Json => {
                serde_json::from_str(contents).map_err(|source| StoreError::Json {
                    path: path.to_path_buf(),
                    source,
                })
            }
            ResourceFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(|source| StoreError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Load a resource file, returning it with the format it was read in
    pub fn load(path: &Path) -> Result<(Self, ResourceFormat), StoreError> {
        let format = ResourceFormat::from_path(path)?;
        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let resource = Self::parse(&contents, format, path)?;
        tracing::info!(
            path = %path.display(),
            items = resource.items.len(),
            fields = resource.schema.properties.len(),
            "loaded resource"
        );
        Ok((resource, format))
    }

    pub fn save(&self, path: &Path, format: ResourceFormat) -> Result<(), StoreError> {
        let contents = match format {
            ResourceFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|source| StoreError::Json {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            ResourceFormat::Yaml => serde_yaml::to_string(self).map_err(|source| StoreError::Yaml {
                path: path.to_path_buf(),
                source,
            })?,
        };
        fs::write(path, contents).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
