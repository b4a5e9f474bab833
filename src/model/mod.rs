//! Model layer - schema types and view state
//!
//! - `Schema` / `TableSchema` - what the resource looks like and how to show it
//! - `Item` - one record
//! - `DialogState` - which dialog is open
//! - `classify` / `resolve_fields` - pure helpers shared by header and rows

pub mod dialog;
pub mod fields;
pub mod item;
pub mod schema;
pub mod table_schema;
pub mod widget;

pub use dialog::{DialogEffect, DialogEvent, DialogKind, DialogState};
pub use fields::resolve_fields;
pub use item::{display_value, Item};
pub use schema::{FieldEntry, FieldSchema, Schema};
pub use table_schema::{FieldDisplay, TableSchema, WidgetHint};
pub use widget::{classify, Category};
