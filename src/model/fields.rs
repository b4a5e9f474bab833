//! Field ordering & visibility resolution
//!
//! The resolved sequence is shared by the header and every body row so the
//! columns always line up.

use super::schema::{FieldEntry, FieldSchema, Schema};
use super::table_schema::TableSchema;

/// Resolve the ordered, visible field entries of a table.
///
/// `ui:order` names come first (in listed order, duplicates kept), followed
/// by the remaining properties in declaration order. Fields whose descriptor
/// is `ui:widget: "hidden"` are dropped afterwards.
pub fn resolve_fields(schema: &Schema, table: &TableSchema) -> Vec<FieldEntry> {
    let ordered: Vec<FieldEntry> = match &table.order {
        Some(order) => {
            let mut entries: Vec<FieldEntry> = order
                .iter()
                .map(|name| {
                    let field = schema.property(name).cloned().unwrap_or_else(|| {
                        tracing::debug!(field = %name, "ui:order names a field missing from the schema");
                        FieldSchema::default()
                    });
                    FieldEntry::new(name, field)
                })
                .collect();
            entries.extend(
                schema
                    .properties
                    .iter()
                    .filter(|entry| !order.contains(&entry.name))
                    .cloned(),
            );
            entries
        }
        None => schema.properties.clone(),
    };

    ordered
        .into_iter()
        .filter(|entry| !table.field(&entry.name).is_some_and(|d| d.is_hidden()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table_schema::{FieldDisplay, WidgetHint};

    fn user_schema() -> Schema {
        Schema::new(
            "User",
            vec![
                FieldEntry::new("name", FieldSchema::new("string")),
                FieldEntry::new("avatar", FieldSchema::new("string").with_format("data-url")),
                FieldEntry::new("email", FieldSchema::new("string")),
            ],
        )
    }

    fn names(entries: &[FieldEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_natural_order_without_override() {
        let fields = resolve_fields(&user_schema(), &TableSchema::default());
        assert_eq!(names(&fields), vec!["name", "avatar", "email"]);
    }

    #[test]
    fn test_order_override_then_remaining() {
        let table = TableSchema::default().with_order(&["avatar", "name"]);
        let fields = resolve_fields(&user_schema(), &table);
        assert_eq!(names(&fields), vec!["avatar", "name", "email"]);
        assert!(fields[0].schema.is_format("data-url"));
    }

    #[test]
    fn test_hidden_fields_dropped_after_ordering() {
        let table = TableSchema::default()
            .with_order(&["email", "avatar"])
            .with_field("avatar", FieldDisplay::widget(WidgetHint::Hidden));
        let fields = resolve_fields(&user_schema(), &table);
        assert_eq!(names(&fields), vec!["email", "name"]);
    }

    #[test]
    fn test_fields_absent_from_table_schema_are_visible() {
        let table =
            TableSchema::default().with_field("name", FieldDisplay::widget(WidgetHint::Img));
        let fields = resolve_fields(&user_schema(), &table);
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_order_duplicates_are_kept() {
        let table = TableSchema::default().with_order(&["name", "name"]);
        let fields = resolve_fields(&user_schema(), &table);
        assert_eq!(names(&fields), vec!["name", "name", "avatar", "email"]);
    }

    #[test]
    fn test_unknown_order_name_gets_default_schema() {
        let table = TableSchema::default().with_order(&["ghost"]);
        let fields = resolve_fields(&user_schema(), &table);
        assert_eq!(fields[0], FieldEntry::new("ghost", FieldSchema::default()));
        assert_eq!(fields.len(), 4);
    }
}
