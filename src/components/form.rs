//! Item form
//!
//! Edits a single item against the resource schema. The form schema
//! (`formSchema`) is passed through untouched by the table; the form reads
//! `ui:order`, `ui:widget: "hidden"` and `ui:readonly` from it.
//! No validation happens here.

use crate::model::{display_value, FieldSchema, Item, Schema};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde_json::Value;

/// One editable field
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub name: String,
    pub schema: FieldSchema,
    pub input: String,
    pub readonly: bool,
    /// Value on the item when the form opened
    original: Option<Value>,
}

/// Text a value is edited as
fn input_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value) => display_value(value),
    }
}

impl FormField {
    /// Whether the input still shows what the field was opened with
    fn is_untouched(&self) -> bool {
        self.input == input_text(self.original.as_ref())
    }

    /// Convert the text input back to a value of the field's type.
    ///
    /// Unparsable input stays a string.
    fn value(&self) -> Value {
        let text = self.input.trim();
        let kind = self.schema.kind.as_deref().unwrap_or("string");
        match kind {
            "integer" => text
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(self.input.clone())),
            "number" => text
                .parse::<i64>()
                .map(Value::from)
                .ok()
                .or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(Value::Number)
                })
                .unwrap_or_else(|| Value::String(self.input.clone())),
            "boolean" => match text {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(self.input.clone()),
            },
            _ => Value::String(self.input.clone()),
        }
    }
}

/// Form state for one dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ItemForm {
    /// Item the form started from; keys without a form field pass through
    base: Item,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub submit_label: String,
}

fn form_option<'a>(form_schema: &'a Value, field: &str, key: &str) -> Option<&'a Value> {
    form_schema.get(field).and_then(|f| f.get(key))
}

impl ItemForm {
    pub fn new(schema: &Schema, form_schema: &Value, item: &Item, submit_label: &str) -> Self {
        let order: Vec<&str> = form_schema
            .get("ui:order")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut names: Vec<&str> = order
            .iter()
            .copied()
            .filter(|name| schema.property(name).is_some())
            .collect();
        for entry in &schema.properties {
            if !names.contains(&entry.name.as_str()) {
                names.push(&entry.name);
            }
        }

        let fields = names
            .into_iter()
            .filter(|name| {
                form_option(form_schema, name, "ui:widget").and_then(Value::as_str)
                    != Some("hidden")
            })
            .map(|name| FormField {
                name: name.to_string(),
                schema: schema.property(name).cloned().unwrap_or_default(),
                input: input_text(item.get(name)),
                readonly: form_option(form_schema, name, "ui:readonly")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                original: item.get(name).cloned(),
            })
            .collect();

        Self {
            base: item.clone(),
            fields,
            focus: 0,
            submit_label: submit_label.to_string(),
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus).filter(|f| !f.readonly)
    }

    pub fn input(&mut self, c: char) {
        if let Some(field) = self.focused_mut() {
            field.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.input.pop();
        }
    }

    /// Build the submitted item.
    ///
    /// Only fields whose text was changed are written back. Editable fields
    /// cleared to empty are omitted; everything else on the original item is
    /// carried over as it was.
    pub fn submit(&self) -> Item {
        let mut item = self.base.clone();
        for field in self.fields.iter().filter(|f| !f.readonly && !f.is_untouched()) {
            if field.input.is_empty() {
                item.remove(&field.name);
            } else {
                item.set(&field.name, field.value());
            }
        }
        item
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let label_width = self
            .fields
            .iter()
            .map(|f| unicode_width::UnicodeWidthStr::width(f.name.as_str()))
            .max()
            .unwrap_or(0);

        let mut lines: Vec<Line<'static>> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let focused = i == self.focus;
                let label_style = if focused {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let value_style = if field.readonly {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                let cursor = if focused && !field.readonly { "_" } else { "" };
                Line::from(vec![
                    Span::styled(if focused { "> " } else { "  " }, label_style),
                    Span::styled(
                        format!("{:width$} ", field.name, width = label_width),
                        label_style,
                    ),
                    Span::styled(format!("{}{}", field.input, cursor), value_style),
                ])
            })
            .collect();

        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "No editable fields",
                Style::default().fg(Color::DarkGray),
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("{}  ", self.submit_label)),
            Span::styled(
                " Tab ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Next field  "),
            Span::styled(
                " Esc ",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("Cancel"),
        ]));
        lines
    }
}
