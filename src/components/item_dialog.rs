//! Item dialog - the modal shown for new/edit/destroy
//!
//! Owns the dialog state machine and, while a New/Edit dialog is open, the
//! form that edits the item. Rendering is a function of the current state.

use crate::components::form::ItemForm;
use crate::components::centered_popup;
use crate::model::{DialogEffect, DialogEvent, DialogState, Schema};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use serde_json::Value;

#[derive(Debug, Default)]
pub struct ItemDialog {
    state: DialogState,
    form: Option<ItemForm>,
}

impl ItemDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DialogState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !self.state.is_hidden()
    }

    pub fn form_mut(&mut self) -> Option<&mut ItemForm> {
        self.form.as_mut()
    }

    /// Run one transition. A fresh form is built whenever a New/Edit dialog
    /// opens; it is dropped when the dialog closes.
    pub fn apply(
        &mut self,
        event: DialogEvent,
        schema: &Schema,
        form_schema: &Value,
    ) -> Option<DialogEffect> {
        let previous = self.state.kind();
        let (next, effect) = std::mem::take(&mut self.state).transition(event);
        self.state = next;

        if self.state.kind() != previous {
            tracing::debug!(from = ?previous, to = ?self.state.kind(), "dialog transition");
            self.form = match &self.state {
                DialogState::New => Some(ItemForm::new(schema, form_schema, &self.state.item(), "Create")),
                DialogState::Edit(item) => Some(ItemForm::new(schema, form_schema, item, "Update")),
                DialogState::Hidden | DialogState::Destroy(_) => None,
            };
        }

        effect
    }

    /// Event produced by the dialog's primary button
    pub fn primary_event(&self) -> Option<DialogEvent> {
        match &self.state {
            DialogState::Hidden => None,
            DialogState::New | DialogState::Edit(_) => {
                self.form.as_ref().map(|form| DialogEvent::Submit(form.submit()))
            }
            DialogState::Destroy(_) => Some(DialogEvent::Confirm),
        }
    }

    /// Title and body of the open dialog; `None` when hidden
    pub fn content(&self, resource: &str) -> Option<(String, Vec<Line<'static>>)> {
        match &self.state {
            DialogState::Hidden => None,
            DialogState::New => Some((
                format!(" New {} ", resource),
                self.form.as_ref().map(ItemForm::lines).unwrap_or_default(),
            )),
            DialogState::Edit(_) => Some((
                format!(" Edit {} ", resource),
                self.form.as_ref().map(ItemForm::lines).unwrap_or_default(),
            )),
            DialogState::Destroy(_) => Some((
                format!(" Destroy {}? ", resource),
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Are you sure you want to destroy this {}?", resource),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(
                            " y ",
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("Yes  "),
                        Span::styled(
                            " n/Esc ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("No"),
                    ]),
                ],
            )),
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, resource: &str) {
        let Some((title, content)) = self.content(resource) else {
            return;
        };

        let destroy = matches!(self.state, DialogState::Destroy(_));
        let accent = if destroy { Color::Red } else { Color::Green };
        let width = if destroy { 50 } else { 64 };
        let height = content.len() as u16 + 2;

        let popup_area = centered_popup(area, width, height);
        frame.render_widget(Clear, popup_area);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(accent))
                    .title(title)
                    .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD)),
            )
            .alignment(if destroy {
                Alignment::Center
            } else {
                Alignment::Left
            });

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DialogKind, FieldEntry, FieldSchema, Item};

    fn schema() -> Schema {
        Schema::new("User", vec![FieldEntry::new("name", FieldSchema::new("string"))])
    }

    #[test]
    fn test_hidden_renders_nothing() {
        let dialog = ItemDialog::new();
        assert!(dialog.content("User").is_none());
        assert!(dialog.primary_event().is_none());
    }

    #[test]
    fn test_new_dialog_builds_empty_form() {
        let mut dialog = ItemDialog::new();
        dialog.apply(DialogEvent::OpenNew, &schema(), &Value::Null);

        let form = dialog.form.as_ref().unwrap();
        assert_eq!(form.submit_label, "Create");
        assert!(form.fields[0].input.is_empty());

        let (title, _) = dialog.content("User").unwrap();
        assert_eq!(title, " New User ");
    }

    #[test]
    fn test_edit_submit_roundtrip() {
        let mut dialog = ItemDialog::new();
        let item = Item::new().with("id", 1).with("name", "Ada");
        dialog.apply(DialogEvent::OpenEdit(item.clone()), &schema(), &Value::Null);
        assert_eq!(dialog.form.as_ref().unwrap().submit_label, "Update");

        dialog.form_mut().unwrap().input('!');
        let event = dialog.primary_event().unwrap();
        let effect = dialog.apply(event, &schema(), &Value::Null);

        assert_eq!(
            effect,
            Some(DialogEffect::Update(item.with("name", "Ada!")))
        );
        assert_eq!(dialog.state().kind(), DialogKind::Hidden);
        assert!(dialog.form.as_ref().is_none());
    }

    #[test]
    fn test_destroy_content_names_resource() {
        let mut dialog = ItemDialog::new();
        dialog.apply(
            DialogEvent::OpenDestroy(Item::new().with("id", 1)),
            &schema(),
            &Value::Null,
        );
        let (title, body) = dialog.content("User").unwrap();
        assert_eq!(title, " Destroy User? ");
        assert!(body
            .iter()
            .any(|line| line.to_string().contains("destroy this User")));
        assert_eq!(dialog.primary_event(), Some(DialogEvent::Confirm));
    }

    #[test]
    fn test_close_drops_form() {
        let mut dialog = ItemDialog::new();
        dialog.apply(DialogEvent::OpenNew, &schema(), &Value::Null);
        dialog.form_mut().unwrap().input('x');
        dialog.apply(DialogEvent::Close, &schema(), &Value::Null);
        assert!(!dialog.is_open());
        assert!(dialog.form.as_ref().is_none());

        // Reopening starts from scratch
        dialog.apply(DialogEvent::OpenNew, &schema(), &Value::Null);
        assert!(dialog.form.as_ref().unwrap().fields[0].input.is_empty());
    }
}
