//! Root application component
//!
//! Hosts the data table over a `MemoryStore`. Table events coming out of the
//! table are forwarded to the store, after which the table is refreshed with
//! the store's current page.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    calculate_main_layout, CustomCell, DataTableComponent, RendererRegistry, TableProps,
};
use crate::handler;
use crate::model::{display_value, DialogKind};
use crate::services::MemoryStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════════
// Built-in custom renderers
// ═══════════════════════════════════════════════════════════════════════════════

/// `{"custom": "badge"}` - value shown as a reversed label
fn badge(cell: &CustomCell<'_>) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {} ", display_value(cell.value)),
        Style::default().add_modifier(Modifier::REVERSED),
    ))
}

/// `{"custom": "check"}` - booleans as check marks
fn check(cell: &CustomCell<'_>) -> Line<'static> {
    match cell.value {
        Value::Bool(true) => Line::from(Span::styled("✓", Style::default().fg(Color::Green))),
        Value::Bool(false) => Line::from(Span::styled("✗", Style::default().fg(Color::Red))),
        other => {
            tracing::debug!(
                field = cell.name,
                id = %cell.item.id(),
                widget = ?cell.schema.and_then(|s| s.widget.as_ref()),
                "check renderer given a non-boolean value"
            );
            Line::from(display_value(other))
        }
    }
}

/// Renderers available to every resource file
pub fn builtin_renderers() -> RendererRegistry {
    RendererRegistry::new()
        .with("badge", badge)
        .with("check", check)
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    pub table: DataTableComponent,
    pub store: MemoryStore,
    pub should_quit: bool,
    /// Error message to display
    pub error: Option<String>,
}

impl App {
    pub fn new(store: MemoryStore, renderers: RendererRegistry) -> App {
        let resource = store.resource();
        let props = TableProps {
            schema: resource.schema.clone(),
            table_schema: resource.table_schema.clone(),
            form_schema: resource.form_schema.clone(),
            items: store.page_items(),
            page: store.page(),
            per_page: store.per_page(),
            page_count: store.page_count(),
            can_create: resource.can_create,
            can_edit: resource.can_edit,
            can_destroy: resource.can_destroy,
        };

        App {
            table: DataTableComponent::new(props, renderers),
            store,
            should_quit: false,
            error: None,
        }
    }

    /// Push the store's current page into the table
    fn refresh_table(&mut self) {
        self.table.set_data(
            self.store.page_items(),
            self.store.page(),
            self.store.page_count(),
        );
    }

    fn help_line(&self) -> Line<'static> {
        let key = |k: &str| {
            Span::styled(
                format!(" {} ", k),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        };

        match self.table.dialog_state().kind() {
            DialogKind::Hidden => {}
            DialogKind::Destroy => {
                return Line::from(vec![
                    key("y"),
                    Span::raw("Destroy  "),
                    key("n/Esc"),
                    Span::raw("Keep"),
                ]);
            }
            DialogKind::New | DialogKind::Edit => {
                return Line::from(vec![
                    key("Enter"),
                    Span::raw("Submit  "),
                    key("Tab"),
                    Span::raw("Next field  "),
                    key("Esc"),
                    Span::raw("Cancel"),
                ]);
            }
        }

        let props = self.table.props();
        let mut spans = vec![key("j/k"), Span::raw("Row  "), key("h/l"), Span::raw("Page  ")];
        if props.can_create {
            spans.extend([key("n"), Span::raw("New  ")]);
        }
        if props.can_edit {
            spans.extend([key("e"), Span::raw("Edit  ")]);
        }
        if props.can_destroy {
            spans.extend([key("d"), Span::raw("Destroy  ")]);
        }
        if !props.table_schema.actions.is_empty() {
            spans.extend([key("1-9"), Span::raw("Actions  ")]);
        }
        spans.extend([key("w"), Span::raw("Save  "), key("q"), Span::raw("Quit")]);
        Line::from(spans)
    }

    fn status_line(&self) -> Option<Line<'static>> {
        if let Some(error) = &self.error {
            return Some(Line::from(Span::styled(
                format!(" {}", error),
                Style::default().fg(Color::Red),
            )));
        }
        let mut spans = Vec::new();
        if self.store.is_dirty() {
            spans.push(Span::styled(" [modified]", Style::default().fg(Color::Magenta)));
        }
        if let Some(status) = &self.store.status {
            spans.push(Span::styled(
                format!(" {}", status),
                Style::default().fg(Color::Yellow),
            ));
        }
        (!spans.is_empty()).then(|| Line::from(spans))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(Some(Action::Quit));
        }

        if !self.table.dialog_open() {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('w') => return Ok(Some(Action::Save)),
                _ => {}
            }
        }

        self.table.handle_key_event(key)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick | Action::Resize(_, _) => Ok(None),
            Action::Quit => {
                if self.store.is_dirty() {
                    tracing::warn!("quitting with unsaved changes");
                }
                self.should_quit = true;
                Ok(None)
            }
            Action::Save => {
                self.error = match self.store.save() {
                    Ok(()) => None,
                    Err(e) => {
                        tracing::error!(error = %e, "save failed");
                        Some(e.to_string())
                    }
                };
                Ok(None)
            }
            action @ (Action::CreateItem(_)
            | Action::UpdateItem(_)
            | Action::DestroyItem(_)
            | Action::RowAction(_, _)
            | Action::PageChange(_, _)) => {
                tracing::debug!(%action, "table event");
                self.error = None;
                handler::dispatch(&mut self.store, action);
                self.refresh_table();
                Ok(None)
            }
            other => self.table.update(other),
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let status = self.status_line();
        let layout = calculate_main_layout(area, status.is_some());

        self.table.draw(frame, layout.table)?;

        if let (Some(line), Some(status_area)) = (status, layout.status) {
            frame.render_widget(Paragraph::new(line), status_area);
        }

        let help = Paragraph::new(self.help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(help, layout.help);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldEntry, FieldSchema, Item, Schema};
    use crate::services::resource::ResourceFile;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn sample_app(can_create: bool) -> App {
        let resource = ResourceFile {
            schema: Schema::new(
                "User",
                vec![
                    FieldEntry::new("name", FieldSchema::new("string")),
                    FieldEntry::new("active", FieldSchema::new("boolean")),
                ],
            ),
            table_schema: serde_json::from_value(json!({
                "active": {"ui:widget": {"custom": "check"}},
                "ui:actions": [{"name": "promote", "icon": "+"}]
            }))
            .unwrap(),
            form_schema: Value::Null,
            items: vec![
                Item::new().with("id", 1).with("name", "Ada").with("active", true),
                Item::new().with("id", 2).with("name", "Grace").with("active", false),
                Item::new().with("id", 3).with("name", "Linus").with("active", true),
            ],
            per_page: Some(2),
            can_create,
            can_edit: true,
            can_destroy: true,
        };
        App::new(MemoryStore::new(resource, 10), builtin_renderers())
    }

    /// Feed one key through the app, following up actions like the main loop
    fn press(app: &mut App, code: KeyCode) {
        let mut current = app
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
        while let Some(action) = current {
            current = app.update(action).unwrap();
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn screen(app: &mut App) -> String {
        let (width, height) = (100, 16);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                app.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_create_through_keys() {
        let mut app = sample_app(true);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.table.dialog_state().kind(), DialogKind::New);

        // 'q' is text while the form is open
        type_text(&mut app, "Quinn");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "true");
        press(&mut app, KeyCode::Enter);

        assert!(!app.should_quit);
        assert_eq!(app.store.len(), 4);
        let created = &app.store.resource().items[3];
        assert_eq!(created.id(), &json!(4));
        assert_eq!(created.value("name"), &json!("Quinn"));
        assert_eq!(created.value("active"), &json!(true));

        // Store moved to the last page and the table followed
        assert_eq!(app.table.props().page, 1);
        assert_eq!(app.table.props().items.len(), 2);
    }

    #[test]
    fn test_destroy_through_keys() {
        let mut app = sample_app(true);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        let names: Vec<&Value> = app
            .store
            .resource()
            .items
            .iter()
            .map(|i| i.value("name"))
            .collect();
        assert_eq!(names, vec![&json!("Ada"), &json!("Linus")]);
        assert_eq!(app.store.status.as_deref(), Some("Destroyed User 2"));
    }

    #[test]
    fn test_cancel_destroy_keeps_item() {
        let mut app = sample_app(true);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store.len(), 3);
        assert!(!app.table.dialog_open());
    }

    #[test]
    fn test_paging_and_row_action() {
        let mut app = sample_app(true);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.store.page(), 1);
        assert_eq!(app.table.props().items[0].value("name"), &json!("Linus"));

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.store.status.as_deref(), Some("promote on User 3"));
    }

    #[test]
    fn test_quit_only_without_dialog() {
        let mut app = sample_app(true);
        press(&mut app, KeyCode::Char('e'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_screen_shows_custom_renderer_and_gates_new() {
        let mut app = sample_app(true);
        let text = screen(&mut app);
        assert!(text.contains("✓"));
        assert!(text.contains("New User"));

        let mut locked = sample_app(false);
        let text = screen(&mut locked);
        assert!(!text.contains("New User"));
        assert!(!text.contains(" n New"));
    }

    #[test]
    fn test_help_follows_dialog_kind() {
        let mut app = sample_app(true);
        assert!(screen(&mut app).contains("Quit"));

        press(&mut app, KeyCode::Char('d'));
        let text = screen(&mut app);
        assert!(text.contains("Keep"));
        assert!(!text.contains("Quit"));

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('e'));
        assert!(screen(&mut app).contains("Next field"));
    }

    #[test]
    fn test_save_without_source_reports_status() {
        let mut app = sample_app(true);
        press(&mut app, KeyCode::Char('w'));
        assert!(app.error.is_none());
        assert!(app.store.status.as_deref().unwrap().starts_with("Nothing to save"));
    }
}
