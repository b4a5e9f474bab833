//! Schema-driven data table
//!
//! Renders one page of items as a table whose columns come from the resource
//! schema, with a pagination header, per-row action buttons and the
//! new/edit/destroy dialogs. Persistence is left to whoever handles the
//! table event Actions this component emits.

use crate::action::Action;
use crate::component::Component;
use crate::components::cells::{build_cell, CellView};
use crate::components::item_dialog::ItemDialog;
use crate::components::paginate::Paginator;
use crate::components::renderer::RendererRegistry;
use crate::model::{
    resolve_fields, DialogEffect, DialogEvent, DialogState, FieldEntry, Item, Schema, TableSchema,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use serde_json::Value;
use unicode_width::UnicodeWidthStr;

/// Widest a column is allowed to grow
const MAX_COLUMN_WIDTH: usize = 40;

/// Inputs of the table; all borrowed for rendering, none persisted
#[derive(Debug, Clone)]
pub struct TableProps {
    pub schema: Schema,
    pub table_schema: TableSchema,
    /// Passed through to the form
    pub form_schema: Value,
    pub items: Vec<Item>,
    pub page: usize,
    pub per_page: usize,
    pub page_count: usize,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_destroy: bool,
}

impl Default for TableProps {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            table_schema: TableSchema::default(),
            form_schema: Value::Null,
            items: Vec::new(),
            page: 0,
            per_page: 10,
            page_count: 0,
            can_create: true,
            can_edit: true,
            can_destroy: true,
        }
    }
}

pub struct DataTableComponent {
    props: TableProps,
    renderers: RendererRegistry,
    dialog: ItemDialog,
    table_state: TableState,
}

impl DataTableComponent {
    pub fn new(props: TableProps, renderers: RendererRegistry) -> Self {
        let mut table_state = TableState::default();
        if !props.items.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            props,
            renderers,
            dialog: ItemDialog::new(),
            table_state,
        }
    }

    pub fn props(&self) -> &TableProps {
        &self.props
    }

    pub fn dialog_state(&self) -> &DialogState {
        self.dialog.state()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog.is_open()
    }

    /// Replace the page of items, keeping the cursor on the same row id
    /// when it is still present
    pub fn set_data(&mut self, items: Vec<Item>, page: usize, page_count: usize) {
        let selected_id = self.selected_item().map(|item| item.id().clone());

        self.props.items = items;
        self.props.page = page;
        self.props.page_count = page_count;

        let index = selected_id
            .and_then(|id| self.props.items.iter().position(|item| item.id() == &id))
            .or_else(|| self.table_state.selected())
            .map(|i| i.min(self.props.items.len().saturating_sub(1)));
        self.table_state
            .select(if self.props.items.is_empty() { None } else { index.or(Some(0)) });
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.table_state
            .selected()
            .and_then(|i| self.props.items.get(i))
    }

    fn paginator(&self) -> Paginator {
        Paginator::new(self.props.page, self.props.page_count, self.props.per_page)
    }

    /// Ordered visible fields; shared by header and rows
    pub fn fields(&self) -> Vec<FieldEntry> {
        resolve_fields(&self.props.schema, &self.props.table_schema)
    }

    /// First header row: pagination plus the "new item" trigger
    pub fn toolbar_line(&self) -> Line<'static> {
        let mut line = self.paginator().to_line();
        if self.props.can_create {
            line.spans.push(Span::raw("   "));
            line.spans.push(Span::styled(
                format!("[n] New {}", self.props.schema.title),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        line
    }

    /// Second header row: one label per visible field, then "actions"
    pub fn column_labels(&self) -> Vec<String> {
        self.fields()
            .into_iter()
            .map(|entry| entry.name)
            .chain(std::iter::once("actions".to_string()))
            .collect()
    }

    pub fn row_cells(&self, fields: &[FieldEntry], item: &Item) -> Vec<CellView> {
        fields
            .iter()
            .map(|entry| build_cell(entry, item, &self.props.table_schema, &self.renderers))
            .collect()
    }

    /// Buttons of the trailing actions cell, in display order
    pub fn action_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .props
            .table_schema
            .actions
            .iter()
            .enumerate()
            .map(|(i, action)| {
                if action.icon.is_empty() {
                    format!("[{}] {}", i + 1, action.name)
                } else {
                    format!("[{}] {} {}", i + 1, action.icon, action.name)
                }
            })
            .collect();
        if self.props.can_edit {
            labels.push("[e] Edit".to_string());
        }
        if self.props.can_destroy {
            labels.push("[d] Destroy".to_string());
        }
        labels
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.props.items.len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if delta.is_negative() {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta as usize).min(len - 1)
        };
        self.table_state.select(Some(next));
    }

    fn open(&mut self, event: DialogEvent) {
        if self.dialog.is_open() {
            return;
        }
        self.dialog
            .apply(event, &self.props.schema, &self.props.form_schema);
    }

    fn handle_dialog_key(&self, key: KeyEvent) -> Option<Action> {
        match self.dialog.state() {
            DialogState::Destroy(_) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    Some(Action::ConfirmDialog)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    Some(Action::CloseDialog)
                }
                _ => None,
            },
            _ => match key.code {
                KeyCode::Esc => Some(Action::CloseDialog),
                KeyCode::Enter => Some(Action::ConfirmDialog),
                KeyCode::Tab | KeyCode::Down => Some(Action::FormNextField),
                KeyCode::BackTab | KeyCode::Up => Some(Action::FormPrevField),
                KeyCode::Backspace => Some(Action::FormBackspace),
                KeyCode::Char(c) => Some(Action::FormInput(c)),
                _ => None,
            },
        }
    }

    fn column_widths(&self, labels: &[String], rows: &[Vec<String>]) -> Vec<Constraint> {
        let mut widths: Vec<usize> = labels.iter().map(|l| l.width()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.width());
                }
            }
        }
        widths
            .into_iter()
            .map(|w| Constraint::Length(w.min(MAX_COLUMN_WIDTH) as u16))
            .collect()
    }
}

impl Component for DataTableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.dialog.is_open() {
            return Ok(self.handle_dialog_key(key));
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => Some(Action::NextPage),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => Some(Action::PrevPage),
            KeyCode::Char('n') if self.props.can_create => Some(Action::OpenNew),
            KeyCode::Char('e') | KeyCode::Enter if self.props.can_edit => Some(Action::OpenEdit),
            KeyCode::Char('d') | KeyCode::Delete if self.props.can_destroy => {
                Some(Action::OpenDestroy)
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                (index < self.props.table_schema.actions.len())
                    .then_some(Action::TriggerRowAction(index))
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let follow_up = match action {
            Action::NextRow => {
                self.move_cursor(1);
                None
            }
            Action::PrevRow => {
                self.move_cursor(-1);
                None
            }
            Action::NextPage => {
                let pager = self.paginator();
                pager.next().map(|page| Action::PageChange(page, pager.per_page))
            }
            Action::PrevPage => {
                let pager = self.paginator();
                pager.prev().map(|page| Action::PageChange(page, pager.per_page))
            }

            Action::OpenNew if self.props.can_create => {
                self.open(DialogEvent::OpenNew);
                None
            }
            Action::OpenEdit if self.props.can_edit => {
                if let Some(item) = self.selected_item().cloned() {
                    self.open(DialogEvent::OpenEdit(item));
                }
                None
            }
            Action::OpenDestroy if self.props.can_destroy => {
                if let Some(item) = self.selected_item().cloned() {
                    self.open(DialogEvent::OpenDestroy(item));
                }
                None
            }
            Action::TriggerRowAction(index) => {
                let name = self
                    .props
                    .table_schema
                    .actions
                    .get(index)
                    .map(|a| a.name.clone());
                match (name, self.selected_item()) {
                    (Some(name), Some(item)) => Some(Action::RowAction(name, item.clone())),
                    _ => None,
                }
            }

            Action::CloseDialog => {
                self.dialog
                    .apply(DialogEvent::Close, &self.props.schema, &self.props.form_schema);
                None
            }
            Action::ConfirmDialog => {
                let effect = match self.dialog.primary_event() {
                    Some(event) => {
                        self.dialog
                            .apply(event, &self.props.schema, &self.props.form_schema)
                    }
                    None => None,
                };
                effect.map(|effect| match effect {
                    DialogEffect::Create(item) => Action::CreateItem(item),
                    DialogEffect::Update(item) => Action::UpdateItem(item),
                    DialogEffect::Destroy(item) => Action::DestroyItem(item),
                })
            }
            Action::FormNextField => {
                if let Some(form) = self.dialog.form_mut() {
                    form.focus_next();
                }
                None
            }
            Action::FormPrevField => {
                if let Some(form) = self.dialog.form_mut() {
                    form.focus_prev();
                }
                None
            }
            Action::FormInput(c) => {
                if let Some(form) = self.dialog.form_mut() {
                    form.input(c);
                }
                None
            }
            Action::FormBackspace => {
                if let Some(form) = self.dialog.form_mut() {
                    form.backspace();
                }
                None
            }
            _ => None,
        };
        Ok(follow_up)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", self.props.schema.title))
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        frame.render_widget(Paragraph::new(self.toolbar_line()), chunks[0]);

        let fields = self.fields();
        let labels = self.column_labels();
        let actions = self.action_labels().join(" ");

        let views: Vec<Vec<CellView>> = self
            .props
            .items
            .iter()
            .map(|item| self.row_cells(&fields, item))
            .collect();
        let texts: Vec<Vec<String>> = views
            .iter()
            .map(|row| {
                row.iter()
                    .map(CellView::text)
                    .chain(std::iter::once(actions.clone()))
                    .collect()
            })
            .collect();

        let header = Row::new(labels.iter().map(|label| {
            Cell::from(label.clone()).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        }));

        let rows: Vec<Row> = views
            .into_iter()
            .map(|row| {
                let cells = row
                    .into_iter()
                    .map(|view| Cell::from(view.to_line()))
                    .chain(std::iter::once(Cell::from(Span::styled(
                        actions.clone(),
                        Style::default().fg(Color::Yellow),
                    ))));
                Row::new(cells)
            })
            .collect();

        let widths = self.column_widths(&labels, &texts);
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");

        if self.props.items.is_empty() {
            let empty_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(chunks[1]);
            frame.render_widget(table, empty_chunks[0]);
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("No {} items on this page", self.props.schema.title),
                    Style::default().fg(Color::DarkGray),
                )),
                empty_chunks[1],
            );
        } else {
            frame.render_stateful_widget(table, chunks[1], &mut self.table_state);
        }

        self.dialog.draw(frame, area, &self.props.schema.title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::renderer::CustomCell;
    use crate::model::table_schema::RowActionSpec;
    use crate::model::{FieldDisplay, FieldSchema, WidgetHint};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn user_schema() -> Schema {
        Schema::new(
            "User",
            vec![
                FieldEntry::new("name", FieldSchema::new("string")),
                FieldEntry::new("avatar", FieldSchema::new("string").with_format("data-url")),
                FieldEntry::new("secret", FieldSchema::new("string")),
            ],
        )
    }

    fn users() -> Vec<Item> {
        vec![
            Item::new()
                .with("id", 1)
                .with("name", "Ada")
                .with("avatar", "data:image/png;base64,AA")
                .with("secret", "s3cr3t-ada"),
            Item::new()
                .with("id", 2)
                .with("name", "Grace")
                .with("avatar", "data:image/png;base64,BB")
                .with("secret", "s3cr3t-grace"),
        ]
    }

    fn props() -> TableProps {
        TableProps {
            schema: user_schema(),
            table_schema: TableSchema::default()
                .with_field("avatar", FieldDisplay::widget(WidgetHint::Img))
                .with_field("secret", FieldDisplay::widget(WidgetHint::Hidden))
                .with_action(RowActionSpec::new("promote", "+")),
            items: users(),
            page: 0,
            per_page: 2,
            page_count: 3,
            ..TableProps::default()
        }
    }

    fn table() -> DataTableComponent {
        DataTableComponent::new(props(), RendererRegistry::new())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(table: &mut DataTableComponent, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                table.draw(frame, frame.area()).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_hidden_field_never_rendered() {
        let mut table = table();
        assert_eq!(table.column_labels(), vec!["name", "avatar", "actions"]);

        let screen = render(&mut table, 120, 12).join("\n");
        assert!(!screen.contains("secret"));
        assert!(!screen.contains("s3cr3t"));
        assert!(screen.contains("Grace"));
    }

    #[test]
    fn test_order_override_changes_columns() {
        let mut props = props();
        props.table_schema = props.table_schema.with_order(&["avatar", "name"]);
        let mut table = DataTableComponent::new(props, RendererRegistry::new());
        assert_eq!(table.column_labels(), vec!["avatar", "name", "actions"]);

        let screen = render(&mut table, 120, 12);
        let header = screen.iter().find(|line| line.contains("actions")).unwrap();
        assert!(header.find("avatar").unwrap() < header.find("name").unwrap());
    }

    #[test]
    fn test_cells_follow_field_categories() {
        let table = table();
        let fields = table.fields();
        let cells = table.row_cells(&fields, &users()[0]);
        assert_eq!(cells[0], CellView::Text("Ada".to_string()));
        assert!(matches!(cells[1], CellView::Image { height: 44, .. }));
    }

    #[test]
    fn test_new_trigger_gated_by_can_create() {
        let mut table = table();
        assert!(table.toolbar_line().to_string().contains("New User"));

        let mut props = props();
        props.can_create = false;
        let mut locked = DataTableComponent::new(props, RendererRegistry::new());
        assert!(!locked.toolbar_line().to_string().contains("New"));
        assert_eq!(locked.handle_key_event(key(KeyCode::Char('n'))).unwrap(), None);
        locked.update(Action::OpenNew).unwrap();
        assert!(!locked.dialog_open());

        let screen = render(&mut table, 120, 12).join("\n");
        assert!(screen.contains("[n] New User"));
    }

    #[test]
    fn test_action_labels_order() {
        let table = table();
        assert_eq!(
            table.action_labels(),
            vec!["[1] + promote", "[e] Edit", "[d] Destroy"]
        );

        let mut props = props();
        props.can_edit = false;
        props.can_destroy = false;
        let table = DataTableComponent::new(props, RendererRegistry::new());
        assert_eq!(table.action_labels(), vec!["[1] + promote"]);
    }

    #[test]
    fn test_create_flow_emits_once() {
        let mut table = table();
        table.update(Action::OpenNew).unwrap();
        assert_eq!(table.dialog_state(), &DialogState::New);

        for c in "Linus".chars() {
            table.update(Action::FormInput(c)).unwrap();
        }
        let emitted = table.update(Action::ConfirmDialog).unwrap();
        assert_eq!(
            emitted,
            Some(Action::CreateItem(Item::new().with("name", "Linus")))
        );
        assert!(!table.dialog_open());

        // Confirming again with nothing open emits nothing
        assert_eq!(table.update(Action::ConfirmDialog).unwrap(), None);
    }

    #[test]
    fn test_edit_flow_updates_selected_row() {
        let mut table = table();
        table.update(Action::NextRow).unwrap();
        table.update(Action::OpenEdit).unwrap();
        table.update(Action::FormInput('!')).unwrap();

        let emitted = table.update(Action::ConfirmDialog).unwrap();
        let expected = users()[1].clone().with("name", "Grace!");
        assert_eq!(emitted, Some(Action::UpdateItem(expected)));
    }

    #[test]
    fn test_destroy_uses_item_from_button_press() {
        let mut table = table();
        table.update(Action::OpenDestroy).unwrap();

        // Data refresh between press and confirm
        table.set_data(vec![users()[1].clone()], 0, 1);
        render(&mut table, 120, 12);

        let emitted = table.update(Action::ConfirmDialog).unwrap();
        assert_eq!(emitted, Some(Action::DestroyItem(users()[0].clone())));
        assert!(!table.dialog_open());
    }

    #[test]
    fn test_destroy_dialog_keys() {
        let mut table = table();
        table.update(Action::OpenDestroy).unwrap();
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('y'))).unwrap(),
            Some(Action::ConfirmDialog)
        );
        assert_eq!(
            table.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseDialog)
        );

        let screen = render(&mut table, 120, 16).join("\n");
        assert!(screen.contains("Destroy User?"));

        table.update(Action::CloseDialog).unwrap();
        table.update(Action::CloseDialog).unwrap();
        assert_eq!(table.dialog_state(), &DialogState::Hidden);
    }

    #[test]
    fn test_row_action_and_paging() {
        let mut table = table();
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('1'))).unwrap(),
            Some(Action::TriggerRowAction(0))
        );
        assert_eq!(table.handle_key_event(key(KeyCode::Char('2'))).unwrap(), None);
        assert_eq!(
            table.update(Action::TriggerRowAction(0)).unwrap(),
            Some(Action::RowAction("promote".to_string(), users()[0].clone()))
        );

        assert_eq!(
            table.update(Action::NextPage).unwrap(),
            Some(Action::PageChange(1, 2))
        );
        assert_eq!(table.update(Action::PrevPage).unwrap(), None);
    }

    #[test]
    fn test_set_data_keeps_cursor_on_same_id() {
        let mut table = table();
        table.update(Action::NextRow).unwrap();
        assert_eq!(table.selected_item().unwrap().id(), &json!(2));

        let mut reordered = users();
        reordered.reverse();
        table.set_data(reordered, 0, 3);
        assert_eq!(table.selected_item().unwrap().id(), &json!(2));

        table.set_data(Vec::new(), 0, 0);
        assert!(table.selected_item().is_none());
    }

    fn upper(cell: &CustomCell<'_>) -> Line<'static> {
        Line::from(format!("<{}>", cell.value.as_str().unwrap_or("").to_uppercase()))
    }

    #[test]
    fn test_custom_renderer_in_table() {
        let mut props = props();
        props.table_schema = props.table_schema.with_field(
            "name",
            FieldDisplay::widget(WidgetHint::Custom("upper".to_string())),
        );
        let mut table =
            DataTableComponent::new(props, RendererRegistry::new().with("upper", upper));
        let screen = render(&mut table, 120, 12).join("\n");
        assert!(screen.contains("<GRACE>"));
    }

    #[test]
    fn test_form_keys_while_dialog_open() {
        let mut table = table();
        table.update(Action::OpenNew).unwrap();
        assert_eq!(
            table.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::FormInput('q'))
        );
        assert_eq!(
            table.handle_key_event(key(KeyCode::Tab)).unwrap(),
            Some(Action::FormNextField)
        );
        assert_eq!(
            table.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseDialog)
        );
    }
}
