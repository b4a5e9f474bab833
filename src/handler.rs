//! Table callbacks
//!
//! The table never persists anything itself. Whatever owns the data
//! implements `TableHandler`; every method defaults to a no-op, so a host
//! only overrides the calls it cares about.

use crate::action::Action;
use crate::model::Item;

pub trait TableHandler {
    /// A new item was submitted from the "new" dialog
    fn on_create(&mut self, item: Item) {
        let _ = item;
    }

    /// An edited item was submitted from the "edit" dialog
    fn on_update(&mut self, item: Item) {
        let _ = item;
    }

    /// Destruction of an item was confirmed
    fn on_destroy(&mut self, item: Item) {
        let _ = item;
    }

    /// A `ui:actions` button was activated on a row
    fn on_action(&mut self, name: &str, item: Item) {
        let _ = (name, item);
    }

    /// A page was selected in the pagination control
    fn on_page_change(&mut self, selected_page: usize, per_page: usize) {
        let _ = (selected_page, per_page);
    }
}

/// Forward a table event Action to its handler method.
///
/// Returns `false` for Actions that are not table events.
pub fn dispatch(handler: &mut dyn TableHandler, action: Action) -> bool {
    match action {
        Action::CreateItem(item) => handler.on_create(item),
        Action::UpdateItem(item) => handler.on_update(item),
        Action::DestroyItem(item) => handler.on_destroy(item),
        Action::RowAction(name, item) => handler.on_action(&name, item),
        Action::PageChange(page, per_page) => handler.on_page_change(page, per_page),
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl TableHandler for Recorder {
        fn on_create(&mut self, item: Item) {
            self.calls.push(format!("create {}", item.value("name")));
        }

        fn on_page_change(&mut self, selected_page: usize, per_page: usize) {
            self.calls.push(format!("page {} {}", selected_page, per_page));
        }
    }

    #[test]
    fn test_dispatch_routes_table_events() {
        let mut recorder = Recorder::default();
        let item = Item::new().with("name", "Ada");

        assert!(dispatch(&mut recorder, Action::CreateItem(item.clone())));
        assert!(dispatch(&mut recorder, Action::PageChange(2, 10)));
        // Not overridden: default no-op, still a table event
        assert!(dispatch(&mut recorder, Action::DestroyItem(item)));
        assert!(!dispatch(&mut recorder, Action::NextRow));

        assert_eq!(recorder.calls, vec!["create \"Ada\"", "page 2 10"]);
    }
}
