//! Action enum - All possible application actions
//!
//! Components emit Actions in response to key events, and the App processes
//! them to update state. Actions in the "Table events" group are the
//! component's outward calls; the App forwards them to a `TableHandler`.

use crate::model::Item;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick when no input arrived
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Leave the application
    Quit,
    /// Write the resource back to its source file
    Save,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Move the row cursor down
    NextRow,
    /// Move the row cursor up
    PrevRow,
    /// Go to the next page
    NextPage,
    /// Go to the previous page
    PrevPage,

    // ─────────────────────────────────────────────────────────────────────────
    // Row affordances
    // ─────────────────────────────────────────────────────────────────────────
    /// "New item" button
    OpenNew,
    /// Edit button on the current row
    OpenEdit,
    /// Destroy button on the current row
    OpenDestroy,
    /// n-th `ui:actions` button on the current row
    TriggerRowAction(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Dialog
    // ─────────────────────────────────────────────────────────────────────────
    /// Close or cancel the open dialog
    CloseDialog,
    /// Submit the form / confirm destruction
    ConfirmDialog,
    /// Focus the next form field
    FormNextField,
    /// Focus the previous form field
    FormPrevField,
    /// Type a character into the focused field
    FormInput(char),
    /// Delete the last character of the focused field
    FormBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Table events
    // ─────────────────────────────────────────────────────────────────────────
    /// `onCreate(item)`
    CreateItem(Item),
    /// `onUpdate(item)`
    UpdateItem(Item),
    /// `onDestroy(item)`
    DestroyItem(Item),
    /// `onAction(name, item)`
    RowAction(String, Item),
    /// `onPageChange(selectedPage, perPage)`
    PageChange(usize, usize),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::Quit => write!(f, "Quit"),
            Action::Save => write!(f, "Save"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::OpenNew => write!(f, "OpenNew"),
            Action::OpenEdit => write!(f, "OpenEdit"),
            Action::OpenDestroy => write!(f, "OpenDestroy"),
            Action::TriggerRowAction(i) => write!(f, "TriggerRowAction({})", i),
            Action::CloseDialog => write!(f, "CloseDialog"),
            Action::ConfirmDialog => write!(f, "ConfirmDialog"),
            Action::FormNextField => write!(f, "FormNextField"),
            Action::FormPrevField => write!(f, "FormPrevField"),
            Action::FormInput(c) => write!(f, "FormInput('{}')", c),
            Action::FormBackspace => write!(f, "FormBackspace"),
            Action::CreateItem(item) => write!(f, "CreateItem({})", item.id()),
            Action::UpdateItem(item) => write!(f, "UpdateItem({})", item.id()),
            Action::DestroyItem(item) => write!(f, "DestroyItem({})", item.id()),
            Action::RowAction(name, item) => write!(f, "RowAction({}, {})", name, item.id()),
            Action::PageChange(page, per_page) => write!(f, "PageChange({}, {})", page, per_page),
        }
    }
}
