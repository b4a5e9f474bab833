//! Dialog state machine
//!
//! Replaces the `{dialogType, item}` pair with a tagged enum: the item lives
//! inside the variants that need one, so `Hidden` can never carry stale data.

use super::item::Item;

/// Which dialog is open and which item it operates on
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DialogState {
    #[default]
    Hidden,
    New,
    Edit(Item),
    Destroy(Item),
}

/// UI events that drive the dialog
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    OpenNew,
    OpenEdit(Item),
    OpenDestroy(Item),
    /// Form submitted with the given item
    Submit(Item),
    /// Destroy confirmed
    Confirm,
    /// Dialog closed or cancelled
    Close,
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEffect {
    Create(Item),
    Update(Item),
    Destroy(Item),
}

/// Dialog kind, without the item payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Hidden,
    New,
    Edit,
    Destroy,
}

impl DialogState {
    pub fn kind(&self) -> DialogKind {
        match self {
            DialogState::Hidden => DialogKind::Hidden,
            DialogState::New => DialogKind::New,
            DialogState::Edit(_) => DialogKind::Edit,
            DialogState::Destroy(_) => DialogKind::Destroy,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, DialogState::Hidden)
    }

    /// Item the dialog operates on; empty for `Hidden` and `New`
    pub fn item(&self) -> Item {
        match self {
            DialogState::Edit(item) | DialogState::Destroy(item) => item.clone(),
            DialogState::Hidden | DialogState::New => Item::new(),
        }
    }

    /// Compute the next state and any effect for an event.
    ///
    /// Open events only apply from `Hidden`; events that do not match the
    /// current state leave it unchanged.
    pub fn transition(self, event: DialogEvent) -> (DialogState, Option<DialogEffect>) {
        match (self, event) {
            (_, DialogEvent::Close) => (DialogState::Hidden, None),

            (DialogState::Hidden, DialogEvent::OpenNew) => (DialogState::New, None),
            (DialogState::Hidden, DialogEvent::OpenEdit(item)) => (DialogState::Edit(item), None),
            (DialogState::Hidden, DialogEvent::OpenDestroy(item)) => {
                (DialogState::Destroy(item), None)
            }

            (DialogState::New, DialogEvent::Submit(item)) => {
                (DialogState::Hidden, Some(DialogEffect::Create(item)))
            }
            (DialogState::Edit(_), DialogEvent::Submit(item)) => {
                (DialogState::Hidden, Some(DialogEffect::Update(item)))
            }
            (DialogState::Destroy(item), DialogEvent::Confirm) => {
                (DialogState::Hidden, Some(DialogEffect::Destroy(item)))
            }

            (state, event) => {
                tracing::debug!(?state, ?event, "ignored dialog event");
                (state, None)
            }
        }
    }
}
