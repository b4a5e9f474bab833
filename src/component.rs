//! Component trait - Interface for UI components
//!
//! Each component keeps its own state, turns key events into Actions, and
//! renders itself. Outward effects leave a component as follow-up Actions.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` - convert a key into an Action (no state change)
/// 2. `update` - apply an Action, optionally returning a follow-up Action
/// 3. `draw` - render the current state
pub trait Component {
    /// Handle a key event, returning an optional Action
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Update component state based on an Action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Draw the component to the frame
    ///
    /// Pure rendering of the current state.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}
