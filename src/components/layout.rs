//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas of the table view
pub struct MainLayout {
    pub table: Rect,
    pub status: Option<Rect>,
    pub help: Rect,
}

/// Calculate a popup area centered in `area`, clamped to fit inside it
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Split the screen into table, optional status line and help bar
pub fn calculate_main_layout(area: Rect, has_status: bool) -> MainLayout {
    if has_status {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);
        MainLayout {
            table: chunks[0],
            status: Some(chunks[1]),
            help: chunks[2],
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);
        MainLayout {
            table: chunks[0],
            status: None,
            help: chunks[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup_is_clamped() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_popup(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_popup(area, 50, 50), area);
    }

    #[test]
    fn test_centered_popup_respects_offset() {
        let area = Rect::new(10, 5, 20, 10);
        assert_eq!(centered_popup(area, 10, 4), Rect::new(15, 8, 10, 4));
    }

    #[test]
    fn test_main_layout_status() {
        let area = Rect::new(0, 0, 80, 24);
        let with = calculate_main_layout(area, true);
        assert_eq!(with.status.map(|r| r.height), Some(1));
        assert_eq!(with.help.height, 3);
        assert_eq!(with.table.height, 20);

        let without = calculate_main_layout(area, false);
        assert!(without.status.is_none());
        assert_eq!(without.table.height, 21);
    }
}
