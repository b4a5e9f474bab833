//! Pagination control
//!
//! Zero-based page index; renders a compact page strip windowed around the
//! current page.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Pages shown on each side of the current one
const WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    pub page: usize,
    pub page_count: usize,
    pub per_page: usize,
}

impl Paginator {
    pub fn new(page: usize, page_count: usize, per_page: usize) -> Self {
        Self {
            page,
            page_count,
            per_page,
        }
    }

    /// Page to select when moving by `delta`, or `None` when it would not
    /// change the page
    pub fn step(&self, delta: isize) -> Option<usize> {
        if self.page_count == 0 {
            return None;
        }
        let last = self.page_count - 1;
        let target = if delta.is_negative() {
            self.page.saturating_sub(delta.unsigned_abs())
        } else {
            self.page.saturating_add(delta as usize).min(last)
        };
        (target != self.page).then_some(target)
    }

    pub fn next(&self) -> Option<usize> {
        self.step(1)
    }

    pub fn prev(&self) -> Option<usize> {
        self.step(-1)
    }

    /// Render the page strip, e.g. `‹ 1 … 4 5 [6] 7 8 … 12 ›`
    pub fn to_line(&self) -> Line<'static> {
        let dim = Style::default().fg(Color::DarkGray);
        let arrow = |enabled: bool| if enabled { Style::default().fg(Color::Cyan) } else { dim };

        let mut spans = vec![Span::styled("‹ ", arrow(self.page > 0))];

        if self.page_count == 0 {
            spans.push(Span::styled("– ", dim));
        } else {
            let first = self.page.saturating_sub(WINDOW);
            let last = (self.page + WINDOW).min(self.page_count - 1);

            if first > 0 {
                spans.push(Span::raw("1 "));
                if first > 1 {
                    spans.push(Span::styled("… ", dim));
                }
            }
            for page in first..=last {
                if page == self.page {
                    spans.push(Span::styled(
                        format!("[{}] ", page + 1),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else {
                    spans.push(Span::raw(format!("{} ", page + 1)));
                }
            }
            if last + 1 < self.page_count {
                if last + 2 < self.page_count {
                    spans.push(Span::styled("… ", dim));
                }
                spans.push(Span::raw(format!("{} ", self.page_count)));
            }
        }

        spans.push(Span::styled("›", arrow(self.page + 1 < self.page_count)));
        Line::from(spans)
    }
}
