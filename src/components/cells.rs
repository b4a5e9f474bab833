//! Cell rendering
//!
//! A cell is first described as a `CellView` (what to show, independent of
//! the terminal), then styled into a ratatui `Line`.

use super::renderer::{CustomCell, RendererRegistry};
use crate::model::{classify, display_value, Category, FieldEntry, Item, TableSchema, WidgetHint};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Fixed display height of image cells
pub const IMAGE_HEIGHT: u16 = 44;

/// What a single body cell shows
#[derive(Debug, Clone, PartialEq)]
pub enum CellView {
    /// Raw value
    Text(String),
    /// Anchor whose target and label are both the value
    Link { href: String, label: String },
    /// Anchor around a fixed-height image, both pointing at the value
    Image { href: String, src: String, height: u16 },
    /// Captioned audio player
    Audio { src: String },
    /// Output of a registered custom renderer
    Custom(Line<'static>),
}

/// Build the view of one cell according to its field's category
pub fn build_cell(
    entry: &FieldEntry,
    item: &Item,
    table: &TableSchema,
    renderers: &RendererRegistry,
) -> CellView {
    let display = table.field(&entry.name);
    let value = item.value(&entry.name);
    let raw = display_value(value);

    match classify(&entry.schema, display) {
        Category::Text => CellView::Text(raw),
        Category::Link => CellView::Link {
            href: raw.clone(),
            label: raw,
        },
        Category::Image => CellView::Image {
            href: raw.clone(),
            src: raw,
            height: IMAGE_HEIGHT,
        },
        Category::Audio => CellView::Audio { src: raw },
        Category::Custom => {
            let renderer_name = match display.and_then(|d| d.widget.as_ref()) {
                Some(WidgetHint::Custom(name)) => name.as_str(),
                _ => "",
            };
            match renderers.get(renderer_name) {
                Some(renderer) => CellView::Custom(renderer.render(&CustomCell {
                    value,
                    name: &entry.name,
                    item,
                    schema: display,
                })),
                None => {
                    tracing::warn!(
                        field = %entry.name,
                        renderer = renderer_name,
                        "custom renderer not registered, showing raw value"
                    );
                    CellView::Text(raw)
                }
            }
        }
    }
}

/// Longest prefix of `s` that is at most `max` characters, marked with `…`
fn abbreviate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}

/// Dim `→ target` suffix for anchors whose target differs from what is shown
fn target_suffix(shown: &str, href: &str) -> Option<Span<'static>> {
    (shown != href).then(|| {
        Span::styled(
            format!(" → {}", abbreviate(href, 24)),
            Style::default().fg(Color::DarkGray),
        )
    })
}

impl CellView {
    /// Plain text of the cell, used for column sizing
    pub fn text(&self) -> String {
        self.to_line().to_string()
    }

    /// Styled terminal representation
    pub fn to_line(&self) -> Line<'static> {
        let link_style = Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED);

        match self {
            CellView::Text(text) => Line::from(text.clone()),
            CellView::Link { href, label } => {
                let mut spans = vec![Span::styled(label.clone(), link_style)];
                spans.extend(target_suffix(label, href));
                Line::from(spans)
            }
            CellView::Image { href, src, height } => {
                let mut spans = vec![
                    Span::styled(
                        format!("▣ img h{} ", height),
                        Style::default().fg(Color::Magenta),
                    ),
                    Span::styled(abbreviate(src, 24), link_style),
                ];
                spans.extend(target_suffix(src, href));
                Line::from(spans)
            }
            CellView::Audio { src } => Line::from(vec![
                Span::styled("♪ audio ", Style::default().fg(Color::Green)),
                Span::styled(abbreviate(src, 24), Style::default().fg(Color::DarkGray)),
            ]),
            CellView::Custom(line) => line.clone(),
        }
    }
}
