//! Widget classification - picks the rendering category for a field

use super::schema::FieldSchema;
use super::table_schema::{FieldDisplay, WidgetHint};

/// Rendering category of a field's values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Text,
    Link,
    Image,
    Audio,
    Custom,
}

/// Classify a field from its schema and optional display descriptor.
///
/// Pure; unrecognized combinations fall through to `Text`.
pub fn classify(field: &FieldSchema, display: Option<&FieldDisplay>) -> Category {
    let widget = display.and_then(|d| d.widget.as_ref());

    if let Some(WidgetHint::Custom(_)) = widget {
        return Category::Custom;
    }

    if field.is_type("string") && field.is_format("data-url") {
        return match widget {
            Some(WidgetHint::Img) => Category::Image,
            Some(WidgetHint::Audio) => Category::Audio,
            _ => Category::Link,
        };
    }

    Category::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_url() -> FieldSchema {
        FieldSchema::new("string").with_format("data-url")
    }

    #[test]
    fn test_custom_wins_over_everything() {
        let display = FieldDisplay::widget(WidgetHint::Custom("badge".to_string()));
        assert_eq!(classify(&data_url(), Some(&display)), Category::Custom);
        assert_eq!(
            classify(&FieldSchema::default(), Some(&display)),
            Category::Custom
        );
    }

    #[test]
    fn test_data_url_variants() {
        let img = FieldDisplay::widget(WidgetHint::Img);
        let audio = FieldDisplay::widget(WidgetHint::Audio);
        let other = FieldDisplay::widget(WidgetHint::Named("file".to_string()));

        assert_eq!(classify(&data_url(), Some(&img)), Category::Image);
        assert_eq!(classify(&data_url(), Some(&audio)), Category::Audio);
        assert_eq!(classify(&data_url(), Some(&other)), Category::Link);
        assert_eq!(classify(&data_url(), None), Category::Link);
    }

    #[test]
    fn test_falls_through_to_text() {
        let img = FieldDisplay::widget(WidgetHint::Img);
        assert_eq!(classify(&FieldSchema::new("string"), Some(&img)), Category::Text);
        assert_eq!(
            classify(&FieldSchema::new("integer").with_format("data-url"), None),
            Category::Text
        );
        assert_eq!(classify(&FieldSchema::default(), None), Category::Text);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let img = FieldDisplay::widget(WidgetHint::Img);
        let first = classify(&data_url(), Some(&img));
        for _ in 0..10 {
            assert_eq!(classify(&data_url(), Some(&img)), first);
        }
    }
}
