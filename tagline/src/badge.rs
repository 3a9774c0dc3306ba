use serde::{Deserialize, Serialize};

use crate::palette::{Palette, StyleEntry};
use crate::status::StatusTag;

/// A color-coded label, ready for whatever renders it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub text: String,
    pub style_key: String,
    pub style: StyleEntry,
}

impl Badge {
    pub fn for_label(text: impl Into<String>) -> Self {
        Self::for_label_in(Palette::builtin(), text)
    }

    pub fn for_label_in(palette: &Palette, text: impl Into<String>) -> Self {
        let text = text.into();
        let style = palette.select(&text).clone();
        Self {
            style_key: style.name.clone(),
            text,
            style,
        }
    }

    pub fn for_status(tag: StatusTag) -> Self {
        Self {
            text: tag.text().to_string(),
            style_key: tag.style_key().to_string(),
            style: tag.style(),
        }
    }
}

impl From<StatusTag> for Badge {
    fn from(tag: StatusTag) -> Self {
        Self::for_status(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag_palette::select_style;

    #[test]
    fn label_badge_uses_selector_style() {
        let badge = Badge::for_label("snowflake");
        assert_eq!(&badge.style, select_style("snowflake"));
        assert_eq!(badge.style_key, "gray");
        assert_eq!(badge.text, "snowflake");
    }

    #[test]
    fn status_badge_ignores_digest() {
        let badge = Badge::from(StatusTag::Legacy);
        assert_eq!(badge.text, "Legacy");
        assert_eq!(badge.style_key, "legacy");
        assert_ne!(&badge.style, select_style("Legacy"));
    }

    #[test]
    fn custom_palette_badge() {
        let palette = Palette::new(vec![StyleEntry::new("mono", "#000", "#fff")]).unwrap();
        let badge = Badge::for_label_in(&palette, "pandas");
        assert_eq!(badge.style_key, "mono");
    }
}
