use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::StyleEntry;

/// Fixed lifecycle markers rendered next to asset and op names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Experimental,
    Deprecated,
    Legacy,
}

impl StatusTag {
    pub const ALL: [StatusTag; 3] = [
        StatusTag::Experimental,
        StatusTag::Deprecated,
        StatusTag::Legacy,
    ];

    pub fn text(self) -> &'static str {
        match self {
            StatusTag::Experimental => "Experimental",
            StatusTag::Deprecated => "Deprecated",
            StatusTag::Legacy => "Legacy",
        }
    }

    pub fn style_key(self) -> &'static str {
        match self {
            StatusTag::Experimental => "experimental",
            StatusTag::Deprecated => "deprecated",
            StatusTag::Legacy => "legacy",
        }
    }

    /// Static style for the tag. Status tags never go through the digest.
    pub fn style(self) -> StyleEntry {
        let (foreground, background) = match self {
            StatusTag::Experimental => ("#6b4a00", "#fff1c2"),
            StatusTag::Deprecated => ("#8a1c1c", "#fde2e2"),
            StatusTag::Legacy => ("#444a55", "#e9ebef"),
        };
        StyleEntry::new(self.style_key(), foreground, background)
    }
}

impl fmt::Display for StatusTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown status tag: {0}")]
pub struct UnknownStatusTag(pub String);

impl FromStr for StatusTag {
    type Err = UnknownStatusTag;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        StatusTag::ALL
            .into_iter()
            .find(|tag| tag.style_key().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownStatusTag(value.to_string()))
    }
}
