use std::collections::HashSet;
use std::sync::OnceLock;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tag_palette::{self, BUILTIN};

/// A foreground/background color pairing. `name` doubles as the style key
/// handed to renderers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleEntry {
    pub name: String,
    pub foreground: String,
    pub background: String,
}

impl StyleEntry {
    pub fn new(
        name: impl Into<String>,
        foreground: impl Into<String>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            foreground: foreground.into(),
            background: background.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("palette must contain at least one entry")]
    Empty,
    #[error("duplicate palette entry name: {0}")]
    DuplicateName(String),
    #[error("invalid color for palette entry {name}: {value}")]
    InvalidColor { name: String, value: String },
}

/// One colored name produced by [`Palette::assign_all`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub index: usize,
    pub style: StyleEntry,
}

/// A non-empty, immutable sequence of style entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<StyleEntry>,
}

impl Palette {
    pub fn new(entries: Vec<StyleEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }

        let mut names = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !names.insert(entry.name.as_str()) {
                return Err(PaletteError::DuplicateName(entry.name.clone()));
            }

            for value in [&entry.foreground, &entry.background] {
                if !is_hex_color(value) {
                    return Err(PaletteError::InvalidColor {
                        name: entry.name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(Self { entries })
    }

    /// The palette compiled into the crate, shared by the whole process.
    pub fn builtin() -> &'static Palette {
        static BUILTIN_PALETTE: OnceLock<Palette> = OnceLock::new();
        BUILTIN_PALETTE.get_or_init(|| {
            let entries = BUILTIN
                .iter()
                .map(|&(name, foreground, background)| {
                    StyleEntry::new(name, foreground, background)
                })
                .collect();
            Palette::new(entries).expect("built-in palette is valid")
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StyleEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&StyleEntry> {
        self.entries.get(index)
    }

    pub fn contains(&self, entry: &StyleEntry) -> bool {
        self.entries.iter().any(|candidate| candidate == entry)
    }

    #[inline]
    pub fn index_for(&self, input: &str) -> usize {
        (tag_palette::digest(input) as usize) % self.entries.len()
    }

    #[inline]
    pub fn select(&self, input: &str) -> &StyleEntry {
        &self.entries[self.index_for(input)]
    }

    /// Colors every name in parallel. Output order follows `names`.
    pub fn assign_all<S>(&self, names: &[S]) -> Vec<Assignment>
    where
        S: AsRef<str> + Sync,
    {
        names
            .par_iter()
            .map(|name| {
                let name = name.as_ref();
                let index = self.index_for(name);
                Assignment {
                    name: name.to_string(),
                    index,
                    style: self.entries[index].clone(),
                }
            })
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = Vec::<StyleEntry>::deserialize(deserializer)?;
        Palette::new(entries).map_err(serde::de::Error::custom)
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}
