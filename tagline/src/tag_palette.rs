//! Built-in palette for label highlighting and the string digest that picks
//! an entry from it. Values are CSS hex tokens so a frontend can apply them
//! directly.

use crate::palette::{Palette, StyleEntry};

/// `(name, foreground, background)` triples for the built-in palette.
pub(crate) const BUILTIN: [(&str, &str, &str); 8] = [
    ("blue", "#1f4e99", "#dbe8fc"),
    ("green", "#1e6b3a", "#d7f2e0"),
    ("yellow", "#7a5a00", "#fdf0c4"),
    ("red", "#9b1c1c", "#fbdada"),
    ("olive", "#4f5a16", "#ebefd3"),
    ("cyan", "#0f5f6b", "#d3f1f5"),
    ("magenta", "#7d1f6e", "#f6d9f0"),
    ("gray", "#3d4451", "#e6e8eb"),
];

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the UTF-8 bytes of `input`.
#[inline]
pub fn digest(input: &str) -> u32 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Index into the built-in palette for `input`.
#[inline]
pub fn index_for(input: &str) -> usize {
    Palette::builtin().index_for(input)
}

/// Returns the built-in style entry for the provided label.
#[inline]
pub fn select_style(input: &str) -> &'static StyleEntry {
    Palette::builtin().select(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn digest_matches_reference_vectors() {
        assert_eq!(digest(""), 0x811c_9dc5);
        assert_eq!(digest("a"), 0xe40c_292c);
        assert_eq!(digest("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn legacy_maps_to_fixed_index() {
        assert_eq!(index_for("Legacy"), 6);
        assert_eq!(select_style("Legacy").name, "magenta");
    }

    #[test]
    fn regression_anchors_are_stable() {
        assert_eq!(index_for(""), 5);
        assert_eq!(index_for("Experimental"), 7);
        assert_eq!(index_for("Deprecated"), 4);
    }

    #[test]
    fn empty_string_selects_a_defined_entry() {
        let style = select_style("");
        assert!(Palette::builtin().contains(style));
        assert_eq!(style, select_style(""));
    }

    #[test]
    fn digest_is_order_sensitive() {
        assert_ne!(digest("ab"), digest("ba"));
        assert_eq!(index_for("ab"), 2);
        assert_eq!(index_for("ba"), 4);
    }

    #[test]
    fn single_letters_spread_across_palette() {
        let used: HashSet<usize> = ('a'..='z')
            .map(|letter| index_for(&letter.to_string()))
            .collect();

        assert!(used.len() >= 2);
        assert_eq!(used.len(), BUILTIN.len());
    }
}
