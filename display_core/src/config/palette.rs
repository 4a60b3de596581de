//! The fixed named palette default entries draw from.
//!
//! Colors here are logical names; what they look like on screen is the
//! renderer's business. The `"grey"` sentinel is deliberately absent so a
//! resolved fallback is distinguishable from an assigned color.

use std::hash::{Hash, Hasher};

/// The named palette, in swatch order.
pub const DEFAULT_PALETTE: [&str; 12] = [
    "red", "orange", "gold", "olive", "green", "teal", "cyan", "blue", "indigo", "violet",
    "magenta", "brown",
];

/// Pick a palette color for a key.
///
/// The pick is stable for a given key but otherwise unspecified; callers
/// may only rely on the result being a palette member.
pub fn color_for(key: &str) -> &'static str {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    key.hash(&mut hasher);
    DEFAULT_PALETTE[(hasher.finish() % DEFAULT_PALETTE.len() as u64) as usize]
}

/// Check whether a color is a palette member.
pub fn in_palette(color: &str) -> bool {
    DEFAULT_PALETTE.contains(&color)
}
