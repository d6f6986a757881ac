//! Deterministic theme color assignment.
//!
//! Every theme label maps to one color of a fixed palette so the same theme
//! renders identically everywhere, without a persisted color table. The
//! mapping is pure and stable across restarts: a polynomial hash over the
//! label's UTF-16 code units, folded into wrapping 32-bit signed arithmetic
//! and reduced modulo the palette size.

/// Palette of theme colors.
pub const THEME_COLORS: [&str; 15] = [
    "#ef4444", // red
    "#f97316", // orange
    "#eab308", // yellow
    "#84cc16", // lime
    "#22c55e", // green
    "#10b981", // emerald
    "#14b8a6", // teal
    "#06b6d4", // cyan
    "#3b82f6", // blue
    "#6366f1", // indigo
    "#8b5cf6", // violet
    "#a855f7", // purple
    "#d946ef", // fuchsia
    "#ec4899", // pink
    "#f43f5e", // rose
];

/// Neutral gray reserved for the empty theme; never produced by hashing.
pub const NEUTRAL_THEME_COLOR: &str = "#6b7280";

fn hash_code(s: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in s.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// The palette color for a theme label, or [`NEUTRAL_THEME_COLOR`] for the
/// empty theme.
pub fn color_for_theme(theme: &str) -> &'static str {
    if theme.is_empty() {
        return NEUTRAL_THEME_COLOR;
    }
    THEME_COLORS[hash_code(theme) as usize % THEME_COLORS.len()]
}
