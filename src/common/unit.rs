//! Unit conversion utilities.
//!
//! Worksheets mix three unit systems: column widths in "character units",
//! row heights in points, and drawing anchor offsets in EMUs. Everything is
//! brought to points here before any layout arithmetic happens.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_PT: i64 = 12_700;

/// Pixels per character unit of the default font (Calibri 11 at 96 DPI).
pub const PX_PER_CHAR: f64 = 7.0;
/// Cell padding in pixels added to every column width.
pub const COLUMN_PADDING_PX: f64 = 4.0;
/// Points per pixel at 96 DPI.
pub const PT_PER_PX: f64 = 72.0 / 96.0;

#[inline]
pub fn emu_to_pt_f64(emu: i64) -> f64 {
    emu as f64 / EMUS_PER_PT as f64
}

/// Convert a column width in character units to points.
///
/// `points = (chars * 7 + 4) * 72 / 96`
#[inline]
pub fn char_width_to_pt(chars: f64) -> f64 {
    (chars * PX_PER_CHAR + COLUMN_PADDING_PX) * 72.0 / 96.0
}

/// Round to two decimal places, half away from zero.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a point value for CSS output.
///
/// Uses the shortest representation that round-trips, always keeping a
/// fractional part (`40.0`, `66.97`).
#[inline]
pub fn format_pt(value: f64) -> String {
    // `-0.0` would otherwise leak into style strings
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:?}", value)
}
