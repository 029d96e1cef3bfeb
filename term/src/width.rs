//! Display width of Unicode code points.
//!
//! Grounded on `unicode-width`'s `UnicodeWidthChar`, the same crate
//! `termwiz::cell::grapheme_column_width` builds on, rather than a
//! hand-rolled `wcwidth` interval table: the crate already encodes the
//! East-Asian-width and combining-mark data this table needs, and keeping
//! it as a dependency means width data updates with new Unicode versions
//! without touching this file.
use unicode_width::UnicodeWidthChar;

/// Width of a code point that is not a valid Unicode scalar value (lone
/// surrogate, or beyond `U+10FFFF`). Distinguishes a malformed input from
/// a legitimate zero-width code point.
pub const WIDTH_ERROR: i32 = -1;

/// Display width of `ucs4`: `0` for combining marks and C0/C1 controls,
/// `1` for ordinary narrow code points, `2` for East Asian wide code
/// points, or [`WIDTH_ERROR`] if `ucs4` is not a valid Unicode scalar
/// value.
pub fn width(ucs4: u32) -> i32 {
    match char::from_u32(ucs4) {
        Some(c) => c.width().map(|w| w as i32).unwrap_or(0),
        None => WIDTH_ERROR,
    }
}

/// Like [`width`], but treats the "ambiguous width" East Asian ranges as
/// wide (2) rather than narrow (1), matching the convention CJK locales
/// expect from a terminal.
pub fn width_cjk(ucs4: u32) -> i32 {
    match char::from_u32(ucs4) {
        Some(c) => c.width_cjk().map(|w| w as i32).unwrap_or(0),
        None => WIDTH_ERROR,
    }
}

/// Sum of [`width`] over a sequence of code points. Returns
/// [`WIDTH_ERROR`] as soon as any element is invalid; callers that want
/// to treat invalid code points as zero-width should filter beforehand.
pub fn width_of_string(seq: &[u32]) -> i32 {
    let mut total = 0i32;
    for &cp in seq {
        let w = width(cp);
        if w < 0 {
            return WIDTH_ERROR;
        }
        total += w;
    }
    total
}

/// CJK-aware counterpart to [`width_of_string`].
pub fn width_of_string_cjk(seq: &[u32]) -> i32 {
    let mut total = 0i32;
    for &cp in seq {
        let w = width_cjk(cp);
        if w < 0 {
            return WIDTH_ERROR;
        }
        total += w;
    }
    total
}
