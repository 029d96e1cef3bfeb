//! Per-cell style: colors and boolean attribute flags (C4).
//!
//! `Color` mirrors the `term_color` shape from the system this is
//! modeled on — a small discriminant plus either a palette index or an
//! RGB triple — rather than `termwiz::color::ColorAttribute`'s richer
//! "true-color with palette fallback" design; named colors are just
//! palette indices 0..15, per ECMA-48's own SGR numbering.
//!
//! The seven independent boolean flags use the `bitflags` crate, the way
//! mode/attribute bitmasks are represented elsewhere in this stack,
//! rather than seven separate `bool` fields.

bitflags::bitflags! {
    #[derive(Default)]
    pub struct AttrFlags: u8 {
        const BOLD      = 0b0000_0001;
        const ITALIC    = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const INVERSE   = 0b0000_1000;
        const PROTECT   = 0b0001_0000;
        const BLINK     = 0b0010_0000;
        const HIDDEN    = 0b0100_0000;
    }
}

/// A cell foreground or background color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    /// Renderer-chosen default.
    Default,
    /// Indexed palette entry, 0..255. 0..15 are the named ANSI colors.
    Palette(u8),
    /// Explicit 24-bit color.
    Rgb(u8, u8, u8),
}

impl Color {
    pub const BLACK: Color = Color::Palette(0);
    pub const RED: Color = Color::Palette(1);
    pub const GREEN: Color = Color::Palette(2);
    pub const YELLOW: Color = Color::Palette(3);
    pub const BLUE: Color = Color::Palette(4);
    pub const MAGENTA: Color = Color::Palette(5);
    pub const CYAN: Color = Color::Palette(6);
    pub const WHITE: Color = Color::Palette(7);
    pub const LIGHT_BLACK: Color = Color::Palette(8);
    pub const LIGHT_RED: Color = Color::Palette(9);
    pub const LIGHT_GREEN: Color = Color::Palette(10);
    pub const LIGHT_YELLOW: Color = Color::Palette(11);
    pub const LIGHT_BLUE: Color = Color::Palette(12);
    pub const LIGHT_MAGENTA: Color = Color::Palette(13);
    pub const LIGHT_CYAN: Color = Color::Palette(14);
    pub const LIGHT_WHITE: Color = Color::Palette(15);
}

impl Default for Color {
    fn default() -> Self {
        Color::Default
    }
}

/// Per-cell style: fg/bg color plus the seven boolean rendition flags.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Attributes {
    pub fg: Color,
    pub bg: Color,
    pub flags: AttrFlags,
}

impl Attributes {
    pub fn bold(&self) -> bool {
        self.flags.contains(AttrFlags::BOLD)
    }

    pub fn italic(&self) -> bool {
        self.flags.contains(AttrFlags::ITALIC)
    }

    pub fn underline(&self) -> bool {
        self.flags.contains(AttrFlags::UNDERLINE)
    }

    pub fn inverse(&self) -> bool {
        self.flags.contains(AttrFlags::INVERSE)
    }

    pub fn protect(&self) -> bool {
        self.flags.contains(AttrFlags::PROTECT)
    }

    pub fn blink(&self) -> bool {
        self.flags.contains(AttrFlags::BLINK)
    }

    pub fn hidden(&self) -> bool {
        self.flags.contains(AttrFlags::HIDDEN)
    }

    pub fn set(&mut self, flag: AttrFlags, value: bool) {
        self.flags.set(flag, value);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use k9::assert_equal as assert_eq;

    #[test]
    fn default_is_default_colors_and_no_flags() {
        let a = Attributes::default();
        assert_eq!(a.fg, Color::Default);
        assert_eq!(a.bg, Color::Default);
        assert!(!a.bold());
        assert!(!a.protect());
    }

    #[test]
    fn equality_is_elementwise() {
        let mut a = Attributes::default();
        let mut b = Attributes::default();
        assert_eq!(a, b);
        a.set(AttrFlags::BOLD, true);
        assert_ne!(a, b);
        b.set(AttrFlags::BOLD, true);
        assert_eq!(a, b);
    }

    #[test]
    fn named_colors_are_low_palette_indices() {
        assert_eq!(Color::BLACK, Color::Palette(0));
        assert_eq!(Color::LIGHT_WHITE, Color::Palette(15));
    }
}
