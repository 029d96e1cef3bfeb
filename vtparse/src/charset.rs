//! Designated character sets, for `SCS`-class commands.
//!
//! Ported from the `TERM_CHARSET_*` enumeration in term-internal.h. DEC
//! marks charsets named after "Digital Equipment Corporation"; NRCS marks
//! "National Replacement Character Set" variants; ISO marks ISO-8859
//! supplemental sets. `UserDefined` is special and can be redefined by the
//! host via `DECDLD`-family sequences (out of scope here; the variant just
//! reserves the slot).
#![allow(non_camel_case_types)]

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Charset {
    None,

    // 96-character compatible supplemental sets.
    IsoLatin1Supplemental,
    IsoLatin2Supplemental,
    IsoLatin5Supplemental,
    IsoGreekSupplemental,
    IsoHebrewSupplemental,
    IsoLatinCyrillic,

    // 94-character compatible sets.
    DecSpecialGraphic,
    DecSupplemental,
    DecTechnical,
    CyrillicDec,
    DutchNrcs,
    FinnishNrcs,
    FrenchNrcs,
    FrenchCanadianNrcs,
    GermanNrcs,
    GreekDec,
    GreekNrcs,
    HebrewDec,
    HebrewNrcs,
    ItalianNrcs,
    NorwegianDanishNrcs,
    PortugueseNrcs,
    RussianNrcs,
    ScsNrcs,
    SpanishNrcs,
    SwedishNrcs,
    SwissNrcs,
    TurkishDec,
    TurkishNrcs,

    // Special.
    UserDefinedSupplemental,
}

impl Charset {
    /// `British NRCS` and `American NRCS` are historical aliases of the
    /// ISO Latin-1/Latin-2 supplemental sets respectively (the DEC
    /// terminal ROMs reused the same glyph tables for both).
    pub const BRITISH_NRCS: Charset = Charset::IsoLatin1Supplemental;
    pub const AMERICAN_NRCS: Charset = Charset::IsoLatin2Supplemental;
}

impl Default for Charset {
    fn default() -> Self {
        Charset::None
    }
}
