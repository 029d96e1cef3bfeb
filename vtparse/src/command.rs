//! The catalogued command opcodes a dispatcher can switch on.
//!
//! This is a direct, line-for-line port of the `TERM_CMD_*` enumeration in
//! the original C header this specification was distilled from
//! (`libsystemd-terminal/term-internal.h`). Every discriminant there gets
//! exactly one variant here; no two share a value, matching spec.md §6
//! ("Each is a distinct discriminant; no two share an integer").
#![allow(non_camel_case_types)]

/// A catalogued control function, resolved from a [`crate::Sequence`]'s
/// type/intermediates/terminator triple. `None` is the placeholder used
/// when nothing could be resolved (unknown or not-yet-implemented final);
/// `Graphic` marks a plain printable character, handled by
/// [`crate::SequenceType::Graphic`] rather than by this table at all, but
/// kept here so every `Sequence` has a `command` to report.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u16)]
pub enum Command {
    None,
    Graphic,

    BEL,
    BS,
    CBT,
    CHA,
    CHT,
    CNL,
    CPL,
    CR,
    CUB,
    CUD,
    CUF,
    CUP,
    CUU,
    DA1,
    DA2,
    DA3,
    DC1,
    DC3,
    DCH,
    DECALN,
    DECANM,
    DECBI,
    DECCARA,
    DECCRA,
    DECDC,
    DECDHL_BH,
    DECDHL_TH,
    DECDWL,
    DECEFR,
    DECELF,
    DECELR,
    DECERA,
    DECFI,
    DECFRA,
    DECIC,
    DECID,
    DECINVM,
    DECKBD,
    DECKPAM,
    DECKPNM,
    DECLFKC,
    DECLL,
    DECLTOD,
    DECPCTERM,
    DECPKA,
    DECPKFMR,
    DECRARA,
    DECRC,
    DECREQTPARM,
    DECRPKT,
    DECRQCRA,
    DECRQDE,
    DECRQKT,
    DECRQLP,
    DECRQM_ANSI,
    DECRQM_DEC,
    DECRQPKFM,
    DECRQPSR,
    DECRQTSR,
    DECRQUPSS,
    DECSACE,
    DECSASD,
    DECSC,
    DECSCA,
    DECSCL,
    DECSCP,
    DECSCPP,
    DECSCS,
    DECSCUSR,
    DECSDDT,
    DECSDPT,
    DECSED,
    DECSEL,
    DECSERA,
    DECSFC,
    DECSKCV,
    DECSLCK,
    DECSLE,
    DECSLPP,
    DECSLRM_OR_SC,
    DECSMBV,
    DECSMKR,
    DECSNLS,
    DECSPP,
    DECSPPCS,
    DECSPRTT,
    DECSR,
    DECSRFR,
    DECSSCLS,
    DECSSDT,
    DECSSL,
    DECST8C,
    DECSTBM,
    DECSTR,
    DECSTRL,
    DECSWBV,
    DECSWL,
    DECTID,
    DECTME,
    DECTST,
    DL,
    DSR_ANSI,
    DSR_DEC,
    ECH,
    ED,
    EL,
    ENQ,
    EPA,
    FF,
    HPA,
    HPR,
    HT,
    HTS,
    HVP,
    ICH,
    IL,
    IND,
    LF,
    LS1R,
    LS2,
    LS2R,
    LS3,
    LS3R,
    MC_ANSI,
    MC_DEC,
    NEL,
    NP,
    NULL,
    PP,
    PPA,
    PPB,
    PPR,
    RC,
    REP,
    RI,
    RIS,
    RM_ANSI,
    RM_DEC,
    S7C1T,
    S8C1T,
    SCS,
    SD,
    SGR,
    SI,
    SM_ANSI,
    SM_DEC,
    SO,
    SPA,
    SS2,
    SS3,
    ST,
    SU,
    SUB,
    TBC,
    VPA,
    VPR,
    VT,
    XTERM_CLLHP,
    XTERM_IHMT,
    XTERM_MLHP,
    XTERM_MUHP,
    XTERM_RPM,
    XTERM_RRV,
    XTERM_RTM,
    XTERM_SACL1,
    XTERM_SACL2,
    XTERM_SACL3,
    XTERM_SDCS,
    XTERM_SGFX,
    XTERM_SPM,
    XTERM_SRV,
    XTERM_STM,
    XTERM_SUCS,
    XTERM_WM,
}

impl Default for Command {
    fn default() -> Self {
        Command::None
    }
}
