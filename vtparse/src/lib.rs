//! A pull-based DEC/ECMA-48 control-sequence parser.
//!
//! [`Parser::feed`] consumes one Unicode scalar value at a time — the
//! caller is expected to have already run raw bytes through [`utf8`]'s
//! lenient decoder — and returns a [`Sequence`] record whenever a
//! complete control function, escape sequence, or printable character has
//! been recognized. The state machine itself lives in [`transitions`] and
//! follows Paul Williams' VT500 diagram; this module is the glue that
//! turns `(Action, State)` pairs into accumulated parameters, collected
//! intermediates, and resolved [`Command`] opcodes.
#![allow(dead_code)]

pub mod charset;
pub mod command;
pub mod enums;
pub mod transitions;
pub mod utf8;

pub use charset::Charset;
pub use command::Command;
pub use enums::{Action, State};
pub use utf8::Utf8Decoder;

/// Maximum number of numeric parameters a single sequence can carry.
/// Parameters beyond this are dropped, not buffered: the sequence is
/// still dispatched with whatever fit.
pub const ARG_MAX: usize = 16;

/// Maximum number of bytes accumulated in a `Sequence::st` payload
/// (OSC/DCS string data). Longer payloads are silently truncated; the
/// sequence is still delivered.
pub const ST_MAX: usize = 4096;

/// The broad class a completed [`Sequence`] belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum SequenceType {
    None,
    Ignore,
    Graphic,
    Control,
    Escape,
    Csi,
    Dcs,
    Osc,
}

impl Default for SequenceType {
    fn default() -> Self {
        SequenceType::None
    }
}

/// A parsed control sequence, escape sequence, control character, or
/// printable character.
///
/// Reused in place by the [`Parser`] that produced it: the reference
/// returned from [`Parser::feed`] is only valid until the next call.
/// Callers that need to hold onto `st` past that point must copy it.
#[derive(Debug, Clone)]
pub struct Sequence {
    pub kind: SequenceType,
    pub command: Command,
    pub terminator: u32,
    /// Bitmask of intermediate characters and private markers observed
    /// during the parameter phase. Bit layout: `' '` (0x20) is bit 0
    /// through `'/'` (0x2f) at bit 15; bits 16-27 are reserved (digits,
    /// `:`, `;`); `<` `=` `>` `?` occupy bits 28-31.
    pub intermediates: u32,
    pub charset: Charset,
    n_args: usize,
    args: [i32; ARG_MAX],
    n_st: usize,
    st: [u8; ST_MAX],
}

impl Sequence {
    /// Numeric parameters, in order. Omitted parameters read as `-1`.
    pub fn args(&self) -> &[i32] {
        &self.args[..self.n_args]
    }

    /// Accumulated OSC/DCS string payload, UTF-8 encoded.
    pub fn st(&self) -> &[u8] {
        &self.st[..self.n_st]
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Sequence {
            kind: SequenceType::None,
            command: Command::None,
            terminator: 0,
            intermediates: 0,
            charset: Charset::None,
            n_args: 0,
            args: [-1; ARG_MAX],
            n_st: 0,
            st: [0; ST_MAX],
        }
    }
}

/// Which multi-byte string collection, if any, is waiting for a `ST`
/// (`ESC \`) terminator. Tracked separately from [`State`] because once
/// the parser sees the leading `ESC` of a prospective `ST` it moves to
/// plain [`State::Escape`], which by itself can't tell a closing `ESC \`
/// apart from the start of a brand new escape sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum StringKind {
    None,
    Dcs,
    Osc,
    Sos,
}

/// Maps an intermediate character or private marker to its bit position,
/// per the layout documented on [`Sequence::intermediates`].
const fn intermediate_bit(c: u32) -> Option<u32> {
    match c {
        0x20..=0x2f => Some(c - 0x20),
        0x3c..=0x3f => Some(28 + (c - 0x3c)),
        _ => None,
    }
}

fn has(intermediates: u32, c: char) -> bool {
    match intermediate_bit(c as u32) {
        Some(bit) => intermediates & (1 << bit) != 0,
        None => false,
    }
}

/// Pull-based control-sequence parser. One instance parses one stream of
/// code points; feed it via [`Parser::feed`].
pub struct Parser {
    state: State,
    host: bool,
    intermediates: u32,
    current_param: i32,
    param_started: bool,
    /// Set as soon as any digit or `;` is seen in the parameter phase.
    /// Distinguishes "no parameters at all" (`CSI H`, zero args) from
    /// "one, empty, trailing parameter" (`CSI ; H` after a previous arg,
    /// one `-1` arg) — both leave `param_started == false` at dispatch
    /// time, but only the latter should commit a final arg.
    seen_param: bool,
    pending_string: StringKind,
    seq: Sequence,
}

impl Parser {
    /// `host` selects which side of the connection this parser is
    /// decoding for. Ambiguous sequences (where the same bytes mean
    /// different things depending on whether they travel host-to-terminal
    /// or terminal-to-host) are resolved accordingly; today's
    /// command-resolution table happens not to need it, since ANSI/DEC
    /// variant selection is already carried entirely by the `?` private
    /// marker, but the flag is threaded through for callers that
    /// interpret sequences further downstream.
    pub fn new(host: bool) -> Self {
        Parser {
            state: State::Ground,
            host,
            intermediates: 0,
            current_param: -1,
            param_started: false,
            seen_param: false,
            pending_string: StringKind::None,
            seq: Sequence::default(),
        }
    }

    pub fn host(&self) -> bool {
        self.host
    }

    fn reset_seq(&mut self) {
        self.seq.n_args = 0;
        self.seq.args = [-1; ARG_MAX];
        self.seq.n_st = 0;
        self.seq.intermediates = 0;
        self.seq.charset = Charset::None;
        self.intermediates = 0;
        self.current_param = -1;
        self.param_started = false;
        self.seen_param = false;
    }

    fn push_param_digit(&mut self, d: u32) {
        self.seen_param = true;
        if self.seq.n_args >= ARG_MAX {
            return;
        }
        if !self.param_started {
            self.current_param = 0;
            self.param_started = true;
        }
        self.current_param = self.current_param.saturating_mul(10).saturating_add(d as i32);
        if self.current_param > 0xffff {
            self.current_param = 0xffff;
        }
    }

    fn end_param(&mut self) {
        if self.seq.n_args >= ARG_MAX {
            return;
        }
        self.seq.args[self.seq.n_args] = if self.param_started { self.current_param } else { -1 };
        self.seq.n_args += 1;
        self.current_param = -1;
        self.param_started = false;
    }

    fn collect_intermediate(&mut self, cp: u32) {
        if let Some(bit) = intermediate_bit(cp) {
            self.intermediates |= 1 << bit;
        }
    }

    fn push_st(&mut self, cp: u32) {
        let mut buf = [0u8; 6];
        let n = utf8::encode(&mut buf, cp);
        for &b in &buf[..n] {
            if self.seq.n_st >= ST_MAX {
                log::trace!("st payload truncated at {} bytes", ST_MAX);
                break;
            }
            self.seq.st[self.seq.n_st] = b;
            self.seq.n_st += 1;
        }
    }

    /// Finalize a string collected via `ESC \` rather than the BEL
    /// shortcut. Returns whether a sequence is ready for delivery.
    fn finish_string(&mut self, kind: StringKind) -> bool {
        match kind {
            StringKind::Dcs | StringKind::Osc => true,
            StringKind::Sos | StringKind::None => false,
        }
    }

    fn apply_action(&mut self, action: Action, cp: u32) -> bool {
        match action {
            Action::None | Action::Ignore => false,

            Action::Graphic => {
                self.reset_seq();
                self.seq.kind = SequenceType::Graphic;
                self.seq.command = Command::Graphic;
                self.seq.terminator = cp;
                true
            }

            Action::Control => {
                self.reset_seq();
                self.seq.kind = SequenceType::Control;
                self.seq.terminator = cp;
                self.seq.command = resolve_control(cp);
                true
            }

            Action::Clear => {
                self.reset_seq();
                false
            }

            Action::Collect => {
                self.collect_intermediate(cp);
                false
            }

            Action::Param => {
                if cp == u32::from(b';') {
                    self.seen_param = true;
                    self.end_param();
                } else {
                    self.push_param_digit(cp - u32::from(b'0'));
                }
                false
            }

            Action::EscDispatch => {
                if self.seen_param {
                    self.end_param();
                }
                self.seq.kind = SequenceType::Escape;
                self.seq.terminator = cp;
                self.seq.intermediates = self.intermediates;
                let (command, charset) = resolve_escape(self.intermediates, cp);
                self.seq.command = command;
                self.seq.charset = charset;
                true
            }

            Action::CsiDispatch => {
                if self.seen_param {
                    self.end_param();
                }
                self.seq.kind = SequenceType::Csi;
                self.seq.terminator = cp;
                self.seq.intermediates = self.intermediates;
                self.seq.command = resolve_csi(self.intermediates, cp, self.host);
                true
            }

            Action::Hook => {
                if self.seen_param {
                    self.end_param();
                }
                self.seq.kind = SequenceType::Dcs;
                self.seq.terminator = cp;
                self.seq.intermediates = self.intermediates;
                self.seq.command = resolve_dcs(self.intermediates, cp, self.host);
                self.seq.n_st = 0;
                false
            }

            Action::Put => {
                self.push_st(cp);
                false
            }

            Action::Unhook => {
                self.pending_string = StringKind::None;
                true
            }

            Action::OscStart => {
                self.seq.kind = SequenceType::Osc;
                self.seq.n_st = 0;
                false
            }

            Action::OscPut => {
                self.push_st(cp);
                false
            }

            Action::OscEnd => {
                self.pending_string = StringKind::None;
                true
            }

            Action::ApcStart | Action::ApcPut | Action::ApcEnd => false,
        }
    }

    /// Feed one more code point. Returns a completed sequence whenever
    /// one is ready; the reference is valid only until the next call.
    pub fn feed(&mut self, cp: u32) -> Option<&Sequence> {
        if self.state == State::Escape && self.pending_string != StringKind::None && cp == 0x5c {
            let kind = self.pending_string;
            self.pending_string = StringKind::None;
            self.state = State::Ground;
            return if self.finish_string(kind) { Some(&self.seq) } else { None };
        }

        let (action, next_state) = transitions::step(self.state, cp);
        let mut dispatched = self.apply_action(action, cp);

        if next_state != self.state {
            // Entering `Escape` out of a string-collecting state is a
            // prospective `ESC \`: the payload gathered so far must
            // survive whether or not the next code point actually turns
            // out to be `\`. The entry action for `Escape` is `Clear`,
            // which would otherwise `reset_seq()` the `st` buffer out
            // from under the pending string before the terminator is
            // even seen.
            let entering_st_candidate = next_state == State::Escape && self.pending_string != StringKind::None;

            if self.state == State::Escape {
                // An ESC that didn't turn into `ESC \` abandons any
                // pending string collection started before it.
                self.pending_string = StringKind::None;
            }
            self.state = next_state;
            match next_state {
                State::OscString => self.pending_string = StringKind::Osc,
                State::DcsPassthrough => self.pending_string = StringKind::Dcs,
                State::SosPiApcString => self.pending_string = StringKind::Sos,
                _ => {}
            }
            let entry = transitions::entry_action(next_state);
            if entry != Action::None && !entering_st_candidate {
                if self.apply_action(entry, cp) {
                    dispatched = true;
                }
            }
        }

        if dispatched {
            Some(&self.seq)
        } else {
            None
        }
    }
}

fn resolve_control(cp: u32) -> Command {
    match cp {
        0x00 => Command::NULL,
        0x05 => Command::ENQ,
        0x07 => Command::BEL,
        0x08 => Command::BS,
        0x09 => Command::HT,
        0x0a => Command::LF,
        0x0b => Command::VT,
        0x0c => Command::FF,
        0x0d => Command::CR,
        0x0e => Command::SO,
        0x0f => Command::SI,
        0x11 => Command::DC1,
        0x13 => Command::DC3,
        0x1a => Command::SUB,
        _ => Command::None,
    }
}

fn charset_for_final(terminator: u32) -> Charset {
    match char::from_u32(terminator) {
        Some('A') => Charset::BRITISH_NRCS,
        Some('0') => Charset::DecSpecialGraphic,
        Some('1') => Charset::DecSupplemental,
        Some('2') => Charset::DecTechnical,
        Some('4') => Charset::DutchNrcs,
        Some('5') => Charset::FinnishNrcs,
        Some('6') => Charset::NorwegianDanishNrcs,
        Some('7') => Charset::SwedishNrcs,
        Some('9') => Charset::FrenchCanadianNrcs,
        Some('<') => Charset::DecSupplemental,
        Some('=') => Charset::SwissNrcs,
        Some('>') => Charset::DecTechnical,
        Some('C') => Charset::FinnishNrcs,
        Some('E') => Charset::NorwegianDanishNrcs,
        Some('H') => Charset::SwedishNrcs,
        Some('K') => Charset::GermanNrcs,
        Some('Q') => Charset::FrenchCanadianNrcs,
        Some('R') => Charset::FrenchNrcs,
        Some('Y') => Charset::ItalianNrcs,
        Some('Z') => Charset::SpanishNrcs,
        Some('`') => Charset::NorwegianDanishNrcs,
        _ => Charset::None,
    }
}

fn resolve_escape(intermediates: u32, terminator: u32) -> (Command, Charset) {
    let term = match char::from_u32(terminator) {
        Some(c) => c,
        None => return (Command::None, Charset::None),
    };

    // G0-G3 charset designation: `(` `)` `*` `+`.
    if has(intermediates, '(') || has(intermediates, ')') || has(intermediates, '*') || has(intermediates, '+') {
        return (Command::SCS, charset_for_final(terminator));
    }

    if has(intermediates, '#') {
        let command = match term {
            '3' => Command::DECDHL_TH,
            '4' => Command::DECDHL_BH,
            '5' => Command::DECSWL,
            '6' => Command::DECDWL,
            '8' => Command::DECALN,
            _ => Command::None,
        };
        return (command, Charset::None);
    }

    if has(intermediates, ' ') {
        let command = match term {
            'F' => Command::S7C1T,
            'G' => Command::S8C1T,
            _ => Command::None,
        };
        return (command, Charset::None);
    }

    let command = match term {
        '6' => Command::DECBI,
        '7' => Command::DECSC,
        '8' => Command::DECRC,
        '9' => Command::DECFI,
        '=' => Command::DECKPAM,
        '>' => Command::DECKPNM,
        'c' => Command::RIS,
        'D' => Command::IND,
        'E' => Command::NEL,
        'H' => Command::HTS,
        'M' => Command::RI,
        'N' => Command::SS2,
        'O' => Command::SS3,
        'Z' => Command::DECID,
        '\\' => Command::ST,
        'n' => Command::LS2,
        'o' => Command::LS3,
        '}' => Command::LS2R,
        '|' => Command::LS3R,
        '~' => Command::LS1R,
        _ => Command::None,
    };
    (command, Charset::None)
}

fn resolve_csi(intermediates: u32, terminator: u32, _host: bool) -> Command {
    let term = match char::from_u32(terminator) {
        Some(c) => c,
        None => return Command::None,
    };
    let dec = has(intermediates, '?');
    let bang = has(intermediates, '!');
    let quote = has(intermediates, '"');
    let dollar = has(intermediates, '$');
    let space = has(intermediates, ' ');

    match term {
        'A' => Command::CUU,
        'B' => Command::CUD,
        'C' => Command::CUF,
        'D' => Command::CUB,
        'E' => Command::CNL,
        'F' => Command::CPL,
        'G' => Command::CHA,
        'H' => Command::CUP,
        'I' => Command::CHT,
        'J' => {
            if dec {
                Command::DECSED
            } else {
                Command::ED
            }
        }
        'K' => {
            if dec {
                Command::DECSEL
            } else {
                Command::EL
            }
        }
        'L' => Command::IL,
        'M' => Command::DL,
        'P' => Command::DCH,
        'S' => Command::SU,
        'T' => Command::SD,
        'X' => Command::ECH,
        'Z' => Command::CBT,
        '`' => Command::HPA,
        'a' => Command::HPR,
        'b' => Command::REP,
        'c' => {
            if has(intermediates, '=') {
                Command::DA3
            } else if has(intermediates, '>') {
                Command::DA2
            } else {
                Command::DA1
            }
        }
        'd' => Command::VPA,
        'e' => Command::VPR,
        'f' => Command::HVP,
        'g' => Command::TBC,
        'h' => {
            if dec {
                Command::SM_DEC
            } else {
                Command::SM_ANSI
            }
        }
        'i' => {
            if dec {
                Command::MC_DEC
            } else {
                Command::MC_ANSI
            }
        }
        'l' => {
            if dec {
                Command::RM_DEC
            } else {
                Command::RM_ANSI
            }
        }
        'm' => Command::SGR,
        'n' => {
            if dec {
                Command::DSR_DEC
            } else {
                Command::DSR_ANSI
            }
        }
        'p' => {
            if bang {
                Command::DECSTR
            } else if quote {
                Command::DECSCL
            } else if dollar {
                if dec {
                    Command::DECRQM_DEC
                } else {
                    Command::DECRQM_ANSI
                }
            } else {
                Command::None
            }
        }
        'q' => {
            if space {
                Command::DECSCUSR
            } else if quote {
                Command::DECSCA
            } else {
                Command::None
            }
        }
        'r' => {
            if dollar {
                Command::DECCARA
            } else {
                Command::DECSTBM
            }
        }
        's' => Command::DECSLRM_OR_SC,
        't' => Command::XTERM_WM,
        'u' => Command::DECRQTSR,
        'v' if dollar => Command::DECCRA,
        'w' if dollar => Command::DECRQPSR,
        'x' => {
            if dollar {
                Command::DECFRA
            } else {
                Command::DECREQTPARM
            }
        }
        'y' if dollar => Command::DECRQCRA,
        'z' if dollar => Command::DECERA,
        '{' if dollar => Command::DECSERA,
        _ => Command::None,
    }
}

fn resolve_dcs(_intermediates: u32, _terminator: u32, _host: bool) -> Command {
    // DCS payloads (sixel graphics, tmux passthrough, ReGIS, ...) are
    // interpreted by whoever reads `Sequence::st`; the parser doesn't try
    // to catalogue them further than `type == Dcs`.
    Command::None
}
