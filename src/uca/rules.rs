// uca/rules.rs - Tailoring rule parser
//
// Reads the ICU-style delta syntax used by collation definitions:
//
//   &a < b << c <<< C = d          resets and relations
//   &[before 1]b < x               insert before the reset character
//   &[first non-ignorable] < x     logical reset positions
//   &c < ch                        multi-character targets (contractions)
//   &l < a|b                       `b` after `a` (previous context)
//   &a < x/e                       `x` with `e` appended (expansion)
//   [strength 2] [version 5.2.0]   settings
//
// Positions in errors are byte offsets into the rule text.

use std::fmt;

use smallvec::SmallVec;

use crate::ctype::WcT;
use crate::uca::{UcaVersion, MAX_CONTRACTION_LENGTH};

pub type CharString = SmallVec<[WcT; MAX_CONTRACTION_LENGTH]>;

// === Rule model ===

/// Strength of a relation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RelationLevel {
    Primary,
    Secondary,
    Tertiary,
    Identical,
}

impl RelationLevel {
    fn from_count(n: usize) -> Option<RelationLevel> {
        match n {
            1 => Some(RelationLevel::Primary),
            2 => Some(RelationLevel::Secondary),
            3 => Some(RelationLevel::Tertiary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalPosition {
    FirstNonIgnorable,
    LastNonIgnorable,
    FirstPrimaryIgnorable,
    LastPrimaryIgnorable,
    FirstSecondaryIgnorable,
    LastSecondaryIgnorable,
    FirstTertiaryIgnorable,
    LastTertiaryIgnorable,
    FirstTrailing,
    LastTrailing,
    FirstVariable,
    LastVariable,
}

static LOGICAL_POSITIONS: &[(&str, LogicalPosition)] = &[
    ("first non-ignorable", LogicalPosition::FirstNonIgnorable),
    ("last non-ignorable", LogicalPosition::LastNonIgnorable),
    ("first primary ignorable", LogicalPosition::FirstPrimaryIgnorable),
    ("last primary ignorable", LogicalPosition::LastPrimaryIgnorable),
    ("first secondary ignorable", LogicalPosition::FirstSecondaryIgnorable),
    ("last secondary ignorable", LogicalPosition::LastSecondaryIgnorable),
    ("first tertiary ignorable", LogicalPosition::FirstTertiaryIgnorable),
    ("last tertiary ignorable", LogicalPosition::LastTertiaryIgnorable),
    ("first trailing", LogicalPosition::FirstTrailing),
    ("last trailing", LogicalPosition::LastTrailing),
    ("first variable", LogicalPosition::FirstVariable),
    ("last variable", LogicalPosition::LastVariable),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetTarget {
    Chars(CharString),
    Logical(LogicalPosition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reset {
    pub target: ResetTarget,
    /// `[before N]`: insert before the target at level N.
    pub before: Option<u8>,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub level: RelationLevel,
    pub chars: CharString,
    /// Previous-character context (`a|b`).
    pub context: Option<WcT>,
    /// Characters whose weights are appended (`x/e`).
    pub expansion: CharString,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Reset(Reset),
    Relation(Relation),
}

/// How a primary relation makes room after its reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftMethod {
    /// Increment the last primary weight.
    #[default]
    Simple,
    /// Keep the reset weights and append a small extra weight.
    Expand,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSettings {
    /// Number of levels used for comparison, 1..=3.
    pub strength: Option<usize>,
    pub version: Option<UcaVersion>,
    pub shift_method: ShiftMethod,
    pub backwards: bool,
    pub case_level: bool,
    pub alternate_shifted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
    pub settings: RuleSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleError {
    pub position: usize,
    pub message: String,
}

impl RuleError {
    pub(crate) fn new(position: usize, message: impl Into<String>) -> RuleError {
        RuleError { position, message: message.into() }
    }
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", self.message, self.position)
    }
}

impl std::error::Error for RuleError {}

// === Lexer ===

struct RuleParser<'a> {
    text: &'a str,
    pos: usize,
}

fn is_syntax(c: char) -> bool {
    matches!(c, '&' | '<' | '=' | '|' | '/' | '[' | ']' | '*')
}

impl<'a> RuleParser<'a> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn error<T>(&self, message: impl Into<String>) -> Result<T, RuleError> {
        Err(RuleError::new(self.pos, message))
    }

    fn hex_escape(&mut self, digits: usize) -> Result<WcT, RuleError> {
        let start = self.pos;
        let end = start + digits;
        let hex = self.text.get(start..end).filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()));
        match hex.and_then(|h| WcT::from_str_radix(h, 16).ok()) {
            Some(wc) if wc <= crate::ctype::MAX_UNICODE => {
                self.pos = end;
                Ok(wc)
            }
            _ => Err(RuleError::new(start, "bad hex escape")),
        }
    }

    /// One literal character: plain, escaped or inside quotes.
    fn literal(&mut self, out: &mut CharString) -> Result<bool, RuleError> {
        let Some(c) = self.peek() else { return Ok(false) };
        if c.is_whitespace() || is_syntax(c) {
            return Ok(false);
        }
        match c {
            '\\' => {
                self.bump();
                let wc = match self.bump() {
                    Some('u') => self.hex_escape(4)?,
                    Some('U') => self.hex_escape(8)?,
                    Some(other) => other as WcT,
                    None => return self.error("escape at end of rules"),
                };
                out.push(wc);
            }
            '\'' => {
                self.bump();
                // '' is a literal apostrophe
                if self.eat('\'') {
                    out.push('\'' as WcT);
                    return Ok(true);
                }
                loop {
                    match self.bump() {
                        Some('\'') if self.eat('\'') => out.push('\'' as WcT),
                        Some('\'') => break,
                        Some(q) => out.push(q as WcT),
                        None => return self.error("unterminated quote"),
                    }
                }
            }
            _ => {
                self.bump();
                out.push(c as WcT);
            }
        }
        Ok(true)
    }

    fn string(&mut self) -> Result<CharString, RuleError> {
        self.skip_ws();
        let start = self.pos;
        let mut out = CharString::new();
        while self.literal(&mut out)? {
            if out.len() > MAX_CONTRACTION_LENGTH {
                return Err(RuleError::new(start, "string too long"));
            }
        }
        if out.is_empty() {
            return self.error("character expected");
        }
        Ok(out)
    }

    /// Text between `[` and the matching `]`, the `[` already consumed.
    fn bracket(&mut self) -> Result<&'a str, RuleError> {
        let start = self.pos;
        let mut depth = 1;
        while let Some(c) = self.bump() {
            match c {
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(self.text[start..self.pos - 1].trim());
                    }
                }
                _ => {}
            }
        }
        Err(RuleError::new(start - 1, "unterminated '['"))
    }

    // === Grammar ===

    fn reset(&mut self) -> Result<Reset, RuleError> {
        let position = self.pos;
        self.skip_ws();
        let mut before = None;
        if self.eat('[') {
            let at = self.pos;
            let body = self.bracket()?;
            if let Some(level) = body.strip_prefix("before") {
                match level.trim() {
                    "1" => before = Some(1),
                    "2" => before = Some(2),
                    "3" => before = Some(3),
                    _ => return Err(RuleError::new(at, "bad [before] level")),
                }
                self.skip_ws();
            } else {
                let logical = logical_position(body).ok_or_else(|| RuleError::new(at, "unknown reset position"))?;
                return Ok(Reset { target: ResetTarget::Logical(logical), before, position });
            }
        }
        if self.eat('[') {
            let at = self.pos;
            let body = self.bracket()?;
            let logical = logical_position(body).ok_or_else(|| RuleError::new(at, "unknown reset position"))?;
            return Ok(Reset { target: ResetTarget::Logical(logical), before, position });
        }
        let chars = self.string()?;
        Ok(Reset { target: ResetTarget::Chars(chars), before, position })
    }

    fn relation_level(&mut self) -> Result<(RelationLevel, bool), RuleError> {
        let at = self.pos;
        let level = if self.eat('=') {
            RelationLevel::Identical
        } else {
            let mut n = 0;
            while self.eat('<') {
                n += 1;
            }
            match RelationLevel::from_count(n) {
                Some(level) => level,
                None if n == 4 => return Err(RuleError::new(at, "quaternary relations are not supported")),
                None => return Err(RuleError::new(at, "bad relation operator")),
            }
        };
        Ok((level, self.eat('*')))
    }

    fn relations(&mut self, rules: &mut Vec<Rule>) -> Result<(), RuleError> {
        let position = self.pos;
        let (level, starred) = self.relation_level()?;
        let mut chars = self.string()?;

        if starred {
            for wc in chars {
                let chars: CharString = SmallVec::from_slice(&[wc]);
                rules.push(Rule::Relation(Relation { level, chars, context: None, expansion: CharString::new(), position }));
            }
            return Ok(());
        }

        self.skip_ws();
        let mut context = None;
        if self.eat('|') {
            if chars.len() != 1 {
                return Err(RuleError::new(position, "context must be one character"));
            }
            context = Some(chars[0]);
            chars = self.string()?;
            if chars.len() != 1 {
                return Err(RuleError::new(position, "context needs a single character"));
            }
            self.skip_ws();
        }
        let mut expansion = CharString::new();
        if self.eat('/') {
            expansion = self.string()?;
        }
        rules.push(Rule::Relation(Relation { level, chars, context, expansion, position }));
        Ok(())
    }

    fn setting(&mut self, settings: &mut RuleSettings) -> Result<(), RuleError> {
        let at = self.pos;
        let body = self.bracket()?;
        let (key, value) = body.split_once(char::is_whitespace).unwrap_or((body, ""));
        let value = value.trim();
        let bad = || Err(RuleError::new(at, format!("bad value for [{}]", key)));
        match key {
            "strength" => match value {
                "1" | "2" | "3" => settings.strength = value.parse().ok(),
                _ => return bad(),
            },
            "version" => match UcaVersion::from_name(value) {
                Some(v) => settings.version = Some(v),
                None => return bad(),
            },
            "shift-after-method" => match value {
                "expand" => settings.shift_method = ShiftMethod::Expand,
                "simple" => settings.shift_method = ShiftMethod::Simple,
                _ => return bad(),
            },
            "backwards" => match value {
                "2" => settings.backwards = true,
                _ => return bad(),
            },
            "caseLevel" => match value {
                "on" => settings.case_level = true,
                "off" => settings.case_level = false,
                _ => return bad(),
            },
            "alternate" => match value {
                "shifted" => settings.alternate_shifted = true,
                "non-ignorable" => settings.alternate_shifted = false,
                _ => return bad(),
            },
            "suppressContractions" | "optimize" => {}
            _ => return Err(RuleError::new(at, format!("unknown setting [{}]", key))),
        }
        Ok(())
    }
}

fn logical_position(body: &str) -> Option<LogicalPosition> {
    let words: Vec<&str> = body.split_whitespace().collect();
    let normalized = words.join(" ");
    LOGICAL_POSITIONS.iter().find(|(name, _)| *name == normalized).map(|&(_, p)| p)
}

// === Entry point ===

/// Parses a tailoring rule script.
pub fn parse_rules(text: &str) -> Result<RuleSet, RuleError> {
    let mut p = RuleParser { text, pos: 0 };
    let mut set = RuleSet::default();
    let mut have_reset = false;
    loop {
        p.skip_ws();
        let Some(c) = p.peek() else { break };
        match c {
            '&' => {
                p.bump();
                let reset = p.reset()?;
                set.rules.push(Rule::Reset(reset));
                have_reset = true;
            }
            '<' | '=' => {
                if !have_reset {
                    return p.error("relation without a reset");
                }
                p.relations(&mut set.rules)?;
            }
            '[' => {
                p.bump();
                p.setting(&mut set.settings)?;
            }
            _ => return p.error(format!("unexpected '{}'", c)),
        }
    }
    Ok(set)
}
