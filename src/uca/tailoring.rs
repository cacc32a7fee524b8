// uca/tailoring.rs - Applies tailoring rules to a base table
//
// Rules are applied in element form: every reset looks up the collation
// elements of its anchor, every relation derives new elements just after
// (or before) it. The result is compiled into page tables like the base.

use log::{debug, trace};
use smallvec::smallvec;

use crate::ctype::WcT;
use crate::error::CollationError;
use crate::uca::ducet::{Ce, CeSeq, CeTable, ContractionDef, SECONDARY_COMMON, TERTIARY_LOWER};
use crate::uca::implicit::implicit_weights;
use crate::uca::rules::{
    parse_rules, LogicalPosition, Relation, RelationLevel, Reset, ResetTarget, Rule, RuleError, RuleSet, ShiftMethod,
};
use crate::uca::{LogicalPositions, UcaInfo, UcaVersion, MAX_CHAR_WEIGHTS, MAX_CONTRACTION_WEIGHTS};

/// Distance kept below the anchor by `[before N]`, per level.
const BEFORE_GAP: [u16; 3] = [0x10, 0x08, 0x01];
/// First extra weight appended by the expand shift method.
const EXPAND_SHIFT_BASE: u16 = 0x0100;

/// Collation elements of a character without a table entry.
pub fn implicit_ces(version: UcaVersion, wc: WcT) -> CeSeq {
    let mut p = [0u16; 2];
    implicit_weights(version, 0, wc, &mut p);
    smallvec![Ce::new(p[0], SECONDARY_COMMON, TERTIARY_LOWER), Ce::new(p[1], 0, 0)]
}

fn logical_char(pos: &LogicalPositions, which: LogicalPosition) -> Option<WcT> {
    match which {
        LogicalPosition::FirstNonIgnorable => pos.first_non_ignorable,
        LogicalPosition::LastNonIgnorable => pos.last_non_ignorable,
        LogicalPosition::FirstPrimaryIgnorable => pos.first_primary_ignorable,
        LogicalPosition::LastPrimaryIgnorable => pos.last_primary_ignorable,
        LogicalPosition::FirstSecondaryIgnorable => pos.first_secondary_ignorable,
        LogicalPosition::LastSecondaryIgnorable => pos.last_secondary_ignorable,
        LogicalPosition::FirstTertiaryIgnorable => pos.first_tertiary_ignorable,
        LogicalPosition::LastTertiaryIgnorable => pos.last_tertiary_ignorable,
        LogicalPosition::FirstTrailing => pos.first_trailing,
        LogicalPosition::LastTrailing => pos.last_trailing,
        LogicalPosition::FirstVariable => pos.first_variable,
        LogicalPosition::LastVariable => pos.last_variable,
    }
}

// === Weight shifting ===

fn level_index(level: RelationLevel) -> Option<usize> {
    match level {
        RelationLevel::Primary => Some(0),
        RelationLevel::Secondary => Some(1),
        RelationLevel::Tertiary => Some(2),
        RelationLevel::Identical => None,
    }
}

/// Elements sorting just after `anchor` at `level`. Levels below the
/// shifted one are reset to their common values and later elements are
/// dropped.
fn shift_after(anchor: &CeSeq, level: usize) -> CeSeq {
    let mut out = anchor.clone();
    match out.iter().rposition(|ce| ce.0[level] != 0) {
        Some(i) => {
            out.truncate(i + 1);
            let ce = &mut out[i];
            ce.0[level] = ce.0[level].saturating_add(1);
            if level < 1 {
                ce.0[1] = SECONDARY_COMMON;
            }
            if level < 2 {
                ce.0[2] = TERTIARY_LOWER;
            }
        }
        None => {
            let mut ce = Ce::new(0, 0, 0);
            ce.0[level] = 1;
            for l in level + 1..3 {
                ce.0[l] = if l == 1 { SECONDARY_COMMON } else { TERTIARY_LOWER };
            }
            out.push(ce);
        }
    }
    out
}

/// Elements sorting a little before `anchor` at `level`.
fn shift_before(anchor: &CeSeq, level: usize) -> Result<CeSeq, String> {
    let mut out = anchor.clone();
    let i = out
        .iter()
        .rposition(|ce| ce.0[level] != 0)
        .ok_or_else(|| format!("nothing to place before at level {}", level + 1))?;
    let ce = &mut out[i];
    if ce.0[level] <= BEFORE_GAP[level] {
        return Err(format!("no room before the reset at level {}", level + 1));
    }
    ce.0[level] -= BEFORE_GAP[level];
    Ok(out)
}

// === Rule application ===

struct Tailor {
    table: CeTable,
    version: UcaVersion,
    positions: LogicalPositions,
    method: ShiftMethod,
    anchor: Option<CeSeq>,
    reset_anchor: Option<CeSeq>,
    expand_count: u16,
}

impl Tailor {
    fn lookup(&self, seq: &[WcT]) -> CeSeq {
        let version = self.version;
        self.table.lookup_seq(seq, |wc| implicit_ces(version, wc))
    }

    fn reset(&mut self, r: &Reset) -> Result<(), RuleError> {
        let ces = match &r.target {
            ResetTarget::Chars(chars) => self.lookup(chars),
            ResetTarget::Logical(which) => {
                let wc = logical_char(&self.positions, *which)
                    .ok_or_else(|| RuleError::new(r.position, "logical position is empty"))?;
                self.lookup(&[wc])
            }
        };
        let ces = match r.before {
            Some(level) => shift_before(&ces, level as usize - 1).map_err(|m| RuleError::new(r.position, m))?,
            None => ces,
        };
        self.anchor = Some(ces.clone());
        self.reset_anchor = Some(ces);
        self.expand_count = 0;
        Ok(())
    }

    fn relation(&mut self, rel: &Relation) -> Result<(), RuleError> {
        let anchor = self
            .anchor
            .as_ref()
            .ok_or_else(|| RuleError::new(rel.position, "relation without a reset"))?;
        let mut ces = match level_index(rel.level) {
            None => anchor.clone(),
            Some(0) if self.method == ShiftMethod::Expand => {
                self.expand_count += 1;
                let mut out = self.reset_anchor.clone().unwrap_or_default();
                out.push(Ce::new(EXPAND_SHIFT_BASE + self.expand_count, SECONDARY_COMMON, TERTIARY_LOWER));
                out
            }
            Some(level) => shift_after(anchor, level),
        };
        self.anchor = Some(ces.clone());

        if !rel.expansion.is_empty() {
            let extra = self.lookup(&rel.expansion);
            ces.extend(extra);
        }

        let contraction = rel.chars.len() > 1 || rel.context.is_some();
        let limit = if contraction { MAX_CONTRACTION_WEIGHTS } else { MAX_CHAR_WEIGHTS };
        if ces.len() > limit {
            return Err(RuleError::new(rel.position, "too many weights"));
        }

        trace!("tailor {:?} {:?} -> {:?}", rel.level, rel.chars, ces);
        if !contraction {
            self.table.chars.insert(rel.chars[0], ces);
            return Ok(());
        }
        let (chars, with_context) = match rel.context {
            Some(prev) => (smallvec![prev, rel.chars[0]], true),
            None => (rel.chars.clone(), false),
        };
        self.table
            .contractions
            .retain(|c| !(c.with_context == with_context && c.chars == chars));
        self.table.contractions.push(ContractionDef { chars, ces, with_context });
        Ok(())
    }
}

/// Applies parsed rules to `base`, producing a tailored element table.
pub fn apply_rules(base: &CeTable, rules: &RuleSet, version: UcaVersion) -> Result<CeTable, RuleError> {
    let mut t = Tailor {
        table: base.clone(),
        version,
        positions: base.positions(),
        method: rules.settings.shift_method,
        anchor: None,
        reset_anchor: None,
        expand_count: 0,
    };
    for rule in &rules.rules {
        match rule {
            Rule::Reset(r) => t.reset(r)?,
            Rule::Relation(rel) => t.relation(rel)?,
        }
    }
    Ok(t.table)
}

/// Parses `rules` and builds the weight tables of a tailored collation.
/// A `[version]` setting overrides `version`.
pub fn build_tailored(name: &str, rules: &str, version: UcaVersion) -> Result<UcaInfo, CollationError> {
    let set = parse_rules(rules).map_err(|e| CollationError::RuleSyntax {
        collation: name.to_string(),
        position: e.position,
        message: e.message,
    })?;
    let version = set.settings.version.unwrap_or(version);
    let table = apply_rules(&crate::uca::ducet::BASE_CE_TABLE, &set, version).map_err(|e| CollationError::Tailoring {
        collation: name.to_string(),
        message: e.to_string(),
    })?;
    let info = UcaInfo::compile(&table, version);
    debug!(
        "built tailored table for {}: {} rules, {} contractions, UCA {}",
        name,
        set.rules.len(),
        table.contractions.len(),
        version.name()
    );
    Ok(info)
}
