//! Best-effort stylesheet parsing.
//!
//! A stylesheet is a sequence of `name { key: value; ... }` rules. Parsing
//! never fails: malformed rules and clauses are skipped so one bad rule
//! cannot take down rendering of a whole document.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::color::parse_color;
use crate::{parse_alignment, StyleSpec};

/// An immutable mapping from rule name to partial style spec.
///
/// Built once from stylesheet text, then shared read-only across any
/// number of renders. Rule names are case-sensitive; a later rule with the
/// same name overwrites an earlier one wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    rules: HashMap<String, StyleSpec>,
}

impl Stylesheet {
    /// Parse stylesheet text.
    ///
    /// The scan is a single left-to-right pass: at each position it tries
    /// to match `ident { body }` (identifier = word characters and
    /// hyphens, body = raw text up to the first `}`) and otherwise
    /// advances one character. Text between rules is ignored.
    pub fn parse(source: &str) -> Self {
        debug!(len = source.len(), "parsing stylesheet");
        let mut rules = HashMap::new();
        let chars: Vec<char> = source.chars().collect();
        let mut pos = 0;
        while pos < chars.len() {
            match match_rule(&chars, pos) {
                Some(rule) => {
                    rules.insert(rule.name, parse_clauses(&rule.body));
                    pos = rule.end;
                }
                None => pos += 1,
            }
        }
        debug!(rule_count = rules.len(), "stylesheet parsed");
        Stylesheet { rules }
    }

    /// Parse several stylesheet fragments, concatenated in argument order.
    pub fn from_fragments(fragments: &[&str]) -> Self {
        Self::parse(&fragments.concat())
    }

    /// Look up the spec for a rule name.
    pub fn get(&self, name: &str) -> Option<&StyleSpec> {
        self.rules.get(name)
    }

    /// Number of named rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

struct RuleMatch {
    name: String,
    body: String,
    end: usize,
}

/// Try to match `ident \s* { body }` starting exactly at `pos`.
fn match_rule(chars: &[char], pos: usize) -> Option<RuleMatch> {
    let mut i = pos;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    if i == pos {
        return None;
    }
    let name: String = chars[pos..i].iter().collect();
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if chars.get(i) != Some(&'{') {
        return None;
    }
    i += 1;
    let body_start = i;
    while i < chars.len() && chars[i] != '}' {
        i += 1;
    }
    if i == chars.len() {
        // Unterminated rule body, nothing to salvage.
        return None;
    }
    let body: String = chars[body_start..i].iter().collect();
    Some(RuleMatch {
        name,
        body,
        end: i + 1,
    })
}

struct ClauseMatch {
    key: String,
    value: String,
    end: usize,
}

/// Try to match `ident: value;` starting exactly at `pos`. The colon must
/// be followed by at least one whitespace character; the value is raw text
/// up to the next `;`.
fn match_clause(chars: &[char], pos: usize) -> Option<ClauseMatch> {
    let mut i = pos;
    while i < chars.len() && is_ident_char(chars[i]) {
        i += 1;
    }
    if i == pos || chars.get(i) != Some(&':') {
        return None;
    }
    let key: String = chars[pos..i].iter().collect();
    i += 1;
    let ws_start = i;
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    if i == ws_start {
        return None;
    }
    let value_start = i;
    while i < chars.len() && chars[i] != ';' {
        i += 1;
    }
    if i == chars.len() {
        return None;
    }
    let value: String = chars[value_start..i].iter().collect();
    Some(ClauseMatch {
        key,
        value,
        end: i + 1,
    })
}

fn parse_clauses(body: &str) -> StyleSpec {
    let mut spec = StyleSpec::default();
    let chars: Vec<char> = body.chars().collect();
    let mut pos = 0;
    while pos < chars.len() {
        match match_clause(&chars, pos) {
            Some(clause) => {
                apply_clause(&mut spec, &clause.key, &clause.value);
                pos = clause.end;
            }
            None => pos += 1,
        }
    }
    spec
}

/// Apply one recognized clause to the spec. Unrecognized keys are ignored;
/// unparsable values leave the field alone, except `color`, where a failed
/// parse unsets the field.
fn apply_clause(spec: &mut StyleSpec, key: &str, value: &str) {
    match key {
        "font-name" => spec.font_name = Some(value.trim().to_string()),
        "font-size" => {
            if let Some(size) = parse_number(value) {
                spec.font_size = Some(size);
            }
        }
        "color" => {
            spec.color = match parse_color(value.trim()) {
                Ok(color) => Some(color),
                Err(err) => {
                    warn!(%err, value, "dropping unparsable color clause");
                    None
                }
            }
        }
        "align" | "text-alignment" | "alignment" => {
            if let Some(alignment) = parse_alignment(value.trim()) {
                spec.alignment = Some(alignment);
            }
        }
        "line-height" => {
            if let Some(height) = parse_number(value) {
                spec.line_height = Some(height);
            }
        }
        "baseline-offset" => {
            if let Some(offset) = parse_number(value) {
                spec.baseline_offset = Some(offset);
            }
        }
        _ => {}
    }
}

fn parse_number(value: &str) -> Option<f32> {
    value.trim().parse().ok()
}
