//! The rule table.
//!
//! A [`RuleTable`] is an ordered, immutable sequence of [`DecisionRule`]s.
//! Iteration order is part of the observable contract: the engine walks rules
//! in exactly this order and results preserve it. Tables are validated once
//! at construction and shared behind an `Arc` afterwards.

/// Directive-language lint over rule text.
pub mod lint;
/// Atomically swappable table handle.
pub mod shared;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::RuleTableError;
use crate::rule::DecisionRule;

pub use lint::{lint_rule, LanguageFinding, StatementLocation};
pub use shared::SharedRuleTable;

static BUILTIN: OnceLock<Arc<RuleTable>> = OnceLock::new();

/// Stable content hash of a rule table.
///
/// Computed with blake3 over the canonical JSON encoding of the rules, so two
/// tables with the same rules in the same order share a fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableFingerprint(blake3::Hash);

impl TableFingerprint {
    fn of(rules: &[DecisionRule]) -> Result<Self, RuleTableError> {
        let canonical = serde_json::to_vec(rules)?;
        Ok(Self(blake3::hash(&canonical)))
    }

    /// Raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// First twelve hex characters, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        self.to_string()[..12].to_string()
    }
}

impl fmt::Display for TableFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.to_hex().as_str())
    }
}

/// What to do when loaded rule text uses directive language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LintPolicy {
    /// Skip the lint.
    Off,
    /// Log each finding and accept the table.
    #[default]
    Warn,
    /// Reject the table.
    Deny,
}

/// An ordered, validated, immutable collection of decision rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<DecisionRule>,
    fingerprint: TableFingerprint,
}

impl RuleTable {
    /// Builds a table, checking that ids are non-empty and unique, that
    /// descriptions are present, and that no rule constrains a dimension
    /// twice.
    pub fn new(rules: Vec<DecisionRule>) -> Result<Self, RuleTableError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(RuleTableError::EmptyRuleId { index });
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleTableError::DuplicateRuleId {
                    id: rule.id.clone(),
                });
            }
            if rule.description.trim().is_empty() {
                return Err(RuleTableError::EmptyDescription {
                    id: rule.id.clone(),
                });
            }
            if let Some(dimension) = rule.when.duplicate_dimension() {
                return Err(RuleTableError::DuplicateDimension {
                    id: rule.id.clone(),
                    dimension,
                });
            }
        }

        let fingerprint = TableFingerprint::of(&rules)?;
        Ok(Self { rules, fingerprint })
    }

    /// The process-wide built-in table (26 rules), constructed on first use.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        BUILTIN
            .get_or_init(|| {
                let table = Self::new(crate::builtin::rules())
                    .expect("built-in rule table is well formed");
                info!(
                    rules = table.rule_count(),
                    fingerprint = %table.fingerprint().short(),
                    "built-in rule table initialized"
                );
                Arc::new(table)
            })
            .clone()
    }

    /// Number of rules; constant for the table's lifetime.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Same as [`RuleTable::rule_count`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, DecisionRule> {
        self.rules.iter()
    }

    /// Rules as a slice.
    #[must_use]
    pub fn rules(&self) -> &[DecisionRule] {
        &self.rules
    }

    /// Looks a rule up by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DecisionRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Definition position of a rule.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id == id)
    }

    /// Content fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> TableFingerprint {
        self.fingerprint
    }

    /// Scans every description and statement for directive language.
    #[must_use]
    pub fn lint_language(&self) -> Vec<LanguageFinding> {
        self.rules.iter().flat_map(lint_rule).collect()
    }

    /// Applies a lint policy to this table.
    pub fn enforce(&self, policy: LintPolicy) -> Result<(), RuleTableError> {
        if policy == LintPolicy::Off {
            return Ok(());
        }
        let findings = self.lint_language();
        let Some(first) = findings.first() else {
            return Ok(());
        };
        match policy {
            LintPolicy::Deny => Err(RuleTableError::LanguageViolations {
                count: findings.len(),
                first: first.to_string(),
            }),
            _ => {
                for finding in &findings {
                    warn!(rule = %finding.rule_id, word = %finding.word, "{finding}");
                }
                Ok(())
            }
        }
    }

    /// Parses a table from a JSON array of rules.
    pub fn from_json_str(json: &str) -> Result<Self, RuleTableError> {
        let rules: Vec<DecisionRule> = serde_json::from_str(json)?;
        Self::new(rules)
    }

    /// Reads a table from a JSON file and applies `policy`.
    pub fn from_json_file(path: impl AsRef<Path>, policy: LintPolicy) -> Result<Self, RuleTableError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&contents)?;
        table.enforce(policy)?;
        info!(
            path = %path.display(),
            rules = table.rule_count(),
            fingerprint = %table.fingerprint().short(),
            "rule table loaded"
        );
        Ok(table)
    }

    /// Serializes the table to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, RuleTableError> {
        Ok(serde_json::to_string_pretty(&self.rules)?)
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a DecisionRule;
    type IntoIter = std::slice::Iter<'a, DecisionRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
