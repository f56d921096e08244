//! Reloadable rule table handle.
//!
//! Evaluations take a full `Arc` snapshot before walking the table, and
//! replacements are a single atomic pointer swap. An in-flight evaluation
//! therefore always sees one consistent table, never a mix of old and new
//! rules.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::constraint::ConstraintSet;
use crate::engine::{self, RefereeEngine};
use crate::error::RuleTableError;
use crate::result::EvaluationResult;

use super::{LintPolicy, RuleTable};

/// A rule table that can be replaced at runtime.
#[derive(Debug)]
pub struct SharedRuleTable {
    current: ArcSwap<RuleTable>,
}

impl SharedRuleTable {
    /// Wraps an initial table.
    #[must_use]
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self {
            current: ArcSwap::new(table),
        }
    }

    /// Starts from the built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(RuleTable::builtin())
    }

    /// The table currently in effect.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RuleTable> {
        self.current.load_full()
    }

    /// Replaces the table and returns the previous one.
    pub fn replace(&self, table: Arc<RuleTable>) -> Arc<RuleTable> {
        let fingerprint = table.fingerprint();
        let rules = table.rule_count();
        let previous = self.current.swap(table);
        info!(
            rules,
            fingerprint = %fingerprint.short(),
            previous = %previous.fingerprint().short(),
            "rule table replaced"
        );
        previous
    }

    /// Loads a table from disk and swaps it in.
    ///
    /// On any error the current table stays in effect.
    pub fn reload_from_file(
        &self,
        path: impl AsRef<Path>,
        policy: LintPolicy,
    ) -> Result<Arc<RuleTable>, RuleTableError> {
        let table = Arc::new(RuleTable::from_json_file(path, policy)?);
        self.replace(Arc::clone(&table));
        Ok(table)
    }

    /// An engine bound to the current snapshot.
    #[must_use]
    pub fn engine(&self) -> RefereeEngine {
        RefereeEngine::new(self.snapshot())
    }

    /// Evaluates against the current snapshot.
    #[must_use]
    pub fn evaluate(&self, constraints: &ConstraintSet) -> EvaluationResult {
        let table = self.snapshot();
        engine::evaluate(&table, constraints)
    }
}

impl Default for SharedRuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}
