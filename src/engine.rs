//! The evaluation engine.
//!
//! Evaluation is a pure function of a rule table and a constraint set: walk
//! the table in definition order, collect the impacts of every matching rule
//! per option, and leave a trace entry explaining each contribution. No I/O,
//! no shared mutable state, no randomness. Calling it twice with equal inputs
//! yields equal results.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::constraint::{CandidateConstraints, ConstraintSet};
use crate::error::RefereeResult;
use crate::labels::format_trigger_label;
use crate::result::{EvaluationResult, TriggeredRule};
use crate::rule::ImpactCategory;
use crate::table::RuleTable;

/// Evaluates `constraints` against `table`.
///
/// A typed [`ConstraintSet`] is valid by construction, so this cannot fail.
#[must_use]
pub fn evaluate(table: &RuleTable, constraints: &ConstraintSet) -> EvaluationResult {
    let frozen = *constraints;

    let mut result = EvaluationResult {
        total_rules_evaluated: table.rule_count(),
        ..EvaluationResult::default()
    };
    let mut triggered: HashSet<&str> = HashSet::new();

    for rule in table {
        if !rule.matches(&frozen) {
            continue;
        }
        trace!(rule = %rule.id, when = %rule.when, "rule matched");
        triggered.insert(rule.id.as_str());

        let affected_options = rule.impacts.affected_options();
        let trigger_label = format_trigger_label(&rule.when);

        for (option, impact) in rule.impacts.iter() {
            let accumulator = result.option_mut(option);
            for category in ImpactCategory::ALL {
                accumulator
                    .statements_mut(category)
                    .extend(impact.statements(category).iter().cloned());
            }

            let contributed_types = impact.contributed_categories();
            if contributed_types.is_empty() || accumulator.was_triggered_by(&rule.id) {
                continue;
            }
            accumulator.triggered_rules.push(TriggeredRule {
                id: rule.id.clone(),
                description: rule.description.clone(),
                trigger_label: trigger_label.clone(),
                affected_options: affected_options.clone(),
                contributed_types,
            });
        }
    }

    result.total_rules_triggered = triggered.len();
    debug!(
        constraints = %frozen,
        evaluated = result.total_rules_evaluated,
        triggered = result.total_rules_triggered,
        "constraints evaluated"
    );
    result
}

/// Evaluation engine bound to one rule table snapshot.
///
/// Cheap to clone; the table is shared.
///
/// # Examples
///
/// ```
/// use referee::{ConstraintSet, Expertise, RefereeEngine, RiskTolerance, Scale, TimeToMarket};
///
/// let engine = RefereeEngine::builtin();
/// let result = engine.evaluate(&ConstraintSet::new(
///     Expertise::Beginner,
///     Scale::Large,
///     TimeToMarket::Fast,
///     RiskTolerance::Low,
/// ));
/// assert_eq!(result.total_rules_evaluated, 26);
/// assert!(result.total_rules_triggered > 0);
/// ```
#[derive(Debug, Clone)]
pub struct RefereeEngine {
    table: Arc<RuleTable>,
}

impl RefereeEngine {
    /// Creates an engine over an explicit table.
    #[must_use]
    pub fn new(table: Arc<RuleTable>) -> Self {
        Self { table }
    }

    /// Creates an engine over the built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(RuleTable::builtin())
    }

    /// The table this engine evaluates against.
    #[must_use]
    pub fn table(&self) -> &Arc<RuleTable> {
        &self.table
    }

    /// Size of the table.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.table.rule_count()
    }

    /// Evaluates a validated constraint set.
    #[must_use]
    pub fn evaluate(&self, constraints: &ConstraintSet) -> EvaluationResult {
        evaluate(&self.table, constraints)
    }

    /// Validates then evaluates a candidate.
    ///
    /// Fails with `InvalidConstraints` before any rule is consulted if a
    /// dimension is missing or out of range.
    pub fn evaluate_candidate(
        &self,
        candidate: &CandidateConstraints,
    ) -> RefereeResult<EvaluationResult> {
        let frozen = candidate.freeze()?;
        Ok(self.evaluate(&frozen))
    }

    /// Validates then evaluates a JSON candidate.
    pub fn evaluate_json(&self, candidate: &serde_json::Value) -> RefereeResult<EvaluationResult> {
        let frozen = crate::constraint::freeze(candidate)?;
        Ok(self.evaluate(&frozen))
    }
}

impl Default for RefereeEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
