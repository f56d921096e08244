//! Evaluation result types.
//!
//! Results serialize with the camelCase field names consumers render from
//! (`triggeredRules`, `totalRulesEvaluated`, ...).

use serde::{Deserialize, Serialize};

use crate::rule::{ApiOption, ImpactCategory};

/// Trace of one rule's contribution to one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredRule {
    /// Rule id.
    pub id: String,
    /// Rule description.
    pub description: String,
    /// Human-readable condition, e.g. "Large scale + Beginner expertise".
    pub trigger_label: String,
    /// Every option the rule affects, not only this one.
    pub affected_options: Vec<ApiOption>,
    /// Categories the rule contributed to this option.
    pub contributed_types: Vec<ImpactCategory>,
}

/// Accumulated statements for one option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionResult {
    /// Strengths in rule-table order.
    pub strengths: Vec<String>,
    /// Weaknesses in rule-table order.
    pub weaknesses: Vec<String>,
    /// Trade-offs in rule-table order.
    pub tradeoffs: Vec<String>,
    /// Rules that contributed, in rule-table order.
    pub triggered_rules: Vec<TriggeredRule>,
}

impl OptionResult {
    /// Statements for one category.
    #[must_use]
    pub fn statements(&self, category: ImpactCategory) -> &[String] {
        match category {
            ImpactCategory::Strength => &self.strengths,
            ImpactCategory::Weakness => &self.weaknesses,
            ImpactCategory::Tradeoff => &self.tradeoffs,
        }
    }

    pub(crate) fn statements_mut(&mut self, category: ImpactCategory) -> &mut Vec<String> {
        match category {
            ImpactCategory::Strength => &mut self.strengths,
            ImpactCategory::Weakness => &mut self.weaknesses,
            ImpactCategory::Tradeoff => &mut self.tradeoffs,
        }
    }

    /// Returns true if the rule already left a trace on this option.
    #[must_use]
    pub fn was_triggered_by(&self, rule_id: &str) -> bool {
        self.triggered_rules.iter().any(|r| r.id == rule_id)
    }

    /// Returns true if no rule contributed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.tradeoffs.is_empty()
            && self.triggered_rules.is_empty()
    }
}

/// Outcome of evaluating one constraint set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// REST result.
    pub rest: OptionResult,
    /// GraphQL result.
    pub graphql: OptionResult,
    /// gRPC result.
    pub grpc: OptionResult,
    /// Size of the rule table that was walked.
    pub total_rules_evaluated: usize,
    /// Number of distinct rules that matched.
    pub total_rules_triggered: usize,
}

impl EvaluationResult {
    /// Result for one option.
    #[must_use]
    pub fn option(&self, option: ApiOption) -> &OptionResult {
        match option {
            ApiOption::Rest => &self.rest,
            ApiOption::GraphQl => &self.graphql,
            ApiOption::Grpc => &self.grpc,
        }
    }

    pub(crate) fn option_mut(&mut self, option: ApiOption) -> &mut OptionResult {
        match option {
            ApiOption::Rest => &mut self.rest,
            ApiOption::GraphQl => &mut self.graphql,
            ApiOption::Grpc => &mut self.grpc,
        }
    }

    /// Options with their results, in presentation order.
    pub fn options(&self) -> impl Iterator<Item = (ApiOption, &OptionResult)> {
        ApiOption::ALL.into_iter().map(move |option| (option, self.option(option)))
    }
}
