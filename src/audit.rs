//! Domain audit for rule authors.
//!
//! Evaluates a table against every valid constraint set and summarizes how
//! the rules cover the domain: which rules never fire, how often each option
//! ends up with no strengths or no weaknesses, and how statements are spread
//! across opposed constraint values. None of this feeds back into evaluation;
//! it supports reviewing a table for neutrality.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::constraint::{ConstraintSet, Expertise, RiskTolerance, Scale, Term, TimeToMarket};
use crate::engine;
use crate::labels::trigger_phrase;
use crate::rule::{ApiOption, ImpactCategory};
use crate::table::RuleTable;

/// How many constraint sets a rule matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleCoverage {
    /// Rule id.
    pub rule_id: String,
    /// Constraint sets the rule matched.
    pub matched_combinations: usize,
}

/// Per-option count of combinations that leave a category empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionExposure {
    /// The option.
    pub option: ApiOption,
    /// Combinations leaving the option without strengths.
    pub without_strengths: usize,
    /// Combinations leaving the option without weaknesses.
    pub without_weaknesses: usize,
}

/// Statement counts for one option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatementCounts {
    /// Strength statements.
    pub strengths: usize,
    /// Weakness statements.
    pub weaknesses: usize,
    /// Trade-off statements.
    pub tradeoffs: usize,
}

impl StatementCounts {
    fn add(&mut self, category: ImpactCategory) {
        match category {
            ImpactCategory::Strength => self.strengths += 1,
            ImpactCategory::Weakness => self.weaknesses += 1,
            ImpactCategory::Tradeoff => self.tradeoffs += 1,
        }
    }
}

/// Statement counts contributed by rules constraining each side of an
/// opposed pair of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpposedPair {
    /// Label of the first value.
    pub left: String,
    /// Label of the opposing value.
    pub right: String,
    /// Counts from rules requiring the first value.
    pub left_counts: Vec<(ApiOption, StatementCounts)>,
    /// Counts from rules requiring the opposing value.
    pub right_counts: Vec<(ApiOption, StatementCounts)>,
}

/// Summary of a table's behavior over the whole constraint domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainAudit {
    /// Constraint sets evaluated.
    pub combinations: usize,
    /// Coverage per rule, in table order.
    pub rules: Vec<RuleCoverage>,
    /// Exposure per option.
    pub exposure: Vec<OptionExposure>,
    /// Balance across opposed values.
    pub opposed_pairs: Vec<OpposedPair>,
}

impl DomainAudit {
    /// Rules that match no valid constraint set.
    #[must_use]
    pub fn dead_rules(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|r| r.matched_combinations == 0)
            .map(|r| r.rule_id.as_str())
            .collect()
    }

    /// Options that have no weakness under any constraint set.
    #[must_use]
    pub fn never_weak_options(&self) -> Vec<ApiOption> {
        self.exposure
            .iter()
            .filter(|e| e.without_weaknesses == self.combinations)
            .map(|e| e.option)
            .collect()
    }

    /// Options that have no strength under any constraint set.
    #[must_use]
    pub fn never_strong_options(&self) -> Vec<ApiOption> {
        self.exposure
            .iter()
            .filter(|e| e.without_strengths == self.combinations)
            .map(|e| e.option)
            .collect()
    }
}

impl fmt::Display for DomainAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} rules across {} combinations", self.rules.len(), self.combinations)?;
        let dead = self.dead_rules();
        if dead.is_empty() {
            writeln!(f, "every rule fires for at least one combination")?;
        } else {
            writeln!(f, "rules that never fire: {}", dead.join(", "))?;
        }
        for e in &self.exposure {
            writeln!(
                f,
                "{}: no strengths in {} combinations, no weaknesses in {}",
                e.option, e.without_strengths, e.without_weaknesses
            )?;
        }
        for pair in &self.opposed_pairs {
            writeln!(f, "{} vs {}", pair.left, pair.right)?;
            for ((option, left), (_, right)) in pair.left_counts.iter().zip(&pair.right_counts) {
                writeln!(
                    f,
                    "  {option}: +{}/-{}/~{} vs +{}/-{}/~{}",
                    left.strengths,
                    left.weaknesses,
                    left.tradeoffs,
                    right.strengths,
                    right.weaknesses,
                    right.tradeoffs
                )?;
            }
        }
        Ok(())
    }
}

const OPPOSED: [(Term, Term); 4] = [
    (Term::Expertise(Expertise::Beginner), Term::Expertise(Expertise::Expert)),
    (Term::Scale(Scale::Small), Term::Scale(Scale::Large)),
    (
        Term::TimeToMarket(TimeToMarket::Fast),
        Term::TimeToMarket(TimeToMarket::Balanced),
    ),
    (
        Term::RiskTolerance(RiskTolerance::Low),
        Term::RiskTolerance(RiskTolerance::High),
    ),
];

fn counts_for(table: &RuleTable, term: Term) -> Vec<(ApiOption, StatementCounts)> {
    let mut counts: HashMap<ApiOption, StatementCounts> = HashMap::new();
    for rule in table {
        if rule.when.get(term.dimension()) != Some(term) {
            continue;
        }
        for (option, category, _) in rule.statements() {
            counts.entry(option).or_default().add(category);
        }
    }
    ApiOption::ALL
        .into_iter()
        .map(|option| (option, counts.remove(&option).unwrap_or_default()))
        .collect()
}

/// Audits `table` over all valid constraint sets.
#[must_use]
pub fn audit(table: &RuleTable) -> DomainAudit {
    let mut matched: HashMap<&str, usize> = HashMap::new();
    let mut exposure: Vec<OptionExposure> = ApiOption::ALL
        .into_iter()
        .map(|option| OptionExposure {
            option,
            without_strengths: 0,
            without_weaknesses: 0,
        })
        .collect();

    let mut combinations = 0;
    for constraints in ConstraintSet::all() {
        combinations += 1;
        for rule in table {
            if rule.matches(&constraints) {
                *matched.entry(rule.id.as_str()).or_default() += 1;
            }
        }
        let result = engine::evaluate(table, &constraints);
        for entry in &mut exposure {
            let option = result.option(entry.option);
            if option.strengths.is_empty() {
                entry.without_strengths += 1;
            }
            if option.weaknesses.is_empty() {
                entry.without_weaknesses += 1;
            }
        }
    }

    let rules = table
        .iter()
        .map(|rule| RuleCoverage {
            rule_id: rule.id.clone(),
            matched_combinations: matched.get(rule.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    let opposed_pairs = OPPOSED
        .iter()
        .map(|&(left, right)| OpposedPair {
            left: trigger_phrase(left).to_string(),
            right: trigger_phrase(right).to_string(),
            left_counts: counts_for(table, left),
            right_counts: counts_for(table, right),
        })
        .collect();

    DomainAudit {
        combinations,
        rules,
        exposure,
        opposed_pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::DOMAIN_SIZE;
    use crate::rule::{Condition, DecisionRule, OptionImpact};

    #[test]
    fn builtin_rules_all_fire() {
        let report = audit(&RuleTable::builtin());
        assert_eq!(report.combinations, DOMAIN_SIZE);
        assert!(report.dead_rules().is_empty());
    }

    #[test]
    fn builtin_single_rules_match_their_share_of_the_domain() {
        let report = audit(&RuleTable::builtin());
        let coverage = |id: &str| {
            report
                .rules
                .iter()
                .find(|r| r.rule_id == id)
                .map(|r| r.matched_combinations)
                .unwrap()
        };
        assert_eq!(coverage("EXP_BEGINNER_REST"), 18);
        assert_eq!(coverage("TIME_FAST_GRPC"), 27);
        assert_eq!(coverage("COMPOUND_LARGE_BEGINNER"), 6);
        assert_eq!(coverage("COMPOUND_FAST_LOW_RISK"), 9);
    }

    #[test]
    fn builtin_no_option_is_free_of_weaknesses_or_strengths() {
        let report = audit(&RuleTable::builtin());
        assert!(report.never_weak_options().is_empty());
        assert!(report.never_strong_options().is_empty());
    }

    #[test]
    fn opposed_pairs_count_statements() {
        let report = audit(&RuleTable::builtin());
        let expertise = &report.opposed_pairs[0];
        assert_eq!(expertise.left, "Beginner expertise");
        assert_eq!(expertise.right, "Expert expertise");
        let (option, rest_beginner) = &expertise.left_counts[0];
        assert_eq!(*option, ApiOption::Rest);
        // EXP_BEGINNER_REST (2) + COMPOUND_BEGINNER_FAST (1)
        assert_eq!(rest_beginner.strengths, 3);
        assert_eq!(rest_beginner.weaknesses, 0);
    }

    #[test]
    fn statement_counts_serialize_by_category() {
        let report = audit(&RuleTable::builtin());
        let value = serde_json::to_value(&report.opposed_pairs[0].left_counts[0].1).unwrap();
        assert_eq!(value["strengths"], 3);
        assert_eq!(value["weaknesses"], 0);
        assert_eq!(value["tradeoffs"], 0);
    }

    #[test]
    fn dead_rules_are_reported() {
        let table = RuleTable::new(vec![
            DecisionRule::new("LIVE", "live")
                .when(Condition::new().scale(Scale::Small))
                .rest(OptionImpact::new().strength("s")),
        ])
        .unwrap();
        let report = audit(&table);
        assert!(report.dead_rules().is_empty());
        assert_eq!(report.never_weak_options(), ApiOption::ALL.to_vec());
        assert_eq!(report.never_strong_options(), vec![ApiOption::GraphQl, ApiOption::Grpc]);
        assert!(report.to_string().contains("every rule fires"));
    }
}
