//! Plain-text rendering of an evaluation.

use std::fmt::Write;

use crate::constraint::ConstraintSet;
use crate::insight::InsightCatalogue;
use crate::labels::format_summary;
use crate::result::{EvaluationResult, OptionResult};
use crate::rule::ImpactCategory;

const NO_STRENGTHS: &str = "No specific strengths under these constraints";
const NO_WEAKNESSES: &str = "No specific weaknesses under these constraints";
const NO_TRADEOFFS: &str = "No specific trade-offs identified";

fn heading(category: ImpactCategory) -> &'static str {
    match category {
        ImpactCategory::Strength => "Strengths",
        ImpactCategory::Weakness => "Weaknesses",
        ImpactCategory::Tradeoff => "Trade-offs",
    }
}

fn placeholder(category: ImpactCategory) -> &'static str {
    match category {
        ImpactCategory::Strength => NO_STRENGTHS,
        ImpactCategory::Weakness => NO_WEAKNESSES,
        ImpactCategory::Tradeoff => NO_TRADEOFFS,
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// The "N deterministic rules evaluated · M rules triggered" line.
#[must_use]
pub fn rules_bar(result: &EvaluationResult) -> String {
    format!(
        "{} evaluated · {} triggered by your constraints",
        plural(result.total_rules_evaluated, "deterministic rule"),
        plural(result.total_rules_triggered, "rule")
    )
}

fn render_option(out: &mut String, option: &OptionResult) {
    for category in ImpactCategory::ALL {
        let _ = writeln!(out, "  {}:", heading(category));
        let statements = option.statements(category);
        if statements.is_empty() {
            let _ = writeln!(out, "    {}", placeholder(category));
        }
        for statement in statements {
            let _ = writeln!(out, "    - {statement}");
        }
    }
    if option.triggered_rules.is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        "  Why this appeared ({}):",
        plural(option.triggered_rules.len(), "rule")
    );
    for rule in &option.triggered_rules {
        let _ = writeln!(out, "    {} [{}]", rule.id, rule.trigger_label);
        let _ = writeln!(out, "      {}", rule.description);
    }
}

/// Renders a full report for a terminal.
///
/// Layout: summary line, the selected insight, the rules bar, then one
/// section per option in presentation order.
#[must_use]
pub fn render_text(constraints: &ConstraintSet, result: &EvaluationResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format_summary(constraints));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", InsightCatalogue::builtin().select(constraints));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rules_bar(result));
    for (option, option_result) in result.options() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{option}");
        render_option(&mut out, option_result);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Expertise, RiskTolerance, Scale, TimeToMarket};
    use crate::engine::RefereeEngine;

    #[test]
    fn bar_pluralizes() {
        let mut result = EvaluationResult {
            total_rules_evaluated: 26,
            total_rules_triggered: 1,
            ..EvaluationResult::default()
        };
        assert_eq!(
            rules_bar(&result),
            "26 deterministic rules evaluated · 1 rule triggered by your constraints"
        );
        result.total_rules_triggered = 0;
        assert!(rules_bar(&result).ends_with("0 rules triggered by your constraints"));
    }

    #[test]
    fn report_contains_sections_and_trace() {
        let set = ConstraintSet::new(
            Expertise::Beginner,
            Scale::Small,
            TimeToMarket::Fast,
            RiskTolerance::Low,
        );
        let result = RefereeEngine::builtin().evaluate(&set);
        let text = render_text(&set, &result);
        assert!(text.starts_with("Beginner team · Small scale · Fast delivery · Low risk\n"));
        assert!(text.contains("\nREST\n"));
        assert!(text.contains("\nGraphQL\n"));
        assert!(text.contains("\ngRPC\n"));
        assert!(text.contains("COMPOUND_BEGINNER_FAST [Beginner expertise + Fast delivery]"));
        // REST has no weaknesses for this combination
        assert!(text.contains(NO_WEAKNESSES));
    }

    #[test]
    fn empty_option_gets_placeholders_and_no_trace() {
        let mut out = String::new();
        render_option(&mut out, &OptionResult::default());
        assert!(out.contains(NO_STRENGTHS));
        assert!(out.contains(NO_WEAKNESSES));
        assert!(out.contains(NO_TRADEOFFS));
        assert!(!out.contains("Why this appeared"));
    }
}
