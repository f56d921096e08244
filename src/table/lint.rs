//! Directive-language lint.
//!
//! Rule text describes consequences conditionally ("may", "can", "under these
//! constraints"); it never tells the reader what to pick. This lint flags
//! vocabulary that reads as a verdict or a recommendation. It is an authoring
//! aid and is never consulted during evaluation.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::rule::{ApiOption, DecisionRule, ImpactCategory};

const DIRECTIVE_PATTERN: &str =
    r"(?i)\b(should|must|best|optimal|always|never|choose|prefer|recommend(?:s|ed|ation|ations)?)\b";

static DIRECTIVE: OnceLock<Regex> = OnceLock::new();

fn directive_regex() -> &'static Regex {
    DIRECTIVE.get_or_init(|| Regex::new(DIRECTIVE_PATTERN).expect("directive pattern compiles"))
}

/// Where a finding was located inside a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementLocation {
    /// The rule description.
    Description,
    /// An impact statement.
    Statement {
        /// Option the statement belongs to.
        option: ApiOption,
        /// Category of the statement.
        category: ImpactCategory,
    },
}

impl fmt::Display for StatementLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => f.write_str("description"),
            Self::Statement { option, category } => write!(f, "{option} {category}"),
        }
    }
}

/// A directive word found in rule text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFinding {
    /// Rule containing the text.
    pub rule_id: String,
    /// Location within the rule.
    pub location: StatementLocation,
    /// The offending word as written.
    pub word: String,
    /// The full text that was scanned.
    pub text: String,
}

impl fmt::Display for LanguageFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): directive word '{}' in \"{}\"",
            self.rule_id, self.location, self.word, self.text
        )
    }
}

fn scan(rule_id: &str, location: StatementLocation, text: &str) -> Option<LanguageFinding> {
    directive_regex().find(text).map(|m| LanguageFinding {
        rule_id: rule_id.to_string(),
        location,
        word: m.as_str().to_string(),
        text: text.to_string(),
    })
}

/// Lints one rule; at most one finding per scanned text.
#[must_use]
pub fn lint_rule(rule: &DecisionRule) -> Vec<LanguageFinding> {
    let mut findings: Vec<LanguageFinding> =
        scan(&rule.id, StatementLocation::Description, &rule.description)
            .into_iter()
            .collect();
    findings.extend(rule.statements().filter_map(|(option, category, text)| {
        scan(&rule.id, StatementLocation::Statement { option, category }, text)
    }));
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::OptionImpact;

    #[test]
    fn flags_directive_words() {
        let rule = DecisionRule::new("R", "Teams Should start simple")
            .graphql(OptionImpact::new().weakness("This is never a good fit").strength("May help"));
        let findings = lint_rule(&rule);
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].location, StatementLocation::Description);
        assert_eq!(findings[0].word, "Should");
        assert_eq!(
            findings[1].location,
            StatementLocation::Statement {
                option: ApiOption::GraphQl,
                category: ImpactCategory::Weakness
            }
        );
        assert!(findings[1].to_string().contains("GraphQL weakness"));
    }

    #[test]
    fn ignores_words_that_only_contain_directives() {
        let rule = DecisionRule::new("R", "Mustard preference and bestowed shoulders")
            .rest(OptionImpact::new().tradeoff("Preferably conditional"));
        assert!(lint_rule(&rule).is_empty());
    }

    #[test]
    fn conditional_language_passes() {
        let rule = DecisionRule::new("R", "Large scale amplifies GraphQL benefits and risks")
            .graphql(OptionImpact::new().strength(
                "At large scale, client-specified queries can reduce payload sizes significantly",
            ));
        assert!(lint_rule(&rule).is_empty());
    }
}
