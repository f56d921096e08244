//! Human-readable labels for constraint values.
//!
//! Two independent label tables exist: trigger phrases name the condition a
//! rule fired on ("Large scale + Beginner expertise"), summary tokens describe
//! a whole constraint set ("Beginner team · Large scale · ..."). Both are
//! exhaustive matches over [`Term`], so every reachable value has a label.

use crate::constraint::{
    ConstraintSet, Dimension, Expertise, RiskTolerance, Scale, Term, TimeToMarket,
};
use crate::rule::Condition;

/// Separator between trigger phrases.
pub const TRIGGER_SEPARATOR: &str = " + ";

/// Separator between summary tokens.
pub const SUMMARY_SEPARATOR: &str = " · ";

/// Phrase used in trigger labels for a single term.
#[must_use]
pub const fn trigger_phrase(term: Term) -> &'static str {
    match term {
        Term::Expertise(Expertise::Beginner) => "Beginner expertise",
        Term::Expertise(Expertise::Intermediate) => "Intermediate expertise",
        Term::Expertise(Expertise::Expert) => "Expert expertise",
        Term::Scale(Scale::Small) => "Small scale",
        Term::Scale(Scale::Medium) => "Medium scale",
        Term::Scale(Scale::Large) => "Large scale",
        Term::TimeToMarket(TimeToMarket::Fast) => "Fast delivery",
        Term::TimeToMarket(TimeToMarket::Balanced) => "Balanced delivery",
        Term::RiskTolerance(RiskTolerance::Low) => "Low risk tolerance",
        Term::RiskTolerance(RiskTolerance::Medium) => "Medium risk tolerance",
        Term::RiskTolerance(RiskTolerance::High) => "High risk tolerance",
    }
}

/// Joins the trigger phrases of a condition in declaration order.
///
/// An unconstrained condition yields an empty label.
#[must_use]
pub fn format_trigger_label(condition: &Condition) -> String {
    condition
        .terms()
        .iter()
        .map(|term| trigger_phrase(*term))
        .collect::<Vec<_>>()
        .join(TRIGGER_SEPARATOR)
}

/// Token used in summaries for a single term.
#[must_use]
pub const fn summary_token(term: Term) -> &'static str {
    match term {
        Term::Expertise(Expertise::Beginner) => "Beginner team",
        Term::Expertise(Expertise::Intermediate) => "Intermediate team",
        Term::Expertise(Expertise::Expert) => "Expert team",
        Term::Scale(Scale::Small) => "Small scale",
        Term::Scale(Scale::Medium) => "Medium scale",
        Term::Scale(Scale::Large) => "Large scale",
        Term::TimeToMarket(TimeToMarket::Fast) => "Fast delivery",
        Term::TimeToMarket(TimeToMarket::Balanced) => "Balanced delivery",
        Term::RiskTolerance(RiskTolerance::Low) => "Low risk",
        Term::RiskTolerance(RiskTolerance::Medium) => "Medium risk",
        Term::RiskTolerance(RiskTolerance::High) => "High risk",
    }
}

/// Formats a constraint set as a one-line summary.
///
/// ```
/// use referee::{format_summary, ConstraintSet, Expertise, RiskTolerance, Scale, TimeToMarket};
///
/// let set = ConstraintSet::new(
///     Expertise::Beginner,
///     Scale::Large,
///     TimeToMarket::Fast,
///     RiskTolerance::Low,
/// );
/// assert_eq!(
///     format_summary(&set),
///     "Beginner team · Large scale · Fast delivery · Low risk"
/// );
/// ```
#[must_use]
pub fn format_summary(constraints: &ConstraintSet) -> String {
    Dimension::ALL
        .map(|dimension| summary_token(constraints.term(dimension)))
        .join(SUMMARY_SEPARATOR)
}
