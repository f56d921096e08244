//! Observational insights.
//!
//! An insight is a short paragraph describing where risk accumulates under a
//! constraint set. It never names a preferred option. Each entry records its
//! specificity (number of constrained dimensions) when authored; the
//! catalogue is sorted by it once at construction and [`InsightCatalogue::select`]
//! returns the first, i.e. most specific, match.

use std::cmp::Reverse;
use std::sync::OnceLock;

use crate::constraint::{ConstraintSet, Expertise, RiskTolerance, Scale, TimeToMarket};
use crate::rule::Condition;

/// Text returned when no insight matches.
pub const FALLBACK_INSIGHT: &str = "Observe how your selected constraints shape the trade-offs across all three options, without determining a single correct answer.";

static BUILTIN: OnceLock<InsightCatalogue> = OnceLock::new();

/// A single insight entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    /// Stable identifier.
    pub id: String,
    /// When the insight applies.
    pub condition: Condition,
    /// Number of constrained dimensions, fixed at authoring time.
    pub specificity: usize,
    /// Insight text.
    pub text: String,
}

impl Insight {
    /// Creates an insight; specificity is taken from the condition.
    #[must_use]
    pub fn new(id: impl Into<String>, condition: Condition, text: impl Into<String>) -> Self {
        let specificity = condition.specificity();
        Self {
            id: id.into(),
            condition,
            specificity,
            text: text.into(),
        }
    }
}

/// Insights ordered from most to least specific.
#[derive(Debug, Clone, Default)]
pub struct InsightCatalogue {
    entries: Vec<Insight>,
}

impl InsightCatalogue {
    /// Builds a catalogue. Entries of equal specificity keep authoring order.
    #[must_use]
    pub fn new(mut entries: Vec<Insight>) -> Self {
        entries.sort_by_key(|insight| Reverse(insight.specificity));
        Self { entries }
    }

    /// The built-in catalogue.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| Self::new(builtin_insights()))
    }

    /// Entries in selection order.
    #[must_use]
    pub fn entries(&self) -> &[Insight] {
        &self.entries
    }

    /// Every matching insight, most specific first.
    pub fn matching(&self, constraints: &ConstraintSet) -> impl Iterator<Item = &Insight> + '_ {
        let constraints = *constraints;
        self.entries
            .iter()
            .filter(move |insight| insight.condition.matches(&constraints))
    }

    /// The most specific matching insight.
    #[must_use]
    pub fn best_match(&self, constraints: &ConstraintSet) -> Option<&Insight> {
        self.matching(constraints).next()
    }

    /// Text of the most specific matching insight, or [`FALLBACK_INSIGHT`].
    #[must_use]
    pub fn select(&self, constraints: &ConstraintSet) -> &str {
        self.best_match(constraints)
            .map_or(FALLBACK_INSIGHT, |insight| insight.text.as_str())
    }
}

const ACCUMULATING: &str =
    "Under these constraints, certain options begin accumulating operational risk without immediately failing.";

fn builtin_insights() -> Vec<Insight> {
    vec![
        Insight::new(
            "SCALE_LARGE",
            Condition::new().scale(Scale::Large),
            format!("{ACCUMULATING} Large scale amplifies performance differences and exposes infrastructure limits that remain invisible at smaller volumes."),
        ),
        Insight::new(
            "SCALE_SMALL",
            Condition::new().scale(Scale::Small),
            "At small scale, infrastructure overhead and learning curves dominate the risk profile. Performance differences between options may not materialize until scale increases.",
        ),
        Insight::new(
            "EXPERTISE_BEGINNER",
            Condition::new().expertise(Expertise::Beginner),
            format!("{ACCUMULATING} Beginner expertise increases the likelihood of misconfiguration and extends debugging timelines for complex architectures."),
        ),
        Insight::new(
            "EXPERTISE_EXPERT",
            Condition::new().expertise(Expertise::Expert),
            "Expert teams can absorb complexity that would overwhelm less experienced teams. However, this trades simplicity for operational control, a trade-off that compounds over time.",
        ),
        Insight::new(
            "TIME_FAST",
            Condition::new().time_to_market(TimeToMarket::Fast),
            "Fast delivery pressure reduces tolerance for learning curves and schema complexity. Decisions made under time pressure may require refactoring once constraints relax.",
        ),
        Insight::new(
            "TIME_BALANCED",
            Condition::new().time_to_market(TimeToMarket::Balanced),
            "Balanced timelines reveal long-term trade-offs that fast delivery would obscure. Schema-first approaches and custom infrastructure become viable options.",
        ),
        Insight::new(
            "RISK_LOW",
            Condition::new().risk_tolerance(RiskTolerance::Low),
            "Low risk tolerance narrows viable options toward mature, well-documented patterns. This reduces operational surprise but may limit performance optimization.",
        ),
        Insight::new(
            "RISK_HIGH",
            Condition::new().risk_tolerance(RiskTolerance::High),
            "High risk tolerance enables aggressive optimization but accepts operational uncertainty. Performance gains may come at the cost of debugging complexity.",
        ),
        Insight::new(
            "COMPOUND_LARGE_BEGINNER",
            Condition::new().scale(Scale::Large).expertise(Expertise::Beginner),
            format!("{ACCUMULATING} Large scale with beginner expertise creates compounding pressure: infrastructure limits require operational knowledge to navigate safely."),
        ),
        Insight::new(
            "COMPOUND_LARGE_EXPERT",
            Condition::new().scale(Scale::Large).expertise(Expertise::Expert),
            "Expert teams at large scale can optimize aggressively, but this trades simplicity for operational control. Capacity planning and infrastructure management become ongoing responsibilities.",
        ),
        Insight::new(
            "COMPOUND_FAST_LOW_RISK",
            Condition::new()
                .time_to_market(TimeToMarket::Fast)
                .risk_tolerance(RiskTolerance::Low),
            "Fast delivery with low risk tolerance creates strong pressure toward familiar patterns. This combination narrows viable options significantly without declaring a winner.",
        ),
        Insight::new(
            "COMPOUND_BEGINNER_FAST",
            Condition::new()
                .expertise(Expertise::Beginner)
                .time_to_market(TimeToMarket::Fast),
            format!("{ACCUMULATING} Beginner teams under time pressure face compounding constraints: learning curves become delivery risks."),
        ),
    ]
}
