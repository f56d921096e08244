//! Decision rule types.
//!
//! A rule pairs a partial constraint pattern ([`Condition`]) with textual
//! impacts on one or more API options. Rules are plain data: they carry no
//! scores, weights, or behavior of their own.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constraint::{
    ConstraintSet, Dimension, Expertise, RiskTolerance, Scale, Term, TimeToMarket,
};

/// The API architecture styles under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiOption {
    /// REST over HTTP.
    Rest,
    /// GraphQL.
    GraphQl,
    /// gRPC.
    Grpc,
}

impl ApiOption {
    /// All options in presentation order.
    pub const ALL: [Self; 3] = [Self::Rest, Self::GraphQl, Self::Grpc];

    /// Stable lowercase key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::GraphQl => "graphql",
            Self::Grpc => "grpc",
        }
    }

    /// Conventional display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Rest => "REST",
            Self::GraphQl => "GraphQL",
            Self::Grpc => "gRPC",
        }
    }
}

impl fmt::Display for ApiOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Classification of an impact statement. Never a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImpactCategory {
    /// A strength of the option under the constraints.
    #[serde(rename = "strength")]
    Strength,
    /// A weakness of the option under the constraints.
    #[serde(rename = "weakness")]
    Weakness,
    /// A trade-off the option implies.
    #[serde(rename = "trade-off")]
    Tradeoff,
}

impl ImpactCategory {
    /// All categories in presentation order.
    pub const ALL: [Self; 3] = [Self::Strength, Self::Weakness, Self::Tradeoff];

    /// Stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Weakness => "weakness",
            Self::Tradeoff => "trade-off",
        }
    }
}

impl fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Statements a rule contributes to a single option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionImpact {
    /// Strength statements, in authoring order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<String>,
    /// Weakness statements, in authoring order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub weaknesses: Vec<String>,
    /// Trade-off statements, in authoring order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tradeoffs: Vec<String>,
}

impl OptionImpact {
    /// Creates an empty impact.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a strength.
    #[must_use]
    pub fn strength(mut self, text: impl Into<String>) -> Self {
        self.strengths.push(text.into());
        self
    }

    /// Appends a weakness.
    #[must_use]
    pub fn weakness(mut self, text: impl Into<String>) -> Self {
        self.weaknesses.push(text.into());
        self
    }

    /// Appends a trade-off.
    #[must_use]
    pub fn tradeoff(mut self, text: impl Into<String>) -> Self {
        self.tradeoffs.push(text.into());
        self
    }

    /// Statements for one category.
    #[must_use]
    pub fn statements(&self, category: ImpactCategory) -> &[String] {
        match category {
            ImpactCategory::Strength => &self.strengths,
            ImpactCategory::Weakness => &self.weaknesses,
            ImpactCategory::Tradeoff => &self.tradeoffs,
        }
    }

    /// Categories with at least one statement, in presentation order.
    #[must_use]
    pub fn contributed_categories(&self) -> Vec<ImpactCategory> {
        ImpactCategory::ALL
            .into_iter()
            .filter(|c| !self.statements(*c).is_empty())
            .collect()
    }

    /// Returns true if no category has statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.weaknesses.is_empty() && self.tradeoffs.is_empty()
    }

    /// All statements with their category.
    pub fn iter(&self) -> impl Iterator<Item = (ImpactCategory, &str)> {
        ImpactCategory::ALL.into_iter().flat_map(move |category| {
            self.statements(category)
                .iter()
                .map(move |text| (category, text.as_str()))
        })
    }
}

/// Per-option impacts of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuleImpacts {
    /// Impact on REST.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest: Option<OptionImpact>,
    /// Impact on GraphQL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql: Option<OptionImpact>,
    /// Impact on gRPC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc: Option<OptionImpact>,
}

impl RuleImpacts {
    /// Impact on `option`, if the rule defines one.
    #[must_use]
    pub fn get(&self, option: ApiOption) -> Option<&OptionImpact> {
        match option {
            ApiOption::Rest => self.rest.as_ref(),
            ApiOption::GraphQl => self.graphql.as_ref(),
            ApiOption::Grpc => self.grpc.as_ref(),
        }
    }

    fn slot_mut(&mut self, option: ApiOption) -> &mut Option<OptionImpact> {
        match option {
            ApiOption::Rest => &mut self.rest,
            ApiOption::GraphQl => &mut self.graphql,
            ApiOption::Grpc => &mut self.grpc,
        }
    }

    /// Defined impacts in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (ApiOption, &OptionImpact)> {
        ApiOption::ALL
            .into_iter()
            .filter_map(move |option| self.get(option).map(|impact| (option, impact)))
    }

    /// Options that carry an impact object.
    #[must_use]
    pub fn affected_options(&self) -> Vec<ApiOption> {
        self.iter().map(|(option, _)| option).collect()
    }
}

/// A partial constraint pattern.
///
/// Terms keep the order in which they were declared; that order drives
/// trigger labels. Dimensions absent from the condition are wildcards, so
/// an empty condition matches every constraint set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Condition {
    terms: Vec<Term>,
}

impl Condition {
    /// Creates an unconstrained condition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a term.
    ///
    /// Replacing keeps the original declaration position.
    #[must_use]
    pub fn with(mut self, term: impl Into<Term>) -> Self {
        let term = term.into();
        match self
            .terms
            .iter_mut()
            .find(|t| t.dimension() == term.dimension())
        {
            Some(existing) => *existing = term,
            None => self.terms.push(term),
        }
        self
    }

    /// Requires an expertise value.
    #[must_use]
    pub fn expertise(self, value: Expertise) -> Self {
        self.with(value)
    }

    /// Requires a scale value.
    #[must_use]
    pub fn scale(self, value: Scale) -> Self {
        self.with(value)
    }

    /// Requires a time-to-market value.
    #[must_use]
    pub fn time_to_market(self, value: TimeToMarket) -> Self {
        self.with(value)
    }

    /// Requires a risk tolerance value.
    #[must_use]
    pub fn risk_tolerance(self, value: RiskTolerance) -> Self {
        self.with(value)
    }

    /// Builds a condition from raw terms, keeping duplicates.
    ///
    /// Used by deserialization so that table validation can report them.
    #[must_use]
    pub fn from_terms(terms: Vec<Term>) -> Self {
        Self { terms }
    }

    /// Terms in declaration order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of constrained dimensions.
    #[must_use]
    pub fn specificity(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no dimension is constrained.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.terms.is_empty()
    }

    /// Required value for `dimension`, if constrained.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> Option<Term> {
        self.terms.iter().copied().find(|t| t.dimension() == dimension)
    }

    /// First dimension that appears more than once, if any.
    #[must_use]
    pub fn duplicate_dimension(&self) -> Option<Dimension> {
        self.terms.iter().enumerate().find_map(|(i, term)| {
            self.terms[..i]
                .iter()
                .any(|earlier| earlier.dimension() == term.dimension())
                .then(|| term.dimension())
        })
    }

    /// Returns true if every constrained dimension equals the set's value.
    #[must_use]
    pub fn matches(&self, constraints: &ConstraintSet) -> bool {
        self.terms.iter().all(|term| term.is_satisfied_by(constraints))
    }
}

impl Serialize for Condition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.terms.len()))?;
        for term in &self.terms {
            map.serialize_entry(term.dimension().as_str(), term.value_str())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConditionVisitor;

        impl<'de> Visitor<'de> for ConditionVisitor {
            type Value = Condition;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from constraint dimensions to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Condition, A::Error> {
                let mut terms = Vec::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    let dimension: Dimension = key
                        .parse()
                        .map_err(<A::Error as serde::de::Error>::custom)?;
                    let term = Term::parse(dimension, &value)
                        .map_err(<A::Error as serde::de::Error>::custom)?;
                    terms.push(term);
                }
                Ok(Condition::from_terms(terms))
            }
        }

        deserializer.deserialize_map(ConditionVisitor)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("*");
        }
        let parts: Vec<String> = self.terms.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join(" & "))
    }
}

/// A static, authored decision rule.
///
/// # Examples
///
/// ```
/// use referee::{Condition, DecisionRule, Expertise, OptionImpact};
///
/// let rule = DecisionRule::new("EXP_BEGINNER_REST", "Beginner teams benefit from REST's familiar patterns")
///     .when(Condition::new().expertise(Expertise::Beginner))
///     .rest(OptionImpact::new().strength("Familiar HTTP patterns may reduce onboarding friction"));
///
/// assert_eq!(rule.when.specificity(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecisionRule {
    /// Stable identifier used for tracing and deduplication.
    pub id: String,
    /// Human-readable rationale.
    pub description: String,
    /// Trigger condition.
    #[serde(default)]
    pub when: Condition,
    /// Per-option impacts.
    #[serde(default)]
    pub impacts: RuleImpacts,
}

impl DecisionRule {
    /// Creates an unconstrained rule without impacts.
    #[must_use]
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            when: Condition::new(),
            impacts: RuleImpacts::default(),
        }
    }

    /// Sets the trigger condition.
    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.when = condition;
        self
    }

    /// Sets the impact on one option.
    #[must_use]
    pub fn impact(mut self, option: ApiOption, impact: OptionImpact) -> Self {
        *self.impacts.slot_mut(option) = Some(impact);
        self
    }

    /// Sets the impact on REST.
    #[must_use]
    pub fn rest(self, impact: OptionImpact) -> Self {
        self.impact(ApiOption::Rest, impact)
    }

    /// Sets the impact on GraphQL.
    #[must_use]
    pub fn graphql(self, impact: OptionImpact) -> Self {
        self.impact(ApiOption::GraphQl, impact)
    }

    /// Sets the impact on gRPC.
    #[must_use]
    pub fn grpc(self, impact: OptionImpact) -> Self {
        self.impact(ApiOption::Grpc, impact)
    }

    /// Returns true if the rule applies to `constraints`.
    #[must_use]
    pub fn matches(&self, constraints: &ConstraintSet) -> bool {
        self.when.matches(constraints)
    }

    /// Every statement of the rule with its option and category.
    pub fn statements(&self) -> impl Iterator<Item = (ApiOption, ImpactCategory, &str)> {
        self.impacts.iter().flat_map(|(option, impact)| {
            impact
                .iter()
                .map(move |(category, text)| (option, category, text))
        })
    }
}
