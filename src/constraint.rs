//! The constraint model.
//!
//! A decision context is described along four independent dimensions, each
//! drawn from a closed enumeration. Candidate input (from JSON, a form, or the
//! command line) is validated and then frozen into a [`ConstraintSet`], an
//! immutable `Copy` value that the evaluation engine consumes.
//!
//! # Examples
//!
//! ```
//! use referee::{CandidateConstraints, Dimension, Expertise};
//!
//! let candidate = CandidateConstraints::new()
//!     .with(Dimension::Expertise, "beginner")
//!     .with(Dimension::Scale, "large")
//!     .with(Dimension::TimeToMarket, "fast")
//!     .with(Dimension::RiskTolerance, "low");
//!
//! assert!(candidate.validate());
//! let frozen = candidate.freeze().unwrap();
//! assert_eq!(frozen.expertise(), Expertise::Beginner);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of distinct valid constraint sets (3 × 3 × 2 × 3).
pub const DOMAIN_SIZE: usize = 54;

/// One of the four constraint axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dimension {
    /// Team expertise.
    #[serde(rename = "expertise")]
    Expertise,
    /// Expected scale.
    #[serde(rename = "scale")]
    Scale,
    /// Time-to-market pressure.
    #[serde(rename = "timeToMarket")]
    TimeToMarket,
    /// Risk tolerance.
    #[serde(rename = "riskTolerance")]
    RiskTolerance,
}

impl Dimension {
    /// All dimensions in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Expertise,
        Self::Scale,
        Self::TimeToMarket,
        Self::RiskTolerance,
    ];

    /// Wire spelling of the dimension key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expertise => "expertise",
            Self::Scale => "scale",
            Self::TimeToMarket => "timeToMarket",
            Self::RiskTolerance => "riskTolerance",
        }
    }

    /// Wire spellings of every value this dimension accepts.
    #[must_use]
    pub fn values(self) -> Vec<&'static str> {
        match self {
            Self::Expertise => Expertise::ALL.iter().map(|v| v.as_str()).collect(),
            Self::Scale => Scale::ALL.iter().map(|v| v.as_str()).collect(),
            Self::TimeToMarket => TimeToMarket::ALL.iter().map(|v| v.as_str()).collect(),
            Self::RiskTolerance => RiskTolerance::ALL.iter().map(|v| v.as_str()).collect(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown constraint dimension '{s}'"))
    }
}

macro_rules! constraint_enum {
    (
        $(#[$meta:meta])*
        $name:ident => $dimension:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant, )+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The dimension these values belong to.
            pub const DIMENSION: Dimension = Dimension::$dimension;

            /// Wire spelling of the value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ValidationError::UnknownValue {
                        dimension: Dimension::$dimension,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for Term {
            fn from(value: $name) -> Self {
                Term::$dimension(value)
            }
        }
    };
}

constraint_enum! {
    /// How experienced the team is.
    Expertise => Expertise {
        /// Limited experience with API architecture.
        Beginner = "beginner",
        /// Working familiarity.
        Intermediate = "intermediate",
        /// Deep experience.
        Expert = "expert",
    }
}

constraint_enum! {
    /// Expected traffic and service scale.
    Scale => Scale {
        /// Small scale.
        Small = "small",
        /// Medium scale.
        Medium = "medium",
        /// Large scale.
        Large = "large",
    }
}

constraint_enum! {
    /// Delivery pressure.
    TimeToMarket => TimeToMarket {
        /// Tight timeline.
        Fast = "fast",
        /// Balanced timeline.
        Balanced = "balanced",
    }
}

constraint_enum! {
    /// Appetite for operational risk.
    RiskTolerance => RiskTolerance {
        /// Low risk tolerance.
        Low = "low",
        /// Medium risk tolerance.
        Medium = "medium",
        /// High risk tolerance.
        High = "high",
    }
}

/// A single `(dimension, value)` pair.
///
/// Rule conditions are ordered lists of terms; a term is satisfied when the
/// constraint set carries the same value for its dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Term {
    /// Expertise term.
    Expertise(Expertise),
    /// Scale term.
    Scale(Scale),
    /// Time-to-market term.
    TimeToMarket(TimeToMarket),
    /// Risk tolerance term.
    RiskTolerance(RiskTolerance),
}

impl Term {
    /// Parses a term from wire spellings.
    pub fn parse(dimension: Dimension, value: &str) -> Result<Self, ValidationError> {
        Ok(match dimension {
            Dimension::Expertise => Self::Expertise(value.parse()?),
            Dimension::Scale => Self::Scale(value.parse()?),
            Dimension::TimeToMarket => Self::TimeToMarket(value.parse()?),
            Dimension::RiskTolerance => Self::RiskTolerance(value.parse()?),
        })
    }

    /// The dimension this term constrains.
    #[must_use]
    pub const fn dimension(self) -> Dimension {
        match self {
            Self::Expertise(_) => Dimension::Expertise,
            Self::Scale(_) => Dimension::Scale,
            Self::TimeToMarket(_) => Dimension::TimeToMarket,
            Self::RiskTolerance(_) => Dimension::RiskTolerance,
        }
    }

    /// Wire spelling of the value.
    #[must_use]
    pub const fn value_str(self) -> &'static str {
        match self {
            Self::Expertise(v) => v.as_str(),
            Self::Scale(v) => v.as_str(),
            Self::TimeToMarket(v) => v.as_str(),
            Self::RiskTolerance(v) => v.as_str(),
        }
    }

    /// Returns true if `constraints` carries this term's value.
    #[must_use]
    pub fn is_satisfied_by(self, constraints: &ConstraintSet) -> bool {
        constraints.term(self.dimension()) == self
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.dimension(), self.value_str())
    }
}

/// A complete, validated, immutable set of constraints.
///
/// Fields are private; `with_*` methods return a modified copy and leave the
/// original untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSet {
    expertise: Expertise,
    scale: Scale,
    time_to_market: TimeToMarket,
    risk_tolerance: RiskTolerance,
}

impl ConstraintSet {
    /// Creates a constraint set from typed values.
    #[must_use]
    pub const fn new(
        expertise: Expertise,
        scale: Scale,
        time_to_market: TimeToMarket,
        risk_tolerance: RiskTolerance,
    ) -> Self {
        Self {
            expertise,
            scale,
            time_to_market,
            risk_tolerance,
        }
    }

    /// Team expertise.
    #[must_use]
    pub const fn expertise(&self) -> Expertise {
        self.expertise
    }

    /// Expected scale.
    #[must_use]
    pub const fn scale(&self) -> Scale {
        self.scale
    }

    /// Time-to-market pressure.
    #[must_use]
    pub const fn time_to_market(&self) -> TimeToMarket {
        self.time_to_market
    }

    /// Risk tolerance.
    #[must_use]
    pub const fn risk_tolerance(&self) -> RiskTolerance {
        self.risk_tolerance
    }

    /// Returns a copy with a different expertise.
    #[must_use]
    pub const fn with_expertise(self, expertise: Expertise) -> Self {
        Self { expertise, ..self }
    }

    /// Returns a copy with a different scale.
    #[must_use]
    pub const fn with_scale(self, scale: Scale) -> Self {
        Self { scale, ..self }
    }

    /// Returns a copy with a different time-to-market.
    #[must_use]
    pub const fn with_time_to_market(self, time_to_market: TimeToMarket) -> Self {
        Self {
            time_to_market,
            ..self
        }
    }

    /// Returns a copy with a different risk tolerance.
    #[must_use]
    pub const fn with_risk_tolerance(self, risk_tolerance: RiskTolerance) -> Self {
        Self {
            risk_tolerance,
            ..self
        }
    }

    /// Returns a copy with `term` applied.
    #[must_use]
    pub const fn with_term(self, term: Term) -> Self {
        match term {
            Term::Expertise(v) => self.with_expertise(v),
            Term::Scale(v) => self.with_scale(v),
            Term::TimeToMarket(v) => self.with_time_to_market(v),
            Term::RiskTolerance(v) => self.with_risk_tolerance(v),
        }
    }

    /// The term this set carries for `dimension`.
    #[must_use]
    pub const fn term(&self, dimension: Dimension) -> Term {
        match dimension {
            Dimension::Expertise => Term::Expertise(self.expertise),
            Dimension::Scale => Term::Scale(self.scale),
            Dimension::TimeToMarket => Term::TimeToMarket(self.time_to_market),
            Dimension::RiskTolerance => Term::RiskTolerance(self.risk_tolerance),
        }
    }

    /// Wire spelling of the value for `dimension`.
    #[must_use]
    pub const fn get(&self, dimension: Dimension) -> &'static str {
        self.term(dimension).value_str()
    }

    /// Every valid constraint set, in a fixed order.
    ///
    /// Expertise varies slowest and risk tolerance fastest.
    pub fn all() -> impl Iterator<Item = Self> {
        Expertise::ALL.iter().flat_map(|&e| {
            Scale::ALL.iter().flat_map(move |&s| {
                TimeToMarket::ALL
                    .iter()
                    .flat_map(move |&t| RiskTolerance::ALL.iter().map(move |&r| Self::new(e, s, t, r)))
            })
        })
    }
}

impl fmt::Display for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{expertise: {}, scale: {}, timeToMarket: {}, riskTolerance: {}}}",
            self.expertise, self.scale, self.time_to_market, self.risk_tolerance
        )
    }
}

/// An unvalidated, possibly incomplete set of constraints.
///
/// This mirrors what a form or a JSON body delivers: any dimension may be
/// absent and any value may be outside its enumeration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateConstraints {
    /// Raw expertise value.
    pub expertise: Option<String>,
    /// Raw scale value.
    pub scale: Option<String>,
    /// Raw time-to-market value.
    pub time_to_market: Option<String>,
    /// Raw risk tolerance value.
    pub risk_tolerance: Option<String>,
}

impl CandidateConstraints {
    /// Creates an empty candidate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the raw value for a dimension.
    #[must_use]
    pub fn with(mut self, dimension: Dimension, value: impl Into<String>) -> Self {
        *self.slot_mut(dimension) = Some(value.into());
        self
    }

    /// Clears the value for a dimension.
    #[must_use]
    pub fn without(mut self, dimension: Dimension) -> Self {
        *self.slot_mut(dimension) = None;
        self
    }

    /// Raw value for a dimension, if present.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Expertise => self.expertise.as_deref(),
            Dimension::Scale => self.scale.as_deref(),
            Dimension::TimeToMarket => self.time_to_market.as_deref(),
            Dimension::RiskTolerance => self.risk_tolerance.as_deref(),
        }
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<String> {
        match dimension {
            Dimension::Expertise => &mut self.expertise,
            Dimension::Scale => &mut self.scale,
            Dimension::TimeToMarket => &mut self.time_to_market,
            Dimension::RiskTolerance => &mut self.risk_tolerance,
        }
    }

    /// Reads a candidate out of an arbitrary JSON value.
    ///
    /// Only a JSON object is accepted. Keys other than the four dimensions are
    /// ignored; `null` counts as absent; non-string values are kept in their
    /// JSON spelling so that they fail membership checks later.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, ValidationError> {
        let object = value.as_object().ok_or(ValidationError::NotARecord)?;
        let mut candidate = Self::new();
        for dimension in Dimension::ALL {
            let raw = match object.get(dimension.as_str()) {
                None | Some(serde_json::Value::Null) => None,
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(other) => Some(other.to_string()),
            };
            *candidate.slot_mut(dimension) = raw;
        }
        Ok(candidate)
    }

    /// Parses a JSON document and reads a candidate out of it.
    ///
    /// Text that is not JSON is rejected as [`ValidationError::Malformed`].
    pub fn from_json_str(json: &str) -> Result<Self, ValidationError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ValidationError::Malformed {
                message: e.to_string(),
            })?;
        Self::from_json(&value)
    }

    /// Returns true if every dimension has a value (valid or not).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Dimension::ALL.into_iter().all(|d| self.get(d).is_some())
    }

    /// Checks the candidate, reporting the first failing dimension.
    pub fn check(&self) -> Result<(), ValidationError> {
        self.freeze().map(|_| ())
    }

    /// Returns true iff all four dimensions are present with valid values.
    #[must_use]
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Produces the immutable constraint set.
    ///
    /// Dimensions are checked in declaration order; the candidate itself is
    /// never modified.
    pub fn freeze(&self) -> Result<ConstraintSet, ValidationError> {
        Ok(ConstraintSet::new(
            self.required(Dimension::Expertise)?.parse()?,
            self.required(Dimension::Scale)?.parse()?,
            self.required(Dimension::TimeToMarket)?.parse()?,
            self.required(Dimension::RiskTolerance)?.parse()?,
        ))
    }

    fn required(&self, dimension: Dimension) -> Result<&str, ValidationError> {
        self.get(dimension)
            .ok_or(ValidationError::MissingDimension { dimension })
    }
}

impl From<ConstraintSet> for CandidateConstraints {
    fn from(set: ConstraintSet) -> Self {
        Dimension::ALL
            .into_iter()
            .fold(Self::new(), |candidate, d| candidate.with(d, set.get(d)))
    }
}

/// Returns true iff `candidate` is a JSON record with all four dimensions
/// holding valid values.
#[must_use]
pub fn validate(candidate: &serde_json::Value) -> bool {
    freeze(candidate).is_ok()
}

/// Freezes a JSON candidate into an immutable [`ConstraintSet`].
pub fn freeze(candidate: &serde_json::Value) -> Result<ConstraintSet, ValidationError> {
    CandidateConstraints::from_json(candidate)?.freeze()
}
