//! # Decision Referee
//!
//! A deterministic rule engine that compares three API architecture styles
//! (REST, GraphQL, gRPC) under four project constraints. It never picks a
//! winner: every matched rule contributes strengths, weaknesses, or
//! trade-offs to one or more options, and every statement is traceable to
//! the rule that produced it.
//!
//! ## Core Concepts
//!
//! - **ConstraintSet**: expertise, scale, time-to-market, and risk tolerance, validated and frozen
//! - **DecisionRule**: a partial constraint pattern plus per-option textual impacts
//! - **RuleTable**: the ordered, immutable rule collection (26 built-in rules)
//! - **EvaluationResult**: per-option statements with a trace of triggered rules
//!
//! ## Usage
//!
//! ```
//! use referee::{ConstraintSet, Expertise, RefereeEngine, RiskTolerance, Scale, TimeToMarket};
//!
//! let engine = RefereeEngine::builtin();
//! let constraints = ConstraintSet::new(
//!     Expertise::Beginner,
//!     Scale::Large,
//!     TimeToMarket::Fast,
//!     RiskTolerance::Low,
//! );
//!
//! let result = engine.evaluate(&constraints);
//! assert_eq!(result.total_rules_evaluated, 26);
//! assert!(result
//!     .grpc
//!     .triggered_rules
//!     .iter()
//!     .any(|rule| rule.id == "COMPOUND_LARGE_BEGINNER"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core model
pub mod constraint;
pub mod error;
pub mod labels;
pub mod result;
pub mod rule;

// Rules and evaluation
pub mod builtin;
pub mod engine;
pub mod table;

// Presentation and tooling
pub mod audit;
pub mod config;
pub mod insight;
pub mod report;

pub use audit::{audit, DomainAudit};
pub use config::{OutputFormat, RefereeConfig};
pub use constraint::{
    freeze, validate, CandidateConstraints, ConstraintSet, Dimension, Expertise, RiskTolerance,
    Scale, Term, TimeToMarket, DOMAIN_SIZE,
};
pub use engine::{evaluate, RefereeEngine};
pub use error::{ConfigError, RefereeError, RefereeResult, RuleTableError, ValidationError};
pub use insight::{Insight, InsightCatalogue, FALLBACK_INSIGHT};
pub use labels::{format_summary, format_trigger_label};
pub use report::render_text;
pub use result::{EvaluationResult, OptionResult, TriggeredRule};
pub use rule::{ApiOption, Condition, DecisionRule, ImpactCategory, OptionImpact, RuleImpacts};
pub use table::{LintPolicy, RuleTable, SharedRuleTable, TableFingerprint};
