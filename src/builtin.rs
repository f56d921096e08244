//! The built-in rule table.
//!
//! Rules are plain declarative data, readable without running anything.
//! Statements use conditional language ("may", "can", "under these
//! constraints"), carry no scores or rankings, and never recommend an option.
//!
//! Sections: expertise, scale, time-to-market, and risk tolerance rules each
//! constrain a single dimension; compound rules constrain two.

use crate::constraint::{Expertise, RiskTolerance, Scale, TimeToMarket};
use crate::rule::{Condition, DecisionRule, OptionImpact};

fn expertise(value: Expertise) -> Condition {
    Condition::new().expertise(value)
}

fn scale(value: Scale) -> Condition {
    Condition::new().scale(value)
}

fn time_to_market(value: TimeToMarket) -> Condition {
    Condition::new().time_to_market(value)
}

fn risk(value: RiskTolerance) -> Condition {
    Condition::new().risk_tolerance(value)
}

/// The 26 built-in rules in definition order.
#[must_use]
pub fn rules() -> Vec<DecisionRule> {
    let mut rules = Vec::with_capacity(26);
    rules.extend(expertise_rules());
    rules.extend(scale_rules());
    rules.extend(time_to_market_rules());
    rules.extend(risk_rules());
    rules.extend(compound_rules());
    rules
}

fn expertise_rules() -> Vec<DecisionRule> {
    vec![
        DecisionRule::new(
            "EXP_BEGINNER_REST",
            "Beginner teams benefit from REST's familiar patterns",
        )
        .when(expertise(Expertise::Beginner))
        .rest(
            OptionImpact::new()
                .strength("With beginner expertise, REST's familiar HTTP patterns may reduce onboarding friction")
                .strength("Under limited experience, widespread documentation can accelerate problem resolution"),
        ),
        DecisionRule::new(
            "EXP_BEGINNER_GRAPHQL",
            "Beginner teams face GraphQL complexity challenges",
        )
        .when(expertise(Expertise::Beginner))
        .graphql(
            OptionImpact::new()
                .weakness("With beginner expertise, schema design complexity may overwhelm the team")
                .weakness("Under limited experience, N+1 query problems often go undetected until production"),
        ),
        DecisionRule::new(
            "EXP_BEGINNER_GRPC",
            "Beginner teams face gRPC tooling barriers",
        )
        .when(expertise(Expertise::Beginner))
        .grpc(
            OptionImpact::new()
                .weakness("With beginner expertise, Protocol Buffer syntax creates steep learning barriers")
                .weakness("Under limited experience, binary debugging requires specialized tools the team may lack"),
        ),
        DecisionRule::new(
            "EXP_INTERMEDIATE_ALL",
            "Intermediate teams can leverage moderate complexity",
        )
        .when(expertise(Expertise::Intermediate))
        .rest(OptionImpact::new().strength(
            "For intermediate teams, REST allows focus on business logic over protocol complexity",
        ))
        .graphql(
            OptionImpact::new()
                .strength("For intermediate teams, GraphQL's type system can catch errors before runtime")
                .weakness("At intermediate level, query cost analysis may require additional learning investment"),
        )
        .grpc(OptionImpact::new().strength(
            "For intermediate teams, code generation can reduce manual serialization errors",
        )),
        DecisionRule::new("EXP_EXPERT_REST", "Expert teams may find REST limiting")
            .when(expertise(Expertise::Expert))
            .rest(OptionImpact::new().weakness(
                "For expert teams, REST's simplicity may limit fine-grained optimization opportunities",
            )),
        DecisionRule::new(
            "EXP_EXPERT_GRAPHQL",
            "Expert teams can leverage advanced GraphQL patterns",
        )
        .when(expertise(Expertise::Expert))
        .graphql(
            OptionImpact::new()
                .strength("With expert teams, federation patterns enable sophisticated service composition")
                .strength("Under expert guidance, query complexity controls can be tuned precisely"),
        ),
        DecisionRule::new(
            "EXP_EXPERT_GRPC",
            "Expert teams can maximize gRPC performance",
        )
        .when(expertise(Expertise::Expert))
        .grpc(
            OptionImpact::new()
                .strength("With expert teams, bidirectional streaming unlocks real-time communication patterns")
                .strength("Under expert operation, binary protocol efficiency can be maximized"),
        ),
    ]
}

fn scale_rules() -> Vec<DecisionRule> {
    vec![
        DecisionRule::new(
            "SCALE_SMALL_REST",
            "Small scale favors REST's minimal overhead",
        )
        .when(scale(Scale::Small))
        .rest(OptionImpact::new().strength(
            "At small scale, REST's minimal infrastructure overhead keeps operational costs low",
        )),
        DecisionRule::new(
            "SCALE_SMALL_GRAPHQL",
            "Small scale may not justify GraphQL overhead",
        )
        .when(scale(Scale::Small))
        .graphql(OptionImpact::new().weakness(
            "At small scale, schema overhead may not justify the flexibility benefits",
        )),
        DecisionRule::new(
            "SCALE_SMALL_GRPC",
            "Small scale may not justify gRPC investment",
        )
        .when(scale(Scale::Small))
        .grpc(OptionImpact::new().weakness(
            "At small scale, infrastructure investment may exceed performance benefits",
        )),
        DecisionRule::new("SCALE_MEDIUM_ALL", "Medium scale allows balanced trade-offs")
            .when(scale(Scale::Medium))
            .rest(OptionImpact::new().strength(
                "At medium scale, REST's caching layers can provide effective performance gains",
            ))
            .graphql(OptionImpact::new().strength(
                "At medium scale, reduced over-fetching can provide measurable bandwidth savings",
            ))
            .grpc(OptionImpact::new().strength(
                "At medium scale, strong typing can prevent contract drift between services",
            )),
        DecisionRule::new(
            "SCALE_LARGE_REST",
            "Large scale exposes REST inefficiencies",
        )
        .when(scale(Scale::Large))
        .rest(
            OptionImpact::new()
                .weakness("At large scale, multiple round-trips may create network bottlenecks")
                .weakness("Under high throughput, over-fetching can compound bandwidth costs"),
        ),
        DecisionRule::new(
            "SCALE_LARGE_GRAPHQL",
            "Large scale amplifies GraphQL benefits and risks",
        )
        .when(scale(Scale::Large))
        .graphql(
            OptionImpact::new()
                .strength("At large scale, client-specified queries can reduce payload sizes significantly")
                .weakness("Under high load, unbounded query depth can trigger cascading failures"),
        ),
        DecisionRule::new("SCALE_LARGE_GRPC", "Large scale favors gRPC performance")
            .when(scale(Scale::Large))
            .grpc(
                OptionImpact::new()
                    .strength("At large scale, binary serialization can dramatically reduce latency")
                    .strength("Under high throughput, HTTP/2 multiplexing eliminates connection overhead"),
            ),
    ]
}

fn time_to_market_rules() -> Vec<DecisionRule> {
    vec![
        DecisionRule::new(
            "TIME_FAST_REST",
            "Fast delivery favors REST's rapid prototyping",
        )
        .when(time_to_market(TimeToMarket::Fast))
        .rest(
            OptionImpact::new()
                .strength("Under fast delivery pressure, REST enables rapid prototyping with familiar tooling")
                .strength("With tight timelines, no schema setup can accelerate initial deployment"),
        ),
        DecisionRule::new(
            "TIME_FAST_GRAPHQL",
            "Fast delivery conflicts with GraphQL setup",
        )
        .when(time_to_market(TimeToMarket::Fast))
        .graphql(
            OptionImpact::new()
                .weakness("Under fast delivery pressure, upfront schema design may delay initial release")
                .weakness("With tight timelines, schema iteration costs can compound quickly"),
        ),
        DecisionRule::new("TIME_FAST_GRPC", "Fast delivery conflicts with gRPC setup")
            .when(time_to_market(TimeToMarket::Fast))
            .grpc(
                OptionImpact::new()
                    .weakness("Under fast delivery pressure, toolchain setup may delay initial deployment")
                    .weakness("With tight timelines, proto file iteration can slow development cycles"),
            ),
        DecisionRule::new(
            "TIME_BALANCED_ALL",
            "Balanced timelines allow schema-first benefits",
        )
        .when(time_to_market(TimeToMarket::Balanced))
        .rest(OptionImpact::new().weakness(
            "With balanced timelines, lack of schema may create integration debt later",
        ))
        .graphql(OptionImpact::new().strength(
            "With balanced timelines, schema-first design can prevent downstream integration issues",
        ))
        .grpc(OptionImpact::new().strength(
            "With balanced timelines, contract-first design can ensure stable service boundaries",
        )),
    ]
}

fn risk_rules() -> Vec<DecisionRule> {
    vec![
        DecisionRule::new(
            "RISK_LOW_REST",
            "Low risk tolerance favors REST's maturity",
        )
        .when(risk(RiskTolerance::Low))
        .rest(OptionImpact::new().strength(
            "With low risk tolerance, REST's mature ecosystem can minimize operational surprises",
        )),
        DecisionRule::new(
            "RISK_LOW_GRAPHQL",
            "Low risk tolerance conflicts with GraphQL's newer patterns",
        )
        .when(risk(RiskTolerance::Low))
        .graphql(OptionImpact::new().weakness(
            "With low risk tolerance, newer operational patterns may introduce uncertainty",
        )),
        DecisionRule::new(
            "RISK_LOW_GRPC",
            "Low risk tolerance has mixed gRPC implications",
        )
        .when(risk(RiskTolerance::Low))
        .grpc(
            OptionImpact::new()
                .strength("With low risk tolerance, strong typing can catch errors at compile time")
                .weakness("Under low risk appetite, limited browser support may narrow deployment options"),
        ),
        DecisionRule::new(
            "RISK_HIGH_ALL",
            "High risk tolerance enables aggressive optimization",
        )
        .when(risk(RiskTolerance::High))
        .rest(OptionImpact::new().weakness(
            "With high risk tolerance, REST's conservative patterns may miss optimization potential",
        ))
        .graphql(OptionImpact::new().strength(
            "With high risk tolerance, rapid schema evolution can enable aggressive iteration",
        ))
        .grpc(OptionImpact::new().strength(
            "With high risk tolerance, performance gains may justify infrastructure complexity",
        )),
    ]
}

fn compound_rules() -> Vec<DecisionRule> {
    vec![
        DecisionRule::new(
            "COMPOUND_FAST_LOW_RISK",
            "Fast delivery with low risk tolerance favors mature tooling",
        )
        .when(
            Condition::new()
                .time_to_market(TimeToMarket::Fast)
                .risk_tolerance(RiskTolerance::Low),
        )
        .rest(
            OptionImpact::new()
                .strength("Under fast delivery with low risk, REST's predictability can reduce delivery uncertainty")
                .tradeoff("Delivery speed and risk mitigation achieved, but data fetching flexibility constrained"),
        ),
        DecisionRule::new(
            "COMPOUND_LARGE_BEGINNER",
            "Large scale with beginner expertise increases operational risk",
        )
        .when(
            Condition::new()
                .scale(Scale::Large)
                .expertise(Expertise::Beginner),
        )
        .graphql(
            OptionImpact::new()
                .weakness("At large scale with beginner teams, query optimization complexity becomes high-risk")
                .tradeoff("Flexibility potential exists, but team capability gap creates significant delivery risk"),
        )
        .grpc(
            OptionImpact::new()
                .weakness("At large scale with beginner teams, operational complexity may overwhelm the team")
                .tradeoff("Performance potential exists, but expertise gap creates operational risk"),
        ),
        DecisionRule::new(
            "COMPOUND_LARGE_EXPERT",
            "Large scale with expert expertise enables advanced patterns",
        )
        .when(
            Condition::new()
                .scale(Scale::Large)
                .expertise(Expertise::Expert),
        )
        .graphql(
            OptionImpact::new()
                .strength("At large scale with expert teams, query cost analysis can be implemented effectively")
                .tradeoff("Maximum flexibility achieved, but requires sustained investment in query governance"),
        )
        .grpc(
            OptionImpact::new()
                .strength("At large scale with expert teams, streaming patterns can maximize throughput")
                .tradeoff("Maximum performance achieved, but ecosystem accessibility permanently constrained"),
        ),
        DecisionRule::new(
            "COMPOUND_BEGINNER_FAST",
            "Beginner team with fast delivery needs simplicity",
        )
        .when(
            Condition::new()
                .expertise(Expertise::Beginner)
                .time_to_market(TimeToMarket::Fast),
        )
        .rest(OptionImpact::new().strength(
            "For beginner teams under time pressure, REST's familiarity can accelerate delivery",
        ))
        .graphql(OptionImpact::new().tradeoff(
            "Long-term flexibility traded against immediate delivery capability",
        ))
        .grpc(OptionImpact::new().tradeoff(
            "Performance potential sacrificed for achievable delivery timeline",
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_add_up_to_26() {
        assert_eq!(expertise_rules().len(), 7);
        assert_eq!(scale_rules().len(), 7);
        assert_eq!(time_to_market_rules().len(), 4);
        assert_eq!(risk_rules().len(), 4);
        assert_eq!(compound_rules().len(), 4);
        assert_eq!(rules().len(), 26);
    }

    #[test]
    fn single_dimension_sections_constrain_one_dimension() {
        let singles = expertise_rules()
            .into_iter()
            .chain(scale_rules())
            .chain(time_to_market_rules())
            .chain(risk_rules());
        for rule in singles {
            assert_eq!(rule.when.specificity(), 1, "{}", rule.id);
        }
        for rule in compound_rules() {
            assert_eq!(rule.when.specificity(), 2, "{}", rule.id);
        }
    }

    #[test]
    fn every_rule_impacts_something() {
        for rule in rules() {
            assert!(rule.statements().next().is_some(), "{}", rule.id);
        }
    }
}
