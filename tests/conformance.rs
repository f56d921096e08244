use referee::{
    builtin, format_summary, ApiOption, CandidateConstraints, ConstraintSet, Dimension,
    Expertise, ImpactCategory, RefereeEngine, RiskTolerance, RuleTable, Scale, TimeToMarket,
    ValidationError, DOMAIN_SIZE,
};
use serde_json::json;

fn beginner_large_fast_low() -> ConstraintSet {
    ConstraintSet::new(
        Expertise::Beginner,
        Scale::Large,
        TimeToMarket::Fast,
        RiskTolerance::Low,
    )
}

fn triggered_ids(engine: &RefereeEngine, set: &ConstraintSet) -> Vec<String> {
    let result = engine.evaluate(set);
    let mut ids: Vec<String> = result
        .options()
        .flat_map(|(_, option)| option.triggered_rules.iter().map(|r| r.id.clone()))
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

#[test]
fn every_combination_evaluates() {
    let engine = RefereeEngine::builtin();
    let mut count = 0;
    for set in ConstraintSet::all() {
        let result = engine.evaluate(&set);
        assert_eq!(result.total_rules_evaluated, 26);
        assert!(result.total_rules_triggered <= 26);
        count += 1;
    }
    assert_eq!(count, DOMAIN_SIZE);
}

#[test]
fn evaluation_is_deterministic() {
    let engine = RefereeEngine::builtin();
    let rebuilt = RefereeEngine::new(RuleTable::new(builtin::rules()).unwrap().into());
    for set in ConstraintSet::all() {
        let first = engine.evaluate(&set);
        assert_eq!(first, engine.evaluate(&set));
        assert_eq!(first, rebuilt.evaluate(&set));
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&engine.evaluate(&set)).unwrap()
        );
    }
}

#[test]
fn each_missing_dimension_is_rejected() {
    let engine = RefereeEngine::builtin();
    let full = CandidateConstraints::from(beginner_large_fast_low());
    for dimension in Dimension::ALL {
        let err = engine
            .evaluate_candidate(&full.clone().without(dimension))
            .unwrap_err();
        assert!(err.is_invalid_constraints());
        assert!(err.to_string().contains(dimension.as_str()), "{err}");
    }
}

#[test]
fn out_of_range_and_malformed_input_is_rejected() {
    let engine = RefereeEngine::builtin();
    let huge = json!({
        "expertise": "beginner",
        "scale": "huge",
        "timeToMarket": "fast",
        "riskTolerance": "low"
    });
    assert!(!referee::validate(&huge));
    assert_eq!(
        referee::freeze(&huge).unwrap_err(),
        ValidationError::UnknownValue {
            dimension: Dimension::Scale,
            value: "huge".to_string(),
        }
    );
    assert!(engine.evaluate_json(&huge).unwrap_err().is_invalid_constraints());

    assert_eq!(
        referee::freeze(&json!(["beginner"])).unwrap_err(),
        ValidationError::NotARecord
    );

    let capitalized = json!({
        "expertise": "Beginner",
        "scale": "large",
        "timeToMarket": "fast",
        "riskTolerance": "low"
    });
    assert!(!referee::validate(&capitalized));

    let numeric = json!({
        "expertise": "beginner",
        "scale": 3,
        "timeToMarket": "fast",
        "riskTolerance": "low"
    });
    assert!(!referee::validate(&numeric));
}

#[test]
fn unknown_keys_are_ignored() {
    let candidate = json!({
        "expertise": "beginner",
        "scale": "large",
        "timeToMarket": "fast",
        "riskTolerance": "low",
        "budget": "tight"
    });
    assert_eq!(referee::freeze(&candidate).unwrap(), beginner_large_fast_low());
}

#[test]
fn results_follow_table_order() {
    let engine = RefereeEngine::builtin();
    let table = engine.table();
    for set in ConstraintSet::all() {
        let result = engine.evaluate(&set);
        for (_, option) in result.options() {
            let positions: Vec<usize> = option
                .triggered_rules
                .iter()
                .map(|r| table.position(&r.id).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{set}");
        }
    }
}

#[test]
fn statements_are_the_concatenation_of_matching_rules() {
    let engine = RefereeEngine::builtin();
    for set in ConstraintSet::all() {
        let result = engine.evaluate(&set);
        for option in ApiOption::ALL {
            for category in ImpactCategory::ALL {
                let expected: Vec<String> = engine
                    .table()
                    .iter()
                    .filter(|rule| rule.matches(&set))
                    .filter_map(|rule| rule.impacts.get(option))
                    .flat_map(|impact| impact.statements(category).iter().cloned())
                    .collect();
                assert_eq!(result.option(option).statements(category), expected.as_slice());
            }
        }
    }
}

#[test]
fn triggered_count_matches_distinct_rules() {
    let engine = RefereeEngine::builtin();
    for set in ConstraintSet::all() {
        let result = engine.evaluate(&set);
        let matching = engine.table().iter().filter(|r| r.matches(&set)).count();
        assert_eq!(result.total_rules_triggered, matching);
        // every built-in rule has statements, so each match leaves a trace
        assert_eq!(triggered_ids(&engine, &set).len(), matching);
    }
}

#[test]
fn beginner_large_fast_low_scenario() {
    let engine = RefereeEngine::builtin();
    let set = beginner_large_fast_low();
    let result = engine.evaluate(&set);

    assert_eq!(result.total_rules_evaluated, 26);
    assert_eq!(result.total_rules_triggered, 15);

    let ids = triggered_ids(&engine, &set);
    for id in [
        "EXP_BEGINNER_REST",
        "SCALE_LARGE_GRPC",
        "TIME_FAST_GRAPHQL",
        "RISK_LOW_REST",
        "COMPOUND_LARGE_BEGINNER",
    ] {
        assert!(ids.iter().any(|i| i == id), "{id} missing");
    }
    assert!(!ids.iter().any(|i| i == "COMPOUND_LARGE_EXPERT"));

    assert!(result.graphql.tradeoffs.iter().any(|t| t.contains("capability gap")));
    assert!(result.grpc.tradeoffs.iter().any(|t| t.contains("expertise gap")));
    assert!(result.rest.strengths.iter().any(|s| s.contains("beginner")));

    let compound = result
        .grpc
        .triggered_rules
        .iter()
        .find(|r| r.id == "COMPOUND_LARGE_BEGINNER")
        .unwrap();
    assert_eq!(compound.trigger_label, "Large scale + Beginner expertise");
    assert_eq!(
        compound.affected_options,
        vec![ApiOption::GraphQl, ApiOption::Grpc]
    );
    assert_eq!(
        compound.contributed_types,
        vec![ImpactCategory::Weakness, ImpactCategory::Tradeoff]
    );
    assert!(!result.rest.was_triggered_by("COMPOUND_LARGE_BEGINNER"));
}

#[test]
fn opposed_combinations_give_every_option_both_sides() {
    let engine = RefereeEngine::builtin();
    let a = ConstraintSet::new(
        Expertise::Beginner,
        Scale::Small,
        TimeToMarket::Fast,
        RiskTolerance::Low,
    );
    let b = ConstraintSet::new(
        Expertise::Expert,
        Scale::Large,
        TimeToMarket::Balanced,
        RiskTolerance::High,
    );
    let (ra, rb) = (engine.evaluate(&a), engine.evaluate(&b));
    for option in ApiOption::ALL {
        let strengths = ra.option(option).strengths.len() + rb.option(option).strengths.len();
        let weaknesses = ra.option(option).weaknesses.len() + rb.option(option).weaknesses.len();
        assert!(strengths > 0, "{option} has no strengths");
        assert!(weaknesses > 0, "{option} has no weaknesses");
    }
}

#[test]
fn no_option_is_weakness_free_across_the_domain() {
    let engine = RefereeEngine::builtin();
    for option in ApiOption::ALL {
        let weak_somewhere = ConstraintSet::all()
            .any(|set| !engine.evaluate(&set).option(option).weaknesses.is_empty());
        assert!(weak_somewhere, "{option}");
    }
}

#[test]
fn builtin_text_carries_no_directive_language() {
    assert!(RuleTable::builtin().lint_language().is_empty());
}

#[test]
fn summary_formatting() {
    assert_eq!(
        format_summary(&beginner_large_fast_low()),
        "Beginner team · Large scale · Fast delivery · Low risk"
    );
    let set = ConstraintSet::new(
        Expertise::Intermediate,
        Scale::Medium,
        TimeToMarket::Balanced,
        RiskTolerance::Medium,
    );
    assert_eq!(
        format_summary(&set),
        "Intermediate team · Medium scale · Balanced delivery · Medium risk"
    );
}

#[test]
fn result_json_uses_camel_case() {
    let result = RefereeEngine::builtin().evaluate(&beginner_large_fast_low());
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["totalRulesEvaluated"], 26);
    assert!(value["grpc"]["triggeredRules"][0]["triggerLabel"].is_string());
    assert!(value["graphql"]["triggeredRules"][0]["affectedOptions"].is_array());
}
