use std::io::Write;
use std::sync::Arc;

use referee::{
    ConstraintSet, Expertise, LintPolicy, RefereeConfig, RefereeEngine, RiskTolerance,
    RuleTable, RuleTableError, Scale, SharedRuleTable, TimeToMarket,
};
use tempfile::NamedTempFile;

const DIRECTIVE_TABLE: &str = r#"[
    {
        "id": "SCALE_LARGE_GRPC",
        "description": "Teams should pick gRPC at scale",
        "when": {"scale": "large"},
        "impacts": {"grpc": {"strengths": ["Binary serialization can reduce latency"]}}
    }
]"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn set() -> ConstraintSet {
    ConstraintSet::new(
        Expertise::Expert,
        Scale::Large,
        TimeToMarket::Balanced,
        RiskTolerance::High,
    )
}

#[test]
fn builtin_table_survives_a_file_round_trip() {
    let builtin = RuleTable::builtin();
    let file = write_temp(&builtin.to_json_pretty().unwrap());

    let loaded = RuleTable::from_json_file(file.path(), LintPolicy::Deny).unwrap();
    assert_eq!(loaded.fingerprint(), builtin.fingerprint());
    assert_eq!(
        RefereeEngine::new(Arc::new(loaded)).evaluate(&set()),
        RefereeEngine::builtin().evaluate(&set())
    );
}

#[test]
fn lint_policy_governs_directive_language() {
    let file = write_temp(DIRECTIVE_TABLE);

    let err = RuleTable::from_json_file(file.path(), LintPolicy::Deny).unwrap_err();
    assert!(matches!(err, RuleTableError::LanguageViolations { count: 1, .. }));

    let warned = RuleTable::from_json_file(file.path(), LintPolicy::Warn).unwrap();
    assert_eq!(warned.rule_count(), 1);
    assert_eq!(warned.lint_language()[0].word.to_lowercase(), "should");
}

#[test]
fn malformed_tables_are_rejected() {
    let duplicate = r#"[
        {"id": "A", "description": "a"},
        {"id": "A", "description": "b"}
    ]"#;
    assert!(matches!(
        RuleTable::from_json_str(duplicate),
        Err(RuleTableError::DuplicateRuleId { .. })
    ));
    assert!(matches!(
        RuleTable::from_json_str(r#"[{"id": "A", "description": "a", "when": {"scale": "huge"}}]"#),
        Err(RuleTableError::Json(_))
    ));
}

#[test]
fn misspelled_keys_do_not_widen_a_rule() {
    let misspelled = r#"[
        {
            "id": "SCALE_LARGE_GRPC",
            "description": "Large scale and gRPC",
            "whne": {"scale": "large"},
            "impacts": {"grpc": {"weaknesses": ["w"]}}
        }
    ]"#;
    assert!(matches!(
        RuleTable::from_json_str(misspelled),
        Err(RuleTableError::Json(_))
    ));

    let bad_category = r#"[
        {
            "id": "SCALE_LARGE_GRPC",
            "description": "Large scale and gRPC",
            "when": {"scale": "large"},
            "impacts": {"grpc": {"strenghts": ["typo"], "weaknesses": ["w"]}}
        }
    ]"#;
    assert!(matches!(
        RuleTable::from_json_str(bad_category),
        Err(RuleTableError::Json(_))
    ));

    let bad_option = r#"[
        {
            "id": "SCALE_LARGE_GRAPHQL",
            "description": "Large scale and GraphQL",
            "when": {"scale": "large"},
            "impacts": {"GraphQL": {"weaknesses": ["w"]}}
        }
    ]"#;
    let file = write_temp(bad_option);
    assert!(RuleTable::from_json_file(file.path(), LintPolicy::Off).is_err());
}

#[test]
fn config_points_at_a_table_file() {
    let table = write_temp(DIRECTIVE_TABLE);
    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(config_file, "rule_table = {:?}", table.path().display().to_string()).unwrap();
    writeln!(config_file, "[lint]").unwrap();
    writeln!(config_file, "policy = \"off\"").unwrap();

    let config = RefereeConfig::load(config_file.path()).unwrap();
    let loaded = config.load_rule_table().unwrap();
    assert_eq!(loaded.rule_count(), 1);

    let denied = config.with_lint_policy(LintPolicy::Deny).load_rule_table().unwrap_err();
    assert!(denied.is_rule_table());
}

#[test]
fn shared_table_reload_keeps_old_table_on_error() {
    let shared = SharedRuleTable::builtin();
    let before = shared.snapshot().fingerprint();

    let bad = write_temp("not json");
    assert!(shared.reload_from_file(bad.path(), LintPolicy::Warn).is_err());
    assert_eq!(shared.snapshot().fingerprint(), before);

    let good = write_temp(DIRECTIVE_TABLE);
    shared.reload_from_file(good.path(), LintPolicy::Off).unwrap();
    let result = shared.evaluate(&set());
    assert_eq!(result.total_rules_evaluated, 1);
    assert_eq!(result.total_rules_triggered, 1);
}
