//! Tests for Config
//!
//! These tests verify:
//! - YAML loading of every question type and the optional keys
//! - Validation of ids, choices and units
//! - Desired field order

mod recurrence_tests;

use std::fs;

use qslog::config::{Config, OffSchedule, Question, QuestionKind, MAX_DECIMALS};
use qslog::input::UnitRegistry;
use qslog::recurrence::Recurrence;
use qslog::response::{ChoiceValue, YesNo};
use qslog::QsError;
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"
path: data/log.csv
skip_token: "-"
max_catch_up_days: 3
questions:
  - id: mood
    prompt: How was your mood?
    type: choice
    choices:
      - { value: 1, label: bad }
      - { value: 2, label: good }
  - id: gym
    prompt: Did you go to the gym?
    type: yn
    default: n
    frequency: weekdays
  - id: coffees
    prompt: Cups of coffee?
    type: int
  - id: sleep_quality
    prompt: Sleep quality (0-10)?
    type: float
    frequency: mon, thu
    off_schedule: ask
  - id: sleep
    prompt: How long did you sleep?
    type: duration
  - id: weight
    prompt: Weight?
    type: quantity
    unit: kg
    decimals: 1
"#;

// =============================================================================
// Loading Tests
// =============================================================================

#[test]
fn test_load_full_config() {
    let config = Config::from_yaml(FULL_CONFIG).unwrap();

    assert_eq!(config.log_path.to_str(), Some("data/log.csv"));
    assert_eq!(config.skip_token, "-");
    assert_eq!(config.max_catch_up_days, 3);
    assert_eq!(config.questions.len(), 6);

    match &config.questions[0].kind {
        QuestionKind::Choice { choices } => {
            assert_eq!(choices.len(), 2);
            assert_eq!(choices[0].value, ChoiceValue::Integer(1));
            assert_eq!(choices[1].label, "good");
        }
        other => panic!("expected choice, got {:?}", other),
    }

    assert_eq!(
        config.questions[1].kind,
        QuestionKind::YesNo {
            default: Some(YesNo::No)
        }
    );
    assert_eq!(
        config.questions[1].frequency,
        "weekdays".parse::<Recurrence>().unwrap()
    );
    assert_eq!(config.questions[2].kind, QuestionKind::Integer);
    assert_eq!(config.questions[3].kind, QuestionKind::Float);
    assert_eq!(config.questions[3].off_schedule, OffSchedule::Ask);
    assert_eq!(config.questions[4].kind, QuestionKind::Duration);
    assert_eq!(
        config.questions[5].kind,
        QuestionKind::Quantity {
            unit: "kg".to_string(),
            decimals: 1
        }
    );

    assert!(config.validate(&UnitRegistry::new()).is_ok());
}

#[test]
fn test_defaults_for_optional_keys() {
    let config = Config::from_yaml(
        r#"
path: log.csv
questions:
  - id: weight
    prompt: Weight?
    type: quantity
    unit: lb
  - id: gym
    prompt: Gym?
    type: yn
"#,
    )
    .unwrap();

    assert_eq!(config.skip_token, "skip");
    assert_eq!(config.max_catch_up_days, 7);
    assert_eq!(config.questions[0].frequency, Recurrence::Daily);
    assert_eq!(config.questions[0].off_schedule, OffSchedule::Skip);
    assert_eq!(
        config.questions[0].kind,
        QuestionKind::Quantity {
            unit: "lb".to_string(),
            decimals: 2
        }
    );
    assert_eq!(config.questions[1].kind, QuestionKind::YesNo { default: None });
}

#[test]
fn test_text_choice_values() {
    let config = Config::from_yaml(
        r#"
path: log.csv
questions:
  - id: company
    prompt: Who were you with?
    type: choice
    choices:
      - { value: a, label: alone }
      - { value: f, label: friends }
"#,
    )
    .unwrap();

    match &config.questions[0].kind {
        QuestionKind::Choice { choices } => {
            assert_eq!(choices[0].value, ChoiceValue::Text("a".to_string()));
        }
        other => panic!("expected choice, got {:?}", other),
    }
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.yaml");
    fs::write(&path, FULL_CONFIG).unwrap();

    let config = Config::load(&path).unwrap();

    assert_eq!(config.questions.len(), 6);
}

#[test]
fn test_example_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.yaml");

    let config = Config::load(&path).unwrap();

    assert!(config.validate(&UnitRegistry::new()).is_ok());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();

    let result = Config::load(&temp_dir.path().join("missing.yaml"));

    assert!(matches!(result, Err(QsError::Config(_))));
}

#[test]
fn test_unknown_type_is_rejected() {
    let result = Config::from_yaml(
        r#"
path: log.csv
questions:
  - id: x
    prompt: X?
    type: essay
"#,
    );

    assert!(matches!(result, Err(QsError::Yaml(_))));
}

#[test]
fn test_bad_frequency_is_rejected() {
    let result = Config::from_yaml(
        r#"
path: log.csv
questions:
  - id: x
    prompt: X?
    type: int
    frequency: fortnightly-ish
"#,
    );

    assert!(result.is_err());
}

// =============================================================================
// Validation Tests
// =============================================================================

fn int_question(id: &str) -> Question {
    Question::new(id, "?", QuestionKind::Integer)
}

#[test]
fn test_validate_rejects_duplicate_ids() {
    let config = Config::builder()
        .question(int_question("a"))
        .question(int_question("a"))
        .build();

    assert!(matches!(
        config.validate(&UnitRegistry::new()),
        Err(QsError::Config(_))
    ));
}

#[test]
fn test_validate_rejects_reserved_ids() {
    for reserved in ["date", "recorded"] {
        let config = Config::builder().question(int_question(reserved)).build();
        assert!(config.validate(&UnitRegistry::new()).is_err());
    }
}

#[test]
fn test_validate_rejects_empty_question_list() {
    let config = Config::builder().build();

    assert!(config.validate(&UnitRegistry::new()).is_err());
}

#[test]
fn test_validate_rejects_empty_choices() {
    let config = Config::builder()
        .question(Question::new("mood", "?", QuestionKind::Choice { choices: vec![] }))
        .build();

    assert!(config.validate(&UnitRegistry::new()).is_err());
}

#[test]
fn test_validate_rejects_unknown_unit() {
    let config = Config::builder()
        .question(Question::new(
            "weight",
            "?",
            QuestionKind::Quantity {
                unit: "blorbs".to_string(),
                decimals: 2,
            },
        ))
        .build();

    assert!(config.validate(&UnitRegistry::new()).is_err());
}

#[test]
fn test_validate_bounds_quantity_decimals() {
    let quantity = |decimals| {
        Config::builder()
            .question(Question::new(
                "weight",
                "?",
                QuestionKind::Quantity {
                    unit: "kg".to_string(),
                    decimals,
                },
            ))
            .build()
    };

    assert!(quantity(MAX_DECIMALS).validate(&UnitRegistry::new()).is_ok());
    assert!(matches!(
        quantity(400).validate(&UnitRegistry::new()),
        Err(QsError::Config(_))
    ));
}

#[test]
fn test_validate_accepts_huge_catch_up_window() {
    let config = Config::builder()
        .max_catch_up_days(u32::MAX)
        .question(int_question("a"))
        .build();

    assert!(config.validate(&UnitRegistry::new()).is_ok());
}

#[test]
fn test_validate_rejects_empty_skip_token() {
    let config = Config::builder()
        .skip_token("")
        .question(int_question("a"))
        .build();

    assert!(config.validate(&UnitRegistry::new()).is_err());
}

// =============================================================================
// Field Tests
// =============================================================================

#[test]
fn test_desired_fields_order() {
    let config = Config::builder()
        .question(int_question("mood"))
        .question(int_question("sleep"))
        .build();

    assert_eq!(config.desired_fields(), vec!["recorded", "date", "mood", "sleep"]);
}
