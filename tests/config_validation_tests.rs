//! Config Validation Tests
//!
//! Typo detection on unknown keys, physical range checks, benchmark table
//! consistency and file loading, exercised independently from the engine.

use std::io::Write;

use alt_reliability::config::validation::{
    known_config_keys, suggest_correction, validate_physical_ranges, validate_unknown_keys,
};
use alt_reliability::config::{ConfigError, ReliabilityConfig};
use alt_reliability::types::Verdict;

// ============================================================================
// Typo Detection
// ============================================================================

#[test]
fn typo_in_physics_key_warns_with_suggestion() {
    let toml_str = r#"
[physics]
hours_per_yaer = 8760.0
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "Expected exactly 1 warning");
    assert!(warnings[0].field.contains("hours_per_yaer"));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("physics.hours_per_year"));
}

#[test]
fn typo_inside_tier_table_warns() {
    let toml_str = r#"
[[benchmarks.tiers]]
excelent_floor = 99.0
acceptable_floor = 97.0
avg_failure_rate = "1%"
max_failure_rate = "2%"
source = "internal"
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert_eq!(warnings.len(), 1, "{warnings:?}");
    assert_eq!(
        warnings[0].suggestion.as_deref(),
        Some("benchmarks.tiers.excellent_floor")
    );
}

#[test]
fn valid_config_produces_zero_warnings() {
    let toml_str = r#"
[physics]
boltzmann_ev_per_k = 8.617e-5
hours_per_year = 8760.0

[analysis]
default_mission_years = 3.0
default_bx_life_percent = 10.0
default_median_rank = "exact"
default_regression = "on_x"

[output]
round_results = false
"#;
    let warnings = validate_unknown_keys(toml_str);
    assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
}

#[test]
fn far_off_key_gets_no_suggestion() {
    let known = known_config_keys();
    assert!(suggest_correction("analysis.completely_unrelated_setting", &known).is_none());
}

// ============================================================================
// Range Validation
// ============================================================================

#[test]
fn defaults_pass_range_validation() {
    let config = ReliabilityConfig::default();
    let (errors, warnings) = validate_physical_ranges(&config);
    assert!(errors.is_empty(), "{errors:?}");
    assert!(warnings.is_empty(), "{warnings:?}");
    assert!(config.validate().is_ok());
}

#[test]
fn zero_mission_default_is_rejected() {
    let result = ReliabilityConfig::from_toml_str(
        r#"
[analysis]
default_mission_years = 0.0
"#,
    );
    match result {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("default_mission_years")), "{errors:?}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unordered_tier_floors_are_rejected() {
    let result = ReliabilityConfig::from_toml_str(
        r#"
[[benchmarks.tiers]]
excellent_floor = 90.0
acceptable_floor = 95.0
avg_failure_rate = "5%"
max_failure_rate = "8%"
source = "internal"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Validation(_))), "{result:?}");
}

#[test]
fn bounded_last_tier_is_rejected() {
    let result = ReliabilityConfig::from_toml_str(
        r#"
[[benchmarks.tiers]]
upper_years = 5.0
excellent_floor = 95.0
acceptable_floor = 90.0
avg_failure_rate = "5%"
max_failure_rate = "8%"
source = "internal"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Validation(_))), "{result:?}");
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn custom_tiers_load_from_file_and_drive_classification() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[benchmarks.tiers]]
upper_years = 1.0
excellent_floor = 99.9
acceptable_floor = 99.0
avg_failure_rate = "0.5%"
max_failure_rate = "1%"
source = "Customer contract"

[[benchmarks.tiers]]
excellent_floor = 95.0
acceptable_floor = 90.0
avg_failure_rate = "5%"
max_failure_rate = "10%"
source = "Customer contract"
"#
    )
    .unwrap();

    let config = ReliabilityConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.benchmarks.tiers.len(), 2);

    let c = alt_reliability::benchmark::classify_with(&config.benchmarks.tiers, 4.0, 0.96);
    assert_eq!(c.verdict, Verdict::Excellent);
    assert_eq!(c.source, "Customer contract");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReliabilityConfig::load_from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(..))));
}

#[test]
fn malformed_file_reports_its_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[physics\nboltzmann_ev_per_k = ").unwrap();
    match ReliabilityConfig::load_from_file(file.path()) {
        Err(ConfigError::Parse(path, _)) => assert_eq!(path, file.path()),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn toml_round_trip_preserves_defaults() {
    let config = ReliabilityConfig::default();
    let text = config.to_toml().unwrap();
    let back = ReliabilityConfig::from_toml_str(&text).unwrap();
    assert_eq!(back.benchmarks.tiers, config.benchmarks.tiers);
    assert!((back.physics.boltzmann_ev_per_k - config.physics.boltzmann_ev_per_k).abs() < f64::EPSILON);
}
