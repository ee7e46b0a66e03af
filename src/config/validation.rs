//! Config validation: unknown-key detection with Levenshtein suggestions
//! and physical range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Unknown keys never break a config.

use std::collections::HashSet;

use super::defaults;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for `ReliabilityConfig`.
///
/// Entries of `[[benchmarks.tiers]]` are walked as `benchmarks.tiers.<field>`.
/// Any new field added to `ReliabilityConfig` must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [physics]
        "physics",
        "physics.boltzmann_ev_per_k",
        "physics.hours_per_year",
        // [analysis]
        "analysis",
        "analysis.default_mission_years",
        "analysis.default_bx_life_percent",
        "analysis.default_median_rank",
        "analysis.default_regression",
        // [output]
        "output",
        "output.round_results",
        // [[benchmarks.tiers]]
        "benchmarks",
        "benchmarks.tiers",
        "benchmarks.tiers.upper_years",
        "benchmarks.tiers.excellent_floor",
        "benchmarks.tiers.acceptable_floor",
        "benchmarks.tiers.avg_failure_rate",
        "benchmarks.tiers.max_failure_rate",
        "benchmarks.tiers.source",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields
/// `["a", "a.b", "a.c"]`. Tables inside arrays are walked under the array's
/// own path, deduplicated.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            match v {
                toml::Value::Table(_) => keys.extend(walk_toml_keys(v, &path)),
                toml::Value::Array(items) => {
                    for item in items.iter().filter(|i| i.is_table()) {
                        for nested in walk_toml_keys(item, &path) {
                            if !keys.contains(&nested) {
                                keys.push(nested);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|(ka, da), (kb, db)| da.cmp(db).then_with(|| ka.cmp(kb)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys, it only warns.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    // parse errors are reported by serde afterwards
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Physical Range Validation
// ============================================================================

/// Validate physical ranges on a parsed `ReliabilityConfig`.
///
/// Returns (errors, warnings): errors are impossible values that must
/// prevent loading; warnings are suspicious but not fatal.
pub fn validate_physical_ranges(
    config: &super::ReliabilityConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let k = config.physics.boltzmann_ev_per_k;
    if !k.is_finite() || k <= 0.0 {
        errors.push(format!("physics.boltzmann_ev_per_k = {k} must be finite and > 0"));
    } else if (k / defaults::BOLTZMANN_EV_PER_K - 1.0).abs() > 0.01 {
        warnings.push(ValidationWarning {
            field: "physics.boltzmann_ev_per_k".to_string(),
            message: format!(
                "boltzmann_ev_per_k = {k:e} differs from {:e} eV/K by more than 1%",
                defaults::BOLTZMANN_EV_PER_K
            ),
            suggestion: None,
        });
    }

    let hpy = config.physics.hours_per_year;
    if !hpy.is_finite() || hpy <= 0.0 {
        errors.push(format!("physics.hours_per_year = {hpy} must be finite and > 0 (used as divisor)"));
    } else if !(8760.0..=8784.0).contains(&hpy) {
        warnings.push(ValidationWarning {
            field: "physics.hours_per_year".to_string(),
            message: format!("hours_per_year = {hpy} is outside the calendar range (8760-8784)"),
            suggestion: None,
        });
    }

    let mission = config.analysis.default_mission_years;
    if !mission.is_finite() || mission <= 0.0 {
        errors.push(format!("analysis.default_mission_years = {mission} must be finite and > 0"));
    }

    let bx = config.analysis.default_bx_life_percent;
    if !(bx > 0.0 && bx < 100.0) {
        errors.push(format!(
            "analysis.default_bx_life_percent = {bx} must lie strictly between 0 and 100"
        ));
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
