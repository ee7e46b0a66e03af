//! Stress conditions, model parameters and combination mode
//!
//! Each stress type is a variant that carries only the fields its model
//! needs. A `StressProfile` holds at most one condition per stress type;
//! an absent slot means the stress type is disabled (multiplier 1.0).

use serde::{Deserialize, Serialize};

// ============================================================================
// Stress Kinds
// ============================================================================

/// The eight stress types the AF model library understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressKind {
    Temperature,
    Humidity,
    Voltage,
    ThermalCycling,
    Vibration,
    Ultraviolet,
    Chemical,
    Radiation,
}

impl StressKind {
    /// All stress kinds in reporting order.
    pub const ALL: [Self; 8] = [
        Self::Temperature,
        Self::Humidity,
        Self::Voltage,
        Self::ThermalCycling,
        Self::Vibration,
        Self::Ultraviolet,
        Self::Chemical,
        Self::Radiation,
    ];

    /// Slot index inside a `StressProfile` / AF breakdown.
    pub const fn index(self) -> usize {
        match self {
            Self::Temperature => 0,
            Self::Humidity => 1,
            Self::Voltage => 2,
            Self::ThermalCycling => 3,
            Self::Vibration => 4,
            Self::Ultraviolet => 5,
            Self::Chemical => 6,
            Self::Radiation => 7,
        }
    }

    /// Human-readable name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Voltage => "voltage",
            Self::ThermalCycling => "thermal cycling",
            Self::Vibration => "vibration",
            Self::Ultraviolet => "uv",
            Self::Chemical => "chemical",
            Self::Radiation => "radiation",
        }
    }

    /// Enable flag key in the request's `af_params` block.
    pub const fn enable_flag(self) -> &'static str {
        match self {
            Self::Temperature => "enable_temp",
            Self::Humidity => "enable_hum",
            Self::Voltage => "enable_voltage",
            Self::ThermalCycling => "enable_tc",
            Self::Vibration => "enable_vib",
            Self::Ultraviolet => "enable_uv",
            Self::Chemical => "enable_chem",
            Self::Radiation => "enable_rad",
        }
    }

    /// Whether the stress type is enabled when the request omits its flag.
    pub const fn enabled_by_default(self) -> bool {
        matches!(self, Self::Temperature | Self::Humidity)
    }
}

impl std::fmt::Display for StressKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Stress Conditions
// ============================================================================

/// Optional dose-rate scaling for the radiation model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseRateScaling {
    pub use_rate: f64,
    pub stress_rate: f64,
    pub exponent: f64,
}

/// Use/stress values and model constants for one stress type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StressCondition {
    /// Arrhenius. Temperatures in °C, activation energy in eV.
    Temperature {
        use_celsius: f64,
        stress_celsius: f64,
        activation_energy_ev: f64,
    },
    /// Peck. Relative humidity in %RH.
    Humidity {
        use_rh: f64,
        stress_rh: f64,
        exponent: f64,
    },
    /// Inverse power law.
    Voltage {
        use_volts: f64,
        stress_volts: f64,
        exponent: f64,
    },
    /// Coffin-Manson with frequency scaling. ΔT in °C, frequencies in cycles/hour.
    ThermalCycling {
        use_delta_t: f64,
        stress_delta_t: f64,
        use_frequency: f64,
        stress_frequency: f64,
        delta_t_exponent: f64,
        frequency_exponent: f64,
    },
    /// Vibration power law on G level.
    Vibration {
        use_g: f64,
        stress_g: f64,
        exponent: f64,
    },
    /// UV exposure-time ratio.
    Ultraviolet {
        field_hours: f64,
        accelerated_hours: f64,
    },
    /// Chemical concentration power law.
    Chemical {
        use_concentration: f64,
        stress_concentration: f64,
        exponent: f64,
    },
    /// Total ionizing dose power law, optionally scaled by dose rate.
    Radiation {
        use_dose: f64,
        stress_dose: f64,
        exponent: f64,
        dose_rate: Option<DoseRateScaling>,
    },
}

impl StressCondition {
    pub const fn kind(&self) -> StressKind {
        match self {
            Self::Temperature { .. } => StressKind::Temperature,
            Self::Humidity { .. } => StressKind::Humidity,
            Self::Voltage { .. } => StressKind::Voltage,
            Self::ThermalCycling { .. } => StressKind::ThermalCycling,
            Self::Vibration { .. } => StressKind::Vibration,
            Self::Ultraviolet { .. } => StressKind::Ultraviolet,
            Self::Chemical { .. } => StressKind::Chemical,
            Self::Radiation { .. } => StressKind::Radiation,
        }
    }
}

/// Fixed-size set of enabled stress conditions, one slot per `StressKind`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StressProfile {
    slots: [Option<StressCondition>; 8],
}

impl StressProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, condition: StressCondition) -> Self {
        self.insert(condition);
        self
    }

    /// Enable a stress type, returning the condition it replaced.
    pub fn insert(&mut self, condition: StressCondition) -> Option<StressCondition> {
        let idx = condition.kind().index();
        self.slots[idx].replace(condition)
    }

    pub fn get(&self, kind: StressKind) -> Option<&StressCondition> {
        self.slots[kind.index()].as_ref()
    }

    pub fn is_enabled(&self, kind: StressKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Enabled conditions in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = &StressCondition> {
        self.slots.iter().flatten()
    }

    pub fn enabled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

// ============================================================================
// Eyring Combined Model
// ============================================================================

/// Which non-thermal stress the Eyring model couples with temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyringStressType {
    Humidity,
    Voltage,
}

impl EyringStressType {
    /// The additive stress kind this Eyring form supersedes alongside temperature.
    pub const fn covered_kind(self) -> StressKind {
        match self {
            Self::Humidity => StressKind::Humidity,
            Self::Voltage => StressKind::Voltage,
        }
    }
}

impl std::str::FromStr for EyringStressType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "humidity" | "hum" | "rh" => Ok(Self::Humidity),
            "voltage" | "v" => Ok(Self::Voltage),
            other => Err(format!("unknown Eyring stress type '{other}' (expected humidity or voltage)")),
        }
    }
}

/// Eyring temperature × stress model.
///
/// ```text
/// life(T, S) = A · (1/S)^B · exp(Ea / (k·T)) · exp(D · S / T)
/// AF         = life(T_use, S_use) / life(T_stress, S_stress)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyringModel {
    pub stress_type: EyringStressType,
    pub use_celsius: f64,
    pub stress_celsius: f64,
    pub activation_energy_ev: f64,
    pub use_stress: f64,
    pub stress_stress: f64,
    /// Interaction coefficient D.
    pub interaction: f64,
    /// Model constant A (cancels in the ratio but must be positive).
    pub constant: f64,
    /// Stress exponent B.
    pub stress_exponent: f64,
    /// Exponent of the plain power-law model for the same stress (n_hum or
    /// beta_v), used to report the Eyring correction factor.
    pub reference_exponent: f64,
}

/// How individual AFs are composed into the total.
#[derive(Debug, Clone, PartialEq)]
pub enum CombinationMode {
    /// Product of every enabled stress type's AF.
    Additive,
    /// Eyring AF replaces temperature × the tagged stress; other enabled
    /// stress types still multiply in.
    EyringCombined(EyringModel),
}

impl CombinationMode {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Additive => "additive",
            Self::EyringCombined(_) => "eyring",
        }
    }
}

/// Everything the AF combinator needs for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationInputs {
    pub stresses: StressProfile,
    pub mode: CombinationMode,
}

impl AccelerationInputs {
    pub const fn additive(stresses: StressProfile) -> Self {
        Self {
            stresses,
            mode: CombinationMode::Additive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_slots_by_kind() {
        let profile = StressProfile::new()
            .with(StressCondition::Humidity { use_rh: 60.0, stress_rh: 85.0, exponent: 2.0 })
            .with(StressCondition::Ultraviolet { field_hours: 8760.0, accelerated_hours: 1000.0 });

        assert_eq!(profile.enabled_count(), 2);
        assert!(profile.is_enabled(StressKind::Humidity));
        assert!(!profile.is_enabled(StressKind::Temperature));
        let kinds: Vec<_> = profile.iter().map(StressCondition::kind).collect();
        assert_eq!(kinds, vec![StressKind::Humidity, StressKind::Ultraviolet]);
    }

    #[test]
    fn test_insert_replaces_same_kind() {
        let mut profile = StressProfile::new();
        profile.insert(StressCondition::Vibration { use_g: 1.0, stress_g: 10.0, exponent: 4.0 });
        let old = profile.insert(StressCondition::Vibration { use_g: 1.0, stress_g: 20.0, exponent: 8.0 });
        assert!(old.is_some());
        assert_eq!(profile.enabled_count(), 1);
    }

    #[test]
    fn test_indices_are_unique() {
        let mut seen = [false; 8];
        for kind in StressKind::ALL {
            assert!(!seen[kind.index()], "duplicate index for {kind}");
            seen[kind.index()] = true;
        }
    }

    #[test]
    fn test_eyring_stress_type_parse() {
        assert_eq!("Voltage".parse::<EyringStressType>(), Ok(EyringStressType::Voltage));
        assert_eq!("humidity".parse::<EyringStressType>(), Ok(EyringStressType::Humidity));
        assert!("pressure".parse::<EyringStressType>().is_err());
    }
}
