//! Acceleration-factor models, one per stress type
//!
//! Every model maps (use condition, stress condition, constants) to a finite
//! positive multiplier: how many hours of use-condition life one hour at the
//! stress condition represents. Invalid physics is a `Domain` error naming the
//! stress type; nothing is clamped.

use crate::config::defaults::CELSIUS_TO_KELVIN;
use crate::error::{EngineError, EngineResult};
use crate::types::{DoseRateScaling, EyringModel, StressCondition, StressKind};

// ============================================================================
// Shared Checks
// ============================================================================

fn positive(kind: impl std::fmt::Display, label: &str, value: f64) -> EngineResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(EngineError::domain(kind, format!("{label} must be > 0, got {value}")))
    }
}

fn exponent(kind: impl std::fmt::Display, label: &str, value: f64) -> EngineResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::domain(kind, format!("{label} must be finite and >= 0, got {value}")))
    }
}

fn finite_af(kind: impl std::fmt::Display, af: f64) -> EngineResult<f64> {
    if af.is_finite() && af > 0.0 {
        Ok(af)
    } else {
        Err(EngineError::domain(kind, format!("acceleration factor is not a finite positive number ({af})")))
    }
}

fn kelvin(kind: impl std::fmt::Display, label: &str, celsius: f64) -> EngineResult<f64> {
    let k = celsius + CELSIUS_TO_KELVIN;
    if celsius.is_finite() && k > 0.0 {
        Ok(k)
    } else {
        Err(EngineError::domain(
            kind,
            format!("{label} = {celsius} °C is at or below absolute zero"),
        ))
    }
}

/// (stress / use)^n with both levels strictly positive.
fn power_ratio(kind: StressKind, use_value: f64, stress_value: f64, n: f64, what: &str) -> EngineResult<f64> {
    let u = positive(kind, &format!("use {what}"), use_value)?;
    let s = positive(kind, &format!("stress {what}"), stress_value)?;
    let n = exponent(kind, "exponent", n)?;
    finite_af(kind, (s / u).powf(n))
}

// ============================================================================
// Individual Models
// ============================================================================

/// Arrhenius temperature acceleration
///
/// Formula: AF = exp[(Ea / k) · (1/T_use − 1/T_stress)]
///
/// Where:
/// - Ea = activation energy (eV)
/// - k = Boltzmann constant (eV/K)
/// - T = absolute temperature (°C + 273.15)
pub fn arrhenius_af(use_celsius: f64, stress_celsius: f64, activation_energy_ev: f64, boltzmann: f64) -> EngineResult<f64> {
    let kind = StressKind::Temperature;
    let t_use = kelvin(kind, "use temperature", use_celsius)?;
    let t_stress = kelvin(kind, "stress temperature", stress_celsius)?;
    let ea = exponent(kind, "activation energy", activation_energy_ev)?;
    let k = positive(kind, "Boltzmann constant", boltzmann)?;
    finite_af(kind, ((ea / k) * (1.0 / t_use - 1.0 / t_stress)).exp())
}

/// Peck humidity acceleration: AF = (RH_stress / RH_use)^n
pub fn peck_af(use_rh: f64, stress_rh: f64, n: f64) -> EngineResult<f64> {
    power_ratio(StressKind::Humidity, use_rh, stress_rh, n, "relative humidity")
}

/// Inverse power law on voltage: AF = (V_stress / V_use)^β_v
pub fn voltage_af(use_volts: f64, stress_volts: f64, beta_v: f64) -> EngineResult<f64> {
    power_ratio(StressKind::Voltage, use_volts, stress_volts, beta_v, "voltage")
}

/// Coffin-Manson thermal cycling with frequency scaling
///
/// Formula: AF = (ΔT_stress / ΔT_use)^β_tc · (f_stress / f_use)^α_tc
///
/// β_tc is the ΔT exponent, α_tc the cycling-frequency exponent.
pub fn coffin_manson_af(
    use_delta_t: f64,
    stress_delta_t: f64,
    use_frequency: f64,
    stress_frequency: f64,
    delta_t_exponent: f64,
    frequency_exponent: f64,
) -> EngineResult<f64> {
    let kind = StressKind::ThermalCycling;
    let dt = power_ratio(kind, use_delta_t, stress_delta_t, delta_t_exponent, "ΔT")?;
    let freq = power_ratio(kind, use_frequency, stress_frequency, frequency_exponent, "cycling frequency")?;
    finite_af(kind, dt * freq)
}

/// Vibration power law on G level: AF = (G_stress / G_use)^n
pub fn vibration_af(use_g: f64, stress_g: f64, n: f64) -> EngineResult<f64> {
    power_ratio(StressKind::Vibration, use_g, stress_g, n, "G level")
}

/// UV exposure ratio: AF = t_field / t_accelerated
pub fn uv_af(field_hours: f64, accelerated_hours: f64) -> EngineResult<f64> {
    let kind = StressKind::Ultraviolet;
    let field = positive(kind, "field UV exposure time", field_hours)?;
    let accel = positive(kind, "accelerated UV exposure time", accelerated_hours)?;
    finite_af(kind, field / accel)
}

/// Chemical concentration power law: AF = (C_stress / C_use)^n
pub fn chemical_af(use_concentration: f64, stress_concentration: f64, n: f64) -> EngineResult<f64> {
    power_ratio(StressKind::Chemical, use_concentration, stress_concentration, n, "concentration")
}

/// Radiation dose power law, optionally scaled by the dose-rate ratio
///
/// Formula: AF = (D_stress / D_use)^n · [(DR_stress / DR_use)^m]
pub fn radiation_af(use_dose: f64, stress_dose: f64, n: f64, dose_rate: Option<&DoseRateScaling>) -> EngineResult<f64> {
    let kind = StressKind::Radiation;
    let dose = power_ratio(kind, use_dose, stress_dose, n, "dose")?;
    let rate = match dose_rate {
        Some(dr) => power_ratio(kind, dr.use_rate, dr.stress_rate, dr.exponent, "dose rate")?,
        None => 1.0,
    };
    finite_af(kind, dose * rate)
}

/// AF of a single enabled stress condition.
pub fn condition_af(condition: &StressCondition, boltzmann: f64) -> EngineResult<f64> {
    match *condition {
        StressCondition::Temperature {
            use_celsius,
            stress_celsius,
            activation_energy_ev,
        } => arrhenius_af(use_celsius, stress_celsius, activation_energy_ev, boltzmann),
        StressCondition::Humidity { use_rh, stress_rh, exponent } => peck_af(use_rh, stress_rh, exponent),
        StressCondition::Voltage {
            use_volts,
            stress_volts,
            exponent,
        } => voltage_af(use_volts, stress_volts, exponent),
        StressCondition::ThermalCycling {
            use_delta_t,
            stress_delta_t,
            use_frequency,
            stress_frequency,
            delta_t_exponent,
            frequency_exponent,
        } => coffin_manson_af(
            use_delta_t,
            stress_delta_t,
            use_frequency,
            stress_frequency,
            delta_t_exponent,
            frequency_exponent,
        ),
        StressCondition::Vibration { use_g, stress_g, exponent } => vibration_af(use_g, stress_g, exponent),
        StressCondition::Ultraviolet {
            field_hours,
            accelerated_hours,
        } => uv_af(field_hours, accelerated_hours),
        StressCondition::Chemical {
            use_concentration,
            stress_concentration,
            exponent,
        } => chemical_af(use_concentration, stress_concentration, exponent),
        StressCondition::Radiation {
            use_dose,
            stress_dose,
            exponent,
            ref dose_rate,
        } => radiation_af(use_dose, stress_dose, exponent, dose_rate.as_ref()),
    }
}

// ============================================================================
// Eyring Combined Model
// ============================================================================

/// Result of the Eyring temperature × stress model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyringOutcome {
    /// life(T_use, S_use) / life(T_stress, S_stress)
    pub af: f64,
    /// AF ÷ (Arrhenius AF × plain power-law AF for the same stress)
    pub correction: f64,
}

/// Eyring combined acceleration
///
/// Formula: life(T, S) = A · (1/S)^B · exp(Ea / (k·T)) · exp(D · S / T)
///
/// The ratio is evaluated in log space so large Ea/kT terms do not overflow
/// before they cancel. A cancels but must still be positive.
pub fn eyring_af(model: &EyringModel, boltzmann: f64) -> EngineResult<EyringOutcome> {
    let subject = format!("eyring ({})", model.stress_type.covered_kind());
    let t_use = kelvin(&subject, "use temperature", model.use_celsius)?;
    let t_stress = kelvin(&subject, "stress temperature", model.stress_celsius)?;
    let ea = exponent(&subject, "activation energy", model.activation_energy_ev)?;
    let k = positive(&subject, "Boltzmann constant", boltzmann)?;
    let s_use = positive(&subject, "use stress level", model.use_stress)?;
    let s_stress = positive(&subject, "stress level", model.stress_stress)?;
    positive(&subject, "constant A", model.constant)?;
    let b = exponent(&subject, "exponent B", model.stress_exponent)?;
    if !model.interaction.is_finite() {
        return Err(EngineError::domain(&subject, format!("interaction D must be finite, got {}", model.interaction)));
    }
    let d = model.interaction;

    let ln_life = |t: f64, s: f64| -> f64 { b * (1.0 / s).ln() + ea / (k * t) + d * s / t };
    let af = finite_af(&subject, (ln_life(t_use, s_use) - ln_life(t_stress, s_stress)).exp())?;

    let thermal = arrhenius_af(model.use_celsius, model.stress_celsius, ea, boltzmann)?;
    let plain = power_ratio(
        model.stress_type.covered_kind(),
        s_use,
        s_stress,
        model.reference_exponent,
        "stress level",
    )?;
    let correction = af / (thermal * plain);

    Ok(EyringOutcome { af, correction })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::BOLTZMANN_EV_PER_K;
    use crate::types::EyringStressType;

    const K: f64 = BOLTZMANN_EV_PER_K;

    #[test]
    fn test_arrhenius_equal_temperatures_is_unity() {
        let af = arrhenius_af(55.0, 55.0, 0.7, K).unwrap();
        assert!((af - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_arrhenius_reference_value() {
        // 0.7 eV, 55 °C → 85 °C
        let expected = ((0.7 / K) * (1.0 / 328.15 - 1.0 / 358.15)).exp();
        let af = arrhenius_af(55.0, 85.0, 0.7, K).unwrap();
        assert!((af - expected).abs() < 1e-9);
        assert!(af > 6.0 && af < 7.0, "af = {af}");
    }

    #[test]
    fn test_arrhenius_absolute_zero_rejected() {
        let err = arrhenius_af(-273.15, 85.0, 0.7, K).unwrap_err();
        assert_eq!(err.kind(), "domain");
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_arrhenius_negative_ea_rejected() {
        assert!(arrhenius_af(25.0, 85.0, -0.1, K).is_err());
    }

    #[test]
    fn test_peck_equal_humidity_is_unity() {
        assert!((peck_af(85.0, 85.0, 3.0).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_peck_zero_use_humidity_names_humidity() {
        let err = peck_af(0.0, 85.0, 3.0).unwrap_err();
        assert_eq!(err.kind(), "domain");
        assert!(err.to_string().contains("humidity"), "{err}");
    }

    #[test]
    fn test_power_laws() {
        assert!((voltage_af(3.3, 6.6, 2.0).unwrap() - 4.0).abs() < 1e-12);
        assert!((vibration_af(2.0, 10.0, 4.0).unwrap() - 625.0).abs() < 1e-9);
        assert!((chemical_af(1.0, 5.0, 1.5).unwrap() - 5.0_f64.powf(1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_coffin_manson_combines_delta_t_and_frequency() {
        // (100/20)^2 · (24/2)^(1/3)
        let af = coffin_manson_af(20.0, 100.0, 2.0, 24.0, 2.0, 1.0 / 3.0).unwrap();
        let expected = 25.0 * 12.0_f64.powf(1.0 / 3.0);
        assert!((af - expected).abs() < 1e-9);
    }

    #[test]
    fn test_uv_ratio() {
        assert!((uv_af(8760.0, 1000.0).unwrap() - 8.76).abs() < 1e-12);
        assert!(uv_af(8760.0, 0.0).is_err());
    }

    #[test]
    fn test_radiation_dose_rate_scaling() {
        let plain = radiation_af(10.0, 100.0, 1.0, None).unwrap();
        assert!((plain - 10.0).abs() < 1e-12);
        let scaled = radiation_af(
            10.0,
            100.0,
            1.0,
            Some(&DoseRateScaling { use_rate: 0.01, stress_rate: 1.0, exponent: 0.5 }),
        )
        .unwrap();
        assert!((scaled - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_exponent_rejected() {
        let err = voltage_af(3.3, 5.0, -1.0).unwrap_err();
        assert!(err.to_string().contains("voltage"));
    }

    #[test]
    fn test_overflow_is_domain_error() {
        let err = vibration_af(1.0, 1e6, 1e3).unwrap_err();
        assert_eq!(err.kind(), "domain");
    }

    fn eyring(stress_type: EyringStressType, interaction: f64, stress_exponent: f64) -> EyringModel {
        EyringModel {
            stress_type,
            use_celsius: 30.0,
            stress_celsius: 85.0,
            activation_energy_ev: 0.7,
            use_stress: 60.0,
            stress_stress: 85.0,
            interaction,
            constant: 1.0,
            stress_exponent,
            reference_exponent: stress_exponent,
        }
    }

    #[test]
    fn test_eyring_without_interaction_equals_product() {
        // D = 0 and B = n reduce Eyring to Arrhenius × Peck.
        let model = eyring(EyringStressType::Humidity, 0.0, 2.66);
        let outcome = eyring_af(&model, K).unwrap();
        let product = arrhenius_af(30.0, 85.0, 0.7, K).unwrap() * peck_af(60.0, 85.0, 2.66).unwrap();
        assert!((outcome.af - product).abs() / product < 1e-12);
        assert!((outcome.correction - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_eyring_interaction_changes_af() {
        let base = eyring_af(&eyring(EyringStressType::Voltage, 0.0, 2.0), K).unwrap();
        let coupled = eyring_af(&eyring(EyringStressType::Voltage, -5.0, 2.0), K).unwrap();
        assert!((coupled.af - base.af).abs() > 1e-6);
        assert!((coupled.correction - 1.0).abs() > 1e-6);
    }

    #[test]
    fn test_eyring_voltage_reference_case() {
        // 32 → 85 °C, 1.0 → 1.2 V, D = 0.1, A = 1000, B = 2, β_v = 3
        let model = EyringModel {
            stress_type: EyringStressType::Voltage,
            use_celsius: 32.0,
            stress_celsius: 85.0,
            activation_energy_ev: 0.7,
            use_stress: 1.0,
            stress_stress: 1.2,
            interaction: 0.1,
            constant: 1000.0,
            stress_exponent: 2.0,
            reference_exponent: 3.0,
        };
        let outcome = eyring_af(&model, K).unwrap();
        assert!((outcome.af - 74.004_144).abs() < 1e-5, "af = {}", outcome.af);
        assert!((outcome.correction - 0.833_327).abs() < 1e-5, "correction = {}", outcome.correction);
    }

    #[test]
    fn test_eyring_requires_positive_constant() {
        let mut model = eyring(EyringStressType::Humidity, 0.0, 2.0);
        model.constant = 0.0;
        let err = eyring_af(&model, K).unwrap_err();
        assert!(err.to_string().contains("eyring"));
    }
}
