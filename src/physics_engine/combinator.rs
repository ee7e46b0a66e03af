//! Acceleration-factor combinator
//!
//! Composes the per-stress AFs into one total:
//! - Additive: product of every enabled stress type's AF
//! - Eyring combined: the Eyring AF stands in for temperature × the tagged
//!   stress, and every other enabled stress type still multiplies in

use tracing::debug;

use super::acceleration_models::{condition_af, eyring_af, EyringOutcome};
use crate::error::EngineResult;
use crate::types::{AccelerationInputs, CombinationMode, EyringStressType, StressKind};

/// Eyring contribution to a breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyringContribution {
    pub stress_type: EyringStressType,
    pub af: f64,
    pub correction: f64,
}

/// Per-model AFs plus the combined total.
#[derive(Debug, Clone, PartialEq)]
pub struct AfBreakdown {
    factors: [f64; 8],
    pub total: f64,
    pub mode: &'static str,
    pub eyring: Option<EyringContribution>,
}

impl AfBreakdown {
    /// AF for a stress type; 1.0 when the type is disabled.
    pub fn factor(&self, kind: StressKind) -> f64 {
        self.factors[kind.index()]
    }

    /// Product of the individual factors, ignoring the combination mode.
    pub fn product(&self) -> f64 {
        self.factors.iter().product()
    }
}

/// Evaluate every enabled model and combine per the requested mode.
pub fn combine(inputs: &AccelerationInputs, boltzmann: f64) -> EngineResult<AfBreakdown> {
    let mut factors = [1.0_f64; 8];
    for condition in inputs.stresses.iter() {
        let af = condition_af(condition, boltzmann)?;
        debug!(stress = %condition.kind(), af, "Stress AF");
        factors[condition.kind().index()] = af;
    }

    let (total, eyring) = match &inputs.mode {
        CombinationMode::Additive => (factors.iter().product(), None),
        CombinationMode::EyringCombined(model) => {
            let EyringOutcome { af, correction } = eyring_af(model, boltzmann)?;
            let covered = model.stress_type.covered_kind();
            let rest: f64 = StressKind::ALL
                .iter()
                .filter(|&&k| k != StressKind::Temperature && k != covered)
                .map(|&k| factors[k.index()])
                .product();
            let contribution = EyringContribution {
                stress_type: model.stress_type,
                af,
                correction,
            };
            (af * rest, Some(contribution))
        }
    };

    debug!(total, mode = inputs.mode.label(), "Total AF");
    Ok(AfBreakdown {
        factors,
        total,
        mode: inputs.mode.label(),
        eyring,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::BOLTZMANN_EV_PER_K;
    use crate::types::{EyringModel, StressCondition, StressProfile};
    use proptest::prelude::*;

    const K: f64 = BOLTZMANN_EV_PER_K;

    fn temperature() -> StressCondition {
        StressCondition::Temperature { use_celsius: 25.0, stress_celsius: 85.0, activation_energy_ev: 0.7 }
    }

    fn humidity() -> StressCondition {
        StressCondition::Humidity { use_rh: 60.0, stress_rh: 85.0, exponent: 3.0 }
    }

    #[test]
    fn test_nothing_enabled_is_unity() {
        let breakdown = combine(&AccelerationInputs::additive(StressProfile::new()), K).unwrap();
        assert!((breakdown.total - 1.0).abs() < f64::EPSILON);
        for kind in StressKind::ALL {
            assert!((breakdown.factor(kind) - 1.0).abs() < f64::EPSILON);
        }
        assert!(breakdown.eyring.is_none());
    }

    #[test]
    fn test_additive_is_product() {
        let profile = StressProfile::new()
            .with(temperature())
            .with(humidity())
            .with(StressCondition::Vibration { use_g: 1.0, stress_g: 3.0, exponent: 2.0 });
        let breakdown = combine(&AccelerationInputs::additive(profile), K).unwrap();
        let expected = breakdown.factor(StressKind::Temperature)
            * breakdown.factor(StressKind::Humidity)
            * 9.0;
        assert!((breakdown.total - expected).abs() / expected < 1e-12);
        assert_eq!(breakdown.mode, "additive");
    }

    #[test]
    fn test_eyring_keeps_other_stresses() {
        let profile = StressProfile::new()
            .with(temperature())
            .with(humidity())
            .with(StressCondition::Ultraviolet { field_hours: 2000.0, accelerated_hours: 1000.0 });
        let model = EyringModel {
            stress_type: EyringStressType::Humidity,
            use_celsius: 25.0,
            stress_celsius: 85.0,
            activation_energy_ev: 0.7,
            use_stress: 60.0,
            stress_stress: 85.0,
            interaction: 0.0,
            constant: 1.0,
            stress_exponent: 3.0,
            reference_exponent: 3.0,
        };
        let inputs = AccelerationInputs { stresses: profile, mode: CombinationMode::EyringCombined(model) };
        let breakdown = combine(&inputs, K).unwrap();
        let eyring = breakdown.eyring.unwrap();

        assert!((breakdown.total - eyring.af * 2.0).abs() / breakdown.total < 1e-12);
        // With D = 0 the Eyring AF equals Arrhenius × Peck, so totals agree.
        assert!((breakdown.total - breakdown.product()).abs() / breakdown.total < 1e-9);
        assert_eq!(breakdown.mode, "eyring");
    }

    #[test]
    fn test_model_error_propagates() {
        let profile = StressProfile::new()
            .with(StressCondition::Humidity { use_rh: 0.0, stress_rh: 85.0, exponent: 3.0 });
        let err = combine(&AccelerationInputs::additive(profile), K).unwrap_err();
        assert!(err.to_string().contains("humidity"));
    }

    proptest! {
        #[test]
        fn prop_arrhenius_monotonic_in_stress_temperature(
            use_c in -20.0_f64..60.0,
            delta in 0.0_f64..80.0,
            extra in 0.1_f64..40.0,
            ea in 0.1_f64..1.2,
        ) {
            let af_low = combine(&AccelerationInputs::additive(StressProfile::new().with(
                StressCondition::Temperature { use_celsius: use_c, stress_celsius: use_c + delta, activation_energy_ev: ea },
            )), K).unwrap().total;
            let af_high = combine(&AccelerationInputs::additive(StressProfile::new().with(
                StressCondition::Temperature { use_celsius: use_c, stress_celsius: use_c + delta + extra, activation_energy_ev: ea },
            )), K).unwrap().total;
            prop_assert!(af_low >= 1.0 - 1e-12);
            prop_assert!(af_high > af_low);
        }

        #[test]
        fn prop_total_is_product_of_enabled(
            rh_use in 10.0_f64..80.0,
            rh_gain in 0.0_f64..20.0,
            v_use in 1.0_f64..10.0,
            v_gain in 0.0_f64..5.0,
            n in 0.5_f64..4.0,
        ) {
            let profile = StressProfile::new()
                .with(StressCondition::Humidity { use_rh: rh_use, stress_rh: rh_use + rh_gain, exponent: n })
                .with(StressCondition::Voltage { use_volts: v_use, stress_volts: v_use + v_gain, exponent: n });
            let b = combine(&AccelerationInputs::additive(profile), K).unwrap();
            let expected = b.factor(StressKind::Humidity) * b.factor(StressKind::Voltage);
            prop_assert!((b.total - expected).abs() <= 1e-12 * expected);
        }
    }
}
