//! Accelerated Life Test Simulation
//!
//! Draws unit lifetimes from a Weibull distribution at the stress condition,
//! runs a time-terminated test, and prints the resulting calculation request.
//! Units that survive `--test-hours` are suspensions; when none fail the
//! request carries only zero-failure parameters.
//!
//! # Usage
//! ```bash
//! ./alt-simulation --units 20 --beta 2.5 --eta 1500 --seed 7 | ./alt-reliability calculate
//! ```

use clap::Parser;
use rand::prelude::*;
use rand_distr::Weibull;
use serde_json::{json, Value};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "alt-simulation")]
#[command(about = "Accelerated life test simulation for alt-reliability")]
#[command(version = "1.0")]
struct Args {
    /// Units placed on test
    #[arg(short = 'n', long, default_value = "20", value_parser = clap::value_parser!(u32).range(1..=100_000))]
    units: u32,

    /// Weibull shape at stress
    #[arg(long, default_value = "2.0")]
    beta: f64,

    /// Weibull scale at stress (hours)
    #[arg(long, default_value = "2000.0")]
    eta: f64,

    /// Test duration at stress (hours)
    #[arg(long, default_value = "1000.0")]
    test_hours: f64,

    /// Use temperature (°C)
    #[arg(long, default_value = "40.0")]
    t_use: f64,

    /// Stress temperature (°C)
    #[arg(long, default_value = "85.0")]
    t_alt: f64,

    /// Activation energy (eV)
    #[arg(long, default_value = "0.7")]
    ea: f64,

    /// Use relative humidity (%); humidity stress is disabled when omitted
    #[arg(long, requires = "rh_alt")]
    rh_use: Option<f64>,

    /// Stress relative humidity (%)
    #[arg(long, requires = "rh_use")]
    rh_alt: Option<f64>,

    /// Confidence level for the zero-failure bound
    #[arg(long, default_value = "0.9")]
    cl: f64,

    /// Mission length (years)
    #[arg(long, default_value = "2.0")]
    mission_years: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the request
    #[arg(long)]
    pretty: bool,
}

// ============================================================================
// Simulation
// ============================================================================

/// Failure times observed before the test ends, ascending.
fn run_test(rng: &mut StdRng, dist: &Weibull<f64>, units: u32, test_hours: f64) -> Vec<f64> {
    let mut failures: Vec<f64> = (0..units)
        .map(|_| dist.sample(rng))
        .filter(|&t| t <= test_hours)
        .map(|t| (t * 100.0).round() / 100.0)
        .collect();
    failures.sort_by(f64::total_cmp);
    failures
}

fn build_request(args: &Args, failures: &[f64]) -> Value {
    let humidity = args.rh_use.zip(args.rh_alt);

    let mut af_params = json!({
        "enable_temp": true,
        "t_use": args.t_use,
        "t_alt": args.t_alt,
        "ea": args.ea,
        "enable_hum": humidity.is_some(),
    });
    if let (Some((rh_use, rh_alt)), Some(obj)) = (humidity, af_params.as_object_mut()) {
        obj.insert("rh_use".into(), json!(rh_use));
        obj.insert("rh_alt".into(), json!(rh_alt));
        obj.insert("n_hum".into(), json!(3.0));
    }

    json!({
        "af_params": af_params,
        "weibull_data": {
            "failures": failures,
            "options": { "sample_size": args.units },
        },
        "zero_fail_params": {
            "n": args.units,
            "t_test": args.test_hours,
            "cl": args.cl,
        },
        "mission_years": args.mission_years,
    })
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let dist = Weibull::new(args.eta, args.beta)
        .map_err(|e| anyhow::anyhow!("invalid Weibull parameters (beta={}, eta={}): {e:?}", args.beta, args.eta))?;

    let failures = run_test(&mut rng, &dist, args.units, args.test_hours);
    eprintln!(
        "[simulation] {} of {} units failed within {} h",
        failures.len(),
        args.units,
        args.test_hours
    );

    let request = build_request(&args, &failures);
    let out = if args.pretty {
        serde_json::to_string_pretty(&request)?
    } else {
        serde_json::to_string(&request)?
    };
    println!("{out}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_run_is_reproducible() {
        let dist = Weibull::new(500.0, 2.0).unwrap();
        let a = run_test(&mut StdRng::seed_from_u64(3), &dist, 50, 400.0);
        let b = run_test(&mut StdRng::seed_from_u64(3), &dist, 50, 400.0);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0] <= w[1]));
        assert!(a.iter().all(|&t| t <= 400.0));
    }

    #[test]
    fn test_request_round_trips_through_engine() {
        let args = Args::parse_from(["alt-simulation", "--seed", "11", "--rh-use", "50", "--rh-alt", "85"]);
        let request = build_request(&args, &[120.0, 480.0, 910.0]);
        let resp = alt_reliability::calculate_value(request, &alt_reliability::ReliabilityConfig::default());
        assert!(!resp.is_error(), "{:?}", resp.error);
        assert!(resp.af_result.unwrap().af_rh > 1.0);
    }
}
