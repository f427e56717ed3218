use std::{error::Error, fs, path::PathBuf};

use clap::Parser;
use gmmsg::core::{cavities, product_all};
use gmmsg::discrete::DiscreteMessage;
use gmmsg::gaussian::GaussianMessage;
use serde::Deserialize;

/// Fuses noisy measurements of a scalar and categorical evidence about a label
#[derive(Parser, Debug)]
struct Args {
    /// A YAML scenario, the built-in one is used if omitted
    #[arg(long)]
    scenario: Option<PathBuf>,
}

#[derive(Deserialize, Debug)]
struct Measurement {
    value: f64,
    variance: f64,
}

#[derive(Deserialize, Debug)]
struct Scenario {
    prior: Measurement,
    measurements: Vec<Measurement>,
    /// Likelihoods of each label, one list per observation
    evidence: Vec<Vec<f64>>,
}

const DEFAULT_SCENARIO: &str = "
prior: { value: 25.0, variance: 69.4 }
measurements:
  - { value: 29.0, variance: 16.0 }
  - { value: 31.5, variance: 9.0 }
  - { value: 27.0, variance: 25.0 }
evidence:
  - [0.7, 0.2, 0.1]
  - [0.6, 0.3, 0.1]
  - [0.2, 0.5, 0.3]
";

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let source = match &args.scenario {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_SCENARIO.to_owned(),
    };
    let scenario: Scenario = serde_yaml::from_str(&source)?;
    // Gaussian part ------------------------------------------------------------------------
    let prior = GaussianMessage::from_mean_variance(scenario.prior.value, scenario.prior.variance)?;
    let mut messages = vec![prior];
    for m in &scenario.measurements {
        messages.push(GaussianMessage::from_mean_variance(m.value, m.variance)?);
    }
    let posterior = product_all(&messages)?;
    println!("Prior: {}", prior);
    println!("Posterior: {}", posterior);
    // log evidence accumulated one factor at a time
    let mut belief = prior;
    let mut log_evidence = 0f64;
    for msg in &messages[1..] {
        log_evidence += belief.log_normalization_of_product(msg);
        belief = belief * *msg;
    }
    println!("Log evidence of measurements: {}", log_evidence);
    for (i, cavity) in cavities(&messages)?.iter().enumerate().skip(1) {
        println!("Posterior without measurement {}: {}", i, cavity);
    }
    // Discrete part ------------------------------------------------------------------------
    let evidence = scenario
        .evidence
        .iter()
        .map(|p| DiscreteMessage::from_probabilities(p.as_slice()))
        .collect::<Result<Vec<_>, _>>()?;
    let labels = product_all(&evidence)?;
    println!("Label distribution: {}", labels);
    Ok(())
}
