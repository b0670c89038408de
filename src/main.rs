use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use trialpower::compute::*;
use trialpower::logging::init_tracing;

#[derive(Parser)]
#[command(name = "trialpower", version, about = "Power analysis for randomized pricing experiments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a two-sample t-test power query for its one missing quantity
    Power(PowerArgs),
    /// Generate a pricing experiment and re-run it on random sub-samples
    Simulate(SimulateArgs),
}

#[derive(Args)]
struct PowerArgs {
    /// Sample size per group
    #[arg(long)]
    n: Option<f64>,
    #[arg(long)]
    alpha: Option<f64>,
    #[arg(long)]
    power: Option<f64>,
    /// Standardized effect size
    #[arg(long, allow_hyphen_values = true)]
    effect_size: Option<f64>,
    #[arg(long, value_enum, default_value = "two-sided")]
    alternative: HypothesisType,
    /// Per-group sample sizes at which to also report power
    #[arg(long, value_delimiter = ',')]
    curve: Vec<f64>,
}

#[derive(Args)]
struct SimulateArgs {
    /// JSON file with `experiment` and `simulation` sections
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    replicates: Option<usize>,
    #[arg(long)]
    treatment_level: Option<u32>,
    #[arg(long)]
    control_level: Option<u32>,
    /// Fraction of each arm drawn per replicate
    #[arg(long, conflicts_with = "per_group")]
    fraction: Option<f64>,
    /// Number of subjects drawn from each arm per replicate
    #[arg(long)]
    per_group: Option<usize>,
    #[arg(long)]
    with_replacement: bool,
    #[arg(long, value_enum)]
    outcome: Option<Outcome>,
    #[arg(long)]
    critical_value: Option<f64>,
    /// Also simulate at each of these fractions
    #[arg(long, value_delimiter = ',')]
    sweep: Vec<f64>,
    /// Include the per-replicate table in the output
    #[arg(long)]
    replicate_table: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimulateConfig {
    experiment: ExperimentSpec,
    simulation: SimulationSettings,
}

#[derive(Serialize)]
struct PowerReport {
    solution: PowerSolution,
    required_n: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    curve: Vec<PowerPoint>,
}

#[derive(Serialize)]
struct SweepReport {
    fraction: f64,
    n_treatment: usize,
    n_control: usize,
    rejection_rate: Option<f64>,
    undefined_count: usize,
}

#[derive(Serialize)]
struct SimulateReport {
    settings: SimulationSettings,
    groups: Vec<GroupSummary>,
    full_sample: Option<RegressionFit>,
    effect_size: Option<f64>,
    predicted_rejection_rate: Option<f64>,
    n_treatment: usize,
    n_control: usize,
    rejections: usize,
    undefined_count: usize,
    rejection_rate: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sweep: Vec<SweepReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    replicates: Option<Vec<TrialResult>>,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let output = match cli.command {
        Command::Power(args) => run_power(args),
        Command::Simulate(args) => run_simulate(args),
    };
    match output {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_power(args: PowerArgs) -> Result<String, Box<dyn std::error::Error>> {
    let query = PowerQuery {
        n: args.n,
        significance_level: args.alpha,
        power: args.power,
        effect_size: args.effect_size,
        alternative: args.alternative,
    };
    let solution = solve_power(&query)?;
    let curve = power_curve(
        &args.curve,
        solution.effect_size,
        solution.significance_level,
        solution.alternative,
    )?;
    let report = PowerReport {
        solution,
        required_n: solution.required_n(),
        curve,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn load_config(args: &SimulateArgs) -> Result<SimulateConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading simulation config");
            serde_json::from_str(&fs::read_to_string(path)?)?
        }
        None => SimulateConfig::default(),
    };
    let settings = &mut config.simulation;
    if let Some(seed) = args.seed {
        settings.seed = seed;
        config.experiment.seed = seed;
    }
    if let Some(replicates) = args.replicates {
        settings.replicates = replicates;
    }
    if let Some(level) = args.treatment_level {
        settings.treatment_level = level;
    }
    if let Some(level) = args.control_level {
        settings.control_level = level;
    }
    if let Some(fraction) = args.fraction {
        settings.subsample_size = SubsampleSize::Fraction(fraction);
    }
    if let Some(n) = args.per_group {
        settings.subsample_size = SubsampleSize::PerGroup(n);
    }
    if args.with_replacement {
        settings.sampling_mode = SamplingMode::WithReplacement;
    }
    if let Some(outcome) = args.outcome {
        settings.outcome = outcome;
    }
    if let Some(critical_value) = args.critical_value {
        settings.critical_value = critical_value;
    }
    Ok(config)
}

fn run_simulate(args: SimulateArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config(&args)?;
    let settings = config.simulation;
    let observations = simulate_pricing_experiment(&config.experiment.arms, config.experiment.seed)?;
    let groups = summarize_groups(&observations, settings.outcome);

    let full_sample = regress_on_treatment(
        &observations,
        settings.treatment_level,
        settings.control_level,
        settings.outcome,
    )
    .inspect_err(|e| warn!("full-sample regression unavailable: {e}"))
    .ok();
    let (treatment, control) = split_arms(
        &observations,
        settings.treatment_level,
        settings.control_level,
        settings.outcome,
    )?;
    let effect_size = standardized_effect(&treatment, &control)
        .inspect_err(|e| warn!("effect size unavailable: {e}"))
        .ok();
    let predicted = predicted_rejection_rate(&observations, &settings)
        .inspect_err(|e| warn!("predicted rejection rate unavailable: {e}"))
        .ok();

    let result = run_trial_sims(&observations, &settings)?;
    let sweep = sweep_fractions(&observations, &settings, &args.sweep)?
        .into_iter()
        .map(|row| SweepReport {
            fraction: row.fraction,
            n_treatment: row.result.n_treatment,
            n_control: row.result.n_control,
            rejection_rate: row.result.rejection_rate,
            undefined_count: row.result.undefined_count,
        })
        .collect();

    let report = SimulateReport {
        settings,
        groups,
        full_sample,
        effect_size,
        predicted_rejection_rate: predicted,
        n_treatment: result.n_treatment,
        n_control: result.n_control,
        rejections: result.rejections,
        undefined_count: result.undefined_count,
        rejection_rate: result.rejection_rate,
        sweep,
        replicates: args.replicate_table.then_some(result.replicates),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
