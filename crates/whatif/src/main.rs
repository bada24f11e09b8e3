//! Command-line frontend for the what-if analysis engine
//!
//! Wires the two illustrative models (bookstore profit, new-car NPV) to the
//! experiment drivers in `whatif_core`: generates random draws, runs the
//! requested experiment, and prints or exports the resulting table.

mod logging;
mod models;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::ensure;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal, Triangular};
use tracing::info;

use whatif_core::{
    DEFAULT_MAX_ITERATIONS, ResultTable, ScenarioInputs, SimulateOptions, data_table,
    flatten_results, goal_seek, simulate,
};

use models::{BookstoreModel, NewCarModel};

/// Rows beyond this are summarized instead of printed
const MAX_PRINTED_ROWS: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "whatif")]
#[command(about = "What-if analysis: data tables, Monte Carlo simulation, goal seek")]
struct Args {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deterministic bookstore profit table over a range of order quantities
    DataTable {
        /// Smallest order quantity in the sweep
        #[arg(long, default_value_t = 100.0)]
        min_quantity: f64,

        /// Largest order quantity in the sweep
        #[arg(long, default_value_t = 300.0)]
        max_quantity: f64,

        /// Spacing between order quantities
        #[arg(long, default_value_t = 25.0)]
        step: f64,

        /// Outputs to tabulate, comma separated
        #[arg(long, value_delimiter = ',', default_value = "profit")]
        outputs: Vec<String>,

        /// Write the table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Monte Carlo simulation of bookstore profit under demand uncertainty
    Simulate {
        /// Number of replications
        #[arg(short = 'n', long, default_value_t = 1000)]
        replications: usize,

        /// RNG seed
        #[arg(long, default_value_t = 4470)]
        seed: u64,

        /// Mean of the normal demand distribution
        #[arg(long, default_value_t = 193.0)]
        demand_mean: f64,

        /// Standard deviation of the normal demand distribution
        #[arg(long, default_value_t = 40.0)]
        demand_sd: f64,

        /// Sweep order quantity across scenarios: MIN MAX STEP
        #[arg(long, num_args = 3, value_names = ["MIN", "MAX", "STEP"])]
        quantity_grid: Option<Vec<f64>>,

        /// Record the raw demand draws in each scenario record
        #[arg(long)]
        keep_random_inputs: bool,

        /// Write the flattened table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Dump the raw scenario records as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Find the demand at which bookstore profit hits a target
    GoalSeek {
        /// Profit target
        #[arg(long, default_value_t = 0.0)]
        target: f64,

        /// Lower end of the demand bracket
        #[arg(long, default_value_t = 0.0)]
        low: f64,

        /// Upper end of the demand bracket
        #[arg(long, default_value_t = 200.0)]
        high: f64,

        /// Bisection iteration budget
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        max_iterations: usize,
    },

    /// Monte Carlo NPV of the new-car development model
    NewCar {
        /// Number of replications
        #[arg(short = 'n', long, default_value_t = 1000)]
        replications: usize,

        /// RNG seed
        #[arg(long, default_value_t = 1965)]
        seed: u64,

        /// Triangular year-1 demand: MIN MAX MODE
        #[arg(long, num_args = 3, value_names = ["MIN", "MAX", "MODE"],
              default_values_t = [35_000.0, 70_000.0, 53_560.0])]
        demand: Vec<f64>,

        /// Triangular annual demand decay: MIN MAX MODE
        #[arg(long, num_args = 3, value_names = ["MIN", "MAX", "MODE"],
              default_values_t = [0.02, 0.12, 0.077])]
        decay: Vec<f64>,

        /// Sweep fixed development cost across scenarios: MIN MAX STEP
        #[arg(long, num_args = 3, value_names = ["MIN", "MAX", "STEP"])]
        cost_grid: Option<Vec<f64>>,

        /// Write the flattened table to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    logging::init_logging(&args.log_level)?;

    match args.command {
        Command::DataTable {
            min_quantity,
            max_quantity,
            step,
            outputs,
            csv,
        } => run_data_table(min_quantity, max_quantity, step, &outputs, csv.as_deref()),
        Command::Simulate {
            replications,
            seed,
            demand_mean,
            demand_sd,
            quantity_grid,
            keep_random_inputs,
            csv,
            json,
        } => run_simulate(
            replications,
            seed,
            demand_mean,
            demand_sd,
            quantity_grid.as_deref(),
            keep_random_inputs,
            csv.as_deref(),
            json,
        ),
        Command::GoalSeek {
            target,
            low,
            high,
            max_iterations,
        } => run_goal_seek(target, low, high, max_iterations),
        Command::NewCar {
            replications,
            seed,
            demand,
            decay,
            cost_grid,
            csv,
        } => run_new_car(
            replications,
            seed,
            &demand,
            &decay,
            cost_grid.as_deref(),
            csv.as_deref(),
        ),
    }
}

/// Inclusive arithmetic range of sweep values
fn range_values(min: f64, max: f64, step: f64) -> color_eyre::Result<Vec<f64>> {
    ensure!(step > 0.0, "step must be positive, got {step}");
    ensure!(max >= min, "max {max} is below min {min}");

    let mut values = Vec::new();
    let mut x = min;
    while x <= max + 1e-9 {
        values.push(x);
        x += step;
    }
    Ok(values)
}

fn emit_table(table: &ResultTable, csv: Option<&std::path::Path>) -> color_eyre::Result<()> {
    if table.len() <= MAX_PRINTED_ROWS {
        print!("{table}");
    } else {
        println!("({} rows; use --csv to export the full table)", table.len());
    }

    if let Some(path) = csv {
        report::write_csv(table, path)?;
        info!("wrote {} rows to {}", table.len(), path.display());
    }
    Ok(())
}

fn run_data_table(
    min_quantity: f64,
    max_quantity: f64,
    step: f64,
    outputs: &[String],
    csv: Option<&std::path::Path>,
) -> color_eyre::Result<()> {
    let model = BookstoreModel::default();
    let inputs =
        ScenarioInputs::new().with("order_quantity", range_values(min_quantity, max_quantity, step)?);
    let output_names: Vec<&str> = outputs.iter().map(String::as_str).collect();

    info!(
        scenarios = inputs.num_scenarios(),
        outputs = output_names.len(),
        "running data table"
    );
    let table = data_table(&model, &inputs, &output_names)?;

    print!("{table}");
    if let Some(path) = csv {
        report::write_csv(&table, path)?;
        info!("wrote {} rows to {}", table.len(), path.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    replications: usize,
    seed: u64,
    demand_mean: f64,
    demand_sd: f64,
    quantity_grid: Option<&[f64]>,
    keep_random_inputs: bool,
    csv: Option<&std::path::Path>,
    json: bool,
) -> color_eyre::Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let demand = Normal::new(demand_mean, demand_sd)?;
    let draws: Vec<f64> = (0..replications).map(|_| demand.sample(&mut rng)).collect();

    let scenario_inputs = match quantity_grid {
        Some(&[min, max, step]) => {
            Some(ScenarioInputs::new().with("order_quantity", range_values(min, max, step)?))
        }
        _ => None,
    };
    let options = SimulateOptions {
        scenario_inputs,
        keep_random_inputs,
    };

    let model = BookstoreModel::default();
    let randoms = vec![("demand".to_string(), draws)];

    info!(replications, seed, "running simulation");
    let records = simulate(&model, &randoms, &["profit"], &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let table = flatten_results(&records)?;
    if let Some(summary) = report::summarize(&table, "profit") {
        println!("profit\n{summary}\n");
    }
    emit_table(&table, csv)
}

fn run_goal_seek(
    target: f64,
    low: f64,
    high: f64,
    max_iterations: usize,
) -> color_eyre::Result<()> {
    let model = BookstoreModel::default();

    info!(goal = target, low, high, "running goal seek on profit by demand");
    match goal_seek(&model, "profit", target, "demand", (low, high), max_iterations)? {
        Some(demand) => println!("profit reaches {target} at demand {demand:.4}"),
        None => println!("no solution: profit does not cross {target} on [{low}, {high}]"),
    }
    Ok(())
}

fn run_new_car(
    replications: usize,
    seed: u64,
    demand: &[f64],
    decay: &[f64],
    cost_grid: Option<&[f64]>,
    csv: Option<&std::path::Path>,
) -> color_eyre::Result<()> {
    ensure!(demand.len() == 3, "--demand takes MIN MAX MODE");
    ensure!(decay.len() == 3, "--decay takes MIN MAX MODE");

    let mut rng = StdRng::seed_from_u64(seed);
    let demand_dist = Triangular::new(demand[0], demand[1], demand[2])?;
    let decay_dist = Triangular::new(decay[0], decay[1], decay[2])?;

    let demand_draws: Vec<f64> = (0..replications)
        .map(|_| demand_dist.sample(&mut rng))
        .collect();
    let decay_draws: Vec<f64> = (0..replications)
        .map(|_| decay_dist.sample(&mut rng))
        .collect();

    let scenario_inputs = match cost_grid {
        Some(&[min, max, step]) => {
            Some(ScenarioInputs::new().with("fixed_dev_cost", range_values(min, max, step)?))
        }
        _ => None,
    };
    let options = SimulateOptions {
        scenario_inputs,
        keep_random_inputs: false,
    };

    let model = NewCarModel::default();
    let randoms = vec![
        ("yr1_demand".to_string(), demand_draws),
        ("demand_decr".to_string(), decay_draws),
    ];

    info!(replications, seed, "running new-car NPV simulation");
    let records = simulate(&model, &randoms, &["npv"], &options)?;
    let table = flatten_results(&records)?;

    if let Some(summary) = report::summarize(&table, "npv") {
        println!("npv\n{summary}\n");
    }
    if let Some(npvs) = table.scalar_column("npv") {
        let losses = npvs.iter().filter(|&&x| x < 0.0).count();
        println!(
            "P(loss) = {:.3} ({losses} of {} replications)\n",
            losses as f64 / npvs.len() as f64,
            npvs.len()
        );
    }
    emit_table(&table, csv)
}
