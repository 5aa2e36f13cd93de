//! Parking lot simulator CLI
//!
//! Runs a lot design file or the built-in scenarios under a seeded,
//! reproducible random source.

use clap::Parser;
use parklot_core::{LotDesign, NullSink, MAX_PARKING_DURATION, SIMULATION_DURATION};
use parklot_sim::scenarios::ScenarioId;
use parklot_sim::{load_design, ScenarioResult, ScenarioRunner, SimError, SimExport, TracingSink};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Parking lot discrete-event simulator
#[derive(Parser, Debug)]
#[command(name = "parklot-sim")]
#[command(about = "Simulate a day of arrivals and departures at a parking lot", long_about = None)]
struct Args {
    /// Lot design file (one row per line, comma separated S/R/L/E/N labels)
    design: Option<PathBuf>,

    /// Hourly arrival rate for the design file
    #[arg(requires = "design")]
    rate: Option<u32>,

    /// Hourly arrival rate overriding the default of every lot
    #[arg(short = 'r', long)]
    arrival_rate: Option<u32>,

    /// Built-in scenario to run when no design file is given (compact, standard, ev_hub, truck_stop, gridlock, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Master seed for determinism (0 = random from time)
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Number of consecutive seeds to run as a parallel batch
    #[arg(long, default_value = "1")]
    seeds: usize,

    /// Simulated seconds to run
    #[arg(long, default_value_t = SIMULATION_DURATION)]
    steps: u64,

    /// Parking ceiling in seconds
    #[arg(long, default_value_t = MAX_PARKING_DURATION)]
    max_duration: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// JSON output for CI parsing
    #[arg(long)]
    json: bool,

    /// Export the event stream and occupancy curve to a JSON file
    #[arg(long)]
    export: Option<String>,

    /// Seconds between exported occupancy frames
    #[arg(long, default_value = "60")]
    frame_interval: u64,
}

/// One lot to simulate.
struct Job {
    name: String,
    design: LotDesign,
    default_rate: u32,
}

fn init_logging(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    // Keep stdout clean for the JSON summary
    let installed = if args.json {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    if let Err(e) = installed {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn base_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn jobs(args: &Args) -> Result<Vec<Job>, SimError> {
    if let Some(path) = &args.design {
        let rate = args
            .rate
            .or(args.arrival_rate)
            .ok_or_else(|| SimError::usage("parklot-sim <lot-design> <hourly-rate>"))?;
        return Ok(vec![Job {
            name: path.display().to_string(),
            design: load_design(path)?,
            default_rate: rate,
        }]);
    }

    let scenarios = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args
            .scenario
            .parse::<ScenarioId>()
            .map_err(|_| SimError::UnknownScenario(args.scenario.clone()))?]
    };

    scenarios
        .into_iter()
        .map(|scenario| {
            Ok(Job {
                name: scenario.name().to_string(),
                design: scenario.design()?,
                default_rate: scenario.default_arrival_rate(),
            })
        })
        .collect()
}

fn run_with_export(
    runner: &ScenarioRunner,
    job: Job,
    frame_interval: u64,
    export_path: &str,
) -> Result<ScenarioResult, SimError> {
    let mut sink = (
        SimExport::new(&job.name, runner.seed(), 0, frame_interval),
        TracingSink,
    );
    let result = runner.run_design(&job.name, job.design, job.default_rate, &mut sink)?;

    let (mut export, _) = sink;
    export.capacity = result.capacity;
    export.finalize(result.stats.clone(), result.passed);

    match export.write_to_file(export_path) {
        Ok(()) => info!(
            "Exported {} events ({} frames) to {}",
            export.events.len(),
            export.frames.len(),
            export_path
        ),
        Err(source) => {
            return Err(SimError::Io {
                path: PathBuf::from(export_path),
                source,
            })
        }
    }
    Ok(result)
}

fn run(args: &Args) -> Result<Vec<ScenarioResult>, SimError> {
    let seed = base_seed(args.seed);
    let mut runner = ScenarioRunner::new(seed)
        .with_steps(args.steps)
        .with_max_parking_duration(args.max_duration);
    if let Some(rate) = args.arrival_rate {
        runner = runner.with_arrival_rate(rate);
    }

    let jobs = jobs(args)?;

    if let Some(export_path) = &args.export {
        if jobs.len() > 1 || args.seeds > 1 {
            return Err(SimError::usage(
                "--export only supports a single scenario and a single seed",
            ));
        }
        info!("Running with export to: {}", export_path);
        let mut results = Vec::new();
        for job in jobs {
            results.push(run_with_export(&runner, job, args.frame_interval, export_path)?);
        }
        return Ok(results);
    }

    let mut results = Vec::new();
    for job in jobs {
        if args.seeds > 1 {
            let seeds: Vec<u64> = (0..args.seeds as u64)
                .map(|offset| seed.wrapping_add(offset))
                .collect();
            results.extend(runner.run_batch(&job.name, &job.design, job.default_rate, &seeds)?);
        } else if args.json {
            results.push(runner.run_design(&job.name, job.design, job.default_rate, &mut NullSink)?);
        } else {
            results.push(runner.run_design(&job.name, job.design, job.default_rate, &mut TracingSink)?);
        }
    }
    Ok(results)
}

fn report(args: &Args, results: &[ScenarioResult]) -> usize {
    let failed_count = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if args.json {
        let summary = serde_json::json!({
            "total": total,
            "passed": total - failed_count,
            "failed": failed_count,
            "results": results,
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => error!("Failed to serialize summary: {}", e),
        }
        return failed_count;
    }

    for result in results {
        if result.passed {
            info!(
                "✓ {} (seed={}) PASSED | occupancy {}/{} | queue {}",
                result.name,
                result.seed,
                result.final_occupancy,
                result.capacity,
                result.stats.final_queue_length
            );
        } else {
            error!(
                "✗ {} (seed={}) FAILED: {}",
                result.name,
                result.seed,
                result.failure_reason.as_deref().unwrap_or("unknown")
            );
        }
    }

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if failed_count == 0 {
        info!("✅ All {} runs passed!", total);
    } else {
        error!("❌ {}/{} runs failed!", failed_count, total);
    }
    failed_count
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    if !args.json {
        info!("Parking Lot Simulator v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let results = match run(&args) {
        Ok(results) => results,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    // Exit with proper code for CI
    if report(&args, &results) > 0 {
        std::process::exit(1);
    }
}
