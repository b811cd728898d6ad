// Service Floor Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/service-floor-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/service-floor-simulator --days 3 --station-count 5 --resource-count 6
// ```

use anyhow::Context;
use clap::Parser;
use service_floor_simulator::simulation::{LoggingConfig, RunSummary, SimulationClock};
use service_floor_simulator::sink::{CsvReportSink, JsonLineSink, ReportSink};
use service_floor_simulator::types::{CliArgs, OutputFormat, SimulationConfig};
use service_floor_simulator::UniformRandomProcess;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Service Floor Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    match run_simulation(&config) {
        Ok(summary) => {
            print_run_summary(&summary);
            info!("Service Floor Simulator completed successfully");
        }
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            eprintln!("Simulation failed: {:#}", e);
            process::exit(1);
        }
    }
}

/// Build the configured sink and drive the clock through the whole run.
fn run_simulation(config: &SimulationConfig) -> anyhow::Result<RunSummary> {
    let sink: Box<dyn ReportSink> = match config.output_format {
        OutputFormat::Json => Box::new(JsonLineSink::stdout()),
        OutputFormat::Csv => Box::new(
            CsvReportSink::new(config.reports_dir.clone())
                .context("setting up the CSV report sink")?,
        ),
    };

    let random = match config.seed {
        Some(seed) => UniformRandomProcess::with_seed(seed),
        None => UniformRandomProcess::new(),
    };

    let mut clock = SimulationClock::new(config.clone(), random, sink);
    clock.run().context("running the simulation")
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Service Floor Simulator");
    eprintln!("=======================");
    eprintln!("Minute-by-minute simulation of a staffed customer service floor");
    eprintln!();
    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Days: {}", config.days);
    eprintln!("  Stations: {}", config.station_count);
    eprintln!("  Staff Resources per Day: {}", config.resource_count);
    eprintln!("  Output Format: {}", config.output_format);
    if config.output_format == OutputFormat::Csv {
        eprintln!("  Reports Directory: {}", config.reports_dir);
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    if config.step_pause_ms > 0 {
        eprintln!("  Step Pause: {} ms", config.step_pause_ms);
    }
    eprintln!();
}

/// Print the end-of-run totals
fn print_run_summary(summary: &RunSummary) {
    eprintln!();
    eprintln!("Simulation Complete!");
    eprintln!("====================");
    eprintln!("  Report Id: {}", summary.report_id);
    eprintln!("  Days Simulated: {}", summary.days);
    eprintln!("  Customers Served: {}", summary.total_count);
    eprintln!("    Morning Shifts: {}", summary.morning_count);
    eprintln!("    Afternoon Shifts: {}", summary.afternoon_count);
    eprintln!("  Started At: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    eprintln!("  Runtime: {:.2} seconds", summary.duration.as_secs_f64());
}
