//! Industrial load profile generator entry point: CLI wiring and
//! config-driven profile generation.

mod cli;

use std::process;

use ind_profile::config::ScenarioConfig;
use ind_profile::io::export::export_csv;
use ind_profile::runner::run_scenario;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

fn init_tracing() {
    // Respects RUST_LOG; logs go to stderr so stdout only carries the report
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("warning: failed to install log subscriber: {e}");
    }
}

fn main() {
    init_tracing();

    let cli = match cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("error: {e}");
            cli::print_usage();
            process::exit(1);
        }
    };

    // Load config: --scenario takes priority, then --preset
    let loaded = if let Some(ref path) = cli.scenario {
        ScenarioConfig::from_toml_file(path)
    } else {
        ScenarioConfig::from_preset(cli.preset.as_deref().unwrap_or("standard"))
    };
    let mut scenario = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(demand) = cli.demand {
        scenario.demand.annual_demand = demand;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let run = match run_scenario(&scenario) {
        Ok(run) => run,
        Err(e) => {
            error!("profile generation failed: {e}");
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("{}", run.summary);

    if let Some(ref path) = cli.out {
        if let Err(e) = export_csv(&run.profile, path) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path.display(), rows = run.profile.len(), "profile written");
    }
}
