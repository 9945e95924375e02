use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use geocheck::config::Config;
use geocheck::constants;
use geocheck::detect::CoordinateDetectionCheck;
use geocheck::error::Result;
use geocheck::logging;
use geocheck::probe::LogoutRedirectCheck;
use geocheck::stub;
use geocheck::types::{CheckStatus, VerificationCheck};

#[derive(Parser)]
#[command(name = "geocheck")]
#[command(about = "GeoSurvey web application verification toolkit")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the logout endpoint and verify its redirect
    Logout {
        /// Base URL of the running application
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Detect coordinate columns in a CSV sample
    Csv {
        /// Path of the CSV file to inspect
        #[arg(long)]
        file: Option<String>,
    },
    /// Run checks sequentially
    Run {
        /// Specific checks to run (comma-separated). Available: logout_redirect, coordinate_detection
        #[arg(long)]
        checks: Option<String>,
        /// Base URL of the running application
        #[arg(long)]
        base_url: Option<String>,
        /// Path of the CSV file to inspect
        #[arg(long)]
        file: Option<String>,
    },
    /// Serve a stub application that mimics the logout flow
    StubServer {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,
    },
}

fn create_check(check_name: &str, config: &Config) -> Option<Box<dyn VerificationCheck>> {
    match check_name {
        constants::LOGOUT_REDIRECT_CHECK => Some(Box::new(LogoutRedirectCheck::new(
            &config.probe.base_url,
            config.probe.timeout_seconds,
        ))),
        constants::COORDINATE_DETECTION_CHECK => Some(Box::new(CoordinateDetectionCheck::new(
            config.csv.sample_path.clone(),
        ))),
        _ => None,
    }
}

/// Run checks in order and report. Returns false when any check that
/// affects the exit code failed or could not execute.
async fn run_checks(checks: Vec<Box<dyn VerificationCheck>>) -> bool {
    let mut all_passed = true;
    let mut results = Vec::new();

    for check in checks {
        let span = tracing::info_span!("Running check", check = %check.check_name());
        let _enter = span.enter();

        match check.run().await {
            Ok(outcome) => {
                info!(
                    check = %outcome.check_name,
                    passed = outcome.passed(),
                    finished_at = %outcome.finished_at,
                    "check finished"
                );
                if outcome.status == CheckStatus::Failed && check.affects_exit_code() {
                    all_passed = false;
                }
                results.push((outcome.check_name.clone(), outcome.passed()));
            }
            Err(e) => {
                error!("Check failed to execute: {e}");
                println!("❌ {} could not run: {e}", check.check_name());
                if check.affects_exit_code() {
                    all_passed = false;
                }
                results.push((check.check_name().to_string(), false));
            }
        }
        println!();
    }

    println!("📊 Check Results:");
    for (name, passed) in &results {
        let icon = if *passed { "✅" } else { "❌" };
        println!("   {icon} {name}");
    }

    all_passed
}

fn resolve_check_names(checks: Option<String>) -> Vec<String> {
    if let Some(check_list) = checks {
        check_list
            .split(',')
            .map(|name| name.trim().to_string())
            .collect()
    } else {
        constants::get_supported_checks()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = Config::load_or_default()?;
    if let Ok(url) = std::env::var("GEOCHECK_BASE_URL") {
        config.probe.base_url = url;
    }

    match cli.command {
        Commands::Logout { base_url } => {
            if let Some(url) = base_url {
                config.probe.base_url = url;
            }
            let check =
                LogoutRedirectCheck::new(&config.probe.base_url, config.probe.timeout_seconds);
            if !run_checks(vec![Box::new(check)]).await {
                std::process::exit(1);
            }
        }
        Commands::Csv { file } => {
            if let Some(path) = file {
                config.csv.sample_path = path;
            }
            let check = CoordinateDetectionCheck::new(config.csv.sample_path.clone());
            // The detector never sets a failing exit code
            run_checks(vec![Box::new(check)]).await;
        }
        Commands::Run {
            checks,
            base_url,
            file,
        } => {
            if let Some(url) = base_url {
                config.probe.base_url = url;
            }
            if let Some(path) = file {
                config.csv.sample_path = path;
            }

            let mut selected: Vec<Box<dyn VerificationCheck>> = Vec::new();
            for name in resolve_check_names(checks) {
                match create_check(&name, &config) {
                    Some(check) => selected.push(check),
                    None => {
                        warn!("Unknown check specified");
                        println!("⚠️  Unknown check: {name}");
                    }
                }
            }

            if !run_checks(selected).await {
                std::process::exit(1);
            }
        }
        Commands::StubServer { port } => {
            if let Err(e) = stub::start_stub_server(port).await {
                error!("Stub server failed: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
