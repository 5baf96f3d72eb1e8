// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the target list (arguments and/or a JSON file)
// 3. Run one probe per site with bounded concurrency
// 4. Aggregate the outcomes into a report and print / export it
// 5. Exit with proper code:
//      0 = all sites online
//      1 = at least one site is degraded or offline
//      2 = error (bad target list, bad settings, I/O failure)
//      3 = run interrupted with Ctrl-C before every site was probed
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use cli::{Cli, Commands, TargetArgs};
use site_prober::config::ProbeSettings;
use site_prober::probe::{Classification, HttpProber};
use site_prober::report::{self, RunReport};
use site_prober::run::{self, ProbeRun};
use site_prober::targets::{self, TargetList};

const EXIT_OK: i32 = 0;
const EXIT_UNHEALTHY: i32 = 1;
const EXIT_ERROR: i32 = 2;
const EXIT_INCOMPLETE: i32 = 3;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match try_main(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `--json` output on stdout stays machine-readable
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("warn,site_prober={}", level)),
    )
    .init();
}

async fn try_main(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            targets,
            timeout,
            concurrency,
            json,
            output,
            insecure,
            proxy,
            user_agent,
            require_targets,
        } => {
            let mut settings = ProbeSettings::new(timeout, concurrency)?
                .with_insecure(insecure)
                .with_proxy(proxy);
            if let Some(user_agent) = user_agent {
                settings = settings.with_user_agent(user_agent);
            }

            handle_check(&targets, &settings, json, output.as_deref(), require_targets).await
        }
        Commands::Validate { targets } => handle_validate(&targets),
    }
}

// Handles the 'check' subcommand
async fn handle_check(
    target_args: &TargetArgs,
    settings: &ProbeSettings,
    json: bool,
    output: Option<&Path>,
    require_targets: bool,
) -> Result<i32> {
    let targets = load_target_list(target_args)?;
    if require_targets && targets.is_empty() {
        return Err(site_prober::Error::NoTargets.into());
    }

    let prober = Arc::new(HttpProber::new(settings)?);

    // Ctrl-C stops the run; whatever finished is still reported
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("interrupted, stopping run");
            token.cancel();
        }
    });

    if !json {
        println!(
            "🔍 Probing {} site(s), {} at a time, timeout {}s\n",
            targets.len(),
            settings.max_concurrency(),
            settings.timeout().as_secs()
        );
    }

    let probe_run = run::run(
        prober,
        &targets,
        settings.timeout(),
        settings.max_concurrency(),
        &cancel,
    )
    .await;

    // --require-targets was settled before probing; a cancelled run may
    // legitimately have no outcomes at all
    let (report, missing) = finish_run(probe_run);

    print_results(&report, json)?;

    if let Some(path) = output {
        let written = write_report(&report, path)?;
        if !json {
            println!("💾 Report written to {}", written.display());
        }
    }

    if !missing.is_empty() {
        eprintln!("⚠️  Run interrupted, {} site(s) were not checked:", missing.len());
        for target in &missing {
            eprintln!("   {}", target);
        }
    }

    Ok(exit_code(&report, &missing))
}

// Splits a run into the report of finished targets and the ones left behind
//
// Slots are only left empty when the run was cancelled.
fn finish_run(probe_run: ProbeRun) -> (RunReport, Vec<String>) {
    let missing: Vec<String> = probe_run.missing().map(|t| t.to_string()).collect();
    let report = report::aggregate(probe_run.into_outcomes());
    (report, missing)
}

// Interrupted beats unhealthy: a partial report says nothing about the rest
fn exit_code(report: &RunReport, missing: &[String]) -> i32 {
    if !missing.is_empty() {
        EXIT_INCOMPLETE
    } else if report.all_online() {
        EXIT_OK
    } else {
        EXIT_UNHEALTHY
    }
}

// Handles the 'validate' subcommand
fn handle_validate(target_args: &TargetArgs) -> Result<i32> {
    let targets = load_target_list(target_args)?;

    for target in &targets {
        println!("✅ {}", target);
    }
    println!("\n📋 {} valid target(s)", targets.len());

    Ok(EXIT_OK)
}

// Gathers targets from the command line and/or a JSON file, then validates them
//
// Falls back to ./websites.json only when neither URLs nor a file were given.
fn load_target_list(args: &TargetArgs) -> Result<TargetList> {
    let mut raw = args.urls.clone();

    match &args.targets_file {
        Some(path) => raw.extend(targets::load_targets_file(path)?),
        None if args.urls.is_empty() => {
            let default = Path::new(targets::DEFAULT_TARGETS_FILE);
            if default.exists() {
                log::info!("using targets from {}", default.display());
                raw.extend(targets::load_targets_file(default)?);
            }
        }
        None => {}
    }

    if args.assume_https {
        raw = raw.iter().map(|entry| targets::assume_https(entry)).collect();
    }

    let list = TargetList::parse(&raw)?;
    log::debug!("{} target(s) after validation", list.len());
    Ok(list)
}

// Writes the JSON report; a directory gets a timestamped file name
fn write_report(report: &RunReport, path: &Path) -> Result<PathBuf> {
    let path = if path.is_dir() {
        path.join(format!(
            "website_status_report_{}.json",
            report.timestamp().format("%Y%m%d_%H%M%S")
        ))
    } else {
        path.to_path_buf()
    };

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json + "\n")
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    log::info!("report written to {}", path.display());
    Ok(path)
}

// Prints the report either as a table or JSON
fn print_results(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_table(report);
    }
    Ok(())
}

// Prints results as a human-readable table in the terminal
fn print_table(report: &RunReport) {
    println!("{:<60} {:<34} {:>10} {:>6}", "URL", "STATUS", "TIME", "CODE");
    println!("{}", "=".repeat(113));

    for outcome in report.details() {
        // Truncate URL if too long for display
        let url_display = if outcome.target().chars().count() > 57 {
            let head: String = outcome.target().chars().take(57).collect();
            format!("{}...", head)
        } else {
            outcome.target().to_string()
        };

        let time = outcome
            .response_time_ms()
            .map(|ms| format!("{:.0}ms", ms))
            .unwrap_or_else(|| "-".to_string());
        let code = outcome
            .status_code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<60} {:<34} {:>10} {:>6}",
            url_display,
            format_status(outcome.classification(), &outcome.status_label()),
            time,
            code
        );

        if let Some(message) = outcome.message() {
            log::info!("{}: {}", outcome.target(), message);
        }
    }

    println!();

    let summary = report.summary();
    println!("📊 Summary:");
    println!("   🟢 Online: {}", summary.online);
    println!("   🟡 Warnings: {}", summary.warnings);
    println!("   🔴 Offline: {}", summary.offline);
    println!("   📋 Total: {}", summary.total_sites);
    println!("   🕒 Checked at: {}", report.timestamp().format("%Y-%m-%d %H:%M:%S UTC"));
}

// Puts the classification's colored dot in front of the status label
fn format_status(classification: Classification, label: &str) -> String {
    let dot = match classification {
        Classification::Online => "🟢",
        Classification::Warning => "🟡",
        Classification::Offline => "🔴",
    };
    format!("{} {}", dot, label)
}
