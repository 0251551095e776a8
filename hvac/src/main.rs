// hvac/src/main.rs
use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use colored::Colorize;
use hvac_common::config::Config;
use hvac_common::error::{HvacError, Result as hvacResult};
use hvac_core::Poller;
use hvac_net::{validate_url, Fetcher};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{CliArgs, ConsoleReporter};

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    let _log_guard = init_logging(cli_args.verbose, cli_args.log_dir.as_deref());

    if let Err(e) = run(&cli_args).await {
        error!("Startup failed: {:#}", e);
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli_args: &CliArgs) -> hvacResult<()> {
    let mut config = Config::load()?;
    cli_args.apply(&mut config);
    config.check()?;
    validate_url(&config.url).map_err(|e| HvacError::Config(e.to_string()))?;
    debug!("Effective configuration: {:?}", config);

    // The transport lives for the whole run and is released when `poller` drops.
    let fetcher = Fetcher::new(&config)?;
    let reporter = ConsoleReporter::stdio().with_preview(cli_args.preview);
    let mut poller = Poller::new(&config, fetcher, reporter);
    let cycles = poller.run().await;

    debug!("Polling finished after {} cycle(s).", cycles);
    Ok(())
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Opens the daily rolling `hvac.log` in `log_dir`. `None` when the directory
/// cannot be created; logging then stays on stderr.
fn open_log_file(log_dir: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!(
            "{} Failed to create log directory {}: {}",
            "Error:".red().bold(),
            log_dir.display(),
            e
        );
        return None;
    }
    let file_appender = tracing_appender::rolling::daily(log_dir, "hvac.log");
    Some(tracing_appender::non_blocking(file_appender))
}

fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level_filter = level_for(verbose);
    let env_filter = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .with_env_var("HVAC_LOG")
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter);

    match log_dir.and_then(open_log_file) {
        Some((file_writer, guard)) => {
            let max_log_level = level_filter.into_level().unwrap_or(tracing::Level::INFO);
            let writer = std::io::stderr
                .with_max_level(max_log_level)
                .and(file_writer.with_max_level(max_log_level));
            let _ = subscriber.with_writer(writer).with_ansi(false).try_init();
            if let Some(dir) = log_dir {
                debug!("Writing logs to: {}/hvac.log", dir.display());
            }
            Some(guard)
        }
        None => {
            let _ = subscriber
                .with_writer(std::io::stderr)
                .without_time()
                .try_init();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(level_for(0), LevelFilter::INFO);
        assert_eq!(level_for(1), LevelFilter::DEBUG);
        assert_eq!(level_for(2), LevelFilter::TRACE);
        assert_eq!(level_for(9), LevelFilter::TRACE);
    }

    #[test]
    fn log_file_opens_in_a_fresh_directory() {
        let dir = std::env::temp_dir().join(format!("hvac-logs-{}", process::id()));
        let opened = open_log_file(&dir);
        assert!(opened.is_some());
        assert!(dir.is_dir());
        drop(opened);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn unusable_log_directory_falls_back_to_stderr() {
        let blocker = std::env::temp_dir().join(format!("hvac-not-a-dir-{}", process::id()));
        fs::write(&blocker, b"occupied").unwrap();
        assert!(open_log_file(&blocker.join("logs")).is_none());
        let _ = fs::remove_file(&blocker);
    }
}
