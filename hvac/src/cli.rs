// hvac/src/cli.rs
//! Defines the command-line argument structure using clap.
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use hvac_common::Config;

pub mod report;

pub use crate::cli::report::ConsoleReporter;

/// Polls a device status page and prints the temperature and humidity it shows.
///
/// Flags override the matching `HVAC_*` environment variables.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "hvac", bin_name = "hvac")]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Status page to poll [env: HVAC_URL]
    #[arg(long)]
    pub url: Option<String>,

    /// Upper bound on each request, e.g. `5s` [env: HVAC_TIMEOUT]
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Pause between cycles, e.g. `30s` [env: HVAC_POLL_INTERVAL]
    #[arg(long, value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Characters shown after each label [env: HVAC_EXCERPT_CHARS]
    #[arg(long)]
    pub excerpt_chars: Option<usize>,

    /// Print the start of the page (HVAC_PREVIEW_CHARS long) when the fields are missing
    #[arg(long)]
    pub preview: bool,

    /// Stop after this many cycles instead of polling forever
    #[arg(long)]
    pub cycles: Option<u64>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl CliArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(interval) = self.interval {
            config.poll_interval = interval;
        }
        if let Some(chars) = self.excerpt_chars {
            config.excerpt_chars = chars;
        }
        if self.cycles.is_some() {
            config.max_cycles = self.cycles;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = CliArgs::parse_from([
            "hvac",
            "-vv",
            "--url",
            "http://10.0.0.9/nodeconfig.html?node=2",
            "--timeout",
            "750ms",
            "--interval",
            "1m",
            "--excerpt-chars",
            "32",
            "--cycles",
            "4",
            "--preview",
        ]);
        assert_eq!(args.verbose, 2);
        assert!(args.preview);

        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.url, "http://10.0.0.9/nodeconfig.html?node=2");
        assert_eq!(config.timeout, Duration::from_millis(750));
        assert_eq!(config.poll_interval, Duration::from_secs(60));
        assert_eq!(config.excerpt_chars, 32);
        assert_eq!(config.max_cycles, Some(4));
    }

    #[test]
    fn no_flags_keep_config() {
        let args = CliArgs::parse_from(["hvac"]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_duration_is_rejected() {
        assert!(CliArgs::try_parse_from(["hvac", "--interval", "often"]).is_err());
    }
}
