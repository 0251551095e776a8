// hvac-core/src/poll.rs
//! Fixed-interval polling: fetch, extract, report, sleep, repeat.

use std::future::Future;
use std::time::Duration;

use hvac_common::config::Config;
use hvac_common::error::HvacError;
use hvac_common::model::{Extraction, FetchResult, FieldMatch};
use hvac_net::Fetcher;
use tracing::{debug, info};

use crate::extract::{truncate_chars, Extractor};

/// Where status pages come from.
pub trait PageSource {
    fn fetch_page(&self, url: &str) -> impl Future<Output = FetchResult> + Send;
}

impl PageSource for Fetcher {
    async fn fetch_page(&self, url: &str) -> FetchResult {
        self.fetch(url).await
    }
}

/// Receives the outcome of every cycle, in order.
pub trait Reporter {
    fn report(&mut self, cycle: u64, outcome: &CycleOutcome);
}

/// What a single fetch-extract cycle produced.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    Readings {
        temp: FieldMatch,
        humidity: FieldMatch,
    },
    /// The page arrived but did not carry both labels.
    FieldsAbsent {
        body_len: usize,
        preview: String,
    },
    FetchFailed(HvacError),
}

pub struct Poller<S, R> {
    source: S,
    reporter: R,
    extractor: Extractor,
    url: String,
    poll_interval: Duration,
    preview_chars: usize,
    max_cycles: Option<u64>,
    cycles: u64,
}

impl<S: PageSource, R: Reporter> Poller<S, R> {
    pub fn new(config: &Config, source: S, reporter: R) -> Self {
        Self {
            source,
            reporter,
            extractor: Extractor::from_config(config),
            url: config.url.clone(),
            poll_interval: config.poll_interval,
            preview_chars: config.preview_chars,
            max_cycles: config.max_cycles,
            cycles: 0,
        }
    }

    #[cfg(test)]
    fn reporter(&self) -> &R {
        &self.reporter
    }

    #[cfg(test)]
    fn into_reporter(self) -> R {
        self.reporter
    }

    /// Runs one cycle and reports it. Extraction only happens when the fetch
    /// succeeded; a failed fetch is reported and the cycle ends.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.cycles += 1;
        let cycle = self.cycles;
        debug!("Starting poll cycle {}", cycle);

        let outcome = match self.source.fetch_page(&self.url).await {
            Ok(body) => {
                let text = body.text();
                match self.extractor.extract(&text) {
                    Extraction::Found { temp, humidity } => {
                        CycleOutcome::Readings { temp, humidity }
                    }
                    Extraction::NotFound => CycleOutcome::FieldsAbsent {
                        body_len: body.len(),
                        preview: truncate_chars(&text, self.preview_chars).to_string(),
                    },
                }
            }
            Err(e) => {
                debug!("Fetch failed in cycle {}: {}", cycle, e);
                CycleOutcome::FetchFailed(e)
            }
        };

        self.reporter.report(cycle, &outcome);
        outcome
    }

    /// Polls until the configured cycle count is reached, or forever when
    /// there is none. Returns the number of cycles run.
    pub async fn run(&mut self) -> u64 {
        info!(
            "Polling {} every {}",
            self.url,
            humantime::format_duration(self.poll_interval)
        );
        loop {
            self.run_cycle().await;
            if self.max_cycles.is_some_and(|max| self.cycles >= max) {
                info!("Completed {} poll cycle(s)", self.cycles);
                return self.cycles;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use hvac_common::model::ResponseBody;

    use super::*;

    const PAGE: &str = "<td>temp</td><td>22.4</td><td>rh</td><td>41</td>";

    /// Replays canned results, then keeps serving `PAGE`.
    #[derive(Default)]
    struct ScriptedSource {
        script: Mutex<VecDeque<FetchResult>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<FetchResult>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, url: &str) -> FetchResult {
            assert_eq!(url, "http://device.test/nodeconfig.html?node=1");
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or_else(|| Ok(ResponseBody::from(PAGE)))
        }
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(u64, CycleOutcome)>,
    }

    impl Reporter for Recorder {
        fn report(&mut self, cycle: u64, outcome: &CycleOutcome) {
            self.seen.push((cycle, outcome.clone()));
        }
    }

    fn config() -> Config {
        Config {
            url: "http://device.test/nodeconfig.html?node=1".to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn successful_cycle_reports_readings() {
        let mut poller = Poller::new(&config(), ScriptedSource::default(), Recorder::default());
        let outcome = poller.run_cycle().await;

        match outcome {
            CycleOutcome::Readings { temp, humidity } => {
                assert!(temp.excerpt.starts_with("temp</td><td>22.4"));
                assert!(humidity.excerpt.starts_with("rh</td><td>41"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(poller.reporter().seen.len(), 1);
        assert_eq!(poller.reporter().seen[0].0, 1);
    }

    #[tokio::test]
    async fn missing_fields_carry_a_preview() {
        let page = "<html><body>maintenance mode</body></html>";
        let source = ScriptedSource::new(vec![Ok(ResponseBody::from(page))]);
        let config = Config {
            preview_chars: 12,
            ..config()
        };
        let mut poller = Poller::new(&config, source, Recorder::default());

        match poller.run_cycle().await {
            CycleOutcome::FieldsAbsent { body_len, preview } => {
                assert_eq!(body_len, page.len());
                assert_eq!(preview, "<html><body>");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_failure_is_contained_to_its_cycle() {
        let source = ScriptedSource::new(vec![Err(HvacError::Timeout(
            "operation timed out".to_string(),
        ))]);
        let mut poller = Poller::new(&config(), source, Recorder::default());

        let first = poller.run_cycle().await;
        assert!(matches!(first, CycleOutcome::FetchFailed(HvacError::Timeout(_))));

        let second = poller.run_cycle().await;
        let mut fresh = Poller::new(&config(), ScriptedSource::default(), Recorder::default());
        let baseline = fresh.run_cycle().await;
        match (second, baseline) {
            (
                CycleOutcome::Readings { temp, humidity },
                CycleOutcome::Readings {
                    temp: base_temp,
                    humidity: base_humidity,
                },
            ) => {
                assert_eq!(temp, base_temp);
                assert_eq!(humidity, base_humidity);
            }
            other => panic!("unexpected outcomes: {other:?}"),
        }

        let cycles: Vec<u64> = poller.reporter().seen.iter().map(|(n, _)| *n).collect();
        assert_eq!(cycles, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_run_sleeps_between_cycles_only() {
        let config = Config {
            max_cycles: Some(3),
            poll_interval: Duration::from_secs(5),
            ..config()
        };
        let source = ScriptedSource::new(vec![
            Ok(ResponseBody::from("no labels here")),
            Err(HvacError::Allocation(4096)),
        ]);
        let mut poller = Poller::new(&config, source, Recorder::default());

        let start = tokio::time::Instant::now();
        let ran = poller.run().await;
        let elapsed = start.elapsed();

        assert_eq!(ran, 3);
        assert!(elapsed >= Duration::from_secs(10), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(15), "elapsed {elapsed:?}");
        assert_eq!(poller.source.calls.load(Ordering::SeqCst), 3);

        let recorder = poller.into_reporter();
        let seen = &recorder.seen;
        assert!(matches!(seen[0].1, CycleOutcome::FieldsAbsent { .. }));
        assert!(matches!(seen[1].1, CycleOutcome::FetchFailed(_)));
        assert!(matches!(seen[2].1, CycleOutcome::Readings { .. }));
    }
}
