//! Periodic refetch of remote view data
//!
//! A poller fetches once immediately and then once per period until its
//! [`PollHandle`] is cancelled or dropped. Each tick's fetch runs as its own
//! task so a slow response never delays the schedule. Responses are handed
//! to the sink in arrival order, which means an older response that lands
//! late overwrites a newer one until the next tick corrects it.

use crate::api::ApiError;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Cancellation handle for a running poller.
///
/// Cancelling stops future ticks and aborts fetches still in flight.
/// Dropping the handle cancels too.
#[derive(Debug)]
pub struct PollHandle {
    label: &'static str,
    cancelled: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    pub fn cancel(&mut self) {
        // Fetches racing the abort check this before reaching the sink
        self.cancelled.store(true, Ordering::Release);
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(poller = self.label, "Poller cancelled");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start polling `fetch` every `period`, delivering each result to `sink`
pub fn start<T, F, Fut, S>(label: &'static str, period: Duration, fetch: F, sink: S) -> PollHandle
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    S: Fn(Result<T, ApiError>) + Send + Sync + 'static,
{
    let sink = Arc::new(sink);
    let cancelled = Arc::new(AtomicBool::new(false));
    let task_cancelled = Arc::clone(&cancelled);
    tracing::debug!(poller = label, period_ms = period.as_millis() as u64, "Poller started");

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // Owned here so aborting the loop aborts the fetches with it
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::trace!(poller = label, "Poll tick");
                    let fetch = fetch();
                    let sink = Arc::clone(&sink);
                    let cancelled = Arc::clone(&task_cancelled);
                    in_flight.spawn(async move {
                        let result = fetch.await;
                        if cancelled.load(Ordering::Acquire) {
                            return;
                        }
                        if let Err(e) = &result {
                            tracing::warn!(poller = label, error = %e, "Poll failed, keeping last data");
                        }
                        sink(result);
                    });
                }
                Some(_) = in_flight.join_next(), if !in_flight.is_empty() => {}
            }
        }
    });

    PollHandle {
        label,
        cancelled,
        task: Some(task),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use tokio::time::{sleep, Instant};

    const PERIOD: Duration = Duration::from_secs(5);

    type Log<T> = Arc<Mutex<Vec<T>>>;

    fn log<T>() -> Log<T> {
        Arc::new(Mutex::new(Vec::new()))
    }

    /// Poller whose fetch records the elapsed time of each attempt
    fn counting_poller(start: Instant, attempts: Log<Duration>) -> PollHandle {
        super::start(
            "test",
            PERIOD,
            move || {
                attempts.lock().unwrap().push(start.elapsed());
                async { Ok::<_, ApiError>(()) }
            },
            |_| {},
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_immediately_then_every_period() {
        let start = Instant::now();
        let attempts = log();
        let _handle = counting_poller(start, Arc::clone(&attempts));

        sleep(Duration::from_secs(12)).await;

        assert_eq!(
            *attempts.lock().unwrap(),
            vec![Duration::ZERO, PERIOD, PERIOD * 2]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_attempts_after_cancel() {
        let start = Instant::now();
        let attempts = log();
        let mut handle = counting_poller(start, Arc::clone(&attempts));

        sleep(Duration::from_secs(7)).await;
        handle.cancel();
        assert!(!handle.is_active());
        let before = attempts.lock().unwrap().len();
        assert_eq!(before, 2);

        sleep(Duration::from_secs(60)).await;
        assert_eq!(attempts.lock().unwrap().len(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let start = Instant::now();
        let attempts = log();
        let handle = counting_poller(start, Arc::clone(&attempts));

        sleep(Duration::from_secs(1)).await;
        drop(handle);
        sleep(Duration::from_secs(30)).await;

        assert_eq!(attempts.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_tick_keeps_schedule() {
        let calls = Arc::new(AtomicUsize::new(0));
        let results: Log<Result<usize, String>> = log();
        let sink_results = Arc::clone(&results);

        let _handle = super::start(
            "flaky",
            PERIOD,
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(ApiError::Unavailable)
                    } else {
                        Ok(n)
                    }
                }
            },
            move |result| {
                sink_results
                    .lock()
                    .unwrap()
                    .push(result.map_err(|e| e.to_string()));
            },
        );

        sleep(Duration::from_secs(11)).await;

        assert_eq!(
            *results.lock().unwrap(),
            vec![
                Err("onboarding API unavailable".to_string()),
                Ok(1),
                Ok(2)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_response_wins_out_of_order() {
        let calls = Arc::new(AtomicUsize::new(0));
        let state: Arc<Mutex<Option<usize>>> = Arc::new(Mutex::new(None));
        let arrivals: Log<usize> = log();
        let sink_state = Arc::clone(&state);
        let sink_arrivals = Arc::clone(&arrivals);

        let _handle = super::start(
            "racy",
            PERIOD,
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                // Tick 0 answers at t=7s, tick 1 (issued at t=5s) at t=6s
                let delay = match n {
                    0 => Duration::from_secs(7),
                    1 => Duration::from_secs(1),
                    _ => Duration::ZERO,
                };
                async move {
                    sleep(delay).await;
                    Ok::<_, ApiError>(n)
                }
            },
            move |result| {
                if let Ok(n) = result {
                    sink_arrivals.lock().unwrap().push(n);
                    *sink_state.lock().unwrap() = Some(n);
                }
            },
        );

        sleep(Duration::from_millis(6500)).await;
        assert_eq!(*state.lock().unwrap(), Some(1));

        sleep(Duration::from_secs(1)).await;
        // The older response landed last and overwrote the newer one
        assert_eq!(*arrivals.lock().unwrap(), vec![1, 0]);
        assert_eq!(*state.lock().unwrap(), Some(0));

        sleep(Duration::from_secs(3)).await;
        // Tick 2 at t=10s corrects it
        assert_eq!(*state.lock().unwrap(), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_aborts_in_flight_fetch() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let sink_delivered = Arc::clone(&delivered);

        let mut handle = super::start(
            "slow",
            PERIOD,
            || async {
                sleep(Duration::from_secs(3)).await;
                Ok::<_, ApiError>(())
            },
            move |_| {
                sink_delivered.fetch_add(1, Ordering::SeqCst);
            },
        );

        sleep(Duration::from_secs(1)).await;
        handle.cancel();
        sleep(Duration::from_secs(20)).await;

        assert_eq!(delivered.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_handle_label() {
        tokio_test::block_on(async {
            let handle = super::start(
                "labelled",
                PERIOD,
                || async { Ok::<_, ApiError>(()) },
                |_| {},
            );
            assert_eq!(handle.label(), "labelled");
        });
    }
}
