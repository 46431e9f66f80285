//! Stress tests for storage backends.
//!
//! These helpers verify behavior under heavy load and concurrent access.
//! Every thread works on its own records, so the final record count is
//! known in advance regardless of interleaving.

use crate::fixtures::{record, TestRecord};
use modelstore_storage::Storage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Logs the run's counters and throughput at `info` level.
    pub fn log_summary(&self, name: &str) {
        tracing::info!(
            run = name,
            total = self.total_ops,
            failed = self.failed_ops,
            elapsed_ms = self.duration.as_millis() as u64,
            ops_per_second = %format!("{:.2}", self.ops_per_second),
            "stress run finished"
        );
    }

    /// Returns true if no operation failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_ops == 0
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Records each thread creates.
    pub records_per_thread: usize,
    /// Number of concurrent threads.
    pub threads: usize,
    /// Lookups each thread performs per created record.
    pub reads_per_record: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            records_per_thread: 250,
            threads: 4,
            reads_per_record: 2,
        }
    }
}

impl StressConfig {
    /// Number of records left in the store after [`stress_lifecycle`].
    ///
    /// Every odd-numbered record of each thread is deleted.
    #[must_use]
    pub fn expected_survivors(&self) -> usize {
        self.threads * self.records_per_thread.div_ceil(2)
    }
}

fn thread_record(thread: usize, index: usize) -> TestRecord {
    record("", &format!("stress-{thread}-{index}"), 0)
}

/// Runs create, find, update and delete concurrently from several threads.
///
/// Each thread creates its own records, reads each back, updates the
/// survivors and deletes every odd-numbered one. Any unexpected result
/// counts as a failed operation.
pub fn stress_lifecycle<S>(store: Arc<S>, config: &StressConfig) -> StressTestResult
where
    S: Storage<TestRecord> + ?Sized + 'static,
{
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));

    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = Arc::clone(&store);
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);
            let config = config.clone();

            thread::spawn(move || {
                let tally = |ok: bool| {
                    let counter = if ok { &successful } else { &failed };
                    counter.fetch_add(1, Ordering::Relaxed);
                };

                for i in 0..config.records_per_thread {
                    let created = thread_record(t, i);
                    let id = match store.create(&created) {
                        Ok(id) => {
                            tally(true);
                            id
                        }
                        Err(_) => {
                            tally(false);
                            continue;
                        }
                    };

                    for _ in 0..config.reads_per_record {
                        tally(matches!(store.find_one(&id), Ok(ref r) if r.data == created.data));
                    }

                    if i % 2 == 1 {
                        tally(store.delete(&id).is_ok());
                    } else {
                        let updated = TestRecord {
                            id: id.clone(),
                            status: 1,
                            ..created
                        };
                        tally(store.update(updated).is_ok());
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}

/// Runs concurrent `find_one` and `find_all` against a fixed set of ids.
///
/// Every id in `ids` must exist for the whole run.
pub fn stress_concurrent_reads<S>(
    store: Arc<S>,
    ids: Arc<Vec<String>>,
    config: &StressConfig,
) -> StressTestResult
where
    S: Storage<TestRecord> + ?Sized + 'static,
{
    let successful = Arc::new(AtomicUsize::new(0));
    let failed = Arc::new(AtomicUsize::new(0));
    let ops_per_thread = config.records_per_thread * config.reads_per_record;

    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|t| {
            let store = Arc::clone(&store);
            let ids = Arc::clone(&ids);
            let successful = Arc::clone(&successful);
            let failed = Arc::clone(&failed);

            thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let ok = if i % 50 == 49 {
                        store.find_all().is_ok_and(|all| all.len() >= ids.len())
                    } else {
                        let id = &ids[(t * ops_per_thread + i) % ids.len()];
                        store.find_one(id).is_ok()
                    };

                    if ok {
                        successful.fetch_add(1, Ordering::Relaxed);
                    } else {
                        failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    StressTestResult::new(
        successful.load(Ordering::Relaxed),
        failed.load(Ordering::Relaxed),
        start.elapsed(),
    )
}
