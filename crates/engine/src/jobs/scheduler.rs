//! Scheduler for periodic background jobs.
//!
//! The caller, not the refresh loop, owns retry cadence: a failed run is
//! logged and the next tick simply tries again.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Job cadence.
#[derive(Debug, Clone, Copy)]
pub enum JobFrequency {
    /// Run every N seconds.
    Seconds(u64),
    /// Run every N minutes.
    Minutes(u64),
}

impl JobFrequency {
    /// Get the duration between job executions.
    pub fn duration(&self) -> Duration {
        match self {
            JobFrequency::Seconds(secs) => Duration::from_secs(*secs),
            JobFrequency::Minutes(mins) => Duration::from_secs(*mins * 60),
        }
    }
}

/// Trait for implementing background jobs.
#[async_trait::async_trait]
pub trait Job: Send + Sync {
    /// The name of this job (used for logging).
    fn name(&self) -> &'static str;

    /// The frequency at which this job should run.
    fn frequency(&self) -> JobFrequency;

    /// Execute the job. Returns Ok(()) on success, Err with message on failure.
    async fn execute(&self) -> Result<(), String>;
}

/// Background job scheduler.
pub struct JobScheduler {
    jobs: Vec<Arc<dyn Job>>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            jobs: Vec::new(),
            shutdown_tx,
            shutdown_rx,
            handles: Vec::new(),
        }
    }

    /// Register a job with the scheduler.
    pub fn register<J: Job + 'static>(&mut self, job: J) {
        self.jobs.push(Arc::new(job));
    }

    /// Start all registered jobs.
    ///
    /// A job in mid-execution at shutdown finishes its current run; the
    /// select only cancels the wait between ticks.
    pub fn start(&mut self) {
        info!(jobs = self.jobs.len(), "Scheduler starting");

        for job in &self.jobs {
            let job = Arc::clone(job);
            let mut shutdown_rx = self.shutdown_rx.clone();
            self.handles.push(tokio::spawn(run_job(job, async move {
                // Pending until shutdown is actually signaled.
                while shutdown_rx.changed().await.is_ok() {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                }
            })));
        }
    }

    /// Initiate graceful shutdown of all jobs.
    /// Returns immediately after signaling shutdown.
    pub fn shutdown(&self) {
        info!("Stopping scheduler");
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for all jobs to complete with timeout.
    pub async fn wait_for_shutdown(self, timeout: Duration) {
        let drain = async {
            for handle in self.handles {
                if let Err(e) = handle.await {
                    warn!(error = %e, "Job task panicked");
                }
            }
        };

        if tokio::time::timeout(timeout, drain).await.is_err() {
            warn!(timeout = ?timeout, "Jobs still running at shutdown deadline");
        }
    }
}

/// Tick loop for one job. The first tick fires one full interval after
/// start, and a tick in mid-execution at shutdown finishes its run.
async fn run_job(job: Arc<dyn Job>, shutdown: impl std::future::Future<Output = ()>) {
    let name = job.name();
    let mut interval = tokio::time::interval(job.frequency().duration());
    interval.tick().await; // consume the immediate tick

    info!(job = name, cadence = ?job.frequency(), "Job registered");
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let started = std::time::Instant::now();
                let outcome = job.execute().await;
                let elapsed_ms = started.elapsed().as_millis();

                match outcome {
                    Ok(()) => info!(job = name, elapsed_ms, "Tick finished"),
                    Err(e) => error!(job = name, elapsed_ms, error = %e, "Tick failed"),
                }
            }
            _ = &mut shutdown => {
                info!(job = name, "Job stopping");
                break;
            }
        }
    }
}

impl Default for JobScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts its ticks; fails every run when `error` is set.
    struct CountingJob {
        ticks: Arc<AtomicUsize>,
        error: Option<&'static str>,
    }

    impl CountingJob {
        fn every_second() -> (Self, Arc<AtomicUsize>) {
            let ticks = Arc::new(AtomicUsize::new(0));
            let job = CountingJob {
                ticks: Arc::clone(&ticks),
                error: None,
            };
            (job, ticks)
        }
    }

    #[async_trait::async_trait]
    impl Job for CountingJob {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn frequency(&self) -> JobFrequency {
            JobFrequency::Seconds(1)
        }

        async fn execute(&self) -> Result<(), String> {
            self.ticks.fetch_add(1, Ordering::SeqCst);
            match self.error {
                Some(message) => Err(message.to_string()),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn frequency_converts_to_duration() {
        assert_eq!(JobFrequency::Seconds(45).duration().as_secs(), 45);
        assert_eq!(JobFrequency::Minutes(3).duration().as_secs(), 180);
    }

    #[test]
    fn registered_jobs_are_tracked() {
        let mut scheduler = JobScheduler::new();
        assert!(scheduler.jobs.is_empty());

        let (job, _) = CountingJob::every_second();
        scheduler.register(job);
        let (job, _) = CountingJob::every_second();
        scheduler.register(job);

        assert_eq!(scheduler.jobs.len(), 2);
    }

    #[tokio::test]
    async fn failing_job_keeps_its_slot() {
        let (mut job, ticks) = CountingJob::every_second();
        job.error = Some("boom");

        let mut scheduler = JobScheduler::new();
        scheduler.register(job);
        scheduler.start();

        // The first tick fires one full interval after start.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        assert!(ticks.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test]
    async fn immediate_shutdown_runs_nothing() {
        let (job, ticks) = CountingJob::every_second();

        let mut scheduler = JobScheduler::new();
        scheduler.register(job);
        scheduler.start();
        scheduler.shutdown();
        scheduler.wait_for_shutdown(Duration::from_secs(1)).await;

        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
