use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indicatif::ProgressBar;
use log::{debug, warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::errors::{RunnerError, RunnerResult};
use crate::implementations::uniqueness::UidRegistry;
use crate::models::progress::ProgressCounter;
use crate::models::proof::{ProofUnit, UnitOutcome};
use crate::traits::proof_configurer::ProofConfigurer;

/// State shared by every worker of one scheduling pass.
///
/// Workers may run on different OS threads, so each structure has its own
/// lock. No guard is ever held across an `.await`, which keeps each
/// lookup-and-insert and each increment-and-append atomic.
struct SharedState {
    queue: Mutex<VecDeque<ProofUnit>>,
    registry: Mutex<UidRegistry>,
    counter: Mutex<ProgressCounter>,
}

fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Plain-text sink for the progress line when the bar cannot draw
type FallbackOutput = Arc<Mutex<dyn Write + Send>>;

/// Runs a bounded pool of workers that configure proofs from a shared queue
pub struct ProofScheduler<C: ?Sized> {
    configurer: Arc<C>,
    workers: usize,
    enable_pools: bool,
    fallback: FallbackOutput,
}

impl<C> ProofScheduler<C>
where
    C: ProofConfigurer + ?Sized + 'static,
{
    pub fn new(configurer: Arc<C>, workers: usize, enable_pools: bool) -> Self {
        Self {
            configurer,
            workers: workers.max(1),
            enable_pools,
            fallback: Arc::new(Mutex::new(io::stderr())),
        }
    }

    /// Write the progress line here instead of stderr when the progress bar
    /// is hidden (stderr is not a terminal)
    pub fn with_fallback_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.fallback = Arc::new(Mutex::new(out));
        self
    }

    /// Configure every unit, at most `workers` at a time.
    ///
    /// Returns once the queue has drained and every dequeued unit has a
    /// recorded outcome. Per-unit failures are collected in the returned
    /// counter; a uniqueness violation stops all workers from taking new
    /// units and is returned as an error once in-flight units finish.
    pub async fn configure_all(
        &self,
        units: Vec<ProofUnit>,
        progress: &ProgressBar,
    ) -> RunnerResult<ProgressCounter> {
        let total = units.len();
        let state = Arc::new(SharedState {
            queue: Mutex::new(units.into()),
            registry: Mutex::new(UidRegistry::new()),
            counter: Mutex::new(ProgressCounter::new(total)),
        });
        progress.set_length(total as u64);

        let cancel = CancellationToken::new();
        let mut workers = JoinSet::new();
        for worker in 0..self.workers.min(total) {
            workers.spawn(configure_proof_dirs(
                worker,
                Arc::clone(&state),
                Arc::clone(&self.configurer),
                self.enable_pools,
                cancel.clone(),
                progress.clone(),
                Arc::clone(&self.fallback),
            ));
        }

        let mut fatal = None;
        while let Some(joined) = workers.join_next().await {
            let result = joined.unwrap_or_else(|e| Err(RunnerError::Worker(e.to_string())));
            if let Err(e) = result {
                cancel.cancel();
                fatal.get_or_insert(e);
            }
        }

        let counter = lock(&state.counter).clone();
        show_progress(&counter, progress, &self.fallback);
        if progress.is_hidden() {
            writeln!(lock(&self.fallback)).ok();
        }
        if let Some(e) = fatal {
            return Err(e);
        }

        debug_assert!(counter.is_drained());
        debug!("{} proof identifiers registered", lock(&state.registry).len());
        Ok(counter)
    }
}

/// Redraw the progress line.
///
/// A hidden bar draws nothing, so the line is written as plain text with a
/// leading carriage return instead.
fn show_progress(counter: &ProgressCounter, progress: &ProgressBar, fallback: &FallbackOutput) {
    progress.set_position(counter.complete as u64);
    progress.set_message(counter.render());
    if progress.is_hidden() {
        let mut out = lock(fallback);
        write!(out, "\r{}", counter.render())
            .and_then(|_| out.flush())
            .ok();
    }
}

async fn configure_proof_dirs<C>(
    worker: usize,
    state: Arc<SharedState>,
    configurer: Arc<C>,
    enable_pools: bool,
    cancel: CancellationToken,
    progress: ProgressBar,
    fallback: FallbackOutput,
) -> RunnerResult<()>
where
    C: ProofConfigurer + ?Sized,
{
    loop {
        show_progress(&lock(&state.counter), &progress, &fallback);

        // Dequeue and claim under the queue lock, so no sibling can take a
        // unit queued after a collision before the run is cancelled
        let unit = {
            let mut queue = lock(&state.queue);
            if cancel.is_cancelled() {
                debug!("Worker {} stopping: run cancelled", worker);
                return Ok(());
            }
            let Some(unit) = queue.pop_front() else {
                return Ok(());
            };
            if let Err(e) = lock(&state.registry).claim(&unit) {
                cancel.cancel();
                return Err(e);
            }
            unit
        };

        debug!("Worker {} configuring {}", worker, unit.path.display());
        let outcome = match configurer.configure(&unit.path, enable_pools).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Could not configure {}: {}", unit.path.display(), e);
                UnitOutcome::Failed
            }
        };
        debug!("Proof {} {}", unit.path.display(), outcome);

        lock(&state.counter).record(unit.path, outcome);
    }
}
