use crate::{
    play_trial, AnyEntropy, Deck, DeckLayout, EntropyError, EntropySource, OsEntropy, PlayArea,
    SeededEntropy, Shuffler, SimConfig, SimError, SimReport, TrialOutcome,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Shared stop request. Workers check it between trials, never inside one.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tally {
    pub requested: u64,
    pub completed: u64,
    pub successes: u64,
}

impl Tally {
    pub fn merge(self, other: Self) -> Self {
        Self {
            requested: self.requested + other.requested,
            completed: self.completed + other.completed,
            successes: self.successes + other.successes,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.completed < self.requested
    }

    fn record(&mut self, outcome: TrialOutcome) {
        self.completed += 1;
        if outcome.is_win() {
            self.successes += 1;
        }
    }
}

/// Owns every buffer a trial needs; they are allocated once and reset per trial.
#[derive(Debug)]
pub struct MonteCarloRunner<S> {
    layout: DeckLayout,
    deck: Deck,
    area: PlayArea,
    shuffler: Shuffler,
    source: S,
}

impl<S: EntropySource> MonteCarloRunner<S> {
    pub fn new(layout: DeckLayout, source: S) -> Self {
        let deck_size = layout.deck_size();
        Self {
            layout,
            deck: Deck::new(&layout),
            area: PlayArea::new(deck_size),
            shuffler: Shuffler::with_capacity(deck_size),
            source,
        }
    }

    pub fn layout(&self) -> DeckLayout {
        self.layout
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn run_trial(&mut self) -> Result<TrialOutcome, EntropyError> {
        self.shuffler.shuffle_deck(&mut self.deck, &mut self.source)?;
        Ok(play_trial(self.layout, &self.deck, &mut self.area))
    }

    pub fn run(&mut self, trials: u64, cancel: &CancelFlag) -> Result<Tally, EntropyError> {
        self.run_until(trials, || cancel.is_cancelled())
    }

    /// Runs up to `trials`, asking `should_stop` before each one.
    pub fn run_until<F>(&mut self, trials: u64, should_stop: F) -> Result<Tally, EntropyError>
    where
        F: Fn() -> bool,
    {
        let mut tally = Tally {
            requested: trials,
            ..Tally::default()
        };
        for _ in 0..trials {
            if should_stop() {
                break;
            }
            let outcome = self.run_trial()?;
            tally.record(outcome);
        }
        Ok(tally)
    }
}

/// Splits `trials` into at most `workers` non-empty shares.
pub fn split_trials(trials: u64, workers: usize) -> Vec<u64> {
    let workers = (workers.max(1) as u64).min(trials.max(1));
    let base = trials / workers;
    let extra = trials % workers;
    (0..workers)
        .map(|worker| base + u64::from(worker < extra))
        .filter(|share| *share > 0)
        .collect()
}

/// Runs `trials` spread over `workers`, each worker with its own source from
/// `make_source(worker_index)` and its own buffers. One worker runs inline.
/// The first entropy failure stops every other worker before its next trial.
pub fn run_batch<S, F>(
    layout: DeckLayout,
    trials: u64,
    workers: usize,
    make_source: F,
    cancel: &CancelFlag,
) -> Result<Tally, EntropyError>
where
    S: EntropySource,
    F: Fn(usize) -> S + Sync,
{
    let shares = split_trials(trials, workers);
    if shares.len() <= 1 {
        let mut runner = MonteCarloRunner::new(layout, make_source(0));
        return runner.run(trials, cancel);
    }
    let failed = CancelFlag::new();
    let tallies = shares
        .into_par_iter()
        .enumerate()
        .map(|(worker, share)| -> Result<Tally, EntropyError> {
            let mut runner = MonteCarloRunner::new(layout, make_source(worker));
            let tally = runner
                .run_until(share, || cancel.is_cancelled() || failed.is_cancelled())
                .inspect_err(|err| {
                    warn!(worker, %err, "entropy failure, stopping all workers");
                    failed.cancel();
                })?;
            debug!(
                worker,
                completed = tally.completed,
                successes = tally.successes,
                "worker finished"
            );
            Ok(tally)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tallies.into_iter().fold(Tally::default(), Tally::merge))
}

/// Validates `config` and runs the whole batch it describes.
pub fn simulate(config: &SimConfig, cancel: &CancelFlag) -> Result<SimReport, SimError> {
    config.validate()?;
    let layout = config.layout();
    let workers = split_trials(config.trials, config.worker_count()).len();
    info!(
        trials = config.trials,
        suits = layout.suit_count,
        faces = layout.face_count,
        workers,
        seeded = config.seed.is_some(),
        "starting batch"
    );
    let started = Instant::now();
    let seed = config.seed;
    let path = config.entropy_path.clone();
    let tally = run_batch(
        layout,
        config.trials,
        workers,
        |worker| match seed {
            Some(seed) => AnyEntropy::Seeded(SeededEntropy::from_seed(
                seed.wrapping_add(worker as u64),
            )),
            None => AnyEntropy::Os(OsEntropy::new(path.clone())),
        },
        cancel,
    )?;
    let report = SimReport::new(layout, tally, workers, started.elapsed());
    info!(
        completed = report.completed,
        successes = report.successes,
        elapsed_ms = report.elapsed_ms,
        "batch finished"
    );
    Ok(report)
}
