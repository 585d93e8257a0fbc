//! Off-thread stepping.
//!
//! A [`StepJob`] carries everything a step needs (the newest grid, the rule
//! snapshot, and the epoch of the session that asked for it), so it can run
//! on the rayon pool while the render loop keeps drawing.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::domain::{Algorithm, Grid, RuleSet, step};

/// One pending generation step
#[derive(Clone, Debug)]
pub struct StepJob {
    pub epoch: u64,
    pub grid: Arc<Grid>,
    pub rules: Arc<RuleSet>,
    pub algorithm: Algorithm,
}

impl StepJob {
    pub fn run(self) -> StepOutcome {
        StepOutcome {
            epoch: self.epoch,
            grid: step(&self.grid, &self.rules, self.algorithm),
        }
    }
}

/// Result of a step, tagged with the epoch it was computed for
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub epoch: u64,
    pub grid: Grid,
}

/// Runs at most one step at a time on the rayon pool.
///
/// Dropping the worker drops its receiver; a job still running for it
/// finishes and its result is discarded.
pub struct StepWorker {
    sender: Sender<StepOutcome>,
    receiver: Receiver<StepOutcome>,
    in_flight: bool,
}

impl StepWorker {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            in_flight: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Start a job. Returns false if one is already running.
    pub fn dispatch(&mut self, job: StepJob) -> bool {
        if self.in_flight {
            return false;
        }
        let sender = self.sender.clone();
        rayon::spawn(move || {
            // Receiver gone means the session was torn down
            let _ = sender.send(job.run());
        });
        self.in_flight = true;
        true
    }

    /// Non-blocking check for a finished job
    pub fn poll(&mut self) -> Option<StepOutcome> {
        let outcome = self.receiver.try_recv().ok()?;
        self.in_flight = false;
        Some(outcome)
    }

    /// Block until the running job finishes. None if nothing is running.
    pub fn wait(&mut self) -> Option<StepOutcome> {
        if !self.in_flight {
            return None;
        }
        let outcome = self.receiver.recv().ok()?;
        self.in_flight = false;
        Some(outcome)
    }
}

impl Default for StepWorker {
    fn default() -> Self {
        Self::new()
    }
}
