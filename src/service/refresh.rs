//! Single-flight token refresh.
//!
//! # Responsibilities
//! - Run at most one refresh call at a time
//! - Hand every concurrent caller the same outcome
//! - Keep a resolved outcome for a short reuse window so late responses
//!   carrying the old token do not start a second refresh
//!
//! ```text
//! caller A ──┐
//! caller B ──┼──► slot (Shared<refresh future>) ──► outcome (A, B, C)
//! caller C ──┘
//! ```

use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use futures_util::future::{BoxFuture, FutureExt, Shared};

/// Result of one refresh attempt, shared by every waiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Refreshed,
    Failed,
}

type RefreshFuture = Shared<BoxFuture<'static, (RefreshOutcome, Instant)>>;

enum Decision {
    Join(u64, RefreshFuture),
    Reuse(u64, RefreshOutcome),
    Start,
}

struct Slot {
    generation: u64,
    future: RefreshFuture,
}

pub struct RefreshCoordinator {
    slot: Mutex<Option<Slot>>,
    generation: Mutex<u64>,
    reuse_window: Duration,
}

impl RefreshCoordinator {
    pub fn new(reuse_window: Duration) -> Self {
        Self {
            slot: Mutex::new(None),
            generation: Mutex::new(0),
            reuse_window,
        }
    }

    /// Join the in-flight refresh, reuse a fresh outcome, or start a new
    /// refresh with `start`.
    pub async fn refresh<F, Fut>(&self, start: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome> + Send + 'static,
    {
        let (generation, future) = {
            let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
            let decision = match slot.as_ref() {
                Some(current) => match current.future.peek() {
                    None => Decision::Join(current.generation, current.future.clone()),
                    Some((outcome, resolved_at)) if resolved_at.elapsed() < self.reuse_window => {
                        Decision::Reuse(current.generation, *outcome)
                    }
                    Some(_) => Decision::Start,
                },
                None => Decision::Start,
            };

            match decision {
                Decision::Join(generation, future) => {
                    tracing::debug!(generation, "Joining in-flight token refresh");
                    (generation, future)
                }
                Decision::Reuse(generation, outcome) => {
                    tracing::debug!(generation, outcome = ?outcome, "Reusing recent token refresh outcome");
                    return outcome;
                }
                Decision::Start => self.install(&mut slot, start),
            }
        };

        let (outcome, _) = future.await;
        tracing::debug!(generation, outcome = ?outcome, "Token refresh resolved");
        outcome
    }

    fn install<F, Fut>(&self, slot: &mut Option<Slot>, start: F) -> (u64, RefreshFuture)
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome> + Send + 'static,
    {
        let generation = {
            let mut counter = self.generation.lock().unwrap_or_else(|e| e.into_inner());
            *counter += 1;
            *counter
        };
        tracing::info!(generation, "Starting token refresh");

        let fut = start();
        let future = async move {
            let outcome = fut.await;
            (outcome, Instant::now())
        }
        .boxed()
        .shared();

        *slot = Some(Slot {
            generation,
            future: future.clone(),
        });
        (generation, future)
    }

    /// Number of refreshes started so far.
    pub fn generation(&self) -> u64 {
        *self.generation.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True while a refresh call is in flight.
    pub fn is_refreshing(&self) -> bool {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().is_some_and(|s| s.future.peek().is_none())
    }

    /// Forget any cached outcome. An in-flight refresh keeps running for the
    /// callers already waiting on it.
    pub fn reset(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("generation", &self.generation())
            .field("reuse_window", &self.reuse_window)
            .finish()
    }
}
