use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::results::MatchResult;

/// The shared "someone found it" signal.
///
/// One per search run, shared by every worker and read by the coordinator
/// after the join barrier. The flag only ever goes `false -> true`; `true`
/// is absorbing, so a second `set` is a no-op.
///
/// The winning [`MatchResult`] lives next to the flag in a write-once slot.
/// Only the worker whose transition actually flipped the flag gets to fill
/// it, which makes the reported match the first writer's.
#[derive(Debug, Default)]
pub struct FoundFlag {
    found:  AtomicBool,
    winner: OnceLock<MatchResult>,
}

impl FoundFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking read, polled by workers before every directory and entry.
    pub fn is_set(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Set the flag without recording a match. Idempotent.
    pub fn set(&self) {
        self.found.store(true, Ordering::Release);
    }

    /// Try to become the winner with `result`.
    ///
    /// Returns `true` if this call performed the `false -> true` transition.
    /// Losers get `false` and their result is dropped.
    pub fn claim(&self, result: MatchResult) -> bool {
        let won = self
            .found
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();

        if won {
            // Only one caller ever gets here, so the slot is always empty.
            let _ = self.winner.set(result);
        }
        won
    }

    /// The winning match, if any. Stable once all workers have been joined.
    pub fn winner(&self) -> Option<&MatchResult> {
        self.winner.get()
    }
}
