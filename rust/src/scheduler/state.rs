//! Round-robin pool of pairs still waiting for their first match.

use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::models::Pair;

/// Unscheduled pairs in a fixed (shuffled) order.
///
/// Owned by one assembler invocation and drained round by round.
#[derive(Clone, Debug)]
pub struct PairPool {
    remaining: Vec<Pair>,
}

impl PairPool {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self { remaining: pairs }
    }

    /// Pool in a random order, for tie-break variety.
    pub fn shuffled<R: Rng + ?Sized>(mut pairs: Vec<Pair>, rng: &mut R) -> Self {
        pairs.shuffle(rng);
        Self::new(pairs)
    }

    pub fn remaining(&self) -> &[Pair] {
        &self.remaining
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Drop every pair that was just put on court. Returns how many pool
    /// entries were consumed; repeats of already-scheduled pairs count 0.
    pub fn consume(&mut self, scheduled: &[Pair]) -> usize {
        let before = self.remaining.len();
        let done: FxHashSet<&Pair> = scheduled.iter().collect();
        self.remaining.retain(|pair| !done.contains(pair));
        before - self.remaining.len()
    }
}
