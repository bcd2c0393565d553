//! Random source abstraction
//!
//! Every random draw made while evaluating guest effects goes through
//! [`RandomSource`], so callers decide whether results come from the thread
//! RNG, a seeded generator, or a fixed script.

use rand::Rng;
use std::collections::VecDeque;

/// Uniform integer draws in a closed range
pub trait RandomSource {
    /// Draw an integer uniformly from `low..=high`. Callers guarantee `low <= high`.
    fn int_between(&mut self, low: i64, high: i64) -> i64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    #[inline]
    fn int_between(&mut self, low: i64, high: i64) -> i64 {
        self.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of draws.
///
/// Each draw pops the next scripted value and clamps it into the requested
/// range. Once the script runs dry, draws return the low bound.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    values: VecDeque<i64>,
}

impl ScriptedSource {
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of scripted values not yet consumed
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedSource {
    fn int_between(&mut self, low: i64, high: i64) -> i64 {
        self.values
            .pop_front()
            .map(|v| v.clamp(low, high))
            .unwrap_or(low)
    }
}
