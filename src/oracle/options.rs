/*
MIT License

Copyright (c) 2026 Raja Lehtihet and Wael El Oraiby

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::algebra::Budget;
use serde::{Deserialize, Serialize};

/// Tunables for [`judge`](super::judge) and [`equivalent`](super::equivalent).
///
/// ```
/// use geo_cdl::EquivalenceOptions;
///
/// let options = EquivalenceOptions::default().with_seed(7).with_trials(8);
/// assert_eq!(options.trials, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalenceOptions {
    /// Numeric tolerance for plain numbers and sampled values.
    pub tolerance: f64,
    /// Agreeing samples required by the randomized check.
    pub trials: usize,
    /// Upper bound on draws, counting discarded ones.
    pub max_draws: usize,
    /// Lower end of the sampling range.
    pub sample_low: f64,
    /// Upper end of the sampling range (exclusive).
    pub sample_high: f64,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Limits for the symbolic strategies.
    pub budget: Budget,
}

impl Default for EquivalenceOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            trials: 4,
            max_draws: 16,
            sample_low: 1.0,
            sample_high: 100.0,
            seed: None,
            budget: Budget::default(),
        }
    }
}

impl EquivalenceOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_max_draws(mut self, max_draws: usize) -> Self {
        self.max_draws = max_draws;
        self
    }

    pub fn with_sample_range(mut self, low: f64, high: f64) -> Self {
        self.sample_low = low;
        self.sample_high = high;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }
}
