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

//! Randomized agreement check for expressions the symbolic strategies could
//! not reduce to zero.

use super::EquivalenceOptions;
use crate::algebra::Expr;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::{BTreeSet, HashMap};
use tracing::{trace, warn};

/// Outcome of the sampling stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Sampling {
    /// Every required trial agreed.
    Agreed,
    /// Some trial disagreed.
    Disagreed,
    /// Too many draws failed to evaluate, or the options forbid sampling.
    Inconclusive,
}

/// Evaluates both sides at random points until `trials` draws agree, one
/// disagrees, or `max_draws` is spent. Draws where either side fails to
/// evaluate are discarded.
pub(super) fn sample(
    a: &Expr,
    b: &Expr,
    symbols: &BTreeSet<String>,
    options: &EquivalenceOptions,
) -> Sampling {
    let (low, high) = (options.sample_low, options.sample_high);
    if options.trials == 0 || !(low.is_finite() && high.is_finite() && low < high) {
        warn!(
            trials = options.trials,
            low, high, "sampling options leave nothing to draw"
        );
        return Sampling::Inconclusive;
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut agreed = 0;
    for draw in 0..options.max_draws {
        let env: HashMap<String, f64> = symbols
            .iter()
            .map(|name| (name.clone(), rng.gen_range(low..high)))
            .collect();
        match (a.eval(&env), b.eval(&env)) {
            (Ok(x), Ok(y)) => {
                if !agrees(x, y, options.tolerance) {
                    trace!(draw, x, y, "sample disagrees");
                    return Sampling::Disagreed;
                }
                agreed += 1;
                trace!(draw, x, y, agreed, "sample agrees");
                if agreed == options.trials {
                    return Sampling::Agreed;
                }
            }
            (Err(err), _) | (_, Err(err)) => trace!(draw, error = %err, "sample discarded"),
        }
    }
    Sampling::Inconclusive
}

/// Relative error of one f64 evaluation that is not counted as disagreement.
const ROUNDING_SLACK: f64 = 2.0 * f64::EPSILON;

/// `|x - y| < tol`, widened only by the rounding of the larger side.
fn agrees(x: f64, y: f64, tolerance: f64) -> bool {
    (x - y).abs() < tolerance + ROUNDING_SLACK * x.abs().max(y.abs())
}
