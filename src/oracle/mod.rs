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

//! Answer equivalence.
//!
//! [`judge`] runs a cascade and stops at the first stage that decides:
//!
//! 1. missing input: equal only if both strings are identical
//! 2. identical text after trimming
//! 3. both sides plain numbers: `|a - b| < tolerance`
//! 4. either side unparsable: text equality
//! 5. `simplify`, `expand`, `factor`, then `cancel` of `a - b` reaching zero
//! 6. random sampling over the free symbols
//!
//! Sampling is probabilistic: agreement over a few random points is strong
//! evidence of equality, not proof. Nothing here panics or returns an error;
//! an internal algebra failure only moves the cascade to its next stage.

mod options;
mod sampling;

use crate::algebra::{AlgebraError, Budget, Expr, cancel, expand, factor, simplify};
use crate::parser::{Syntax, parse_algebra};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

pub use self::options::EquivalenceOptions;
use self::sampling::{Sampling, sample};

/// Default tolerance of [`rough_equal`] for plain numbers.
pub const ROUGH_TOLERANCE: f64 = 0.5;

/// Stage of the cascade that produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Missing,
    Exact,
    Numeric,
    StringFallback,
    Simplify,
    Expand,
    Factor,
    Cancel,
    Sampling,
    /// Every stage ran without proving equality.
    Exhausted,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Missing => "missing",
            Method::Exact => "exact",
            Method::Numeric => "numeric",
            Method::StringFallback => "string-fallback",
            Method::Simplify => "simplify",
            Method::Expand => "expand",
            Method::Factor => "factor",
            Method::Cancel => "cancel",
            Method::Sampling => "sampling",
            Method::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

/// Outcome of [`judge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub equal: bool,
    pub method: Method,
}

impl Verdict {
    fn new(equal: bool, method: Method) -> Self {
        debug!(equal, method = %method, "answer comparison decided");
        Self { equal, method }
    }
}

/// Decides whether two answer strings denote the same quantity.
pub fn judge(a: &str, b: &str, options: &EquivalenceOptions) -> Verdict {
    if a.is_empty() || b.is_empty() {
        return Verdict::new(a == b, Method::Missing);
    }
    let (a, b) = (a.trim(), b.trim());
    if a == b {
        return Verdict::new(true, Method::Exact);
    }
    if let (Some(x), Some(y)) = (plain_number(a), plain_number(b)) {
        return Verdict::new((x - y).abs() < options.tolerance, Method::Numeric);
    }

    let (Some(left), Some(right)) = (parse_answer(a), parse_answer(b)) else {
        return Verdict::new(a == b, Method::StringFallback);
    };

    let diff = Expr::sub(left.clone(), right.clone());
    let strategies: [(Method, fn(&Expr, &Budget) -> Result<Expr, AlgebraError>); 4] = [
        (Method::Simplify, simplify),
        (Method::Expand, expand),
        (Method::Factor, factor),
        (Method::Cancel, cancel),
    ];
    for (method, strategy) in strategies {
        match strategy(&diff, &options.budget) {
            Ok(reduced) if reduced.is_zero() => return Verdict::new(true, method),
            Ok(reduced) => debug!(method = %method, residue = %reduced, "difference is not zero"),
            Err(err) => warn!(method = %method, error = %err, "strategy gave up"),
        }
    }

    let mut symbols = left.free_symbols();
    symbols.extend(right.free_symbols());
    if symbols.is_empty() {
        return Verdict::new(false, Method::Exhausted);
    }
    match sample(&left, &right, &symbols, options) {
        Sampling::Agreed => Verdict::new(true, Method::Sampling),
        Sampling::Disagreed => Verdict::new(false, Method::Sampling),
        Sampling::Inconclusive => Verdict::new(false, Method::Exhausted),
    }
}

/// Returns whether two answer strings denote the same quantity.
pub fn equivalent(a: &str, b: &str, options: &EquivalenceOptions) -> bool {
    judge(a, b, options).equal
}

/// Coarse comparison: plain numbers match within `tolerance`, anything
/// else goes through [`equivalent`] with default options.
pub fn rough_equal(a: &str, b: &str, tolerance: f64) -> bool {
    if let (Some(x), Some(y)) = (plain_number(a.trim()), plain_number(b.trim())) {
        return (x - y).abs() < tolerance;
    }
    equivalent(a, b, &EquivalenceOptions::default())
}

fn plain_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

/// Parses an answer with spaces removed, reading unknown names as symbols.
fn parse_answer(text: &str) -> Option<Expr> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    match parse_algebra(&compact, Syntax::Relaxed) {
        Ok(expr) => Some(expr),
        Err(err) => {
            debug!(answer = %text, error = %err.message, "answer does not parse");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(a: &str, b: &str) -> Verdict {
        judge(a, b, &EquivalenceOptions::default().with_seed(42))
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(check("200", "200.0"), Verdict { equal: true, method: Method::Numeric });
        assert!(!check("847/3", "282.333").equal);
        assert!(check("847/3", "847/3").equal);
    }

    #[test]
    fn missing_input() {
        assert_eq!(check("", ""), Verdict { equal: true, method: Method::Missing });
        assert_eq!(check("", "1"), Verdict { equal: false, method: Method::Missing });
    }

    #[test]
    fn unparsable_falls_back_to_text() {
        let verdict = check("x +* 2", "y)(");
        assert_eq!(verdict, Verdict { equal: false, method: Method::StringFallback });
    }

    #[test]
    fn polynomial_identities() {
        assert!(check("x**3+12*x**2+48*x+64", "(x+4)**3").equal);
        assert!(!check("x**3+12*x**2+48*x+64", "x**3").equal);
        assert!(check("63*pi*x*x*x+66*pi*x*x+15*pi*x", "pi*x*(63*x**2+66*x+15)").equal);
    }

    #[test]
    fn rational_functions() {
        assert!(check("5*(5*x+7)/(2*x+3)", "(25*x+35)/(2*x+3)").equal);
        assert!(!check("5*(5*x+7)/(2*x+3)", "5*x+7").equal);
    }

    #[test]
    fn rough_equal_uses_coarse_tolerance_for_numbers() {
        assert!(rough_equal("3.14", "3.5", ROUGH_TOLERANCE));
        assert!(!rough_equal("3", "4", ROUGH_TOLERANCE));
        assert!(rough_equal("2*x", "x+x", ROUGH_TOLERANCE));
    }

    #[test]
    fn small_offsets_on_large_values_are_caught() {
        for seed in [4, 42] {
            let options = EquivalenceOptions::default().with_seed(seed);
            assert_eq!(
                judge("x**6", "x**6+1/1000", &options),
                Verdict { equal: false, method: Method::Sampling }
            );
            assert_eq!(
                judge("1000000*x", "1000000*x+1/100000", &options),
                Verdict { equal: false, method: Method::Sampling }
            );
        }
    }

    #[test]
    fn negative_radicands_are_not_real_roots() {
        assert!(!check("(-8)**(1/3)", "-2").equal);
        assert!(!check("(-27)**(2/3)", "9").equal);
        assert_eq!(check("sqrt(-4)", "2*sqrt(-1)"), Verdict { equal: true, method: Method::Expand });
    }

    #[test]
    fn zero_times_undefined_is_not_zero() {
        assert_eq!(check("0/0", "0"), Verdict { equal: false, method: Method::Exhausted });
        assert!(!check("0*(1/0)", "0").equal);
        assert!(check("0*x", "0").equal);
    }

    #[test]
    fn large_integer_powers_fold() {
        assert!(check("2**70", "1180591620717411303424").equal);
        assert!(check("2**100", "1267650600228229401496703205376").equal);
        assert!(!check("2**100", "1267650600228229401496703205377").equal);
    }

    #[test]
    fn scientific_notation_is_exact() {
        assert_eq!(check("1.5e2*x", "150*x"), Verdict { equal: true, method: Method::Simplify });
        assert!(check("x/2", "5e-1*x").equal);
    }

    #[test]
    fn letter_names_split_into_products() {
        assert!(check("xy", "x*y").equal);
        assert!(check("2xy^2", "2*x*y**2").equal);
        assert!(!check("x1", "x*1").equal);
    }
}
