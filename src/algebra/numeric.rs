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

//! Exact rational helpers shared by the constructors and the normal forms.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Largest trial divisor used when pulling perfect powers out of a radicand.
const TRIAL_DIVISOR_LIMIT: u32 = 10_000;

/// Largest result, in bits of numerator or denominator, that an integer
/// power of a rational is folded to.
pub(crate) const MAX_FOLDED_BITS: u64 = 4096;

/// Converts a decimal literal such as `12`, `0.5`, `.25` or `1.5e-3` into an
/// exact rational. Returns `None` for anything that is not digits with at
/// most one dot and an optional integer exponent.
pub(crate) fn decimal_to_rational(text: &str) -> Option<BigRational> {
    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().ok()?),
        None => (text, 0),
    };
    if u64::from(exponent.unsigned_abs()) > MAX_FOLDED_BITS {
        return None;
    }
    let scale = BigRational::from_integer(BigInt::from(10u32)).pow(exponent);
    Some(plain_decimal(mantissa)? * scale)
}

fn plain_decimal(text: &str) -> Option<BigRational> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (text, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = format!("{int_part}{frac_part}");
    let numer = BigInt::parse_bytes(digits.as_bytes(), 10)?;
    let denom = num_traits::pow(BigInt::from(10u32), frac_part.len());
    Some(BigRational::new(numer, denom))
}

/// `base ** exponent` when the exponent is an integer, the result is defined
/// and it fits in [`MAX_FOLDED_BITS`].
pub(crate) fn integer_power(base: &BigRational, exponent: &BigRational) -> Option<BigRational> {
    if !exponent.is_integer() {
        return None;
    }
    let n = exponent.to_integer().to_i32()?;
    if base.is_zero() && n < 0 {
        return None;
    }
    if base.abs().is_one() {
        let negative = base.is_negative() && n % 2 != 0;
        return Some(if negative { -BigRational::one() } else { BigRational::one() });
    }
    let bits = base.numer().bits().max(base.denom().bits());
    if bits.saturating_mul(u64::from(n.unsigned_abs())) > MAX_FOLDED_BITS {
        return None;
    }
    Some(base.pow(n))
}

/// Remainder taking the sign of the divisor. `y` must be non-zero.
pub(crate) fn floor_mod(x: &BigRational, y: &BigRational) -> BigRational {
    x - y * (x / y).floor()
}

/// Writes `n` as `k**index * m` with `k` as large as trial division finds.
pub(crate) fn extract_perfect_power(n: &BigInt, index: u32) -> (BigInt, BigInt) {
    let mut k = BigInt::one();
    let mut m = n.clone();
    if index < 2 || !m.is_positive() {
        return (k, m);
    }
    let mut divisor = BigInt::from(2u32);
    let limit = BigInt::from(TRIAL_DIVISOR_LIMIT);
    while divisor <= limit {
        let power = num_traits::pow(divisor.clone(), index as usize);
        if power > m {
            break;
        }
        while (&m % &power).is_zero() {
            m /= &power;
            k *= &divisor;
        }
        divisor += 1;
    }
    let root = m.nth_root(index);
    if num_traits::pow(root.clone(), index as usize) == m {
        k *= root;
        m = BigInt::one();
    }
    (k, m)
}

/// Principal `index`-th root of a positive rational as `coefficient * m**(1/index)`.
///
/// The radicand `m` is an integer with every perfect `index`-th power found
/// moved into the coefficient; `m == 1` means the root is rational.
pub(crate) fn rational_root(value: &BigRational, index: u32) -> (BigRational, BigInt) {
    debug_assert!(value.is_positive());
    // a/b = (a * b^(index-1)) / b^index
    let spread = value.numer() * num_traits::pow(value.denom().clone(), index as usize - 1);
    let (k, m) = extract_perfect_power(&spread, index);
    (BigRational::new(k, value.denom().clone()), m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn decimals_are_exact() {
        assert_eq!(decimal_to_rational("200.0"), Some(q(200, 1)));
        assert_eq!(decimal_to_rational("282.333"), Some(q(282_333, 1000)));
        assert_eq!(decimal_to_rational(".25"), Some(q(1, 4)));
        assert_eq!(decimal_to_rational("."), None);
        assert_eq!(decimal_to_rational("1e5"), Some(q(100_000, 1)));
        assert_eq!(decimal_to_rational("1.5E-2"), Some(q(3, 200)));
        assert_eq!(decimal_to_rational("2e+1"), Some(q(20, 1)));
        assert_eq!(decimal_to_rational("1e"), None);
        assert_eq!(decimal_to_rational("e5"), None);
    }

    #[test]
    fn perfect_powers_are_pulled_out() {
        assert_eq!(
            extract_perfect_power(&BigInt::from(72), 2),
            (BigInt::from(6), BigInt::from(2))
        );
        assert_eq!(
            extract_perfect_power(&BigInt::from(27), 3),
            (BigInt::from(3), BigInt::one())
        );
        assert_eq!(rational_root(&q(1, 2), 2), (q(1, 2), BigInt::from(2)));
        assert_eq!(rational_root(&q(9, 4), 2), (q(3, 2), BigInt::one()));
    }

    #[test]
    fn integer_powers_fold_by_result_size() {
        let two = q(2, 1);
        assert_eq!(
            integer_power(&two, &q(100, 1)),
            Some(BigRational::from_integer(num_traits::pow(BigInt::from(2), 100)))
        );
        assert_eq!(integer_power(&two, &q(-3, 1)), Some(q(1, 8)));
        assert_eq!(integer_power(&two, &q(5000, 1)), None);
        assert_eq!(integer_power(&q(-1, 1), &q(1_000_001, 1)), Some(q(-1, 1)));
        assert_eq!(integer_power(&q(0, 1), &q(-1, 1)), None);
        assert_eq!(integer_power(&two, &q(1, 2)), None);
    }
}
