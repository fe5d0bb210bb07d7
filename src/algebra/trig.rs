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

//! Exact values of the trigonometric functions at rational multiples of `pi`.

use super::numeric::floor_mod;
use super::{AlgebraError, Expr, Func};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// Returns `q` when `expr` is literally `q*pi` (or `0`).
pub(crate) fn pi_multiple(expr: &Expr) -> Option<BigRational> {
    match expr {
        Expr::Num(value) if value.is_zero() => Some(BigRational::zero()),
        Expr::Const(super::Constant::Pi) => Some(BigRational::one()),
        Expr::Mul(factors) => match factors.as_slice() {
            [Expr::Num(q), Expr::Const(super::Constant::Pi)] => Some(q.clone()),
            _ => None,
        },
        _ => None,
    }
}

/// Exact value of `func(q*pi)` for the angles with a closed form over square
/// roots of 2 and 3. `None` means no table entry; `Some(Err)` is a pole.
pub(crate) fn exact_value(func: Func, q: &BigRational) -> Option<Result<Expr, AlgebraError>> {
    match func {
        Func::Sin => sin_of(q).map(Ok),
        Func::Cos => sin_of(&(q + half())).map(Ok),
        Func::Tan => tan_of(q),
        _ => None,
    }
}

fn half() -> BigRational {
    BigRational::new(BigInt::one(), BigInt::from(2))
}

fn ratio(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

fn sqrt_over(radicand: i64, denom: i64) -> Expr {
    Expr::product([Expr::rational(1, denom), Expr::sqrt(Expr::int(radicand))])
}

/// `sin(q*pi)` for `q` in `[0, 1/2]`.
fn first_quadrant_sin(q: &BigRational) -> Option<Expr> {
    if q.is_zero() {
        Some(Expr::zero())
    } else if *q == ratio(1, 6) {
        Some(Expr::rational(1, 2))
    } else if *q == ratio(1, 4) {
        Some(sqrt_over(2, 2))
    } else if *q == ratio(1, 3) {
        Some(sqrt_over(3, 2))
    } else if *q == half() {
        Some(Expr::one())
    } else {
        None
    }
}

fn sin_of(q: &BigRational) -> Option<Expr> {
    let q = floor_mod(q, &ratio(2, 1));
    if q <= half() {
        first_quadrant_sin(&q)
    } else if q <= BigRational::one() {
        first_quadrant_sin(&(BigRational::one() - q))
    } else {
        sin_of(&(q - BigRational::one())).map(Expr::neg)
    }
}

fn tan_of(q: &BigRational) -> Option<Result<Expr, AlgebraError>> {
    let q = floor_mod(q, &BigRational::one());
    let value = if q.is_zero() {
        Expr::zero()
    } else if q == ratio(1, 6) {
        sqrt_over(3, 3)
    } else if q == ratio(1, 4) {
        Expr::one()
    } else if q == ratio(1, 3) {
        Expr::sqrt(Expr::int(3))
    } else if q == half() {
        return Some(Err(AlgebraError::Undefined));
    } else if q == ratio(2, 3) {
        Expr::neg(Expr::sqrt(Expr::int(3)))
    } else if q == ratio(3, 4) {
        Expr::int(-1)
    } else if q == ratio(5, 6) {
        Expr::neg(sqrt_over(3, 3))
    } else {
        return None;
    };
    Some(Ok(value))
}
