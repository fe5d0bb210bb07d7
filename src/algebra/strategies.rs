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

//! Rewriting strategies used by the equivalence oracle.
//!
//! `simplify` is a light structural pass (like terms, like powers, numeric
//! radicals, exact trig values) that never distributes. `expand`, `factor`
//! and `cancel` go through the polynomial normal forms.

use super::numeric::{integer_power, rational_root};
use super::poly::Poly;
use super::ratio::Ratio;
use super::{AlgebraError, Budget, Expr, Func, trig};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::collections::BTreeMap;

/// Collects like terms and like powers and folds what is exactly known.
pub fn simplify(expr: &Expr, budget: &Budget) -> Result<Expr, AlgebraError> {
    match expr {
        Expr::Num(_) | Expr::Const(_) | Expr::Sym(_) => Ok(expr.clone()),
        Expr::Add(terms) => {
            let terms = terms
                .iter()
                .map(|t| simplify(t, budget))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(collect_terms(terms))
        }
        Expr::Mul(factors) => {
            let factors = factors
                .iter()
                .map(|f| simplify(f, budget))
                .collect::<Result<Vec<_>, _>>()?;
            collect_factors(factors, budget)
        }
        Expr::Pow(base, exp) => simplify_pow(simplify(base, budget)?, simplify(exp, budget)?, budget),
        Expr::Mod(a, b) => {
            let (a, b) = (simplify(a, budget)?, simplify(b, budget)?);
            if b.is_zero() {
                return Err(AlgebraError::DivisionByZero);
            }
            Ok(Expr::modulo(a, b))
        }
        Expr::Call(func, arg) => simplify_call(*func, simplify(arg, budget)?),
    }
}

/// Fully distributes products and integer powers.
pub fn expand(expr: &Expr, budget: &Budget) -> Result<Expr, AlgebraError> {
    Ok(Poly::from_expr(expr, budget)?.to_expr())
}

/// Writes the expression as one fraction with monomial and numeric content
/// pulled out of numerator and denominator.
pub fn factor(expr: &Expr, budget: &Budget) -> Result<Expr, AlgebraError> {
    let poly = Poly::from_expr(expr, budget)?;
    Ok(Ratio::from_poly(&poly, budget)?.factored_expr())
}

/// Puts the expression over a common denominator and divides out exact
/// common factors.
pub fn cancel(expr: &Expr, budget: &Budget) -> Result<Expr, AlgebraError> {
    let poly = Poly::from_expr(expr, budget)?;
    Ok(Ratio::from_poly(&poly, budget)?.cancelled(budget)?.to_expr())
}

/// Splits `c*rest` into its numeric coefficient and the remaining factors.
fn coefficient_of(term: Expr) -> (BigRational, Expr) {
    match term {
        Expr::Num(value) => (value, Expr::one()),
        Expr::Mul(mut factors) => match factors.first() {
            Some(Expr::Num(c)) => {
                let c = c.clone();
                factors.remove(0);
                (c, Expr::product(factors))
            }
            _ => (BigRational::one(), Expr::Mul(factors)),
        },
        other => (BigRational::one(), other),
    }
}

fn collect_terms(terms: Vec<Expr>) -> Expr {
    let mut constant = BigRational::zero();
    let mut like: BTreeMap<Expr, BigRational> = BTreeMap::new();
    for term in Expr::sum(terms).into_terms() {
        match coefficient_of(term) {
            (c, rest) if rest.is_one() => constant += c,
            (c, rest) => *like.entry(rest).or_insert_with(BigRational::zero) += c,
        }
    }
    Expr::sum(
        like.into_iter()
            .filter(|(_, c)| !c.is_zero())
            .map(|(rest, c)| Expr::product([Expr::Num(c), rest]))
            .chain(std::iter::once(Expr::Num(constant))),
    )
}

fn split_power(factor: Expr) -> (Expr, Expr) {
    match factor {
        Expr::Pow(base, exp) => (*base, *exp),
        other => (other, Expr::one()),
    }
}

fn collect_factors(factors: Vec<Expr>, budget: &Budget) -> Result<Expr, AlgebraError> {
    let mut coefficient = BigRational::one();
    let mut powers: BTreeMap<Expr, Vec<Expr>> = BTreeMap::new();
    for factor in Expr::product(factors).into_factors() {
        match factor {
            Expr::Num(value) => coefficient *= value,
            other => {
                let (base, exp) = split_power(other);
                powers.entry(base).or_default().push(exp);
            }
        }
    }
    let mut out = vec![Expr::Num(coefficient)];
    for (base, exps) in powers {
        out.push(simplify_pow(base, collect_terms(exps), budget)?);
    }
    Ok(Expr::product(out))
}

fn simplify_pow(base: Expr, exp: Expr, budget: &Budget) -> Result<Expr, AlgebraError> {
    let Some(q) = exp.as_number().cloned() else {
        return Ok(Expr::pow(base, exp));
    };
    match base {
        Expr::Num(b) => numeric_power(&b, &q, budget),
        // (x**a)**n == x**(a*n) for integer n
        Expr::Pow(inner, e) if q.is_integer() => simplify_pow(
            *inner,
            collect_factors(vec![*e, Expr::Num(q)], budget)?,
            budget,
        ),
        Expr::Mul(factors) if q.is_integer() => {
            let parts = factors
                .into_iter()
                .map(|f| simplify_pow(f, Expr::Num(q.clone()), budget))
                .collect::<Result<Vec<_>, _>>()?;
            collect_factors(parts, budget)
        }
        other => Ok(Expr::pow(other, Expr::Num(q))),
    }
}

/// `b ** q` for numerals, extracting perfect powers from radicals.
fn numeric_power(b: &BigRational, q: &BigRational, budget: &Budget) -> Result<Expr, AlgebraError> {
    if let Some(value) = integer_power(b, q) {
        return Ok(Expr::Num(value));
    }
    if b.is_zero() && q.is_negative() {
        return Err(AlgebraError::DivisionByZero);
    }
    let unevaluated = || -> Result<Expr, AlgebraError> {
        Ok(Expr::Pow(Box::new(Expr::Num(b.clone())), Box::new(Expr::Num(q.clone()))))
    };
    if q.is_integer() || !b.is_positive() {
        return unevaluated();
    }
    let Some(index) = q.denom().to_u32().filter(|i| *i <= budget.max_exponent) else {
        return unevaluated();
    };
    // b**(p/r) = b**floor(p/r) * (b**s)**(1/r)
    let whole = q.floor();
    let Some(s) = ((q - &whole) * BigRational::from_integer(BigInt::from(index)))
        .to_integer()
        .to_i32()
    else {
        return unevaluated();
    };
    let Some(integral) = integer_power(b, &whole) else {
        return unevaluated();
    };
    let (coef, radicand) = rational_root(&b.pow(s), index);
    let root = if radicand.is_one() {
        Expr::one()
    } else {
        Expr::Pow(
            Box::new(Expr::Num(BigRational::from_integer(radicand))),
            Box::new(Expr::Num(BigRational::new(BigInt::one(), BigInt::from(index)))),
        )
    };
    Ok(Expr::product([Expr::Num(integral * coef), root]))
}

fn simplify_call(func: Func, arg: Expr) -> Result<Expr, AlgebraError> {
    if let Some(q) = trig::pi_multiple(&arg) {
        if let Some(value) = trig::exact_value(func, &q) {
            return value;
        }
    }
    match (func, &arg) {
        (Func::Exp, Expr::Num(c)) if c.is_zero() => return Ok(Expr::one()),
        (Func::Ln, Expr::Num(c)) if c.is_one() => return Ok(Expr::zero()),
        (Func::Ln, Expr::Const(super::Constant::E)) => return Ok(Expr::one()),
        (Func::Abs, Expr::Num(c)) => return Ok(Expr::Num(c.abs())),
        _ => {}
    }
    let (negative, magnitude) = arg.split_sign();
    Ok(match func {
        Func::Sin | Func::Tan if negative => Expr::neg(Expr::call(func, magnitude)),
        Func::Cos | Func::Abs if negative => Expr::call(func, magnitude),
        _ => Expr::call(func, arg),
    })
}

impl Expr {
    fn into_terms(self) -> Vec<Expr> {
        match self {
            Expr::Add(terms) => terms,
            other => vec![other],
        }
    }

    fn into_factors(self) -> Vec<Expr> {
        match self {
            Expr::Mul(factors) => factors,
            other => vec![other],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::sym("x")
    }

    fn run(f: fn(&Expr, &Budget) -> Result<Expr, AlgebraError>, e: &Expr) -> Expr {
        f(e, &Budget::default()).expect("strategy")
    }

    #[test]
    fn simplify_collects_like_terms_and_powers() {
        let e = Expr::sum([x(), x(), Expr::mul(Expr::int(-2), x())]);
        assert_eq!(run(simplify, &e), Expr::zero());

        let e = Expr::product([Expr::pi(), x(), x()]);
        let expected = Expr::mul(Expr::pi(), Expr::pow(x(), Expr::int(2)));
        assert_eq!(run(simplify, &e), run(simplify, &expected));
    }

    #[test]
    fn simplify_extracts_radicals() {
        let e = Expr::sqrt(Expr::int(8));
        let expected = Expr::mul(Expr::int(2), Expr::sqrt(Expr::int(2)));
        assert_eq!(run(simplify, &e), expected);
        assert_eq!(run(simplify, &Expr::sqrt(Expr::int(9))), Expr::int(3));
    }

    #[test]
    fn simplify_evaluates_degree_trig() {
        let thirty = Expr::product([Expr::pi(), Expr::int(30), Expr::rational(1, 180)]);
        assert_eq!(run(simplify, &Expr::sin(thirty)), Expr::rational(1, 2));
        let right = Expr::product([Expr::pi(), Expr::int(90), Expr::rational(1, 180)]);
        assert_eq!(
            simplify(&Expr::tan(right), &Budget::default()),
            Err(AlgebraError::Undefined)
        );
    }

    #[test]
    fn simplify_does_not_distribute() {
        let e = Expr::sub(
            Expr::pow(Expr::add(x(), Expr::int(4)), Expr::int(3)),
            Expr::sum([
                Expr::pow(x(), Expr::int(3)),
                Expr::mul(Expr::int(12), Expr::pow(x(), Expr::int(2))),
                Expr::mul(Expr::int(48), x()),
                Expr::int(64),
            ]),
        );
        assert!(!run(simplify, &e).is_zero());
        assert!(run(expand, &e).is_zero());
    }

    #[test]
    fn factor_pulls_out_content() {
        let e = Expr::add(Expr::mul(Expr::int(6), x()), Expr::int(4));
        let expected = Expr::mul(
            Expr::int(2),
            Expr::add(Expr::mul(Expr::int(3), x()), Expr::int(2)),
        );
        assert_eq!(run(factor, &e), expected);
    }

    #[test]
    fn cancel_reduces_to_lowest_terms() {
        let e = Expr::div(
            Expr::sub(Expr::pow(x(), Expr::int(2)), Expr::one()),
            Expr::add(x(), Expr::one()),
        );
        assert_eq!(run(cancel, &e), Expr::sub(x(), Expr::one()));
    }
}
