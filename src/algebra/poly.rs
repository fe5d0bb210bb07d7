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

//! Sparse multivariate Laurent polynomials over Q.
//!
//! Indeterminates are [`Atom`]s: symbols, constants, principal roots of
//! polynomials, reciprocals of multi-term polynomials, and opaque
//! sub-expressions (function calls, symbolic powers). Roots are kept reduced:
//! a root atom never carries an exponent at or above its index.

use super::numeric::{floor_mod, integer_power, rational_root};
use super::{AlgebraError, Budget, Constant, Expr, Func, trig};
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Polynomial indeterminate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Atom {
    Sym(String),
    Const(Constant),
    /// Principal `index`-th root of `radicand`.
    Root { radicand: Box<Poly>, index: u32 },
    /// `1 / p` for a primitive multi-term `p`.
    Recip(Box<Poly>),
    Opaque(Box<Expr>),
}

impl Atom {
    fn opaque(expr: Expr) -> Self {
        Atom::Opaque(Box::new(expr))
    }

    /// Renders `self ** exponent`.
    fn power_expr(&self, exponent: i32) -> Expr {
        match self {
            Atom::Sym(name) => Expr::pow(Expr::sym(name.clone()), Expr::from(i64::from(exponent))),
            Atom::Const(c) => Expr::pow(Expr::Const(*c), Expr::from(i64::from(exponent))),
            Atom::Root { radicand, index } => Expr::pow(
                radicand.to_expr(),
                Expr::number(BigRational::new(exponent.into(), (*index).into())),
            ),
            Atom::Recip(p) => Expr::pow(p.to_expr(), Expr::from(-i64::from(exponent))),
            Atom::Opaque(e) => Expr::pow((**e).clone(), Expr::from(i64::from(exponent))),
        }
    }
}

/// Atom -> exponent, zero exponents never stored.
pub(crate) type Monomial = BTreeMap<Atom, i32>;

fn monomial_mul(a: &Monomial, b: &Monomial) -> Monomial {
    let mut out = a.clone();
    for (atom, e) in b {
        let slot = out.entry(atom.clone()).or_insert(0);
        *slot += e;
        if *slot == 0 {
            out.remove(atom);
        }
    }
    out
}

/// `a / b` when every exponent of `b` is matched in `a`.
fn monomial_quotient(a: &Monomial, b: &Monomial) -> Option<Monomial> {
    let mut out = a.clone();
    for (atom, eb) in b {
        let ea = a.get(atom).copied().unwrap_or(0);
        if ea < *eb {
            return None;
        }
        if ea == *eb {
            out.remove(atom);
        } else {
            out.insert(atom.clone(), ea - eb);
        }
    }
    Some(out)
}

/// Graded lexicographic order; the smallest atom is the most significant.
fn grlex_cmp(a: &Monomial, b: &Monomial) -> Ordering {
    let degree = |m: &Monomial| m.values().map(|e| i64::from(*e)).sum::<i64>();
    degree(a).cmp(&degree(b)).then_with(|| {
        let mut atoms: Vec<&Atom> = a.keys().chain(b.keys()).collect();
        atoms.sort();
        atoms.dedup();
        atoms
            .into_iter()
            .map(|atom| {
                let ea = a.get(atom).copied().unwrap_or(0);
                let eb = b.get(atom).copied().unwrap_or(0);
                ea.cmp(&eb)
            })
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

pub(crate) fn monomial_expr(mono: &Monomial) -> Expr {
    Expr::product(mono.iter().map(|(atom, e)| atom.power_expr(*e)))
}

/// Polynomial with rational coefficients; zero coefficients never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Poly {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Poly {
    pub(crate) fn zero() -> Self {
        Self::default()
    }

    pub(crate) fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub(crate) fn constant(value: BigRational) -> Self {
        Self::term(Monomial::new(), value)
    }

    pub(crate) fn term(mono: Monomial, coef: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !coef.is_zero() {
            terms.insert(mono, coef);
        }
        Self { terms }
    }

    pub(crate) fn atom(atom: Atom) -> Self {
        Self::term(Monomial::from([(atom, 1)]), BigRational::one())
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn is_one(&self) -> bool {
        self.constant_value().is_some_and(|c| c.is_one())
    }

    pub(crate) fn terms(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter()
    }

    pub(crate) fn constant_value(&self) -> Option<BigRational> {
        match self.terms.iter().next() {
            None => Some(BigRational::zero()),
            Some((mono, coef)) if self.terms.len() == 1 && mono.is_empty() => Some(coef.clone()),
            _ => None,
        }
    }

    /// `q` when this is exactly `q*pi` (or zero).
    fn pi_multiple(&self) -> Option<BigRational> {
        if self.is_zero() {
            return Some(BigRational::zero());
        }
        let (mono, coef) = self.terms.iter().next()?;
        let pi_only = self.terms.len() == 1
            && mono.len() == 1
            && mono.get(&Atom::Const(Constant::Pi)) == Some(&1);
        pi_only.then(|| coef.clone())
    }

    fn add_term(&mut self, mono: Monomial, coef: BigRational) {
        if coef.is_zero() {
            return;
        }
        let slot = self.terms.entry(mono).or_insert_with(BigRational::zero);
        *slot += coef;
        if slot.is_zero() {
            self.terms.retain(|_, c| !c.is_zero());
        }
    }

    fn check(self, budget: &Budget) -> Result<Self, AlgebraError> {
        if self.terms.len() > budget.max_terms {
            return Err(AlgebraError::BudgetExceeded);
        }
        Ok(self)
    }

    pub(crate) fn add(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (mono, coef) in &other.terms {
            out.add_term(mono.clone(), coef.clone());
        }
        out
    }

    pub(crate) fn sub(&self, other: &Poly) -> Poly {
        self.add(&other.neg())
    }

    pub(crate) fn neg(&self) -> Poly {
        self.scale(&-BigRational::one())
    }

    pub(crate) fn scale(&self, factor: &BigRational) -> Poly {
        if factor.is_zero() {
            return Poly::zero();
        }
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(mono, coef)| (mono.clone(), coef * factor))
                .collect(),
        }
    }

    pub(crate) fn mul(&self, other: &Poly, budget: &Budget) -> Result<Poly, AlgebraError> {
        let mut out = Poly::zero();
        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                out.add_term(monomial_mul(m1, m2), c1 * c2);
            }
            if out.terms.len() > budget.max_terms {
                return Err(AlgebraError::BudgetExceeded);
            }
        }
        out.normalize_roots(budget)
    }

    pub(crate) fn pow(&self, n: u32, budget: &Budget) -> Result<Poly, AlgebraError> {
        if n > budget.max_exponent {
            return Err(AlgebraError::BudgetExceeded);
        }
        let mut acc = Poly::one();
        let mut base = self.clone();
        let mut exp = n;
        while exp > 0 {
            if exp & 1 == 1 {
                acc = acc.mul(&base, budget)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base, budget)?;
            }
        }
        Ok(acc)
    }

    /// Multiplies every term by a monomial, without root reduction.
    pub(crate) fn shift(&self, mono: &Monomial) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (monomial_mul(m, mono), c.clone()))
                .collect(),
        }
    }

    /// Divides every term by a monomial, without root reduction.
    pub(crate) fn unshift(&self, mono: &Monomial) -> Poly {
        let inverse: Monomial = mono.iter().map(|(a, e)| (a.clone(), -e)).collect();
        self.shift(&inverse)
    }

    fn needs_reduction(mono: &Monomial) -> bool {
        mono.iter().any(|(atom, e)| match atom {
            Atom::Root { radicand, index } => {
                *e >= *index as i32 || (*e < 0 && radicand.constant_value().is_some())
            }
            _ => false,
        })
    }

    /// Rewrites `root(p, n)**e` with `e >= n` as `p * root(p, n)**(e - n)`,
    /// and rationalises negative powers of numeric roots.
    fn normalize_roots(self, budget: &Budget) -> Result<Poly, AlgebraError> {
        if !self.terms.keys().any(Self::needs_reduction) {
            return Ok(self);
        }
        let mut out = Poly::zero();
        for (mono, coef) in self.terms {
            let mut factor = Poly::one();
            let mut kept = Monomial::new();
            for (atom, e) in mono {
                if let Atom::Root { radicand, index } = &atom {
                    let index = *index as i32;
                    if e >= index {
                        let power = radicand.pow((e / index) as u32, budget)?;
                        factor = factor.mul(&power, budget)?;
                        if e % index != 0 {
                            kept.insert(atom, e % index);
                        }
                        continue;
                    }
                    if e < 0 {
                        if let Some(c) = radicand.constant_value() {
                            if c.is_zero() {
                                return Err(AlgebraError::DivisionByZero);
                            }
                            let whole = (-e + index - 1) / index;
                            factor = factor.scale(&c.pow(-whole));
                            let rest = e + whole * index;
                            if rest != 0 {
                                kept.insert(atom, rest);
                            }
                            continue;
                        }
                    }
                }
                kept.insert(atom, e);
            }
            let piece = Poly::term(kept, coef).mul(&factor, budget)?;
            out = out.add(&piece).check(budget)?;
        }
        Ok(out)
    }

    /// Leading term under graded lexicographic order.
    pub(crate) fn leading_term(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.iter().max_by(|a, b| grlex_cmp(a.0, b.0))
    }

    /// gcd of numerators over lcm of denominators, signed like the leading
    /// coefficient. One for the zero polynomial.
    pub(crate) fn content(&self) -> BigRational {
        let mut numer = BigInt::zero();
        let mut denom = BigInt::one();
        for coef in self.terms.values() {
            numer = numer.gcd(coef.numer());
            denom = denom.lcm(coef.denom());
        }
        if numer.is_zero() {
            return BigRational::one();
        }
        let content = BigRational::new(numer, denom);
        match self.leading_term() {
            Some((_, lead)) if lead.is_negative() => -content,
            _ => content,
        }
    }

    /// Largest monomial dividing every term of every polynomial given.
    pub(crate) fn common_monomial(polys: &[&Poly]) -> Monomial {
        let mut monos = polys.iter().flat_map(|p| p.terms.keys());
        let Some(first) = monos.next() else {
            return Monomial::new();
        };
        let mut common = first.clone();
        for mono in monos {
            common = common
                .into_iter()
                .filter_map(|(atom, e)| {
                    let other = mono.get(&atom).copied().unwrap_or(0);
                    let low = e.min(other);
                    (low != 0).then_some((atom, low))
                })
                .collect();
        }
        common
    }

    /// Exact quotient `self / divisor`, or `None` when the division leaves a
    /// remainder.
    pub(crate) fn exact_div(
        &self,
        divisor: &Poly,
        budget: &Budget,
    ) -> Result<Option<Poly>, AlgebraError> {
        let Some((lead_mono, lead_coef)) = divisor.leading_term() else {
            return Err(AlgebraError::DivisionByZero);
        };
        let mut quotient = Poly::zero();
        let mut rest = self.clone();
        let mut steps = 0usize;
        while let Some((mono, coef)) = rest.leading_term() {
            steps += 1;
            if steps > budget.max_terms {
                return Err(AlgebraError::BudgetExceeded);
            }
            let Some(shift) = monomial_quotient(mono, lead_mono) else {
                return Ok(None);
            };
            let step = Poly::term(shift, coef / lead_coef);
            rest = rest.sub(&step.mul(divisor, budget)?).check(budget)?;
            quotient = quotient.add(&step);
        }
        Ok(Some(quotient))
    }

    /// Expanded polynomial form of `expr`.
    pub(crate) fn from_expr(expr: &Expr, budget: &Budget) -> Result<Poly, AlgebraError> {
        match expr {
            Expr::Num(value) => Ok(Poly::constant(value.clone())),
            Expr::Const(c) => Ok(Poly::atom(Atom::Const(*c))),
            Expr::Sym(name) => Ok(Poly::atom(Atom::Sym(name.clone()))),
            Expr::Add(terms) => {
                let mut acc = Poly::zero();
                for term in terms {
                    acc = acc.add(&Poly::from_expr(term, budget)?).check(budget)?;
                }
                Ok(acc)
            }
            Expr::Mul(factors) => {
                let mut acc = Poly::one();
                for factor in factors {
                    acc = acc.mul(&Poly::from_expr(factor, budget)?, budget)?;
                }
                Ok(acc)
            }
            Expr::Pow(base, exp) => {
                let base = Poly::from_expr(base, budget)?;
                let exp = Poly::from_expr(exp, budget)?;
                match exp.constant_value() {
                    Some(q) => base.pow_rational(&q, budget),
                    None => Ok(Poly::atom(Atom::opaque(Expr::Pow(
                        Box::new(base.to_expr()),
                        Box::new(exp.to_expr()),
                    )))),
                }
            }
            Expr::Mod(a, b) => {
                let a = Poly::from_expr(a, budget)?;
                let b = Poly::from_expr(b, budget)?;
                match (a.constant_value(), b.constant_value()) {
                    (_, Some(y)) if y.is_zero() => Err(AlgebraError::DivisionByZero),
                    (Some(x), Some(y)) => Ok(Poly::constant(floor_mod(&x, &y))),
                    _ => Ok(Poly::atom(Atom::opaque(Expr::Mod(
                        Box::new(a.to_expr()),
                        Box::new(b.to_expr()),
                    )))),
                }
            }
            Expr::Call(func, arg) => {
                let arg = Poly::from_expr(arg, budget)?;
                Poly::call(*func, arg, budget)
            }
        }
    }

    fn call(func: Func, arg: Poly, budget: &Budget) -> Result<Poly, AlgebraError> {
        if let Some(c) = arg.constant_value() {
            match func {
                Func::Exp if c.is_zero() => return Ok(Poly::one()),
                Func::Ln if c.is_one() => return Ok(Poly::zero()),
                Func::Abs => return Ok(Poly::constant(c.abs())),
                _ => {}
            }
        }
        if let Some(q) = arg.pi_multiple() {
            if let Some(value) = trig::exact_value(func, &q) {
                return Poly::from_expr(&value?, budget);
            }
        }
        let negative = arg
            .leading_term()
            .is_some_and(|(_, lead)| lead.is_negative());
        match func {
            Func::Sin | Func::Tan if negative => Ok(Poly::call(func, arg.neg(), budget)?.neg()),
            Func::Cos | Func::Abs if negative => Poly::call(func, arg.neg(), budget),
            _ => Ok(Poly::atom(Atom::opaque(Expr::call(func, arg.to_expr())))),
        }
    }

    fn pow_rational(&self, q: &BigRational, budget: &Budget) -> Result<Poly, AlgebraError> {
        let limit = i64::from(budget.max_exponent);
        if let Some(value) = self.constant_value().and_then(|c| integer_power(&c, q)) {
            return Ok(Poly::constant(value));
        }
        if q.is_integer() {
            let n = q
                .to_integer()
                .to_i64()
                .filter(|n| n.abs() <= limit)
                .ok_or(AlgebraError::BudgetExceeded)?;
            return if n >= 0 {
                self.pow(n as u32, budget)
            } else {
                self.inverse_pow((-n) as u32, budget)
            };
        }
        if self.is_zero() {
            return if q.is_positive() {
                Ok(Poly::zero())
            } else {
                Err(AlgebraError::DivisionByZero)
            };
        }
        let index = q
            .denom()
            .to_u32()
            .filter(|i| *i <= budget.max_exponent)
            .ok_or(AlgebraError::BudgetExceeded)?;
        let whole = q.floor();
        let rest = ((q - &whole) * BigRational::from_integer(index.into()))
            .to_integer()
            .to_u32()
            .ok_or(AlgebraError::BudgetExceeded)?;
        let integral = self.pow_rational(&whole, budget)?;
        let root = self.root(index, budget)?.pow(rest, budget)?;
        integral.mul(&root, budget)
    }

    /// Principal `index`-th root with rational content pulled out.
    fn root(&self, index: u32, budget: &Budget) -> Result<Poly, AlgebraError> {
        if let Some(c) = self.constant_value() {
            if c.is_zero() {
                return Ok(Poly::zero());
            }
            if c.is_negative() {
                // root(c) = root(-c) * root(-1), principal branch
                let unit = Poly::atom(Atom::Root {
                    radicand: Box::new(Poly::constant(-BigRational::one())),
                    index,
                });
                return Poly::constant(-c).root(index, budget)?.mul(&unit, budget);
            }
            let (coef, radicand) = rational_root(&c, index);
            if radicand.is_one() {
                return Ok(Poly::constant(coef));
            }
            let atom = Atom::Root {
                radicand: Box::new(Poly::constant(BigRational::from_integer(radicand))),
                index,
            };
            return Ok(Poly::atom(atom).scale(&coef));
        }
        let content = self.content().abs();
        let primitive = self.scale(&content.recip());
        let outer = Poly::constant(content).root(index, budget)?;
        let inner = Poly::atom(Atom::Root {
            radicand: Box::new(primitive),
            index,
        });
        outer.mul(&inner, budget)
    }

    /// `self ** -n`.
    fn inverse_pow(&self, n: u32, budget: &Budget) -> Result<Poly, AlgebraError> {
        if self.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        let inverse = if self.terms.len() == 1 {
            let Some((mono, coef)) = self.terms.iter().next() else {
                return Err(AlgebraError::DivisionByZero);
            };
            let mut out = Poly::constant(coef.recip());
            let mut flipped = Monomial::new();
            for (atom, e) in mono {
                match atom {
                    Atom::Recip(p) if *e > 0 => out = out.mul(&p.pow(*e as u32, budget)?, budget)?,
                    _ => {
                        flipped.insert(atom.clone(), -e);
                    }
                }
            }
            out.mul(&Poly::term(flipped, BigRational::one()), budget)?
        } else {
            let content = self.content();
            let primitive = self.scale(&content.recip());
            Poly::atom(Atom::Recip(Box::new(primitive))).scale(&content.recip())
        };
        inverse.pow(n, budget)
    }

    /// Expression form, highest terms first.
    pub(crate) fn to_expr(&self) -> Expr {
        Expr::sum(self.terms.iter().rev().map(|(mono, coef)| {
            Expr::product(std::iter::once(Expr::Num(coef.clone())).chain(std::iter::once(monomial_expr(mono))))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(expr: &Expr) -> Poly {
        Poly::from_expr(expr, &Budget::default()).expect("poly")
    }

    fn x() -> Expr {
        Expr::sym("x")
    }

    #[test]
    fn binomial_cube_expands() {
        let cube = Expr::pow(Expr::add(x(), Expr::int(4)), Expr::int(3));
        let expanded = Expr::sum([
            Expr::pow(x(), Expr::int(3)),
            Expr::mul(Expr::int(12), Expr::pow(x(), Expr::int(2))),
            Expr::mul(Expr::int(48), x()),
            Expr::int(64),
        ]);
        assert_eq!(poly(&cube), poly(&expanded));
    }

    #[test]
    fn square_roots_reduce() {
        let root2 = Expr::sqrt(Expr::int(2));
        assert_eq!(poly(&Expr::mul(root2.clone(), root2)), Poly::constant(BigRational::from_integer(BigInt::from(2))));
        let root8 = Expr::sqrt(Expr::int(8));
        let twice_root2 = Expr::mul(Expr::int(2), Expr::sqrt(Expr::int(2)));
        assert_eq!(poly(&root8), poly(&twice_root2));
        let inv = Expr::div(Expr::one(), Expr::sqrt(Expr::int(2)));
        let half_root2 = Expr::mul(Expr::rational(1, 2), Expr::sqrt(Expr::int(2)));
        assert_eq!(poly(&inv), poly(&half_root2));
    }

    #[test]
    fn exact_division_detects_factors() {
        let budget = Budget::default();
        let num = poly(&Expr::sub(Expr::pow(x(), Expr::int(2)), Expr::one()));
        let den = poly(&Expr::sub(x(), Expr::one()));
        let quotient = num.exact_div(&den, &budget).expect("divide");
        assert_eq!(quotient, Some(poly(&Expr::add(x(), Expr::one()))));
        let other = poly(&Expr::add(x(), Expr::int(2)));
        assert_eq!(num.exact_div(&other, &budget), Ok(None));
    }

    #[test]
    fn expansion_respects_budget() {
        let budget = Budget {
            max_terms: 8,
            max_exponent: 64,
        };
        let wide = Expr::pow(
            Expr::sum([x(), Expr::sym("y"), Expr::sym("z"), Expr::one()]),
            Expr::int(6),
        );
        assert_eq!(
            Poly::from_expr(&wide, &budget),
            Err(AlgebraError::BudgetExceeded)
        );
    }

    #[test]
    fn trig_of_negated_argument_is_folded() {
        let a = poly(&Expr::sin(Expr::neg(x())));
        let b = poly(&Expr::neg(Expr::sin(x())));
        assert_eq!(a, b);
    }

    #[test]
    fn negative_radicands_keep_the_principal_branch() {
        let cube_root = Expr::pow(Expr::int(-8), Expr::rational(1, 3));
        assert_ne!(poly(&cube_root), poly(&Expr::int(-2)));
        let unit = Expr::pow(Expr::int(-1), Expr::rational(1, 3));
        assert_eq!(poly(&cube_root), poly(&Expr::mul(Expr::int(2), unit)));

        let i = Expr::sqrt(Expr::int(-1));
        assert_eq!(poly(&Expr::sqrt(Expr::int(-4))), poly(&Expr::mul(Expr::int(2), i.clone())));
        assert_eq!(poly(&Expr::mul(i.clone(), i)), poly(&Expr::int(-1)));
    }

    #[test]
    fn constant_powers_fold_past_the_exponent_budget() {
        let big = Expr::Pow(Box::new(Expr::int(2)), Box::new(Expr::int(70)));
        let expected = BigRational::from_integer(num_traits::pow(BigInt::from(2), 70));
        assert_eq!(poly(&big), Poly::constant(expected));
    }
}
