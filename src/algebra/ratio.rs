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

//! Rational functions `num / den` over the polynomial atoms.

use super::poly::{Atom, Monomial, Poly, monomial_expr};
use super::{AlgebraError, Budget, Expr};
use num_rational::BigRational;
use num_traits::One;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Ratio {
    num: Poly,
    den: Poly,
}

impl Ratio {
    fn whole(num: Poly) -> Self {
        Self {
            num,
            den: Poly::one(),
        }
    }

    /// Puts an expanded polynomial over a common denominator: reciprocal
    /// atoms and negative exponents move below the line.
    pub(crate) fn from_poly(poly: &Poly, budget: &Budget) -> Result<Self, AlgebraError> {
        let mut acc = Ratio::whole(Poly::zero());
        for (mono, coef) in poly.terms() {
            let mut above = Monomial::new();
            let mut below = Monomial::new();
            let mut den = Poly::one();
            for (atom, e) in mono {
                match atom {
                    Atom::Recip(p) if *e > 0 => {
                        den = den.mul(&p.pow(e.unsigned_abs(), budget)?, budget)?;
                    }
                    _ if *e < 0 => {
                        below.insert(atom.clone(), -e);
                    }
                    _ => {
                        above.insert(atom.clone(), *e);
                    }
                }
            }
            let term = Ratio {
                num: Poly::term(above, coef.clone()),
                den: den.mul(&Poly::term(below, BigRational::one()), budget)?,
            };
            acc = acc.add(&term.cleared(), budget)?;
        }
        Ok(acc)
    }

    /// Multiplies through by any atom that still carries a negative exponent.
    fn cleared(self) -> Self {
        let mut lift = Monomial::new();
        for (mono, _) in self.num.terms().chain(self.den.terms()) {
            for (atom, e) in mono {
                if *e < 0 {
                    let slot = lift.entry(atom.clone()).or_insert(0);
                    *slot = (*slot).max(-e);
                }
            }
        }
        if lift.is_empty() {
            return self;
        }
        Ratio {
            num: self.num.shift(&lift),
            den: self.den.shift(&lift),
        }
    }

    fn add(&self, other: &Ratio, budget: &Budget) -> Result<Self, AlgebraError> {
        if self.num.is_zero() {
            return Ok(other.clone());
        }
        if other.num.is_zero() {
            return Ok(self.clone());
        }
        if self.den == other.den {
            return Ok(Ratio {
                num: self.num.add(&other.num),
                den: self.den.clone(),
            });
        }
        let num = self
            .num
            .mul(&other.den, budget)?
            .add(&other.num.mul(&self.den, budget)?);
        let den = self.den.mul(&other.den, budget)?;
        Ok(Ratio { num, den })
    }

    /// Removes the shared monomial and content, then divides out the
    /// denominator (or numerator) when it is an exact factor of the other.
    pub(crate) fn cancelled(&self, budget: &Budget) -> Result<Self, AlgebraError> {
        if self.num.is_zero() {
            return Ok(Ratio::whole(Poly::zero()));
        }
        let common = Poly::common_monomial(&[&self.num, &self.den]);
        let num = self.num.unshift(&common);
        let den = self.den.unshift(&common);
        let scale = num.content() / den.content();
        let num = num.scale(&num.content().recip());
        let den = den.scale(&den.content().recip());

        if den.is_one() {
            return Ok(Ratio::whole(num.scale(&scale)));
        }
        if let Some(quotient) = num.exact_div(&den, budget)? {
            return Ok(Ratio::whole(quotient.scale(&scale)));
        }
        if let Some(quotient) = den.exact_div(&num, budget)? {
            return Ok(Ratio {
                num: Poly::constant(scale),
                den: quotient,
            });
        }
        Ok(Ratio {
            num: num.scale(&scale),
            den,
        })
    }

    /// Content and monomial factors pulled out of both sides.
    pub(crate) fn factored_expr(&self) -> Expr {
        if self.num.is_zero() {
            return Expr::zero();
        }
        let top = Poly::common_monomial(&[&self.num]);
        let bottom = Poly::common_monomial(&[&self.den]);
        let num = self.num.unshift(&top);
        let den = self.den.unshift(&bottom);
        let (num_content, den_content) = (num.content(), den.content());
        let num = num.scale(&num_content.recip());
        let den = den.scale(&den_content.recip());
        Expr::product([
            Expr::Num(num_content / den_content),
            monomial_expr(&top),
            num.to_expr(),
            Expr::pow(
                Expr::mul(monomial_expr(&bottom), den.to_expr()),
                Expr::int(-1),
            ),
        ])
    }

    pub(crate) fn to_expr(&self) -> Expr {
        if self.den.is_one() {
            self.num.to_expr()
        } else {
            Expr::div(self.num.to_expr(), self.den.to_expr())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratio(expr: &Expr) -> Ratio {
        let budget = Budget::default();
        let poly = Poly::from_expr(expr, &budget).expect("poly");
        Ratio::from_poly(&poly, &budget).expect("ratio")
    }

    fn x() -> Expr {
        Expr::sym("x")
    }

    #[test]
    fn common_denominator_exposes_zero() {
        // 5*(5x+7)/(2x+3) - (25x+35)/(2x+3)
        let den = Expr::add(Expr::mul(Expr::int(2), x()), Expr::int(3));
        let lhs = Expr::div(
            Expr::mul(
                Expr::int(5),
                Expr::add(Expr::mul(Expr::int(5), x()), Expr::int(7)),
            ),
            den.clone(),
        );
        let rhs = Expr::div(
            Expr::add(Expr::mul(Expr::int(25), x()), Expr::int(35)),
            den,
        );
        assert!(ratio(&Expr::sub(lhs, rhs)).num.is_zero());
    }

    #[test]
    fn reciprocals_of_sums_combine() {
        // 1/x + 1/y - (x + y)/(x*y)
        let y = Expr::sym("y");
        let e = Expr::sum([
            Expr::div(Expr::one(), x()),
            Expr::div(Expr::one(), y.clone()),
            Expr::neg(Expr::div(Expr::add(x(), y.clone()), Expr::mul(x(), y))),
        ]);
        assert!(ratio(&e).num.is_zero());
    }

    #[test]
    fn cancel_divides_exact_factors() {
        let budget = Budget::default();
        let e = Expr::div(
            Expr::sub(Expr::pow(x(), Expr::int(2)), Expr::one()),
            Expr::sub(x(), Expr::one()),
        );
        let cancelled = ratio(&e).cancelled(&budget).expect("cancel");
        assert_eq!(cancelled.to_expr(), Expr::add(x(), Expr::one()));
    }
}
