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

//! Symbolic algebra values produced by the compiler and compared by the
//! equivalence oracle.
//!
//! [`Expr`] is a small exact expression tree: rational numerals, `pi`/`E`,
//! named symbols, n-ary sums and products, powers, remainders and a handful of
//! elementary functions. Constructors flatten nested sums/products and fold
//! numerals; everything heavier lives in [`simplify`] and the
//! polynomial normal forms.

mod display;
mod numeric;
mod poly;
mod ratio;
mod strategies;
mod trig;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

pub use strategies::{cancel, expand, factor, simplify};

pub(crate) use numeric::decimal_to_rational;

/// Named mathematical constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Constant {
    /// Ratio of a circle's circumference to its diameter.
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    /// Printed spelling.
    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "E",
        }
    }

    /// Floating-point value.
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

/// Elementary single-argument functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Func {
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Tangent (radians).
    Tan,
    /// Natural exponential.
    Exp,
    /// Natural logarithm.
    Ln,
    /// Absolute value.
    Abs,
}

impl Func {
    /// Looks up a function by its free-text spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "log" | "ln" => Some(Func::Ln),
            "abs" | "Abs" => Some(Func::Abs),
            _ => None,
        }
    }

    /// Printed spelling.
    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Ln => "log",
            Func::Abs => "abs",
        }
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Func::Sin => x.sin(),
            Func::Cos => x.cos(),
            Func::Tan => x.tan(),
            Func::Exp => x.exp(),
            Func::Ln => x.ln(),
            Func::Abs => x.abs(),
        }
    }
}

/// Failures inside the algebra layer.
///
/// These never cross the public compile/oracle boundary as errors: the
/// compiler turns them into soft failures and the oracle into a weaker
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    /// A polynomial grew past the configured [`Budget`].
    BudgetExceeded,
    /// Division by an exact zero.
    DivisionByZero,
    /// The value is undefined at this point (e.g. `tan(pi/2)`, `log(-1)`).
    Undefined,
    /// Evaluation met a symbol with no value.
    UnboundSymbol(String),
    /// Evaluation overflowed to an infinite value.
    NonFinite,
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgebraError::BudgetExceeded => write!(f, "polynomial budget exceeded"),
            AlgebraError::DivisionByZero => write!(f, "division by zero"),
            AlgebraError::Undefined => write!(f, "value is undefined"),
            AlgebraError::UnboundSymbol(name) => write!(f, "no value for symbol '{name}'"),
            AlgebraError::NonFinite => write!(f, "value is not finite"),
        }
    }
}

impl std::error::Error for AlgebraError {}

/// Size limits for polynomial expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Budget {
    /// Maximum number of terms in any intermediate polynomial.
    pub max_terms: usize,
    /// Maximum integer exponent expanded or root index extracted.
    pub max_exponent: u32,
}

impl Default for Budget {
    fn default() -> Self {
        Self {
            max_terms: 4096,
            max_exponent: 64,
        }
    }
}

/// Exact symbolic expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    /// Exact rational numeral.
    Num(BigRational),
    /// Named constant.
    Const(Constant),
    /// Free symbol.
    Sym(String),
    /// n-ary sum (at least two terms once built by constructors).
    Add(Vec<Expr>),
    /// n-ary product; a numeral coefficient, when present, comes first.
    Mul(Vec<Expr>),
    /// Power `base ** exponent`.
    Pow(Box<Expr>, Box<Expr>),
    /// Remainder with the sign of the divisor.
    Mod(Box<Expr>, Box<Expr>),
    /// Elementary function application.
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Integer numeral.
    pub fn int(value: i64) -> Self {
        Expr::Num(BigRational::from_integer(BigInt::from(value)))
    }

    /// Rational numeral `numer/denom`.
    ///
    /// Panics if `denom` is zero.
    pub fn rational(numer: i64, denom: i64) -> Self {
        Expr::Num(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// Numeral from an exact rational.
    pub fn number(value: BigRational) -> Self {
        Expr::Num(value)
    }

    /// `0`.
    pub fn zero() -> Self {
        Expr::Num(BigRational::zero())
    }

    /// `1`.
    pub fn one() -> Self {
        Expr::Num(BigRational::one())
    }

    /// Symbol reference.
    pub fn sym(name: impl Into<String>) -> Self {
        Expr::Sym(name.into())
    }

    /// The constant `pi`.
    pub fn pi() -> Self {
        Expr::Const(Constant::Pi)
    }

    /// The constant `E`.
    pub fn e() -> Self {
        Expr::Const(Constant::E)
    }

    /// Returns the numeral value when this is a numeral.
    pub fn as_number(&self) -> Option<&BigRational> {
        match self {
            Expr::Num(value) => Some(value),
            _ => None,
        }
    }

    /// Returns whether some subterm is a negative power of `0` or a `mod 0`.
    fn divides_by_zero(&self) -> bool {
        match self {
            Expr::Num(_) | Expr::Const(_) | Expr::Sym(_) => false,
            Expr::Pow(base, exp) => {
                (base.is_zero() && exp.as_number().is_some_and(|e| e.is_negative()))
                    || base.divides_by_zero()
                    || exp.divides_by_zero()
            }
            Expr::Mod(a, b) => b.is_zero() || a.divides_by_zero() || b.divides_by_zero(),
            Expr::Add(items) | Expr::Mul(items) => items.iter().any(Expr::divides_by_zero),
            Expr::Call(_, arg) => arg.divides_by_zero(),
        }
    }

    /// Returns whether this is the numeral zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(value) if value.is_zero())
    }

    /// Returns whether this is the numeral one.
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Num(value) if value.is_one())
    }

    /// Sum of any number of terms.
    ///
    /// Nested sums are flattened and numerals folded into one trailing term.
    pub fn sum(terms: impl IntoIterator<Item = Expr>) -> Self {
        let mut constant = BigRational::zero();
        let mut out = Vec::new();
        for term in terms {
            match term {
                Expr::Num(value) => constant += value,
                Expr::Add(inner) => {
                    for item in inner {
                        match item {
                            Expr::Num(value) => constant += value,
                            other => out.push(other),
                        }
                    }
                }
                other => out.push(other),
            }
        }
        if !constant.is_zero() {
            out.push(Expr::Num(constant));
        }
        match out.len() {
            0 => Expr::zero(),
            1 => out.remove(0),
            _ => Expr::Add(out),
        }
    }

    /// Product of any number of factors.
    ///
    /// Nested products are flattened and numerals folded into one leading
    /// coefficient. A zero coefficient collapses the product to `0` unless
    /// another factor divides by zero.
    pub fn product(factors: impl IntoIterator<Item = Expr>) -> Self {
        let mut coefficient = BigRational::one();
        let mut out = Vec::new();
        for factor in factors {
            match factor {
                Expr::Num(value) => coefficient *= value,
                Expr::Mul(inner) => {
                    for item in inner {
                        match item {
                            Expr::Num(value) => coefficient *= value,
                            other => out.push(other),
                        }
                    }
                }
                other => out.push(other),
            }
        }
        if coefficient.is_zero() && !out.iter().any(Expr::divides_by_zero) {
            return Expr::zero();
        }
        if out.is_empty() {
            return Expr::Num(coefficient);
        }
        if coefficient.is_one() && out.len() == 1 {
            return out.remove(0);
        }
        if !coefficient.is_one() {
            out.insert(0, Expr::Num(coefficient));
        }
        Expr::Mul(out)
    }

    /// `a + b`.
    #[allow(clippy::should_implement_trait)]
    pub fn add(a: Expr, b: Expr) -> Self {
        Expr::sum([a, b])
    }

    /// `a - b`.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(a: Expr, b: Expr) -> Self {
        Expr::sum([a, Expr::neg(b)])
    }

    /// `a * b`.
    #[allow(clippy::should_implement_trait)]
    pub fn mul(a: Expr, b: Expr) -> Self {
        Expr::product([a, b])
    }

    /// `a / b`.
    #[allow(clippy::should_implement_trait)]
    pub fn div(a: Expr, b: Expr) -> Self {
        Expr::product([a, Expr::pow(b, Expr::int(-1))])
    }

    /// `-a`.
    #[allow(clippy::should_implement_trait)]
    pub fn neg(a: Expr) -> Self {
        Expr::product([Expr::int(-1), a])
    }

    /// `base ** exponent`.
    ///
    /// Exponents `0` and `1` are folded, as are integer powers of numerals
    /// small enough to write out (negative powers of zero stay unevaluated).
    pub fn pow(base: Expr, exponent: Expr) -> Self {
        if exponent.is_zero() {
            return Expr::one();
        }
        if exponent.is_one() {
            return base;
        }
        if let (Expr::Num(b), Expr::Num(e)) = (&base, &exponent) {
            if let Some(folded) = numeric::integer_power(b, e) {
                return Expr::Num(folded);
            }
        }
        Expr::Pow(Box::new(base), Box::new(exponent))
    }

    /// Principal square root.
    pub fn sqrt(a: Expr) -> Self {
        Expr::pow(a, Expr::rational(1, 2))
    }

    /// `a mod b`, folded when both sides are numerals and `b` is non-zero.
    pub fn modulo(a: Expr, b: Expr) -> Self {
        if let (Expr::Num(x), Expr::Num(y)) = (&a, &b) {
            if !y.is_zero() {
                return Expr::Num(numeric::floor_mod(x, y));
            }
        }
        Expr::Mod(Box::new(a), Box::new(b))
    }

    /// Function application.
    pub fn call(func: Func, arg: Expr) -> Self {
        Expr::Call(func, Box::new(arg))
    }

    /// `sin(a)`.
    pub fn sin(a: Expr) -> Self {
        Expr::call(Func::Sin, a)
    }

    /// `cos(a)`.
    pub fn cos(a: Expr) -> Self {
        Expr::call(Func::Cos, a)
    }

    /// `tan(a)`.
    pub fn tan(a: Expr) -> Self {
        Expr::call(Func::Tan, a)
    }

    /// Collects the names of all free symbols.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols(&self, out: &mut BTreeSet<String>) {
        match self {
            Expr::Num(_) | Expr::Const(_) => {}
            Expr::Sym(name) => {
                out.insert(name.clone());
            }
            Expr::Add(items) | Expr::Mul(items) => {
                for item in items {
                    item.collect_symbols(out);
                }
            }
            Expr::Pow(a, b) | Expr::Mod(a, b) => {
                a.collect_symbols(out);
                b.collect_symbols(out);
            }
            Expr::Call(_, arg) => arg.collect_symbols(out),
        }
    }

    /// Replaces symbols by expressions, rebuilding through the constructors.
    pub fn substitute(&self, bindings: &HashMap<String, Expr>) -> Expr {
        match self {
            Expr::Num(_) | Expr::Const(_) => self.clone(),
            Expr::Sym(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Expr::Add(terms) => Expr::sum(terms.iter().map(|t| t.substitute(bindings))),
            Expr::Mul(factors) => Expr::product(factors.iter().map(|f| f.substitute(bindings))),
            Expr::Pow(base, exp) => Expr::pow(base.substitute(bindings), exp.substitute(bindings)),
            Expr::Mod(a, b) => Expr::modulo(a.substitute(bindings), b.substitute(bindings)),
            Expr::Call(func, arg) => Expr::call(*func, arg.substitute(bindings)),
        }
    }

    /// Evaluates numerically with symbol values taken from `env`.
    pub fn eval(&self, env: &HashMap<String, f64>) -> Result<f64, AlgebraError> {
        let value = match self {
            Expr::Num(value) => value.to_f64().ok_or(AlgebraError::NonFinite)?,
            Expr::Const(c) => c.value(),
            Expr::Sym(name) => *env
                .get(name)
                .ok_or_else(|| AlgebraError::UnboundSymbol(name.clone()))?,
            Expr::Add(terms) => {
                let mut total = 0.0;
                for term in terms {
                    total += term.eval(env)?;
                }
                total
            }
            Expr::Mul(factors) => {
                let mut total = 1.0;
                for factor in factors {
                    total *= factor.eval(env)?;
                }
                total
            }
            Expr::Pow(base, exp) => {
                let b = base.eval(env)?;
                let e = exp.eval(env)?;
                if b == 0.0 && e < 0.0 {
                    return Err(AlgebraError::DivisionByZero);
                }
                b.powf(e)
            }
            Expr::Mod(a, b) => {
                let a = a.eval(env)?;
                let b = b.eval(env)?;
                if b == 0.0 {
                    return Err(AlgebraError::DivisionByZero);
                }
                a - b * (a / b).floor()
            }
            Expr::Call(func, arg) => func.apply(arg.eval(env)?),
        };
        if value.is_nan() {
            Err(AlgebraError::Undefined)
        } else if value.is_infinite() {
            Err(AlgebraError::NonFinite)
        } else {
            Ok(value)
        }
    }

    /// Splits a leading negative sign off a term: `-3*x` becomes `(true, 3*x)`.
    pub(crate) fn split_sign(&self) -> (bool, Expr) {
        match self {
            Expr::Num(value) if value.is_negative() => (true, Expr::Num(-value)),
            Expr::Mul(factors) => match factors.first() {
                Some(Expr::Num(c)) if c.is_negative() => {
                    let rest = factors[1..].iter().cloned();
                    (true, Expr::product(std::iter::once(Expr::Num(-c)).chain(rest)))
                }
                _ => (false, self.clone()),
            },
            _ => (false, self.clone()),
        }
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::int(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_flatten_and_fold_numerals() {
        let e = Expr::sum([
            Expr::sym("x"),
            Expr::int(2),
            Expr::sum([Expr::sym("y"), Expr::int(3)]),
        ]);
        assert_eq!(
            e,
            Expr::Add(vec![Expr::sym("x"), Expr::sym("y"), Expr::int(5)])
        );

        let p = Expr::product([Expr::int(2), Expr::sym("x"), Expr::rational(1, 4)]);
        assert_eq!(
            p,
            Expr::Mul(vec![Expr::rational(1, 2), Expr::sym("x")])
        );
        assert_eq!(Expr::product([Expr::zero(), Expr::sym("x")]), Expr::zero());
        assert_eq!(Expr::sum(Vec::new()), Expr::zero());
        assert_eq!(Expr::product(Vec::new()), Expr::one());
    }

    #[test]
    fn pow_folds_only_safe_numeral_cases() {
        assert_eq!(Expr::pow(Expr::int(2), Expr::int(10)), Expr::int(1024));
        assert_eq!(Expr::pow(Expr::int(4), Expr::int(-1)), Expr::rational(1, 4));
        assert!(matches!(
            Expr::pow(Expr::int(0), Expr::int(-1)),
            Expr::Pow(_, _)
        ));
        assert!(matches!(Expr::sqrt(Expr::int(2)), Expr::Pow(_, _)));
        assert_eq!(Expr::pow(Expr::sym("x"), Expr::one()), Expr::sym("x"));
    }

    #[test]
    fn modulo_follows_divisor_sign() {
        assert_eq!(Expr::modulo(Expr::int(7), Expr::int(3)), Expr::int(1));
        assert_eq!(Expr::modulo(Expr::int(-7), Expr::int(3)), Expr::int(2));
        assert_eq!(Expr::modulo(Expr::int(7), Expr::int(-3)), Expr::int(-2));
    }

    #[test]
    fn eval_reports_undefined_points() {
        let env = HashMap::from([("x".to_string(), 0.0)]);
        let inv = Expr::div(Expr::one(), Expr::sym("x"));
        assert_eq!(inv.eval(&env), Err(AlgebraError::DivisionByZero));

        let log = Expr::call(Func::Ln, Expr::int(-1));
        assert_eq!(log.eval(&env), Err(AlgebraError::Undefined));

        let unbound = Expr::sym("y");
        assert_eq!(
            unbound.eval(&env),
            Err(AlgebraError::UnboundSymbol("y".to_string()))
        );
    }

    #[test]
    fn substitute_rebuilds_with_folding() {
        let e = Expr::add(Expr::sym("x"), Expr::int(1));
        let bindings = HashMap::from([("x".to_string(), Expr::int(4))]);
        assert_eq!(e.substitute(&bindings), Expr::int(5));
    }
}
