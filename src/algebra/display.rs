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

//! Human-readable rendering of [`Expr`]. The output re-parses to the same
//! value with the free-text grammar.

use super::{Expr, Func};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const SUM: u8 = 1;
const PRODUCT: u8 = 2;
const POWER: u8 = 3;
const ATOM: u8 = 4;

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Add(_) => SUM,
        Expr::Mul(_) | Expr::Mod(_, _) => PRODUCT,
        Expr::Num(value) if value.is_negative() || !value.is_integer() => PRODUCT,
        Expr::Pow(_, exp) => match exp.as_number() {
            Some(e) if e.is_negative() => PRODUCT,
            Some(e) if is_half(e) => ATOM,
            _ => POWER,
        },
        Expr::Num(_) | Expr::Const(_) | Expr::Sym(_) | Expr::Call(_, _) => ATOM,
    }
}

fn is_half(value: &BigRational) -> bool {
    value.numer().is_one() && *value.denom() == BigInt::from(2)
}

fn wrapped(expr: &Expr, min: u8) -> String {
    let text = render(expr);
    if precedence(expr) < min {
        format!("({text})")
    } else {
        text
    }
}

fn render(expr: &Expr) -> String {
    match expr {
        Expr::Num(value) if value.is_integer() => value.numer().to_string(),
        Expr::Num(value) => format!("{}/{}", value.numer(), value.denom()),
        Expr::Const(c) => c.name().to_string(),
        Expr::Sym(name) => name.clone(),
        Expr::Add(terms) => render_sum(terms),
        Expr::Mul(factors) => render_product(factors),
        Expr::Pow(base, exp) => match exp.as_number() {
            Some(e) if is_half(e) => format!("sqrt({})", render(base)),
            Some(e) if e.is_negative() => render_product(std::slice::from_ref(expr)),
            _ => format!("{}**{}", wrapped(base, ATOM), wrapped(exp, ATOM)),
        },
        Expr::Mod(a, b) => format!("{} % {}", wrapped(a, POWER), wrapped(b, POWER)),
        Expr::Call(func, arg) => format!("{}({})", func.name(), render(arg)),
    }
}

fn render_sum(terms: &[Expr]) -> String {
    let mut out = String::new();
    for (idx, term) in terms.iter().enumerate() {
        let (negative, magnitude) = term.split_sign();
        match (idx, negative) {
            (0, false) => out.push_str(&render(term)),
            (0, true) => {
                out.push('-');
                out.push_str(&wrapped(&magnitude, PRODUCT));
            }
            (_, false) => {
                out.push_str(" + ");
                out.push_str(&wrapped(term, PRODUCT));
            }
            (_, true) => {
                out.push_str(" - ");
                out.push_str(&wrapped(&magnitude, PRODUCT));
            }
        }
    }
    out
}

/// Renders `c * a * b * x**-1` as `c*a*b/x`, moving every factor with a
/// negative numeral exponent into the denominator.
fn render_product(factors: &[Expr]) -> String {
    let mut coefficient = BigRational::one();
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in factors {
        match factor {
            Expr::Num(value) => coefficient *= value,
            Expr::Pow(base, exp) => match exp.as_number() {
                Some(e) if e.is_negative() => {
                    denom.push(Expr::pow((**base).clone(), Expr::Num(-e)));
                }
                _ => numer.push(factor),
            },
            other => numer.push(other),
        }
    }

    let negative = coefficient.is_negative();
    let magnitude = coefficient.abs();
    let mut parts = Vec::new();
    if !magnitude.numer().is_one() || numer.is_empty() {
        parts.push(magnitude.numer().to_string());
    }
    parts.extend(numer.iter().map(|f| wrapped(f, POWER)));
    let mut text = parts.join("*");

    let mut below = Vec::new();
    if !magnitude.denom().is_one() {
        below.push(magnitude.denom().to_string());
    }
    below.extend(denom.iter().map(|f| wrapped(f, POWER)));
    match below.len() {
        0 => {}
        1 => {
            text.push('/');
            text.push_str(&below[0]);
        }
        _ => text.push_str(&format!("/({})", below.join("*"))),
    }

    if negative {
        format!("-{text}")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_trig_renders_like_source() {
        let angle = Expr::product([Expr::pi(), Expr::sym("m_zxy"), Expr::rational(1, 180)]);
        assert_eq!(Expr::sin(angle).to_string(), "sin(pi*m_zxy/180)");
    }

    #[test]
    fn sums_print_subtraction() {
        let e = Expr::sub(Expr::sym("ll_ab"), Expr::int(14));
        assert_eq!(e.to_string(), "ll_ab - 14");
        let e = Expr::sub(Expr::sym("a"), Expr::mul(Expr::int(2), Expr::sym("b")));
        assert_eq!(e.to_string(), "a - 2*b");
    }

    #[test]
    fn products_group_denominators() {
        let e = Expr::div(Expr::sym("x"), Expr::mul(Expr::int(2), Expr::sym("y")));
        assert_eq!(e.to_string(), "x/(2*y)");
        let e = Expr::div(Expr::one(), Expr::add(Expr::sym("x"), Expr::one()));
        assert_eq!(e.to_string(), "1/(x + 1)");
        let e = Expr::pow(Expr::add(Expr::sym("x"), Expr::int(4)), Expr::int(3));
        assert_eq!(e.to_string(), "(x + 4)**3");
        assert_eq!(Expr::sqrt(Expr::int(2)).to_string(), "sqrt(2)");
        assert_eq!(
            Expr::pow(Expr::sym("x"), Expr::rational(1, 3)).to_string(),
            "x**(1/3)"
        );
    }
}
