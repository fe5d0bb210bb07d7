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

//! Free-text algebra parser.

use crate::algebra::{Expr, Func};
use crate::diagnostics::Span;
use nom::Parser;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, satisfy},
    combinator::{all_consuming, map, not, opt},
    error::{VerboseError, VerboseErrorKind, context},
    sequence::{delimited, terminated},
};

use super::PResult;
use super::utils::{decimal, identifier, starts_operand, ws, ws0, ws_char};

/// Accepted free-text dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Syntax {
    /// Explicit operators only; calls must name a known function.
    #[default]
    Strict,
    /// Also reads juxtaposition (`2x`, `x(x+1)`, `(a+b)(a-b)`) as
    /// multiplication, and splits all-letter names such as `xy` into
    /// single-letter factors.
    Relaxed,
}

/// Grammar rules for one dialect.
pub(super) struct Grammar {
    pub(super) syntax: Syntax,
}

impl Grammar {
    /// Parses the whole input, allowing surrounding whitespace.
    pub(super) fn complete<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        all_consuming(delimited(ws0, |i: Span<'a>| self.expr(i), ws0))(input)
    }

    fn expr<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        self.sum(input)
    }

    /// Parses left-associative `+`/`-`.
    fn sum<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        let (mut input, first) = self.product(input)?;
        let mut terms = vec![first];
        loop {
            let (next, op) = opt(alt((ws_char('+'), ws_char('-')))).parse(input)?;
            let Some(op) = op else {
                break;
            };
            let (next, term) = self.product(next)?;
            terms.push(if op == '+' { term } else { Expr::neg(term) });
            input = next;
        }
        Ok((input, Expr::sum(terms)))
    }

    /// Parses left-associative `*`, `/` and `%`, plus juxtaposition in the
    /// relaxed dialect.
    fn product<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        let (mut input, mut acc) = self.unary(input)?;
        loop {
            let (next, op) = opt(ws(alt((
                terminated(char('*'), not(char('*'))),
                char('/'),
                char('%'),
            ))))
            .parse(input)?;
            if let Some(op) = op {
                let (next, rhs) = self.unary(next)?;
                acc = match op {
                    '*' => Expr::mul(acc, rhs),
                    '/' => Expr::div(acc, rhs),
                    _ => Expr::modulo(acc, rhs),
                };
                input = next;
                continue;
            }
            let juxtaposed = self.syntax == Syntax::Relaxed
                && input.fragment().chars().next().is_some_and(starts_operand);
            if juxtaposed {
                if let Ok((next, rhs)) = self.power(input) {
                    acc = Expr::mul(acc, rhs);
                    input = next;
                    continue;
                }
            }
            break;
        }
        Ok((input, acc))
    }

    /// Parses prefix signs; `-x**2` is `-(x**2)`.
    fn unary<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        if let Ok((rest, sign)) = alt((ws_char('-'), ws_char('+'))).parse(input) {
            let (rest, inner) = self.unary(rest)?;
            let value = if sign == '-' { Expr::neg(inner) } else { inner };
            return Ok((rest, value));
        }
        self.power(input)
    }

    /// Parses right-associative `**` (or `^`).
    fn power<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        let (input, base) = self.primary(input)?;
        let (input, op) = opt(ws(alt((tag("**"), tag("^"))))).parse(input)?;
        if op.is_none() {
            return Ok((input, base));
        }
        let (input, exponent) = context("exponent", |i: Span<'a>| self.unary(i)).parse(input)?;
        Ok((input, Expr::pow(base, exponent)))
    }

    /// Parses expression atoms.
    fn primary<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        alt((
            |i: Span<'a>| self.parenthesized(i),
            map(ws(decimal), Expr::Num),
            |i: Span<'a>| self.ident_or_call(i),
        ))
        .parse(input)
    }

    fn parenthesized<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        delimited(
            ws_char('('),
            |i: Span<'a>| self.expr(i),
            context("')'", ws_char(')')),
        )
        .parse(input)
    }

    /// Parses a name, a constant, or a single-argument function call.
    fn ident_or_call<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        let (rest, name) = ws(identifier).parse(input)?;
        if self.syntax == Syntax::Relaxed && splittable(&name) {
            // Take one letter; juxtaposition reads the rest of the name.
            let (rest, letter) = ws(satisfy(|c| c.is_ascii_alphabetic())).parse(input)?;
            return Ok((rest, named_value(letter.to_string())));
        }
        if !rest.fragment().starts_with('(') {
            return Ok((rest, named_value(name)));
        }
        if name == "sqrt" {
            let (rest, arg) = self.argument(rest)?;
            return Ok((rest, Expr::sqrt(arg)));
        }
        if let Some(func) = Func::from_name(&name) {
            let (rest, arg) = self.argument(rest)?;
            return Ok((rest, Expr::call(func, arg)));
        }
        match self.syntax {
            // The parenthesis is picked up as a juxtaposed factor.
            Syntax::Relaxed => Ok((rest, named_value(name))),
            Syntax::Strict => Err(nom::Err::Failure(VerboseError {
                errors: vec![(input, VerboseErrorKind::Context("known function name"))],
            })),
        }
    }

    fn argument<'a>(&self, input: Span<'a>) -> PResult<'a, Expr> {
        delimited(
            ws_char('('),
            |i: Span<'a>| self.expr(i),
            context("')' after a single argument", ws_char(')')),
        )
        .parse(input)
    }
}

/// Letter names that are never split into single letters.
const GREEK_LETTERS: [&str; 24] = [
    "alpha", "beta", "gamma", "delta", "epsilon", "zeta", "eta", "theta", "iota", "kappa",
    "lambda", "mu", "nu", "xi", "omicron", "pi", "rho", "sigma", "tau", "upsilon", "phi", "chi",
    "psi", "omega",
];

/// Whether a relaxed-dialect name reads as a product of letters: `xy` is
/// `x*y`, while `ll_ab`, `x1`, `theta` and function names stay whole.
fn splittable(name: &str) -> bool {
    name.len() > 1
        && name.bytes().all(|b| b.is_ascii_alphabetic())
        && name != "sqrt"
        && Func::from_name(name).is_none()
        && !GREEK_LETTERS.contains(&name)
}

fn named_value(name: String) -> Expr {
    match name.as_str() {
        "pi" => Expr::pi(),
        "E" => Expr::e(),
        _ => Expr::Sym(name),
    }
}
