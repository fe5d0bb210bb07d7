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

//! Parsers for CDL predicate strings and free-text algebra.
//!
//! CDL predicates:
//! - point-list predicates `Name(AB,CDE)`
//! - `Equal(left,right)` statements whose operands are nested calls of the
//!   built-in operators and attributes, or free text
//!
//! Free-text algebra (`nom`) supports:
//! - exact decimal literals, identifiers, `pi` and `E`
//! - unary signs and binary `+ - * / %`
//! - right-associative `**` / `^`
//! - `sqrt`, `sin`, `cos`, `tan`, `exp`, `log`/`ln`, `abs`
//! - juxtaposed multiplication in the [`Syntax::Relaxed`] dialect

mod algebra;
mod predicate;
mod utils;

use crate::algebra::Expr;
use crate::diagnostics::{CompileError, ErrorKind, SourceSpan, Span};
use nom::{
    IResult,
    error::{VerboseError, VerboseErrorKind},
};

pub use self::algebra::Syntax;
pub use self::predicate::{parse_equal_predicate, parse_expression_tree, parse_predicate};

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

/// Parses free-text algebra such as `2*x**2 + sqrt(3)`.
pub fn parse_algebra(text: &str, syntax: Syntax) -> Result<Expr, CompileError> {
    let grammar = self::algebra::Grammar { syntax };
    match grammar.complete(Span::new(text)) {
        Ok((_, expr)) => Ok(expr),
        Err(err) => Err(parse_error_to_compile_error(err, text)),
    }
}

/// Converts a `nom` verbose error to crate-level compile diagnostics.
fn parse_error_to_compile_error(err: nom::Err<VerboseError<Span<'_>>>, source: &str) -> CompileError {
    match err {
        nom::Err::Incomplete(_) => {
            CompileError::in_source(ErrorKind::Syntax, "incomplete input", source)
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            // Use the outermost recorded parser error as the diagnostic anchor.
            if let Some((span, kind)) = e.errors.last() {
                let span = SourceSpan::from_bounds(*span, *span);
                let detail = match kind {
                    VerboseErrorKind::Context(ctx) => format!("expected {ctx}"),
                    VerboseErrorKind::Char(c) => format!("expected '{c}'"),
                    VerboseErrorKind::Nom(nom::error::ErrorKind::Eof) => {
                        "unexpected trailing input".to_string()
                    }
                    VerboseErrorKind::Nom(kind) => format!("unexpected input near {kind:?}"),
                };
                CompileError::from_span(ErrorKind::Syntax, detail, source, &span)
            } else {
                CompileError::in_source(ErrorKind::Syntax, "invalid expression", source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(text: &str) -> Expr {
        parse_algebra(text, Syntax::Strict).expect(text)
    }

    fn relaxed(text: &str) -> Expr {
        parse_algebra(text, Syntax::Relaxed).expect(text)
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(strict("2**3**2"), Expr::int(512));
        assert_eq!(strict("2^3"), Expr::int(8));
        assert_eq!(strict("-2**2"), Expr::int(-4));
        assert_eq!(strict("8/2/2"), Expr::int(2));
        assert_eq!(strict("7 % 3"), Expr::int(1));
        assert_eq!(strict("1 - 2 - 3"), Expr::int(-4));
    }

    #[test]
    fn decimals_stay_exact() {
        assert_eq!(strict("0.5"), Expr::rational(1, 2));
        assert_eq!(strict("200.0"), Expr::int(200));
    }

    #[test]
    fn scientific_notation() {
        assert_eq!(strict("1.5e2"), Expr::int(150));
        assert_eq!(strict("2E-3"), Expr::rational(1, 500));
        assert_eq!(
            relaxed("1.5e2*x"),
            Expr::mul(Expr::int(150), Expr::sym("x"))
        );
        assert_eq!(relaxed("2e"), Expr::mul(Expr::int(2), Expr::sym("e")));
    }

    #[test]
    fn names_constants_and_functions() {
        assert_eq!(strict("ll_ab"), Expr::sym("ll_ab"));
        assert_eq!(strict("pi"), Expr::pi());
        assert_eq!(strict("sqrt(x)"), Expr::sqrt(Expr::sym("x")));
        assert_eq!(strict("sin(x)"), Expr::sin(Expr::sym("x")));
    }

    #[test]
    fn strict_rejects_juxtaposition_and_unknown_calls() {
        for bad in ["2x", "f(x)", "(x+1)(x-1)", "x +", "sqrt(x, y)", ""] {
            let err = parse_algebra(bad, Syntax::Strict).expect_err(bad);
            assert_eq!(err.kind, ErrorKind::Syntax, "{bad}");
        }
    }

    #[test]
    fn relaxed_reads_juxtaposition() {
        let x = || Expr::sym("x");
        assert_eq!(relaxed("2x"), Expr::mul(Expr::int(2), x()));
        assert_eq!(
            relaxed("2x^2"),
            Expr::mul(Expr::int(2), Expr::pow(x(), Expr::int(2)))
        );
        assert_eq!(
            relaxed("x(x+1)"),
            Expr::mul(x(), Expr::add(x(), Expr::one()))
        );
    }

    #[test]
    fn relaxed_splits_letter_names() {
        let (x, y) = (|| Expr::sym("x"), || Expr::sym("y"));
        assert_eq!(relaxed("xy"), Expr::mul(x(), y()));
        assert_eq!(
            relaxed("2xy^2"),
            Expr::product([Expr::int(2), x(), Expr::pow(y(), Expr::int(2))])
        );
        assert_eq!(relaxed("ab(x)"), Expr::product([Expr::sym("a"), Expr::sym("b"), x()]));
        assert_eq!(relaxed("ll_ab"), Expr::sym("ll_ab"));
        assert_eq!(relaxed("x1"), Expr::sym("x1"));
        assert_eq!(relaxed("theta"), Expr::sym("theta"));
        assert_eq!(relaxed("pi"), Expr::pi());
        assert_eq!(relaxed("sin(x)"), Expr::sin(x()));
        assert_eq!(strict("xy"), Expr::sym("xy"));
    }
}
