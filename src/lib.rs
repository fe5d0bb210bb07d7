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

//! Geometry Condition Description Language (CDL) toolkit.
//!
//! This crate provides:
//! - Parsers for point-list predicates (`Parallel(AB,CD)`), `Equal(...)`
//!   statements and nested expression trees.
//! - Lowering from expression trees to exact algebraic expressions, with
//!   attribute symbols resolved through a caller-supplied [`SymbolTable`].
//! - An answer-equivalence oracle combining exact, numeric, symbolic and
//!   randomized comparison.
//! - Set metrics for comparing predicted CDL lists against references.
//! - Rich diagnostics with line/column/caret output for malformed input.
//!
//! # Pipeline
//!
//! 1. Parse CDL text into an [`ExpressionNode`] tree (or [`EqualStatement`]).
//! 2. Lower the tree with a [`Compiler`] into an [`Expr`]; `Equal(l,r)`
//!    becomes `l - r`.
//! 3. Compare final answers with [`equivalent`] or [`judge`].
//!
//! # Failure channels
//!
//! Malformed input is a hard [`CompileError`]. A quantity that cannot be
//! evaluated yet, such as an attribute with no symbol bound, compiles to
//! `Ok(None)`.
//!
//! ```
//! use geo_cdl::{ProblemSymbols, equation, parse_equal_predicate};
//! use std::collections::HashMap;
//!
//! let symbols = ProblemSymbols::new()
//!     .declare("LengthOfLine", "ll", 2)
//!     .bind("LengthOfLine", "AB")
//!     .bind("LengthOfLine", "CD")
//!     .bind_free("x");
//! let (statement, _) = parse_equal_predicate("Equal(LengthOfLine(AB),Add(LengthOfLine(CD),x))", false)?;
//! let eq = equation(&statement, &symbols)?.expect("all symbols are bound");
//!
//! let env = HashMap::from([
//!     ("ll_ab".to_string(), 5.0),
//!     ("ll_cd".to_string(), 3.0),
//!     ("f_x".to_string(), 2.0),
//! ]);
//! assert_eq!(eq.eval(&env), Ok(0.0));
//! # Ok::<(), geo_cdl::CompileError>(())
//! ```

mod algebra;
mod ast;
mod compare;
mod compiler;
mod diagnostics;
mod oracle;
mod parser;
mod symbols;

pub use algebra::{AlgebraError, Budget, Constant, Expr, Func, cancel, expand, factor, simplify};
pub use ast::{AttributeRef, EqualStatement, ExpressionNode, Operator, ParsedPredicate};
pub use compare::{SetMetrics, VARIABLE_PLACEHOLDER, normalize_cdl_element};
pub use compiler::{Compiler, preprocess_free_text};
pub use diagnostics::{CompileError, ErrorKind, SourceSpan};
pub use oracle::{EquivalenceOptions, Method, ROUGH_TOLERANCE, Verdict};
pub use parser::{Syntax, parse_algebra, parse_equal_predicate, parse_expression_tree, parse_predicate};
pub use symbols::{
    AttributeSpec, FREE_ATTRIBUTE, LetterMap, ProblemSymbols, Symbol, SymbolTable,
};

/// Compiles one expression tree against `symbols`.
pub fn compile<T: SymbolTable + ?Sized>(
    node: &ExpressionNode,
    symbols: &T,
) -> Result<Option<Expr>, CompileError> {
    Compiler::new(symbols).compile(node)
}

/// Compiles `Equal(left,right)` into `left - right`.
pub fn equation<T: SymbolTable + ?Sized>(
    statement: &EqualStatement,
    symbols: &T,
) -> Result<Option<Expr>, CompileError> {
    Compiler::new(symbols).equation(statement)
}

/// Returns whether two answers are equivalent under default options.
pub fn equivalent(a: &str, b: &str) -> bool {
    oracle::equivalent(a, b, &EquivalenceOptions::default())
}

/// Decides equivalence and reports which comparison settled it.
pub fn judge(a: &str, b: &str, options: &EquivalenceOptions) -> Verdict {
    oracle::judge(a, b, options)
}

/// Compares plain numbers within `tolerance`; other answers go through
/// [`equivalent`].
pub fn rough_equal(a: &str, b: &str, tolerance: f64) -> bool {
    oracle::rough_equal(a, b, tolerance)
}

/// Returns whether two answers are equivalent under `options`.
pub fn equivalent_with(a: &str, b: &str, options: &EquivalenceOptions) -> bool {
    oracle::equivalent(a, b, options)
}

#[cfg(test)]
mod tests;
