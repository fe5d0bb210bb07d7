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

//! Compiler state and public entry points.

use super::*;
use crate::symbols::LetterMap;

/// Compiles expression trees against one problem's symbol table.
///
/// With a [`LetterMap`] every attribute's points are rewritten through the
/// map before lookup; a point missing from the map is a hard error.
pub struct Compiler<'a, T: SymbolTable + ?Sized> {
    pub(super) symbols: &'a T,
    pub(super) letters: Option<&'a LetterMap>,
}

impl<'a, T: SymbolTable + ?Sized> Compiler<'a, T> {
    /// Creates a compiler that looks attributes up with their own points.
    pub fn new(symbols: &'a T) -> Self {
        Self {
            symbols,
            letters: None,
        }
    }

    /// Creates a compiler that substitutes point letters before lookup.
    pub fn with_letters(symbols: &'a T, letters: &'a LetterMap) -> Self {
        Self {
            symbols,
            letters: Some(letters),
        }
    }

    /// Compiles one expression tree.
    pub fn compile(&self, node: &ExpressionNode) -> Result<Option<Expr>, CompileError> {
        self.lower_node(node)
    }

    /// Compiles `Equal(left,right)` into `left - right`.
    ///
    /// `None` when either side cannot be evaluated yet.
    pub fn equation(&self, statement: &EqualStatement) -> Result<Option<Expr>, CompileError> {
        let left = self.compile(&statement.left)?;
        let right = self.compile(&statement.right)?;
        match (left, right) {
            (Some(left), Some(right)) => Ok(Some(Expr::sub(left, right))),
            _ => {
                debug!(statement = %statement, "equation has an unevaluable side");
                Ok(None)
            }
        }
    }

    /// Creates an error naming the offending CDL fragment.
    pub(super) fn error_at(
        &self,
        kind: ErrorKind,
        message: impl Into<String>,
        fragment: &impl fmt::Display,
    ) -> CompileError {
        CompileError::in_source(kind, message, &fragment.to_string())
    }
}
