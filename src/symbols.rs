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

//! Attribute vocabulary and symbol lookup consumed by the compiler.

use crate::algebra::Expr;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Attribute name under which free variables (`x`, `y`, ...) are stored.
pub const FREE_ATTRIBUTE: &str = "Free";

/// Point-letter substitution map applied to attribute points on request.
pub type LetterMap = HashMap<char, char>;

/// An algebraic unknown owned by the surrounding problem model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Symbol name as used inside expressions.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The symbol as an expression leaf.
    pub fn to_expr(&self) -> Expr {
        Expr::Sym(self.0.clone())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vocabulary entry for one attribute kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSpec {
    /// Symbol prefix, e.g. `ll` for `LengthOfLine`.
    pub shorthand: String,
    /// Number of point letters; `0` accepts any count.
    pub arity: usize,
}

impl AttributeSpec {
    /// Returns whether `count` point letters fit this attribute.
    pub fn accepts(&self, count: usize) -> bool {
        self.arity == 0 || self.arity == count
    }
}

/// Read-only view of a problem's symbols.
pub trait SymbolTable {
    /// Symbol bound to `attribute` over `points`, if one exists yet.
    fn symbol_of_attribute(&self, attribute: &str, points: &[char]) -> Option<Symbol>;

    /// Declared attribute vocabulary keyed by attribute name.
    fn declared_attributes(&self) -> &BTreeMap<String, AttributeSpec>;
}

/// In-memory symbol table.
///
/// Symbols are named `shorthand_points` with lower-cased points, so
/// `LengthOfLine(AB)` becomes `ll_ab`; free variables live under
/// [`FREE_ATTRIBUTE`] with shorthand `f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemSymbols {
    attributes: BTreeMap<String, AttributeSpec>,
    bindings: BTreeMap<(String, Vec<char>), Symbol>,
}

impl Default for ProblemSymbols {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemSymbols {
    /// Creates a table declaring only [`FREE_ATTRIBUTE`].
    pub fn new() -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(
            FREE_ATTRIBUTE.to_string(),
            AttributeSpec {
                shorthand: "f".to_string(),
                arity: 0,
            },
        );
        Self {
            attributes,
            bindings: BTreeMap::new(),
        }
    }

    /// Declares an attribute kind.
    pub fn declare(mut self, name: &str, shorthand: &str, arity: usize) -> Self {
        self.attributes.insert(
            name.to_string(),
            AttributeSpec {
                shorthand: shorthand.to_string(),
                arity,
            },
        );
        self
    }

    /// Binds `attribute(points)` to its conventionally named symbol.
    pub fn bind(mut self, attribute: &str, points: &str) -> Self {
        self.insert(attribute, points);
        self
    }

    /// Binds a free variable, e.g. `x` to `f_x`.
    pub fn bind_free(self, name: &str) -> Self {
        self.bind(FREE_ATTRIBUTE, name)
    }

    /// Binds `attribute(points)` to an explicitly named symbol.
    pub fn bind_as(mut self, attribute: &str, points: &str, symbol: Symbol) -> Self {
        self.bindings
            .insert((attribute.to_string(), points.chars().collect()), symbol);
        self
    }

    /// Binds `attribute(points)` in place and returns the symbol.
    pub fn insert(&mut self, attribute: &str, points: &str) -> Symbol {
        let prefix = self
            .attributes
            .get(attribute)
            .map(|spec| spec.shorthand.clone())
            .unwrap_or_else(|| attribute.to_lowercase());
        let symbol = Symbol::new(format!("{prefix}_{}", points.to_lowercase()));
        self.bindings.insert(
            (attribute.to_string(), points.chars().collect()),
            symbol.clone(),
        );
        symbol
    }

    /// Number of bound symbols.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns whether no symbol is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl SymbolTable for ProblemSymbols {
    fn symbol_of_attribute(&self, attribute: &str, points: &[char]) -> Option<Symbol> {
        self.bindings
            .get(&(attribute.to_string(), points.to_vec()))
            .cloned()
    }

    fn declared_attributes(&self) -> &BTreeMap<String, AttributeSpec> {
        &self.attributes
    }
}
