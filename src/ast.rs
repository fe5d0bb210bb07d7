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

//! Value trees for parsed CDL statements.
//!
//! The predicate parser produces these trees; the compiler lowers them into
//! algebraic [`Expr`](crate::Expr) values. Trees are built bottom-up, hold no
//! back-references, and are never mutated after parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A simple point-list predicate such as `Triangle(ABC)` or `Parallel(AB,CD)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedPredicate {
    /// Predicate name (text before the opening parenthesis).
    pub name: String,
    /// Flattened point letters of all argument groups.
    pub params: Vec<char>,
    /// Length of each comma-separated group; sums to `params.len()`.
    pub group_lengths: Vec<usize>,
}

impl ParsedPredicate {
    /// Re-chunks the flat parameter list into its original groups.
    pub fn groups(&self) -> Vec<&[char]> {
        let mut groups = Vec::with_capacity(self.group_lengths.len());
        let mut start = 0;
        for len in &self.group_lengths {
            let end = (start + len).min(self.params.len());
            groups.push(&self.params[start..end]);
            start = end;
        }
        groups
    }
}

impl fmt::Display for ParsedPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .groups()
            .into_iter()
            .map(|group| group.iter().collect())
            .collect();
        write!(f, "{}({})", self.name, groups.join(","))
    }
}

/// The fixed set of built-in operators.
///
/// Any other call name in an expression tree is an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// n-ary sum.
    Add,
    /// Binary difference.
    Sub,
    /// n-ary product.
    Mul,
    /// Binary quotient.
    Div,
    /// Binary power.
    Pow,
    /// Binary remainder.
    Mod,
    /// Unary square root.
    Sqrt,
    /// Unary sine of an angle in degrees.
    Sin,
    /// Unary cosine of an angle in degrees.
    Cos,
    /// Unary tangent of an angle in degrees.
    Tan,
}

impl Operator {
    /// All built-in operators in declaration order.
    pub const ALL: [Operator; 10] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
        Operator::Mod,
        Operator::Sqrt,
        Operator::Sin,
        Operator::Cos,
        Operator::Tan,
    ];

    /// Looks up a built-in operator by its CDL spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Returns the CDL spelling.
    pub fn name(self) -> &'static str {
        match self {
            Operator::Add => "Add",
            Operator::Sub => "Sub",
            Operator::Mul => "Mul",
            Operator::Div => "Div",
            Operator::Pow => "Pow",
            Operator::Mod => "Mod",
            Operator::Sqrt => "Sqrt",
            Operator::Sin => "Sin",
            Operator::Cos => "Cos",
            Operator::Tan => "Tan",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An attribute call keyed by its point labels, e.g. `LengthOfLine(AB)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttributeRef {
    /// Attribute name as written.
    pub name: String,
    /// Ordered point labels.
    pub points: Vec<char>,
}

impl AttributeRef {
    /// Creates an attribute reference from a name and a point string.
    pub fn new(name: impl Into<String>, points: &str) -> Self {
        Self {
            name: name.into(),
            points: points.chars().collect(),
        }
    }

    /// Returns the point labels as a string.
    pub fn point_string(&self) -> String {
        self.points.iter().collect()
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.point_string())
    }
}

/// One node of a parsed expression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionNode {
    /// Opaque algebraic text or a single token (`x+1`, `12`, `A`).
    Leaf(String),
    /// A built-in operator applied to ordered children.
    Operation {
        /// Operator kind.
        op: Operator,
        /// Children in source order.
        args: Vec<ExpressionNode>,
    },
    /// An attribute call.
    Attribute(AttributeRef),
}

impl ExpressionNode {
    /// Creates a leaf node.
    pub fn leaf(text: impl Into<String>) -> Self {
        ExpressionNode::Leaf(text.into())
    }

    /// Creates an operation node.
    pub fn operation(op: Operator, args: Vec<ExpressionNode>) -> Self {
        ExpressionNode::Operation { op, args }
    }

    /// Creates an attribute node.
    pub fn attribute(name: impl Into<String>, points: &str) -> Self {
        ExpressionNode::Attribute(AttributeRef::new(name, points))
    }

    /// Returns whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ExpressionNode::Leaf(_))
    }

    /// Collects every attribute reference in source order.
    pub fn attributes(&self) -> Vec<AttributeRef> {
        let mut out = Vec::new();
        self.collect_attributes(&mut out);
        out
    }

    fn collect_attributes(&self, out: &mut Vec<AttributeRef>) {
        match self {
            ExpressionNode::Leaf(_) => {}
            ExpressionNode::Operation { args, .. } => {
                for arg in args {
                    arg.collect_attributes(out);
                }
            }
            ExpressionNode::Attribute(attr) => out.push(attr.clone()),
        }
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Leaf(text) => f.write_str(text),
            ExpressionNode::Operation { op, args } => {
                write!(f, "{op}(")?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            ExpressionNode::Attribute(attr) => write!(f, "{attr}"),
        }
    }
}

/// A parsed `Equal(left,right)` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualStatement {
    /// Left operand.
    pub left: ExpressionNode,
    /// Right operand.
    pub right: ExpressionNode,
}

impl EqualStatement {
    /// Collects attribute references from both operands, left first.
    pub fn attributes(&self) -> Vec<AttributeRef> {
        let mut out = self.left.attributes();
        out.extend(self.right.attributes());
        out
    }
}

impl fmt::Display for EqualStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Equal({},{})", self.left, self.right)
    }
}
