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

//! Node and attribute lowering.

use super::*;

impl<T: SymbolTable + ?Sized> Compiler<'_, T> {
    /// Recursively lowers a tree node.
    pub(super) fn lower_node(&self, node: &ExpressionNode) -> Result<Option<Expr>, CompileError> {
        match node {
            ExpressionNode::Leaf(text) => Ok(self.free_text(text)),
            ExpressionNode::Operation { op, args } => self.lower_operation(*op, args, node),
            ExpressionNode::Attribute(attr) => self.lower_attribute(attr),
        }
    }

    /// Resolves an attribute call: a declared attribute is a symbol lookup,
    /// a solid name expands into edge-length formulas.
    pub(super) fn lower_attribute(&self, attr: &AttributeRef) -> Result<Option<Expr>, CompileError> {
        let name = canonical_attribute_name(&attr.name);
        if self.symbols.declared_attributes().contains_key(name) {
            let points = self.substitute_points(attr)?;
            let symbol = self.symbols.symbol_of_attribute(name, &points);
            if symbol.is_none() {
                debug!(
                    attribute = name,
                    points = %points.iter().collect::<String>(),
                    "attribute has no symbol yet"
                );
            }
            return Ok(symbol.map(|s| s.to_expr()));
        }
        if let Some(solid) = Solid::from_name(name) {
            return self.lower_solid(solid, attr);
        }
        Err(self.error_at(
            ErrorKind::UnknownOperator,
            format!("operator '{}' is not defined", attr.name),
            attr,
        ))
    }

    fn substitute_points(&self, attr: &AttributeRef) -> Result<Vec<char>, CompileError> {
        let Some(letters) = self.letters else {
            return Ok(attr.points.clone());
        };
        attr.points
            .iter()
            .map(|point| {
                letters.get(point).copied().ok_or_else(|| {
                    self.error_at(
                        ErrorKind::Substitution,
                        format!("no substitution letter for point '{point}'"),
                        attr,
                    )
                })
            })
            .collect()
    }
}

/// Maps legacy spellings onto the vocabulary's attribute names.
fn canonical_attribute_name(name: &str) -> &str {
    match name {
        "LateralAreaOfCone" => "LateralareaOfCone",
        "LateralAreaOfCylinder" => "LateralareaOfCylinder",
        other => other,
    }
}
