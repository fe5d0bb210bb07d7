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

//! Solid-geometry formulas over the edge lengths of an 8-point solid.

use super::*;

const SOLID_POINTS: usize = 8;
const EDGE_LENGTH: &str = "LengthOfLine";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Solid {
    AreaOfCube,
    VolumeOfCube,
    AreaOfCuboid,
    VolumeOfCuboid,
}

impl Solid {
    pub(super) fn from_name(name: &str) -> Option<Self> {
        match name {
            "AreaOfCube" => Some(Solid::AreaOfCube),
            "VolumeOfCube" => Some(Solid::VolumeOfCube),
            "AreaOfCuboid" => Some(Solid::AreaOfCuboid),
            "VolumeOfCuboid" => Some(Solid::VolumeOfCuboid),
            _ => None,
        }
    }

    /// Point index pairs of the edges the formula reads.
    fn edges(self) -> &'static [(usize, usize)] {
        match self {
            Solid::AreaOfCube | Solid::VolumeOfCube => &[(0, 1)],
            Solid::AreaOfCuboid | Solid::VolumeOfCuboid => &[(0, 1), (0, 3), (0, 4)],
        }
    }

    fn formula(self, edges: &[Expr]) -> Expr {
        match (self, edges) {
            (Solid::AreaOfCube, [s]) => {
                Expr::mul(Expr::int(6), Expr::pow(s.clone(), Expr::int(2)))
            }
            (Solid::VolumeOfCube, [s]) => Expr::pow(s.clone(), Expr::int(3)),
            (Solid::AreaOfCuboid, [l, w, h]) => Expr::mul(
                Expr::int(2),
                Expr::sum([
                    Expr::mul(l.clone(), w.clone()),
                    Expr::mul(l.clone(), h.clone()),
                    Expr::mul(w.clone(), h.clone()),
                ]),
            ),
            _ => Expr::product(edges.iter().cloned()),
        }
    }
}

impl<T: SymbolTable + ?Sized> Compiler<'_, T> {
    pub(super) fn lower_solid(
        &self,
        solid: Solid,
        attr: &AttributeRef,
    ) -> Result<Option<Expr>, CompileError> {
        if attr.points.len() != SOLID_POINTS {
            return Err(self.error_at(
                ErrorKind::Structural,
                format!(
                    "{} needs {SOLID_POINTS} points, found {}",
                    attr.name,
                    attr.points.len()
                ),
                attr,
            ));
        }
        let mut edges = Vec::with_capacity(3);
        for &(from, to) in solid.edges() {
            let edge = AttributeRef {
                name: EDGE_LENGTH.to_string(),
                points: vec![attr.points[from], attr.points[to]],
            };
            match self.lower_attribute(&edge)? {
                Some(length) => edges.push(length),
                None => return Ok(None),
            }
        }
        Ok(Some(solid.formula(&edges)))
    }
}
