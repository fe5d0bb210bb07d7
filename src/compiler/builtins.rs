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

//! Lowering for the built-in operators.

use super::*;

impl<T: SymbolTable + ?Sized> Compiler<'_, T> {
    /// Lowers a built-in operator node.
    ///
    /// Semantics:
    /// - `Add`/`Mul` fold their children, skipping absent ones
    /// - `Sub`/`Div`/`Pow`/`Mod` take two children, absent if either is
    /// - `Sin`/`Cos`/`Tan` read their argument in degrees
    /// - `Sqrt` is the principal square root
    pub(super) fn lower_operation(
        &self,
        op: Operator,
        args: &[ExpressionNode],
        node: &ExpressionNode,
    ) -> Result<Option<Expr>, CompileError> {
        match op {
            Operator::Add | Operator::Mul => self.lower_fold(op, args),
            Operator::Sub | Operator::Div | Operator::Pow | Operator::Mod => {
                let [left, right] = expect_2_args(args, op, self, node)?;
                let Some(left) = self.lower_node(left)? else {
                    return Ok(None);
                };
                let Some(right) = self.lower_node(right)? else {
                    return Ok(None);
                };
                Ok(Some(match op {
                    Operator::Sub => Expr::sub(left, right),
                    Operator::Div => Expr::div(left, right),
                    Operator::Pow => Expr::pow(left, right),
                    _ => Expr::modulo(left, right),
                }))
            }
            Operator::Sqrt | Operator::Sin | Operator::Cos | Operator::Tan => {
                let [arg] = expect_1_arg(args, op, self, node)?;
                let Some(arg) = self.lower_node(arg)? else {
                    return Ok(None);
                };
                Ok(Some(match op {
                    Operator::Sqrt => Expr::sqrt(arg),
                    Operator::Sin => Expr::sin(degrees(arg)),
                    Operator::Cos => Expr::cos(degrees(arg)),
                    _ => Expr::tan(degrees(arg)),
                }))
            }
        }
    }

    /// Folds `Add`/`Mul` children; with nothing left the result is the
    /// identity element.
    fn lower_fold(
        &self,
        op: Operator,
        args: &[ExpressionNode],
    ) -> Result<Option<Expr>, CompileError> {
        let mut items = Vec::with_capacity(args.len());
        for arg in args {
            if is_bare_predicate(arg) {
                trace!(op = %op, child = %arg, "skipping bare predicate name");
                continue;
            }
            match self.lower_node(arg)? {
                Some(expr) => items.push(expr),
                None => debug!(op = %op, child = %arg, "skipping unevaluable child"),
            }
        }
        Ok(Some(if op == Operator::Add {
            Expr::sum(items)
        } else {
            Expr::product(items)
        }))
    }
}

/// A capitalised name with no argument list, e.g. `Triangle` inside `Add`.
fn is_bare_predicate(node: &ExpressionNode) -> bool {
    let ExpressionNode::Leaf(text) = node else {
        return false;
    };
    text.chars().next().is_some_and(char::is_uppercase)
        && !text.contains('(')
        && Operator::from_name(text).is_none()
}

/// `angle * pi / 180`.
fn degrees(angle: Expr) -> Expr {
    Expr::product([Expr::pi(), angle, Expr::rational(1, 180)])
}

/// Validates and extracts exactly one argument.
fn expect_1_arg<'n, T: SymbolTable + ?Sized>(
    args: &'n [ExpressionNode],
    op: Operator,
    ctx: &Compiler<'_, T>,
    node: &ExpressionNode,
) -> Result<[&'n ExpressionNode; 1], CompileError> {
    match args {
        [arg] => Ok([arg]),
        _ => Err(ctx.error_at(
            ErrorKind::Arity,
            format!("{op} expects exactly 1 argument, found {}", args.len()),
            node,
        )),
    }
}

/// Validates and extracts exactly two arguments.
fn expect_2_args<'n, T: SymbolTable + ?Sized>(
    args: &'n [ExpressionNode],
    op: Operator,
    ctx: &Compiler<'_, T>,
    node: &ExpressionNode,
) -> Result<[&'n ExpressionNode; 2], CompileError> {
    match args {
        [left, right] => Ok([left, right]),
        _ => Err(ctx.error_at(
            ErrorKind::Arity,
            format!("{op} expects exactly 2 arguments, found {}", args.len()),
            node,
        )),
    }
}
