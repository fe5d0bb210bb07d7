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

//! Free-text operands: `x+1`, `12x`, `ll_ab*2`.

use super::*;

/// Normalises free-text algebra before parsing: `^` becomes `**` and a
/// number directly followed by a letter gets an explicit `*` (`12x` is
/// `12*x`). Returns `None` for blank text.
pub fn preprocess_free_text(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev = None;
    for ch in text.chars() {
        if ch == '^' {
            out.push_str("**");
        } else {
            if ch.is_ascii_alphabetic() && prev.is_some_and(|p: char| p.is_ascii_digit()) {
                out.push('*');
            }
            out.push(ch);
        }
        prev = Some(ch);
    }
    Some(out)
}

impl<T: SymbolTable + ?Sized> Compiler<'_, T> {
    /// Parses a free-text operand and rebinds its symbols through the table.
    ///
    /// Any parse failure or unresolved symbol is a soft failure.
    pub(super) fn free_text(&self, text: &str) -> Option<Expr> {
        let source = preprocess_free_text(text)?;
        let expr = match parse_algebra(&source, Syntax::Strict) {
            Ok(expr) => expr,
            Err(err) => {
                debug!(text = %source, error = %err.message, "free text does not parse");
                return None;
            }
        };

        let mut bindings = HashMap::new();
        for name in expr.free_symbols() {
            let Some(symbol) = self.resolve_free_symbol(&name) else {
                debug!(symbol = %name, "free symbol is not bound");
                return None;
            };
            bindings.insert(name, symbol.to_expr());
        }
        Some(expr.substitute(&bindings))
    }

    /// `x` is the free variable `Free(x)`; `ll_ab` is the attribute with
    /// shorthand `ll` over points `AB`.
    fn resolve_free_symbol(&self, name: &str) -> Option<Symbol> {
        let Some((shorthand, points)) = name.split_once('_') else {
            let points: Vec<char> = name.chars().collect();
            return self.symbols.symbol_of_attribute(FREE_ATTRIBUTE, &points);
        };
        let points: Vec<char> = points.to_uppercase().chars().collect();
        self.symbols
            .declared_attributes()
            .iter()
            .filter(|(_, spec)| spec.shorthand == shorthand && spec.accepts(points.len()))
            .find_map(|(attribute, _)| self.symbols.symbol_of_attribute(attribute, &points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocessing_inserts_products_and_powers() {
        assert_eq!(preprocess_free_text(" 12x^2 ").as_deref(), Some("12*x**2"));
        assert_eq!(preprocess_free_text("x+1").as_deref(), Some("x+1"));
        assert_eq!(preprocess_free_text("   "), None);
    }
}
