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

//! Scanners for CDL predicate strings.
//!
//! CDL is not whitespace- or comment-tolerant the way free-text algebra is,
//! and an operand is opaque algebra until a call name proves otherwise, so
//! these scanners walk the raw text rather than going through `nom`.

use crate::ast::{AttributeRef, EqualStatement, ExpressionNode, Operator, ParsedPredicate};
use crate::diagnostics::{CompileError, ErrorKind};

const EQUAL_PREFIX: &str = "Equal(";

/// Parses a point-list predicate such as `Parallel(AB,CD)`.
///
/// With `lowercase` set, point letters (never the name) are lowercased.
pub fn parse_predicate(source: &str, lowercase: bool) -> Result<ParsedPredicate, CompileError> {
    let Some(open) = source.find('(') else {
        return Err(CompileError::in_source(
            ErrorKind::Format,
            "expected 'Name(args)'",
            source,
        ));
    };
    if !source.ends_with(')') {
        return Err(CompileError::at(
            ErrorKind::Format,
            "expected ')' at the end",
            source,
            source.len(),
            1,
        ));
    }
    let close = source.len() - 1;
    let body = &source[open + 1..close];
    if let Some(extra) = body.find(['(', ')']) {
        return Err(CompileError::at(
            ErrorKind::Format,
            "point-list predicates take no nested parentheses",
            source,
            open + 1 + extra,
            1,
        ));
    }
    let name = source[..open].trim();
    if name.is_empty() {
        return Err(CompileError::at(
            ErrorKind::Format,
            "missing predicate name",
            source,
            0,
            1,
        ));
    }

    let body = if lowercase {
        body.to_lowercase()
    } else {
        body.to_string()
    };
    let mut params = Vec::new();
    let mut group_lengths = Vec::new();
    for group in body.split(',') {
        let before = params.len();
        params.extend(group.chars().filter(|c| !c.is_whitespace()));
        group_lengths.push(params.len() - before);
    }
    Ok(ParsedPredicate {
        name: name.to_string(),
        params,
        group_lengths,
    })
}

/// Parses `Equal(left,right)` into a statement plus the attribute calls met
/// while scanning both operands, in closing order.
///
/// Operands starting with an uppercase letter are scanned as expression
/// trees; any other operand is kept as a free-text leaf.
pub fn parse_equal_predicate(
    source: &str,
    lowercase: bool,
) -> Result<(EqualStatement, Vec<AttributeRef>), CompileError> {
    let Some(rest) = source.strip_prefix(EQUAL_PREFIX) else {
        return Err(CompileError::in_source(
            ErrorKind::Format,
            "expected 'Equal(left,right)'",
            source,
        ));
    };
    let Some(body) = rest.strip_suffix(')') else {
        return Err(CompileError::at(
            ErrorKind::Structural,
            "unbalanced parentheses: missing closing ')'",
            source,
            source.len(),
            1,
        ));
    };

    let mut depth = 0usize;
    let mut split = None;
    for (idx, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Err(CompileError::at(
                        ErrorKind::Structural,
                        "unbalanced parentheses: unexpected ')'",
                        source,
                        EQUAL_PREFIX.len() + idx,
                        1,
                    ));
                }
                depth -= 1;
            }
            ',' if depth == 0 => {
                if split.is_some() {
                    return Err(CompileError::at(
                        ErrorKind::Structural,
                        "more than one top-level ','",
                        source,
                        EQUAL_PREFIX.len() + idx,
                        1,
                    ));
                }
                split = Some(idx);
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(CompileError::at(
            ErrorKind::Structural,
            "unbalanced parentheses: missing ')'",
            source,
            source.len() - 1,
            1,
        ));
    }
    let Some(split) = split else {
        return Err(CompileError::in_source(
            ErrorKind::Structural,
            "missing top-level ',' between operands",
            source,
        ));
    };

    let scanner = TreeScanner { source, lowercase };
    let mut attributes = Vec::new();
    let left = scanner.operand(&body[..split], EQUAL_PREFIX.len(), &mut attributes)?;
    let right = scanner.operand(
        &body[split + 1..],
        EQUAL_PREFIX.len() + split + 1,
        &mut attributes,
    )?;
    Ok((EqualStatement { left, right }, attributes))
}

/// Parses a nested call expression such as `Add(LengthOfLine(AB),x)`.
///
/// Text with no `(` is returned unchanged as a single leaf.
pub fn parse_expression_tree(
    source: &str,
    lowercase: bool,
) -> Result<(ExpressionNode, Vec<AttributeRef>), CompileError> {
    let scanner = TreeScanner { source, lowercase };
    let mut attributes = Vec::new();
    let node = scanner.scan(source, 0, &mut attributes)?;
    Ok((node, attributes))
}

/// One entry of the scan stack.
enum Slot {
    Value(ExpressionNode),
    Call { name: String, offset: usize },
}

/// Shared state for scanning one CDL string; offsets are relative to
/// `source` so diagnostics point into the full predicate.
struct TreeScanner<'a> {
    source: &'a str,
    lowercase: bool,
}

impl TreeScanner<'_> {
    fn error(&self, kind: ErrorKind, message: impl Into<String>, offset: usize) -> CompileError {
        CompileError::at(kind, message, self.source, offset, 1)
    }

    fn operand(
        &self,
        text: &str,
        base: usize,
        attributes: &mut Vec<AttributeRef>,
    ) -> Result<ExpressionNode, CompileError> {
        match text.chars().next() {
            None => Err(self.error(ErrorKind::Structural, "empty operand", base)),
            Some(first) if first.is_uppercase() => self.scan(text, base, attributes),
            Some(_) => Ok(ExpressionNode::Leaf(text.to_string())),
        }
    }

    fn scan(
        &self,
        text: &str,
        base: usize,
        attributes: &mut Vec<AttributeRef>,
    ) -> Result<ExpressionNode, CompileError> {
        if !text.contains('(') {
            return Ok(ExpressionNode::Leaf(text.to_string()));
        }

        let mut stack: Vec<Slot> = Vec::new();
        // Start of the token currently being read.
        let mut start = 0usize;
        for (idx, ch) in text.char_indices() {
            match ch {
                '(' => {
                    let name = &text[start..idx];
                    if name.is_empty() {
                        return Err(self.error(
                            ErrorKind::EmptyExpression,
                            "'(' with no call name",
                            base + idx,
                        ));
                    }
                    if !is_call_name(name) {
                        return Err(self.error(
                            ErrorKind::Structural,
                            format!("invalid call name '{name}'"),
                            base + start,
                        ));
                    }
                    stack.push(Slot::Call {
                        name: name.to_string(),
                        offset: base + start,
                    });
                    start = idx + 1;
                }
                ',' => {
                    if start < idx {
                        stack.push(Slot::Value(ExpressionNode::Leaf(text[start..idx].to_string())));
                    }
                    start = idx + 1;
                }
                ')' => {
                    if start < idx {
                        stack.push(Slot::Value(ExpressionNode::Leaf(text[start..idx].to_string())));
                    }
                    start = idx + 1;
                    let mut args = Vec::new();
                    loop {
                        match stack.pop() {
                            Some(Slot::Value(node)) => args.push(node),
                            Some(Slot::Call { name, offset }) => {
                                args.reverse();
                                let node = self.close_call(name, offset, args, attributes)?;
                                stack.push(Slot::Value(node));
                                break;
                            }
                            None => {
                                return Err(self.error(
                                    ErrorKind::Structural,
                                    "unbalanced parentheses: unexpected ')'",
                                    base + idx,
                                ));
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        if let Some(offset) = stack.iter().find_map(|slot| match slot {
            Slot::Call { offset, .. } => Some(*offset),
            Slot::Value(_) => None,
        }) {
            return Err(self.error(
                ErrorKind::Structural,
                "unbalanced parentheses: missing ')'",
                offset,
            ));
        }
        if start < text.len() {
            return Err(self.error(
                ErrorKind::Structural,
                format!("unexpected trailing text '{}'", &text[start..]),
                base + start,
            ));
        }
        let Some(Slot::Value(root)) = stack.pop() else {
            return Err(self.error(ErrorKind::EmptyExpression, "no expression found", base));
        };
        if !stack.is_empty() {
            return Err(self.error(
                ErrorKind::Structural,
                "expected a single root expression",
                base,
            ));
        }
        Ok(root)
    }

    /// Builds the node for a call whose `)` was just read.
    fn close_call(
        &self,
        name: String,
        offset: usize,
        args: Vec<ExpressionNode>,
        attributes: &mut Vec<AttributeRef>,
    ) -> Result<ExpressionNode, CompileError> {
        if let Some(op) = Operator::from_name(&name) {
            return Ok(ExpressionNode::Operation { op, args });
        }
        let mut points = Vec::new();
        for arg in args {
            let ExpressionNode::Leaf(text) = arg else {
                return Err(self.error(
                    ErrorKind::Structural,
                    format!("attribute '{name}' takes point labels, not nested calls"),
                    offset,
                ));
            };
            points.extend(text.chars().filter(|c| !c.is_whitespace()));
        }
        if self.lowercase {
            points = points.iter().flat_map(|c| c.to_lowercase()).collect();
        }
        let attribute = AttributeRef { name, points };
        attributes.push(attribute.clone());
        Ok(ExpressionNode::Attribute(attribute))
    }
}

fn is_call_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
