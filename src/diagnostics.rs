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

//! Compile-time diagnostics with source snippets and caret pointers.
//!
//! Every hard failure of the parser and compiler is reported as a
//! [`CompileError`]. Soft failures (a quantity that cannot be evaluated yet)
//! never take this path; they surface as `Ok(None)`.

use nom_locate::LocatedSpan;
use std::fmt;

/// Parser input span type carrying byte offsets and line/column info.
pub type Span<'a> = LocatedSpan<&'a str>;

/// Source range and anchor position for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpan {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based UTF-8 column.
    pub column: usize,
}

impl SourceSpan {
    /// Creates a source span from parser start/end positions.
    pub fn from_bounds(start: Span<'_>, end: Span<'_>) -> Self {
        Self {
            start: start.location_offset(),
            end: end.location_offset(),
            line: start.location_line() as usize,
            column: start.get_utf8_column(),
        }
    }

    /// Creates a span over `len` bytes of a single-line source at `offset`.
    pub fn at_offset(source: &str, offset: usize, len: usize) -> Self {
        let offset = offset.min(source.len());
        let column = source
            .get(..offset)
            .map(|prefix| prefix.chars().count() + 1)
            .unwrap_or(1);
        Self {
            start: offset,
            end: offset + len,
            line: 1,
            column,
        }
    }

    /// Returns span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classification of hard failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A predicate string is not of the form `Name(args)`.
    Format,
    /// Unbalanced parentheses, a missing or extra top-level comma, or a call
    /// with an unusable name or argument.
    Structural,
    /// The scan finished without producing a root node.
    EmptyExpression,
    /// A call names neither a built-in operator, a declared attribute, nor a
    /// solid-geometry formula.
    UnknownOperator,
    /// A call has the wrong number of arguments or point labels.
    Arity,
    /// A point letter has no entry in the substitution map.
    Substitution,
    /// Free-text algebra failed to parse.
    Syntax,
}

impl ErrorKind {
    /// Short label used as the message prefix.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Format => "format error",
            ErrorKind::Structural => "structural error",
            ErrorKind::EmptyExpression => "empty expression",
            ErrorKind::UnknownOperator => "unknown operator",
            ErrorKind::Arity => "arity error",
            ErrorKind::Substitution => "substitution error",
            ErrorKind::Syntax => "syntax error",
        }
    }
}

/// Rich compile error returned by parser/compiler stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// The offending CDL string or expression (`""` when unavailable).
    pub source: String,
    /// 1-based line number (`0` when unavailable).
    pub line: usize,
    /// 1-based column number (`0` when unavailable).
    pub column: usize,
    /// Source line snippet where the error occurred.
    pub snippet: String,
    /// Caret pointer aligned to `snippet`.
    pub pointer: String,
}

impl CompileError {
    /// Creates an error with no location information.
    pub fn message_only(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: String::new(),
            line: 0,
            column: 0,
            snippet: String::new(),
            pointer: String::new(),
        }
    }

    /// Creates an error naming the offending string without a caret position.
    pub fn in_source(kind: ErrorKind, message: impl Into<String>, source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Self::message_only(kind, message)
        }
    }

    /// Creates an error pointing at `len` bytes of `source` starting at `offset`.
    pub fn at(
        kind: ErrorKind,
        message: impl Into<String>,
        source: &str,
        offset: usize,
        len: usize,
    ) -> Self {
        let span = SourceSpan::at_offset(source, offset, len);
        Self::from_span(kind, message, source, &span)
    }

    /// Creates a source-mapped diagnostic from a [`SourceSpan`].
    pub fn from_span(
        kind: ErrorKind,
        message: impl Into<String>,
        source: &str,
        span: &SourceSpan,
    ) -> Self {
        // Pull the exact source line the span starts on.
        let snippet = source
            .lines()
            .nth(span.line.saturating_sub(1))
            .unwrap_or("")
            .to_string();
        // Clamp the caret range to the line even when spans run past its end.
        let line_len = snippet.chars().count();
        let pointer_column = span.column.saturating_sub(1).min(line_len);
        let requested_len = span.len().max(1);
        let max_len = line_len.saturating_sub(pointer_column).max(1);
        let pointer_len = requested_len.min(max_len);
        let pointer = format!("{}{}", " ".repeat(pointer_column), "^".repeat(pointer_len));

        Self {
            kind,
            message: message.into(),
            source: source.to_string(),
            line: span.line,
            column: span.column,
            snippet,
            pointer,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 || self.column == 0 {
            if self.source.is_empty() {
                return write!(f, "{}: {}", self.kind.label(), self.message);
            }
            return write!(
                f,
                "{}: {} (in '{}')",
                self.kind.label(),
                self.message,
                self.source
            );
        }

        write!(
            f,
            "{}: {}\n --> line {}, column {}\n  |\n{:>3} | {}\n  | {}",
            self.kind.label(),
            self.message,
            self.line,
            self.column,
            self.line,
            self.snippet,
            self.pointer
        )
    }
}

impl std::error::Error for CompileError {}
