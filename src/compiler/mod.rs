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

//! Lowering from parsed CDL trees into algebraic expressions.
//!
//! Hard failures (malformed trees, unknown operators, missing substitution
//! letters) are `Err`. A quantity that cannot be evaluated yet (an attribute
//! with no symbol, an unresolved free variable, unparsable free text) is
//! `Ok(None)`, so callers can skip that equation.

mod builtins;
mod context;
mod expr;
mod free_text;
mod solids;

use crate::algebra::Expr;
use crate::ast::{AttributeRef, EqualStatement, ExpressionNode, Operator};
use crate::diagnostics::{CompileError, ErrorKind};
use crate::parser::{Syntax, parse_algebra};
use crate::symbols::{FREE_ATTRIBUTE, Symbol, SymbolTable};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

pub use self::context::Compiler;
pub use self::free_text::preprocess_free_text;

use self::solids::Solid;
