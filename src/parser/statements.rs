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

//! Statement parsers.

use crate::ast::{Assign, BinOp, SourceSpan, Span, Stmt, StmtKind};
use nom::Parser;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{cut, map, not, value, verify},
    error::context,
    sequence::{delimited, terminated},
};

use super::PResult;
use super::expr::expr;
use super::utils::{identifier, is_keyword, sp0, ws0};

/// Parses one statement: an assignment or a bare expression.
pub(super) fn statement(input: Span<'_>) -> PResult<'_, Stmt> {
    let (input, _) = sp0(input)?;
    let start = input;
    // Assignment is tried first so `y += x` is not read as `y + (+= x)`.
    let (input, kind) = alt((
        map(assignment, StmtKind::Assign),
        map(expr, StmtKind::Expr),
    ))
    .parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((input, Stmt { kind, span }))
}

/// Parses `name = expr` and `name op= expr`.
fn assignment(input: Span<'_>) -> PResult<'_, Assign> {
    let target_start = input;
    let (input, target) = verify(identifier, |name: &str| !is_keyword(name)).parse(input)?;
    let target_span = SourceSpan::from_bounds(target_start, input);
    let (input, op) = delimited(sp0, assign_op, ws0).parse(input)?;
    let (input, value) = cut(context("expression", expr)).parse(input)?;
    Ok((
        input,
        Assign {
            target,
            target_span,
            op,
            value,
        },
    ))
}

/// Parses an assignment operator; `None` stands for plain `=`.
fn assign_op(input: Span<'_>) -> PResult<'_, Option<BinOp>> {
    alt((
        value(Some(BinOp::Pow), tag("**=")),
        value(Some(BinOp::Add), tag("+=")),
        value(Some(BinOp::Sub), tag("-=")),
        value(Some(BinOp::Mul), tag("*=")),
        value(Some(BinOp::Div), tag("/=")),
        value(Some(BinOp::Rem), tag("%=")),
        value(None, terminated(char('='), not(char('=')))),
    ))
    .parse(input)
}
