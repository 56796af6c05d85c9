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

//! Expression parser.
//!
//! One function per precedence level, loosest first. Once an operator has
//! been consumed the right operand is `cut`, so a dangling operator reports
//! its own position instead of backtracking to the start of the statement.

use crate::ast::{BinOp, Expr, ExprKind, SourceSpan, Span, UnaryOp};
use nom::Parser;
use nom::{
    branch::alt,
    character::complete::char,
    combinator::{cut, map_res, not, opt, value},
    error::context,
    multi::separated_list0,
    number::complete::recognize_float,
    sequence::{pair, preceded, terminated},
};

use super::PResult;
use super::utils::{identifier, operator, sp0, ws0, ws_char};

/// Top-level expression parser.
pub(super) fn expr(input: Span<'_>) -> PResult<'_, Expr> {
    parse_ternary(input)
}

/// Builds a binary node spanning both operands.
fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    let span = left.span.merge(&right.span);
    Expr {
        kind: ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    }
}

/// Parses right-associative `cond ? a : b`.
fn parse_ternary(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, cond) = parse_or(input)?;
    let (input, question) = opt(operator("?", "")).parse(input)?;
    if question.is_none() {
        return Ok((input, cond));
    }

    let (input, then_branch) = cut(context("expression", parse_ternary)).parse(input)?;
    let (input, _) = cut(context("':'", operator(":", ":"))).parse(input)?;
    let (input, else_branch) = cut(context("expression", parse_ternary)).parse(input)?;
    let span = cond.span.merge(&else_branch.span);
    Ok((
        input,
        Expr {
            kind: ExprKind::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        },
    ))
}

/// Parses left-associative `||`.
fn parse_or(input: Span<'_>) -> PResult<'_, Expr> {
    let (mut input, mut left) = parse_and(input)?;
    loop {
        let (next, op) = opt(operator("||", "")).parse(input)?;
        if op.is_none() {
            break;
        }
        let (next, right) = cut(context("expression", parse_and)).parse(next)?;
        left = binary(BinOp::Or, left, right);
        input = next;
    }
    Ok((input, left))
}

/// Parses left-associative `&&`.
fn parse_and(input: Span<'_>) -> PResult<'_, Expr> {
    let (mut input, mut left) = parse_equality(input)?;
    loop {
        let (next, op) = opt(operator("&&", "")).parse(input)?;
        if op.is_none() {
            break;
        }
        let (next, right) = cut(context("expression", parse_equality)).parse(next)?;
        left = binary(BinOp::And, left, right);
        input = next;
    }
    Ok((input, left))
}

/// Parses non-chaining `==`/`!=`.
fn parse_equality(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, left) = parse_comparison(input)?;
    let (input, op) = opt(alt((
        value(BinOp::Eq, operator("==", "=")),
        value(BinOp::Ne, operator("!=", "")),
    )))
    .parse(input)?;
    let Some(op) = op else {
        return Ok((input, left));
    };
    let (input, right) = cut(context("expression", parse_comparison)).parse(input)?;
    Ok((input, binary(op, left, right)))
}

/// Parses non-chaining `<`, `<=`, `>`, `>=`.
fn parse_comparison(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, left) = parse_add_sub(input)?;
    let (input, op) = opt(alt((
        value(BinOp::Le, operator("<=", "")),
        value(BinOp::Ge, operator(">=", "")),
        value(BinOp::Lt, operator("<", "=")),
        value(BinOp::Gt, operator(">", "=")),
    )))
    .parse(input)?;
    let Some(op) = op else {
        return Ok((input, left));
    };
    let (input, right) = cut(context("expression", parse_add_sub)).parse(input)?;
    Ok((input, binary(op, left, right)))
}

/// Parses left-associative `+`/`-`.
fn parse_add_sub(input: Span<'_>) -> PResult<'_, Expr> {
    let (mut input, mut left) = parse_mul_div(input)?;
    loop {
        // `+=` and `-=` belong to the statement parser.
        let (next, op) = opt(alt((
            value(BinOp::Add, operator("+", "=")),
            value(BinOp::Sub, operator("-", "=")),
        )))
        .parse(input)?;
        let Some(op) = op else {
            break;
        };

        // Left-associative fold: `a-b-c` becomes `(a-b)-c`.
        let (next, right) = cut(context("expression", parse_mul_div)).parse(next)?;
        left = binary(op, left, right);
        input = next;
    }
    Ok((input, left))
}

/// Parses left-associative `*`, `/`, `%`.
fn parse_mul_div(input: Span<'_>) -> PResult<'_, Expr> {
    let (mut input, mut left) = parse_unary(input)?;
    loop {
        let (next, op) = opt(alt((
            value(BinOp::Mul, operator("*", "*=")),
            value(BinOp::Div, operator("/", "=")),
            value(BinOp::Rem, operator("%", "=")),
        )))
        .parse(input)?;
        let Some(op) = op else {
            break;
        };

        let (next, right) = cut(context("expression", parse_unary)).parse(next)?;
        left = binary(op, left, right);
        input = next;
    }
    Ok((input, left))
}

/// Parses prefix `-`/`+`, which bind looser than `**`.
fn parse_unary(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, _) = sp0(input)?;
    let start = input;
    let (input, op) = opt(alt((
        value(UnaryOp::Neg, terminated(char('-'), not(char('=')))),
        value(UnaryOp::Plus, terminated(char('+'), not(char('=')))),
    )))
    .parse(input)?;
    let Some(op) = op else {
        return parse_pow(input);
    };

    // Chains like `--x` recurse.
    let (input, operand) = cut(context("expression", parse_unary)).parse(input)?;
    let span = SourceSpan::from_bounds(start, input).merge(&operand.span);
    Ok((
        input,
        Expr {
            kind: ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        },
    ))
}

/// Parses right-associative `**`.
fn parse_pow(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, base) = parse_not(input)?;
    let (input, op) = opt(operator("**", "=")).parse(input)?;
    if op.is_none() {
        return Ok((input, base));
    }
    // The exponent may carry its own sign: `2 ** -1`.
    let (input, exponent) = cut(context("expression", parse_unary)).parse(input)?;
    Ok((input, binary(BinOp::Pow, base, exponent)))
}

/// Parses prefix `!`.
fn parse_not(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, _) = sp0(input)?;
    let start = input;
    let (input, bang) = opt(terminated(char('!'), not(char('=')))).parse(input)?;
    if bang.is_none() {
        return parse_primary(input);
    }

    let (input, operand) = cut(context("expression", parse_not)).parse(input)?;
    let span = SourceSpan::from_bounds(start, input).merge(&operand.span);
    Ok((
        input,
        Expr {
            kind: ExprKind::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            },
            span,
        },
    ))
}

/// Parses expression atoms.
fn parse_primary(input: Span<'_>) -> PResult<'_, Expr> {
    let (input, _) = sp0(input)?;
    let (input, expr) =
        alt((parse_parenthesized, parse_number, parse_ident_or_call)).parse(input)?;
    let (input, _) = sp0(input)?;
    Ok((input, expr))
}

/// Parses parenthesized expressions.
fn parse_parenthesized(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, _) = pair(char('('), ws0).parse(input)?;
    let (input, mut inner) = cut(context("expression", expr)).parse(input)?;
    let (input, _) = cut(context("')'", preceded(ws0, char(')')))).parse(input)?;
    // Keep the parentheses in the span for diagnostics.
    inner.span = SourceSpan::from_bounds(start, input);
    Ok((input, inner))
}

/// Parses numeric literal expressions.
fn parse_number(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, n) =
        map_res(recognize_float, |s: Span<'_>| s.fragment().parse::<f64>()).parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Expr {
            kind: ExprKind::Number(n),
            span,
        },
    ))
}

/// Parses an identifier, a boolean keyword or a function call.
fn parse_ident_or_call(input: Span<'_>) -> PResult<'_, Expr> {
    let start = input;
    let (input, name) = identifier(input)?;
    let name_end = input;
    let (input, open) = opt(preceded(sp0, char('('))).parse(input)?;

    if open.is_none() {
        let span = SourceSpan::from_bounds(start, name_end);
        let kind = match name.as_str() {
            "true" => ExprKind::Bool(true),
            "false" => ExprKind::Bool(false),
            _ => ExprKind::Ident(name),
        };
        return Ok((name_end, Expr { kind, span }));
    }

    let (input, _) = ws0(input)?;
    let comma = terminated(ws_char(','), ws0);
    let (input, args) = cut(separated_list0(comma, argument)).parse(input)?;
    let (input, _) = cut(context("')'", preceded(ws0, char(')')))).parse(input)?;
    let span = SourceSpan::from_bounds(start, input);
    Ok((
        input,
        Expr {
            kind: ExprKind::Call { name, args },
            span,
        },
    ))
}

/// Parses one call argument, which may be preceded by line breaks.
fn argument(input: Span<'_>) -> PResult<'_, Expr> {
    preceded(ws0, expr).parse(input)
}
