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

//! Parser trivia and lexical helpers.
//!
//! Two kinds of trivia exist. Inline trivia (spaces, tabs, comments) may
//! appear anywhere between tokens. Newlines end a statement, so they are
//! only skipped where a statement cannot end: after binary operators,
//! assignment operators, opening parentheses and argument commas.

use crate::ast::Span;
use nom::Parser;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1, one_of},
    combinator::{map, not, opt, recognize, value},
    multi::{many0, many1},
    sequence::{delimited, pair, terminated},
};

use super::PResult;

/// Parses identifiers (`[A-Za-z_][A-Za-z0-9_]*`).
pub(super) fn identifier(input: Span<'_>) -> PResult<'_, String> {
    map(
        recognize(pair(
            take_while1(is_ident_start),
            take_while(is_ident_continue),
        )),
        |s: Span<'_>| s.fragment().to_string(),
    )
    .parse(input)
}

/// Returns whether a char can start an identifier.
fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Returns whether a char can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

/// Returns whether `name` is a boolean literal keyword.
pub(super) fn is_keyword(name: &str) -> bool {
    matches!(name, "true" | "false")
}

/// Returns whether `name` can name a variable.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_continue) && !is_keyword(name),
        _ => false,
    }
}

/// Skips zero-or-more inline whitespace/comments, stopping at newlines.
pub(super) fn sp0(input: Span<'_>) -> PResult<'_, ()> {
    value(
        (),
        many0(alt((
            value((), take_while1(|c: char| c == ' ' || c == '\t' || c == '\r')),
            comment,
        ))),
    )
    .parse(input)
}

/// Skips zero-or-more whitespace/comments, newlines included.
pub(super) fn ws0(input: Span<'_>) -> PResult<'_, ()> {
    value((), many0(alt((value((), multispace1), comment)))).parse(input)
}

/// Skips whitespace, comments and stray statement separators.
pub(super) fn blank0(input: Span<'_>) -> PResult<'_, ()> {
    value(
        (),
        many0(alt((value((), multispace1), comment, value((), char(';'))))),
    )
    .parse(input)
}

/// Parses one or more statement separators (`;` or newline).
pub(super) fn separator(input: Span<'_>) -> PResult<'_, ()> {
    value((), many1(delimited(sp0, one_of(";\n"), sp0))).parse(input)
}

/// Parses shell-style line comments (`# ...`).
fn comment(input: Span<'_>) -> PResult<'_, ()> {
    value(
        (),
        pair(tag("#"), opt(nom::character::complete::not_line_ending)),
    )
    .parse(input)
}

/// Wraps a parser with leading/trailing inline trivia skipping.
pub(super) fn ws<'a, O, P>(mut parser: P) -> impl FnMut(Span<'a>) -> PResult<'a, O>
where
    P: FnMut(Span<'a>) -> PResult<'a, O>,
{
    move |input| delimited(sp0, &mut parser, sp0)(input)
}

/// Parses a specific character token with surrounding inline trivia.
pub(super) fn ws_char<'a>(c: char) -> impl FnMut(Span<'a>) -> PResult<'a, char> {
    ws(char(c))
}

/// Parses an operator token that may be followed by a line break.
///
/// `reject` lists characters that must not directly follow the token, so
/// `*` does not match the start of `**` or `*=`.
pub(super) fn operator<'a>(
    token: &'static str,
    reject: &'static str,
) -> impl FnMut(Span<'a>) -> PResult<'a, Span<'a>> {
    move |input| delimited(sp0, terminated(tag(token), not(one_of(reject))), ws0)(input)
}
