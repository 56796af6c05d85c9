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

//! `nom` parser for formulas.
//!
//! The grammar supports:
//! - statements separated by `;` or newlines, `#` line comments
//! - plain and compound assignments (`=`, `+=`, `-=`, `*=`, `/=`, `%=`, `**=`)
//!
//! Expressions support:
//! - numeric literals, `true`/`false` and identifiers
//! - unary `-`, `+`, `!`
//! - binary `+ - * / % **`, comparisons, `&&`, `||`
//! - the ternary `cond ? a : b`
//! - function calls

mod expr;
mod statements;
mod utils;

use crate::ast::{Program, SourceSpan, Span};
use crate::diagnostics::{CompileError, DiagnosticKind};
use nom::{
    IResult,
    combinator::all_consuming,
    error::{ErrorKind, VerboseError, VerboseErrorKind},
    multi::separated_list0,
    sequence::delimited,
};

use self::statements::statement;
use self::utils::{blank0, separator};

pub(crate) use self::utils::is_identifier;

type PResult<'a, O> = IResult<Span<'a>, O, VerboseError<Span<'a>>>;

/// Parses formula source into a spanned AST program.
pub fn parse_program(source: &str) -> Result<Program, CompileError> {
    parse_program_in_source(source, crate::diagnostics::DEFAULT_SOURCE_NAME)
}

/// Parses formula source while tagging diagnostics with a source name.
pub(crate) fn parse_program_in_source(
    source: &str,
    source_name: &str,
) -> Result<Program, CompileError> {
    let input = Span::new(source);
    // `all_consuming` ensures trailing garbage is treated as syntax error.
    let (_, statements) = match all_consuming(delimited(
        blank0,
        separated_list0(separator, statement),
        blank0,
    ))(input)
    {
        Ok(v) => v,
        Err(err) => return Err(parse_error_to_compile_error(err, source_name, source)),
    };

    Ok(Program { statements })
}

/// Converts a `nom` verbose error to crate-level diagnostics.
fn parse_error_to_compile_error(
    err: nom::Err<VerboseError<Span<'_>>>,
    source_name: &str,
    source: &str,
) -> CompileError {
    match err {
        nom::Err::Incomplete(_) => {
            CompileError::unplaced(DiagnosticKind::Syntax, "incomplete input", source_name)
        }
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            // Use the outermost recorded parser error as the diagnostic anchor.
            if let Some((span, kind)) = e.errors.last() {
                let span = SourceSpan::from_bounds(*span, *span);
                let detail = match kind {
                    VerboseErrorKind::Context(ctx) => format!("expected {ctx}"),
                    VerboseErrorKind::Char(c) => format!("expected '{c}'"),
                    VerboseErrorKind::Nom(ErrorKind::Eof) => "unexpected input".to_string(),
                    VerboseErrorKind::Nom(kind) => format!("unexpected input near {kind:?}"),
                };
                CompileError::at_span(
                    DiagnosticKind::Syntax,
                    detail,
                    source_name,
                    source,
                    &span,
                )
            } else {
                CompileError::unplaced(DiagnosticKind::Syntax, "invalid formula", source_name)
            }
        }
    }
}
