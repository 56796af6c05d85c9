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

//! Free-variable resolution for user formulas.
//!
//! A formula is a short program in a small expression language:
//!
//! ```text
//! y = sqrt(x ** 2 + z ** 2)
//! y += offset; y > limit ? limit : y
//! ```
//!
//! Every lowercase identifier that the formula reads without assigning it is
//! a free variable. This crate discovers those variables and the order in
//! which they are first read, then closes the formula into a [`Formula`] that
//! takes them as positional arguments.
//!
//! # Pipeline
//!
//! 1. Parse source into a spanned AST ([`parse_formula`]).
//! 2. Resolve identifiers into parameters, locals, constants and calls
//!    ([`resolve`]).
//! 3. Link calls against a [`FunctionTable`] and check arity ([`make_block`]).
//! 4. Evaluate with [`Formula::call`] or render C with [`Formula::to_c`].
//!
//! # Naming rules
//!
//! - Names that start with an uppercase letter are constants. `PI` and `E`
//!   are built in; more can be added through [`ResolveOptions`]. Any other
//!   uppercase name is rejected with [`ResolveError::InvalidParameterName`].
//! - A name is a local from its first assignment onward, that assignment's
//!   right-hand side included. A name read before it is ever assigned is a
//!   parameter, and later assignments rebind it.
//! - A bare name that is a known callable is a call without arguments.
//!
//! Diagnostics carry line, column and a caret pointer into the source.

mod ast;
mod codegen;
mod config;
mod diagnostics;
mod parser;
mod resolver;
mod runtime;

pub use ast::{
    Assign, BinOp, Expr, ExprKind, Program, SourceSpan, Stmt, StmtKind, UnaryOp,
};
pub use codegen::{CSource, emit_c};
pub use config::{ConfigError, DEFAULT_PROBE_VALUE, ResolveOptions};
pub use diagnostics::{CompileError, DEFAULT_SOURCE_NAME, DiagnosticKind};
pub use resolver::{KnownCallables, ResolveError, Resolution};
pub use runtime::{
    Arity, EvalError, Formula, FormulaError, Function, FunctionTable, NativeFn, Value,
};

/// Parses formula source into a spanned AST.
pub fn parse_formula(source: &str) -> Result<Program, CompileError> {
    parser::parse_program(source)
}

/// Discovers the free variables of `source` with default options.
///
/// `callables` names the functions the formula may call; anything else that
/// is called raises [`ResolveError::UnknownFunction`].
pub fn resolve<C>(source: &str, callables: &C) -> Result<Resolution, ResolveError>
where
    C: KnownCallables + ?Sized,
{
    resolve_with(source, callables, &ResolveOptions::default())
}

/// Discovers the free variables of `source` with explicit options.
pub fn resolve_with<C>(
    source: &str,
    callables: &C,
    options: &ResolveOptions,
) -> Result<Resolution, ResolveError>
where
    C: KnownCallables + ?Sized,
{
    resolver::resolve_source(source, DEFAULT_SOURCE_NAME, &[], callables, options)
}

/// Builds a callable block from `source`.
///
/// The `leading` names become the first parameters in the given order,
/// followed by the free variables of the formula in first-read order. A
/// leading name stays a parameter even when the formula assigns to it.
pub fn make_block(
    leading: &[&str],
    source: &str,
    table: &FunctionTable,
) -> Result<Formula, FormulaError> {
    Formula::build(leading, source, table, &ResolveOptions::default())
}

/// Builds and runs a formula that has no free parameters.
///
/// A formula that reads a free variable fails with
/// [`EvalError::ArityMismatch`].
pub fn evaluate(source: &str, table: &FunctionTable) -> Result<f64, FormulaError> {
    let formula = Formula::compile(source, table)?;
    Ok(formula.call(&[])?)
}

#[cfg(test)]
mod tests;
