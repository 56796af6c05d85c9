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

//! Resolved callable blocks and their evaluation.

mod errors;
mod eval;
mod functions;
mod value;

pub use errors::{EvalError, FormulaError};
pub use functions::{Arity, Function, FunctionTable, NativeFn};
pub use value::Value;

use crate::ast::{Expr, ExprKind, Program, StmtKind};
use crate::codegen::{CSource, emit_c};
use crate::config::ResolveOptions;
use crate::diagnostics::{CompileError, DEFAULT_SOURCE_NAME, DiagnosticKind};
use crate::resolver::{ResolveError, Resolution, resolve_source, starts_with_uppercase};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use self::eval::Frame;

/// A formula closed over its discovered parameters.
///
/// `Formula` is plain data: it can be cloned, shared across threads and
/// called any number of times. Each call gets fresh variable bindings.
#[derive(Debug, Clone)]
pub struct Formula {
    source: String,
    program: Program,
    parameters: Vec<String>,
    locals: Vec<String>,
    // Only the functions this formula calls.
    functions: HashMap<String, Function>,
    constants: BTreeMap<String, f64>,
    probe_value: f64,
}

impl Formula {
    /// Resolves and builds a formula with default options.
    pub fn compile(source: &str, table: &FunctionTable) -> Result<Self, FormulaError> {
        Self::build(&[], source, table, &ResolveOptions::default())
    }

    /// Resolves and builds a formula whose first parameters are `leading`.
    ///
    /// Leading names are read before the formula runs, so they always take
    /// the first parameter slots in the given order, even when the formula
    /// assigns to them.
    pub fn build(
        leading: &[&str],
        source: &str,
        table: &FunctionTable,
        options: &ResolveOptions,
    ) -> Result<Self, FormulaError> {
        let resolution = resolve_source(source, DEFAULT_SOURCE_NAME, leading, table, options)?;
        Self::from_resolution(resolution, table, options)
    }

    /// Builds a formula from an existing resolution.
    ///
    /// Every call is checked against `table`, including names the resolution
    /// accepted from a different known-callables set.
    pub fn from_resolution(
        resolution: Resolution,
        table: &FunctionTable,
        options: &ResolveOptions,
    ) -> Result<Self, FormulaError> {
        let (source, program, parameters, locals) = resolution.into_parts();
        let mut linker = Linker {
            source: &source,
            table,
            parameters: &parameters,
            locals: &locals,
            constants: &options.constants,
            functions: HashMap::new(),
        };
        for stmt in &program.statements {
            match &stmt.kind {
                StmtKind::Assign(assign) => linker.link_expr(&assign.value)?,
                StmtKind::Expr(expr) => linker.link_expr(expr)?,
            }
        }
        let functions = linker.functions;

        debug!(
            parameters = ?parameters,
            locals = ?locals,
            functions = functions.len(),
            "built formula block"
        );
        Ok(Self {
            source,
            program,
            parameters,
            locals,
            functions,
            constants: options.constants.clone(),
            probe_value: options.probe_value,
        })
    }

    /// Formula source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Parsed formula.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Formal parameters, in the order `call` expects arguments.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Variables the formula assigns that are not parameters.
    pub fn locals(&self) -> &[String] {
        &self.locals
    }

    /// Evaluates the formula with one argument per parameter.
    pub fn call(&self, args: &[f64]) -> Result<f64, EvalError> {
        let value = self.call_value(args)?;
        value.as_number().ok_or(EvalError::NotANumber(value))
    }

    /// Evaluates the formula and returns the raw value of its last statement.
    pub fn call_value(&self, args: &[f64]) -> Result<Value, EvalError> {
        Frame::with_arguments(self, args)?.run()
    }

    /// Evaluates with every parameter and local bound to the probe value.
    pub fn probe(&self) -> Result<Value, EvalError> {
        Frame::probing(self).run()
    }

    /// Renders the formula as C statements.
    ///
    /// Parameters that the formula reassigns are not listed as locals.
    pub fn to_c(&self) -> CSource {
        CSource {
            locals: self.locals.clone(),
            ..emit_c(&self.program)
        }
    }
}

/// Binds call sites to table functions and checks their arity.
struct Linker<'a> {
    source: &'a str,
    table: &'a FunctionTable,
    parameters: &'a [String],
    locals: &'a [String],
    constants: &'a BTreeMap<String, f64>,
    functions: HashMap<String, Function>,
}

impl Linker<'_> {
    fn link_expr(&mut self, expr: &Expr) -> Result<(), FormulaError> {
        match &expr.kind {
            ExprKind::Number(_) | ExprKind::Bool(_) => Ok(()),
            ExprKind::Ident(name) => {
                let bound = self.parameters.contains(name)
                    || self.locals.contains(name)
                    || (starts_with_uppercase(name) && self.constants.contains_key(name));
                if bound {
                    return Ok(());
                }
                self.link_call(name, 0, expr)
            }
            ExprKind::Unary { operand, .. } => self.link_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.link_expr(left)?;
                self.link_expr(right)
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                self.link_expr(cond)?;
                self.link_expr(then_branch)?;
                self.link_expr(else_branch)
            }
            ExprKind::Call { name, args } => {
                for arg in args {
                    self.link_expr(arg)?;
                }
                self.link_call(name, args.len(), expr)
            }
        }
    }

    fn link_call(&mut self, name: &str, argc: usize, expr: &Expr) -> Result<(), FormulaError> {
        let table = self.table;
        let Some(function) = table.get(name) else {
            let diagnostic = CompileError::at_span(
                DiagnosticKind::UnknownFunction,
                format!("Unknown function '{name}'"),
                DEFAULT_SOURCE_NAME,
                self.source,
                &expr.span,
            );
            return Err(FormulaError::Resolve(ResolveError::UnknownFunction {
                name: name.to_string(),
                diagnostic,
            }));
        };

        if !function.arity().accepts(argc) {
            let diagnostic = CompileError::at_span(
                DiagnosticKind::Arity,
                format!("{name} expects {} argument(s), found {argc}", function.arity()),
                DEFAULT_SOURCE_NAME,
                self.source,
                &expr.span,
            );
            return Err(FormulaError::Arity {
                name: name.to_string(),
                expected: function.arity(),
                found: argc,
                diagnostic,
            });
        }

        self.functions
            .entry(name.to_string())
            .or_insert_with(|| function.clone());
        Ok(())
    }
}
