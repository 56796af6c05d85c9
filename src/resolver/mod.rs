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

//! Free-variable resolution.
//!
//! A formula is parsed once and walked once, in evaluation order. Every
//! identifier read is classified as a local, a known constant, a bare call
//! to a known callable, or a parameter. A name becomes a local at its first
//! assignment, its own right-hand side included; a read before that point
//! makes it a parameter, and later assignments rebind the parameter.
//! Parameters are recorded in the order the walk first meets them.

mod callables;
mod errors;

pub use callables::KnownCallables;
pub use errors::ResolveError;

use crate::diagnostics::{CompileError, DiagnosticKind};
use crate::ast::{Expr, ExprKind, Program, SourceSpan, Stmt, StmtKind};
use crate::config::ResolveOptions;
use crate::parser::{is_identifier, parse_program_in_source};
use tracing::{debug, trace};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    source: String,
    program: Program,
    parameters: Vec<String>,
    locals: Vec<String>,
}

impl Resolution {
    /// Free lowercase identifiers, in first-read order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Assignment targets that are not parameters, in first-assignment order.
    pub fn locals(&self) -> &[String] {
        &self.locals
    }

    /// Parsed formula.
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Formula source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn into_parts(self) -> (String, Program, Vec<String>, Vec<String>) {
        (self.source, self.program, self.parameters, self.locals)
    }
}

/// Returns whether a name starts with an uppercase letter (a constant).
pub(crate) fn starts_with_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Parses and resolves `source`, reading `leading` names before the formula.
pub(crate) fn resolve_source<C>(
    source: &str,
    source_name: &str,
    leading: &[&str],
    callables: &C,
    options: &ResolveOptions,
) -> Result<Resolution, ResolveError>
where
    C: KnownCallables + ?Sized,
{
    let program = parse_program_in_source(source, source_name)?;

    let mut ctx = ResolveContext {
        source,
        source_name,
        callables,
        options,
        locals: Vec::new(),
        parameters: Vec::new(),
    };
    ctx.check_assignment_targets(&program)?;
    for name in leading {
        ctx.visit_leading(name)?;
    }
    for stmt in &program.statements {
        ctx.visit_stmt(stmt)?;
    }

    let ResolveContext {
        parameters, locals, ..
    } = ctx;
    debug!(
        source = %source,
        parameters = ?parameters,
        locals = ?locals,
        "resolved formula"
    );
    Ok(Resolution {
        source: source.to_string(),
        program,
        parameters,
        locals,
    })
}

/// Walk state for one resolution. Never outlives the call.
struct ResolveContext<'a, C: ?Sized> {
    source: &'a str,
    source_name: &'a str,
    callables: &'a C,
    options: &'a ResolveOptions,
    locals: Vec<String>,
    parameters: Vec<String>,
}

impl<C: KnownCallables + ?Sized> ResolveContext<'_, C> {
    /// Creates a source-mapped diagnostic.
    fn error_at(
        &self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        span: &SourceSpan,
    ) -> CompileError {
        CompileError::at_span(kind, message, self.source_name, self.source, span)
    }

    fn is_local(&self, name: &str) -> bool {
        self.locals.iter().any(|local| local == name)
    }

    /// Rejects assignments to constants.
    fn check_assignment_targets(&self, program: &Program) -> Result<(), ResolveError> {
        for stmt in &program.statements {
            if let StmtKind::Assign(assign) = &stmt.kind {
                if starts_with_uppercase(&assign.target) {
                    return Err(ResolveError::Syntax(self.error_at(
                        DiagnosticKind::Syntax,
                        format!("dynamic constant assignment to '{}'", assign.target),
                        &assign.target_span,
                    )));
                }
            }
        }
        Ok(())
    }

    /// Starts the scope of a local, unless the name is already a parameter.
    fn declare(&mut self, name: &str) {
        if !self.is_local(name) && !self.parameters.iter().any(|param| param == name) {
            self.locals.push(name.to_string());
        }
    }

    /// Reads a caller-supplied leading parameter name.
    fn visit_leading(&mut self, name: &str) -> Result<(), ResolveError> {
        if !is_identifier(name) {
            return Err(ResolveError::Syntax(CompileError::unplaced(
                DiagnosticKind::Syntax,
                format!("'{name}' is not a valid parameter name"),
                self.source_name,
            )));
        }
        self.visit_name(name, None)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), ResolveError> {
        match &stmt.kind {
            StmtKind::Assign(assign) => {
                self.declare(&assign.target);
                self.visit_expr(&assign.value)
            }
            StmtKind::Expr(expr) => self.visit_expr(expr),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), ResolveError> {
        match &expr.kind {
            ExprKind::Number(_) | ExprKind::Bool(_) => Ok(()),
            ExprKind::Ident(name) => self.visit_name(name, Some(&expr.span)),
            ExprKind::Unary { operand, .. } => self.visit_expr(operand),
            ExprKind::Binary { left, right, .. } => {
                self.visit_expr(left)?;
                self.visit_expr(right)
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                self.visit_expr(cond)?;
                self.visit_expr(then_branch)?;
                self.visit_expr(else_branch)
            }
            ExprKind::Call { name, args } => {
                // Arguments are evaluated before the callee is looked up.
                for arg in args {
                    self.visit_expr(arg)?;
                }
                if self.callables.is_known_callable(name) {
                    Ok(())
                } else {
                    let message = format!("Unknown function '{name}'");
                    Err(ResolveError::UnknownFunction {
                        name: name.clone(),
                        diagnostic: self.error_at(
                            DiagnosticKind::UnknownFunction,
                            message,
                            &expr.span,
                        ),
                    })
                }
            }
        }
    }

    /// Classifies one identifier read.
    fn visit_name(&mut self, name: &str, span: Option<&SourceSpan>) -> Result<(), ResolveError> {
        if self.is_local(name) {
            return Ok(());
        }

        if starts_with_uppercase(name) {
            if self.options.constant(name).is_some() {
                return Ok(());
            }
            let message = format!(
                "Parameter/variable '{name}' should not start with an uppercase. \
                 This could also mean that you misspelled a constant"
            );
            let diagnostic = match span {
                Some(span) => self.error_at(DiagnosticKind::InvalidName, message, span),
                None => {
                    CompileError::unplaced(DiagnosticKind::InvalidName, message, self.source_name)
                }
            };
            return Err(ResolveError::InvalidParameterName {
                name: name.to_string(),
                diagnostic,
            });
        }

        // A bare known callable is a call without arguments.
        if self.callables.is_known_callable(name) {
            return Ok(());
        }

        if !self.parameters.iter().any(|param| param == name) {
            trace!(parameter = name, index = self.parameters.len(), "discovered parameter");
            self.parameters.push(name.to_string());
        }
        Ok(())
    }
}
