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

//! Error types surfaced by block construction and evaluation.

use crate::CompileError;
use crate::resolver::ResolveError;
use thiserror::Error;

use super::{Arity, Value};

/// Failures while invoking a [`crate::Formula`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The argument count does not match the parameter list.
    #[error("Formula expects {expected} argument(s), got {found}")]
    ArityMismatch {
        /// Number of formula parameters.
        expected: usize,
        /// Number of supplied arguments.
        found: usize,
    },
    /// A local variable was read before any assignment to it ran.
    #[error("Variable '{0}' is read before being assigned")]
    UninitializedVariable(String),
    /// An operator was applied to a value of the wrong type.
    #[error("Operator '{op}' is not defined for {found}")]
    TypeMismatch {
        /// Operator or function name.
        op: String,
        /// Type label of the offending operand(s).
        found: String,
    },
    /// The formula value is not a number.
    #[error("Formula evaluated to {0}, expected a number")]
    NotANumber(Value),
    /// The formula has no statements.
    #[error("Formula has no statements")]
    EmptyFormula,
    /// A name has no binding at evaluation time.
    #[error("Unknown name '{0}'")]
    UnknownName(String),
}

/// Failures while building or running a [`crate::Formula`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Free-variable resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// A call passes the wrong number of arguments to a known function.
    #[error("{diagnostic}")]
    Arity {
        /// Function name.
        name: String,
        /// Accepted argument counts.
        expected: Arity,
        /// Argument count at the call site.
        found: usize,
        /// Source-mapped diagnostic.
        diagnostic: CompileError,
    },
    /// Evaluation failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
