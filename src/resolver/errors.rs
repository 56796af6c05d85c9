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

//! Error type surfaced by the resolver.

use crate::CompileError;
use thiserror::Error;

/// Terminal resolution failures.
///
/// None of these is retried; the user edits the formula and resolution
/// restarts from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The formula is not valid syntax.
    #[error("{0}")]
    Syntax(CompileError),
    /// A name is invoked as a function but is not a known callable.
    #[error("{diagnostic}")]
    UnknownFunction {
        /// The invoked name.
        name: String,
        /// Source-mapped diagnostic.
        diagnostic: CompileError,
    },
    /// A free identifier starts with an uppercase letter.
    #[error("{diagnostic}")]
    InvalidParameterName {
        /// The offending name.
        name: String,
        /// Source-mapped diagnostic.
        diagnostic: CompileError,
    },
}

impl ResolveError {
    /// Returns the underlying diagnostic with location information.
    pub fn diagnostic(&self) -> &CompileError {
        match self {
            ResolveError::Syntax(diagnostic)
            | ResolveError::UnknownFunction { diagnostic, .. }
            | ResolveError::InvalidParameterName { diagnostic, .. } => diagnostic,
        }
    }

    /// Returns the offending name, when the error is about one.
    pub fn name(&self) -> Option<&str> {
        match self {
            ResolveError::Syntax(_) => None,
            ResolveError::UnknownFunction { name, .. }
            | ResolveError::InvalidParameterName { name, .. } => Some(name),
        }
    }
}

impl From<CompileError> for ResolveError {
    fn from(value: CompileError) -> Self {
        ResolveError::Syntax(value)
    }
}
