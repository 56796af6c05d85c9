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

//! Formula diagnostics with source snippets and caret pointers.

use crate::ast::SourceSpan;
use std::fmt;

/// Default source label used when the caller does not name the formula.
pub const DEFAULT_SOURCE_NAME: &str = "<formula>";

/// What a diagnostic is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Malformed formula text, or an assignment to a constant.
    Syntax,
    /// A call to a name that is not a known callable.
    UnknownFunction,
    /// An uppercase free identifier that is not a known constant.
    InvalidName,
    /// A call with an argument count the function does not accept.
    Arity,
}

impl DiagnosticKind {
    /// Short tag shown in rendered diagnostics.
    pub fn tag(self) -> &'static str {
        match self {
            DiagnosticKind::Syntax => "syntax",
            DiagnosticKind::UnknownFunction => "unknown-function",
            DiagnosticKind::InvalidName => "invalid-name",
            DiagnosticKind::Arity => "arity",
        }
    }
}

/// Located error produced while parsing, resolving or linking a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// Diagnostic category.
    pub kind: DiagnosticKind,
    /// Human-readable error message.
    pub message: String,
    /// Source label of the formula.
    pub file: String,
    /// 1-based line number (`0` when the error has no position).
    pub line: usize,
    /// 1-based column number (`0` when the error has no position).
    pub column: usize,
    /// Source line the error points into.
    pub snippet: String,
    /// Caret pointer aligned to `snippet`.
    pub pointer: String,
}

impl CompileError {
    /// Creates a diagnostic that refers to the formula as a whole.
    pub fn unplaced(
        kind: DiagnosticKind,
        message: impl Into<String>,
        file: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            file: file.into(),
            line: 0,
            column: 0,
            snippet: String::new(),
            pointer: String::new(),
        }
    }

    /// Creates a diagnostic pointing at `span` inside `source`.
    pub fn at_span(
        kind: DiagnosticKind,
        message: impl Into<String>,
        file: impl Into<String>,
        source: &str,
        span: &SourceSpan,
    ) -> Self {
        let snippet = source
            .lines()
            .nth(span.line.saturating_sub(1))
            .unwrap_or("")
            .to_string();

        // The caret stays on the snippet even when the span runs past it.
        let line_len = snippet.chars().count();
        let start = span.column.saturating_sub(1).min(line_len);
        let width = span.len().clamp(1, line_len.saturating_sub(start).max(1));
        // Tabs are kept so the caret lines up under tab-indented formulas.
        let mut pointer: String = snippet
            .chars()
            .take(start)
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        pointer.push_str(&"^".repeat(width));

        Self {
            kind,
            message: message.into(),
            file: file.into(),
            line: span.line,
            column: span.column,
            snippet,
            pointer,
        }
    }

    /// Returns whether the diagnostic points at a source position.
    pub fn is_placed(&self) -> bool {
        self.line > 0 && self.column > 0
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.kind.tag(), self.message)?;
        if !self.is_placed() {
            return write!(f, " ({})", self.file);
        }
        write!(
            f,
            "\n --> {}:{}:{}\n    |\n{:>3} | {}\n    | {}",
            self.file, self.line, self.column, self.line, self.snippet, self.pointer
        )
    }
}

impl std::error::Error for CompileError {}
