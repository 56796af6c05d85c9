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

//! Native math functions callable from formulas.

use std::collections::BTreeMap;
use std::fmt;

/// Native implementation of a formula function.
///
/// Arguments are already checked against the function [`Arity`].
pub type NativeFn = fn(&[f64]) -> f64;

/// Accepted argument count range (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Minimum argument count.
    pub min: usize,
    /// Maximum argument count.
    pub max: usize,
}

impl Arity {
    /// Exactly `count` arguments.
    pub const fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    /// Between `min` and `max` arguments.
    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Returns whether `count` arguments are accepted.
    pub fn accepts(self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{} to {}", self.min, self.max)
        }
    }
}

/// One registered function.
#[derive(Clone)]
pub struct Function {
    name: String,
    arity: Arity,
    func: NativeFn,
}

impl Function {
    /// Function name as written in formulas.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accepted argument counts.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Invokes the native implementation.
    pub fn call(&self, args: &[f64]) -> f64 {
        (self.func)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Table of functions available to formulas.
///
/// The table doubles as the known-callables set of the resolver.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: BTreeMap<String, Function>,
}

impl FunctionTable {
    /// Creates a table with no functions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table with the standard math functions.
    ///
    /// Unary: `sin cos tan asin acos atan sinh cosh tanh asinh acosh atanh
    /// exp sqrt cbrt log10 log2 abs floor ceil round`.
    /// Binary: `atan2 hypot`. `log(x)` is the natural log and `log(x, b)`
    /// the log in base `b`.
    pub fn standard() -> Self {
        let unary: [(&str, NativeFn); 20] = [
            ("sin", |a: &[f64]| a[0].sin()),
            ("cos", |a: &[f64]| a[0].cos()),
            ("tan", |a: &[f64]| a[0].tan()),
            ("asin", |a: &[f64]| a[0].asin()),
            ("acos", |a: &[f64]| a[0].acos()),
            ("atan", |a: &[f64]| a[0].atan()),
            ("sinh", |a: &[f64]| a[0].sinh()),
            ("cosh", |a: &[f64]| a[0].cosh()),
            ("tanh", |a: &[f64]| a[0].tanh()),
            ("asinh", |a: &[f64]| a[0].asinh()),
            ("acosh", |a: &[f64]| a[0].acosh()),
            ("atanh", |a: &[f64]| a[0].atanh()),
            ("exp", |a: &[f64]| a[0].exp()),
            ("sqrt", |a: &[f64]| a[0].sqrt()),
            ("cbrt", |a: &[f64]| a[0].cbrt()),
            ("log10", |a: &[f64]| a[0].log10()),
            ("log2", |a: &[f64]| a[0].log2()),
            ("abs", |a: &[f64]| a[0].abs()),
            ("floor", |a: &[f64]| a[0].floor()),
            ("ceil", |a: &[f64]| a[0].ceil()),
        ];

        let mut table = Self::empty();
        for (name, func) in unary {
            table.register(name, Arity::exactly(1), func);
        }
        table.register("round", Arity::exactly(1), |a: &[f64]| a[0].round());
        table.register("atan2", Arity::exactly(2), |a: &[f64]| a[0].atan2(a[1]));
        table.register("hypot", Arity::exactly(2), |a: &[f64]| a[0].hypot(a[1]));
        table.register("log", Arity::between(1, 2), |a: &[f64]| {
            if a.len() == 2 {
                a[0].ln() / a[1].ln()
            } else {
                a[0].ln()
            }
        });
        table
    }

    /// Registers or replaces a function.
    pub fn register(&mut self, name: impl Into<String>, arity: Arity, func: NativeFn) -> &mut Self {
        let name = name.into();
        self.functions.insert(name.clone(), Function { name, arity, func });
        self
    }

    /// Looks up a function by name.
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Returns whether a function is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Iterates over registered function names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }
}
