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

//! Known-callable name sets.

use crate::runtime::FunctionTable;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// Read-only set of function names a formula may call.
///
/// Resolution only needs to know whether a name is callable; arity and
/// numeric behavior are checked later, when a [`crate::Formula`] is built.
pub trait KnownCallables {
    /// Returns whether `name` may be invoked from a formula.
    fn is_known_callable(&self, name: &str) -> bool;
}

impl KnownCallables for FunctionTable {
    fn is_known_callable(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<S: BuildHasher> KnownCallables for HashSet<String, S> {
    fn is_known_callable(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl KnownCallables for BTreeSet<String> {
    fn is_known_callable(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<T: AsRef<str>> KnownCallables for [T] {
    fn is_known_callable(&self, name: &str) -> bool {
        self.iter().any(|item| item.as_ref() == name)
    }
}

impl<T: AsRef<str>, const N: usize> KnownCallables for [T; N] {
    fn is_known_callable(&self, name: &str) -> bool {
        self.as_slice().is_known_callable(name)
    }
}

impl<T: AsRef<str>> KnownCallables for Vec<T> {
    fn is_known_callable(&self, name: &str) -> bool {
        self.as_slice().is_known_callable(name)
    }
}
