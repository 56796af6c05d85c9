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

//! Resolver and evaluation options, loadable from TOML.
//!
//! ```toml
//! probe_value = 1.0
//!
//! [constants]
//! F = 96485.332
//! ```
//!
//! Constants listed in the file are added to the built-in `PI` and `E`.

use crate::parser::is_identifier;
use crate::resolver::starts_with_uppercase;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Value bound to parameters and locals when probing a formula.
pub const DEFAULT_PROBE_VALUE: f64 = 1.0;

/// Errors raised while loading [`ResolveOptions`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed.
    #[error("invalid options file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The probe value is NaN or infinite.
    #[error("probe value must be finite, got {0}")]
    InvalidProbeValue(f64),
    /// A constant name is not an uppercase-initial identifier.
    #[error("constant '{0}' must be an identifier starting with an uppercase letter")]
    InvalidConstantName(String),
}

/// Options shared by resolution and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    /// Value bound to every parameter and local by [`crate::Formula::probe`].
    pub probe_value: f64,
    /// Named constants that formulas may read (`PI`, `E`, ...).
    pub constants: BTreeMap<String, f64>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        let mut constants = BTreeMap::new();
        constants.insert("PI".to_string(), std::f64::consts::PI);
        constants.insert("E".to_string(), std::f64::consts::E);
        Self {
            probe_value: DEFAULT_PROBE_VALUE,
            constants,
        }
    }
}

/// On-disk layout; merged over the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawOptions {
    probe_value: Option<f64>,
    constants: BTreeMap<String, f64>,
}

impl ResolveOptions {
    /// Parses options from TOML text and validates them.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawOptions = toml::from_str(text)?;
        let mut options = Self::default();
        if let Some(probe_value) = raw.probe_value {
            options.probe_value = probe_value;
        }
        options.constants.extend(raw.constants);
        options.validate()?;
        Ok(options)
    }

    /// Adds or replaces a constant.
    pub fn with_constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    /// Returns the value of a known constant.
    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Checks the probe value and constant names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.probe_value.is_finite() {
            return Err(ConfigError::InvalidProbeValue(self.probe_value));
        }
        for name in self.constants.keys() {
            if !starts_with_uppercase(name) || !is_identifier(name) {
                return Err(ConfigError::InvalidConstantName(name.clone()));
            }
        }
        Ok(())
    }
}
