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

//! Tree-walking evaluation of a built formula.

use crate::ast::{Assign, BinOp, Expr, ExprKind, Stmt, StmtKind, UnaryOp};
use std::collections::HashMap;

use super::{EvalError, Formula, Value};

/// Variable bindings for one invocation.
pub(super) struct Frame<'f> {
    formula: &'f Formula,
    values: HashMap<&'f str, Value>,
}

impl<'f> Frame<'f> {
    /// Binds arguments to parameters positionally.
    pub(super) fn with_arguments(formula: &'f Formula, args: &[f64]) -> Result<Self, EvalError> {
        if args.len() != formula.parameters.len() {
            return Err(EvalError::ArityMismatch {
                expected: formula.parameters.len(),
                found: args.len(),
            });
        }
        let values = formula
            .parameters
            .iter()
            .map(String::as_str)
            .zip(args.iter().map(|arg| Value::Number(*arg)))
            .collect();
        Ok(Self { formula, values })
    }

    /// Binds every parameter and every local to the probe value.
    pub(super) fn probing(formula: &'f Formula) -> Self {
        let probe = Value::Number(formula.probe_value);
        let values = formula
            .parameters
            .iter()
            .chain(formula.locals.iter())
            .map(|name| (name.as_str(), probe))
            .collect();
        Self { formula, values }
    }

    /// Runs all statements; the last one gives the result.
    pub(super) fn run(mut self) -> Result<Value, EvalError> {
        let formula = self.formula;
        let mut last = None;
        for stmt in &formula.program.statements {
            last = Some(self.exec(stmt)?);
        }
        last.ok_or(EvalError::EmptyFormula)
    }

    fn exec(&mut self, stmt: &'f Stmt) -> Result<Value, EvalError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.eval(expr),
            StmtKind::Assign(assign) => self.assign(assign),
        }
    }

    fn assign(&mut self, assign: &'f Assign) -> Result<Value, EvalError> {
        let value = match assign.op {
            None => self.eval(&assign.value)?,
            Some(op) => {
                // `y op= x` reads `y` before evaluating `x`.
                let current = self.read(&assign.target)?;
                let rhs = self.eval(&assign.value)?;
                binary_value(op, current, rhs)?
            }
        };
        self.values.insert(assign.target.as_str(), value);
        Ok(value)
    }

    /// Looks up an identifier: bound variable, constant, then bare call.
    fn read(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.values.get(name) {
            return Ok(*value);
        }
        if self.formula.locals.iter().any(|local| local == name) {
            return Err(EvalError::UninitializedVariable(name.to_string()));
        }
        if let Some(value) = self.formula.constants.get(name) {
            return Ok(Value::Number(*value));
        }
        if let Some(function) = self.formula.functions.get(name) {
            return Ok(Value::Number(function.call(&[])));
        }
        Err(EvalError::UnknownName(name.to_string()))
    }

    fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match &expr.kind {
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Ident(name) => self.read(name),
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                match (op, value) {
                    (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
                    (UnaryOp::Neg, Value::Number(n)) => Ok(Value::Number(-n)),
                    (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(n)),
                    (op, value) => Err(EvalError::TypeMismatch {
                        op: op.symbol().to_string(),
                        found: value.type_name().to_string(),
                    }),
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                // `&&` and `||` return the deciding operand without evaluating the other.
                match op {
                    BinOp::And if !left.is_truthy() => Ok(left),
                    BinOp::Or if left.is_truthy() => Ok(left),
                    BinOp::And | BinOp::Or => self.eval(right),
                    _ => {
                        let right = self.eval(right)?;
                        binary_value(*op, left, right)
                    }
                }
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            ExprKind::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    let value = self.eval(arg)?;
                    let Some(n) = value.as_number() else {
                        return Err(EvalError::TypeMismatch {
                            op: name.clone(),
                            found: value.type_name().to_string(),
                        });
                    };
                    values.push(n);
                }
                let function = self
                    .formula
                    .functions
                    .get(name)
                    .ok_or_else(|| EvalError::UnknownName(name.clone()))?;
                Ok(Value::Number(function.call(&values)))
            }
        }
    }
}

/// Applies a non-short-circuit binary operator.
fn binary_value(op: BinOp, left: Value, right: Value) -> Result<Value, EvalError> {
    match (op, left, right) {
        (BinOp::Eq, l, r) => Ok(Value::Bool(l == r)),
        (BinOp::Ne, l, r) => Ok(Value::Bool(l != r)),
        (op, Value::Number(l), Value::Number(r)) => Ok(match op {
            BinOp::Add => Value::Number(l + r),
            BinOp::Sub => Value::Number(l - r),
            BinOp::Mul => Value::Number(l * r),
            BinOp::Div => Value::Number(l / r),
            // Floored modulo: the result takes the sign of the divisor.
            BinOp::Rem => Value::Number(l - r * (l / r).floor()),
            BinOp::Pow => Value::Number(l.powf(r)),
            BinOp::Lt => Value::Bool(l < r),
            BinOp::Le => Value::Bool(l <= r),
            BinOp::Gt => Value::Bool(l > r),
            BinOp::Ge => Value::Bool(l >= r),
            BinOp::Eq | BinOp::Ne | BinOp::And | BinOp::Or => {
                unreachable!("handled before numeric dispatch")
            }
        }),
        (op, l, r) => Err(EvalError::TypeMismatch {
            op: op.symbol().to_string(),
            found: format!("{} and {}", l.type_name(), r.type_name()),
        }),
    }
}
