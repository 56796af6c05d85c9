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

//! C rendering of parsed formulas.
//!
//! Output is deterministic: statements are emitted in source order, one per
//! line, and every compound expression is parenthesized so C precedence never
//! matters. The last statement becomes the `return`.
//!
//! Formula values are doubles or booleans and only `false` is falsy, while C
//! treats `0.0` as false. Conditions are lowered using the static kind of
//! each expression: a numeric condition always takes the first branch, and
//! `&&`/`||` yield their deciding operand. A variable assigned values of
//! different kinds falls back to C truthiness.

use crate::ast::{BinOp, Expr, ExprKind, Program, StmtKind, UnaryOp};
use std::collections::HashMap;
use std::fmt;

/// C statements for a formula body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CSource {
    /// Newline-terminated statements.
    pub code: String,
    /// Assigned names the caller must declare as `double`.
    pub locals: Vec<String>,
}

/// Renders `program` as C statements.
pub fn emit_c(program: &Program) -> CSource {
    let mut code = String::new();
    let mut kinds = HashMap::new();
    let last = program.statements.len().saturating_sub(1);

    for (index, stmt) in program.statements.iter().enumerate() {
        let is_last = index == last;
        match &stmt.kind {
            StmtKind::Expr(expr) if is_last => {
                code.push_str(&format!("return {};\n", CExpr::new(expr, &kinds)));
            }
            StmtKind::Expr(expr) => {
                code.push_str(&format!("{};\n", CExpr::new(expr, &kinds)));
            }
            StmtKind::Assign(assign) => {
                let target = &assign.target;
                let value = CExpr::new(&assign.value, &kinds);
                let line = match assign.op {
                    None => format!("{target} = {value};\n"),
                    Some(BinOp::Rem) => format!("{target} = fmod({target}, {value});\n"),
                    Some(BinOp::Pow) => format!("{target} = pow({target}, {value});\n"),
                    Some(op) => format!("{target} {}= {value};\n", op.symbol()),
                };
                code.push_str(&line);
                let kind = match assign.op {
                    None => value.kind(),
                    Some(_) => Kind::Number,
                };
                kinds.insert(target.clone(), kind);
                if is_last {
                    code.push_str(&format!("return {target};\n"));
                }
            }
        }
    }

    CSource {
        code,
        locals: program.assigned_names(),
    }
}

/// Static value kind of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Number,
    Bool,
    // Depends on which value a variable or branch holds at run time.
    Mixed,
}

struct CExpr<'a> {
    expr: &'a Expr,
    // Kind of each variable assigned so far; unassigned names are arguments.
    kinds: &'a HashMap<String, Kind>,
}

impl<'a> CExpr<'a> {
    fn new(expr: &'a Expr, kinds: &'a HashMap<String, Kind>) -> Self {
        Self { expr, kinds }
    }

    fn sub(&self, expr: &'a Expr) -> Self {
        Self::new(expr, self.kinds)
    }

    fn kind(&self) -> Kind {
        let expr: &'a Expr = self.expr;
        match &expr.kind {
            ExprKind::Number(_) | ExprKind::Call { .. } => Kind::Number,
            ExprKind::Bool(_) => Kind::Bool,
            ExprKind::Ident(name) => self.kinds.get(name).copied().unwrap_or(Kind::Number),
            ExprKind::Unary { op, .. } => match op {
                UnaryOp::Not => Kind::Bool,
                UnaryOp::Neg | UnaryOp::Plus => Kind::Number,
            },
            ExprKind::Binary { op, left, right } => match op {
                BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                    Kind::Bool
                }
                BinOp::And => match self.sub(left).kind() {
                    Kind::Number => self.sub(right).kind(),
                    Kind::Bool => join(Kind::Bool, self.sub(right).kind()),
                    Kind::Mixed => Kind::Mixed,
                },
                BinOp::Or => match self.sub(left).kind() {
                    Kind::Number => Kind::Number,
                    Kind::Bool => join(Kind::Bool, self.sub(right).kind()),
                    Kind::Mixed => Kind::Mixed,
                },
                _ => Kind::Number,
            },
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                let then_kind = self.sub(then_branch).kind();
                match self.sub(cond).kind() {
                    Kind::Number => then_kind,
                    _ => join(then_kind, self.sub(else_branch).kind()),
                }
            }
        }
    }
}

fn join(a: Kind, b: Kind) -> Kind {
    if a == b { a } else { Kind::Mixed }
}

/// Formats a literal; C has no spelling for an infinite double.
fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_infinite() {
        write!(f, "{}HUGE_VAL", if n < 0.0 { "-" } else { "" })
    } else {
        write!(f, "{n:?}")
    }
}

impl<'a> fmt::Display for CExpr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expr: &'a Expr = self.expr;
        match &expr.kind {
            ExprKind::Number(n) => write_number(f, *n),
            ExprKind::Bool(true) => write!(f, "1"),
            ExprKind::Bool(false) => write!(f, "0"),
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::Unary { op, operand } => {
                let operand = self.sub(operand);
                match op {
                    UnaryOp::Neg => write!(f, "(-{operand})"),
                    UnaryOp::Plus => write!(f, "{operand}"),
                    // Negating a number always gives false.
                    UnaryOp::Not if operand.kind() == Kind::Number => write!(f, "0"),
                    UnaryOp::Not => write!(f, "(!{operand})"),
                }
            }
            ExprKind::Binary { op, left, right } => {
                let (left, right) = (self.sub(left), self.sub(right));
                let kinds = (left.kind(), right.kind());
                match op {
                    BinOp::Pow => write!(f, "pow({left}, {right})"),
                    BinOp::Rem => write!(f, "fmod({left}, {right})"),
                    // A boolean never equals a number.
                    BinOp::Eq if kinds == (Kind::Bool, Kind::Number) => write!(f, "0"),
                    BinOp::Eq if kinds == (Kind::Number, Kind::Bool) => write!(f, "0"),
                    BinOp::Ne if kinds == (Kind::Bool, Kind::Number) => write!(f, "1"),
                    BinOp::Ne if kinds == (Kind::Number, Kind::Bool) => write!(f, "1"),
                    BinOp::And | BinOp::Or if kinds == (Kind::Bool, Kind::Bool) => {
                        write!(f, "({left} {} {right})", op.symbol())
                    }
                    BinOp::And if kinds.0 == Kind::Number => write!(f, "{right}"),
                    BinOp::Or if kinds.0 == Kind::Number => write!(f, "{left}"),
                    BinOp::And => write!(f, "({left} ? {right} : {left})"),
                    BinOp::Or => write!(f, "({left} ? {left} : {right})"),
                    op => write!(f, "({left} {} {right})", op.symbol()),
                }
            }
            ExprKind::Ternary {
                cond,
                then_branch,
                else_branch,
            } => {
                let (cond, then_branch) = (self.sub(cond), self.sub(then_branch));
                if cond.kind() == Kind::Number {
                    return write!(f, "{then_branch}");
                }
                write!(f, "({cond} ? {then_branch} : {})", self.sub(else_branch))
            }
            ExprKind::Call { name, args } => match (name.as_str(), args.as_slice()) {
                ("log", [value, base]) => {
                    write!(f, "(log({}) / log({}))", self.sub(value), self.sub(base))
                }
                _ => {
                    let name = match name.as_str() {
                        "abs" => "fabs",
                        other => other,
                    };
                    write!(f, "{name}(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", self.sub(arg))?;
                    }
                    write!(f, ")")
                }
            },
        }
    }
}
