use tracing::debug;

use super::error::{ExprError, codes};
use super::{Expr, Span, Statement, parse};
use crate::cvec::Cvec;
use crate::kind::CvType;
use crate::var::CgVar;
use crate::var::arith::{ArithOp, ArithOptions, Operand};
use crate::var::number::Number;

/// An evaluation context: named variables plus arithmetic options.
#[derive(Clone, Debug, Default)]
pub struct Session {
    vars: Cvec,
    options: ArithOptions,
}

/// An operand after evaluation. Host primitives stay untyped until an
/// operator or the end of the statement gives them a kind.
enum Evaluated {
    Var(CgVar),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Evaluated {
    fn as_operand(&self) -> Operand<'_> {
        match self {
            Evaluated::Var(var) => Operand::Var(var),
            Evaluated::Int(v) => Operand::Int(*v),
            Evaluated::Float(v) => Operand::Float(*v),
            Evaluated::Str(s) => Operand::Str(s),
        }
    }

    /// Give a host primitive its default kind: int64, decimal64 or string.
    fn into_var(self) -> crate::Result<CgVar> {
        match self {
            Evaluated::Var(var) => Ok(var),
            Evaluated::Int(v) => Ok(CgVar::from_value(crate::Value::Int64(v))),
            Evaluated::Float(v) => {
                let number = Number::from_f64(v)?;
                CgVar::with_text(CvType::Dec64, None, &number.to_string())
            }
            Evaluated::Str(s) => Ok(CgVar::from_value(crate::Value::String(s))),
        }
    }
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn with_options(options: ArithOptions) -> Session {
        Session {
            vars: Cvec::new(),
            options,
        }
    }

    pub fn options(&self) -> &ArithOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: ArithOptions) {
        self.options = options;
    }

    pub fn vars(&self) -> &Cvec {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut Cvec {
        &mut self.vars
    }

    /// Parse and evaluate one statement. Returns the value of the
    /// expression, or the stored variable for an assignment.
    pub fn eval(&mut self, input: &str) -> Result<CgVar, ExprError> {
        let statement = parse(input)?;
        self.exec(&statement, input)
    }

    /// Evaluate a parsed statement; `input` is the text its spans refer to.
    pub fn exec(&mut self, statement: &Statement, input: &str) -> Result<CgVar, ExprError> {
        match statement {
            Statement::Expr(expr) => {
                let value = self.eval_expr(expr, input)?;
                value
                    .into_var()
                    .map_err(|err| ExprError::from_value(err, expr.span(), input))
            }
            Statement::Assign {
                name,
                name_span,
                op: None,
                value,
            } => {
                let mut var = self
                    .eval_expr(value, input)?
                    .into_var()
                    .map_err(|err| ExprError::from_value(err, value.span(), input))?;
                var.set_name(name.as_str());
                if self.vars.contains(name) {
                    debug!(%name, kind = %var.kind(), "replacing variable");
                    self.vars
                        .set(name, var.clone())
                        .map_err(|err| ExprError::from_value(err, *name_span, input))?;
                } else {
                    debug!(%name, kind = %var.kind(), "defining variable");
                    self.vars.append(var.clone());
                }
                Ok(var)
            }
            Statement::Assign {
                name,
                name_span,
                op: Some(op),
                value,
            } => {
                // The right-hand side may read the target, so evaluate it first.
                let rhs = self.eval_expr(value, input)?;
                let options = self.options;
                let target = self
                    .vars
                    .get_mut(name)
                    .map_err(|_| undefined(name, *name_span, input))?;
                target
                    .apply_assign(*op, rhs.as_operand(), &options)
                    .map_err(|err| ExprError::from_value(err, name_span.to(value.span()), input))?;
                Ok(target.clone())
            }
        }
    }

    fn eval_expr(&self, expr: &Expr, input: &str) -> Result<Evaluated, ExprError> {
        match expr {
            Expr::Typed { kind, text, span } => CgVar::with_text(*kind, None, text)
                .map(Evaluated::Var)
                .map_err(|err| ExprError::from_value(err, *span, input)),
            Expr::Int { value, .. } => Ok(Evaluated::Int(*value)),
            Expr::Float { value, .. } => Ok(Evaluated::Float(*value)),
            Expr::Str { value, .. } => Ok(Evaluated::Str(value.clone())),
            Expr::Var { name, span } => self
                .vars
                .get(name.as_str())
                .cloned()
                .map(Evaluated::Var)
                .map_err(|_| undefined(name, *span, input)),
            Expr::Binary { op, lhs, rhs, span } => {
                let left = self
                    .eval_expr(lhs, input)?
                    .into_var()
                    .map_err(|err| ExprError::from_value(err, lhs.span(), input))?;
                let right = self.eval_expr(rhs, input)?;
                self.binary(&left, *op, &right)
                    .map(Evaluated::Var)
                    .map_err(|err| ExprError::from_value(err, *span, input))
            }
        }
    }

    fn binary(&self, left: &CgVar, op: ArithOp, right: &Evaluated) -> crate::Result<CgVar> {
        left.apply(op, right.as_operand(), &self.options)
    }
}

fn undefined(name: &str, span: Span, input: &str) -> ExprError {
    ExprError::new(
        codes::UNDEFINED,
        format!("undefined variable '{name}'"),
        span,
        input,
    )
    .with_help("assign it first, e.g. `x = int32(0)`")
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
