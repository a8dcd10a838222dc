use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

use super::error::{ExprError, codes};
use super::{Expr, Span, Statement};
use crate::kind::CvType;
use crate::var::arith::ArithOp;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left)) // `+`, `-`
        .op(Op::infix(Rule::mul, Assoc::Left) | Op::infix(Rule::div, Assoc::Left)) // `*`, `/`
        ;
}

#[derive(Parser)]
#[grammar = "expr/grammar.pest"]
struct StatementParser;

/// Maximum nesting of parenthesized expressions.
const MAX_DEPTH: usize = 64;

struct ParseContext<'input> {
    input: &'input str,
    depth: usize,
}

/// Parse one statement.
pub fn parse(input: &str) -> Result<Statement, ExprError> {
    let mut pairs = StatementParser::parse(Rule::main, input)
        .map_err(|err| convert_pest_error(err, input))?;
    let mut ctx = ParseContext { input, depth: 0 };
    let main = pairs.next().ok_or_else(|| ctx.syntax("empty input", Span::default()))?;
    let stmt = main
        .into_inner()
        .next()
        .ok_or_else(|| ctx.syntax("empty input", Span::default()))?;
    match stmt.as_rule() {
        Rule::assignment => ctx.parse_assignment(stmt),
        Rule::expression => Ok(Statement::Expr(ctx.parse_expression(stmt)?)),
        rule => Err(ctx.syntax(format!("unexpected {rule:?}"), stmt.as_span().into())),
    }
}

impl ParseContext<'_> {
    fn syntax(&self, message: impl Into<String>, span: Span) -> ExprError {
        ExprError::new(codes::SYNTAX, message, span, self.input)
    }

    fn parse_assignment(&mut self, pair: Pair<Rule>) -> Result<Statement, ExprError> {
        let span: Span = pair.as_span().into();
        let mut inner = pair.into_inner();
        let (Some(name), Some(op), Some(value)) = (inner.next(), inner.next(), inner.next())
        else {
            return Err(self.syntax("incomplete assignment", span));
        };
        let op = match op.as_str() {
            "=" => None,
            "+=" => Some(ArithOp::Add),
            "-=" => Some(ArithOp::Sub),
            "*=" => Some(ArithOp::Mul),
            "/=" => Some(ArithOp::Div),
            other => {
                return Err(self.syntax(
                    format!("unknown assignment operator `{other}`"),
                    op.as_span().into(),
                ));
            }
        };
        Ok(Statement::Assign {
            name: name.as_str().to_string(),
            name_span: name.as_span().into(),
            op,
            value: self.parse_expression(value)?,
        })
    }

    fn parse_expression(&mut self, pair: Pair<Rule>) -> Result<Expr, ExprError> {
        let span: Span = pair.as_span().into();
        if self.depth >= MAX_DEPTH {
            return Err(self.syntax(
                format!("expression nesting depth exceeds maximum of {MAX_DEPTH} levels"),
                span,
            ));
        }
        self.depth += 1;
        let input = self.input;
        let result = PRATT_PARSER
            .map_primary(|primary| self.parse_operand(primary))
            .map_infix(|lhs, op, rhs| {
                let (lhs, rhs) = (lhs?, rhs?);
                let op = match op.as_rule() {
                    Rule::add => ArithOp::Add,
                    Rule::sub => ArithOp::Sub,
                    Rule::mul => ArithOp::Mul,
                    Rule::div => ArithOp::Div,
                    rule => {
                        return Err(ExprError::new(
                            codes::SYNTAX,
                            format!("unexpected operator {rule:?}"),
                            op.as_span().into(),
                            input,
                        ));
                    }
                };
                Ok(Expr::Binary {
                    op,
                    span: lhs.span().to(rhs.span()),
                    lhs: Box::new(lhs),
                    rhs: Box::new(rhs),
                })
            })
            .parse(pair.into_inner());
        self.depth -= 1;
        result
    }

    fn parse_operand(&mut self, pair: Pair<Rule>) -> Result<Expr, ExprError> {
        let span: Span = pair.as_span().into();
        match pair.as_rule() {
            Rule::grouped => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| self.syntax("empty parentheses", span))?;
                self.parse_expression(inner)
            }
            Rule::typed => self.parse_typed(pair),
            Rule::integer => {
                let value = pair.as_str().parse::<i64>().map_err(|_| {
                    ExprError::new(codes::LITERAL, "integer literal out of range", span, self.input)
                        .with_help("use a typed literal such as uint64(...) for large values")
                })?;
                Ok(Expr::Int { value, span })
            }
            Rule::float => {
                let value = pair.as_str().parse::<f64>().map_err(|_| {
                    ExprError::new(codes::LITERAL, "invalid float literal", span, self.input)
                })?;
                Ok(Expr::Float { value, span })
            }
            Rule::string => Ok(Expr::Str {
                value: unescape(pair.into_inner().as_str()),
                span,
            }),
            Rule::var_ref => Ok(Expr::Var {
                name: pair.as_str().trim_start_matches('$').to_string(),
                span,
            }),
            rule => Err(self.syntax(format!("unexpected {rule:?}"), span)),
        }
    }

    fn parse_typed(&mut self, pair: Pair<Rule>) -> Result<Expr, ExprError> {
        let span: Span = pair.as_span().into();
        let mut inner = pair.into_inner();
        let (Some(kind_pair), Some(arg)) = (inner.next(), inner.next()) else {
            return Err(self.syntax("incomplete typed literal", span));
        };
        let kind = kind_pair.as_str().parse::<CvType>().map_err(|_| {
            ExprError::new(
                codes::UNKNOWN_TYPE,
                format!("unknown type '{}'", kind_pair.as_str()),
                kind_pair.as_span().into(),
                self.input,
            )
            .with_help("run `cgv types` to list the known types")
        })?;
        let text = match arg.as_rule() {
            Rule::string => unescape(arg.into_inner().as_str()),
            _ => arg.as_str().trim_end().to_string(),
        };
        Ok(Expr::Typed { kind, text, span })
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn rule_name(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of input",
        Rule::expression | Rule::typed => "expression",
        Rule::assign_op => "assignment operator",
        Rule::add | Rule::sub | Rule::mul | Rule::div => "operator",
        Rule::float | Rule::integer => "number",
        Rule::string | Rule::string_raw => "string",
        Rule::var_ref => "variable reference",
        Rule::ident | Rule::kind_name => "identifier",
        Rule::grouped => "parenthesized expression",
        Rule::raw_text => "text",
        _ => return format!("{rule:?}"),
    }
    .to_string()
}

fn convert_pest_error(err: pest::error::Error<Rule>, input: &str) -> ExprError {
    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span::new(pos, pos),
        pest::error::InputLocation::Span((start, end)) => Span::new(start, end),
    };
    let err = err.renamed_rules(rule_name);
    let message = match &err.variant {
        pest::error::ErrorVariant::ParsingError { .. } => err.variant.message().to_string(),
        pest::error::ErrorVariant::CustomError { message } => message.clone(),
    };
    ExprError::new(codes::SYNTAX, message, span, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn expr(input: &str) -> Expr {
        match parse(input).unwrap() {
            Statement::Expr(expr) => expr,
            other => panic!("expected an expression, got {other:?}"),
        }
    }

    /// Render with explicit parentheses.
    fn show(expr: &Expr) -> String {
        match expr {
            Expr::Typed { kind, text, .. } => format!("{kind}({text})"),
            Expr::Int { value, .. } => value.to_string(),
            Expr::Float { value, .. } => format!("{value:?}"),
            Expr::Str { value, .. } => format!("{value:?}"),
            Expr::Var { name, .. } => format!("${name}"),
            Expr::Binary { op, lhs, rhs, .. } => format!("({} {op} {})", show(lhs), show(rhs)),
        }
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(show(&expr("1 + 2 * 3")), "(1 + (2 * 3))");
        assert_eq!(show(&expr("8 / 4 / 2")), "((8 / 4) / 2)");
        assert_eq!(show(&expr("(1 + 2) * 3")), "((1 + 2) * 3)");
        assert_eq!(show(&expr("5 - -3")), "(5 - -3)");
        assert_eq!(show(&expr("5-3")), "(5 - 3)");
    }

    #[test]
    fn test_operands() {
        assert_eq!(show(&expr("ipv4addr(10.0.0.1)")), "ipv4addr(10.0.0.1)");
        assert_eq!(show(&expr("string( a b )")), "string(a b)");
        assert_eq!(show(&expr(r#"string("x)y")"#)), "string(x)y)");
        assert_eq!(show(&expr("decimal64(2.50)")), "decimal64(2.50)");
        assert_eq!(show(&expr("2.5 + $x")), "(2.5 + $x)");
        assert_eq!(show(&expr(r#""a\"b\n""#)), r#""a\"b\n""#);
        assert_eq!(show(&expr("int(7) # trailing comment")), "int32(7)");
    }

    #[test]
    fn test_assignments() {
        let Statement::Assign { name, op, value, name_span } = parse("total += $x * 2").unwrap()
        else {
            panic!("expected assignment");
        };
        assert_eq!(name, "total");
        assert_eq!(name_span, Span::new(0, 5));
        assert_eq!(op, Some(ArithOp::Add));
        assert_eq!(show(&value), "($x * 2)");

        let Statement::Assign { op, .. } = parse("x = 1").unwrap() else {
            panic!("expected assignment");
        };
        assert_eq!(op, None);
    }

    #[test]
    fn test_spans() {
        let e = expr("1 + ipv4addr(10.0.0.1)");
        assert_eq!(e.span(), Span::new(0, 22));
        let Expr::Binary { rhs, .. } = e else {
            panic!("expected binary");
        };
        assert_eq!(rhs.span(), Span::new(4, 22));
    }

    #[test]
    fn test_unknown_type() {
        let err = parse("float(1.5)").unwrap_err();
        assert_eq!(err.code, codes::UNKNOWN_TYPE);
        assert_eq!(err.message, "unknown type 'float'");
        assert_eq!(err.span, Span::new(0, 5));
    }

    #[test]
    fn test_syntax_errors() {
        for input in ["", "1 +", "1 + + 2", "x =", "(1 + 2", "x == 1", "$"] {
            let err = parse(input).unwrap_err();
            assert_eq!(err.code, codes::SYNTAX, "{input:?}: {err:?}");
        }
    }

    #[test]
    fn test_integer_literal_out_of_range() {
        let err = parse("99999999999999999999").unwrap_err();
        assert_eq!(err.code, codes::LITERAL);
        assert!(err.help.is_some());
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        let err = parse(&deep).unwrap_err();
        assert!(err.message.contains("nesting depth"), "{err:?}");
    }
}
