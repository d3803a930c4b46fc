use std::sync::LazyLock;

use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};

use crate::{BinaryOp, Expr, PropKey, Property, UnaryOp};

#[derive(pest_derive::Parser)]
#[grammar = "expr.pest"]
struct ExprParser;

/// The expression text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed expression `{source_text}`: {message}")]
pub struct ExprParseError {
    pub source_text: String,
    pub message: String,
}

impl ExprParseError {
    fn new(source_text: &str, message: impl Into<String>) -> Self {
        Self {
            source_text: source_text.to_string(),
            message: message.into(),
        }
    }
}

type ParseResult<T> = Result<T, ExprParseError>;

static PRATT: LazyLock<PrattParser<Rule>> = LazyLock::new(|| {
    // Lowest binding power first.
    PrattParser::new()
        .op(Op::infix(Rule::nullish, Assoc::Left) | Op::infix(Rule::or, Assoc::Left))
        .op(Op::infix(Rule::and, Assoc::Left))
        .op(Op::infix(Rule::strict_eq, Assoc::Left)
            | Op::infix(Rule::strict_ne, Assoc::Left)
            | Op::infix(Rule::eq, Assoc::Left)
            | Op::infix(Rule::ne, Assoc::Left))
        .op(Op::infix(Rule::lt, Assoc::Left)
            | Op::infix(Rule::le, Assoc::Left)
            | Op::infix(Rule::gt, Assoc::Left)
            | Op::infix(Rule::ge, Assoc::Left))
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::sub, Assoc::Left))
        .op(Op::infix(Rule::mul, Assoc::Left)
            | Op::infix(Rule::div, Assoc::Left)
            | Op::infix(Rule::rem, Assoc::Left))
        .op(Op::prefix(Rule::not)
            | Op::prefix(Rule::neg)
            | Op::prefix(Rule::pos)
            | Op::prefix(Rule::type_of))
});

/// Parses a single JavaScript expression, e.g. the inside of `{{ list.length > 0 }}`.
pub fn parse_expression(source: &str) -> Result<Expr, ExprParseError> {
    let mut pairs = ExprParser::parse(Rule::expression, source)
        .map_err(|e| ExprParseError::new(source, e.to_string()))?;
    let root = pairs
        .next()
        .ok_or_else(|| ExprParseError::new(source, "empty expression"))?;
    let expr = root
        .into_inner()
        .find(|p| p.as_rule() == Rule::expr)
        .ok_or_else(|| ExprParseError::new(source, "empty expression"))?;
    build_expr(expr, source)
}

fn build_expr(pair: Pair<Rule>, src: &str) -> ParseResult<Expr> {
    let mut inner = pair.into_inner();
    let head = next_pair(&mut inner, src)?;
    let test = build_binary(head, src)?;
    match inner.next() {
        None => Ok(test),
        Some(consequent) => {
            let alternate = next_pair(&mut inner, src)?;
            Ok(Expr::Conditional {
                test: Box::new(test),
                consequent: Box::new(build_expr(consequent, src)?),
                alternate: Box::new(build_expr(alternate, src)?),
            })
        }
    }
}

fn build_binary(pair: Pair<Rule>, src: &str) -> ParseResult<Expr> {
    PRATT
        .map_primary(|p| build_postfix(p, src))
        .map_prefix(|op, rhs| {
            let op = match op.as_rule() {
                Rule::not => UnaryOp::Not,
                Rule::neg => UnaryOp::Neg,
                Rule::pos => UnaryOp::Plus,
                Rule::type_of => UnaryOp::TypeOf,
                other => return Err(unexpected(other, src)),
            };
            Ok(Expr::Unary {
                op,
                arg: Box::new(rhs?),
            })
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::nullish => BinaryOp::Nullish,
                Rule::or => BinaryOp::Or,
                Rule::and => BinaryOp::And,
                Rule::strict_eq => BinaryOp::StrictEq,
                Rule::strict_ne => BinaryOp::StrictNe,
                Rule::eq => BinaryOp::Eq,
                Rule::ne => BinaryOp::Ne,
                Rule::lt => BinaryOp::Lt,
                Rule::le => BinaryOp::Le,
                Rule::gt => BinaryOp::Gt,
                Rule::ge => BinaryOp::Ge,
                Rule::add => BinaryOp::Add,
                Rule::sub => BinaryOp::Sub,
                Rule::mul => BinaryOp::Mul,
                Rule::div => BinaryOp::Div,
                Rule::rem => BinaryOp::Rem,
                other => return Err(unexpected(other, src)),
            };
            Ok(Expr::Binary {
                op,
                left: Box::new(lhs?),
                right: Box::new(rhs?),
            })
        })
        .parse(pair.into_inner())
}

fn build_postfix(pair: Pair<Rule>, src: &str) -> ParseResult<Expr> {
    let mut inner = pair.into_inner();
    let mut expr = build_primary(next_pair(&mut inner, src)?, src)?;
    for post in inner {
        expr = match post.as_rule() {
            Rule::member | Rule::opt_member => {
                let optional = post.as_rule() == Rule::opt_member;
                let property = post.into_inner().as_str().to_string();
                Expr::Member {
                    object: Box::new(expr),
                    property,
                    optional,
                }
            }
            Rule::index => {
                let index = next_pair(&mut post.into_inner(), src)?;
                Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(build_expr(index, src)?),
                }
            }
            Rule::call => Expr::Call {
                callee: Box::new(expr),
                args: build_list(post.into_inner(), src)?,
            },
            other => return Err(unexpected(other, src)),
        };
    }
    Ok(expr)
}

fn build_primary(pair: Pair<Rule>, src: &str) -> ParseResult<Expr> {
    Ok(match pair.as_rule() {
        Rule::expr => build_expr(pair, src)?,
        Rule::ident => Expr::Ident {
            name: pair.as_str().to_string(),
        },
        Rule::number => Expr::Num {
            raw: pair.as_str().to_string(),
        },
        Rule::string => Expr::Str {
            value: unescape(string_body(pair)),
        },
        Rule::true_lit => Expr::Bool { value: true },
        Rule::false_lit => Expr::Bool { value: false },
        Rule::null_lit => Expr::Null,
        Rule::array => Expr::Array {
            elements: build_list(pair.into_inner(), src)?,
        },
        Rule::object => {
            let mut properties = Vec::new();
            for prop in pair.into_inner() {
                properties.push(build_property(prop, src)?);
            }
            Expr::Object { properties }
        }
        other => return Err(unexpected(other, src)),
    })
}

fn build_property(pair: Pair<Rule>, src: &str) -> ParseResult<Property> {
    let mut inner = pair.into_inner();
    let key_pair = next_pair(&mut inner, src)?;
    let key = match key_pair.as_rule() {
        Rule::ident => PropKey::Ident(key_pair.as_str().to_string()),
        Rule::number => PropKey::Num(key_pair.as_str().to_string()),
        Rule::string => PropKey::Str(unescape(string_body(key_pair.clone()))),
        other => return Err(unexpected(other, src)),
    };
    let value = match inner.next() {
        Some(value) => build_expr(value, src)?,
        // `{ a }` shorthand
        None => match &key {
            PropKey::Ident(name) => Expr::Ident { name: name.clone() },
            PropKey::Str(_) | PropKey::Num(_) => {
                return Err(ExprParseError::new(
                    src,
                    format!("property `{}` needs a value", key_pair.as_str()),
                ));
            }
        },
    };
    Ok(Property { key, value })
}

fn build_list(pairs: Pairs<Rule>, src: &str) -> ParseResult<Vec<Expr>> {
    pairs.map(|p| build_expr(p, src)).collect()
}

fn string_body(pair: Pair<Rule>) -> &str {
    pair.into_inner().next().map(|p| p.as_str()).unwrap_or_default()
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
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, src: &str) -> ParseResult<Pair<'i, Rule>> {
    pairs
        .next()
        .ok_or_else(|| ExprParseError::new(src, "unexpected end of expression"))
}

fn unexpected(rule: Rule, src: &str) -> ExprParseError {
    ExprParseError::new(src, format!("unexpected {rule:?}"))
}
