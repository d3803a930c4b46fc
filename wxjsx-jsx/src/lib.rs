pub mod emit;
pub mod parse;

pub use emit::{EmitOptions, Layout, QuoteStyle, emit_expr, emit_program};
pub use parse::{ExprParseError, parse_expression};

use serde::Serialize;

/// A JSX element: `<Name attrs>children</Name>`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxElement {
    pub name: String,
    pub attrs: Vec<JsxAttr>,
    pub children: Vec<JsxChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsxAttr {
    pub name: String,
    pub value: JsxAttrValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum JsxAttrValue {
    /// `name="literal"`
    Str(String),
    /// `name={expr}`
    Expr(Expr),
}

/// Anything that may appear between an opening and closing tag, and the unit
/// of top-level output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum JsxChild {
    Element(JsxElement),
    Text(String),
    /// An embedded expression hole: `{expr}`.
    Expr(Expr),
}

impl JsxChild {
    /// Converts a fragment into something usable in expression position,
    /// e.g. a ternary branch or a `return` argument.
    pub fn into_expr(self) -> Expr {
        match self {
            JsxChild::Element(el) => Expr::Jsx(Box::new(el)),
            JsxChild::Expr(e) => e,
            JsxChild::Text(value) => Expr::Str { value },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    TypeOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Nullish,
    Or,
    And,
    StrictEq,
    StrictNe,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Nullish => "??",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNe => "!==",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum PropKey {
    Ident(String),
    Str(String),
    Num(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub key: PropKey,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Expr {
    Ident { name: String },
    Null,
    Bool { value: bool },
    /// Numeric literal kept in its source spelling.
    Num { raw: String },
    Str { value: String },
    Array { elements: Vec<Expr> },
    Object { properties: Vec<Property> },
    Member { object: Box<Expr>, property: String, optional: bool },
    Index { object: Box<Expr>, index: Box<Expr> },
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Unary { op: UnaryOp, arg: Box<Expr> },
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Conditional { test: Box<Expr>, consequent: Box<Expr>, alternate: Box<Expr> },
    /// `(params) => { return body }`
    Arrow { params: Vec<String>, body: Box<Expr> },
    Jsx(Box<JsxElement>),
}

// Concise builders, used by the rewrite pass and by tests.

pub fn h(name: impl Into<String>, attrs: Vec<JsxAttr>, children: Vec<JsxChild>) -> JsxChild {
    JsxChild::Element(JsxElement {
        name: name.into(),
        attrs,
        children,
    })
}

pub fn text(t: impl Into<String>) -> JsxChild {
    JsxChild::Text(t.into())
}

pub fn attr_str(name: impl Into<String>, value: impl Into<String>) -> JsxAttr {
    JsxAttr {
        name: name.into(),
        value: JsxAttrValue::Str(value.into()),
    }
}

pub fn attr_expr(name: impl Into<String>, value: Expr) -> JsxAttr {
    JsxAttr {
        name: name.into(),
        value: JsxAttrValue::Expr(value),
    }
}

pub fn ident(name: impl Into<String>) -> Expr {
    Expr::Ident { name: name.into() }
}

pub fn str_lit(value: impl Into<String>) -> Expr {
    Expr::Str {
        value: value.into(),
    }
}

pub fn bool_lit(value: bool) -> Expr {
    Expr::Bool { value }
}

pub fn member(object: Expr, property: impl Into<String>) -> Expr {
    Expr::Member {
        object: Box::new(object),
        property: property.into(),
        optional: false,
    }
}

pub fn call(callee: Expr, args: Vec<Expr>) -> Expr {
    Expr::Call {
        callee: Box::new(callee),
        args,
    }
}

pub fn arrow(params: Vec<String>, body: Expr) -> Expr {
    Expr::Arrow {
        params,
        body: Box::new(body),
    }
}

pub fn conditional(test: Expr, consequent: Expr, alternate: Expr) -> Expr {
    Expr::Conditional {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    }
}

pub fn object(properties: Vec<(String, Expr)>) -> Expr {
    Expr::Object {
        properties: properties
            .into_iter()
            .map(|(k, value)| Property {
                key: PropKey::Ident(k),
                value,
            })
            .collect(),
    }
}

/// Uppercases the first character when it is an ASCII lowercase letter.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {
            let mut out = String::with_capacity(s.len());
            out.push(c.to_ascii_uppercase());
            out.push_str(chars.as_str());
            out
        }
        _ => s.to_string(),
    }
}

/// `font-size` -> `fontSize`, `-webkit-box` -> `WebkitBox`.
///
/// Only a dash followed by an ASCII lowercase letter is folded; any other dash
/// is kept as is.
pub fn camelize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// True when `s` can be written as a bare identifier or property key.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_tree() {
        let node = h(
            "View",
            vec![attr_str("className", "app")],
            vec![text("hello"), h("Text", vec![], vec![text("world")])],
        );
        match node {
            JsxChild::Element(el) => {
                assert_eq!(el.name, "View");
                assert_eq!(el.attrs.len(), 1);
                assert_eq!(el.children.len(), 2);
            }
            other => panic!("expected element, got {other:?}"),
        }
    }

    #[test]
    fn fragment_into_expr() {
        assert_eq!(text("hi").into_expr(), str_lit("hi"));
        assert_eq!(JsxChild::Expr(ident("a")).into_expr(), ident("a"));
        assert!(matches!(h("View", vec![], vec![]).into_expr(), Expr::Jsx(_)));
    }

    #[test]
    fn case_helpers() {
        assert_eq!(camelize("font-size"), "fontSize");
        assert_eq!(camelize("-webkit-line-clamp"), "WebkitLineClamp");
        assert_eq!(camelize("data-1"), "data-1");
        assert_eq!(capitalize("span"), "Span");
        assert_eq!(capitalize("Span"), "Span");
        assert_eq!(capitalize(""), "");
        assert!(is_identifier("fontSize"));
        assert!(is_identifier("$x_1"));
        assert!(!is_identifier("--main-color"));
        assert!(!is_identifier("-MainColor"));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier(""));
    }
}
