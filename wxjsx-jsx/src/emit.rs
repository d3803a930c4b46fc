//! Serializes the output tree back to JSX source text.

use crate::{BinaryOp, Expr, JsxAttr, JsxAttrValue, JsxChild, JsxElement, PropKey, UnaryOp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Elements with element children are broken over indented lines.
    #[default]
    Pretty,
    /// Everything on a single line per top-level fragment.
    Compact,
}

/// Formatter settings. The defaults are single quotes and no semicolons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitOptions {
    pub quote: QuoteStyle,
    pub semi: bool,
    pub layout: Layout,
}

const INDENT: &str = "  ";

/// Emits a sequence of top-level fragments, one per line.
pub fn emit_program(fragments: &[JsxChild], opts: &EmitOptions) -> String {
    let mut out = String::new();
    for fragment in fragments {
        let mut p = Printer::new(opts);
        match fragment {
            JsxChild::Element(el) => {
                p.element(el);
                if opts.semi {
                    p.out.push(';');
                }
            }
            JsxChild::Text(t) => {
                let t = t.trim();
                if t.is_empty() {
                    continue;
                }
                p.jsx_text(t);
            }
            JsxChild::Expr(e) => {
                p.out.push('{');
                p.expr(e, 0);
                p.out.push('}');
            }
        }
        out.push_str(&p.out);
        out.push('\n');
    }
    out
}

/// Emits a single expression.
pub fn emit_expr(expr: &Expr, opts: &EmitOptions) -> String {
    let mut p = Printer::new(opts);
    p.expr(expr, 0);
    p.out
}

struct Printer<'o> {
    out: String,
    indent: usize,
    opts: &'o EmitOptions,
}

impl<'o> Printer<'o> {
    fn new(opts: &'o EmitOptions) -> Self {
        Self {
            out: String::new(),
            indent: 0,
            opts,
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str(INDENT);
        }
    }

    fn element(&mut self, el: &JsxElement) {
        self.out.push('<');
        self.out.push_str(&el.name);
        for attr in &el.attrs {
            self.out.push(' ');
            self.attr(attr);
        }
        if el.children.is_empty() {
            self.out.push_str(" />");
            return;
        }
        self.out.push('>');

        if self.opts.layout == Layout::Pretty && needs_block(el) {
            self.indent += 1;
            for child in &el.children {
                let JsxChild::Text(t) = child else {
                    self.newline();
                    self.child(child);
                    continue;
                };
                // JSX drops whitespace next to a line break, so edge
                // whitespace is spelled out as `{' '}`.
                if t.is_empty() {
                    continue;
                }
                let trimmed = t.trim();
                if trimmed.is_empty() {
                    self.newline();
                    self.space();
                    continue;
                }
                let lead = t.starts_with(char::is_whitespace);
                let trail = t.ends_with(char::is_whitespace);
                self.newline();
                if lead {
                    self.space();
                }
                self.jsx_text(trimmed);
                if trail {
                    self.space();
                }
            }
            self.indent -= 1;
            self.newline();
        } else {
            for child in &el.children {
                self.child(child);
            }
        }

        self.out.push_str("</");
        self.out.push_str(&el.name);
        self.out.push('>');
    }

    fn child(&mut self, child: &JsxChild) {
        match child {
            JsxChild::Element(el) => self.element(el),
            JsxChild::Text(t) => self.jsx_text(t),
            JsxChild::Expr(e) => {
                self.out.push('{');
                self.expr(e, 0);
                self.out.push('}');
            }
        }
    }

    fn attr(&mut self, attr: &JsxAttr) {
        self.out.push_str(&attr.name);
        match &attr.value {
            // JSX attribute strings cannot be escaped; a value holding both
            // quote kinds goes through an expression container instead.
            JsxAttrValue::Str(s) if s.contains('"') && s.contains('\'') => {
                self.out.push_str("={");
                self.string(s);
                self.out.push('}');
            }
            JsxAttrValue::Str(s) => {
                self.out.push('=');
                let q = if s.contains('"') { '\'' } else { '"' };
                self.out.push(q);
                self.out.push_str(s);
                self.out.push(q);
            }
            JsxAttrValue::Expr(e) => {
                self.out.push_str("={");
                self.expr(e, 0);
                self.out.push('}');
            }
        }
    }

    fn space(&mut self) {
        self.out.push('{');
        self.string(" ");
        self.out.push('}');
    }

    fn jsx_text(&mut self, t: &str) {
        for c in t.chars() {
            match c {
                '{' | '}' | '<' | '>' => {
                    self.out.push('{');
                    self.string(&c.to_string());
                    self.out.push('}');
                }
                _ => self.out.push(c),
            }
        }
    }

    fn string(&mut self, s: &str) {
        let (preferred, other) = match self.opts.quote {
            QuoteStyle::Single => ('\'', '"'),
            QuoteStyle::Double => ('"', '\''),
        };
        let q = if s.contains(preferred) && !s.contains(other) { other } else { preferred };
        self.out.push(q);
        for c in s.chars() {
            match c {
                '\\' => self.out.push_str("\\\\"),
                '\n' => self.out.push_str("\\n"),
                '\r' => self.out.push_str("\\r"),
                '\t' => self.out.push_str("\\t"),
                c if c == q => {
                    self.out.push('\\');
                    self.out.push(c);
                }
                _ => self.out.push(c),
            }
        }
        self.out.push(q);
    }

    /// Prints `e`, parenthesized when it binds weaker than `min_prec`.
    fn expr(&mut self, e: &Expr, min_prec: u8) {
        let parens = precedence(e) < min_prec;
        if parens {
            self.out.push('(');
        }
        self.expr_inner(e);
        if parens {
            self.out.push(')');
        }
    }

    fn expr_inner(&mut self, e: &Expr) {
        match e {
            Expr::Ident { name } => self.out.push_str(name),
            Expr::Null => self.out.push_str("null"),
            Expr::Bool { value } => self.out.push_str(if *value { "true" } else { "false" }),
            Expr::Num { raw } => self.out.push_str(raw),
            Expr::Str { value } => self.string(value),
            Expr::Array { elements } => {
                self.out.push('[');
                self.comma_list(elements);
                self.out.push(']');
            }
            Expr::Object { properties } => {
                if properties.is_empty() {
                    self.out.push_str("{}");
                    return;
                }
                self.out.push_str("{ ");
                for (i, prop) in properties.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    match &prop.key {
                        PropKey::Ident(k) | PropKey::Num(k) => self.out.push_str(k),
                        PropKey::Str(k) => self.string(k),
                    }
                    self.out.push_str(": ");
                    self.expr(&prop.value, PREC_ARROW);
                }
                self.out.push_str(" }");
            }
            Expr::Member {
                object,
                property,
                optional,
            } => {
                self.expr(object, PREC_POSTFIX);
                self.out.push_str(if *optional { "?." } else { "." });
                self.out.push_str(property);
            }
            Expr::Index { object, index } => {
                self.expr(object, PREC_POSTFIX);
                self.out.push('[');
                self.expr(index, 0);
                self.out.push(']');
            }
            Expr::Call { callee, args } => {
                self.expr(callee, PREC_POSTFIX);
                self.out.push('(');
                self.comma_list(args);
                self.out.push(')');
            }
            Expr::Unary { op, arg } => {
                self.out.push_str(match op {
                    UnaryOp::Not => "!",
                    UnaryOp::Neg => "-",
                    UnaryOp::Plus => "+",
                    UnaryOp::TypeOf => "typeof ",
                });
                // keep `- -a` from collapsing into `--a`
                if let Expr::Unary { op: inner, .. } = arg.as_ref() {
                    if matches!((op, inner), (UnaryOp::Neg, UnaryOp::Neg) | (UnaryOp::Plus, UnaryOp::Plus)) {
                        self.out.push(' ');
                    }
                }
                self.expr(arg, PREC_UNARY);
            }
            Expr::Binary { op, left, right } => {
                let prec = binary_precedence(*op);
                if mixes_nullish(*op, left) {
                    self.out.push('(');
                    self.expr(left, 0);
                    self.out.push(')');
                } else {
                    self.expr(left, prec);
                }
                self.out.push(' ');
                self.out.push_str(op.as_str());
                self.out.push(' ');
                if mixes_nullish(*op, right) {
                    self.out.push('(');
                    self.expr(right, 0);
                    self.out.push(')');
                } else {
                    self.expr(right, prec + 1);
                }
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                self.expr(test, PREC_CONDITIONAL + 1);
                self.out.push_str(" ? ");
                self.expr(consequent, PREC_CONDITIONAL);
                self.out.push_str(" : ");
                self.expr(alternate, PREC_CONDITIONAL);
            }
            Expr::Arrow { params, body } => {
                self.out.push('(');
                self.out.push_str(&params.join(", "));
                self.out.push_str(") => {");
                match self.opts.layout {
                    Layout::Pretty => {
                        self.indent += 1;
                        self.newline();
                        self.return_stmt(body);
                        self.indent -= 1;
                        self.newline();
                    }
                    Layout::Compact => {
                        self.out.push(' ');
                        self.return_stmt(body);
                        self.out.push(' ');
                    }
                }
                self.out.push('}');
            }
            Expr::Jsx(el) => self.element(el),
        }
    }

    fn return_stmt(&mut self, arg: &Expr) {
        self.out.push_str("return ");
        self.expr(arg, 0);
        if self.opts.semi {
            self.out.push(';');
        }
    }

    fn comma_list(&mut self, items: &[Expr]) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(item, PREC_ARROW);
        }
    }
}

const PREC_ARROW: u8 = 1;
const PREC_CONDITIONAL: u8 = 2;
const PREC_UNARY: u8 = 14;
const PREC_POSTFIX: u8 = 17;
const PREC_PRIMARY: u8 = 20;

fn binary_precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Nullish | BinaryOp::Or => 3,
        BinaryOp::And => 4,
        BinaryOp::StrictEq | BinaryOp::StrictNe | BinaryOp::Eq | BinaryOp::Ne => 8,
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 9,
        BinaryOp::Add | BinaryOp::Sub => 11,
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 12,
    }
}

fn precedence(e: &Expr) -> u8 {
    match e {
        Expr::Arrow { .. } => PREC_ARROW,
        Expr::Conditional { .. } => PREC_CONDITIONAL,
        Expr::Binary { op, .. } => binary_precedence(*op),
        Expr::Unary { .. } => PREC_UNARY,
        Expr::Member { .. } | Expr::Index { .. } | Expr::Call { .. } => PREC_POSTFIX,
        Expr::Ident { .. }
        | Expr::Null
        | Expr::Bool { .. }
        | Expr::Num { .. }
        | Expr::Str { .. }
        | Expr::Array { .. }
        | Expr::Object { .. }
        | Expr::Jsx(_) => PREC_PRIMARY,
    }
}

/// `??` may not be mixed with `||`/`&&` without parentheses.
fn mixes_nullish(parent: BinaryOp, child: &Expr) -> bool {
    let Expr::Binary { op: child, .. } = child else {
        return false;
    };
    let logical = |op: BinaryOp| matches!(op, BinaryOp::Or | BinaryOp::And);
    (parent == BinaryOp::Nullish && logical(*child)) || (logical(parent) && *child == BinaryOp::Nullish)
}

fn needs_block(el: &JsxElement) -> bool {
    el.children.iter().any(|c| match c {
        JsxChild::Element(_) => true,
        JsxChild::Expr(e) => contains_jsx(e),
        JsxChild::Text(_) => false,
    })
}

fn contains_jsx(e: &Expr) -> bool {
    match e {
        Expr::Jsx(_) => true,
        Expr::Arrow { body, .. } => contains_jsx(body),
        Expr::Conditional {
            test,
            consequent,
            alternate,
        } => contains_jsx(test) || contains_jsx(consequent) || contains_jsx(alternate),
        Expr::Call { callee, args } => contains_jsx(callee) || args.iter().any(contains_jsx),
        Expr::Binary { left, right, .. } => contains_jsx(left) || contains_jsx(right),
        Expr::Unary { arg, .. } => contains_jsx(arg),
        Expr::Member { object, .. } => contains_jsx(object),
        Expr::Index { object, index } => contains_jsx(object) || contains_jsx(index),
        Expr::Array { elements } => elements.iter().any(contains_jsx),
        Expr::Object { properties } => properties.iter().any(|p| contains_jsx(&p.value)),
        Expr::Ident { .. } | Expr::Null | Expr::Bool { .. } | Expr::Num { .. } | Expr::Str { .. } => false,
    }
}
