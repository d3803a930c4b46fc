//! Directive classification and attribute rewriting.

use wxjsx_jsx::{JsxAttr, attr_expr, attr_str, bool_lit, camelize, capitalize, ident};
use wxjsx_style::parse_inline;

use crate::embed::{parse_embedded, strip_delimiters, unquote};
use crate::error::{Diagnostic, TransformResult};
use crate::template_ast::{AttrValue, Attribute};

pub const FOR: &str = "wx:for";
pub const FOR_ITEM: &str = "wx:for-item";
pub const FOR_INDEX: &str = "wx:for-index";
pub const IF: &str = "wx:if";
pub const ELIF: &str = "wx:elif";
pub const ELSE: &str = "wx:else";
pub const KEY: &str = "wx:key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Loop,
    LoopItem,
    LoopIndex,
    If,
    Elif,
    Else,
    /// `@tap`, `@click.sync`
    Event,
    /// `bindtap`; the value is a handler name, not an expression.
    Bind,
    /// `:value`
    OneWay,
    Key,
    Style,
    Plain,
}

impl Directive {
    pub fn classify(name: &str) -> Self {
        match name {
            FOR => Self::Loop,
            FOR_ITEM => Self::LoopItem,
            FOR_INDEX => Self::LoopIndex,
            IF => Self::If,
            ELIF => Self::Elif,
            ELSE => Self::Else,
            KEY => Self::Key,
            "style" => Self::Style,
            _ if name.starts_with('@') => Self::Event,
            _ if bind_event(name).is_some() => Self::Bind,
            _ if name.starts_with(':') => Self::OneWay,
            _ => Self::Plain,
        }
    }

    /// Directives consumed by the pass itself, never rendered as props.
    pub fn is_control(self) -> bool {
        matches!(
            self,
            Self::Loop | Self::LoopItem | Self::LoopIndex | Self::If | Self::Elif | Self::Else
        )
    }
}

/// Splits every attribute called `name` out of `attrs`.
///
/// Returns the remaining attributes in their original order together with the
/// first removed one.
pub fn split_directive(attrs: Vec<Attribute>, name: &str) -> (Vec<Attribute>, Option<Attribute>) {
    let mut consumed = None;
    let mut remaining = Vec::with_capacity(attrs.len());
    for attr in attrs {
        if attr.name == name {
            if consumed.is_none() {
                consumed = Some(attr);
            }
        } else {
            remaining.push(attr);
        }
    }
    (remaining, consumed)
}

/// `bindtap` -> `Some("tap")`. The remainder must start with a lowercase letter.
fn bind_event(name: &str) -> Option<&str> {
    name.strip_prefix("bind")
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_lowercase()))
}

/// Drops `.sync`, `.user` and any other `.modifier` suffix.
fn strip_modifiers(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Computes the JSX prop name for a source attribute name.
pub fn rewrite_name(name: &str) -> String {
    let renamed = if let Some(event) = name.strip_prefix('@') {
        format!("on{}", capitalize(strip_modifiers(event)))
    } else if let Some(prop) = name.strip_prefix(':') {
        strip_modifiers(prop).to_string()
    } else if let Some(event) = bind_event(name) {
        format!("on{}", capitalize(event))
    } else if name == "class" {
        "className".to_string()
    } else if name == KEY {
        "key".to_string()
    } else {
        name.to_string()
    };
    camelize(&renamed)
}

/// Rewrites the attributes left on an element. Control directives never
/// become props; any still present are dropped.
pub fn rewrite_attrs(
    element: &str,
    attrs: Vec<Attribute>,
    diagnostics: &mut Vec<Diagnostic>,
) -> TransformResult<Vec<JsxAttr>> {
    let mut out = Vec::with_capacity(attrs.len());
    for attr in attrs {
        let directive = Directive::classify(&attr.name);
        if directive.is_control() {
            tracing::debug!(element, attr = %attr.name, "control directive dropped");
            continue;
        }
        out.push(rewrite_attr(element, directive, attr, diagnostics)?);
    }
    Ok(out)
}

fn rewrite_attr(
    element: &str,
    directive: Directive,
    attr: Attribute,
    diagnostics: &mut Vec<Diagnostic>,
) -> TransformResult<JsxAttr> {
    let name = rewrite_name(&attr.name);
    let raw = match attr.val {
        AttrValue::Flag(value) => return Ok(attr_expr(name, bool_lit(value))),
        AttrValue::Text(raw) => raw,
    };

    Ok(match directive {
        Directive::Event | Directive::OneWay => attr_expr(name, parse_embedded(&raw)?),
        Directive::Key => attr_expr(name, ident(strip_delimiters(&raw).trim())),
        Directive::Style => return rewrite_style(element, name, &raw, diagnostics),
        Directive::Bind
        | Directive::Plain
        | Directive::Loop
        | Directive::LoopItem
        | Directive::LoopIndex
        | Directive::If
        | Directive::Elif
        | Directive::Else => attr_str(name, unquote(&raw)),
    })
}

fn rewrite_style(
    element: &str,
    name: String,
    raw: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> TransformResult<JsxAttr> {
    let style = parse_inline(&unquote(raw));
    for decl in style.unsupported() {
        if let wxjsx_style::StyleValue::Unsupported(value) = &decl.value {
            Diagnostic::UnsupportedStyleSyntax {
                element: element.to_string(),
                property: decl.property.clone(),
                value: value.clone(),
            }
            .report(diagnostics);
        }
    }
    for segment in &style.skipped {
        Diagnostic::MalformedStyleDeclaration {
            element: element.to_string(),
            segment: segment.clone(),
        }
        .report(diagnostics);
    }
    Ok(attr_expr(name, style.into_object()?))
}
