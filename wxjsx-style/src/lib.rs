use wxjsx_jsx::{Expr, ExprParseError, PropKey, Property, camelize, is_identifier, parse_expression};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// `12px`
    Literal(String),
    /// The inside of a value written exactly as `{{ expr }}`.
    Expression(String),
    /// Interpolation mixed with literal text, e.g. `#{{hex}}`. Kept verbatim.
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// camelCased property name, ready to be an object key.
    pub property: String,
    pub value: StyleValue,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InlineStyle {
    pub declarations: Vec<Declaration>,
    /// Segments that had no `:` and were dropped.
    pub skipped: Vec<String>,
}

/// Parses the value of a `style="..."` attribute.
///
/// Declarations keep their source order. Empty segments (e.g. after a
/// trailing `;`) are ignored.
pub fn parse_inline(css: &str) -> InlineStyle {
    let mut style = InlineStyle::default();
    for segment in css.trim().split(';') {
        if segment.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = segment.split_once(':') else {
            tracing::debug!(segment = segment.trim(), "style declaration without ':' dropped");
            style.skipped.push(segment.trim().to_string());
            continue;
        };
        let value = value.trim();
        style.declarations.push(Declaration {
            property: property_name(key.trim()),
            value: classify_value(value),
        });
    }
    style
}

/// `font-size` -> `fontSize`. Custom properties (`--main-color`) keep
/// their name, as React passes them through verbatim.
fn property_name(key: &str) -> String {
    if key.starts_with("--") {
        key.to_string()
    } else {
        camelize(key)
    }
}

fn classify_value(value: &str) -> StyleValue {
    if !value.contains("{{") {
        return StyleValue::Literal(value.to_string());
    }
    if let Some(inner) = value.strip_prefix("{{").and_then(|v| v.strip_suffix("}}")) {
        if !inner.contains("{{") && !inner.contains("}}") {
            return StyleValue::Expression(inner.trim().to_string());
        }
    }
    tracing::debug!(value, "unsupported interpolation in style value, kept as a string");
    StyleValue::Unsupported(value.to_string())
}

impl InlineStyle {
    /// Declarations whose value could only be kept as a literal string.
    pub fn unsupported(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations
            .iter()
            .filter(|d| matches!(d.value, StyleValue::Unsupported(_)))
    }

    /// Builds the `{ color: c, fontSize: '12px' }` object for a JSX `style` prop.
    pub fn into_object(self) -> Result<Expr, ExprParseError> {
        let mut properties = Vec::with_capacity(self.declarations.len());
        for decl in self.declarations {
            let value = match decl.value {
                StyleValue::Expression(src) => parse_expression(&src)?,
                StyleValue::Literal(s) | StyleValue::Unsupported(s) => Expr::Str { value: s },
            };
            let key = if is_identifier(&decl.property) {
                PropKey::Ident(decl.property)
            } else {
                PropKey::Str(decl.property)
            };
            properties.push(Property { key, value });
        }
        Ok(Expr::Object { properties })
    }
}
