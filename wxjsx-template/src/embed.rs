//! `{{ expr }}` handling for text content and attribute values.

use std::borrow::Cow;

use wxjsx_jsx::{Expr, JsxChild, parse_expression};

use crate::error::TransformResult;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// Text between the delimiters, untrimmed.
    Interpolation(&'a str),
}

/// Splits `a {{ b }} c` into literal and interpolation segments.
///
/// An unterminated `{{` and an empty `{{}}` stay literal text.
pub fn split_interpolations(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = text;
    let mut literal_start = 0;
    let mut consumed = 0;

    while let Some(open) = rest.find(OPEN) {
        let after_open = &rest[open + OPEN.len()..];
        let Some(close) = after_open.find(CLOSE) else {
            break;
        };
        if close == 0 {
            // `{{}}`: not an interpolation, skip past it
            let skip = open + OPEN.len() + CLOSE.len();
            consumed += skip;
            rest = &rest[skip..];
            continue;
        }
        let lit_end = consumed + open;
        if lit_end > literal_start {
            segments.push(Segment::Literal(&text[literal_start..lit_end]));
        }
        segments.push(Segment::Interpolation(&after_open[..close]));
        let skip = open + OPEN.len() + close + CLOSE.len();
        consumed += skip;
        literal_start = consumed;
        rest = &rest[skip..];
    }
    if literal_start < text.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

/// Removes one leading and one trailing quote, as pug keeps them in values.
pub fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix(['\'', '"']).unwrap_or(raw);
    raw.strip_suffix(['\'', '"']).unwrap_or(raw)
}

/// [`strip_quotes`], then drops the backslash of every escape:
/// `"it's \"x\""` becomes `it's "x"`.
pub fn unquote(raw: &str) -> Cow<'_, str> {
    let inner = strip_quotes(raw);
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next().unwrap_or('\\'));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Unquotes `raw` and drops every `{{`/`}}` pair, keeping what was
/// inside: `'{{ a }} && {{b}}'` becomes ` a  && b`.
pub fn strip_delimiters(raw: &str) -> String {
    split_interpolations(&unquote(raw))
        .into_iter()
        .map(|s| match s {
            Segment::Literal(t) | Segment::Interpolation(t) => t,
        })
        .collect()
}

/// Parses a directive or binding value such as `"{{list}}"` as an expression.
pub fn parse_embedded(raw: &str) -> TransformResult<Expr> {
    Ok(parse_expression(strip_delimiters(raw).trim())?)
}

/// Rewrites text content into literal text and expression holes.
pub fn embed_text(text: &str) -> TransformResult<Vec<JsxChild>> {
    split_interpolations(text)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(t) => Ok(JsxChild::Text(t.to_string())),
            Segment::Interpolation(src) => Ok(JsxChild::Expr(parse_expression(src.trim())?)),
        })
        .collect()
}
