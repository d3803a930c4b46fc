//! The directive-resolution pass: walks the input tree and builds JSX.

use wxjsx_jsx::{Expr, JsxChild, JsxElement, arrow, bool_lit, call, capitalize, conditional, member};

use crate::attrs::{ELIF, ELSE, FOR, FOR_INDEX, FOR_ITEM, IF, rewrite_attrs, split_directive};
use crate::cursor::Cursor;
use crate::embed::{embed_text, parse_embedded, strip_quotes};
use crate::error::{Diagnostic, TransformError, TransformResult};
use crate::template_ast::{AttrValue, Attribute, Block, Element, Node};

const TAG_MAP: &[(&str, &str)] = &[
    ("view", "View"),
    ("text", "Text"),
    ("icon", "Icon"),
    ("image", "Image"),
    ("textarea", "Textarea"),
];

const DEFAULT_ITEM: &str = "item";
const DEFAULT_INDEX: &str = "index";

/// Mini-program tags map to their component names; anything else is treated
/// as a user component and capitalized.
pub fn resolve_tag(name: &str) -> String {
    TAG_MAP
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| capitalize(name))
}

/// Result of a successful pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub fragments: Vec<JsxChild>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs the pass over a whole template.
pub fn transform_block(block: Block) -> TransformResult<Conversion> {
    let mut transformer = Transformer::default();
    let fragments = transformer.walk(block)?;
    tracing::debug!(
        fragments = fragments.len(),
        diagnostics = transformer.diagnostics.len(),
        "template transformed"
    );
    Ok(Conversion {
        fragments,
        diagnostics: transformer.diagnostics,
    })
}

#[derive(Debug, Default)]
struct Transformer {
    diagnostics: Vec<Diagnostic>,
}

impl Transformer {
    /// Transforms one sibling list. Nodes consumed by a conditional chain
    /// produce no fragment of their own.
    fn walk(&mut self, block: Block) -> TransformResult<Vec<JsxChild>> {
        let mut cursor = Cursor::new(block.nodes);
        let mut out = Vec::new();
        while let Some(node) = cursor.next() {
            match node {
                Node::Text { val } => out.extend(embed_text(&val)?),
                Node::Element(el) => out.push(self.dispatch(el, &mut cursor)?),
                Node::Other => tracing::debug!("skipping unsupported node"),
            }
        }
        Ok(out)
    }

    fn dispatch(&mut self, el: Element, cursor: &mut Cursor) -> TransformResult<JsxChild> {
        let (attrs, test) = split_directive(el.attrs, IF);
        let el = Element { attrs, ..el };
        if let Some(test) = test {
            let chain = self.build_chain(el, test, cursor)?;
            return Ok(JsxChild::Expr(chain));
        }
        let el = self.strip_conditionals(el);
        self.desugar_loop(el)
    }

    /// Builds `test ? consequent : alternate` for an `wx:if`/`wx:elif` node,
    /// pulling the rest of the chain from `cursor`.
    fn build_chain(
        &mut self,
        el: Element,
        test: Attribute,
        cursor: &mut Cursor,
    ) -> TransformResult<Expr> {
        let test = directive_expr(test)?;
        let el = self.strip_conditionals(el);
        let consequent = self.desugar_loop(el)?.into_expr();
        let alternate = match cursor.next_if_continues_chain() {
            Some(Node::Element(next)) => self.continue_chain(next, cursor)?,
            _ => Expr::Null,
        };
        Ok(conditional(test, consequent, alternate))
    }

    /// Resolves a sibling the lookahead handed to the chain: `wx:elif` nests
    /// another ternary, `wx:else` ends the chain.
    fn continue_chain(&mut self, el: Element, cursor: &mut Cursor) -> TransformResult<Expr> {
        let (attrs, elif) = split_directive(el.attrs, ELIF);
        let el = Element { attrs, ..el };
        if let Some(test) = elif {
            return self.build_chain(el, test, cursor);
        }
        let (attrs, _) = split_directive(el.attrs, ELSE);
        let el = self.strip_conditionals(Element { attrs, ..el });
        Ok(self.desugar_loop(el)?.into_expr())
    }

    /// Removes conditional directives that have nothing left to attach to.
    fn strip_conditionals(&mut self, mut el: Element) -> Element {
        for directive in [IF, ELIF, ELSE] {
            let (attrs, stray) = split_directive(el.attrs, directive);
            el.attrs = attrs;
            if stray.is_some() {
                Diagnostic::StrayConditional {
                    element: el.name.clone(),
                    directive: directive.to_string(),
                }
                .report(&mut self.diagnostics);
            }
        }
        el
    }

    /// Rewrites a `wx:for` node into `{list.map((item, index) => { return <El/> })}`;
    /// nodes without one render as plain elements.
    fn desugar_loop(&mut self, el: Element) -> TransformResult<JsxChild> {
        let (attrs, list) = split_directive(el.attrs, FOR);
        let (attrs, item) = split_directive(attrs, FOR_ITEM);
        let (attrs, index) = split_directive(attrs, FOR_INDEX);
        let el = Element { attrs, ..el };

        let Some(list) = list else {
            for alias in [item, index].into_iter().flatten() {
                Diagnostic::StrayLoopAlias {
                    element: el.name.clone(),
                    directive: alias.name,
                }
                .report(&mut self.diagnostics);
            }
            return Ok(JsxChild::Element(self.render_element(el)?));
        };

        let collection = match list.val {
            AttrValue::Text(raw) => parse_embedded(&raw)?,
            AttrValue::Flag(_) => {
                return Err(TransformError::MissingDirectiveValue {
                    element: el.name,
                    directive: FOR.to_string(),
                });
            }
        };
        let params = vec![
            binding_name(item, DEFAULT_ITEM),
            binding_name(index, DEFAULT_INDEX),
        ];
        let body = JsxChild::Element(self.render_element(el)?).into_expr();
        Ok(JsxChild::Expr(call(
            member(collection, "map"),
            vec![arrow(params, body)],
        )))
    }

    fn render_element(&mut self, el: Element) -> TransformResult<JsxElement> {
        let children = self.walk(el.block)?;
        let attrs = rewrite_attrs(&el.name, el.attrs, &mut self.diagnostics)?;
        Ok(JsxElement {
            name: resolve_tag(&el.name),
            attrs,
            children,
        })
    }
}

/// A bare `wx:if` (no value) is always true.
fn directive_expr(attr: Attribute) -> TransformResult<Expr> {
    match attr.val {
        AttrValue::Text(raw) => parse_embedded(&raw),
        AttrValue::Flag(value) => Ok(bool_lit(value)),
    }
}

fn binding_name(alias: Option<Attribute>, default: &str) -> String {
    match alias.map(|a| a.val) {
        Some(AttrValue::Text(raw)) if !strip_quotes(&raw).trim().is_empty() => {
            strip_quotes(&raw).trim().to_string()
        }
        _ => default.to_string(),
    }
}
