use pest::Parser;
use pest::iterators::Pair;

use crate::error::{TransformError, TransformResult};
use crate::template_ast::{Attribute, Block, Element, Node};

#[derive(pest_derive::Parser)]
#[grammar = "pug.pest"]
struct PugParser;

/// Indentation-based pug subset:
/// - `tag`, `tag.class#id`, `.class` (implicit `div`)
/// - attribute lists `(name="v", other='w' flag)`; values keep their quotes
/// - inline text (`span Hello`), piped text (`| Hello`), block expansion (`li: a`)
/// - `//` comments, including their indented bodies
pub fn parse_template_to_ast(input: &str) -> TransformResult<Block> {
    // Open elements, innermost last, with the indentation of their line.
    let mut stack: Vec<(usize, Element)> = Vec::new();
    let mut roots: Vec<Node> = Vec::new();
    let mut comment_indent: Option<usize> = None;

    fn push_child(stack: &mut [(usize, Element)], roots: &mut Vec<Node>, node: Node) {
        if let Some((_, el)) = stack.last_mut() {
            el.block.nodes.push(node);
        } else {
            roots.push(node);
        }
    }

    fn close_until(stack: &mut Vec<(usize, Element)>, roots: &mut Vec<Node>, indent: usize) {
        while stack.last().is_some_and(|(i, _)| *i >= indent) {
            if let Some((_, el)) = stack.pop() {
                push_child(stack, roots, Node::Element(el));
            }
        }
    }

    for (lineno, raw) in input.lines().enumerate() {
        let content = raw.trim_start_matches([' ', '\t']);
        if content.trim().is_empty() {
            continue;
        }
        let indent = raw.len() - content.len();
        let content = content.trim_end();

        if let Some(ci) = comment_indent {
            if indent > ci {
                continue;
            }
            comment_indent = None;
        }

        close_until(&mut stack, &mut roots, indent);

        let line = PugParser::parse(Rule::line, content)
            .map_err(|e| TransformError::Source {
                line: lineno + 1,
                message: e.to_string(),
            })?
            .next()
            .and_then(|p| p.into_inner().next())
            .ok_or_else(|| TransformError::Source {
                line: lineno + 1,
                message: "empty line".to_string(),
            })?;

        match line.as_rule() {
            Rule::comment => comment_indent = Some(indent),
            Rule::piped => {
                let text = line.into_inner().as_str();
                push_child(&mut stack, &mut roots, Node::text(text));
            }
            Rule::element => {
                // `a: b: c` opens all three at the same indentation.
                for el in parse_element_chain(line) {
                    stack.push((indent, el));
                }
            }
            _ => {}
        }
    }

    close_until(&mut stack, &mut roots, 0);
    Ok(Block { nodes: roots })
}

fn parse_element_chain(pair: Pair<Rule>) -> Vec<Element> {
    let mut chain = Vec::new();
    let mut next = Some(pair);
    while let Some(pair) = next.take() {
        let mut el = Element {
            name: "div".to_string(),
            attrs: Vec::new(),
            block: Block::default(),
        };
        for part in pair.into_inner() {
            match part.as_rule() {
                Rule::head => parse_head(part, &mut el),
                Rule::attr_list => {
                    for attr in part.into_inner() {
                        el.attrs.push(parse_attr(attr));
                    }
                }
                Rule::inline_text => {
                    let text = part.into_inner().as_str();
                    if !text.trim().is_empty() {
                        el.block.nodes.push(Node::text(text));
                    }
                }
                Rule::expansion => next = part.into_inner().next(),
                _ => {}
            }
        }
        chain.push(el);
    }
    chain
}

fn parse_head(head: Pair<Rule>, el: &mut Element) {
    let mut classes: Vec<&str> = Vec::new();
    for part in head.into_inner() {
        match part.as_rule() {
            Rule::tag_name => el.name = part.as_str().to_string(),
            Rule::class_short => classes.push(&part.as_str()[1..]),
            Rule::id_short => el
                .attrs
                .push(Attribute::text("id", format!("'{}'", &part.as_str()[1..]))),
            _ => {}
        }
    }
    if !classes.is_empty() {
        el.attrs
            .push(Attribute::text("class", format!("'{}'", classes.join(" "))));
    }
}

fn parse_attr(attr: Pair<Rule>) -> Attribute {
    // attr = attr_name ( "=" attr_value )?
    let mut inner = attr.into_inner();
    let name = inner.next().map(|p| p.as_str()).unwrap_or_default();
    match inner.next() {
        Some(value) => Attribute::text(name, value.as_str()),
        None => Attribute::flag(name),
    }
}
