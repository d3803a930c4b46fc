use wxjsx_template::{AttrValue, Attribute, Node, TransformError, parse_pug_json, parse_template_to_ast};

fn element(node: &Node) -> &wxjsx_template::Element {
    match node {
        Node::Element(el) => el,
        other => panic!("expected element, got {other:?}"),
    }
}

#[test]
fn parse_element_with_inline_text() {
    let ast = parse_template_to_ast("view Hello").unwrap();
    assert_eq!(ast.nodes, vec![Node::element("view", vec![], vec![Node::text("Hello")])]);
}

#[test]
fn parse_nesting_by_indentation() {
    let src = "view\n  text A\n  view\n    text B\ntext C\n";
    let ast = parse_template_to_ast(src).unwrap();
    assert_eq!(ast.nodes.len(), 2);
    let root = element(&ast.nodes[0]);
    assert_eq!(root.block.nodes.len(), 2);
    let inner = element(&root.block.nodes[1]);
    assert_eq!(inner.block.nodes, vec![Node::element("text", vec![], vec![Node::text("B")])]);
    assert_eq!(element(&ast.nodes[1]).name, "text");
}

#[test]
fn parse_attrs_keep_raw_quoted_values() {
    let ast = parse_template_to_ast(r#"view(wx:if="{{show}}", class='a b' hidden @tap="go")"#).unwrap();
    let el = element(&ast.nodes[0]);
    assert_eq!(
        el.attrs,
        vec![
            Attribute::text("wx:if", r#""{{show}}""#),
            Attribute::text("class", "'a b'"),
            Attribute::flag("hidden"),
            Attribute::text("@tap", r#""go""#),
        ]
    );
}

#[test]
fn parse_escaped_quotes_in_values() {
    let ast = parse_template_to_ast(r#"view(title="it's \"x\"" alt='a\'b')"#).unwrap();
    let el = element(&ast.nodes[0]);
    assert_eq!(
        el.attrs,
        vec![
            Attribute::text("title", r#""it's \"x\"""#),
            Attribute::text("alt", r"'a\'b'"),
        ]
    );
}

#[test]
fn parse_shorthand_class_and_id() {
    let ast = parse_template_to_ast(".card.big#main(data-x=1)").unwrap();
    let el = element(&ast.nodes[0]);
    assert_eq!(el.name, "div");
    assert_eq!(
        el.attrs,
        vec![
            Attribute::text("id", "'main'"),
            Attribute::text("class", "'card big'"),
            Attribute::text("data-x", "1"),
        ]
    );
}

#[test]
fn parse_block_expansion() {
    let ast = parse_template_to_ast("view: text(class=\"t\") Go\n  icon").unwrap();
    let view = element(&ast.nodes[0]);
    let text = element(&view.block.nodes[0]);
    assert_eq!(text.name, "text");
    // deeper lines nest under the innermost element of the expansion
    assert_eq!(text.block.nodes.len(), 2);
    assert_eq!(element(&text.block.nodes[1]).name, "icon");
}

#[test]
fn parse_piped_text_and_comments() {
    let src = "view\n  // note\n    still comment\n  | Hi {{name}}\n  //- hidden\n  text x";
    let ast = parse_template_to_ast(src).unwrap();
    let view = element(&ast.nodes[0]);
    assert_eq!(view.block.nodes.len(), 2);
    assert_eq!(view.block.nodes[0], Node::text("Hi {{name}}"));
}

#[test]
fn parse_error_reports_line() {
    let err = parse_template_to_ast("view\n  text(class=\"x\"").unwrap_err();
    match err {
        TransformError::Source { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn parse_pug_parser_json_shape() {
    let json = r#"{
        "type": "Block",
        "nodes": [
            {
                "type": "Tag",
                "name": "view",
                "selfClosing": false,
                "block": { "type": "Block", "nodes": [{ "type": "Text", "val": "Hi", "line": 1 }], "line": 1 },
                "attrs": [
                    { "name": "wx:if", "val": "'{{ok}}'", "mustEscape": true },
                    { "name": "hidden", "val": true, "mustEscape": false }
                ],
                "attributeBlocks": [],
                "isInline": false,
                "line": 1
            },
            { "type": "Comment", "val": " c", "buffer": true, "line": 2 }
        ],
        "line": 0
    }"#;
    let block = parse_pug_json(json).unwrap();
    assert_eq!(block.nodes.len(), 2);
    let el = element(&block.nodes[0]);
    assert_eq!(el.attrs[0].val, AttrValue::Text("'{{ok}}'".into()));
    assert_eq!(el.attrs[1].val, AttrValue::Flag(true));
    assert_eq!(block.nodes[1], Node::Other);
}

#[test]
fn invalid_json_is_an_error() {
    assert!(matches!(parse_pug_json("{ nope"), Err(TransformError::Json(_))));
}
