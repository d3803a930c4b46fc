use rstest::rstest;
use wxjsx_jsx::{EmitOptions, emit_expr};
use wxjsx_style::{StyleValue, parse_inline};

#[test]
fn parses_literal_and_interpolated_declarations() {
    let style = parse_inline("color:{{c}};font-size:12px;");
    assert_eq!(style.declarations.len(), 2);
    assert_eq!(style.declarations[0].property, "color");
    assert_eq!(style.declarations[0].value, StyleValue::Expression("c".into()));
    assert_eq!(style.declarations[1].property, "fontSize");
    assert_eq!(style.declarations[1].value, StyleValue::Literal("12px".into()));
}

#[test]
fn builds_object_expression_in_source_order() {
    let obj = parse_inline("color:{{c}};font-size:12px;").into_object().unwrap();
    assert_eq!(emit_expr(&obj, &EmitOptions::default()), "{ color: c, fontSize: '12px' }");
}

#[test]
fn value_keeps_everything_after_first_colon() {
    let style = parse_inline("background: url(http://a.b/c.png)");
    assert_eq!(
        style.declarations[0].value,
        StyleValue::Literal("url(http://a.b/c.png)".into())
    );
}

#[test]
fn vendor_prefix_keeps_leading_capital() {
    let style = parse_inline("-webkit-line-clamp: 2");
    assert_eq!(style.declarations[0].property, "WebkitLineClamp");
}

#[rstest]
#[case("background:#{{itemDetail.bgColor}};")]
#[case("width: {{w}}px")]
#[case("margin: {{a}} {{b}}")]
fn mixed_interpolation_falls_back_to_literal(#[case] css: &str) {
    let style = parse_inline(css);
    assert_eq!(style.unsupported().count(), 1);
    let obj = style.into_object().unwrap();
    let out = emit_expr(&obj, &EmitOptions::default());
    assert!(out.contains("{{"), "literal value expected, got {out}");
}

#[test]
fn segments_without_colon_are_skipped() {
    let style = parse_inline("color: red; oops ; ;");
    assert_eq!(style.declarations.len(), 1);
    assert_eq!(style.skipped, vec!["oops".to_string()]);
}

#[test]
fn malformed_embedded_expression_is_an_error() {
    assert!(parse_inline("color: {{ a + }}").into_object().is_err());
}

#[rstest]
#[case("--main-color: red", "{ '--main-color': 'red' }")]
#[case("--gap: {{g}}; font-size: 1px", "{ '--gap': g, fontSize: '1px' }")]
fn custom_properties_become_string_keys(#[case] css: &str, #[case] expected: &str) {
    let obj = parse_inline(css).into_object().unwrap();
    assert_eq!(emit_expr(&obj, &EmitOptions::default()), expected);
}
