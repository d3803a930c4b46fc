use rstest::rstest;
use wxjsx_jsx::{EmitOptions, Layout};
use wxjsx_template::{Directive, compile_template_to_jsx, rewrite_name};

fn render(src: &str) -> String {
    let opts = EmitOptions {
        layout: Layout::Compact,
        ..Default::default()
    };
    compile_template_to_jsx(src, &opts).unwrap()
}

#[rstest]
#[case("@tap", "onTap")]
#[case("@click.sync", "onClick")]
#[case("@long-press", "onLongPress")]
#[case("@input.user.sync", "onInput")]
#[case("bindtap", "onTap")]
#[case("bindlongpress", "onLongpress")]
#[case(":value", "value")]
#[case(":model.sync", "model")]
#[case("class", "className")]
#[case("wx:key", "key")]
#[case("data-id", "dataId")]
#[case("-webkit-box", "WebkitBox")]
#[case("binding", "onIng")]
#[case("title", "title")]
fn prop_names(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(rewrite_name(source), expected);
}

#[rstest]
#[case("wx:for", Directive::Loop)]
#[case("wx:for-item", Directive::LoopItem)]
#[case("wx:for-index", Directive::LoopIndex)]
#[case("wx:if", Directive::If)]
#[case("wx:elif", Directive::Elif)]
#[case("wx:else", Directive::Else)]
#[case("wx:key", Directive::Key)]
#[case("@tap", Directive::Event)]
#[case("bindtap", Directive::Bind)]
#[case("style", Directive::Style)]
#[case(":value", Directive::OneWay)]
#[case("class", Directive::Plain)]
#[case("bind", Directive::Plain)]
fn classification(#[case] name: &str, #[case] expected: Directive) {
    assert_eq!(Directive::classify(name), expected);
}

#[rstest]
#[case("view(bindtap=\"onTap\")", "<View onTap=\"onTap\" />\n")]
#[case("view(:value=\"{{count}}\")", "<View value={count} />\n")]
#[case("view(:value=\"count + 1\")", "<View value={count + 1} />\n")]
#[case("view(data-id=\"7\")", "<View dataId=\"7\" />\n")]
#[case("view(@long-press=\"{{hold}}\")", "<View onLongPress={hold} />\n")]
#[case("view(@tap)", "<View onTap={true} />\n")]
#[case("view(hidden)", "<View hidden={true} />\n")]
#[case("view(class=\"a b\")", "<View className=\"a b\" />\n")]
#[case("view(title='say \"hi\"')", "<View title='say \"hi\"' />\n")]
#[case("view(wx:key=\"id\")", "<View key={id} />\n")]
#[case("image(src=\"{{url}}\")", "<Image src=\"{{url}}\" />\n")]
#[case(r#"view(title="it's \"x\"")"#, "<View title={'it\\'s \"x\"'} />\n")]
#[case(r#"view(alt='say \'hi\'')"#, "<View alt=\"say 'hi'\" />\n")]
#[case(r#"view(:label="{{ kind === \"a\" }}")"#, "<View label={kind === 'a'} />\n")]
fn rendered_attributes(#[case] src: &str, #[case] expected: &str) {
    assert_eq!(render(src), expected);
}

#[test]
fn attribute_order_is_preserved() {
    assert_eq!(
        render("view(b=\"1\" wx:if=\"{{x}}\" a=\"2\" @tap=\"{{t}}\")"),
        "{x ? <View b=\"1\" a=\"2\" onTap={t} /> : null}\n"
    );
}
