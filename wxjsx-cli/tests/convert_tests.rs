use std::fs;
use std::path::PathBuf;

use wxjsx_cli::{EmitMode, Input, InputFormat, convert_cmd, convert_source, render};
use wxjsx_jsx::{EmitOptions, Layout, QuoteStyle};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn compact() -> EmitOptions {
    EmitOptions {
        layout: Layout::Compact,
        ..Default::default()
    }
}

#[test]
fn cli_convert_writes_jsx_file() {
    let out_dir = tempfile::tempdir().expect("temp dir");
    let input = Input::from(fixture("app.pug"));

    let written = convert_cmd(&input, Some(out_dir.path()), InputFormat::Pug, EmitMode::Jsx, &compact())
        .expect("convert pug");

    let out_file = out_dir.path().join("app.jsx");
    assert_eq!(written.as_deref(), Some(out_file.as_path()));
    let content = fs::read_to_string(&out_file).expect("read jsx output");
    assert_eq!(
        content,
        "<View className=\"page\">{orders.length === 0 ? <View>No orders</View> : <View className=\"list\">\
         {orders.map((order, index) => { return <View className=\"row\" key={order.id} onTap=\"onOpen\">\
         <Text>{order.title}</Text></View> })}</View>}</View>\n"
    );
}

#[test]
fn cli_convert_pretty_output() {
    let out_dir = tempfile::tempdir().expect("temp dir");
    let input = Input::from(fixture("app.pug"));

    convert_cmd(
        &input,
        Some(out_dir.path()),
        InputFormat::Pug,
        EmitMode::Jsx,
        &EmitOptions::default(),
    )
    .expect("convert pug");

    let content = fs::read_to_string(out_dir.path().join("app.jsx")).expect("read jsx output");
    assert!(content.starts_with("<View className=\"page\">\n  {orders.length === 0 ? "));
    assert!(content.contains("\n      return <View className=\"row\""));
    assert!(content.ends_with("</View>\n"));
}

#[test]
fn cli_convert_json_ast() {
    let out_dir = tempfile::tempdir().expect("temp dir");
    let input = Input::from(fixture("app.json"));

    convert_cmd(&input, Some(out_dir.path()), InputFormat::Json, EmitMode::Jsx, &compact())
        .expect("convert json");

    let content = fs::read_to_string(out_dir.path().join("app.jsx")).expect("read jsx output");
    assert_eq!(content, "<View onTap={greet}>Hi {name}</View>\n");
}

#[test]
fn cli_convert_emits_tree() {
    let out_dir = tempfile::tempdir().expect("temp dir");
    let input = Input::from(fixture("app.json"));

    convert_cmd(&input, Some(out_dir.path()), InputFormat::Json, EmitMode::Tree, &compact())
        .expect("convert json");

    let content = fs::read_to_string(out_dir.path().join("app.json")).expect("read tree output");
    let tree: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(tree[0]["type"], "Element");
    assert_eq!(tree[0]["value"]["name"], "View");
    assert_eq!(tree[0]["value"]["attrs"][0]["name"], "onTap");
}

#[test]
fn quote_and_semicolon_options() {
    let conversion = convert_source("view(style=\"width:10px\")", InputFormat::Pug).expect("convert");
    let opts = EmitOptions {
        quote: QuoteStyle::Double,
        semi: true,
        layout: Layout::Compact,
    };
    let out = render(&conversion, EmitMode::Jsx, &opts).expect("render");
    assert_eq!(out, "<View style={{ width: \"10px\" }} />;\n");
}

#[test]
fn dash_reads_stdin() {
    assert_eq!(Input::from(PathBuf::from("-")), Input::Stdin);
    assert_eq!(
        Input::from(PathBuf::from("a.pug")),
        Input::Path(PathBuf::from("a.pug"))
    );
}

#[test]
fn conversion_errors_carry_context() {
    let dir = tempfile::tempdir().expect("temp dir");
    let bad = dir.path().join("bad.pug");
    fs::write(&bad, "view(wx:if=\"{{a +}}\") X\n").expect("write fixture");

    let err = convert_cmd(&Input::from(bad), None, InputFormat::Pug, EmitMode::Jsx, &compact())
        .expect_err("malformed expression");
    let msg = format!("{err:#}");
    assert!(msg.contains("failed to convert"), "{msg}");
    assert!(msg.contains("malformed expression `a +`"), "{msg}");
}

#[test]
fn missing_input_is_reported() {
    let err = convert_cmd(
        &Input::from(PathBuf::from("does/not/exist.pug")),
        None,
        InputFormat::Pug,
        EmitMode::Jsx,
        &compact(),
    )
    .expect_err("missing file");
    assert!(err.to_string().contains("failed to read"));
}
