use saphyr::YamlLoader;

use super::*;

fn report_mapping() -> Mapping {
    let mut request = Mapping::new();
    request.add_text("Method", "GET");

    let mut mapping = Mapping::new();
    mapping
        .add_text("error_message", "Null reference")
        .add_sequence("backtrace", ["at Foo()", "at Bar()"])
        .add_map("request", request);
    mapping
}

#[test]
fn document_scenario() {
    let doc = Document::new(report_mapping().iter().cloned().collect());

    let expected = concat!(
        "---\r\n",
        "error_message: \"Null reference\"\r\n",
        "backtrace:\r\n",
        "  - \"at Foo()\"\r\n",
        "  - \"at Bar()\"\r\n",
        "request:\r\n",
        "  Method: \"GET\"\r\n",
    );
    assert_eq!(doc.render(), expected);
    assert_eq!(doc.to_string(), expected);
}

#[test]
fn empty_document() {
    let doc = Document::new(Vec::new());
    assert_eq!(doc.render(), "---\r\n");
}

#[test]
fn text_entry_is_trimmed_once() {
    let node = Node::Text(TextEntry::new("name", "  foo  "));
    let indent = Indent::new(INDENT_UNIT);

    let first = node.render(indent);
    let second = node.render(indent);
    assert_eq!(first, "name: \"foo\"\r\n");
    assert_eq!(first, second);
}

#[test]
fn sequence_items_are_trimmed() {
    let seq = SequenceEntry::new("lines", ["  one", "two  ", ""]);
    assert_eq!(seq.items(), ["one", "two", ""]);
}

#[test]
fn nested_maps_indent_one_unit_per_level() {
    let mut level3 = Mapping::new();
    level3.add_text("d", "x").add_sequence("e", ["y"]);
    let mut level2 = Mapping::new();
    level2.add_map("c", level3);
    let mut level1 = Mapping::new();
    level1.add_map("b", level2);

    let doc = Document::new(vec![Node::Map(MapEntry::new("a", level1))]);

    let expected = concat!(
        "---\r\n",
        "a:\r\n",
        "  b:\r\n",
        "    c:\r\n",
        "      d: \"x\"\r\n",
        "      e:\r\n",
        "        - \"y\"\r\n",
    );
    assert_eq!(doc.render(), expected);
}

#[test]
fn render_at_depth_does_not_prefix_first_line() {
    let mut inner = Mapping::new();
    inner.add_text("k", "v");
    let node = Node::Map(MapEntry::new("m", inner));

    let indent = Indent::new(INDENT_UNIT) + 2;
    assert_eq!(node.render(indent), "m:\r\n      k: \"v\"\r\n");
}

#[test]
fn empty_map_entry_renders_header_only() {
    let node = Node::Map(MapEntry::new("session", Mapping::new()));
    assert_eq!(node.render(Indent::new(INDENT_UNIT)), "session:\r\n");
}

#[test]
fn empty_sequence_renders_header_only() {
    let node = Node::Sequence(SequenceEntry::new("backtrace", Vec::<String>::new()));
    assert_eq!(node.render(Indent::new(INDENT_UNIT)), "backtrace:\r\n");
}

#[test]
fn duplicate_names_are_kept() {
    let mut mapping = Mapping::new();
    mapping.add_text("id", "1").add_text("id", "2");

    let names: Vec<&str> = mapping.iter().map(Node::name).collect();
    assert_eq!(names, ["id", "id"]);

    let doc = Document::new(mapping.iter().cloned().collect());
    assert_eq!(doc.render(), "---\r\nid: \"1\"\r\nid: \"2\"\r\n");
}

#[test]
fn indent_add_returns_deeper_copy() {
    let base = Indent::new("--");
    let deeper = base + 3;

    assert_eq!(base.depth(), 0);
    assert_eq!(base.to_string(), "");
    assert_eq!(deeper.depth(), 3);
    assert_eq!(deeper.to_string(), "------");
}

#[test]
fn scalars_are_escaped() {
    let node = Node::Text(TextEntry::new("msg", "say \"hi\"\\ now\r\nnext\tcol\u{7}"));
    assert_eq!(
        node.render(Indent::new(INDENT_UNIT)),
        "msg: \"say \\\"hi\\\"\\\\ now\\r\\nnext\\tcol\\u0007\"\r\n"
    );
}

#[test]
fn unusual_keys_are_quoted() {
    let mut mapping = Mapping::new();
    mapping
        .add_text("HTTP_USER_AGENT", "a")
        .add_text("route/path.v2-x", "b")
        .add_text("user: name", "c")
        .add_text("", "d")
        .add_text("-dash", "e");

    let doc = Document::new(mapping.iter().cloned().collect());
    let expected = concat!(
        "---\r\n",
        "HTTP_USER_AGENT: \"a\"\r\n",
        "route/path.v2-x: \"b\"\r\n",
        "\"user: name\": \"c\"\r\n",
        "\"\": \"d\"\r\n",
        "\"-dash\": \"e\"\r\n",
    );
    assert_eq!(doc.render(), expected);
}

#[test]
fn rendered_output_parses_as_yaml() {
    let mut request = Mapping::new();
    request
        .add_text("Method", "POST")
        .add_text("odd key: #1", "quote \" backslash \\ end")
        .add_map("Form", Mapping::new());

    let mut notice = Mapping::new();
    notice
        .add_text("error_message", "Action Error:\r\nfirst\r\nsecond")
        .add_sequence("backtrace", ["at \"Foo\"", "at Bar()"])
        .add_map("request", request);

    let doc = Document::new(vec![Node::Map(MapEntry::new("notice", notice))]);

    let docs = YamlLoader::load_from_str(&doc.render()).unwrap();
    assert_eq!(docs.len(), 1);

    let parsed = &docs[0]["notice"];
    assert_eq!(parsed["error_message"].as_str(), Some("Action Error:\r\nfirst\r\nsecond"));
    assert_eq!(parsed["backtrace"][0].as_str(), Some("at \"Foo\""));
    assert_eq!(parsed["backtrace"][1].as_str(), Some("at Bar()"));
    assert_eq!(parsed["request"]["Method"].as_str(), Some("POST"));
    assert_eq!(
        parsed["request"]["odd key: #1"].as_str(),
        Some("quote \" backslash \\ end")
    );
    assert!(parsed["request"]["Form"].is_null());
}
