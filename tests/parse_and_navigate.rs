use lightning_json::parse;

#[test]
fn reads_flat_object_member() {
    let doc = parse(br#"{"a":1,"b":[2,3]}"#).unwrap();
    assert_eq!(doc.get("a").as_i64().unwrap(), 1);
}

#[test]
fn reads_nested_array_element() {
    let doc = parse(br#"{"a":1,"b":[2,3]}"#).unwrap();
    assert_eq!(doc.get("b").at(1).as_i64().unwrap(), 3);
}

#[test]
fn decodes_escaped_string_on_read() {
    let doc = parse(br#"{"name":"line1\nline2"}"#).unwrap();
    assert_eq!(doc.get("name").as_str().unwrap(), "line1\nline2");
}

#[test]
fn decodes_multibyte_utf8() {
    let doc = parse("{\"k\":\"\u{e9}\"}".as_bytes()).unwrap();
    assert_eq!(doc.get("k").as_str().unwrap().as_bytes(), [0xC3, 0xA9]);
}

#[test]
fn missing_member_reads_as_empty() {
    let doc = parse(br#"{"a":1}"#).unwrap();
    assert!(doc.get("missing").is_empty_value());
}

#[test]
fn out_of_range_index_reads_as_empty() {
    let doc = parse(br#"[1,2,3]"#).unwrap();
    assert!(doc.at(10).is_empty_value());
}
