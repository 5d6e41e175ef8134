use lightning_json::{parse, to_json_string, JsonValue};

#[test]
fn insert_then_emit_contains_every_member_once() {
    let obj = JsonValue::new_object();
    obj.insert("x", JsonValue::from_bool(true)).unwrap();
    obj.insert("y", JsonValue::from_f64(3.5)).unwrap();
    let text = to_json_string(&obj);
    assert!(text.contains("\"x\":true"));
    assert!(text.contains("\"y\":3.5"));
    assert_eq!(obj.len(), 2);
}

#[test]
fn duplicate_insert_keeps_first_value() {
    let obj = JsonValue::new_object();
    obj.insert("x", JsonValue::from_i64(1)).unwrap();
    obj.insert("x", JsonValue::from_i64(2)).unwrap();
    assert_eq!(obj.get("x").as_i64().unwrap(), 1);
    assert_eq!(obj.len(), 1);
}

#[test]
fn push_onto_array_then_round_trip_through_parse() {
    let arr = parse(b"[1, 2, 3]").unwrap();
    arr.push(JsonValue::from_str("x").deep_copy()).unwrap();
    let text = to_json_string(&arr);
    let reparsed = parse(text.as_bytes()).unwrap();
    assert_eq!(reparsed.len(), 4);
    assert_eq!(reparsed.at(0).as_i64().unwrap(), 1);
    assert_eq!(reparsed.at(3).as_str().unwrap(), "x");
}

#[test]
fn push_on_non_array_is_an_error() {
    let obj = JsonValue::new_object();
    assert!(obj.push(JsonValue::from_i64(1)).is_err());
}

#[test]
fn insert_on_non_object_is_an_error() {
    let arr = JsonValue::new_array();
    assert!(arr.insert("k", JsonValue::from_i64(1)).is_err());
}

#[test]
fn deep_copy_survives_source_buffer_drop() {
    let detached = {
        let src = br#"{"a":[1,2,3]}"#.to_vec();
        let doc = parse(&src).unwrap();
        doc.deep_copy()
    };
    assert_eq!(detached.get("a").at(2).as_i64().unwrap(), 3);
}
