use lightning_json::{parse, JsonValue};

#[test]
fn large_array_of_objects_all_lookup_correctly() {
    let mut src = String::from("[");
    for i in 0..10_000 {
        if i > 0 {
            src.push(',');
        }
        src.push_str(&format!(r#"{{"id":{i}}}"#));
    }
    src.push(']');
    let doc = parse(src.as_bytes()).unwrap();
    assert_eq!(doc.len(), 10_000);
    assert_eq!(doc.at(9_999).get("id").as_i64().unwrap(), 9_999);
}

#[test]
fn refcount_matches_live_handle_count() {
    let v = JsonValue::from_i64(1);
    assert_eq!(v.strong_count(), 1);
    let a = v.clone();
    let b = v.clone();
    assert_eq!(v.strong_count(), 3);
    drop(a);
    assert_eq!(v.strong_count(), 2);
    drop(b);
    assert_eq!(v.strong_count(), 1);
}

#[test]
fn object_member_insertion_survives_many_collisions() {
    let obj = JsonValue::new_object();
    for i in 0..2_000 {
        obj.insert(&format!("key-{i}"), JsonValue::from_i64(i)).unwrap();
    }
    assert_eq!(obj.len(), 2_000);
    for i in 0..2_000 {
        assert_eq!(obj.get(&format!("key-{i}")).as_i64().unwrap(), i);
    }
}

#[test]
fn escape_unescape_round_trip_for_emitted_strings() {
    let doc = parse(br#"{"s":"tab\there\nand\\backslash"}"#).unwrap();
    let s = doc.get("s").as_str().unwrap();
    let reencoded = JsonValue::from_str(&s);
    assert_eq!(reencoded.as_str().unwrap(), s);
}
