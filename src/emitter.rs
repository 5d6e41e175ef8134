//! Recursive serializer: walks a [`JsonValue`] tree back to JSON text.

use std::fmt::Write as _;

use crate::value::{JsonType, JsonValue};

/// Serializes `value` to a compact JSON string.
pub fn to_json_string(value: &JsonValue<'_>) -> String {
    let mut out = String::new();
    write_value(value, &mut out, None, 0);
    out
}

/// Serializes `value` with `\n`/`\t` indentation, starting the root at
/// depth 1.
pub fn to_pretty_json_string(value: &JsonValue<'_>) -> String {
    let mut out = String::new();
    write_value(value, &mut out, Some("\t"), 1);
    out
}

fn write_value(value: &JsonValue<'_>, out: &mut String, indent: Option<&str>, depth: usize) {
    match value.kind() {
        JsonType::Empty => {}
        JsonType::Null => out.push_str("null"),
        JsonType::Boolean | JsonType::Integer | JsonType::Double => {
            out.push_str(&value.raw_str());
        }
        JsonType::String => {
            out.push('"');
            out.push_str(&value.raw_str());
            out.push('"');
        }
        JsonType::Array => write_array(value, out, indent, depth),
        JsonType::Object => write_object(value, out, indent, depth),
    }
}

fn write_array(value: &JsonValue<'_>, out: &mut String, indent: Option<&str>, depth: usize) {
    out.push('[');
    let mut first = true;
    value.for_each_array(|child| {
        if child.is_empty_value() {
            return;
        }
        if !first {
            out.push(',');
        }
        first = false;
        newline_indent(out, indent, depth);
        write_value(child, out, indent, depth + 1);
    });
    if !first {
        newline_indent(out, indent, depth.saturating_sub(1));
    }
    out.push(']');
}

fn write_object(value: &JsonValue<'_>, out: &mut String, indent: Option<&str>, depth: usize) {
    out.push('{');
    let mut first = true;
    value.for_each_object(|key, child| {
        if child.is_empty_value() {
            return;
        }
        if !first {
            out.push(',');
        }
        first = false;
        newline_indent(out, indent, depth);
        let _ = write!(out, "\"{}\":", key.as_str());
        if indent.is_some() {
            out.push(' ');
        }
        write_value(child, out, indent, depth + 1);
    });
    if !first {
        newline_indent(out, indent, depth.saturating_sub(1));
    }
    out.push('}');
}

fn newline_indent(out: &mut String, indent: Option<&str>, depth: usize) {
    if let Some(unit) = indent {
        out.push('\n');
        for _ in 0..depth {
            out.push_str(unit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn round_trips_through_parse() {
        let v = parse(br#"[1,2,3]"#).unwrap();
        v.push(JsonValue::from_str("x").deep_copy()).unwrap();
        let text = to_json_string(&v);
        let reparsed = parse(text.as_bytes()).unwrap();
        assert_eq!(reparsed.len(), 4);
        assert_eq!(reparsed.at(3).as_str().unwrap(), "x");
    }

    #[test]
    fn compact_object_emits_all_members_once() {
        let obj = JsonValue::new_object();
        obj.insert("x", JsonValue::from_bool(true)).unwrap();
        obj.insert("y", JsonValue::from_f64(3.5)).unwrap();
        let text = to_json_string(&obj);
        assert!(text.contains("\"x\":true"));
        assert!(text.contains("\"y\":3.5"));
    }

    #[test]
    fn empty_children_are_skipped() {
        let obj = JsonValue::new_object();
        obj.insert("present", JsonValue::from_i64(1)).unwrap();
        // `get` on a missing key returns Empty but is never inserted, so
        // there is nothing to skip here directly -- this asserts the
        // simpler invariant that only inserted members are emitted.
        let text = to_json_string(&obj);
        assert_eq!(text, "{\"present\":1}");
    }
}
