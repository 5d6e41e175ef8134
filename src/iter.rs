//! Polymorphic iteration over array elements or object values.

use crate::value::JsonValue;

enum Inner<'a> {
    Array(std::vec::IntoIter<JsonValue<'a>>),
    Object(std::vec::IntoIter<JsonValue<'a>>),
    None,
}

/// Iterates the children of an array or object handle, yielding each
/// child's handle (with its key already attached, for objects). Iterating
/// a scalar or `Empty` handle yields nothing.
pub struct ChildIter<'a> {
    inner: Inner<'a>,
}

impl<'a> ChildIter<'a> {
    pub(crate) fn new(value: &JsonValue<'a>) -> Self {
        if value.is_array() {
            let mut items = Vec::with_capacity(value.len());
            value.for_each_array(|c| items.push(c.clone()));
            ChildIter {
                inner: Inner::Array(items.into_iter()),
            }
        } else if value.is_object() {
            let mut items = Vec::with_capacity(value.len());
            value.for_each_object(|_, c| items.push(c.clone()));
            ChildIter {
                inner: Inner::Object(items.into_iter()),
            }
        } else {
            ChildIter { inner: Inner::None }
        }
    }
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = JsonValue<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Array(it) | Inner::Object(it) => it.next(),
            Inner::None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::value::JsonValue;

    #[test]
    fn iterates_array_elements_in_order() {
        let arr = JsonValue::new_array();
        for i in 0..5 {
            arr.push(JsonValue::from_i64(i)).unwrap();
        }
        let collected: Vec<i64> = arr.iter().map(|v| v.as_i64().unwrap()).collect();
        assert_eq!(collected, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn iterates_object_values_with_keys() {
        let obj = JsonValue::new_object();
        obj.insert("a", JsonValue::from_i64(1)).unwrap();
        obj.insert("b", JsonValue::from_i64(2)).unwrap();
        let mut pairs: Vec<(String, i64)> =
            obj.iter().map(|v| (v.key().to_string(), v.as_i64().unwrap())).collect();
        pairs.sort();
        assert_eq!(pairs, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    }

    #[test]
    fn iterating_a_scalar_yields_nothing() {
        let v = JsonValue::from_i64(5);
        assert_eq!(v.iter().count(), 0);
    }
}
