//! The value tree: [`JsonType`], the shared [`Holder`] cell, and the
//! user-facing [`JsonValue`] handle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::codec;
use crate::error::{JsonError, Result};
use crate::map::DisplaceMap;
use crate::string_view::StringData;

/// The closed set of JSON value kinds, plus the in-band `Empty` sentinel
/// used to signal "this lookup found nothing."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Empty,
    Null,
    Integer,
    Double,
    Boolean,
    String,
    Array,
    Object,
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonType::Empty => "empty",
            JsonType::Null => "null",
            JsonType::Integer => "integer",
            JsonType::Double => "double",
            JsonType::Boolean => "boolean",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        };
        f.write_str(name)
    }
}

enum Children<'a> {
    None,
    Array(Vec<JsonValue<'a>>),
    Object(DisplaceMap<StringData<'a>, JsonValue<'a>>),
}

struct Holder<'a> {
    kind: JsonType,
    raw: StringData<'a>,
    children: Children<'a>,
}

impl<'a> Holder<'a> {
    fn empty() -> Self {
        Holder {
            kind: JsonType::Empty,
            raw: StringData::EMPTY,
            children: Children::None,
        }
    }

    fn scalar(kind: JsonType, raw: StringData<'a>) -> Self {
        Holder {
            kind,
            raw,
            children: Children::None,
        }
    }

    fn array() -> Self {
        Holder {
            kind: JsonType::Array,
            raw: StringData::EMPTY,
            children: Children::Array(Vec::new()),
        }
    }

    fn object() -> Self {
        Holder {
            kind: JsonType::Object,
            raw: StringData::EMPTY,
            children: Children::Object(DisplaceMap::new()),
        }
    }
}

/// A reference-counted handle into the value tree.
///
/// Cloning a `JsonValue` is a refcount bump (`Rc::clone`), not a deep copy --
/// see [`shallow_copy`](Self::shallow_copy) and [`deep_copy`](Self::deep_copy)
/// for the tree-copy operations. The type is intentionally `!Send`/`!Sync`:
/// a single tree is meant to be owned and mutated by one thread.
#[derive(Clone)]
pub struct JsonValue<'a> {
    key: StringData<'a>,
    inner: Rc<RefCell<Holder<'a>>>,
    strict: bool,
}

thread_local! {
    static SHARED_EMPTY: Rc<RefCell<Holder<'static>>> = Rc::new(RefCell::new(Holder::empty()));
}

impl<'a> JsonValue<'a> {
    fn from_holder(holder: Holder<'a>, strict: bool) -> Self {
        JsonValue {
            key: StringData::EMPTY,
            inner: Rc::new(RefCell::new(holder)),
            strict,
        }
    }

    /// The shared, read-only `Empty` sentinel returned by lookups that find
    /// nothing. Cheap to produce; never the target of a mutation.
    pub fn empty() -> JsonValue<'static> {
        SHARED_EMPTY.with(|rc| JsonValue {
            key: StringData::EMPTY,
            inner: rc.clone(),
            strict: false,
        })
    }

    pub(crate) fn new_scalar(kind: JsonType, raw: StringData<'a>, strict: bool) -> Self {
        Self::from_holder(Holder::scalar(kind, raw), strict)
    }

    pub fn new_array() -> Self {
        Self::from_holder(Holder::array(), false)
    }

    pub fn new_object() -> Self {
        Self::from_holder(Holder::object(), false)
    }

    pub fn new_null() -> Self {
        Self::from_holder(Holder::scalar(JsonType::Null, StringData::EMPTY), false)
    }

    pub fn from_bool(b: bool) -> Self {
        let raw = if b { "true" } else { "false" };
        Self::from_holder(
            Holder::scalar(JsonType::Boolean, StringData::owned(raw.as_bytes().to_vec())),
            false,
        )
    }

    pub fn from_i64(v: i64) -> Self {
        Self::from_holder(
            Holder::scalar(JsonType::Integer, StringData::owned(v.to_string().into_bytes())),
            false,
        )
    }

    pub fn from_f64(v: f64) -> Self {
        Self::from_holder(
            Holder::scalar(JsonType::Double, StringData::owned(v.to_string().into_bytes())),
            false,
        )
    }

    pub fn from_str(s: &str) -> JsonValue<'static> {
        JsonValue::from_holder(
            Holder::scalar(JsonType::String, StringData::owned(codec::escape(s.as_bytes()))),
            false,
        )
    }

    pub fn kind(&self) -> JsonType {
        self.inner.borrow().kind
    }

    pub fn is_empty_value(&self) -> bool {
        self.kind() == JsonType::Empty
    }
    pub fn is_null(&self) -> bool {
        self.kind() == JsonType::Null
    }
    pub fn is_array(&self) -> bool {
        self.kind() == JsonType::Array
    }
    pub fn is_object(&self) -> bool {
        self.kind() == JsonType::Object
    }
    pub fn is_string(&self) -> bool {
        self.kind() == JsonType::String
    }
    pub fn is_number(&self) -> bool {
        matches!(self.kind(), JsonType::Integer | JsonType::Double)
    }
    pub fn is_boolean(&self) -> bool {
        self.kind() == JsonType::Boolean
    }

    /// The key this handle was looked up or inserted under. Empty for
    /// array elements and for the root of a parsed document.
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    fn check_type(&self, expected: JsonType) -> Result<()> {
        let found = self.kind();
        if self.strict && found != expected {
            return Err(JsonError::TypeMismatch { expected, found });
        }
        Ok(())
    }

    pub fn as_i64(&self) -> Result<i64> {
        self.check_type(JsonType::Integer)?;
        Ok(codec::parse_i64(self.inner.borrow().raw.as_bytes()))
    }

    pub fn as_u64(&self) -> Result<u64> {
        self.check_type(JsonType::Integer)?;
        Ok(codec::parse_u64(self.inner.borrow().raw.as_bytes()))
    }

    pub fn as_f64(&self) -> Result<f64> {
        if self.strict && !matches!(self.kind(), JsonType::Double | JsonType::Integer) {
            return Err(JsonError::TypeMismatch {
                expected: JsonType::Double,
                found: self.kind(),
            });
        }
        Ok(codec::parse_f64(self.inner.borrow().raw.as_bytes()))
    }

    pub fn as_bool(&self) -> Result<bool> {
        self.check_type(JsonType::Boolean)?;
        Ok(codec::parse_bool(self.inner.borrow().raw.as_bytes()))
    }

    pub fn as_str(&self) -> Result<String> {
        self.check_type(JsonType::String)?;
        Ok(codec::unescape(self.inner.borrow().raw.as_bytes()))
    }

    /// Always-succeeding variants of the scalar readers, for callers who'd
    /// rather get a best-effort decode than thread a `Result` through.
    pub fn as_i64_lossy(&self) -> i64 {
        codec::parse_i64(self.inner.borrow().raw.as_bytes())
    }
    pub fn as_f64_lossy(&self) -> f64 {
        codec::parse_f64(self.inner.borrow().raw.as_bytes())
    }
    pub fn as_bool_lossy(&self) -> bool {
        codec::parse_bool(self.inner.borrow().raw.as_bytes())
    }
    pub fn as_str_lossy(&self) -> String {
        codec::unescape(self.inner.borrow().raw.as_bytes())
    }

    /// Object/array cardinality for containers; `1` for any scalar
    /// (`Integer`/`Double`/`Boolean`/`String`); `0` for `Null`/`Empty`.
    pub fn len(&self) -> usize {
        let borrow = self.inner.borrow();
        match &borrow.children {
            Children::Array(v) => v.len(),
            Children::Object(m) => m.len(),
            Children::None => match borrow.kind {
                JsonType::Null | JsonType::Empty => 0,
                _ => 1,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Object member lookup by key. Missing key or non-object receiver
    /// returns the shared `Empty` sentinel in loose mode.
    pub fn get(&self, key: &str) -> JsonValue<'a> {
        let borrow = self.inner.borrow();
        match &borrow.children {
            Children::Object(m) => m
                .get(key.as_bytes())
                .cloned()
                .unwrap_or_else(|| JsonValue::empty().into_lifetime()),
            _ => JsonValue::empty().into_lifetime(),
        }
    }

    /// Array element lookup by position. Out-of-range returns `Empty`.
    pub fn at(&self, index: usize) -> JsonValue<'a> {
        let borrow = self.inner.borrow();
        match &borrow.children {
            Children::Array(v) => v.get(index).cloned().unwrap_or_else(|| JsonValue::empty().into_lifetime()),
            _ => JsonValue::empty().into_lifetime(),
        }
    }

    /// Inserts `value` under `key` if `key` is not already present. No-op
    /// (per the container's contract) if the key already exists. Errors if
    /// `self` is not an object and not `Empty` (an `Empty` handle may not
    /// be upgraded in place -- build a fresh object with
    /// [`new_object`](Self::new_object) instead).
    pub fn insert(&self, key: &str, value: JsonValue<'a>) -> Result<()> {
        let mut borrow = self.inner.borrow_mut();
        match &mut borrow.children {
            Children::Object(m) => {
                let committed_key = StringData::from(key).to_committed();
                let mut value = value;
                value.key = committed_key.clone();
                m.insert(committed_key, value);
                Ok(())
            }
            _ => Err(JsonError::mutation(format!(
                "cannot insert key {key:?} into a {}",
                borrow.kind
            ))),
        }
    }

    /// Appends `value` to an array. Errors if `self` is not an array.
    pub fn push(&self, value: JsonValue<'a>) -> Result<()> {
        let mut borrow = self.inner.borrow_mut();
        match &mut borrow.children {
            Children::Array(v) => {
                v.push(value);
                Ok(())
            }
            _ => Err(JsonError::mutation(format!("cannot push onto a {}", borrow.kind))),
        }
    }

    /// Iterate over array elements or object values. See [`crate::iter`].
    pub fn iter(&self) -> crate::iter::ChildIter<'a> {
        crate::iter::ChildIter::new(self)
    }

    /// A new holder sharing this value's direct children by refcount
    /// (`Rc::clone`). Mutating a shared grandchild through either copy is
    /// visible through the other; only the direct container (vec/map) is
    /// duplicated.
    pub fn shallow_copy(&self) -> JsonValue<'a> {
        let borrow = self.inner.borrow();
        let children = match &borrow.children {
            Children::None => Children::None,
            Children::Array(v) => Children::Array(v.clone()),
            Children::Object(m) => {
                let mut new_map = DisplaceMap::new();
                for (k, v) in m.iter() {
                    new_map.insert(k.clone(), v.clone());
                }
                Children::Object(new_map)
            }
        };
        let new_holder = Holder {
            kind: borrow.kind,
            raw: borrow.raw.clone(),
            children,
        };
        JsonValue::from_holder(new_holder, self.strict)
    }

    /// Recursively copies the entire subtree, committing every borrowed
    /// string along the way so the result has no lifetime dependency on
    /// whatever buffer `self` was parsed from.
    pub fn deep_copy(&self) -> JsonValue<'static> {
        let borrow = self.inner.borrow();
        let raw = borrow.raw.to_committed();
        let result = match &borrow.children {
            Children::None => JsonValue::from_holder(Holder::scalar(borrow.kind, raw), self.strict),
            Children::Array(v) => {
                let copied: Vec<JsonValue<'static>> = v.iter().map(|c| c.deep_copy()).collect();
                JsonValue::from_holder(
                    Holder {
                        kind: JsonType::Array,
                        raw: StringData::EMPTY,
                        children: Children::Array(copied),
                    },
                    self.strict,
                )
            }
            Children::Object(m) => {
                let mut new_map = DisplaceMap::new();
                for (k, v) in m.iter() {
                    new_map.insert(k.to_committed(), v.deep_copy());
                }
                JsonValue::from_holder(
                    Holder {
                        kind: JsonType::Object,
                        raw: StringData::EMPTY,
                        children: Children::Object(new_map),
                    },
                    self.strict,
                )
            }
        };
        let mut result = result;
        result.key = self.key.to_committed();
        result
    }

    pub(crate) fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    /// The holder's raw lexical form, verbatim: digit string for numbers,
    /// `true`/`false` for booleans, already-escaped text for strings (the
    /// emitter writes it back out without re-escaping).
    pub(crate) fn raw_str(&self) -> String {
        String::from_utf8_lossy(self.inner.borrow().raw.as_bytes()).into_owned()
    }

    pub(crate) fn for_each_array<F: FnMut(&JsonValue<'a>)>(&self, mut f: F) {
        if let Children::Array(v) = &self.inner.borrow().children {
            for c in v {
                f(c);
            }
        }
    }

    pub(crate) fn for_each_object<F: FnMut(&StringData<'a>, &JsonValue<'a>)>(&self, mut f: F) {
        if let Children::Object(m) = &self.inner.borrow().children {
            for (k, v) in m.iter() {
                f(k, v);
            }
        }
    }

    /// Strong-count of the underlying holder, for testing the refcount
    /// invariant.
    pub fn strong_count(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Re-labels the shared `Empty` sentinel's `'static` lifetime down to
    /// whatever `'a` the caller needs. `RefCell` makes `Holder<'a>`
    /// invariant, so the compiler won't coerce this on its own even though
    /// shrinking a `'static` value's lifetime is always sound.
    pub(crate) fn into_lifetime(self) -> JsonValue<'a> {
        debug_assert!(self.is_empty_value());
        JsonValue {
            key: self.key,
            inner: unsafe { shrink_rc_lifetime(self.inner) },
            strict: self.strict,
        }
    }
}

/// # Safety
/// Only ever called with an `Rc<RefCell<Holder<'static>>>` that holds the
/// shared `Empty` sentinel (no borrowed data inside it), so shrinking its
/// lifetime label to `'a` cannot expose a dangling borrow.
unsafe fn shrink_rc_lifetime<'a>(rc: Rc<RefCell<Holder<'static>>>) -> Rc<RefCell<Holder<'a>>> {
    std::mem::transmute(rc)
}

impl fmt::Debug for JsonValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonValue").field("kind", &self.kind()).finish()
    }
}
