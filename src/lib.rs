// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # lightning-json - a lazy, non-copying JSON engine
//!
//! Parses a JSON document into a reference-counted tree without copying
//! scalar values out of the source buffer; escape decoding and numeric
//! conversion happen lazily, the first time a value is actually read.
//!
//! ## Quick Start
//!
//! ```rust
//! use lightning_json::JsonValue;
//!
//! fn main() -> lightning_json::Result<()> {
//!     let doc = lightning_json::parse(br#"{"name":"ada","tags":["math","engine"]}"#)?;
//!     assert_eq!(doc.get("name").as_str()?, "ada");
//!     assert_eq!(doc.get("tags").at(1).as_str()?, "engine");
//!
//!     let mut out = JsonValue::new_object();
//!     out.insert("ok", JsonValue::from_bool(true))?;
//!     assert_eq!(lightning_json::to_json_string(&out), r#"{"ok":true}"#);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                        JsonValue (handle)                    |
//! |     key: StringData     ref-counted pointer to a Holder      |
//! +-------------------------------------------------------------+
//! |                         Holder (shared cell)                 |
//! |   kind: JsonType   raw: StringData   children: Array|Object  |
//! +-------------------------------------------------------------+
//! |  parser (borrows spans)   |   emitter (re-escapes on write)  |
//! +-------------------------------------------------------------+
//! |   string_view  |  map (displacement hash table)  |   pool    |
//! +-------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`JsonValue`] | Reference-counted handle into the value tree |
//! | [`JsonType`] | The closed set of value kinds, plus the `Empty` sentinel |
//! | [`ParseMode`] | Selects strict validation vs. the fast, permissive default |
//! | [`JsonError`] | The two-kind error taxonomy (`InvalidJson`, `TypeMismatch`) |
//!
//! ## Modules Overview
//!
//! - [`value`] - the tree itself: `JsonType`, `Holder`, `JsonValue`
//! - [`parser`] - lazy recursive-descent parsing
//! - [`emitter`] - serialization back to JSON text
//! - [`codec`] - escape/unescape and number formatting
//! - [`map`] - the displacement-on-collision hash table used for object children
//! - [`string_view`] - the borrow-or-commit string type
//! - [`pool`] - fixed-block slab allocator
//! - [`iter`] - polymorphic array/object iteration
//! - [`error`] - the error taxonomy

#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod emitter;
pub mod error;
pub mod iter;
pub mod map;
pub mod parser;
pub mod pool;
pub mod string_view;
pub mod value;

pub use emitter::{to_json_string, to_pretty_json_string};
pub use error::{JsonError, Result};
pub use parser::{parse, parse_with_mode, ParseMode};
pub use value::{JsonType, JsonValue};
