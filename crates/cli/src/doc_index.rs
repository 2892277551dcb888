// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Narrow read access to rustdoc's JSON output.
//!
//! The rustdoc JSON schema belongs to rustdoc and changes between toolchains,
//! so only the handful of fields extraction needs are read. An item whose shape
//! is unexpected simply does not qualify for whatever is being asked.

use serde_json::Value;

/// The parsed rustdoc document.
#[derive(Debug, Clone)]
pub struct DocIndex {
    root: Value,
}

/// One entry of the `index` table.
#[derive(Debug, Clone, Copy)]
pub struct Item<'a>(&'a Value);

impl DocIndex {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse rustdoc's JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text).map(Self::new)
    }

    /// All items in the index, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = Item<'_>> {
        self.root
            .get("index")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|index| index.values().map(Item))
    }

    /// Look up an item by id. Items from external crates are not present.
    pub fn get(&self, id: &str) -> Option<Item<'_>> {
        self.root.get("index")?.get(id).map(Item)
    }
}

impl<'a> Item<'a> {
    fn inner(&self) -> Option<&'a Value> {
        self.0.get("inner")
    }

    pub fn is_public(&self) -> bool {
        self.0.get("visibility").and_then(Value::as_str) == Some("public")
    }

    pub fn is_function(&self) -> bool {
        self.inner().is_some_and(|inner| inner.get("function").is_some())
    }

    /// Id of the item a `use` declaration re-exports.
    ///
    /// Ids are strings in newer formats and integers in older ones.
    pub fn use_target(&self) -> Option<String> {
        match self.inner()?.get("use")?.get("id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// File the item is declared in, as rustdoc reports it.
    pub fn span_filename(&self) -> Option<&'a str> {
        self.0.get("span")?.get("filename")?.as_str()
    }

    pub fn name(&self) -> Option<&'a str> {
        self.0.get("name")?.as_str()
    }
}

#[cfg(test)]
#[path = "doc_index_tests.rs"]
mod tests;
