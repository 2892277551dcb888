// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Routine registry: public routine name to defining files and float type.
//!
//! The registry is rebuilt wholesale by `update-api-list` and checked in as
//! `etc/function-definitions.json`. `generate-matrix` only ever reads it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Error, Result};
use crate::name::FloatTy;

/// Reserved key holding the provenance comment in the persisted form.
pub const COMMENT_KEY: &str = "__comment";

/// Provenance comment written at the top of the definitions file.
pub const DEFINITIONS_COMMENT: &str = "Autogenerated by `libm-ci update-api-list`. \
    List of files that define a function with a given name. \
    This file is checked in to make it obvious if refactoring breaks things";

/// First line of the function list file.
pub const FUNCTION_LIST_HEADER: &str = "# autogenerated by `libm-ci update-api-list`";

/// A public routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    /// Root-relative POSIX paths of files that define or feed this routine.
    pub sources: BTreeSet<String>,
    #[serde(rename = "type")]
    pub ty: FloatTy,
}

/// Routine name to [`Routine`], iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    routines: BTreeMap<String, Routine>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, routine: Routine) {
        self.routines.insert(name.into(), routine);
    }

    pub fn get(&self, name: &str) -> Option<&Routine> {
        self.routines.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Routine)> {
        self.routines.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routines.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Load a persisted registry.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            Error::Parse { message, .. } => Error::Parse {
                what: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// Parse the persisted JSON form.
    ///
    /// Entries that cannot be decoded, including ones with an unknown type
    /// string, are skipped with a warning rather than failing the load.
    pub fn parse(content: &str) -> Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(content).map_err(|e| Error::Parse {
                what: "function definitions".to_string(),
                message: e.to_string(),
            })?;

        let mut registry = Registry::new();
        for (name, value) in raw {
            if name == COMMENT_KEY {
                continue;
            }
            match serde_json::from_value::<Routine>(value) {
                Ok(routine) => registry.insert(name, routine),
                Err(e) => tracing::warn!("skipping definition for `{}`: {}", name, e),
            }
        }
        Ok(registry)
    }

    /// Render the persisted JSON form, comment first, four-space indent.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        Persisted(self)
            .serialize(&mut ser)
            .map_err(|e| Error::Internal(format!("failed to serialize registry: {}", e)))?;
        let mut out = String::from_utf8(buf)
            .map_err(|e| Error::Internal(format!("registry is not utf-8: {}", e)))?;
        out.push('\n');
        Ok(out)
    }

    /// Render the function list: a header line then one name per line.
    pub fn function_list(&self) -> String {
        let mut out = String::from(FUNCTION_LIST_HEADER);
        out.push('\n');
        for name in self.names() {
            out.push_str(name);
            out.push('\n');
        }
        out
    }
}

impl FromIterator<(String, Routine)> for Registry {
    fn from_iter<I: IntoIterator<Item = (String, Routine)>>(iter: I) -> Self {
        Self {
            routines: iter.into_iter().collect(),
        }
    }
}

/// Serialization wrapper that places the comment key ahead of the routines.
struct Persisted<'a>(&'a Registry);

impl Serialize for Persisted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len() + 1))?;
        map.serialize_entry(COMMENT_KEY, DEFINITIONS_COMMENT)?;
        for (name, routine) in self.0.iter() {
            map.serialize_entry(name, routine)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
