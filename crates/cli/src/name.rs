// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Routine name decomposition.
//!
//! Every public routine name maps to a base name plus the float type it
//! operates on: `sinf` is `(sin, f32)`, `fmaf128` is `(fma, f128)`. A short
//! table of exact names is consulted before the suffix rules because some
//! double-precision names (`erf`, `modf`) happen to end in `f`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Float precision a routine operates on, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloatTy {
    F16,
    F32,
    F64,
    F128,
}

impl FloatTy {
    /// All types in canonical output order.
    pub const ALL: [FloatTy; 4] = [FloatTy::F16, FloatTy::F32, FloatTy::F64, FloatTy::F128];

    pub fn as_str(self) -> &'static str {
        match self {
            FloatTy::F16 => "f16",
            FloatTy::F32 => "f32",
            FloatTy::F64 => "f64",
            FloatTy::F128 => "f128",
        }
    }
}

impl fmt::Display for FloatTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a type string is not one of the four known precisions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown float type `{0}`")]
pub struct UnknownFloatTy(pub String);

impl FromStr for FloatTy {
    type Err = UnknownFloatTy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FloatTy::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownFloatTy(s.to_string()))
    }
}

impl Serialize for FloatTy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FloatTy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One step of the decomposition cascade.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The whole name matches; base and type are fixed.
    Exact {
        name: &'static str,
        base: &'static str,
        ty: FloatTy,
    },
    /// The name ends in `suffix` and something remains before it.
    Suffix { suffix: &'static str, ty: FloatTy },
}

/// Decomposition rules, evaluated top to bottom. First match wins.
pub const RULES: &[Rule] = &[
    Rule::Exact { name: "erff", base: "erf", ty: FloatTy::F32 },
    Rule::Exact { name: "erf", base: "erf", ty: FloatTy::F64 },
    Rule::Exact { name: "modff", base: "modf", ty: FloatTy::F32 },
    Rule::Exact { name: "modf", base: "modf", ty: FloatTy::F64 },
    Rule::Exact { name: "lgammaf_r", base: "lgamma_r", ty: FloatTy::F32 },
    Rule::Exact { name: "lgamma_r", base: "lgamma_r", ty: FloatTy::F64 },
    Rule::Suffix { suffix: "f128", ty: FloatTy::F128 },
    Rule::Suffix { suffix: "f16", ty: FloatTy::F16 },
    Rule::Suffix { suffix: "f", ty: FloatTy::F32 },
];

impl Rule {
    /// Apply this rule to `name`, returning the decomposition if it matches.
    pub fn apply<'a>(&self, name: &'a str) -> Option<(&'a str, FloatTy)> {
        match *self {
            Rule::Exact { name: full, base, ty } => (name == full).then_some((base, ty)),
            Rule::Suffix { suffix, ty } => name
                .strip_suffix(suffix)
                .filter(|base| !base.is_empty())
                .map(|base| (base, ty)),
        }
    }
}

/// Split a routine name into its base name and float type.
///
/// Names no rule matches are double precision and are their own base.
pub fn base_name(name: &str) -> (&str, FloatTy) {
    RULES
        .iter()
        .find_map(|rule| rule.apply(name))
        .unwrap_or((name, FloatTy::F64))
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
