// ABOUTME: Depth-bounded structural search for objects carrying a field signature
// ABOUTME: First match on a branch wins so nested matches are never double-reported
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{Map, Value};

use super::FragmentMap;
use crate::errors::RscError;

/// Set of field names an object must intersect to be mined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSignature {
    fields: Vec<String>,
}

impl FieldSignature {
    /// Build a signature from field names; duplicates are collapsed
    ///
    /// # Errors
    ///
    /// Returns `RscError::EmptySignature` if no field name is given.
    pub fn new<I, S>(fields: I) -> Result<Self, RscError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !collected.contains(&field) {
                collected.push(field);
            }
        }
        if collected.is_empty() {
            return Err(RscError::EmptySignature);
        }
        Ok(Self { fields: collected })
    }

    /// Field names in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// An object matches when it has at least one signature field as a key
    #[must_use]
    pub fn matches(&self, object: &Map<String, Value>) -> bool {
        self.fields.iter().any(|field| object.contains_key(field))
    }
}

/// Collect objects matching `signature` inside `value`.
///
/// The root sits at depth 0; anything deeper than `max_depth` is ignored.
/// A matching object is reported once and its children are not searched.
#[must_use]
pub fn mine<'a>(
    value: &'a Value,
    signature: &FieldSignature,
    max_depth: usize,
) -> Vec<&'a Map<String, Value>> {
    let mut found = Vec::new();
    search(value, signature, max_depth, 0, &mut found);
    found
}

/// Mine every fragment payload and concatenate results in fragment order.
///
/// Identical objects held by different fragments are all reported;
/// deduplication belongs to the caller.
#[must_use]
pub fn mine_fragments<'a>(
    fragments: &'a FragmentMap,
    signature: &FieldSignature,
    max_depth: usize,
) -> Vec<&'a Map<String, Value>> {
    let mut found = Vec::new();
    for payload in fragments.values() {
        search(payload, signature, max_depth, 0, &mut found);
    }
    found
}

fn search<'a>(
    value: &'a Value,
    signature: &FieldSignature,
    max_depth: usize,
    depth: usize,
    found: &mut Vec<&'a Map<String, Value>>,
) {
    if depth > max_depth {
        return;
    }

    match value {
        Value::Object(object) => {
            if signature.matches(object) {
                found.push(object);
                return;
            }
            for child in object.values().filter(|v| is_container(v)) {
                search(child, signature, max_depth, depth + 1, found);
            }
        }
        Value::Array(items) => {
            for child in items.iter().filter(|v| is_container(v)) {
                search(child, signature, max_depth, depth + 1, found);
            }
        }
        _ => {}
    }
}

const fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}
