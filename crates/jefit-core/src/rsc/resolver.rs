// ABOUTME: Transitive $-reference resolution over decoded flight-stream fragments
// ABOUTME: Produces new resolved values and reports reference cycles instead of recursing forever
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde_json::{Map, Value};
use std::collections::HashSet;

use super::{FragmentMap, ParseMode};
use crate::constants::rsc::REFERENCE_SENTINEL;
use crate::errors::RscError;

/// Whether a string uses the reference token syntax
#[must_use]
pub fn is_reference(s: &str) -> bool {
    s.starts_with(REFERENCE_SENTINEL)
}

/// Resolve every reference token in `value` leniently.
///
/// Tokens with no matching fragment are left as-is. The fragment map is never
/// modified; the result is a fresh value with the same shape and key order.
///
/// # Errors
///
/// Returns `RscError::CyclicReference` if a token transitively refers back to
/// itself.
pub fn resolve(value: &Value, fragments: &FragmentMap) -> Result<Value, RscError> {
    resolve_with_mode(value, fragments, ParseMode::Lenient)
}

/// Resolve honoring `mode`
pub(super) fn resolve_with_mode(
    value: &Value,
    fragments: &FragmentMap,
    mode: ParseMode,
) -> Result<Value, RscError> {
    let mut resolver = Resolver {
        fragments,
        mode,
        in_progress: HashSet::new(),
    };
    resolver.resolve(value)
}

/// One resolution call; `in_progress` holds the tokens on the current path
struct Resolver<'a> {
    fragments: &'a FragmentMap,
    mode: ParseMode,
    in_progress: HashSet<String>,
}

impl Resolver<'_> {
    fn resolve(&mut self, value: &Value) -> Result<Value, RscError> {
        match value {
            Value::String(token) if is_reference(token) => self.resolve_token(token, value),
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(map) => {
                let mut resolved = Map::with_capacity(map.len());
                for (key, item) in map {
                    resolved.insert(key.clone(), self.resolve(item)?);
                }
                Ok(Value::Object(resolved))
            }
            _ => Ok(value.clone()),
        }
    }

    fn resolve_token(&mut self, token: &str, original: &Value) -> Result<Value, RscError> {
        let Some(target) = self.fragments.get(token) else {
            if self.mode.is_strict() {
                return Err(RscError::DanglingReference {
                    token: token.to_owned(),
                });
            }
            return Ok(original.clone());
        };

        if !self.in_progress.insert(token.to_owned()) {
            return Err(RscError::CyclicReference {
                token: token.to_owned(),
            });
        }
        let resolved = self.resolve(target);
        self.in_progress.remove(token);
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars_pass_through() {
        let fragments = FragmentMap::new();
        for value in [json!(1), json!(true), json!(null), json!("plain"), json!(2.5)] {
            assert_eq!(resolve(&value, &fragments).unwrap(), value);
        }
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let fragments: FragmentMap = [("$1", json!({"me": "$1"}))].into_iter().collect();
        let err = resolve(&json!("$1"), &fragments).unwrap_err();
        assert!(matches!(err, RscError::CyclicReference { token } if token == "$1"));
    }

    #[test]
    fn test_object_key_order_is_preserved() {
        let fragments: FragmentMap = [("$1", json!(1))].into_iter().collect();
        let resolved = resolve(&json!({"z": "$1", "a": 2, "m": "$1"}), &fragments).unwrap();
        let keys: Vec<&String> = resolved.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
