// ABOUTME: Chunk decoder splitting a flight stream into $-keyed fragments
// ABOUTME: Parses each payload as JSON and falls back to raw text in lenient mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

use super::ParseMode;
use crate::constants::rsc::{FRAGMENT_LINE_PATTERN, REFERENCE_SENTINEL};
use crate::errors::RscError;

/// Stored as Option so a compilation failure degrades to "no line matches"
static FRAGMENT_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(FRAGMENT_LINE_PATTERN).ok());

/// Decoded fragments of one response, keyed by reference token (`$<id>`).
///
/// Iteration follows first-insertion order; a later fragment with the same
/// id replaces the value but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentMap {
    fragments: Map<String, Value>,
}

impl FragmentMap {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the reference token for a fragment id (`"1a"` -> `"$1a"`)
    #[must_use]
    pub fn token_for(id: &str) -> String {
        format!("{REFERENCE_SENTINEL}{id}")
    }

    /// Insert a fragment by its hex id, replacing any previous payload
    pub fn insert_fragment(&mut self, id: &str, payload: Value) {
        self.fragments.insert(Self::token_for(id), payload);
    }

    /// Insert a fragment by its full reference token
    pub fn insert(&mut self, token: impl Into<String>, payload: Value) {
        self.fragments.insert(token.into(), payload);
    }

    /// Look up a fragment by reference token
    #[must_use]
    pub fn get(&self, token: &str) -> Option<&Value> {
        self.fragments.get(token)
    }

    /// Whether a fragment exists for `token`
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.fragments.contains_key(token)
    }

    /// Number of fragments
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether no fragment was decoded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate `(token, payload)` pairs in fragment order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fragments.iter()
    }

    /// Iterate reference tokens in fragment order
    pub fn tokens(&self) -> impl Iterator<Item = &String> {
        self.fragments.keys()
    }

    /// Iterate payloads in fragment order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fragments.values()
    }

    /// View the fragments as a JSON object
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fragments.clone())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for FragmentMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (token, payload) in iter {
            map.insert(token, payload);
        }
        map
    }
}

/// Decode a flight stream leniently.
///
/// Lines that do not look like `<hex-id>:<payload>` are skipped and payloads
/// that are not JSON are kept as raw strings, so this never fails.
#[must_use]
pub fn decode(raw: &str) -> FragmentMap {
    let normalized = normalize_line_endings(raw);
    let mut fragments = FragmentMap::new();
    let mut skipped = 0_usize;

    for (_, line) in content_lines(&normalized) {
        match split_line(line) {
            Some((id, payload)) => {
                let value = serde_json::from_str(payload)
                    .unwrap_or_else(|_| Value::String(payload.to_owned()));
                fragments.insert_fragment(id, value);
            }
            None => skipped += 1,
        }
    }

    debug!(
        fragments = fragments.len(),
        skipped_lines = skipped,
        "Decoded flight stream"
    );
    fragments
}

/// Decode honoring `mode`
pub(super) fn decode_with_mode(raw: &str, mode: ParseMode) -> Result<FragmentMap, RscError> {
    if !mode.is_strict() {
        return Ok(decode(raw));
    }

    let normalized = normalize_line_endings(raw);
    let mut fragments = FragmentMap::new();
    for (line_number, line) in content_lines(&normalized) {
        let (id, payload) = split_line(line).ok_or_else(|| RscError::MalformedLine {
            line_number,
            line: line.to_owned(),
        })?;
        let value = serde_json::from_str(payload).map_err(|source| RscError::InvalidPayload {
            token: FragmentMap::token_for(id),
            source,
        })?;
        fragments.insert_fragment(id, value);
    }

    debug!(fragments = fragments.len(), "Decoded flight stream (strict)");
    Ok(fragments)
}

/// Convert `\r\n` and bare `\r` line breaks to `\n`
fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Non-blank lines of the normalized input with their 1-based line numbers
fn content_lines(normalized: &str) -> impl Iterator<Item = (usize, &str)> {
    normalized
        .trim()
        .split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| (index + 1, line))
}

/// Split a fragment line into hex id and payload text
fn split_line(line: &str) -> Option<(&str, &str)> {
    let captures = FRAGMENT_LINE.as_ref()?.captures(line)?;
    let id = captures.get(1)?.as_str();
    let payload = captures.get(2).map_or("", |m| m.as_str());
    Some((id, payload))
}
