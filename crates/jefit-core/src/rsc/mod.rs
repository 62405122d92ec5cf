// ABOUTME: React Server Components flight-stream parser for JEFit web pages
// ABOUTME: Decodes chunk lines, resolves $-references, and mines objects by field signature
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Flight Stream Parsing
//!
//! JEFit's web app answers `rsc: 1` requests with a React Server Components
//! stream: one fragment per line, `<hex-id>:<json-or-text>`, where any string
//! equal to `$<id>` stands for another fragment's value.
//!
//! Three pure operations turn that into usable data:
//!
//! 1. [`decode`] splits the text into a [`FragmentMap`] keyed by `$<id>`
//! 2. [`resolve`] substitutes reference tokens transitively
//! 3. [`mine`] collects objects carrying any field of a [`FieldSignature`]
//!
//! [`RscParser`] bundles the three behind a [`ParseMode`]. Lenient mode
//! tolerates malformed lines, non-JSON payloads, and dangling references the
//! way the upstream format requires; strict mode reports them. Reference
//! cycles are reported in both modes.
//!
//! ```
//! use jefit_core::rsc::{FieldSignature, RscParser};
//!
//! let parser = RscParser::default();
//! let stream = "0:{\"items\":\"$1\"}\n1:[{\"id\":\"d_1\",\"name\":\"Squat\"}]";
//! let fragments = parser.decode(stream).unwrap();
//! let root = parser.resolve(&serde_json::json!("$0"), &fragments).unwrap();
//! let signature = FieldSignature::new(["id", "name"]).unwrap();
//! assert_eq!(parser.mine(&root, &signature).len(), 1);
//! ```

mod decoder;
mod miner;
mod resolver;

pub use decoder::{decode, FragmentMap};
pub use miner::{mine, mine_fragments, FieldSignature};
pub use resolver::{is_reference, resolve};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::constants::rsc::DEFAULT_MAX_MINING_DEPTH;
use crate::errors::RscError;

/// How the parser treats data-shape anomalies in upstream payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Skip malformed lines, keep raw text for non-JSON payloads, pass
    /// dangling references through unchanged
    #[default]
    Lenient,
    /// Report every anomaly as an `RscError`
    Strict,
}

impl ParseMode {
    /// Whether anomalies are reported instead of tolerated
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unknown parse mode '{other}', expected 'lenient' or 'strict'"
            )),
        }
    }
}

/// Flight-stream parser with a fixed mode and mining depth cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RscParser {
    mode: ParseMode,
    max_depth: usize,
}

impl Default for RscParser {
    fn default() -> Self {
        Self::new(ParseMode::Lenient, DEFAULT_MAX_MINING_DEPTH)
    }
}

impl RscParser {
    /// Create a parser with an explicit mode and mining depth cap
    #[must_use]
    pub const fn new(mode: ParseMode, max_depth: usize) -> Self {
        Self { mode, max_depth }
    }

    /// Strict parser with the default depth cap
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(ParseMode::Strict, DEFAULT_MAX_MINING_DEPTH)
    }

    /// Active parse mode
    #[must_use]
    pub const fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Mining depth cap
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Decode raw stream text into fragments
    ///
    /// # Errors
    ///
    /// In strict mode, returns `MalformedLine` or `InvalidPayload` for the
    /// first offending line. Lenient decoding never fails.
    pub fn decode(&self, raw: &str) -> Result<FragmentMap, RscError> {
        decoder::decode_with_mode(raw, self.mode)
    }

    /// Resolve every reference token inside `value`
    ///
    /// # Errors
    ///
    /// Returns `CyclicReference` when a token leads back to itself, and in
    /// strict mode `DanglingReference` for tokens with no fragment.
    pub fn resolve(&self, value: &Value, fragments: &FragmentMap) -> Result<Value, RscError> {
        resolver::resolve_with_mode(value, fragments, self.mode)
    }

    /// Collect objects matching `signature` within `value`
    #[must_use]
    pub fn mine<'a>(
        &self,
        value: &'a Value,
        signature: &FieldSignature,
    ) -> Vec<&'a Map<String, Value>> {
        mine(value, signature, self.max_depth)
    }

    /// Collect matching objects across all fragments, in fragment order
    #[must_use]
    pub fn mine_fragments<'a>(
        &self,
        fragments: &'a FragmentMap,
        signature: &FieldSignature,
    ) -> Vec<&'a Map<String, Value>> {
        mine_fragments(fragments, signature, self.max_depth)
    }
}
