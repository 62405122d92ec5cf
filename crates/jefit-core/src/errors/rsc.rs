// ABOUTME: Error types for React Server Components stream decoding and resolution
// ABOUTME: Raised in strict mode for data-shape anomalies and in every mode for reference cycles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Errors produced while decoding or resolving a flight stream.
///
/// In lenient mode only `CyclicReference` is ever returned; the other
/// variants are tolerated silently and only surface in strict mode.
#[derive(Debug, thiserror::Error)]
pub enum RscError {
    /// A non-blank line did not have the `<hex-id>:<payload>` shape
    #[error("Malformed fragment line {line_number}: '{line}'")]
    MalformedLine {
        /// 1-based line number in the normalized input
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// A fragment payload was not valid JSON
    #[error("Fragment '{token}' has an unparsable payload")]
    InvalidPayload {
        /// Reference token of the fragment (e.g. `$1a`)
        token: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A reference token pointed at a fragment that does not exist
    #[error("Dangling reference '{token}'")]
    DanglingReference {
        /// The unresolved token
        token: String,
    },

    /// Resolving a token led back to itself
    #[error("Cyclic reference detected at '{token}'")]
    CyclicReference {
        /// The token that was re-entered
        token: String,
    },

    /// A mining signature was built without any field names
    #[error("Field signature must name at least one field")]
    EmptySignature,
}
