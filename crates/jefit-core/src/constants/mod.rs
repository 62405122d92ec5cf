// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for the flight-stream wire format, exercises, and MCP protocol
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in one flat namespace.

/// React Server Components wire-format constants
pub mod rsc {
    /// Prefix marking a string as a reference to another fragment
    pub const REFERENCE_SENTINEL: char = '$';

    /// Pattern every fragment line must match: lowercase hex id, colon, payload
    pub const FRAGMENT_LINE_PATTERN: &str = r"^([a-f0-9]+):(.*)";

    /// Default depth cap for structural mining
    pub const DEFAULT_MAX_MINING_DEPTH: usize = 10;

    /// Request header that asks the web app for the flight stream instead of HTML
    pub const RSC_HEADER: &str = "rsc";
}

/// Exercise record field names and sentinels
pub mod exercise {
    /// Identifier field
    pub const ID: &str = "id";
    /// Display name field
    pub const NAME: &str = "name";
    /// Muscle groups field
    pub const BODY_PARTS: &str = "body_parts";
    /// Equipment field
    pub const EQUIPMENT: &str = "equipment";
    /// Input format field (weight/reps, duration, ...)
    pub const INPUT_FORMAT: &str = "input_format";
    /// Popularity score field
    pub const POPULARITY: &str = "popularity";

    /// Placeholder value JEFit uses for "no body part" / "no equipment"
    pub const NONE_SENTINEL: &str = "none";

    /// Id prefix of built-in exercises
    pub const SYSTEM_PREFIX: &str = "d_";
    /// Id prefix of user-defined exercises
    pub const CUSTOM_PREFIX: &str = "u_";

    /// Signature used to mine exercise definitions out of a flight stream
    pub const SIGNATURE: [&str; 3] = [ID, NAME, BODY_PARTS];
}

/// Protocol constants for MCP and JSON-RPC
pub mod protocol {
    /// JSON-RPC version (standard, not configurable)
    pub const JSONRPC_VERSION: &str = "2.0";

    /// MCP protocol revision advertised on initialize
    pub const MCP_PROTOCOL_VERSION: &str = "2025-06-18";
}

/// JSON-RPC error codes
pub mod errors {
    /// Invalid JSON was received
    pub const ERROR_PARSE: i32 = -32700;
    /// The JSON sent is not a valid request object
    pub const ERROR_INVALID_REQUEST: i32 = -32600;
    /// The method does not exist
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameters
    pub const ERROR_INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error
    pub const ERROR_INTERNAL_ERROR: i32 = -32603;
}

/// Date formats shared by tools and the HTTP client
pub mod dates {
    /// ISO 8601 calendar date
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
    /// Timestamp format used in workout reports
    pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}
