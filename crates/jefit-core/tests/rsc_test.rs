// ABOUTME: Integration tests for flight-stream decoding, reference resolution, and mining
// ABOUTME: Covers lenient and strict modes, cycle detection, and the exercise extraction path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use jefit_core::constants::exercise::SIGNATURE;
use jefit_core::errors::{AppError, ErrorCode, RscError};
use jefit_core::models::ExerciseRecord;
use jefit_core::rsc::{
    decode, mine, mine_fragments, resolve, FieldSignature, FragmentMap, ParseMode, RscParser,
};
use serde_json::{json, Value};

fn exercise_signature() -> FieldSignature {
    FieldSignature::new(SIGNATURE).unwrap()
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_every_matching_line_produces_a_fragment() {
    let fragments = decode("0:{\"a\":1}\n1:not json at all\n2:\n3:[1,2,3]");

    assert_eq!(fragments.len(), 4);
    assert_eq!(fragments.get("$0"), Some(&json!({"a": 1})));
    assert_eq!(fragments.get("$1"), Some(&json!("not json at all")));
    assert_eq!(fragments.get("$2"), Some(&json!("")));
    assert_eq!(fragments.get("$3"), Some(&json!([1, 2, 3])));
}

#[test]
fn test_line_order_does_not_change_contents() {
    let forward = decode("1:{\"x\":1}\n2:\"two\"\na:[true]");
    let backward = decode("a:[true]\n2:\"two\"\n1:{\"x\":1}");

    for token in ["$1", "$2", "$a"] {
        assert_eq!(forward.get(token), backward.get(token));
    }
    assert_eq!(forward.len(), backward.len());
}

#[test]
fn test_duplicate_ids_last_write_wins() {
    let fragments = decode("1a:{\"x\":1}\n1a:{\"x\":2}");

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments.to_value(), json!({"$1a": {"x": 2}}));
}

#[test]
fn test_lines_without_hex_prefix_are_skipped() {
    let fragments = decode("\n  \nHELLO:world\nxyz:1\n:{}\n7f:true\n");

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments.get("$7f"), Some(&json!(true)));
}

#[test]
fn test_empty_input_decodes_to_nothing() {
    assert!(decode("").is_empty());
    assert!(decode("\r\n\n\r").is_empty());
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_transitive_resolution() {
    let fragments: FragmentMap = [("$1", json!("$2")), ("$2", json!({"v": 1}))]
        .into_iter()
        .collect();

    assert_eq!(resolve(&json!("$1"), &fragments).unwrap(), json!({"v": 1}));
}

#[test]
fn test_dangling_reference_passes_through() {
    let fragments = FragmentMap::new();
    assert_eq!(resolve(&json!("$zz"), &fragments).unwrap(), json!("$zz"));
}

#[test]
fn test_resolution_is_idempotent() {
    let fragments: FragmentMap = [
        ("$1", json!({"items": ["$2", "$3"], "meta": {"n": 2}})),
        ("$2", json!({"id": "d_1"})),
        ("$3", json!([1, "$2"])),
    ]
    .into_iter()
    .collect();

    let once = resolve(&json!("$1"), &fragments).unwrap();
    let twice = resolve(&once, &fragments).unwrap();

    assert_eq!(once, twice);
    assert_eq!(
        once,
        json!({"items": [{"id": "d_1"}, [1, {"id": "d_1"}]], "meta": {"n": 2}})
    );
}

#[test]
fn test_resolution_does_not_touch_fragments() {
    let fragments: FragmentMap = [("$1", json!(["$2"])), ("$2", json!(42))]
        .into_iter()
        .collect();
    let before = fragments.clone();

    resolve(&json!({"root": "$1"}), &fragments).unwrap();

    assert_eq!(fragments, before);
}

#[test]
fn test_two_fragment_cycle_is_reported() {
    let fragments: FragmentMap = [("$1", json!({"next": "$2"})), ("$2", json!(["$1"]))]
        .into_iter()
        .collect();

    let err = resolve(&json!("$1"), &fragments).unwrap_err();
    assert!(matches!(err, RscError::CyclicReference { ref token } if token == "$1"));

    // Strict mode reports the same cycle
    let err = RscParser::strict()
        .resolve(&json!("$2"), &fragments)
        .unwrap_err();
    assert!(matches!(err, RscError::CyclicReference { .. }));
}

#[test]
fn test_shared_reference_is_not_a_cycle() {
    let fragments: FragmentMap = [
        ("$1", json!({"left": "$2", "right": "$2"})),
        ("$2", json!({"leaf": "$3"})),
        ("$3", json!("bottom")),
    ]
    .into_iter()
    .collect();

    let resolved = resolve(&json!("$1"), &fragments).unwrap();
    assert_eq!(
        resolved,
        json!({"left": {"leaf": "bottom"}, "right": {"leaf": "bottom"}})
    );
}

// ============================================================================
// Mining
// ============================================================================

#[test]
fn test_nested_match_is_not_reported_twice() {
    let tree = json!({
        "id": "a",
        "name": "n",
        "body_parts": [],
        "extra": {"id": "b", "name": "m", "body_parts": []}
    });

    let found = mine(&tree, &exercise_signature(), 10);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], json!("a"));
}

#[test]
fn test_match_below_depth_cap_is_ignored() {
    let mut tree = json!({"id": "deep", "name": "n", "body_parts": []});
    for _ in 0..12 {
        tree = json!({"wrapper": tree});
    }

    assert!(mine(&tree, &exercise_signature(), 10).is_empty());
    assert_eq!(mine(&tree, &exercise_signature(), 12).len(), 1);
}

#[test]
fn test_scalars_never_match() {
    for value in [json!(null), json!(1), json!("id"), json!(["id", "name"])] {
        assert!(mine(&value, &exercise_signature(), 10).is_empty());
    }
}

#[test]
fn test_mining_fragments_keeps_fragment_order() {
    let fragments = decode(
        "2:[{\"id\":\"d_2\",\"name\":\"Row\",\"body_parts\":[]}]\n\
         1:{\"list\":[{\"id\":\"d_1\",\"name\":\"Squat\",\"body_parts\":[]}]}\n\
         3:\"$2\"",
    );

    let found = mine_fragments(&fragments, &exercise_signature(), 10);
    let ids: Vec<&Value> = found.iter().map(|object| &object["id"]).collect();

    assert_eq!(ids, [&json!("d_2"), &json!("d_1")]);
}

#[test]
fn test_empty_signature_is_rejected() {
    let none: Vec<String> = Vec::new();
    assert!(matches!(
        FieldSignature::new(none),
        Err(RscError::EmptySignature)
    ));
}

// ============================================================================
// Strict mode
// ============================================================================

#[test]
fn test_strict_mode_rejects_malformed_line() {
    let err = RscParser::strict()
        .decode("1:{}\nnot a fragment")
        .unwrap_err();

    assert!(matches!(
        err,
        RscError::MalformedLine { line_number: 2, .. }
    ));
}

#[test]
fn test_strict_mode_rejects_unparsable_payload() {
    let err = RscParser::strict().decode("1:{}\n2:{broken").unwrap_err();

    assert!(matches!(err, RscError::InvalidPayload { ref token, .. } if token == "$2"));
}

#[test]
fn test_strict_mode_rejects_dangling_reference() {
    let parser = RscParser::new(ParseMode::Strict, 10);
    let fragments = parser.decode("1:[\"$9\"]").unwrap();

    let err = parser.resolve(&json!("$1"), &fragments).unwrap_err();
    assert!(matches!(err, RscError::DanglingReference { ref token } if token == "$9"));
}

#[test]
fn test_rsc_error_becomes_invalid_format() {
    let app_error: AppError = RscError::DanglingReference {
        token: "$9".to_owned(),
    }
    .into();

    assert_eq!(app_error.code, ErrorCode::InvalidFormat);
    assert!(app_error.message.contains("$9"));
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_exercise_stream_end_to_end() {
    let raw = "1:{\"id\":\"d_1\",\"name\":\"Bench Press\",\"body_parts\":[\"chest\",\"none\"]}\n\
               2:ignored garbage without colon-prefix hex\n\
               zz:not-json";

    let fragments = decode(raw);

    // `zz` is not lowercase hex so that line is dropped; `2:` is a valid
    // fragment whose payload is kept as raw text.
    assert_eq!(fragments.len(), 2);
    assert!(fragments.get("$1").unwrap().is_object());
    assert_eq!(
        fragments.get("$2"),
        Some(&json!("ignored garbage without colon-prefix hex"))
    );
    assert!(!fragments.contains("$zz"));

    let parser = RscParser::default();
    let root = parser.resolve(fragments.get("$1").unwrap(), &fragments).unwrap();
    let found = parser.mine(&root, &exercise_signature());
    assert_eq!(found.len(), 1);

    let record = ExerciseRecord::from_object(found[0]).unwrap();
    assert_eq!(record.id, "d_1");
    assert_eq!(record.name, "Bench Press");
    assert_eq!(record.body_parts, ["chest"]);
}
