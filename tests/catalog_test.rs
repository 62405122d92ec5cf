// ABOUTME: Integration tests for exercise extraction and the file-backed catalog
// ABOUTME: Covers flight stream mining, cache file loading, and refresh against a mock JEFit server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::{Duration, Instant};

use jefit_core::rsc::{ParseMode, RscParser};
use jefit_mcp_server::catalog::{
    extract_exercises, read_catalog_file, write_catalog_file, ExerciseCatalog,
};
use jefit_mcp_server::errors::ErrorCode;
use jefit_mcp_server::jefit::JefitClient;
use tempfile::TempDir;
use wiremock::MockServer;

use common::{mount_auth, mount_flight_stream, test_config, SAMPLE_FLIGHT_STREAM};

fn lenient() -> RscParser {
    RscParser::new(ParseMode::Lenient, 10)
}

fn strict() -> RscParser {
    RscParser::new(ParseMode::Strict, 10)
}

#[test]
fn test_extract_exercises_from_referenced_fragments() {
    common::init_test_logging();

    let exercises = extract_exercises(SAMPLE_FLIGHT_STREAM, &lenient()).unwrap();

    assert_eq!(exercises.len(), 2);
    let bench = &exercises["d_1"];
    assert_eq!(bench.name, "Bench Press");
    assert_eq!(bench.body_parts, ["chest"]);
    assert_eq!(bench.equipment, ["barbell"]);
    assert_eq!(bench.popularity, Some(serde_json::json!(90)));

    let curl = &exercises["u_7"];
    assert!(curl.is_custom());
    assert!(curl.equipment.is_empty());
}

#[test]
fn test_extract_exercises_keeps_first_duplicate() {
    let stream = concat!(
        "0:{\"id\":\"d_1\",\"name\":\"First\",\"body_parts\":[]}\n",
        "1:{\"id\":\"d_1\",\"name\":\"Second\",\"body_parts\":[]}\n",
    );

    let exercises = extract_exercises(stream, &lenient()).unwrap();

    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises["d_1"].name, "First");
}

#[test]
fn test_extract_exercises_ignores_partial_matches() {
    let stream = concat!(
        "0:{\"user\":{\"id\":42,\"name\":\"lifter\"}}\n",
        "1:{\"id\":\"d_2\",\"name\":\"Squat\",\"body_parts\":[\"quads\"]}\n",
    );

    let exercises = extract_exercises(stream, &lenient()).unwrap();

    assert_eq!(exercises.keys().collect::<Vec<_>>(), ["d_2"]);
}

#[test]
fn test_exercise_fields_are_resolved_from_other_fragments() {
    let stream = concat!(
        "0:{\"id\":\"d_6\",\"name\":\"Cable Row\",\"body_parts\":\"$1\",\"equipment\":\"$2\"}\n",
        "1:[\"back\",\"none\"]\n",
        "2:[\"cable\"]\n",
    );

    let exercises = extract_exercises(stream, &strict()).unwrap();

    assert_eq!(exercises["d_6"].body_parts, ["back"]);
    assert_eq!(exercises["d_6"].equipment, ["cable"]);
}

#[test]
fn test_lenient_extraction_reads_cyclic_exercise_unresolved() {
    let stream = concat!(
        "0:{\"id\":\"d_5\",\"name\":\"Deadlift\",\"body_parts\":\"$1\"}\n",
        "1:[\"$2\"]\n",
        "2:[\"$1\"]\n",
    );

    let exercises = extract_exercises(stream, &lenient()).unwrap();
    assert_eq!(exercises["d_5"].name, "Deadlift");
    assert!(exercises["d_5"].body_parts.is_empty());

    let err = extract_exercises(stream, &strict()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
    assert!(err.message.contains("Cyclic reference"));
}

#[test]
fn test_cycles_outside_exercises_are_ignored() {
    let stream = concat!(
        "0:{\"a\":\"$1\"}\n",
        "1:{\"b\":\"$0\"}\n",
        "2:{\"id\":\"d_5\",\"name\":\"Deadlift\",\"body_parts\":[\"back\"]}\n",
    );

    let exercises = extract_exercises(stream, &strict()).unwrap();
    assert!(exercises.contains_key("d_5"));
}

#[test]
fn test_nested_shared_references_are_not_expanded() {
    // Each level references the one below twice, so full resolution doubles per level
    let levels = 24;
    let mut stream =
        String::from("0:{\"id\":\"d_1\",\"name\":\"Bench Press\",\"body_parts\":[\"chest\"]}\n");
    for level in 1..=levels {
        let below = format!("{:x}", level - 1);
        stream.push_str(&format!("{level:x}:[\"${below}\",\"${below}\"]\n"));
    }

    let started = Instant::now();
    let exercises = extract_exercises(&stream, &lenient()).unwrap();

    assert!(started.elapsed() < Duration::from_secs(1), "{:?}", started.elapsed());
    assert_eq!(exercises.len(), 1);
    assert_eq!(exercises["d_1"].body_parts, ["chest"]);
}

#[test]
fn test_exercises_inside_a_matching_container_are_not_mined() {
    // The container carries `name`, so mining stops there and the inline
    // list is never searched
    let stream = concat!(
        "0:{\"name\":\"history\",\"items\":[",
        "{\"id\":\"d_9\",\"name\":\"Lunge\",\"body_parts\":[\"quads\"]}]}\n",
        "1:{\"id\":\"d_2\",\"name\":\"Squat\",\"body_parts\":[\"quads\"]}\n",
    );

    let exercises = extract_exercises(stream, &lenient()).unwrap();

    assert_eq!(exercises.keys().collect::<Vec<_>>(), ["d_2"]);
}

#[test]
fn test_strict_extraction_rejects_raw_text_fragments() {
    let err = extract_exercises(SAMPLE_FLIGHT_STREAM, &strict()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_extract_exercises_from_empty_stream() {
    let exercises = extract_exercises("", &lenient()).unwrap();
    assert!(exercises.is_empty());
}

#[tokio::test]
async fn test_catalog_file_round_trip_creates_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("exercises_db.json");
    let exercises = extract_exercises(SAMPLE_FLIGHT_STREAM, &lenient()).unwrap();

    write_catalog_file(&path, &exercises).await.unwrap();
    let loaded = read_catalog_file(&path).await.unwrap();

    assert_eq!(loaded, exercises);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\n  \"d_1\": {"), "catalog file is indented: {text}");
}

#[tokio::test]
async fn test_existing_file_is_loaded_without_network() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exercises_db.json");
    let exercises = extract_exercises(SAMPLE_FLIGHT_STREAM, &lenient()).unwrap();
    write_catalog_file(&path, &exercises).await.unwrap();

    // Nothing is mounted: any request would fail and leave the catalog empty
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), &path);
    let client = JefitClient::from_config(&config);
    let catalog = ExerciseCatalog::from_config(&config);

    assert!(!catalog.is_loaded());
    catalog.ensure_loaded(&client).await;

    assert!(catalog.is_loaded());
    assert_eq!(catalog.len().await, 2);
    assert_eq!(catalog.get("d_1").await.unwrap().name, "Bench Press");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_file_is_created_from_flight_stream() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("exercises_db.json");

    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_flight_stream(&server, SAMPLE_FLIGHT_STREAM).await;

    let config = test_config(&server.uri(), &path);
    let client = JefitClient::from_config(&config);
    let catalog = ExerciseCatalog::from_config(&config);

    catalog.ensure_loaded(&client).await;

    assert_eq!(catalog.len().await, 2);
    assert!(path.exists());
    let on_disk = read_catalog_file(&path).await.unwrap();
    assert_eq!(on_disk.len(), 2);
}

#[tokio::test]
async fn test_failed_load_is_retried_on_next_use() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exercises_db.json");

    // Nothing is mounted yet: the first load fails
    let server = MockServer::start().await;
    let config = test_config(&server.uri(), &path);
    let client = JefitClient::from_config(&config);
    let catalog = ExerciseCatalog::from_config(&config);

    catalog.ensure_loaded(&client).await;
    assert!(!catalog.is_loaded());
    assert!(catalog.is_empty().await);

    mount_auth(&server).await;
    mount_flight_stream(&server, SAMPLE_FLIGHT_STREAM).await;
    catalog.ensure_loaded(&client).await;

    assert!(catalog.is_loaded());
    assert_eq!(catalog.len().await, 2);
    assert!(path.exists());
}

#[tokio::test]
async fn test_refresh_reports_stats() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exercises_db.json");

    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_flight_stream(&server, SAMPLE_FLIGHT_STREAM).await;

    let config = test_config(&server.uri(), &path);
    let client = JefitClient::from_config(&config);
    let catalog = ExerciseCatalog::from_config(&config);

    let stats = catalog.refresh(&client).await.unwrap();

    assert_eq!(stats.total, 2);
    assert_eq!(stats.system, 1);
    assert_eq!(stats.custom, 1);
    assert_eq!(catalog.stats().await, stats);
}

#[tokio::test]
async fn test_refresh_without_exercises_keeps_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exercises_db.json");
    let previous = extract_exercises(SAMPLE_FLIGHT_STREAM, &lenient()).unwrap();
    write_catalog_file(&path, &previous).await.unwrap();

    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_flight_stream(&server, "0:[\"$\",\"div\",null,{}]\n").await;

    let config = test_config(&server.uri(), &path);
    let client = JefitClient::from_config(&config);
    let catalog = ExerciseCatalog::from_config(&config);

    let err = catalog.refresh(&client).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert_eq!(read_catalog_file(&path).await.unwrap(), previous);
    assert!(catalog.is_empty().await);
}
