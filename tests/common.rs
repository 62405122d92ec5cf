// ABOUTME: Shared test utilities for the JEFit MCP server integration tests
// ABOUTME: Builds configs against a mock JEFit server, mounts auth mocks, and holds stream fixtures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    dead_code,
    unused_imports
)]
#![allow(missing_docs)]

use std::path::Path;
use std::sync::{Arc, Once};

use jefit_core::rsc::ParseMode;
use jefit_mcp_server::catalog::ExerciseCatalog;
use jefit_mcp_server::config::{
    CatalogConfig, HttpClientConfig, JefitConfig, ParserConfig, ServerConfig, TransportConfig,
};
use jefit_mcp_server::jefit::JefitClient;
use jefit_mcp_server::mcp::ServerResources;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT_LOGGER: Once = Once::new();

pub const TEST_USERNAME: &str = "lifter";
pub const TEST_PASSWORD: &str = "password";
/// MD5 of `TEST_PASSWORD`
pub const TEST_PASSWORD_MD5: &str = "5f4dcc3b5aa765d61d8327deb882cf99";
pub const TEST_ACCESS_TOKEN: &str = "token-123";
pub const TEST_USER_ID: &str = "42";

/// Flight stream holding one system and one custom exercise behind references
pub const SAMPLE_FLIGHT_STREAM: &str = concat!(
    "0:[\"$\",\"div\",null,{\"children\":\"$1\"}]\n",
    "1:{\"exercises\":[\"$2\",\"$3\"]}\n",
    "2:{\"id\":\"d_1\",\"name\":\"Bench Press\",\"body_parts\":[\"chest\",\"none\"],",
    "\"equipment\":[\"barbell\"],\"input_format\":1,\"popularity\":90}\n",
    "3:{\"id\":\"u_7\",\"name\":\"My Curl\",\"body_parts\":[\"biceps\"],",
    "\"equipment\":[\"none\"]}\n",
    "4:I[\"chunk\",\"main\"]\n",
);

/// Initialize quiet logging for tests
///
/// Set `TEST_LOG=debug` (or `info`, `trace`) to see server logs.
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") | Ok("trace") => tracing::Level::TRACE,
            Ok("DEBUG") | Ok("debug") => tracing::Level::DEBUG,
            Ok("INFO") | Ok("info") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration pointing at `base_url` with the catalog stored at `catalog_path`
pub fn test_config(base_url: &str, catalog_path: &Path) -> ServerConfig {
    ServerConfig {
        jefit: JefitConfig {
            username: TEST_USERNAME.to_owned(),
            password: TEST_PASSWORD.to_owned(),
            timezone: "-04:00".to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        },
        catalog: CatalogConfig {
            path: catalog_path.to_path_buf(),
        },
        parser: ParserConfig {
            mode: ParseMode::Lenient,
            max_depth: 10,
        },
        http_client: HttpClientConfig {
            timeout_secs: 5,
            connect_timeout_secs: 5,
        },
        transport: TransportConfig {
            host: "127.0.0.1".to_owned(),
            port: None,
        },
    }
}

/// Client and catalog wired to the mock server
pub fn test_resources(base_url: &str, catalog_path: &Path) -> Arc<ServerResources> {
    let config = test_config(base_url, catalog_path);
    let client = JefitClient::from_config(&config);
    let catalog = ExerciseCatalog::from_config(&config);
    Arc::new(ServerResources::with_components(config, client, catalog))
}

/// Mount successful login and profile endpoints
pub async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v2/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"accessToken": TEST_ACCESS_TOKEN})),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 42}})))
        .mount(server)
        .await;
}

/// Mount the progress-history flight stream
pub async fn mount_flight_stream(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/my-jefit/progress/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
