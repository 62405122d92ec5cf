// ABOUTME: Shared server resources handed to every request
// ABOUTME: Owns the configuration, JEFit client, exercise catalog, and tool registry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::catalog::ExerciseCatalog;
use crate::config::ServerConfig;
use crate::jefit::JefitClient;
use crate::tools::ToolRegistry;

/// Resources shared by all transports and tools
///
/// Built once at startup; everything inside is `Arc`-wrapped so request
/// handlers clone the container cheaply.
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// JEFit API client with the cached session
    pub client: Arc<JefitClient>,
    /// Lazily loaded exercise catalog
    pub catalog: Arc<ExerciseCatalog>,
    /// Registered MCP tools
    pub tool_registry: Arc<ToolRegistry>,
}

impl ServerResources {
    /// Build all resources from the configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let client = JefitClient::from_config(&config);
        let catalog = ExerciseCatalog::from_config(&config);
        Self::with_components(config, client, catalog)
    }

    /// Assemble resources from prebuilt components
    #[must_use]
    pub fn with_components(
        config: ServerConfig,
        client: JefitClient,
        catalog: ExerciseCatalog,
    ) -> Self {
        let mut tool_registry = ToolRegistry::new();
        tool_registry.register_builtin_tools();

        Self {
            config: Arc::new(config),
            client: Arc::new(client),
            catalog: Arc::new(catalog),
            tool_registry: Arc::new(tool_registry),
        }
    }
}
