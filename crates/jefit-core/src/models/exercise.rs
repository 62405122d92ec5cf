// ABOUTME: Exercise record model built from objects mined out of the flight stream
// ABOUTME: Drops JEFit's "none" placeholders and classifies system versus custom exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::constants::exercise::{
    BODY_PARTS, CUSTOM_PREFIX, EQUIPMENT, ID, INPUT_FORMAT, NAME, NONE_SENTINEL, POPULARITY,
    SYSTEM_PREFIX,
};

/// One exercise definition as stored in the local catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// JEFit exercise id (`d_` system, `u_` custom)
    pub id: String,
    /// Display name
    pub name: String,
    /// Muscle groups worked
    #[serde(default)]
    pub body_parts: Vec<String>,
    /// Equipment used
    #[serde(default)]
    pub equipment: Vec<String>,
    /// How sets are logged (weight/reps, duration, ...)
    #[serde(default)]
    pub input_format: Option<Value>,
    /// JEFit popularity score
    #[serde(default)]
    pub popularity: Option<Value>,
}

impl ExerciseRecord {
    /// Build a record from a mined object.
    ///
    /// Returns `None` unless the object has an id, a string name, and a
    /// `body_parts` key; objects matched by only part of the signature are
    /// not exercise definitions.
    #[must_use]
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let id = match object.get(ID)? {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return None,
        };
        let name = object.get(NAME)?.as_str()?.to_owned();
        let body_parts = object.get(BODY_PARTS)?;

        Some(Self {
            id,
            name,
            body_parts: string_list(Some(body_parts)),
            equipment: string_list(object.get(EQUIPMENT)),
            input_format: object.get(INPUT_FORMAT).cloned(),
            popularity: object.get(POPULARITY).cloned(),
        })
    }

    /// Built-in JEFit exercise
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.id.starts_with(SYSTEM_PREFIX)
    }

    /// User-defined exercise
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_PREFIX)
    }
}

/// Strings of a JSON array minus the `"none"` placeholder
fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|item| *item != NONE_SENTINEL)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Counts reported after a catalog refresh
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExerciseCatalogStats {
    /// All exercises
    pub total: usize,
    /// Ids starting with `d_`
    pub system: usize,
    /// Ids starting with `u_`
    pub custom: usize,
}

impl ExerciseCatalogStats {
    /// Tally a catalog
    #[must_use]
    pub fn from_catalog(catalog: &BTreeMap<String, ExerciseRecord>) -> Self {
        Self {
            total: catalog.len(),
            system: catalog.values().filter(|r| r.is_system()).count(),
            custom: catalog.values().filter(|r| r.is_custom()).count(),
        }
    }
}
