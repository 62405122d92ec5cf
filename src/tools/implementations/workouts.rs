// ABOUTME: Workout history tools: list_workout_dates, get_workout_info, get_batch_workouts.
// ABOUTME: Validates date arguments, queries JEFit, and renders markdown reports.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Tools
//!
//! - `list_workout_dates` - dates with logged workouts in a range
//! - `get_workout_info` - markdown report for one date
//! - `get_batch_workouts` - markdown reports for several dates

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde_json::Value;
use tracing::debug;

use crate::constants::dates::DATE_FORMAT;
use crate::constants::json_fields::{DATE, DATES, END_DATE, START_DATE};
use crate::constants::tools::{GET_BATCH_WORKOUTS, GET_WORKOUT_INFO, LIST_WORKOUT_DATES};
use crate::errors::{AppResult, ToolError};
use crate::formatters::{join_reports, render_workout_report};
use crate::mcp::schema::{JsonSchema, PropertySchema};
use crate::tools::context::ToolExecutionContext;
use crate::tools::result::ToolResult;
use crate::tools::traits::{McpTool, ToolCapabilities};

const DATE_HINT: &str = "Date in YYYY-MM-DD format";

// ============================================================================
// Argument helpers
// ============================================================================

/// Parse a `YYYY-MM-DD` date argument
///
/// # Errors
///
/// Returns `InvalidParameter` when the value is not a valid date.
pub fn parse_date(tool: &str, parameter: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        ToolError::invalid_parameter(
            tool,
            parameter,
            format!("Invalid date format '{value}'. Use YYYY-MM-DD format: {e}"),
        )
        .into()
    })
}

fn required_str<'a>(args: &'a Value, tool: &str, parameter: &str) -> AppResult<&'a str> {
    match args.get(parameter) {
        None | Some(Value::Null) => Err(ToolError::missing_parameter(tool, parameter).into()),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ToolError::invalid_parameter(tool, parameter, "must be a string").into()),
    }
}

fn optional_str<'a>(args: &'a Value, tool: &str, parameter: &str) -> AppResult<Option<&'a str>> {
    match args.get(parameter) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(ToolError::invalid_parameter(tool, parameter, "must be a string").into()),
    }
}

/// Validate an inclusive date range; `end` defaults to `today`
///
/// # Errors
///
/// Returns `InvalidParameter` for malformed dates or a start after the end.
pub fn parse_date_range(
    start: &str,
    end: Option<&str>,
    today: NaiveDate,
) -> AppResult<(NaiveDate, NaiveDate)> {
    let start_date = parse_date(LIST_WORKOUT_DATES, START_DATE, start)?;
    let end_date = match end {
        Some(end) => parse_date(LIST_WORKOUT_DATES, END_DATE, end)?,
        None => today,
    };

    if start_date > end_date {
        return Err(ToolError::invalid_parameter(
            LIST_WORKOUT_DATES,
            START_DATE,
            "start_date must be before or equal to end_date",
        )
        .into());
    }
    Ok((start_date, end_date))
}

/// Calendar dates inside `[start, end]`, ascending, without duplicates
///
/// Entries that are not `YYYY-MM-DD` dates are skipped.
#[must_use]
pub fn filter_dates_in_range<I, S>(dates: I, start: NaiveDate, end: NaiveDate) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut in_range: Vec<NaiveDate> = dates
        .into_iter()
        .filter_map(|date| {
            let date = date.as_ref();
            let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).ok();
            if parsed.is_none() {
                debug!(date, "Skipping unparsable calendar date");
            }
            parsed
        })
        .filter(|date| (start..=end).contains(date))
        .collect();
    in_range.sort_unstable();
    in_range.dedup();
    in_range
        .into_iter()
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect()
}

/// Validate every entry of a date list and sort ascending
///
/// # Errors
///
/// Returns `InvalidParameter` for an empty list or any malformed date; no
/// date is fetched until all of them are valid.
pub fn parse_date_list(args: &Value) -> AppResult<Vec<NaiveDate>> {
    let items = match args.get(DATES) {
        None | Some(Value::Null) => {
            return Err(ToolError::missing_parameter(GET_BATCH_WORKOUTS, DATES).into())
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(
                ToolError::invalid_parameter(GET_BATCH_WORKOUTS, DATES, "must be an array").into(),
            )
        }
    };

    if items.is_empty() {
        return Err(ToolError::invalid_parameter(
            GET_BATCH_WORKOUTS,
            DATES,
            "dates list cannot be empty",
        )
        .into());
    }

    let mut dates = items
        .iter()
        .map(|item| {
            item.as_str()
                .ok_or_else(|| {
                    ToolError::invalid_parameter(
                        GET_BATCH_WORKOUTS,
                        DATES,
                        format!("expected date strings, got {item}"),
                    )
                    .into()
                })
                .and_then(|value| parse_date(GET_BATCH_WORKOUTS, DATES, value))
        })
        .collect::<AppResult<Vec<_>>>()?;
    dates.sort_unstable();
    Ok(dates)
}

/// Fetch and render the report for one date
async fn workout_report(context: &ToolExecutionContext, date: NaiveDate) -> AppResult<String> {
    let sessions = context.client().sessions_for_date(date).await?;
    let label = date.format(DATE_FORMAT).to_string();
    let catalog = context.catalog().await;
    let entries = catalog.read().await;
    Ok(render_workout_report(&label, &sessions, |id| entries.get(id)))
}

// ============================================================================
// ListWorkoutDatesTool
// ============================================================================

/// Dates with logged workouts inside a range
pub struct ListWorkoutDatesTool;

#[async_trait]
impl McpTool for ListWorkoutDatesTool {
    fn name(&self) -> &'static str {
        LIST_WORKOUT_DATES
    }

    fn description(&self) -> &'static str {
        "List all dates with logged workouts between start_date and end_date (inclusive). \
         end_date defaults to today. Returns dates in YYYY-MM-DD format, oldest first."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            START_DATE.to_owned(),
            PropertySchema::string("Start date in YYYY-MM-DD format"),
        );
        properties.insert(
            END_DATE.to_owned(),
            PropertySchema::string("End date in YYYY-MM-DD format (defaults to today)"),
        );
        JsonSchema::object(properties, &[START_DATE])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA | ToolCapabilities::REQUIRES_SESSION
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        let start = required_str(&args, LIST_WORKOUT_DATES, START_DATE)?;
        let end = optional_str(&args, LIST_WORKOUT_DATES, END_DATE)?;
        let (start, end) = parse_date_range(start, end, Local::now().date_naive())?;

        let calendar = context.client().workout_dates().await?;
        let dates = filter_dates_in_range(&calendar, start, end);
        debug!(count = dates.len(), %start, %end, "Workout dates in range");
        Ok(ToolResult::ok(Value::from(dates)))
    }
}

// ============================================================================
// GetWorkoutInfoTool
// ============================================================================

/// Markdown report for one date
pub struct GetWorkoutInfoTool;

#[async_trait]
impl McpTool for GetWorkoutInfoTool {
    fn name(&self) -> &'static str {
        GET_WORKOUT_INFO
    }

    fn description(&self) -> &'static str {
        "Get detailed workout information for a specific date: start time, duration, \
         total weight, and every exercise with its muscle groups, equipment, and sets."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(DATE.to_owned(), PropertySchema::string(DATE_HINT));
        JsonSchema::object(properties, &[DATE])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
            | ToolCapabilities::REQUIRES_SESSION
            | ToolCapabilities::USES_CATALOG
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        let date = required_str(&args, GET_WORKOUT_INFO, DATE)?;
        let date = parse_date(GET_WORKOUT_INFO, DATE, date)?;
        Ok(ToolResult::text(workout_report(context, date).await?))
    }
}

// ============================================================================
// GetBatchWorkoutsTool
// ============================================================================

/// Markdown reports for several dates in one call
pub struct GetBatchWorkoutsTool;

#[async_trait]
impl McpTool for GetBatchWorkoutsTool {
    fn name(&self) -> &'static str {
        GET_BATCH_WORKOUTS
    }

    fn description(&self) -> &'static str {
        "Get detailed workout information for multiple dates in a single call. \
         Reports are returned oldest first, separated by horizontal rules."
    }

    fn input_schema(&self) -> JsonSchema {
        let mut properties = HashMap::new();
        properties.insert(
            DATES.to_owned(),
            PropertySchema::string_array("Dates in YYYY-MM-DD format"),
        );
        JsonSchema::object(properties, &[DATES])
    }

    fn capabilities(&self) -> ToolCapabilities {
        ToolCapabilities::READS_DATA
            | ToolCapabilities::REQUIRES_SESSION
            | ToolCapabilities::USES_CATALOG
    }

    async fn execute(&self, args: Value, context: &ToolExecutionContext) -> AppResult<ToolResult> {
        let dates = parse_date_list(&args)?;

        let mut reports = Vec::with_capacity(dates.len());
        for date in dates {
            reports.push(workout_report(context, date).await?);
        }
        Ok(ToolResult::text(join_reports(&reports)))
    }
}

/// All workout tools, for registration
#[must_use]
pub fn create_workout_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(ListWorkoutDatesTool),
        Box::new(GetWorkoutInfoTool),
        Box::new(GetBatchWorkoutsTool),
    ]
}
