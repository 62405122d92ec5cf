// ABOUTME: Markdown rendering of a day's workout sessions
// ABOUTME: Resolves exercise ids through a catalog lookup and lists every logged set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use jefit_core::models::{ExerciseRecord, WorkoutSession};

use crate::constants::dates::DATETIME_FORMAT;
use crate::constants::report::{BATCH_SEPARATOR, NO_WORKOUT, UNKNOWN};

/// Render the report for one date.
///
/// `lookup` maps an exercise id to its catalog record; ids it does not know
/// render as `Unknown Exercise (<id>)`.
pub fn render_workout_report<'a, F>(date: &str, sessions: &[WorkoutSession], lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a ExerciseRecord>,
{
    let mut lines = vec![format!("# Workout for {date}\n")];

    if sessions.is_empty() {
        lines.push(NO_WORKOUT.to_owned());
        return lines.join("\n");
    }

    for session in sessions {
        let started = session.started_at().map_or_else(
            || session.date.to_string(),
            |start| start.format(DATETIME_FORMAT).to_string(),
        );
        let (minutes, seconds) = session.duration_parts();

        lines.push(format!("**Started:** {started}"));
        lines.push(format!("**Duration:** {minutes}m {seconds}s"));
        lines.push(format!("**Weight Lifted:** {} lbs\n", session.total_weight));
        lines.push("## Exercises\n".to_owned());

        for (index, log) in session.logs.iter().enumerate() {
            let exercise = lookup(&log.exercise_id);
            let name = exercise.map_or_else(
                || format!("Unknown Exercise ({})", log.exercise_id),
                |record| record.name.clone(),
            );
            let muscle_groups = joined_or_unknown(exercise.map(|r| r.body_parts.as_slice()));
            let equipment = joined_or_unknown(exercise.map(|r| r.equipment.as_slice()));

            lines.push(format!("### {}. {name}", index + 1));
            lines.push(format!("- **Muscle Groups:** {muscle_groups}"));
            lines.push(format!("- **Equipment:** {equipment}"));
            lines.push(String::new());

            for (set_index, set) in log.log_sets.iter().enumerate() {
                lines.push(format!(
                    "  - Set {}: {} lbs × {} reps",
                    set_index + 1,
                    set.weight,
                    set.reps
                ));
            }
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

/// Join per-date reports with a horizontal rule
#[must_use]
pub fn join_reports(reports: &[String]) -> String {
    reports.join(BATCH_SEPARATOR)
}

fn joined_or_unknown(items: Option<&[String]>) -> String {
    match items {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => UNKNOWN.to_owned(),
    }
}
