use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use fitsynth_generator::Dataset;

use crate::error::ExportError;

pub const USERS_FILE: &str = "users.csv";
pub const EVENTS_FILE: &str = "events.csv";
pub const SESSIONS_FILE: &str = "sessions.csv";
pub const SUBSCRIPTIONS_FILE: &str = "subscriptions.csv";

pub const USER_COLUMNS: [&str; 8] = [
    "user_id",
    "install_date",
    "age",
    "gender",
    "acquisition_channel",
    "device_type",
    "country",
    "segment",
];

pub const EVENT_COLUMNS: [&str; 6] = [
    "user_id",
    "event_type",
    "event_timestamp",
    "workout_type",
    "duration_mins",
    "calories",
];

pub const SESSION_COLUMNS: [&str; 4] = [
    "user_id",
    "session_id",
    "session_start",
    "session_duration_mins",
];

pub const SUBSCRIPTION_COLUMNS: [&str; 4] = ["user_id", "subscription_date", "plan", "price_usd"];

/// Write the four tables as CSV under `out_dir`, creating it if needed.
///
/// Returns the written paths in archive order: users, events, sessions,
/// subscriptions.
pub fn write_dataset(dataset: &Dataset, out_dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(out_dir).map_err(ExportError::io(out_dir))?;

    Ok(vec![
        write_table(&out_dir.join(USERS_FILE), &USER_COLUMNS, &dataset.users)?,
        write_table(&out_dir.join(EVENTS_FILE), &EVENT_COLUMNS, &dataset.events)?,
        write_table(
            &out_dir.join(SESSIONS_FILE),
            &SESSION_COLUMNS,
            &dataset.sessions,
        )?,
        write_table(
            &out_dir.join(SUBSCRIPTIONS_FILE),
            &SUBSCRIPTION_COLUMNS,
            &dataset.subscriptions,
        )?,
    ])
}

/// Write one table. The header is written explicitly so an empty table
/// still gets one; serde's own header emission only fires on the first row.
pub fn write_table<T: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: &[T],
) -> Result<PathBuf, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(ExportError::csv(path))?;

    wtr.write_record(columns).map_err(ExportError::csv(path))?;
    for row in rows {
        wtr.serialize(row).map_err(ExportError::csv(path))?;
    }
    wtr.flush().map_err(ExportError::io(path))?;

    info!(path = %path.display(), rows = rows.len(), "table written");
    Ok(path.to_path_buf())
}
