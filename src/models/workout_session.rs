use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub session_id: i64,
    pub date: NaiveDate,
    pub session_time: String,
    pub activity: String,
    pub calories_burned: i64,
    pub duration_minutes: i64,
    pub member_id: i64,
}

impl FromSqliteRow for WorkoutSession {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            session_id: row.get("session_id")?,
            date: row.get("date")?,
            session_time: row.get("session_time")?,
            activity: row.get("activity")?,
            calories_burned: row.get("calories_burned")?,
            duration_minutes: row.get("duration_minutes")?,
            member_id: row.get("member_id")?,
        })
    }
}

/// Validated session fields.
///
/// `member_id` is only optional on create, where the owning member is taken
/// from the request path instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSessionInput {
    pub date: NaiveDate,
    pub session_time: String,
    pub activity: String,
    pub calories_burned: i64,
    pub duration_minutes: i64,
    pub member_id: Option<i64>,
}
