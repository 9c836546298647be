use chrono::NaiveDate;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, WorkoutSession, WorkoutSessionInput};

#[derive(Clone)]
pub struct WorkoutSessionRepository {
    pool: DbPool,
}

/// Column values for an insert or a full-row update.
struct SessionRow {
    date: NaiveDate,
    session_time: String,
    activity: String,
    calories_burned: i64,
    duration_minutes: i64,
    member_id: i64,
}

impl SessionRow {
    fn new(input: &WorkoutSessionInput, member_id: i64) -> Self {
        Self {
            date: input.date,
            session_time: input.session_time.clone(),
            activity: input.activity.clone(),
            calories_burned: input.calories_burned,
            duration_minutes: input.duration_minutes,
            member_id,
        }
    }
}

impl WorkoutSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a session owned by `member_id`, ignoring any member id carried in `input`.
    ///
    /// An unknown member surfaces as a foreign key violation from SQLite.
    pub async fn create(&self, member_id: i64, input: &WorkoutSessionInput) -> Result<WorkoutSession> {
        let pool = self.pool.clone();
        let row = SessionRow::new(input, member_id);

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO WorkoutSessions
                    (date, session_time, activity, calories_burned, duration_minutes, member_id)
                 VALUES (?, ?, ?, ?, ?, ?)",
                rusqlite::params![
                    row.date,
                    row.session_time,
                    row.activity,
                    row.calories_burned,
                    row.duration_minutes,
                    row.member_id
                ],
            )?;
            Ok(WorkoutSession {
                session_id: conn.last_insert_rowid(),
                date: row.date,
                session_time: row.session_time,
                activity: row.activity,
                calories_burned: row.calories_burned,
                duration_minutes: row.duration_minutes,
                member_id: row.member_id,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<WorkoutSession>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sessions = WorkoutSession::query_all(
                &conn,
                "SELECT * FROM WorkoutSessions ORDER BY session_id",
                [],
            )?;
            Ok(sessions)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, session_id: i64) -> Result<Option<WorkoutSession>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let session = WorkoutSession::query_optional(
                &conn,
                "SELECT * FROM WorkoutSessions WHERE session_id = ?",
                [session_id],
            )?;
            Ok(session)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_member(&self, member_id: i64) -> Result<Vec<WorkoutSession>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let sessions = WorkoutSession::query_all(
                &conn,
                "SELECT * FROM WorkoutSessions WHERE member_id = ? ORDER BY session_id",
                [member_id],
            )?;
            Ok(sessions)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Replace every column of the session, moving it to `member_id`.
    /// Returns false if the row no longer exists.
    pub async fn update(
        &self,
        session_id: i64,
        member_id: i64,
        input: &WorkoutSessionInput,
    ) -> Result<bool> {
        let pool = self.pool.clone();
        let row = SessionRow::new(input, member_id);

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE WorkoutSessions
                 SET date = ?, session_time = ?, activity = ?, calories_burned = ?,
                     duration_minutes = ?, member_id = ?
                 WHERE session_id = ?",
                rusqlite::params![
                    row.date,
                    row.session_time,
                    row.activity,
                    row.calories_burned,
                    row.duration_minutes,
                    row.member_id,
                    session_id
                ],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, session_id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM WorkoutSessions WHERE session_id = ?", [session_id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
