use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, Member, MemberInput};

#[derive(Clone)]
pub struct MemberRepository {
    pool: DbPool,
}

impl MemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &MemberInput) -> Result<Member> {
        let pool = self.pool.clone();
        let MemberInput { name, age } = input.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO Members (name, age) VALUES (?, ?)",
                rusqlite::params![name, age],
            )?;
            Ok(Member {
                id: conn.last_insert_rowid(),
                name,
                age,
            })
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_all(&self) -> Result<Vec<Member>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let members = Member::query_all(&conn, "SELECT * FROM Members ORDER BY id", [])?;
            Ok(members)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Member>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let member = Member::query_optional(&conn, "SELECT * FROM Members WHERE id = ?", [id])?;
            Ok(member)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Overwrite both fields. Returns false if the row no longer exists.
    pub async fn update(&self, id: i64, input: &MemberInput) -> Result<bool> {
        let pool = self.pool.clone();
        let MemberInput { name, age } = input.clone();

        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute(
                "UPDATE Members SET name = ?, age = ? WHERE id = ?",
                rusqlite::params![name, age, id],
            )?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let rows = conn.execute("DELETE FROM Members WHERE id = ?", [id])?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
