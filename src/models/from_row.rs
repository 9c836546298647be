use rusqlite::{Connection, OptionalExtension, Params, Row};

pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;

    fn query_all<P: Params>(conn: &Connection, sql: &str, params: P) -> rusqlite::Result<Vec<Self>> {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| Self::from_row(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn query_optional<P: Params>(
        conn: &Connection,
        sql: &str,
        params: P,
    ) -> rusqlite::Result<Option<Self>> {
        let mut stmt = conn.prepare(sql)?;
        let row = stmt.query_row(params, |row| Self::from_row(row)).optional()?;
        Ok(row)
    }
}
