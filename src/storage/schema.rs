use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> rusqlite::Result<()> {
    // Append-only measurement log
    conn.execute(
        "CREATE TABLE IF NOT EXISTS speedtests (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts_utc TEXT NOT NULL,
            ping_ms REAL,
            download_mbps REAL,
            upload_mbps REAL,
            server_name TEXT,
            server_country TEXT
        )",
        [],
    )?;

    create_indexes(conn)?;

    Ok(())
}

fn create_indexes(conn: &Connection) -> rusqlite::Result<()> {
    // Index on timestamp for time-based queries
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_speedtests_ts_utc
         ON speedtests(ts_utc)",
        [],
    )?;

    Ok(())
}
