use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              TEXT PRIMARY KEY,
            email           TEXT NOT NULL UNIQUE,
            password        TEXT NOT NULL,
            display_name    TEXT NOT NULL,
            photo_url       TEXT NOT NULL DEFAULT '',
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS friends (
            id      INTEGER PRIMARY KEY,
            owner   TEXT NOT NULL,
            friend  TEXT NOT NULL,
            state   INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_friends_owner
            ON friends(owner, state);

        CREATE INDEX IF NOT EXISTS idx_friends_friend
            ON friends(friend, state);

        CREATE TABLE IF NOT EXISTS lists (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            owner       TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_lists_owner
            ON lists(owner);

        CREATE TABLE IF NOT EXISTS gifts (
            id              INTEGER PRIMARY KEY,
            name            TEXT NOT NULL,
            description     TEXT NOT NULL DEFAULT '',
            url             TEXT NOT NULL DEFAULT '',
            image_url       TEXT NOT NULL DEFAULT '',
            list_id         INTEGER NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
            claim_status    INTEGER NOT NULL DEFAULT 0,
            claimed_by      TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_gifts_list
            ON gifts(list_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
