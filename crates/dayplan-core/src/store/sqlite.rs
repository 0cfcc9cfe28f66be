//! SQLite-backed event store.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, patch_event, EventStore};
use crate::error::StoreError;
use crate::event::{Event, EventPatch, RecurrenceRule};

// === Helper Functions ===

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse a recurrence rule from its JSON column, `None` on null or garbage
fn parse_rule(raw: Option<String>) -> Option<RecurrenceRule> {
    raw.and_then(|json| serde_json::from_str(&json).ok())
}

/// Build an Event from a database row
fn row_to_event(row: &rusqlite::Row) -> Result<Event, rusqlite::Error> {
    let start_time_str: String = row.get(3)?;
    let end_time_str: String = row.get(4)?;
    let created_at_str: String = row.get(10)?;
    let updated_at_str: String = row.get(11)?;
    let rule_json: Option<String> = row.get(9)?;

    Ok(Event {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        start_time: parse_datetime_fallback(&start_time_str),
        end_time: parse_datetime_fallback(&end_time_str),
        description: row.get(5)?,
        location: row.get(6)?,
        is_recurring: row.get(7)?,
        parent_event_id: row.get(8)?,
        recurrence_rule: parse_rule(rule_json),
        created_at: parse_datetime_fallback(&created_at_str),
        updated_at: parse_datetime_fallback(&updated_at_str),
    })
}

const EVENT_COLUMNS: &str = "id, owner_id, title, start_time, end_time, description, location, \
     is_recurring, parent_event_id, recurrence_rule, created_at, updated_at";

/// SQLite database for calendar events.
///
/// Timestamps are stored as RFC 3339 TEXT in UTC; the recurrence rule is a
/// JSON column present only on roots.
pub struct EventDb {
    conn: Connection,
}

impl EventDb {
    /// Open the event database at `~/.config/dayplan/dayplan.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join("dayplan.db");
        let conn = Connection::open(&path).map_err(|source| StoreError::OpenFailed {
            path: path.clone(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open a database at an explicit path (tests, embedding).
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS events (
                    id              TEXT PRIMARY KEY,
                    owner_id        TEXT NOT NULL,
                    title           TEXT NOT NULL,
                    start_time      TEXT NOT NULL,
                    end_time        TEXT NOT NULL,
                    description     TEXT,
                    location        TEXT,
                    is_recurring    INTEGER NOT NULL DEFAULT 0,
                    parent_event_id TEXT,
                    recurrence_rule TEXT,
                    created_at      TEXT NOT NULL,
                    updated_at      TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_events_owner_start
                    ON events(owner_id, start_time);

                CREATE INDEX IF NOT EXISTS idx_events_parent
                    ON events(parent_event_id)
                    WHERE parent_event_id IS NOT NULL;",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }

    fn insert_one(conn: &Connection, event: &Event) -> Result<(), rusqlite::Error> {
        let rule_json = event
            .recurrence_rule
            .as_ref()
            .and_then(|r| serde_json::to_string(r).ok());
        conn.execute(
            "INSERT INTO events (id, owner_id, title, start_time, end_time, description,
                                 location, is_recurring, parent_event_id, recurrence_rule,
                                 created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                event.id,
                event.owner_id,
                event.title,
                event.start_time.to_rfc3339(),
                event.end_time.to_rfc3339(),
                event.description,
                event.location,
                event.is_recurring,
                event.parent_event_id,
                rule_json,
                event.created_at.to_rfc3339(),
                event.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn query_events(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Event>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, row_to_event)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }
        Ok(events)
    }
}

impl EventStore for EventDb {
    fn insert_events(&mut self, events: Vec<Event>) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        for event in &events {
            Self::insert_one(&tx, event)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let event = self
            .conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                params![id],
                row_to_event,
            )
            .optional()?;
        Ok(event)
    }

    fn all_events(&self, owner_id: &str) -> Result<Vec<Event>, StoreError> {
        self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE owner_id = ?1
                 ORDER BY start_time ASC"
            ),
            params![owner_id],
        )
    }

    fn events_in_range(
        &self,
        owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError> {
        self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE owner_id = ?1 AND start_time <= ?3 AND end_time >= ?2
                 ORDER BY start_time ASC"
            ),
            params![owner_id, start.to_rfc3339(), end.to_rfc3339()],
        )
    }

    fn events_by_parent(&self, parent_id: &str) -> Result<Vec<Event>, StoreError> {
        self.query_events(
            &format!(
                "SELECT {EVENT_COLUMNS} FROM events
                 WHERE parent_event_id = ?1
                 ORDER BY start_time ASC"
            ),
            params![parent_id],
        )
    }

    fn apply_patch(&mut self, id: &str, patch: &EventPatch) -> Result<Option<Event>, StoreError> {
        let Some(mut event) = self.event(id)? else {
            return Ok(None);
        };
        patch_event(&mut event, patch);

        self.conn.execute(
            "UPDATE events
             SET title = ?2, start_time = ?3, end_time = ?4, description = ?5,
                 location = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                event.id,
                event.title,
                event.start_time.to_rfc3339(),
                event.end_time.to_rfc3339(),
                event.description,
                event.location,
                event.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(Some(event))
    }

    fn delete_event(&mut self, id: &str) -> Result<bool, StoreError> {
        let affected = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn delete_by_parent(&mut self, parent_id: &str) -> Result<usize, StoreError> {
        let affected = self.conn.execute(
            "DELETE FROM events WHERE parent_event_id = ?1",
            params![parent_id],
        )?;
        Ok(affected)
    }
}
