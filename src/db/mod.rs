//! SQLite-backed store for users, the follow graph, content and notifications.
//!
//! Every public operation takes the connection lock once and runs a single
//! statement or a single transaction while holding it. That makes each
//! operation atomic with respect to every other, which is what the follow
//! graph (one edge per ordered pair) and the notification read-state
//! operations rely on under concurrent requests.
//!
//! The store does not check ownership; the social service does that with
//! [`crate::auth::authorize`] before calling a mutation here.

mod content;
mod graph;
mod notifications;
mod plans;
mod schema;
mod users;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use crate::error::{Result, SocialError};

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> anyhow::Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "skillshare")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let db_path = dirs.data_dir().join("skillshare.db");
        Self::open(db_path)
    }

    pub fn open_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> anyhow::Result<()> {
        let conn = self.conn()?;
        schema::run_migrations(&conn)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SocialError::StoreUnavailable("database lock poisoned".to_string()))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Fixed-width RFC 3339 so that text ordering in SQL matches time ordering.
fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time, truncated to the precision that is stored.
fn now() -> DateTime<Utc> {
    parse_datetime(format_datetime(Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_timestamps_sort_lexically() {
        let earlier = DateTime::parse_from_rfc3339("2024-01-01T10:00:00.5Z")
            .unwrap()
            .with_timezone(&Utc);
        let later = DateTime::parse_from_rfc3339("2024-01-01T10:00:00.25Z")
            .unwrap()
            .with_timezone(&Utc)
            + chrono::Duration::seconds(1);

        assert!(format_datetime(earlier) < format_datetime(later));
        assert_eq!(format_datetime(earlier), "2024-01-01T10:00:00.500000Z");
    }

    #[test]
    fn now_round_trips_through_storage() {
        let t = now();
        assert_eq!(parse_datetime(format_datetime(t)), t);
    }
}
