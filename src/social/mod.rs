//! The social core: feed composition, interactions and their notifications.
//!
//! Mutations follow one order everywhere: check the caller, persist the
//! change, then fan out the notification. Fan-out is best-effort and never
//! undoes the change it reports on.

mod content;
mod fanout;
mod feed;
mod interactions;

use std::sync::Arc;

use uuid::Uuid;

use crate::db::Database;
use crate::error::Result;
use crate::models::*;

pub use fanout::{NotificationSink, SocialAction, SocialEvent};

/// Entry point for every operation that needs more than a single store call.
#[derive(Clone)]
pub struct Social {
    db: Database,
    sink: Arc<dyn NotificationSink>,
}

impl Social {
    pub fn new(db: Database) -> Self {
        let sink: Arc<dyn NotificationSink> = Arc::new(db.clone());
        Self { db, sink }
    }

    /// Use a different notification sink. Reads and read-state operations
    /// still go to `db`.
    pub fn with_sink(db: Database, sink: Arc<dyn NotificationSink>) -> Self {
        Self { db, sink }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    // ============================================================
    // Notification read state (always scoped to the caller)
    // ============================================================

    pub fn notifications(&self, actor: Uuid, request: PageRequest) -> Result<Page<Notification>> {
        self.db.list_notifications(actor, request)
    }

    pub fn unread_count(&self, actor: Uuid) -> Result<i64> {
        self.db.unread_count(actor)
    }

    pub fn mark_all_read(&self, actor: Uuid) -> Result<()> {
        let changed = self.db.mark_all_read(actor)?;
        tracing::debug!(%actor, changed, "Marked notifications read");
        Ok(())
    }

    pub fn clear_read(&self, actor: Uuid) -> Result<()> {
        let deleted = self.db.clear_read(actor)?;
        tracing::debug!(%actor, deleted, "Cleared read notifications");
        Ok(())
    }
}
