use rusqlite::Row;
use uuid::Uuid;

use super::users::require_user_exists;
use super::{format_datetime, now, parse_datetime, parse_uuid, Database};
use crate::error::Result;
use crate::models::*;

fn row_to_notification(row: &Row) -> rusqlite::Result<Notification> {
    Ok(Notification {
        id: parse_uuid(row.get::<_, String>(0)?),
        recipient_id: parse_uuid(row.get::<_, String>(1)?),
        message: row.get(2)?,
        notification_type: NotificationType::from_str(&row.get::<_, String>(3)?)
            .unwrap_or(NotificationType::Like),
        link: row.get(4)?,
        read: row.get::<_, i32>(5)? != 0,
        created_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

impl Database {
    // ============================================================
    // Notifications
    // ============================================================
    //
    // Each operation below is one statement under the connection lock, so
    // notify / mark_all_read / clear_read for a recipient are linearizable:
    // a clear never sees a half-written notification, and a mark never
    // counts a row twice.

    /// Append an unread notification for `input.recipient_id`.
    pub fn create_notification(&self, input: CreateNotificationInput) -> Result<Notification> {
        let conn = self.conn()?;
        require_user_exists(&conn, input.recipient_id)?;

        let id = Uuid::new_v4();
        let now = now();

        conn.execute(
            "INSERT INTO notifications (id, recipient_id, message, notification_type, link, is_read, created_at)
             VALUES (?, ?, ?, ?, ?, 0, ?)",
            (
                id.to_string(),
                input.recipient_id.to_string(),
                &input.message,
                input.notification_type.as_str(),
                &input.link,
                format_datetime(now),
            ),
        )?;

        Ok(Notification {
            id,
            recipient_id: input.recipient_id,
            message: input.message,
            notification_type: input.notification_type,
            link: input.link,
            read: false,
            created_at: now,
        })
    }

    /// The recipient's notifications, newest first.
    pub fn list_notifications(
        &self,
        recipient_id: Uuid,
        request: PageRequest,
    ) -> Result<Page<Notification>> {
        let conn = self.conn()?;

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = ?",
            [recipient_id.to_string()],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(
            "SELECT id, recipient_id, message, notification_type, link, is_read, created_at
             FROM notifications WHERE recipient_id = ?
             ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?",
        )?;
        let notifications = stmt
            .query_map(
                (recipient_id.to_string(), request.limit(), request.offset()),
                row_to_notification,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(notifications, request, total))
    }

    pub fn unread_count(&self, recipient_id: Uuid) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = ? AND is_read = 0",
            [recipient_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Flip every unread notification of the recipient to read. Returns how
    /// many changed.
    pub fn mark_all_read(&self, recipient_id: Uuid) -> Result<usize> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE notifications SET is_read = 1 WHERE recipient_id = ? AND is_read = 0",
            [recipient_id.to_string()],
        )?;
        Ok(rows)
    }

    /// Delete the recipient's read notifications. Unread ones are kept.
    /// Returns how many were deleted.
    pub fn clear_read(&self, recipient_id: Uuid) -> Result<usize> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "DELETE FROM notifications WHERE recipient_id = ? AND is_read = 1",
            [recipient_id.to_string()],
        )?;
        Ok(rows)
    }
}
