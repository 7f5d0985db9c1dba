use std::collections::HashSet;

use rusqlite::Connection;
use uuid::Uuid;

use super::users::{require_user_exists, row_to_user};
use super::{format_datetime, now, parse_datetime, parse_uuid, Database};
use crate::error::{Result, SocialError};
use crate::models::*;

fn id_set(conn: &Connection, sql: &str, user_id: Uuid) -> Result<HashSet<Uuid>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map([user_id.to_string()], |row| {
            Ok(parse_uuid(row.get::<_, String>(0)?))
        })?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(ids)
}

impl Database {
    // ============================================================
    // Social graph
    // ============================================================

    /// Add the edge `follower → followee` if it is not already there.
    ///
    /// Repeating a follow is a successful no-op reported with
    /// `created == false`. Concurrent duplicates converge to one edge because
    /// the ordered pair is the table's primary key.
    pub fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<FollowResult> {
        if follower_id == followee_id {
            return Err(SocialError::SelfFollowNotAllowed);
        }

        let conn = self.conn()?;
        require_user_exists(&conn, follower_id)?;
        require_user_exists(&conn, followee_id)?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO follows (follower_id, followee_id, created_at) VALUES (?, ?, ?)",
            (
                follower_id.to_string(),
                followee_id.to_string(),
                format_datetime(now()),
            ),
        )?;

        let created_at: String = conn.query_row(
            "SELECT created_at FROM follows WHERE follower_id = ? AND followee_id = ?",
            (follower_id.to_string(), followee_id.to_string()),
            |row| row.get(0),
        )?;

        Ok(FollowResult {
            edge: FollowEdge {
                follower_id,
                followee_id,
                created_at: parse_datetime(created_at),
            },
            created: inserted == 1,
        })
    }

    /// Remove the edge if present. Returns whether an edge was removed.
    pub fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute(
            "DELETE FROM follows WHERE follower_id = ? AND followee_id = ?",
            (follower_id.to_string(), followee_id.to_string()),
        )?;
        Ok(rows > 0)
    }

    pub fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ? AND followee_id = ?",
            (follower_id.to_string(), followee_id.to_string()),
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn following_count(&self, user_id: Uuid) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM follows WHERE follower_id = ?",
            [user_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Identities that `user_id` follows.
    pub fn following_set(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let conn = self.conn()?;
        id_set(
            &conn,
            "SELECT followee_id FROM follows WHERE follower_id = ?",
            user_id,
        )
    }

    /// Identities that follow `user_id`.
    pub fn followers_of(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let conn = self.conn()?;
        id_set(
            &conn,
            "SELECT follower_id FROM follows WHERE followee_id = ?",
            user_id,
        )
    }

    /// Profiles of the users `user_id` follows, ordered by name.
    pub fn list_following(&self, user_id: Uuid) -> Result<Vec<User>> {
        let conn = self.conn()?;
        require_user_exists(&conn, user_id)?;
        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.email, u.bio, u.created_at, u.updated_at
             FROM follows f JOIN users u ON u.id = f.followee_id
             WHERE f.follower_id = ? ORDER BY u.name, u.id",
        )?;
        let users = stmt
            .query_map([user_id.to_string()], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Profiles of the users following `user_id`, ordered by name.
    pub fn list_followers(&self, user_id: Uuid) -> Result<Vec<User>> {
        let conn = self.conn()?;
        require_user_exists(&conn, user_id)?;
        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.email, u.bio, u.created_at, u.updated_at
             FROM follows f JOIN users u ON u.id = f.follower_id
             WHERE f.followee_id = ? ORDER BY u.name, u.id",
        )?;
        let users = stmt
            .query_map([user_id.to_string()], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}
