use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{format_datetime, now, parse_datetime, parse_uuid, Database};
use crate::error::{require_text, Result, SocialError};
use crate::models::*;

const USER_COLUMNS: &str = "id, name, email, bio, created_at, updated_at";

const SEARCH_LIMIT: u32 = 50;

pub(super) fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: parse_uuid(row.get::<_, String>(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        bio: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

/// Make `%`, `_` and the escape character match themselves in a `LIKE`
/// pattern that uses a backslash escape.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Existence check used by every operation that references another user.
pub(super) fn user_exists(conn: &Connection, id: Uuid) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE id = ?",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub(super) fn require_user_exists(conn: &Connection, id: Uuid) -> Result<()> {
    if user_exists(conn, id)? {
        Ok(())
    } else {
        Err(SocialError::NotFound("User"))
    }
}

fn select_user(conn: &Connection, id: Uuid) -> Result<Option<User>> {
    let user = conn
        .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
            [id.to_string()],
            row_to_user,
        )
        .optional()?;
    Ok(user)
}

impl Database {
    // ============================================================
    // Identity directory
    // ============================================================

    pub fn create_user(&self, input: CreateUserInput) -> Result<User> {
        require_text("name", &input.name)?;
        require_text("email", &input.email)?;

        let conn = self.conn()?;
        let taken: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE email = ?",
            [&input.email],
            |row| row.get(0),
        )?;
        if taken > 0 {
            return Err(SocialError::InvalidInput(format!(
                "email {} is already registered",
                input.email
            )));
        }

        let id = Uuid::new_v4();
        let now = now();

        conn.execute(
            "INSERT INTO users (id, name, email, bio, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.name,
                &input.email,
                &input.bio,
                format_datetime(now),
                format_datetime(now),
            ),
        )?;

        Ok(User {
            id,
            name: input.name,
            email: input.email,
            bio: input.bio,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let conn = self.conn()?;
        select_user(&conn, id)
    }

    /// Look up a user, failing with `NotFound` when absent.
    pub fn require_user(&self, id: Uuid) -> Result<User> {
        self.get_user(id)?.ok_or(SocialError::NotFound("User"))
    }

    pub fn user_exists(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        user_exists(&conn, id)
    }

    pub fn update_profile(&self, id: Uuid, input: UpdateProfileInput) -> Result<User> {
        if let Some(name) = &input.name {
            require_text("name", name)?;
        }

        let conn = self.conn()?;
        let existing = select_user(&conn, id)?.ok_or(SocialError::NotFound("User"))?;

        let now = now();
        let name = input.name.unwrap_or(existing.name);
        let bio = input.bio.or(existing.bio);

        conn.execute(
            "UPDATE users SET name = ?, bio = ?, updated_at = ? WHERE id = ?",
            (&name, &bio, format_datetime(now), id.to_string()),
        )?;

        Ok(User {
            id,
            name,
            email: existing.email,
            bio,
            created_at: existing.created_at,
            updated_at: now,
        })
    }

    /// Substring match on name or email, ordered by name.
    pub fn search_users(&self, query: &str) -> Result<Vec<User>> {
        require_text("query", query)?;

        let conn = self.conn()?;
        let pattern = format!("%{}%", escape_like(query.trim()));
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM users
             WHERE name LIKE ?1 ESCAPE '\\' OR email LIKE ?1 ESCAPE '\\'
             ORDER BY name, id LIMIT ?2"
        ))?;

        let users = stmt
            .query_map((&pattern, SEARCH_LIMIT), row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }
}
