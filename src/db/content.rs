use std::collections::HashSet;

use rusqlite::{Connection, OptionalExtension, Row, ToSql};
use uuid::Uuid;

use super::users::require_user_exists;
use super::{format_datetime, now, parse_datetime, parse_uuid, Database};
use crate::error::{require_text, Result, SocialError};
use crate::models::*;

const POST_SELECT: &str = "SELECT p.id, p.user_id, p.content, p.post_type,
        (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id),
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id),
        p.created_at, p.updated_at
     FROM posts p";

/// Newest first; rowid breaks timestamp ties so paging is deterministic.
const POST_ORDER: &str = "ORDER BY p.created_at DESC, p.rowid DESC";

const COMMENT_COLUMNS: &str = "id, post_id, user_id, content, created_at, updated_at";

fn row_to_post(row: &Row) -> rusqlite::Result<Post> {
    Ok(Post {
        id: parse_uuid(row.get::<_, String>(0)?),
        user_id: parse_uuid(row.get::<_, String>(1)?),
        content: row.get(2)?,
        post_type: PostType::from_str(&row.get::<_, String>(3)?)
            .unwrap_or(PostType::SkillSharing),
        like_count: row.get(4)?,
        comment_count: row.get(5)?,
        created_at: parse_datetime(row.get::<_, String>(6)?),
        updated_at: parse_datetime(row.get::<_, String>(7)?),
    })
}

fn row_to_comment(row: &Row) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: parse_uuid(row.get::<_, String>(0)?),
        post_id: parse_uuid(row.get::<_, String>(1)?),
        user_id: parse_uuid(row.get::<_, String>(2)?),
        content: row.get(3)?,
        created_at: parse_datetime(row.get::<_, String>(4)?),
        updated_at: parse_datetime(row.get::<_, String>(5)?),
    })
}

fn select_post(conn: &Connection, id: Uuid) -> Result<Option<Post>> {
    let post = conn
        .query_row(
            &format!("{POST_SELECT} WHERE p.id = ?"),
            [id.to_string()],
            row_to_post,
        )
        .optional()?;
    Ok(post)
}

fn post_exists(conn: &Connection, id: Uuid) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM posts WHERE id = ?",
        [id.to_string()],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Run a filtered post query as one page. `filter` is appended after
/// `WHERE` and binds `params` in order.
fn page_posts(
    conn: &Connection,
    filter: &str,
    params: Vec<Box<dyn ToSql>>,
    request: PageRequest,
) -> Result<Page<Post>> {
    let params_ref: Vec<&dyn ToSql> = params.iter().map(|p| p.as_ref()).collect();

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM posts p WHERE {filter}"),
        params_ref.as_slice(),
        |row| row.get(0),
    )?;

    let limit = request.limit();
    let offset = request.offset();
    let mut paged = params_ref.clone();
    paged.push(&limit);
    paged.push(&offset);

    let mut stmt = conn.prepare(&format!(
        "{POST_SELECT} WHERE {filter} {POST_ORDER} LIMIT ? OFFSET ?"
    ))?;
    let posts = stmt
        .query_map(paged.as_slice(), row_to_post)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page::new(posts, request, total))
}

impl Database {
    // ============================================================
    // Posts
    // ============================================================

    pub fn create_post(&self, owner_id: Uuid, input: CreatePostInput) -> Result<Post> {
        require_text("content", &input.content)?;

        let conn = self.conn()?;
        require_user_exists(&conn, owner_id)?;

        let id = Uuid::new_v4();
        let now = now();
        let post_type = input.post_type.unwrap_or(PostType::SkillSharing);

        conn.execute(
            "INSERT INTO posts (id, user_id, content, post_type, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                owner_id.to_string(),
                &input.content,
                post_type.as_str(),
                format_datetime(now),
                format_datetime(now),
            ),
        )?;

        Ok(Post {
            id,
            user_id: owner_id,
            content: input.content,
            post_type,
            like_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_post(&self, id: Uuid) -> Result<Option<Post>> {
        let conn = self.conn()?;
        select_post(&conn, id)
    }

    pub fn require_post(&self, id: Uuid) -> Result<Post> {
        self.get_post(id)?.ok_or(SocialError::NotFound("Post"))
    }

    pub fn update_post_content(&self, id: Uuid, content: &str) -> Result<Post> {
        require_text("content", content)?;

        let conn = self.conn()?;
        let rows = conn.execute(
            "UPDATE posts SET content = ?, updated_at = ? WHERE id = ?",
            (content, format_datetime(now()), id.to_string()),
        )?;
        if rows == 0 {
            return Err(SocialError::NotFound("Post"));
        }
        select_post(&conn, id)?.ok_or(SocialError::NotFound("Post"))
    }

    /// Delete a post together with its comments and likes.
    ///
    /// The dependent rows are removed explicitly, in one transaction, before
    /// the post itself.
    pub fn delete_post(&self, id: Uuid) -> Result<bool> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM comments WHERE post_id = ?", [id.to_string()])?;
        tx.execute("DELETE FROM post_likes WHERE post_id = ?", [id.to_string()])?;
        let rows = tx.execute("DELETE FROM posts WHERE id = ?", [id.to_string()])?;
        tx.commit()?;
        Ok(rows > 0)
    }

    pub fn list_posts(&self, request: PageRequest) -> Result<Page<Post>> {
        let conn = self.conn()?;
        page_posts(&conn, "1 = 1", Vec::new(), request)
    }

    pub fn list_posts_by_author(&self, author_id: Uuid, request: PageRequest) -> Result<Page<Post>> {
        let conn = self.conn()?;
        page_posts(
            &conn,
            "p.user_id = ?",
            vec![Box::new(author_id.to_string())],
            request,
        )
    }

    /// Posts written by anyone `viewer` follows, newest first.
    ///
    /// The follow set is resolved inside the query, so its size is not
    /// bounded by the number of bind parameters.
    pub fn posts_followed_by(&self, viewer: Uuid, request: PageRequest) -> Result<Page<Post>> {
        let conn = self.conn()?;
        page_posts(
            &conn,
            "p.user_id IN (SELECT followee_id FROM follows WHERE follower_id = ?)",
            vec![Box::new(viewer.to_string())],
            request,
        )
    }

    // ============================================================
    // Likes
    // ============================================================

    /// Add `user_id` to the post's like set. Returns `false` if it was
    /// already there.
    pub fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        if !post_exists(&conn, post_id)? {
            return Err(SocialError::NotFound("Post"));
        }
        require_user_exists(&conn, user_id)?;

        let inserted = conn.execute(
            "INSERT OR IGNORE INTO post_likes (post_id, user_id, created_at) VALUES (?, ?, ?)",
            (
                post_id.to_string(),
                user_id.to_string(),
                format_datetime(now()),
            ),
        )?;
        Ok(inserted == 1)
    }

    /// Remove `user_id` from the post's like set. Returns `false` if it was
    /// not there.
    pub fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        if !post_exists(&conn, post_id)? {
            return Err(SocialError::NotFound("Post"));
        }
        let rows = conn.execute(
            "DELETE FROM post_likes WHERE post_id = ? AND user_id = ?",
            (post_id.to_string(), user_id.to_string()),
        )?;
        Ok(rows > 0)
    }

    pub fn likers(&self, post_id: Uuid) -> Result<HashSet<Uuid>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT user_id FROM post_likes WHERE post_id = ?")?;
        let ids = stmt
            .query_map([post_id.to_string()], |row| {
                Ok(parse_uuid(row.get::<_, String>(0)?))
            })?
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(ids)
    }

    // ============================================================
    // Comments
    // ============================================================

    pub fn create_comment(&self, post_id: Uuid, owner_id: Uuid, content: &str) -> Result<Comment> {
        require_text("content", content)?;

        let conn = self.conn()?;
        if !post_exists(&conn, post_id)? {
            return Err(SocialError::NotFound("Post"));
        }
        require_user_exists(&conn, owner_id)?;

        let id = Uuid::new_v4();
        let now = now();

        conn.execute(
            "INSERT INTO comments (id, post_id, user_id, content, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                post_id.to_string(),
                owner_id.to_string(),
                content,
                format_datetime(now),
                format_datetime(now),
            ),
        )?;

        Ok(Comment {
            id,
            post_id,
            user_id: owner_id,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn get_comment(&self, id: Uuid) -> Result<Option<Comment>> {
        let conn = self.conn()?;
        let comment = conn
            .query_row(
                &format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"),
                [id.to_string()],
                row_to_comment,
            )
            .optional()?;
        Ok(comment)
    }

    pub fn require_comment(&self, id: Uuid) -> Result<Comment> {
        self.get_comment(id)?.ok_or(SocialError::NotFound("Comment"))
    }

    pub fn update_comment(&self, id: Uuid, content: &str) -> Result<Comment> {
        require_text("content", content)?;

        let existing = self.require_comment(id)?;
        let conn = self.conn()?;
        let now = now();
        conn.execute(
            "UPDATE comments SET content = ?, updated_at = ? WHERE id = ?",
            (content, format_datetime(now), id.to_string()),
        )?;

        Ok(Comment {
            content: content.to_string(),
            updated_at: now,
            ..existing
        })
    }

    pub fn delete_comment(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM comments WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    /// Comments on a post, oldest first.
    pub fn list_comments(&self, post_id: Uuid, request: PageRequest) -> Result<Page<Comment>> {
        let conn = self.conn()?;
        if !post_exists(&conn, post_id)? {
            return Err(SocialError::NotFound("Post"));
        }

        let total: i64 = conn.query_row(
            "SELECT COUNT(*) FROM comments WHERE post_id = ?",
            [post_id.to_string()],
            |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ?
             ORDER BY created_at, rowid LIMIT ? OFFSET ?"
        ))?;
        let comments = stmt
            .query_map(
                (post_id.to_string(), request.limit(), request.offset()),
                row_to_comment,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(comments, request, total))
    }
}
