use uuid::Uuid;

use super::Social;
use crate::error::Result;
use crate::models::*;

impl Social {
    /// Posts by the people `viewer` follows, newest first.
    ///
    /// Someone who follows nobody gets an empty page, not the global
    /// timeline.
    pub fn compose_feed(&self, viewer: Uuid, request: PageRequest) -> Result<Page<Post>> {
        self.db.require_user(viewer)?;

        if self.db.following_count(viewer)? == 0 {
            return Ok(Page::empty(request));
        }

        self.db.posts_followed_by(viewer, request)
    }
}
