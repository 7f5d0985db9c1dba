use uuid::Uuid;

use super::Social;
use crate::auth::authorize;
use crate::error::Result;
use crate::models::*;

// Every mutation below loads the current owner and runs `authorize` before
// touching the store.

impl Social {
    // ============================================================
    // Posts
    // ============================================================

    pub fn create_post(&self, actor: Uuid, input: CreatePostInput) -> Result<Post> {
        let post = self.db.create_post(actor, input)?;
        tracing::debug!(%actor, post_id = %post.id, "Post created");
        Ok(post)
    }

    pub fn update_post(&self, actor: Uuid, post_id: Uuid, input: UpdatePostInput) -> Result<Post> {
        let post = self.db.require_post(post_id)?;
        authorize(actor, post.user_id, "post")?;
        self.db.update_post_content(post_id, &input.content)
    }

    /// Delete a post along with its comments and likes.
    pub fn delete_post(&self, actor: Uuid, post_id: Uuid) -> Result<()> {
        let post = self.db.require_post(post_id)?;
        authorize(actor, post.user_id, "post")?;
        self.db.delete_post(post_id)?;
        tracing::debug!(%actor, %post_id, "Post deleted");
        Ok(())
    }

    // ============================================================
    // Comments
    // ============================================================

    pub fn update_comment(
        &self,
        actor: Uuid,
        comment_id: Uuid,
        input: CommentInput,
    ) -> Result<Comment> {
        let comment = self.db.require_comment(comment_id)?;
        authorize(actor, comment.user_id, "comment")?;
        self.db.update_comment(comment_id, &input.content)
    }

    pub fn delete_comment(&self, actor: Uuid, comment_id: Uuid) -> Result<()> {
        let comment = self.db.require_comment(comment_id)?;
        authorize(actor, comment.user_id, "comment")?;
        self.db.delete_comment(comment_id)?;
        Ok(())
    }

    // ============================================================
    // Learning plans
    // ============================================================

    pub fn create_plan(&self, actor: Uuid, input: LearningPlanInput) -> Result<LearningPlan> {
        let plan = self.db.create_plan(actor, input)?;
        tracing::debug!(%actor, plan_id = %plan.id, steps = plan.steps.len(), "Plan created");
        Ok(plan)
    }

    pub fn update_plan(
        &self,
        actor: Uuid,
        plan_id: Uuid,
        input: LearningPlanInput,
    ) -> Result<LearningPlan> {
        let plan = self.db.require_plan(plan_id)?;
        authorize(actor, plan.user_id, "learning plan")?;
        self.db.replace_plan(plan_id, input)
    }

    pub fn delete_plan(&self, actor: Uuid, plan_id: Uuid) -> Result<()> {
        let plan = self.db.require_plan(plan_id)?;
        authorize(actor, plan.user_id, "learning plan")?;
        self.db.delete_plan(plan_id)?;
        Ok(())
    }
}
