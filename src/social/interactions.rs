use uuid::Uuid;

use super::fanout::{deliver, SocialAction, SocialEvent};
use super::Social;
use crate::error::{Result, SocialError};
use crate::models::*;

impl Social {
    /// Follow `target`. A repeat follow succeeds without a new edge or a
    /// second notification.
    pub fn follow(&self, actor: Uuid, target: Uuid) -> Result<Interaction<FollowResult>> {
        if actor == target {
            return Err(SocialError::SelfFollowNotAllowed);
        }
        let follower = self.db.require_user(actor)?;

        let outcome = self.db.follow(actor, target)?;
        tracing::debug!(%actor, %target, created = outcome.created, "Follow");

        let event = outcome
            .created
            .then(|| SocialEvent::new(target, &follower, SocialAction::Followed));
        Ok(deliver(self.sink.as_ref(), outcome, event))
    }

    /// Drop the edge to `target` if there is one.
    pub fn unfollow(&self, actor: Uuid, target: Uuid) -> Result<()> {
        let removed = self.db.unfollow(actor, target)?;
        tracing::debug!(%actor, %target, removed, "Unfollow");
        Ok(())
    }

    /// Like a post. Only the first like notifies the author, and authors
    /// liking their own post are not notified.
    pub fn like(&self, actor: Uuid, post_id: Uuid) -> Result<Interaction<LikeResult>> {
        let liker = self.db.require_user(actor)?;

        let created = self.db.add_like(post_id, actor)?;
        let post = self.db.require_post(post_id)?;
        tracing::debug!(%actor, %post_id, created, "Like");

        let event = created.then(|| {
            SocialEvent::new(post.user_id, &liker, SocialAction::Liked { post_id })
        });
        Ok(deliver(
            self.sink.as_ref(),
            LikeResult { post, created },
            event,
        ))
    }

    /// Remove the caller's like. Unliking a post that was never liked is a
    /// no-op.
    pub fn unlike(&self, actor: Uuid, post_id: Uuid) -> Result<Post> {
        let removed = self.db.remove_like(post_id, actor)?;
        tracing::debug!(%actor, %post_id, removed, "Unlike");
        self.db.require_post(post_id)
    }

    pub fn comment(
        &self,
        actor: Uuid,
        post_id: Uuid,
        input: CommentInput,
    ) -> Result<Interaction<Comment>> {
        let commenter = self.db.require_user(actor)?;
        let post = self.db.require_post(post_id)?;

        let comment = self.db.create_comment(post_id, actor, &input.content)?;
        tracing::debug!(%actor, %post_id, comment_id = %comment.id, "Comment");

        let event = SocialEvent::new(post.user_id, &commenter, SocialAction::Commented { post_id });
        Ok(deliver(self.sink.as_ref(), comment, Some(event)))
    }

    /// Tell `recipient` about a learning plan. Sharing with yourself records
    /// nothing.
    pub fn share_plan(
        &self,
        actor: Uuid,
        plan_id: Uuid,
        input: SharePlanInput,
    ) -> Result<Interaction<LearningPlan>> {
        let sharer = self.db.require_user(actor)?;
        let plan = self.db.require_plan(plan_id)?;
        self.db.require_user(input.recipient_id)?;
        tracing::debug!(%actor, %plan_id, recipient = %input.recipient_id, "Share plan");

        let event = SocialEvent::new(
            input.recipient_id,
            &sharer,
            SocialAction::SharedPlan { plan_id },
        );
        Ok(deliver(self.sink.as_ref(), plan, Some(event)))
    }
}
