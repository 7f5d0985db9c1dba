//! Domain models for the Skillshare backend.
//!
//! # Core Concepts
//!
//! ## Social graph
//!
//! - [`User`]: a member identity. Every other record points at one.
//! - [`FollowEdge`]: a directed follower → followee relationship. Both
//!   "followers" and "following" views are derived from these edges.
//!
//! ## Content
//!
//! - [`Post`]: owned by its author, with a set of likes.
//! - [`Comment`]: attached to a post; removed with the post.
//! - [`LearningPlan`]: ordered [`LearningStep`]s whose `order_index` is
//!   always their position.
//!
//! ## Notifications
//!
//! - [`Notification`]: written by the fan-out engine when someone likes,
//!   comments, follows or shares. The read flag only moves unread → read.
//!
//! Listings use [`PageRequest`] / [`Page`].

mod follow;
mod notification;
mod page;
mod plan;
mod post;
mod user;

pub use follow::*;
pub use notification::*;
pub use page::*;
pub use plan::*;
pub use post::*;
pub use user::*;
