//! Skillshare social backend.
//!
//! Users follow each other, post, like, comment and share learning plans.
//! The interesting part is [`social`]: the follow graph, the feed built from
//! it, the ownership guard in [`auth`], and the notifications fanned out when
//! someone interacts with you. [`db`] is the SQLite store underneath and
//! [`api`] the axum surface on top.

pub mod api;
pub mod auth;
pub mod client;
pub mod db;
pub mod error;
pub mod models;
pub mod social;
