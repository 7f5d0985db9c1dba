mod handlers;
pub mod middleware;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::db::Database;
use crate::social::Social;

pub use handlers::ACTOR_HEADER;
pub use middleware::SecurityConfig;

/// Router with authentication disabled (local development and tests).
pub fn create_router(db: Database) -> Router {
    create_router_with_config(Social::new(db), SecurityConfig::disabled())
}

pub fn create_router_with_config(social: Social, config: SecurityConfig) -> Router {
    let api = Router::new()
        // Users and the follow graph
        .route("/users", post(handlers::create_user))
        .route("/users/me", get(handlers::get_current_user))
        .route("/users/me", put(handlers::update_profile))
        .route("/users/search", get(handlers::search_users))
        .route("/users/{id}", get(handlers::get_user))
        .route("/users/{id}/followers", get(handlers::list_followers))
        .route("/users/{id}/following", get(handlers::list_following))
        .route("/users/{id}/posts", get(handlers::list_user_posts))
        .route("/users/{id}/follow", post(handlers::follow_user))
        .route("/users/{id}/follow", delete(handlers::unfollow_user))
        // Posts
        .route("/posts", get(handlers::list_posts))
        .route("/posts", post(handlers::create_post))
        .route("/posts/feed", get(handlers::get_feed))
        .route("/posts/{id}", get(handlers::get_post))
        .route("/posts/{id}", put(handlers::update_post))
        .route("/posts/{id}", delete(handlers::delete_post))
        .route("/posts/{id}/like", post(handlers::like_post))
        .route("/posts/{id}/like", delete(handlers::unlike_post))
        .route("/posts/{id}/comments", get(handlers::list_comments))
        .route("/posts/{id}/comments", post(handlers::create_comment))
        // Comments (by comment id)
        .route("/comments/{id}", put(handlers::update_comment))
        .route("/comments/{id}", delete(handlers::delete_comment))
        // Learning plans
        .route("/learning-plans", get(handlers::list_plans))
        .route("/learning-plans", post(handlers::create_plan))
        .route("/learning-plans/my-plans", get(handlers::list_my_plans))
        .route("/learning-plans/{id}", get(handlers::get_plan))
        .route("/learning-plans/{id}", put(handlers::update_plan))
        .route("/learning-plans/{id}", delete(handlers::delete_plan))
        .route("/learning-plans/{id}/share", post(handlers::share_plan))
        // Notifications
        .route("/notifications", get(handlers::list_notifications))
        .route("/notifications/unread-count", get(handlers::unread_count))
        .route("/notifications/mark-all-read", post(handlers::mark_all_read))
        .route("/notifications/clear-read", delete(handlers::clear_read))
        .route_layer(axum::middleware::from_fn_with_state(
            config.clone(),
            middleware::auth_middleware,
        ))
        // Health stays reachable without an API key
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(config.cors_layer()),
        )
        .with_state(social)
}
