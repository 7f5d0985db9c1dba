use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use skillshare::api::{create_router, ACTOR_HEADER};
use skillshare::db::Database;
use skillshare::models::*;
use uuid::Uuid;

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(db);
    TestServer::new(app).expect("Failed to create test server")
}

async fn register(server: &TestServer, name: &str) -> User {
    server
        .post("/api/v1/users")
        .json(&CreateUserInput {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            bio: None,
        })
        .await
        .json::<User>()
}

async fn publish(server: &TestServer, author: &User, content: &str) -> Post {
    server
        .post("/api/v1/posts")
        .add_header(ACTOR_HEADER, author.id.to_string())
        .json(&json!({ "content": content }))
        .await
        .json::<Post>()
}

async fn unread(server: &TestServer, user: &User) -> i64 {
    server
        .get("/api/v1/notifications/unread-count")
        .add_header(ACTOR_HEADER, user.id.to_string())
        .await
        .json::<UnreadCount>()
        .count
}

mod follow_feed_notify {
    use super::*;

    #[tokio::test]
    async fn follow_then_read_feed_and_notifications() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;

        let response = server
            .post(&format!("/api/v1/users/{}/follow", bob.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await;
        response.assert_status_ok();
        let outcome: Interaction<FollowResult> = response.json();
        assert!(outcome.result.created);
        assert!(outcome.notified);

        let p1 = publish(&server, &bob, "P1").await;
        let p2 = publish(&server, &bob, "P2").await;

        let response = server
            .get("/api/v1/posts/feed")
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await;
        response.assert_status_ok();
        let feed: Page<Post> = response.json();
        let ids: Vec<Uuid> = feed.content.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![p2.id, p1.id]);

        let response = server
            .get("/api/v1/notifications")
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .await;
        let notes: Page<Notification> = response.json();
        assert_eq!(notes.content.len(), 1);
        assert_eq!(notes.content[0].notification_type, NotificationType::Follow);
        assert!(!notes.content[0].read);
    }

    #[tokio::test]
    async fn feed_honours_page_and_size() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;
        server
            .post(&format!("/api/v1/users/{}/follow", bob.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await;
        for i in 0..3 {
            publish(&server, &bob, &format!("post {}", i)).await;
        }

        let feed: Page<Post> = server
            .get("/api/v1/posts/feed?page=1&size=2")
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await
            .json();

        assert_eq!(feed.page, 1);
        assert_eq!(feed.size, 2);
        assert_eq!(feed.total_elements, 3);
        assert_eq!(feed.content.len(), 1);
        assert_eq!(feed.content[0].content, "post 0");
    }

    #[tokio::test]
    async fn repeat_follow_is_ok_and_silent() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;
        let path = format!("/api/v1/users/{}/follow", bob.id);

        server.post(&path).add_header(ACTOR_HEADER, alice.id.to_string()).await;
        let response = server
            .post(&path)
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await;

        response.assert_status_ok();
        let outcome: Interaction<FollowResult> = response.json();
        assert!(!outcome.result.created);
        assert_eq!(unread(&server, &bob).await, 1);
    }

    #[tokio::test]
    async fn unfollow_returns_no_content() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;
        let path = format!("/api/v1/users/{}/follow", bob.id);

        server.post(&path).add_header(ACTOR_HEADER, alice.id.to_string()).await;
        server
            .delete(&path)
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let following: Vec<User> = server
            .get(&format!("/api/v1/users/{}/following", alice.id))
            .await
            .json();
        assert!(following.is_empty());
    }

    #[tokio::test]
    async fn like_and_comment_notify_the_author() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;
        let post = publish(&server, &bob, "Rust tips").await;

        let response = server
            .post(&format!("/api/v1/posts/{}/like", post.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await;
        response.assert_status_ok();
        let liked: Interaction<LikeResult> = response.json();
        assert_eq!(liked.result.post.like_count, 1);

        let response = server
            .post(&format!("/api/v1/posts/{}/comments", post.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .json(&CommentInput {
                content: "Thanks!".to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);

        assert_eq!(unread(&server, &bob).await, 2);
    }

    #[tokio::test]
    async fn mark_all_read_then_clear_read() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;
        server
            .post(&format!("/api/v1/users/{}/follow", bob.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await;

        server
            .post("/api/v1/notifications/mark-all-read")
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(unread(&server, &bob).await, 0);

        server
            .delete("/api/v1/notifications/clear-read")
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let notes: Page<Notification> = server
            .get("/api/v1/notifications")
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .await
            .json();
        assert!(notes.content.is_empty());
    }
}

mod error_statuses {
    use super::*;

    #[tokio::test]
    async fn missing_actor_header_is_unauthorized() {
        let server = setup();
        server
            .get("/api/v1/posts/feed")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_actor_header_is_unauthorized() {
        let server = setup();
        server
            .get("/api/v1/notifications")
            .add_header(ACTOR_HEADER, "not-a-uuid")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn self_follow_is_bad_request() {
        let server = setup();
        let alice = register(&server, "Alice").await;

        server
            .post(&format!("/api/v1/users/{}/follow", alice.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn following_unknown_user_is_not_found() {
        let server = setup();
        let alice = register(&server, "Alice").await;

        server
            .post(&format!("/api/v1/users/{}/follow", Uuid::new_v4()))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn feed_for_unknown_viewer_is_not_found() {
        let server = setup();
        server
            .get("/api/v1/posts/feed")
            .add_header(ACTOR_HEADER, Uuid::new_v4().to_string())
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn editing_another_users_post_is_forbidden() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;
        let post = publish(&server, &alice, "mine").await;

        server
            .put(&format!("/api/v1/posts/{}", post.id))
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .json(&UpdatePostInput {
                content: "theirs".to_string(),
            })
            .await
            .assert_status(StatusCode::FORBIDDEN);

        server
            .delete(&format!("/api/v1/posts/{}", post.id))
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .await
            .assert_status(StatusCode::FORBIDDEN);

        let still: Post = server.get(&format!("/api/v1/posts/{}", post.id)).await.json();
        assert_eq!(still.content, "mine");
    }

    #[tokio::test]
    async fn owner_can_delete_their_post() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let post = publish(&server, &alice, "bye").await;

        server
            .delete(&format!("/api/v1/posts/{}", post.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/posts/{}", post.id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn blank_post_is_bad_request() {
        let server = setup();
        let alice = register(&server, "Alice").await;

        server
            .post("/api/v1/posts")
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .json(&json!({ "content": "   " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod learning_plans {
    use super::*;

    #[tokio::test]
    async fn create_share_and_list_mine() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;

        let response = server
            .post("/api/v1/learning-plans")
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .json(&json!({
                "title": "Learn Rust",
                "status": "IN_PROGRESS",
                "steps": [
                    { "title": "The Book", "resource_url": "https://doc.rust-lang.org/book/" },
                    { "title": "Rustlings" }
                ]
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let plan: LearningPlan = response.json();
        assert_eq!(plan.status, PlanStatus::InProgress);
        assert_eq!(plan.steps[1].order_index, 1);

        let response = server
            .post(&format!("/api/v1/learning-plans/{}/share", plan.id))
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .json(&SharePlanInput {
                recipient_id: bob.id,
            })
            .await;
        response.assert_status_ok();
        assert_eq!(unread(&server, &bob).await, 1);

        let mine: Page<LearningPlan> = server
            .get("/api/v1/learning-plans/my-plans")
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .await
            .json();
        assert!(mine.content.is_empty());
    }

    #[tokio::test]
    async fn updating_another_users_plan_is_forbidden() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;

        let plan: LearningPlan = server
            .post("/api/v1/learning-plans")
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .json(&json!({ "title": "Learn Rust" }))
            .await
            .json();

        server
            .put(&format!("/api/v1/learning-plans/{}", plan.id))
            .add_header(ACTOR_HEADER, bob.id.to_string())
            .json(&json!({ "title": "Learn Go" }))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}

mod users {
    use super::*;

    #[tokio::test]
    async fn current_user_and_profile_update() {
        let server = setup();
        let alice = register(&server, "Alice").await;

        let response = server
            .put("/api/v1/users/me")
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .json(&UpdateProfileInput {
                name: None,
                bio: Some("Rustacean".to_string()),
            })
            .await;
        response.assert_status_ok();

        let me: User = server
            .get("/api/v1/users/me")
            .add_header(ACTOR_HEADER, alice.id.to_string())
            .await
            .json();
        assert_eq!(me.bio.as_deref(), Some("Rustacean"));
    }

    #[tokio::test]
    async fn search_matches_names() {
        let server = setup();
        register(&server, "Alice").await;
        register(&server, "Bob").await;

        let hits: Vec<User> = server.get("/api/v1/users/search?query=ali").await.json();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Alice");
    }

    #[tokio::test]
    async fn lists_one_authors_posts_newest_first() {
        let server = setup();
        let alice = register(&server, "Alice").await;
        let bob = register(&server, "Bob").await;
        publish(&server, &alice, "first").await;
        publish(&server, &bob, "not alice").await;
        publish(&server, &alice, "second").await;

        let response = server
            .get(&format!("/api/v1/users/{}/posts?size=5", alice.id))
            .await;
        response.assert_status_ok();
        let page: Page<Post> = response.json();
        let contents: Vec<&str> = page.content.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);
        assert_eq!(page.total_elements, 2);

        server
            .get(&format!("/api/v1/users/{}/posts", Uuid::new_v4()))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() {
        let server = setup();
        register(&server, "Alice").await;

        let hits: Vec<User> = server.get("/api/v1/users/search?query=%25").await.json();
        assert!(hits.is_empty());

        server
            .get("/api/v1/users/search?query=")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_email_is_bad_request() {
        let server = setup();
        register(&server, "Alice").await;

        server
            .post("/api/v1/users")
            .json(&CreateUserInput {
                name: "Alice Again".to_string(),
                email: "alice@example.com".to_string(),
                bio: None,
            })
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

mod security_auth {
    use super::*;
    use skillshare::api::{create_router_with_config, SecurityConfig};
    use skillshare::social::Social;

    fn setup_with_auth(api_key: &str) -> TestServer {
        let db = Database::open_memory().expect("Failed to create database");
        db.migrate().expect("Failed to migrate");
        let config = SecurityConfig::with_api_key(api_key);
        let app = create_router_with_config(Social::new(db), config);
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn health_endpoint_is_accessible_without_auth() {
        let server = setup_with_auth("test-secret-key");
        server.get("/api/v1/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn protected_endpoint_requires_auth() {
        let server = setup_with_auth("test-secret-key");
        server
            .get("/api/v1/posts")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_endpoint_accepts_valid_bearer_token() {
        let server = setup_with_auth("test-secret-key");
        server
            .get("/api/v1/posts")
            .add_header("Authorization", "Bearer test-secret-key")
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn protected_endpoint_rejects_invalid_bearer_token() {
        let server = setup_with_auth("test-secret-key");
        server
            .get("/api/v1/posts")
            .add_header("Authorization", "Bearer wrong-key")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_endpoint_rejects_malformed_auth_header() {
        let server = setup_with_auth("test-secret-key");
        server
            .get("/api/v1/posts")
            .add_header("Authorization", "Basic dXNlcjpwYXNz")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}
