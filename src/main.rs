use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use skillshare::api::{self, SecurityConfig};
use skillshare::client::SkillshareClient;
use skillshare::db;
use skillshare::models::PageRequest;
use skillshare::social::Social;

#[derive(Parser)]
#[command(name = "skillshare")]
#[command(about = "Social learning backend: follows, feeds and notifications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// SQLite database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Check server status
    Status,
    /// Show a page of your feed
    Feed {
        /// Your user id
        #[arg(long = "as")]
        user: Uuid,
        #[arg(long, default_value = "0")]
        page: u32,
        #[arg(long, default_value = "10")]
        size: u32,
    },
    /// Follow a user
    Follow {
        #[arg(long = "as")]
        user: Uuid,
        target: Uuid,
    },
    /// Unfollow a user
    Unfollow {
        #[arg(long = "as")]
        user: Uuid,
        target: Uuid,
    },
    /// List your notifications and unread count
    Notifications {
        #[arg(long = "as")]
        user: Uuid,
        #[arg(long, default_value = "0")]
        page: u32,
    },
    /// Mark all your notifications read
    MarkRead {
        #[arg(long = "as")]
        user: Uuid,
    },
    /// Delete your read notifications
    ClearRead {
        #[arg(long = "as")]
        user: Uuid,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "skillshare=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve(port: u16, db_path: Option<PathBuf>) -> anyhow::Result<()> {
    tracing::info!("Starting Skillshare server on port {}", port);

    let db = match db_path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let app = api::create_router_with_config(Social::new(db), SecurityConfig::from_env());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Skillshare server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let client = SkillshareClient::from_env();

    match cli.command {
        Some(Commands::Serve { port, db }) => serve(port, db).await?,
        None => serve(3000, None).await?,
        Some(Commands::Status) => match client.health().await {
            Ok(_) => println!("Skillshare server is running"),
            Err(e) => {
                println!("Skillshare server is not reachable: {}", e);
                std::process::exit(1);
            }
        },
        Some(Commands::Feed { user, page, size }) => {
            let feed = client
                .acting_as(user)
                .feed(PageRequest::new(page, size))
                .await?;
            if feed.is_empty() {
                println!("Nothing in your feed yet. Follow someone to see their posts.");
            }
            for post in feed.content {
                println!(
                    "{}  {}  [{} likes, {} comments]\n    {}",
                    post.created_at.format("%Y-%m-%d %H:%M"),
                    post.user_id,
                    post.like_count,
                    post.comment_count,
                    post.content
                );
            }
            println!("page {} of {}", feed.page + 1, feed.total_pages.max(1));
        }
        Some(Commands::Follow { user, target }) => {
            let outcome = client.acting_as(user).follow(target).await?;
            if outcome.result.created {
                println!("Now following {}", target);
            } else {
                println!("Already following {}", target);
            }
            if let Some(warning) = outcome.warning {
                eprintln!("warning: {}", warning);
            }
        }
        Some(Commands::Unfollow { user, target }) => {
            client.acting_as(user).unfollow(target).await?;
            println!("No longer following {}", target);
        }
        Some(Commands::Notifications { user, page }) => {
            let client = client.acting_as(user);
            let unread = client.unread_count().await?;
            let list = client.notifications(PageRequest::new(page, 20)).await?;
            println!("{} unread", unread);
            for n in list.content {
                let marker = if n.read { " " } else { "*" };
                println!(
                    "{} {}  {}  ({})",
                    marker,
                    n.created_at.format("%Y-%m-%d %H:%M"),
                    n.message,
                    n.link
                );
            }
        }
        Some(Commands::MarkRead { user }) => {
            client.acting_as(user).mark_all_read().await?;
            println!("All notifications marked read");
        }
        Some(Commands::ClearRead { user }) => {
            client.acting_as(user).clear_read().await?;
            println!("Read notifications cleared");
        }
    }

    Ok(())
}
