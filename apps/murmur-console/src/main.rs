//! # Murmur Console
//!
//! Demo host: seeds the in-memory services and runs one feed session end to
//! end - resolve, load, subscribe, post, echo, print.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as Age, Utc};
use uuid::Uuid;

use murmur_client::{Session, relative_age};
use murmur_core::domain::{AuthUser, Identity, Post, SignupMetadata};
use murmur_infra::{InMemoryDirectory, InMemoryFeed};

mod config;

use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env();
    tracing::info!(feed_limit = config.feed_limit, "Starting murmur console");

    let directory = Arc::new(InMemoryDirectory::new());
    let feed = Arc::new(InMemoryFeed::default());
    seed_demo_data(&directory, &feed).await;

    let user = AuthUser {
        id: Uuid::new_v4(),
        email: Some("alex@example.com".to_string()),
        metadata: Some(SignupMetadata {
            full_name: Some("Alex Chen".to_string()),
            nickname: Some("alex".to_string()),
            username: None,
        }),
    };

    let session = Session::start(&user, directory, feed, config.session()).await?;
    if let Some(err) = session.load_error() {
        tracing::warn!(error = %err, "Initial feed load failed, starting empty");
    }

    session.submit("hello from the console").await?;

    // The accepted post comes back over the push channel
    tokio::time::sleep(Duration::from_millis(50)).await;

    let now = Utc::now();
    println!("feed for @{}:", session.identity().username);
    for post in session.feed().await {
        println!(
            "  {} #{} ({}): {}",
            post.author_nickname,
            post.author_username,
            relative_age(post.created_at, now),
            post.content
        );
    }

    session.end().await?;
    Ok(())
}

async fn seed_demo_data(directory: &InMemoryDirectory, feed: &InMemoryFeed) {
    let sam = Identity {
        id: Uuid::new_v4(),
        full_name: "Sam Park".to_string(),
        nickname: "sam".to_string(),
        username: "sam".to_string(),
    };

    for (content, minutes_ago) in [
        ("shipping the new build tonight", 7),
        ("coffee number three", 42),
        ("does anyone else miss RSS", 130),
    ] {
        feed.seed(Post {
            id: Uuid::new_v4(),
            content: content.to_string(),
            author_id: sam.id,
            author_nickname: sam.nickname.clone(),
            author_username: sam.username.clone(),
            created_at: Utc::now() - Age::minutes(minutes_ago),
            like_count: 0,
            comment_count: 0,
            share_count: 0,
        })
        .await;
    }

    directory.seed(sam).await;
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,murmur_client=debug,murmur_infra=debug"));

    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
