//! In-memory Feed Service.
//!
//! Posts live in a Vec, insertions fan out over a broadcast channel with one
//! relay task per subscription. Works within a single process only.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock, broadcast};
use tokio::task::JoinHandle;
use uuid::Uuid;

use murmur_core::domain::{Post, PostDraft};
use murmur_core::error::FeedError;
use murmur_core::ports::{FeedService, InsertionHandler, SubscriptionHandle};

/// Durable-store stand-in plus live insertion fan-out.
pub struct InMemoryFeed {
    posts: RwLock<Vec<Post>>,
    insertions: broadcast::Sender<Post>,
    relays: Mutex<HashMap<SubscriptionHandle, JoinHandle<()>>>,
    next_handle: AtomicU64,
}

impl InMemoryFeed {
    pub fn new(buffer_size: usize) -> Self {
        let (insertions, _) = broadcast::channel(buffer_size);
        Self {
            posts: RwLock::new(Vec::new()),
            insertions,
            relays: Mutex::new(HashMap::new()),
            next_handle: AtomicU64::new(0),
        }
    }

    /// Install a post with its existing id and timestamp, without notifying
    /// subscribers. Seeding helper for demos and tests.
    pub async fn seed(&self, post: Post) {
        self.posts.write().await.push(post);
    }
}

impl Default for InMemoryFeed {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl FeedService for InMemoryFeed {
    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>, FeedError> {
        let posts = self.posts.read().await;

        let mut page = posts.clone();
        page.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        page.truncate(limit);
        Ok(page)
    }

    async fn insert(&self, draft: PostDraft) -> Result<Post, FeedError> {
        let post = Post {
            id: Uuid::new_v4(),
            content: draft.content,
            author_id: draft.author_id,
            author_nickname: draft.author_nickname,
            author_username: draft.author_username,
            created_at: Utc::now(),
            like_count: draft.like_count,
            comment_count: draft.comment_count,
            share_count: draft.share_count,
        };

        self.posts.write().await.push(post.clone());

        // Ignore send errors (no subscribers)
        let _ = self.insertions.send(post.clone());

        tracing::debug!(post_id = %post.id, author = %post.author_username, "Post inserted");
        Ok(post)
    }

    async fn subscribe_insertions(
        &self,
        handler: InsertionHandler,
    ) -> Result<SubscriptionHandle, FeedError> {
        let mut receiver = self.insertions.subscribe();
        let handle = SubscriptionHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));

        let relay = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(post) => handler(post).await,
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        tracing::warn!(lagged = count, "Insertion subscriber lagged behind");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        self.relays.lock().await.insert(handle, relay);
        tracing::info!(handle = handle.id(), "Insertion subscription opened");
        Ok(handle)
    }

    async fn unsubscribe(&self, handle: SubscriptionHandle) -> Result<(), FeedError> {
        let relay = self
            .relays
            .lock()
            .await
            .remove(&handle)
            .ok_or(FeedError::UnknownSubscription)?;

        // Stop the relay and wait for it to wind down; the handler cannot
        // run again once this returns.
        relay.abort();
        let _ = relay.await;

        tracing::info!(handle = handle.id(), "Insertion subscription released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Duration as Age;
    use tokio::sync::mpsc;

    use murmur_core::domain::Identity;

    use super::*;

    fn author() -> Identity {
        Identity {
            id: Uuid::new_v4(),
            full_name: String::new(),
            nickname: "sam".to_string(),
            username: "sam".to_string(),
        }
    }

    fn draft(content: &str) -> PostDraft {
        PostDraft::new(&author(), content)
    }

    fn aged_post(content: &str, minutes_ago: i64) -> Post {
        Post {
            id: Uuid::new_v4(),
            content: content.to_string(),
            author_id: Uuid::new_v4(),
            author_nickname: "sam".to_string(),
            author_username: "sam".to_string(),
            created_at: Utc::now() - Age::minutes(minutes_ago),
            like_count: 0,
            comment_count: 0,
            share_count: 0,
        }
    }

    #[tokio::test]
    async fn test_list_recent_sorts_descending_and_limits() {
        let feed = InMemoryFeed::default();
        feed.seed(aged_post("oldest", 30)).await;
        feed.seed(aged_post("newest", 1)).await;
        feed.seed(aged_post("middle", 10)).await;

        let page = feed.list_recent(2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].content, "newest");
        assert_eq!(page[1].content, "middle");
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamp() {
        let feed = InMemoryFeed::default();
        let post = feed.insert(draft("hello")).await.unwrap();

        assert_eq!(post.content, "hello");
        assert_eq!(post.author_username, "sam");

        let page = feed.list_recent(10).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, post.id);
    }

    #[tokio::test]
    async fn test_subscriber_sees_inserts_in_order() {
        let feed = InMemoryFeed::default();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handler: InsertionHandler = Box::new(move |post: Post| {
            let tx = tx.clone();
            Box::pin(async move {
                let _ = tx.send(post.content);
            })
        });
        feed.subscribe_insertions(handler).await.unwrap();

        feed.insert(draft("first")).await.unwrap();
        feed.insert(draft("second")).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), "first");
        assert_eq!(rx.recv().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let feed = InMemoryFeed::default();
        let delivered = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let counter = delivered.clone();
        let handler: InsertionHandler = Box::new(move |_| {
            let counter = counter.clone();
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        });
        let handle = feed.subscribe_insertions(handler).await.unwrap();

        feed.unsubscribe(handle).await.unwrap();
        feed.insert(draft("unseen")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(delivered.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_unknown_handle() {
        let feed = InMemoryFeed::default();
        let err = feed
            .unsubscribe(SubscriptionHandle::new(99))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::UnknownSubscription));
    }
}
