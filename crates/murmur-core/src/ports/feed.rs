use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::domain::{Post, PostDraft};
use crate::error::FeedError;

/// Callback invoked once per post insertion reported by the service.
pub type InsertionHandler =
    Box<dyn Fn(Post) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Opaque identifier for one live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(u64);

impl SubscriptionHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Feed Service - durable post storage plus the live insertion stream.
#[async_trait]
pub trait FeedService: Send + Sync {
    /// The most recent `limit` posts, ordered by `created_at` descending.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Post>, FeedError>;

    /// Durably insert a draft. The service assigns the id and timestamp on
    /// the returned record.
    async fn insert(&self, draft: PostDraft) -> Result<Post, FeedError>;

    /// Open a push channel. Every insertion after this call triggers exactly
    /// one handler invocation, in the order the service reports them.
    async fn subscribe_insertions(
        &self,
        handler: InsertionHandler,
    ) -> Result<SubscriptionHandle, FeedError>;

    /// Release a subscription. Once this returns, the handler is never
    /// invoked again.
    async fn unsubscribe(&self, handle: SubscriptionHandle) -> Result<(), FeedError>;
}
