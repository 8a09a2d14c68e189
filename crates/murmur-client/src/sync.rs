//! Feed synchronization - the ordered local feed and the live push channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, RwLock};

use murmur_core::domain::{Feed, Identity, Post, PostDraft, validate_content};
use murmur_core::error::{FeedError, SubmitError};
use murmur_core::ports::{FeedService, InsertionHandler, SubscriptionHandle};

/// Lifecycle of one synchronizer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Loading,
    Ready,
    Subscribed,
    Closed,
}

/// Owns the in-memory ordered feed and the post-submission protocol.
///
/// Local feed state changes through exactly two paths: the initial load and
/// the subscription callback. The write path never touches it; an accepted
/// post comes back over the push channel like every other insertion.
pub struct FeedSynchronizer {
    service: Arc<dyn FeedService>,
    feed: Arc<RwLock<Feed>>,
    identity: RwLock<Option<Identity>>,
    state: RwLock<SyncState>,
    in_flight: AtomicBool,
    subscription: Mutex<Option<SubscriptionHandle>>,
}

impl FeedSynchronizer {
    pub fn new(service: Arc<dyn FeedService>) -> Self {
        Self {
            service,
            feed: Arc::new(RwLock::new(Feed::new())),
            identity: RwLock::new(None),
            state: RwLock::new(SyncState::Uninitialized),
            in_flight: AtomicBool::new(false),
            subscription: Mutex::new(None),
        }
    }

    /// Install the resolved identity used for post authorship.
    /// Submissions before this yield [`SubmitError::IdentityNotReady`].
    pub async fn bind_identity(&self, identity: Identity) {
        *self.identity.write().await = Some(identity);
    }

    /// Fetch the most recent `limit` posts and make them the feed's state.
    ///
    /// On failure the feed and lifecycle state keep their prior values and
    /// the error goes back to the caller for user-visible diagnostics; there
    /// is no automatic retry.
    pub async fn load_recent(&self, limit: usize) -> Result<Vec<Post>, FeedError> {
        let prior = *self.state.read().await;
        *self.state.write().await = SyncState::Loading;

        match self.service.list_recent(limit).await {
            Ok(posts) => {
                self.feed.write().await.replace(posts.clone());
                // A refresh while subscribed stays subscribed
                *self.state.write().await = if prior == SyncState::Subscribed {
                    SyncState::Subscribed
                } else {
                    SyncState::Ready
                };
                tracing::info!(count = posts.len(), "Feed loaded");
                Ok(posts)
            }
            Err(err) => {
                *self.state.write().await = prior;
                tracing::error!(error = %err, "Feed load failed");
                Err(err)
            }
        }
    }

    /// Open the live push channel.
    ///
    /// Every insertion the service reports is upserted at the feed head, in
    /// delivery order; a redelivered id leaves the feed unchanged.
    pub async fn subscribe(&self) -> Result<(), FeedError> {
        let feed = Arc::clone(&self.feed);
        let handler: InsertionHandler = Box::new(move |post: Post| {
            let feed = Arc::clone(&feed);
            Box::pin(async move {
                let post_id = post.id;
                if feed.write().await.upsert_front(post) {
                    tracing::debug!(post_id = %post_id, "Post delivered");
                } else {
                    tracing::debug!(post_id = %post_id, "Duplicate delivery ignored");
                }
            })
        });

        let handle = self.service.subscribe_insertions(handler).await?;
        *self.subscription.lock().await = Some(handle);
        *self.state.write().await = SyncState::Subscribed;
        Ok(())
    }

    /// Validate, guard, and submit a post authored by the bound identity.
    ///
    /// Validation and the identity gate run before any service contact.
    /// Overlapping submissions bounce with [`SubmitError::AlreadyInFlight`]
    /// instead of queueing. The local feed is not mutated here.
    pub async fn submit_post(&self, content: &str) -> Result<(), SubmitError> {
        let trimmed = validate_content(content)?;

        let draft = {
            let identity = self.identity.read().await;
            let identity = identity.as_ref().ok_or(SubmitError::IdentityNotReady)?;
            PostDraft::new(identity, trimmed)
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::AlreadyInFlight);
        }

        let result = self.service.insert(draft).await;
        self.in_flight.store(false, Ordering::Release);

        match result {
            Ok(post) => {
                tracing::info!(post_id = %post.id, "Post accepted");
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "Post submission failed");
                Err(SubmitError::Service(err))
            }
        }
    }

    /// Current feed contents, newest first.
    pub async fn snapshot(&self) -> Vec<Post> {
        self.feed.read().await.posts().to_vec()
    }

    pub async fn state(&self) -> SyncState {
        *self.state.read().await
    }

    /// Release the push subscription; no callback mutates the feed after
    /// this returns. Closing twice, or before subscribing, is a no-op.
    pub async fn close(&self) -> Result<(), FeedError> {
        if let Some(handle) = self.subscription.lock().await.take() {
            self.service.unsubscribe(handle).await?;
        }
        *self.state.write().await = SyncState::Closed;
        tracing::info!("Feed synchronizer closed");
        Ok(())
    }
}
