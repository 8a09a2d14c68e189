//! Ports - trait contracts for the external Directory and Feed Services.
//! Infrastructure (or a test double) implements these.

mod directory;
mod feed;

pub use directory::DirectoryService;
pub use feed::{FeedService, InsertionHandler, SubscriptionHandle};
