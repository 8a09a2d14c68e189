//! # Murmur Core
//!
//! The domain layer of the murmur feed client.
//! Entities, the feed collection, and the port contracts for the two
//! external services. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DirectoryError, FeedError, SubmitError};
