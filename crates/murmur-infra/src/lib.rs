//! # Murmur Infrastructure
//!
//! In-process implementations of the ports defined in `murmur-core`.
//! The real Directory and Feed Services are remote; these stand-ins back
//! tests and the console host. Data lives for the process only.

pub mod directory;
pub mod feed;

pub use directory::InMemoryDirectory;
pub use feed::InMemoryFeed;
