//! Feed Service implementations.

mod memory;

pub use memory::InMemoryFeed;
