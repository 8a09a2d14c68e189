//! Directory Service implementations.

mod memory;

pub use memory::InMemoryDirectory;
