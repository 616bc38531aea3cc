//! Conversation state adapters

mod memory;

pub use memory::InMemorySessionStore;
