//! In-process store and fixtures shared by unit tests

pub mod fixtures;
pub mod memory_store;

pub use memory_store::{FailPoint, MemoryState, MemoryStore};
