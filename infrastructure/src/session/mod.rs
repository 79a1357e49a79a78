//! Session adapters
//!
//! In-process implementations of the
//! [`SessionStorage`](crew_application::SessionStorage) and
//! [`MemoryStore`](crew_application::MemoryStore) ports. State lives only as
//! long as the process.

mod in_memory;
mod memory_store;

pub use in_memory::InMemorySessionStorage;
pub use memory_store::InMemoryMemoryStore;
