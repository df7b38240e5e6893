// Port Layer - Interfaces for external dependencies

pub mod query_provider;
pub mod repository;
pub mod time_provider; // For deterministic audit timestamps

// Re-exports
pub use query_provider::{Queries, QueryProvider};
pub use repository::BaseRepository;
pub use time_provider::{SystemTimeProvider, TimeProvider};
