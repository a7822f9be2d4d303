//! Reelstore metadata persistence
//!
//! The upload workflow only talks to [`MetadataRepository`]. Production uses
//! [`MongoMetadataRepository`]; tests can enable the `test-utils` feature for
//! an in-memory implementation that assigns identifiers the same way.

#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod mongo;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryMetadataRepository;
pub use mongo::MongoMetadataRepository;
pub use repository::{parse_object_id, MetadataRepository};
