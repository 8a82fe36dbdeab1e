//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod resolver;

pub use arena::{ClassNode, ClassificationTree};
pub use builder::{BuildOutcome, TreeBuilder};
pub use entities::{ClassificationEntry, RawRecord, SchemeMeta};
pub use error::{BuildWarning, DomainError, DomainResult};
