//! Reference implementations of the ledger's external capabilities.

pub mod bank;
pub mod registry;

pub use bank::InMemoryBank;
pub use registry::{CollectionMetadata, InMemoryRegistry};
