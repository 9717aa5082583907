//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod category_ref;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use category_ref::CategoryRef;
