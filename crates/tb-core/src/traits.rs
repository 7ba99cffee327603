//! Core traits shared by every stored entity

/// Primary key type
pub type Id = i64;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Base trait for all domain entities
pub trait Entity: Identifiable + Clone + Send + Sync {
    /// Collection name, used in logs and store diagnostics
    const COLLECTION: &'static str;

    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}
