//! crates/tutorhub_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete document store behind it.

use async_trait::async_trait;

use crate::domain::{
    Collection, DeleteOutcome, Document, Filter, FindOptions, InsertOutcome, UpdateOutcome,
};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Collection-scoped access to a schema-less document store.
///
/// Identifiers are opaque strings assigned by the store and exposed on each
/// returned document under [`crate::domain::ID_FIELD`].
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns every document matching `filter`, in natural order unless
    /// `options` asks for a sort.
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        options: &FindOptions,
    ) -> PortResult<Vec<Document>>;

    async fn find_by_id(&self, collection: Collection, id: &str) -> PortResult<Option<Document>>;

    /// Stores `document` under a freshly assigned identifier.
    async fn insert_one(&self, collection: Collection, document: Document)
        -> PortResult<InsertOutcome>;

    /// Sets each field of `fields` on the matching document, leaving the others untouched.
    async fn update_by_id(
        &self,
        collection: Collection,
        id: &str,
        fields: Document,
    ) -> PortResult<UpdateOutcome>;

    async fn delete_by_id(&self, collection: Collection, id: &str) -> PortResult<DeleteOutcome>;

    /// Atomically adds one to a numeric field and returns the new value.
    /// An absent field counts as zero. Returns `None` when no document matches.
    async fn increment_by_id(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
    ) -> PortResult<Option<i64>>;
}
