//! Port for community code persistence.
//!
//! The [`CommunityCodeRepository`] trait is the storage collaborator behind
//! the registry. Adapters may be remote and shared by concurrent writers, so
//! they must enforce uniqueness of both the address tuple and the code and
//! report a losing insert as [`CommunityCodeRepositoryError::Duplicate`].

use async_trait::async_trait;

use crate::domain::{AddressTuple, CommunityCodeId, CommunityCodeRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by community code repository adapters.
    pub enum CommunityCodeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "community code repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "community code repository query failed: {message}",
        /// An insert collided with an existing address or code.
        Duplicate { message: String } =>
            "community code already exists: {message}",
    }
}

/// Port for community code storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityCodeRepository: Send + Sync {
    /// Find the record whose five address fields match exactly.
    async fn find_by_address(
        &self,
        address: &AddressTuple,
    ) -> Result<Option<CommunityCodeRecord>, CommunityCodeRepositoryError>;

    /// Find a record by its code.
    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<CommunityCodeRecord>, CommunityCodeRepositoryError>;

    /// Insert a new record.
    ///
    /// Returns [`CommunityCodeRepositoryError::Duplicate`] when another
    /// record already holds the same address tuple or code.
    async fn insert(&self, record: &CommunityCodeRecord)
    -> Result<(), CommunityCodeRepositoryError>;

    /// Every record, newest `created_at` first.
    async fn list_newest_first(
        &self,
    ) -> Result<Vec<CommunityCodeRecord>, CommunityCodeRepositoryError>;

    /// Remove a record permanently.
    ///
    /// Returns `false` when no record with `id` existed.
    async fn delete(&self, id: &CommunityCodeId) -> Result<bool, CommunityCodeRepositoryError>;
}
