//! Driving port for community code use-cases.
//!
//! Inbound adapters call this port to obtain, list, read and delete
//! community codes without knowing which repository backs the registry.

use async_trait::async_trait;

use crate::domain::{
    AddressTuple, CodeAssignment, CommunityCodeId, CommunityCodeRecord, Error, UserId,
};

/// Domain use-case port for the community code registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityCodeService: Send + Sync {
    /// Return the code for `address`, minting and persisting it on first use.
    async fn get_or_create(
        &self,
        address: AddressTuple,
        created_by: &UserId,
    ) -> Result<CodeAssignment, Error>;

    /// Every record, newest first.
    async fn list_all(&self) -> Result<Vec<CommunityCodeRecord>, Error>;

    /// Look a record up by code.
    async fn get_by_code(&self, code: &str) -> Result<CommunityCodeRecord, Error>;

    /// Permanently remove a record.
    async fn delete(&self, id: CommunityCodeId) -> Result<(), Error>;
}
