//! In-memory `CommunityCodeRepository`.
//!
//! Enforces the same uniqueness rules as the PostgreSQL unique indexes, so
//! the registry's race handling behaves identically when no database is
//! configured.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{CommunityCodeRepository, CommunityCodeRepositoryError};
use crate::domain::{AddressTuple, CommunityCodeId, CommunityCodeRecord};

/// Mutex-guarded record list.
#[derive(Debug, Default)]
pub struct InMemoryCommunityCodeRepository {
    records: Mutex<Vec<CommunityCodeRecord>>,
}

impl InMemoryCommunityCodeRepository {
    fn records(
        &self,
    ) -> Result<MutexGuard<'_, Vec<CommunityCodeRecord>>, CommunityCodeRepositoryError> {
        self.records
            .lock()
            .map_err(|_| CommunityCodeRepositoryError::query("community code store lock poisoned"))
    }
}

#[async_trait]
impl CommunityCodeRepository for InMemoryCommunityCodeRepository {
    async fn find_by_address(
        &self,
        address: &AddressTuple,
    ) -> Result<Option<CommunityCodeRecord>, CommunityCodeRepositoryError> {
        Ok(self
            .records()?
            .iter()
            .find(|record| record.address == *address)
            .cloned())
    }

    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<CommunityCodeRecord>, CommunityCodeRepositoryError> {
        Ok(self
            .records()?
            .iter()
            .find(|record| record.code.as_str() == code)
            .cloned())
    }

    async fn insert(
        &self,
        record: &CommunityCodeRecord,
    ) -> Result<(), CommunityCodeRepositoryError> {
        let mut records = self.records()?;
        if records.iter().any(|existing| existing.address == record.address) {
            return Err(CommunityCodeRepositoryError::duplicate("address tuple"));
        }
        if records.iter().any(|existing| existing.code == record.code) {
            return Err(CommunityCodeRepositoryError::duplicate(format!(
                "code {}",
                record.code
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_newest_first(
        &self,
    ) -> Result<Vec<CommunityCodeRecord>, CommunityCodeRepositoryError> {
        let mut listed = self.records()?.clone();
        // Later inserts win ties so equal timestamps still list newest first.
        listed.reverse();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn delete(&self, id: &CommunityCodeId) -> Result<bool, CommunityCodeRepositoryError> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|record| record.id != *id);
        Ok(records.len() != before)
    }
}
