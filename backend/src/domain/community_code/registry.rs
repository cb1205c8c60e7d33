//! Community code registry orchestration.
//!
//! [`CommunityCodeRegistry`] implements [`CommunityCodeService`] on top of a
//! [`CommunityCodeRepository`]. Lookup and insert are two separate calls, so
//! two callers may both miss and both insert; the repository rejects the
//! loser with `Duplicate` and the registry re-reads once to return the
//! winner's code.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info, warn};

use super::{AddressTuple, CodeAssignment, CommunityCode, CommunityCodeId, CommunityCodeRecord};
use crate::domain::ports::{
    CommunityCodeRepository, CommunityCodeRepositoryError, CommunityCodeService,
};
use crate::domain::{Error, UserId};

/// Concrete implementation of [`CommunityCodeService`].
pub struct CommunityCodeRegistry<R: ?Sized> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CommunityCodeRegistry<R>
where
    R: CommunityCodeRepository + ?Sized,
{
    /// Create a registry over `repository`, stamping records with `clock`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use marketplace::domain::CommunityCodeRegistry;
    /// use marketplace::outbound::memory::InMemoryCommunityCodeRepository;
    /// use mockable::DefaultClock;
    ///
    /// let registry = CommunityCodeRegistry::new(
    ///     Arc::new(InMemoryCommunityCodeRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = registry;
    /// ```
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    async fn resolve_insert_race(
        &self,
        attempted: CommunityCodeRecord,
        cause: CommunityCodeRepositoryError,
    ) -> Result<CodeAssignment, Error> {
        let winner = self
            .repository
            .find_by_address(&attempted.address)
            .await
            .map_err(map_repository_error)?;

        match winner {
            Some(existing) => {
                debug!(code = %existing.code, "concurrent insert won; reusing its code");
                Ok(CodeAssignment::existing(existing.code))
            }
            // A second conflict after the re-fetch is a persistence failure.
            None => {
                error!(
                    code = %attempted.code,
                    %cause,
                    "derived community code is held by a different address"
                );
                Err(Error::internal(format!(
                    "community code {} could not be stored: {cause}",
                    attempted.code
                ))
                .with_details(json!({ "code": attempted.code.as_str() })))
            }
        }
    }
}

/// Map repository errors to domain errors, keeping the cause in the message.
fn map_repository_error(error: CommunityCodeRepositoryError) -> Error {
    error!(%error, "community code repository failure");
    match error {
        CommunityCodeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("community code store unavailable: {message}"))
        }
        CommunityCodeRepositoryError::Query { message } => {
            Error::internal(format!("community code store error: {message}"))
        }
        CommunityCodeRepositoryError::Duplicate { message } => {
            Error::internal(format!("unexpected duplicate community code: {message}"))
        }
    }
}

#[async_trait]
impl<R> CommunityCodeService for CommunityCodeRegistry<R>
where
    R: CommunityCodeRepository + ?Sized,
{
    async fn get_or_create(
        &self,
        address: AddressTuple,
        created_by: &UserId,
    ) -> Result<CodeAssignment, Error> {
        if let Some(existing) = self
            .repository
            .find_by_address(&address)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(CodeAssignment::existing(existing.code));
        }

        let code = CommunityCode::derive(&address);
        let now = self.clock.utc();
        let record = CommunityCodeRecord {
            id: CommunityCodeId::random(),
            code: code.clone(),
            address,
            created_by: created_by.clone(),
            created_at: now,
            updated_at: now,
        };

        match self.repository.insert(&record).await {
            Ok(()) => {
                info!(code = %code, created_by = %created_by, "community code registered");
                Ok(CodeAssignment::created(code))
            }
            Err(cause @ CommunityCodeRepositoryError::Duplicate { .. }) => {
                self.resolve_insert_race(record, cause).await
            }
            Err(err) => Err(map_repository_error(err)),
        }
    }

    async fn list_all(&self) -> Result<Vec<CommunityCodeRecord>, Error> {
        self.repository
            .list_newest_first()
            .await
            .map_err(map_repository_error)
    }

    async fn get_by_code(&self, code: &str) -> Result<CommunityCodeRecord, Error> {
        self.repository
            .find_by_code(code)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("community code {code} not found")))
    }

    async fn delete(&self, id: CommunityCodeId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(&id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("community code record {id} not found")));
        }
        // No reference check exists; dependent properties keep the stale code.
        warn!(%id, "community code record deleted");
        Ok(())
    }
}
