//! Persisted community code records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{AddressTuple, CommunityCode};
use crate::domain::UserId;

/// Primary key of a community code record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityCodeId(Uuid);

impl CommunityCodeId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CommunityCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One registered address and its code.
///
/// Exactly one record exists per distinct address tuple. Records are never
/// updated after creation apart from `updated_at` bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommunityCodeRecord {
    #[schema(value_type = String, format = Uuid)]
    pub id: CommunityCodeId,
    #[schema(value_type = String, example = "ESP-AND-SEV-GRANVA0007")]
    pub code: CommunityCode,
    pub address: AddressTuple,
    #[schema(value_type = String, format = Uuid)]
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of `get_or_create`: the code and whether this call minted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeAssignment {
    #[schema(value_type = String, example = "ESP-AND-SEV-GRANVA0007")]
    pub code: CommunityCode,
    pub is_new: bool,
}

impl CodeAssignment {
    /// The code was minted by this call.
    pub fn created(code: CommunityCode) -> Self {
        Self { code, is_new: true }
    }

    /// The code already existed, possibly written by a concurrent caller.
    pub fn existing(code: CommunityCode) -> Self {
        Self {
            code,
            is_new: false,
        }
    }
}
