//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::community_codes;

/// Row struct for reading from the community_codes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = community_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommunityCodeRow {
    pub id: Uuid,
    pub code: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub street: String,
    pub street_number: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new community code records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = community_codes)]
pub(crate) struct NewCommunityCodeRow<'a> {
    pub id: Uuid,
    pub code: &'a str,
    pub country: &'a str,
    pub province: &'a str,
    pub city: &'a str,
    pub street: &'a str,
    pub street_number: &'a str,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
