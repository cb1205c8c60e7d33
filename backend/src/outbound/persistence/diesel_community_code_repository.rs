//! PostgreSQL-backed `CommunityCodeRepository` implementation using Diesel.
//!
//! The unique indexes on the address columns and on `code` arbitrate
//! concurrent inserts: the loser receives a unique violation, reported to the
//! domain as `Duplicate`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CommunityCodeRepository, CommunityCodeRepositoryError};
use crate::domain::{
    AddressTuple, CommunityCode, CommunityCodeId, CommunityCodeRecord, UserId,
};

use super::models::{CommunityCodeRow, NewCommunityCodeRow};
use super::pool::{DbPool, PoolError};
use super::schema::community_codes;

/// Diesel-backed implementation of the `CommunityCodeRepository` port.
#[derive(Clone)]
pub struct DieselCommunityCodeRepository {
    pool: DbPool,
}

impl DieselCommunityCodeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CommunityCodeRepositoryError {
    CommunityCodeRepositoryError::connection(error.message())
}

fn map_diesel_error(error: diesel::result::Error) -> CommunityCodeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or("unique index").to_owned();
            debug!(%constraint, "community code insert lost a race");
            CommunityCodeRepositoryError::duplicate(constraint)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            CommunityCodeRepositoryError::connection(info.message())
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            CommunityCodeRepositoryError::query("database error")
        }
        DieselError::QueryBuilderError(_) => {
            CommunityCodeRepositoryError::query("database query error")
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            CommunityCodeRepositoryError::query("database error")
        }
    }
}

fn row_to_record(
    row: CommunityCodeRow,
) -> Result<CommunityCodeRecord, CommunityCodeRepositoryError> {
    let address = AddressTuple::try_from_parts(
        &row.country,
        &row.province,
        &row.city,
        &row.street,
        &row.street_number,
    )
    .map_err(|err| {
        CommunityCodeRepositoryError::query(format!("corrupted address in database: {err}"))
    })?;

    Ok(CommunityCodeRecord {
        id: CommunityCodeId::from_uuid(row.id),
        code: CommunityCode::from_stored(row.code),
        address,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl CommunityCodeRepository for DieselCommunityCodeRepository {
    async fn find_by_address(
        &self,
        address: &AddressTuple,
    ) -> Result<Option<CommunityCodeRecord>, CommunityCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommunityCodeRow> = community_codes::table
            .filter(community_codes::country.eq(address.country()))
            .filter(community_codes::province.eq(address.province()))
            .filter(community_codes::city.eq(address.city()))
            .filter(community_codes::street.eq(address.street()))
            .filter(community_codes::street_number.eq(address.street_number()))
            .select(CommunityCodeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn find_by_code(
        &self,
        code: &str,
    ) -> Result<Option<CommunityCodeRecord>, CommunityCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommunityCodeRow> = community_codes::table
            .filter(community_codes::code.eq(code))
            .select(CommunityCodeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn insert(
        &self,
        record: &CommunityCodeRecord,
    ) -> Result<(), CommunityCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCommunityCodeRow {
            id: *record.id.as_uuid(),
            code: record.code.as_str(),
            country: record.address.country(),
            province: record.address.province(),
            city: record.address.city(),
            street: record.address.street(),
            street_number: record.address.street_number(),
            created_by: *record.created_by.as_uuid(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        };

        diesel::insert_into(community_codes::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_newest_first(
        &self,
    ) -> Result<Vec<CommunityCodeRecord>, CommunityCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommunityCodeRow> = community_codes::table
            .order((community_codes::created_at.desc(), community_codes::id.desc()))
            .select(CommunityCodeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn delete(&self, id: &CommunityCodeId) -> Result<bool, CommunityCodeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(community_codes::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    struct FakeInfo {
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for FakeInfo {
        fn message(&self) -> &str {
            "fake"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("community_codes")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(FakeInfo { constraint }))
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate() {
        let err = map_diesel_error(db_error(
            DatabaseErrorKind::UniqueViolation,
            Some("community_codes_address_key"),
        ));
        assert_eq!(
            err,
            CommunityCodeRepositoryError::duplicate("community_codes_address_key")
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let err = map_diesel_error(db_error(DatabaseErrorKind::ClosedConnection, None));
        assert!(matches!(err, CommunityCodeRepositoryError::Connection { .. }));
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(db_error(DatabaseErrorKind::ForeignKeyViolation, None))]
    fn other_failures_map_to_query(#[case] error: DieselError) {
        assert!(matches!(
            map_diesel_error(error),
            CommunityCodeRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert_eq!(
            err,
            CommunityCodeRepositoryError::connection("connection refused")
        );
    }

    fn row(street_number: &str) -> CommunityCodeRow {
        let at = Utc
            .with_ymd_and_hms(2026, 10, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        CommunityCodeRow {
            id: Uuid::new_v4(),
            code: "ESP-AND-SEV-GRANVA0007".to_owned(),
            country: "España".to_owned(),
            province: "Andalucía".to_owned(),
            city: "Sevilla".to_owned(),
            street: "Gran Vía".to_owned(),
            street_number: street_number.to_owned(),
            created_by: Uuid::new_v4(),
            created_at: at,
            updated_at: at,
        }
    }

    #[rstest]
    fn row_converts_to_record() {
        let record = row_to_record(row("7")).expect("valid row");
        assert_eq!(record.code.as_str(), "ESP-AND-SEV-GRANVA0007");
        assert_eq!(record.address.street(), "Gran Vía");
    }

    #[rstest]
    fn corrupted_row_is_query_error() {
        let err = row_to_record(row("7B")).expect_err("non-numeric number");
        assert!(matches!(err, CommunityCodeRepositoryError::Query { .. }));
    }
}
