//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered addresses and their community codes.
    ///
    /// Unique indexes cover the five address columns and `code`.
    community_codes (id) {
        id -> Uuid,
        code -> Varchar,
        country -> Varchar,
        province -> Varchar,
        city -> Varchar,
        street -> Varchar,
        street_number -> Varchar,
        created_by -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
