//! Domain primitives, aggregates and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - Identity / Role — the verified caller attached to each request.
//! - AddressTuple / CommunityCode — the registry's key and derived value.
//! - CommunityCodeRegistry — get-or-create orchestration over the
//!   repository port.

pub mod auth;
pub mod community_code;
pub mod error;
pub mod identity;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::community_code::{
    AddressField, AddressTuple, AddressValidationError, CodeAssignment, CommunityCode,
    CommunityCodeId, CommunityCodeRecord, CommunityCodeRegistry,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{Identity, IdentityValidationError, Role, UnknownRoleError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserIdValidationError};

