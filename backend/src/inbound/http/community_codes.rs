//! Community code registry handlers.
//!
//! ```text
//! POST   /api/v1/community-codes          get or create a code for an address
//! GET    /api/v1/community-codes          list, newest first
//! GET    /api/v1/community-codes/{code}   look a record up by code
//! DELETE /api/v1/community-codes/{id}     administrators only
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    AddressTuple, AddressValidationError, CodeAssignment, CommunityCodeId, CommunityCodeRecord,
    Error, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedUser;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/community-codes`.
///
/// Absent fields deserialize as empty so they are reported as `empty_field`.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CommunityCodeRequest {
    #[schema(example = "España")]
    pub country: String,
    #[schema(example = "Andalucía")]
    pub province: String,
    #[schema(example = "Sevilla")]
    pub city: String,
    #[schema(example = "Gran Vía")]
    pub street: String,
    #[schema(example = "7")]
    pub street_number: String,
}

impl TryFrom<CommunityCodeRequest> for AddressTuple {
    type Error = AddressValidationError;

    fn try_from(value: CommunityCodeRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.country,
            &value.province,
            &value.city,
            &value.street,
            &value.street_number,
        )
    }
}

fn map_address_validation_error(err: AddressValidationError) -> Error {
    let code = match err {
        AddressValidationError::EmptyField(_) => "empty_field",
        AddressValidationError::NonNumericStreetNumber => "non_numeric_street_number",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field().as_str(), "code": code }))
}

/// Return the code for an address, minting it on first use.
///
/// Responds `201 Created` when this call minted the code and `200 OK` when
/// it already existed, including when a concurrent caller minted it first.
#[utoipa::path(
    post,
    path = "/api/v1/community-codes",
    request_body = CommunityCodeRequest,
    responses(
        (status = 200, description = "Existing code", body = CodeAssignment),
        (status = 201, description = "Code created", body = CodeAssignment),
        (status = 400, description = "Invalid address", body = Error),
        (status = 401, description = "Missing or invalid credential", body = Error),
        (status = 500, description = "Code could not be stored", body = Error),
        (status = 503, description = "Registry unavailable", body = Error)
    ),
    tags = ["community-codes"],
    operation_id = "getOrCreateCommunityCode",
    security(("BearerToken" = []))
)]
#[post("/community-codes")]
pub async fn get_or_create_community_code(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CommunityCodeRequest>,
) -> ApiResult<HttpResponse> {
    let address =
        AddressTuple::try_from(payload.into_inner()).map_err(map_address_validation_error)?;
    let assignment = state
        .community_codes
        .get_or_create(address, user.subject_id())
        .await?;
    let status = if assignment.is_new {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok(HttpResponse::build(status).json(assignment))
}

/// List every registered code, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/community-codes",
    responses(
        (status = 200, description = "Registered codes", body = [CommunityCodeRecord]),
        (status = 401, description = "Missing or invalid credential", body = Error),
        (status = 503, description = "Registry unavailable", body = Error)
    ),
    tags = ["community-codes"],
    operation_id = "listCommunityCodes",
    security(("BearerToken" = []))
)]
#[get("/community-codes")]
pub async fn list_community_codes(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<CommunityCodeRecord>>> {
    Ok(web::Json(state.community_codes.list_all().await?))
}

/// Look a record up by its code.
#[utoipa::path(
    get,
    path = "/api/v1/community-codes/{code}",
    params(
        ("code" = String, Path, description = "Community code", example = "ESP-AND-SEV-GRANVA0007")
    ),
    responses(
        (status = 200, description = "Record", body = CommunityCodeRecord),
        (status = 401, description = "Missing or invalid credential", body = Error),
        (status = 404, description = "Unknown code", body = Error)
    ),
    tags = ["community-codes"],
    operation_id = "getCommunityCode",
    security(("BearerToken" = []))
)]
#[get("/community-codes/{code}")]
pub async fn get_community_code(
    state: web::Data<HttpState>,
    _user: AuthenticatedUser,
    code: web::Path<String>,
) -> ApiResult<web::Json<CommunityCodeRecord>> {
    let record = state.community_codes.get_by_code(&code).await?;
    Ok(web::Json(record))
}

/// Permanently delete a record. Administrators only.
///
/// Properties already carrying the code keep it; nothing checks references.
#[utoipa::path(
    delete,
    path = "/api/v1/community-codes/{id}",
    params(("id" = String, Path, format = Uuid, description = "Record identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Missing or invalid credential", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "Unknown record", body = Error)
    ),
    tags = ["community-codes"],
    operation_id = "deleteCommunityCode",
    security(("BearerToken" = []))
)]
#[delete("/community-codes/{id}")]
pub async fn delete_community_code(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    user.require_any_role(&[Role::Administrator])?;
    let id = Uuid::parse_str(&id).map_err(|_| {
        Error::invalid_request("id must be a UUID")
            .with_details(json!({ "field": "id", "code": "invalid_uuid" }))
    })?;
    state
        .community_codes
        .delete(CommunityCodeId::from_uuid(id))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
