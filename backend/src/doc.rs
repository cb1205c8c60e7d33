//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! domain payload schemas and the bearer security scheme. The document is
//! served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AddressTuple, CodeAssignment, CommunityCodeRecord, Error, ErrorCode, Identity, Role,
};
use crate::inbound::http::community_codes::CommunityCodeRequest;
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Enrich the generated document with the bearer security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/v1/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Marketplace backend API",
        description = "Bearer-authenticated access to the community code registry."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_identity,
        crate::inbound::http::community_codes::get_or_create_community_code,
        crate::inbound::http::community_codes::list_community_codes,
        crate::inbound::http::community_codes::get_community_code,
        crate::inbound::http::community_codes::delete_community_code,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Identity,
        Role,
        LoginRequest,
        LoginResponse,
        AddressTuple,
        CommunityCodeRequest,
        CodeAssignment,
        CommunityCodeRecord,
        ProbeStatus
    )),
    tags(
        (name = "users", description = "Login and the current identity"),
        (name = "community-codes", description = "Address to community code registry"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("CodeAssignment", "isNew")]
    #[case("CommunityCodeRecord", "createdBy")]
    #[case("AddressTuple", "streetNumber")]
    fn schemas_expose_camel_case_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .iter()
            .find(|(key, _)| key.as_str() == name || key.ends_with(&format!(".{name}")))
            .map(|(_, schema)| schema)
            .unwrap_or_else(|| panic!("{name} schema registered"));

        assert_object_schema_has_field(schema, field);
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/me")]
    #[case("/api/v1/community-codes")]
    #[case("/api/v1/community-codes/{code}")]
    #[case("/api/v1/community-codes/{id}")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }
}
