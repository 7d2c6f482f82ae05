//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every record endpoint, the health probes and the
//! schema wrappers from the HTTP adapter, so domain types stay free of
//! utoipa derives. The document backs Swagger UI in debug builds and is
//! printed by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::records::{CreateRecordRequest, DeletedRecordResponse, RecordResponse};
use crate::inbound::http::schemas::{
    DrinkTotalSchema, DrinkTypeSchema, ErrorCodeSchema, ErrorSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Drinklog API",
        description = "Record daily soju and beer consumption and query monthly and yearly views."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::records::list_month,
        crate::inbound::http::records::list_year,
        crate::inbound::http::records::create_record,
        crate::inbound::http::records::delete_record,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateRecordRequest,
        RecordResponse,
        DeletedRecordResponse,
        DrinkTotalSchema,
        DrinkTypeSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "records", description = "Drink records and aggregates"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the registered paths and schema field structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const DRINK_TOTAL_SCHEMA_NAME: &str = "crate.domain.DrinkTotal";

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
    #[case("/api/records/{year}/{month}")]
    #[case("/api/records/{year}")]
    #[case("/api/records")]
    #[case("/api/records/{date}/{drinkType}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    fn openapi_drink_total_schema_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let total_schema = schemas
            .get(DRINK_TOTAL_SCHEMA_NAME)
            .expect("DrinkTotal schema");

        assert_object_schema_has_field(total_schema, "drinkType");
        assert_object_schema_has_field(total_schema, "amount");
    }

    #[rstest]
    fn openapi_document_serialises() {
        let json = ApiDoc::openapi().to_json().expect("document serialises");
        assert!(json.contains("createRecord"));
    }
}
