use apidocs_generator::{OperationContext, OperationProcessor};
use serde_json::Value;
use utoipa::Modify;
use utoipa::openapi::path::{Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{ObjectBuilder, Type};
use utoipa::openapi::security::{SecurityRequirement, SecurityScheme};
use utoipa::openapi::{OpenApi, RefOr, Required, Schema};

pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
pub const ACCEPT_LANGUAGE_DESCRIPTION: &str = "pt-BR or en-US";
pub const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Attaches a requirement on the named security scheme to every operation it sees.
pub struct OperationSecurityScopeProcessor {
    name: String,
}

impl OperationSecurityScopeProcessor {
    pub fn new(name: impl Into<String>) -> Self {
        OperationSecurityScopeProcessor { name: name.into() }
    }
}

impl OperationProcessor for OperationSecurityScopeProcessor {
    fn process(&self, context: &mut OperationContext<'_>) -> bool {
        context
            .operation
            .security
            .get_or_insert_with(Vec::new)
            .push(SecurityRequirement::new(self.name.as_str(), Vec::<String>::new()));
        true
    }
}

/// Registers a named security scheme and requires it document wide.
pub struct SecurityDefinitionAppender {
    name: String,
    scheme: SecurityScheme,
}

impl SecurityDefinitionAppender {
    pub fn new(name: impl Into<String>, scheme: SecurityScheme) -> Self {
        SecurityDefinitionAppender {
            name: name.into(),
            scheme,
        }
    }
}

impl Modify for SecurityDefinitionAppender {
    fn modify(&self, openapi: &mut OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(self.name.as_str(), self.scheme.clone());
        openapi
            .security
            .get_or_insert_with(Vec::new)
            .push(SecurityRequirement::new(self.name.as_str(), Vec::<String>::new()));
    }
}

pub fn accept_language_parameter() -> Parameter {
    ParameterBuilder::new()
        .name(ACCEPT_LANGUAGE)
        .parameter_in(ParameterIn::Header)
        .required(Required::False)
        .description(Some(ACCEPT_LANGUAGE_DESCRIPTION))
        .schema(Some(RefOr::T(Schema::Object(
            ObjectBuilder::new()
                .schema_type(Type::String)
                .default(Some(Value::String(DEFAULT_LANGUAGE.into())))
                .build(),
        ))))
        .build()
}

/// Appends the optional `Accept-Language` header to every path of the document.
///
/// Not idempotent: each call appends another copy, so run it once per document.
pub fn append_accept_language(document: &mut OpenApi) {
    for item in document.paths.paths.values_mut() {
        item.parameters
            .get_or_insert_with(Vec::new)
            .push(accept_language_parameter());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidocs_types::TypeRef;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use utoipa::openapi::path::{HttpMethod, OperationBuilder};
    use utoipa::openapi::security::{ApiKey, ApiKeyValue};
    use utoipa::openapi::{OpenApiBuilder, PathItem, Paths};

    struct OrdersController;

    fn two_path_document() -> OpenApi {
        let mut paths = Paths::new();
        paths.add_path_operation("/orders", vec![HttpMethod::Get], OperationBuilder::new().build());
        paths.add_path_operation("/orders/{id}", vec![HttpMethod::Get], OperationBuilder::new().build());
        OpenApiBuilder::new().paths(paths).build()
    }

    fn parameter_counts(document: &OpenApi) -> Vec<usize> {
        document
            .paths
            .paths
            .values()
            .map(|item: &PathItem| item.parameters.as_ref().map(Vec::len).unwrap_or(0))
            .collect()
    }

    #[test]
    fn accept_language_parameter_shape() {
        let value = serde_json::to_value(accept_language_parameter()).unwrap();
        assert_eq!(value["name"], "Accept-Language");
        assert_eq!(value["in"], "header");
        assert_eq!(value["required"], false);
        assert_eq!(value["description"], "pt-BR or en-US");
        assert_eq!(value["schema"], json!({ "type": "string", "default": "pt-BR" }));
    }

    #[test]
    fn appends_one_parameter_per_path() {
        let mut document = two_path_document();
        append_accept_language(&mut document);
        assert_eq!(parameter_counts(&document), vec![1, 1]);
    }

    #[test]
    fn appending_twice_duplicates_the_parameter() {
        let mut document = two_path_document();
        append_accept_language(&mut document);
        append_accept_language(&mut document);
        assert_eq!(parameter_counts(&document), vec![2, 2]);
        for item in document.paths.paths.values() {
            assert!(
                item.parameters
                    .as_ref()
                    .unwrap()
                    .iter()
                    .all(|p| p.name == ACCEPT_LANGUAGE)
            );
        }
    }

    #[test]
    fn scope_processor_adds_named_requirement() {
        let mut operation = OperationBuilder::new().build();
        let mut context = OperationContext {
            handler: TypeRef::of::<OrdersController>(),
            path: "/orders",
            methods: &[HttpMethod::Get],
            operation: &mut operation,
        };
        assert!(OperationSecurityScopeProcessor::new("JWT Token").process(&mut context));
        assert_eq!(
            serde_json::to_value(&operation.security).unwrap(),
            json!([{ "JWT Token": [] }])
        );
    }

    #[test]
    fn definition_appender_adds_scheme_and_global_requirement() {
        let mut document = two_path_document();
        let scheme = SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization")));
        SecurityDefinitionAppender::new("JWT Token", scheme).modify(&mut document);

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value["components"]["securitySchemes"]["JWT Token"],
            json!({ "type": "apiKey", "name": "Authorization", "in": "header" })
        );
        assert_eq!(value["security"], json!([{ "JWT Token": [] }]));
    }
}
