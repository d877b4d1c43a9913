use apidocs_types::TypeRef;
use utoipa::openapi::path::{HttpMethod, Operation};
use utoipa::openapi::{RefOr, Schema};

/// One discovered operation as seen by the operation processors.
pub struct OperationContext<'a> {
    pub handler: TypeRef,
    pub path: &'a str,
    pub methods: &'a [HttpMethod],
    pub operation: &'a mut Operation,
}

/// Runs once per discovered operation, in registration order.
///
/// Returning `false` drops the operation from the document and skips every
/// processor registered after this one.
pub trait OperationProcessor: Send + Sync {
    fn process(&self, context: &mut OperationContext<'_>) -> bool;
}

/// Runs once per component schema of the document.
pub trait SchemaProcessor: Send + Sync {
    fn process(&self, name: &str, schema: &mut RefOr<Schema>);
}

impl<F> OperationProcessor for F
where
    F: Fn(&mut OperationContext<'_>) -> bool + Send + Sync,
{
    fn process(&self, context: &mut OperationContext<'_>) -> bool {
        self(context)
    }
}
