use std::collections::BTreeMap;

use apidocs_types::TypeRef;
use utoipa::openapi::path::{HttpMethod, Operation};
use utoipa::openapi::{RefOr, Schema};
use utoipa::{PartialSchema, ToSchema};

#[derive(Debug, Clone)]
pub struct DiscoveredOperation {
    pub handler: TypeRef,
    pub path: String,
    pub methods: Vec<HttpMethod>,
    pub operation: Operation,
}

/// Everything the service exposes for documentation: operations tagged with the
/// handler type that owns them, and the component schemas they reference.
#[derive(Debug, Clone, Default)]
pub struct ApiDescription {
    operations: Vec<DiscoveredOperation>,
    schemas: BTreeMap<String, RefOr<Schema>>,
}

impl ApiDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operation<H: ?Sized + 'static>(
        mut self,
        path: impl Into<String>,
        methods: Vec<HttpMethod>,
        operation: Operation,
    ) -> Self {
        self.operations.push(DiscoveredOperation {
            handler: TypeRef::of::<H>(),
            path: path.into(),
            methods,
            operation,
        });
        self
    }

    /// Adds the operation generated by `#[utoipa::path]`, owned by handler `H`.
    pub fn path<H: ?Sized + 'static, P: utoipa::Path>(self) -> Self {
        self.operation::<H>(P::path(), P::methods(), P::operation())
    }

    /// Adds `S` and every schema it references.
    pub fn schema<S: ToSchema>(mut self) -> Self {
        self.schemas
            .insert(S::name().into_owned(), <S as PartialSchema>::schema());
        let mut referenced = Vec::new();
        S::schemas(&mut referenced);
        self.schemas.extend(referenced);
        self
    }

    pub fn operations(&self) -> &[DiscoveredOperation] {
        &self.operations
    }

    pub fn schemas(&self) -> &BTreeMap<String, RefOr<Schema>> {
        &self.schemas
    }
}
