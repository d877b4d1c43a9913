use std::sync::Arc;

use apidocs_generator::{
    DocumentConfigurator, DocumentSettings, SchemaProcessor, ServiceResolver,
    schema_processor_from,
};
use apidocs_security::{SecurityCatalog, SecurityKind};
use apidocs_types::{DocsResult, TypeRef};
use tracing::{debug, info};

use crate::operation_filter::{OperationFilter, OperationPredicate, default_predicate};
use crate::processors::{
    OperationSecurityScopeProcessor, SecurityDefinitionAppender, append_accept_language,
};

pub mod operation_filter;
pub mod processors;

pub const JWT_SECURITY_NAME: &str = "JWT Token";

/// Produces the operation predicate and the security kind to publish. Called once,
/// when the document is assembled.
pub type OptionsFactory = Box<dyn FnOnce() -> (OperationPredicate, SecurityKind)>;

#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub title: String,
    pub version: String,
    pub schema_processor: Option<TypeRef>,
    pub catalog: SecurityCatalog,
}

impl DocumentConfig {
    pub fn new(title: impl Into<String>, version: impl Into<String>, catalog: SecurityCatalog) -> Self {
        DocumentConfig {
            title: title.into(),
            version: version.into(),
            schema_processor: None,
            catalog,
        }
    }

    /// Asks for the schema processor registered under `P` to be attached at build time.
    pub fn with_schema_processor<P: ?Sized + 'static>(mut self) -> Self {
        self.schema_processor = Some(TypeRef::of::<P>());
        self
    }
}

/// Turns a [`DocumentConfig`] into the configurator run by the generator on every build.
///
/// Without a factory every operation not owned by `NoHandler` is documented and the
/// Basic security descriptor is published.
pub fn assemble(config: DocumentConfig, factory: Option<OptionsFactory>) -> DocumentConfigurator {
    let (predicate, kind) = match factory {
        Some(factory) => factory(),
        None => (default_predicate(), SecurityKind::Basic),
    };
    info!(
        "Assembling document configuration for {} {} publishing {kind} security",
        config.title, config.version
    );

    Arc::new(
        move |settings: &mut DocumentSettings, resolver: &dyn ServiceResolver| -> DocsResult<()> {
            settings.title = config.title.clone();
            settings.version = config.version.clone();
            settings
                .operation_processors
                .push(Box::new(OperationSecurityScopeProcessor::new(JWT_SECURITY_NAME)));

            let descriptor = config.catalog.resolve(kind)?;
            settings.document_processors.push(Box::new(SecurityDefinitionAppender::new(
                JWT_SECURITY_NAME,
                descriptor.to_security_scheme(),
            )));

            settings.post_process = Some(Box::new(append_accept_language));

            settings
                .operation_processors
                .insert(0, Box::new(OperationFilter::new(predicate.clone())));

            if let Some(processor) = resolve_schema_processor(config.schema_processor.as_ref(), resolver)
            {
                settings.schema_processors.push(processor);
            }
            Ok(())
        },
    )
}

fn resolve_schema_processor(
    reference: Option<&TypeRef>,
    resolver: &dyn ServiceResolver,
) -> Option<Arc<dyn SchemaProcessor>> {
    let reference = reference?;
    let Some(component) = resolver.resolve(reference) else {
        debug!("No component registered for schema processor {reference}, skipping");
        return None;
    };
    let processor = schema_processor_from(&component);
    if processor.is_none() {
        debug!("Component {reference} is not a schema processor, skipping");
    }
    processor
}
