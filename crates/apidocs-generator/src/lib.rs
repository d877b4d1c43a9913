use apidocs_types::DocsResult;
use tracing::debug;
use utoipa::openapi::{ComponentsBuilder, Info, OpenApi, OpenApiBuilder, Paths};

pub mod description;
pub mod processors;
pub mod registry;
pub mod settings;

pub use description::{ApiDescription, DiscoveredOperation};
pub use processors::{OperationContext, OperationProcessor, SchemaProcessor};
pub use registry::{Component, ServiceRegistry, ServiceResolver, schema_processor_from};
pub use settings::{DocumentConfigurator, DocumentSettings, PostProcess};

/// Builds OpenAPI documents from an [`ApiDescription`].
///
/// Every call to [`DocumentGenerator::generate`] runs the configurator against fresh
/// [`DocumentSettings`] and produces an independent document, in this order:
/// operation processors, schema processors, document processors, post process.
#[derive(Debug, Clone)]
pub struct DocumentGenerator {
    description: ApiDescription,
}

impl DocumentGenerator {
    pub fn new(description: ApiDescription) -> Self {
        DocumentGenerator { description }
    }

    pub fn generate(
        &self,
        configure: &DocumentConfigurator,
        resolver: &dyn ServiceResolver,
    ) -> DocsResult<OpenApi> {
        let mut settings = DocumentSettings::default();
        configure(&mut settings, resolver)?;

        let mut paths = Paths::new();
        for discovered in self.description.operations() {
            let mut operation = discovered.operation.clone();
            let included = {
                let mut context = OperationContext {
                    handler: discovered.handler,
                    path: &discovered.path,
                    methods: &discovered.methods,
                    operation: &mut operation,
                };
                settings
                    .operation_processors
                    .iter()
                    .all(|processor| processor.process(&mut context))
            };
            if !included {
                debug!(
                    "Leaving {} owned by {} out of the document",
                    discovered.path, discovered.handler
                );
                continue;
            }
            paths.add_path_operation(&discovered.path, discovered.methods.clone(), operation);
        }

        let mut schemas = self.description.schemas().clone();
        for (name, schema) in schemas.iter_mut() {
            for processor in &settings.schema_processors {
                processor.process(name, schema);
            }
        }

        let mut document = OpenApiBuilder::new()
            .info(Info::new(settings.title.clone(), settings.version.clone()))
            .paths(paths)
            .components(Some(ComponentsBuilder::new().schemas_from_iter(schemas).build()))
            .build();

        for processor in &settings.document_processors {
            processor.modify(&mut document);
        }
        if let Some(post_process) = &settings.post_process {
            post_process(&mut document);
        }
        Ok(document)
    }
}
