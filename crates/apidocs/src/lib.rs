use ::tracing::info;
use apidocs_assembler::operation_filter::default_predicate;
use apidocs_assembler::{DocumentConfig, OptionsFactory, assemble};
use apidocs_cli::CliArgs;
use apidocs_generator::{DocumentGenerator, ServiceRegistry};
use apidocs_publisher::DocsPublisher;
use apidocs_request_logger::log_request_middleware;
use apidocs_types::DocsResult;
use axum::Router;
use axum::middleware::from_fn;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::openapi::OpenApi;

use crate::orders::SchemaTitles;

pub mod orders;
pub mod tracing;

/// Generates the document of the order service as configured on the command line.
pub fn build_document(args: &CliArgs) -> DocsResult<OpenApi> {
    let kind = args.security_kind();
    let factory: OptionsFactory = Box::new(move || (default_predicate(), kind));
    let config = DocumentConfig::new(
        args.document.title.clone(),
        args.document.doc_version.clone(),
        args.security_catalog(),
    )
    .with_schema_processor::<SchemaTitles>();
    let configurator = assemble(config, Some(factory));

    let registry = ServiceRegistry::new().with_schema_processor(SchemaTitles);
    DocumentGenerator::new(orders::api_description()).generate(&configurator, &registry)
}

pub fn configure_server(args: &CliArgs) -> DocsResult<Router> {
    let document = build_document(args)?;
    let base_path = args.http.base_path();

    let publisher = DocsPublisher::new(document)
        .with_spec_path(args.document.spec_path.clone())
        .with_mount_path(base_path.clone().unwrap_or_default());
    let publisher = if args.document.disable_swagger_ui {
        info!("Swagger UI is disabled, serving the document only");
        publisher.without_ui()
    } else {
        publisher.with_ui_path(args.document.ui_path.clone())
    };

    let top_router: Router = Router::new()
        .merge(orders::router())
        .merge(publisher.router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(args.http.cors.middleware())
                .layer(from_fn(log_request_middleware)),
        );

    let router_to_host = match base_path {
        Some(path) => {
            info!("Had a path different from root. Setting up a nested router");
            Router::new().nest(&path, top_router)
        }
        None => top_router,
    };
    Ok(router_to_host)
}
