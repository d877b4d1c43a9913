use std::sync::Arc;

use apidocs_types::DocsResult;
use utoipa::Modify;
use utoipa::openapi::OpenApi;

use crate::processors::{OperationProcessor, SchemaProcessor};
use crate::registry::ServiceResolver;

pub type PostProcess = Box<dyn Fn(&mut OpenApi) + Send + Sync>;

/// Configuration closure invoked once per document build.
pub type DocumentConfigurator =
    Arc<dyn Fn(&mut DocumentSettings, &dyn ServiceResolver) -> DocsResult<()> + Send + Sync>;

/// Hook points of a single document build. Processors run in vector order.
#[derive(Default)]
pub struct DocumentSettings {
    pub title: String,
    pub version: String,
    pub operation_processors: Vec<Box<dyn OperationProcessor>>,
    pub document_processors: Vec<Box<dyn Modify + Send + Sync>>,
    pub schema_processors: Vec<Arc<dyn SchemaProcessor>>,
    pub post_process: Option<PostProcess>,
}
