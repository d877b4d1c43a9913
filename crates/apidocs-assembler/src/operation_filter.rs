use std::sync::Arc;

use apidocs_generator::{OperationContext, OperationProcessor};
use apidocs_types::{NoHandler, TypeRef};

pub type OperationPredicate = Arc<dyn Fn(&TypeRef) -> bool + Send + Sync>;

/// Decides per handler type whether its operations are documented.
#[derive(Clone)]
pub struct OperationFilter {
    predicate: OperationPredicate,
}

impl OperationFilter {
    pub fn new(predicate: OperationPredicate) -> Self {
        OperationFilter { predicate }
    }

    pub fn include(&self, handler: &TypeRef) -> bool {
        (self.predicate)(handler)
    }
}

impl Default for OperationFilter {
    fn default() -> Self {
        OperationFilter::new(default_predicate())
    }
}

impl OperationProcessor for OperationFilter {
    fn process(&self, context: &mut OperationContext<'_>) -> bool {
        self.include(&context.handler)
    }
}

/// Everything except operations owned by [`NoHandler`].
pub fn default_predicate() -> OperationPredicate {
    Arc::new(|handler: &TypeRef| !handler.is::<NoHandler>())
}
