use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use apidocs_types::TypeRef;

use crate::processors::SchemaProcessor;

pub type Component = Arc<dyn Any + Send + Sync>;

/// Looks up components by capability reference.
pub trait ServiceResolver {
    fn resolve(&self, reference: &TypeRef) -> Option<Component>;
}

impl<F> ServiceResolver for F
where
    F: Fn(&TypeRef) -> Option<Component>,
{
    fn resolve(&self, reference: &TypeRef) -> Option<Component> {
        self(reference)
    }
}

/// Type-keyed component registry.
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    components: HashMap<TypeRef, Component>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plain component under its own type.
    pub fn with<T: Any + Send + Sync>(mut self, component: T) -> Self {
        self.components
            .insert(TypeRef::of::<T>(), Arc::new(component));
        self
    }

    /// Registers `processor` under its own type, exposed with the schema processor
    /// capability so [`schema_processor_from`] can recover it.
    pub fn with_schema_processor<P: SchemaProcessor + 'static>(mut self, processor: P) -> Self {
        let capability: Arc<dyn SchemaProcessor> = Arc::new(processor);
        self.components
            .insert(TypeRef::of::<P>(), Arc::new(capability));
        self
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ServiceResolver for ServiceRegistry {
    fn resolve(&self, reference: &TypeRef) -> Option<Component> {
        self.components.get(reference).cloned()
    }
}

/// Views a resolved component as a schema processor, if it carries that capability.
pub fn schema_processor_from(component: &Component) -> Option<Arc<dyn SchemaProcessor>> {
    component
        .downcast_ref::<Arc<dyn SchemaProcessor>>()
        .cloned()
}
