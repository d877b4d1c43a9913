use std::any::{TypeId, type_name};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use crate::errors::DocsError;

pub mod errors;

pub type DocsResult<T> = Result<T, DocsError>;

/// Runtime reference to a Rust type.
///
/// Identifies the handler type that owns a documented operation, and doubles as the
/// capability reference used to look components up in a service registry.
/// Equality and hashing only consider the [`TypeId`].
#[derive(Debug, Clone, Copy)]
pub struct TypeRef {
    id: TypeId,
    name: &'static str,
}

impl TypeRef {
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeRef {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Marker owner for operations that do not belong to any handler, such as health
/// probes. The default operation filter leaves these out of the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHandler;

#[cfg(test)]
mod tests {
    use super::{NoHandler, TypeRef};
    use std::collections::HashSet;

    struct OrdersController;

    #[test]
    fn type_refs_compare_by_type() {
        assert_eq!(TypeRef::of::<NoHandler>(), TypeRef::of::<NoHandler>());
        assert_ne!(TypeRef::of::<NoHandler>(), TypeRef::of::<OrdersController>());
        assert!(TypeRef::of::<OrdersController>().is::<OrdersController>());
    }

    #[test]
    fn type_refs_hash_by_type() {
        let set: HashSet<TypeRef> = [
            TypeRef::of::<NoHandler>(),
            TypeRef::of::<NoHandler>(),
            TypeRef::of::<OrdersController>(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_uses_full_type_name() {
        assert!(
            TypeRef::of::<OrdersController>()
                .to_string()
                .ends_with("OrdersController")
        );
    }
}
