pub mod catalog;
pub mod descriptor;

pub use catalog::SecurityCatalog;
pub use descriptor::{
    ApiKeyLocation, BasicDescriptor, GrantFlow, OAuthDescriptor, SchemeType, SecurityDescriptor,
    SecurityKind,
};
