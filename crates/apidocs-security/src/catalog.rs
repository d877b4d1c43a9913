use std::collections::BTreeMap;
use std::env;

use apidocs_types::DocsResult;
use apidocs_types::errors::DocsError;
use tracing::{debug, warn};

use crate::descriptor::{
    ApiKeyLocation, BasicDescriptor, GrantFlow, OAuthDescriptor, SchemeType, SecurityDescriptor,
    SecurityKind,
};

pub const OAUTH_AUTHORITY_ENV: &str = "OAUTH_AUTHORITY";
pub const OAUTH_APINAME_ENV: &str = "OAUTH_APINAME";

pub const CREDENTIAL_NAME: &str = "Authorization";
pub const BEARER_INSTRUCTIONS: &str = "Copy 'Bearer ' + valid JWT token into field";
pub const API_SCOPE_DESCRIPTION: &str = "Access API Scope";

/// Ordered set of security descriptors. Insertion order is lookup order.
///
/// Built once while configuring the service and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityCatalog {
    descriptors: Vec<SecurityDescriptor>,
}

impl SecurityCatalog {
    /// Catalog from explicit descriptors. Callers are expected to include a Basic
    /// descriptor; this is only checked by [`SecurityCatalog::resolve`].
    pub fn new(descriptors: Vec<SecurityDescriptor>) -> Self {
        SecurityCatalog { descriptors }
    }

    /// Default catalog for an optional token authority and api name.
    ///
    /// Always contains the Basic bearer-token descriptor. The OAuth client credentials
    /// descriptor is only added when both values are present.
    pub fn defaults(authority: Option<&str>, api_name: Option<&str>) -> Self {
        let basic = SecurityDescriptor::Basic(BasicDescriptor {
            name: CREDENTIAL_NAME.into(),
            scheme_type: SchemeType::ApiKey,
            location: ApiKeyLocation::Header,
            description: BEARER_INSTRUCTIONS.into(),
        });

        let (Some(authority), Some(api_name)) = (authority, api_name) else {
            debug!("No OAuth authority or api name configured, using Basic security only");
            return SecurityCatalog::new(vec![basic]);
        };

        let oauth = SecurityDescriptor::OAuth(OAuthDescriptor {
            name: CREDENTIAL_NAME.into(),
            scheme_type: SchemeType::OAuth2,
            location: ApiKeyLocation::Header,
            scopes: BTreeMap::from([(api_name.to_string(), API_SCOPE_DESCRIPTION.to_string())]),
            token_url: format!("{authority}/connect/token"),
            flow: GrantFlow::ClientCredentials,
            authorization_url: None,
        });
        SecurityCatalog::new(vec![basic, oauth])
    }

    /// Reads `OAUTH_AUTHORITY` and `OAUTH_APINAME` and builds [`SecurityCatalog::defaults`].
    pub fn from_env() -> Self {
        let authority = env::var(OAUTH_AUTHORITY_ENV).ok();
        let api_name = env::var(OAUTH_APINAME_ENV).ok();
        SecurityCatalog::defaults(authority.as_deref(), api_name.as_deref())
    }

    /// First descriptor of the requested kind, otherwise the first Basic descriptor.
    pub fn resolve(&self, kind: SecurityKind) -> DocsResult<&SecurityDescriptor> {
        if let Some(descriptor) = self.descriptors.iter().find(|d| d.kind() == kind) {
            return Ok(descriptor);
        }
        let fallback = self
            .descriptors
            .iter()
            .find(|d| d.kind() == SecurityKind::Basic)
            .ok_or_else(|| DocsError::NoFallbackSecurityScheme(kind.to_string()))?;
        warn!("No {kind} security descriptor configured, falling back to Basic");
        Ok(fallback)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SecurityDescriptor> {
        self.descriptors.iter()
    }
}

impl Default for SecurityCatalog {
    fn default() -> Self {
        SecurityCatalog::defaults(None, None)
    }
}
