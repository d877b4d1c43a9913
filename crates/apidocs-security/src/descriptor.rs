use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, AuthorizationCode, ClientCredentials, Flow, HttpAuthScheme, HttpBuilder,
    Implicit, OAuth2, Password, Scopes, SecurityScheme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityKind {
    Basic,
    OAuth,
}

impl Display for SecurityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityKind::Basic => write!(f, "Basic"),
            SecurityKind::OAuth => write!(f, "OAuth"),
        }
    }
}

/// Wire-level category of a security scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchemeType {
    ApiKey,
    Basic,
    Bearer,
    OAuth2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrantFlow {
    Implicit,
    Password,
    ClientCredentials,
    AuthorizationCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicDescriptor {
    pub name: String,
    pub scheme_type: SchemeType,
    pub location: ApiKeyLocation,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthDescriptor {
    pub name: String,
    pub scheme_type: SchemeType,
    pub location: ApiKeyLocation,
    pub scopes: BTreeMap<String, String>,
    pub token_url: String,
    pub flow: GrantFlow,
    /// Only read by the implicit and authorization code flows. Falls back to `token_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,
}

/// Descriptive metadata of one authentication scheme, as embedded in the published
/// document. Nothing here enforces authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SecurityDescriptor {
    Basic(BasicDescriptor),
    OAuth(OAuthDescriptor),
}

impl SecurityDescriptor {
    pub fn kind(&self) -> SecurityKind {
        match self {
            SecurityDescriptor::Basic(_) => SecurityKind::Basic,
            SecurityDescriptor::OAuth(_) => SecurityKind::OAuth,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SecurityDescriptor::Basic(basic) => &basic.name,
            SecurityDescriptor::OAuth(oauth) => &oauth.name,
        }
    }

    pub fn scheme_type(&self) -> SchemeType {
        match self {
            SecurityDescriptor::Basic(basic) => basic.scheme_type,
            SecurityDescriptor::OAuth(oauth) => oauth.scheme_type,
        }
    }

    pub fn location(&self) -> ApiKeyLocation {
        match self {
            SecurityDescriptor::Basic(basic) => basic.location,
            SecurityDescriptor::OAuth(oauth) => oauth.location,
        }
    }

    pub fn to_security_scheme(&self) -> SecurityScheme {
        match self {
            SecurityDescriptor::Basic(basic) => basic.to_security_scheme(),
            SecurityDescriptor::OAuth(oauth) => oauth.to_security_scheme(),
        }
    }
}

impl BasicDescriptor {
    pub fn to_security_scheme(&self) -> SecurityScheme {
        match self.scheme_type {
            SchemeType::Basic => SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Basic)
                    .description(Some(self.description.clone()))
                    .build(),
            ),
            SchemeType::Bearer => SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(self.description.clone()))
                    .build(),
            ),
            // a basic descriptor carries no flows, so OAuth2 degrades to a plain key
            SchemeType::ApiKey | SchemeType::OAuth2 => {
                let value = ApiKeyValue::with_description(self.name.clone(), self.description.clone());
                SecurityScheme::ApiKey(match self.location {
                    ApiKeyLocation::Header => ApiKey::Header(value),
                    ApiKeyLocation::Query => ApiKey::Query(value),
                    ApiKeyLocation::Cookie => ApiKey::Cookie(value),
                })
            }
        }
    }
}

impl OAuthDescriptor {
    pub fn to_security_scheme(&self) -> SecurityScheme {
        let scopes = Scopes::from_iter(
            self.scopes
                .iter()
                .map(|(scope, description)| (scope.clone(), description.clone())),
        );
        let authorization_url = self
            .authorization_url
            .clone()
            .unwrap_or_else(|| self.token_url.clone());
        let flow = match self.flow {
            GrantFlow::Implicit => Flow::Implicit(Implicit::new(authorization_url, scopes)),
            GrantFlow::Password => Flow::Password(Password::new(self.token_url.clone(), scopes)),
            GrantFlow::ClientCredentials => {
                Flow::ClientCredentials(ClientCredentials::new(self.token_url.clone(), scopes))
            }
            GrantFlow::AuthorizationCode => Flow::AuthorizationCode(AuthorizationCode::new(
                authorization_url,
                self.token_url.clone(),
                scopes,
            )),
        };
        SecurityScheme::OAuth2(OAuth2::new([flow]))
    }
}
