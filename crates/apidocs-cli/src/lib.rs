use std::fmt::{Display, Formatter};
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use apidocs_security::{SecurityCatalog, SecurityKind};
use axum::http::{HeaderValue, Method};
use clap::{Args, Parser, ValueEnum};
use tower_http::cors::{AllowMethods, AllowOrigin, Any, CorsLayer, MaxAge};

#[derive(Debug, Clone, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
    Pretty,
}

/// Security scheme the generated document describes.
#[derive(Copy, Debug, Clone, Eq, PartialEq, ValueEnum)]
pub enum SecuritySchemeArg {
    Basic,
    Oauth,
}

impl Display for SecuritySchemeArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SecuritySchemeArg::Basic => write!(f, "basic"),
            SecuritySchemeArg::Oauth => write!(f, "oauth"),
        }
    }
}

impl From<SecuritySchemeArg> for SecurityKind {
    fn from(value: SecuritySchemeArg) -> Self {
        match value {
            SecuritySchemeArg::Basic => SecurityKind::Basic,
            SecuritySchemeArg::Oauth => SecurityKind::OAuth,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct CliArgs {
    #[clap(flatten)]
    pub http: HttpServerArgs,

    #[clap(flatten)]
    pub document: DocumentArgs,

    #[clap(flatten)]
    pub oauth: OAuthArgs,

    #[arg(long, hide = true)]
    pub markdown_help: bool,

    /// Which log format should the server use
    #[clap(short, long, env, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl CliArgs {
    pub fn security_catalog(&self) -> SecurityCatalog {
        SecurityCatalog::defaults(
            self.oauth.oauth_authority.as_deref(),
            self.oauth.oauth_apiname.as_deref(),
        )
    }

    pub fn security_kind(&self) -> SecurityKind {
        self.document.security_scheme.into()
    }
}

#[derive(Args, Debug, Clone)]
pub struct DocumentArgs {
    /// Title of the generated document
    #[clap(long, env, default_value = "Orders API")]
    pub title: String,

    /// Version of the generated document
    #[clap(long, env, default_value = "1.0")]
    pub doc_version: String,

    /// Security scheme the document requires on its operations. Falls back to basic when the
    /// requested scheme is not configured
    #[clap(long, env, value_enum, default_value_t = SecuritySchemeArg::Basic)]
    pub security_scheme: SecuritySchemeArg,

    /// Where the document is served, relative to the base path
    #[clap(long, env, default_value = "/swagger/v1/swagger.json")]
    pub spec_path: String,

    /// Where the Swagger UI is served, relative to the base path
    #[clap(long, env, default_value = "/swagger")]
    pub ui_path: String,

    /// Serve only the document, without the Swagger UI
    #[clap(long, env, default_value_t = false)]
    pub disable_swagger_ui: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OAuthArgs {
    /// Identity server authority. The OAuth token url is `{authority}/connect/token`
    #[clap(long, env)]
    pub oauth_authority: Option<String>,

    /// Name of the API scope requested from the identity server
    #[clap(long, env)]
    pub oauth_apiname: Option<String>,
}

pub fn parse_http_method(value: &str) -> Result<Method, String> {
    Method::from_bytes(value.as_bytes()).map_err(|f| format!("Failed to format method: {f:?}"))
}

#[derive(Args, Debug, Clone)]
pub struct CorsOptions {
    /// Sets the [Access-Control-Allow-Origin](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Access-Control-Allow-Origin) header to this value
    #[clap(env, long, value_delimiter = ',')]
    pub cors_origin: Option<Vec<String>>,
    /// Sets the [Access-Control-Max-Age](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Access-Control-Max-Age) header to this value
    #[clap(env, long, default_value_t = 172800)]
    pub cors_max_age: u64,
    /// Sets the [Access-Control-Allow-Methods](https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Access-Control-Allow-Methods) header to this value
    #[clap(env, long, value_delimiter = ',', value_parser = parse_http_method)]
    pub cors_methods: Option<Vec<Method>>,
}

impl CorsOptions {
    pub fn middleware(&self) -> CorsLayer {
        CorsLayer::new()
            .max_age(MaxAge::exact(Duration::from_secs(self.cors_max_age)))
            .allow_headers(Any)
            .allow_origin(self.origins())
            .allow_methods(self.methods())
    }

    fn methods(&self) -> AllowMethods {
        match self.cors_methods.clone() {
            Some(methods) => AllowMethods::list(methods),
            None => AllowMethods::any(),
        }
    }

    fn origins(&self) -> AllowOrigin {
        match self.cors_origin.clone() {
            Some(origins) => {
                let list = origins
                    .iter()
                    .filter_map(|origin| HeaderValue::from_str(origin).ok());
                AllowOrigin::list(list)
            }
            None => AllowOrigin::any(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct HttpServerArgs {
    /// Which port should this server listen for HTTP traffic on
    #[clap(short, long, env, default_value_t = 3063)]
    pub port: u16,
    /// Which interfaces should this server listen for HTTP traffic on
    #[clap(short, long, env, default_value = "0.0.0.0")]
    pub interface: String,
    /// Which base path should this server listen for HTTP traffic on
    #[clap(short, long, env, default_value = "")]
    pub base_path: String,

    #[clap(flatten)]
    pub cors: CorsOptions,
}

impl HttpServerArgs {
    pub fn http_server_addr(&self) -> String {
        format!("{}:{}", self.interface, self.port)
    }

    pub fn ip_addr(&self) -> Result<IpAddr, String> {
        IpAddr::from_str(&self.interface)
            .map_err(|e| format!("Failed to parse interface [{}]: {e}", self.interface))
    }

    pub fn http_server_socket(&self) -> Result<SocketAddr, String> {
        self.ip_addr().map(|ip| SocketAddr::new(ip, self.port))
    }

    pub fn base_path(&self) -> Option<String> {
        let trimmed = self.base_path.trim_end_matches('/');
        if trimmed.is_empty() {
            None
        } else if trimmed.starts_with('/') {
            Some(trimmed.to_owned())
        } else {
            Some(format!("/{trimmed}"))
        }
    }
}
