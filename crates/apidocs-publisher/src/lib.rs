use std::sync::Arc;

use apidocs_types::errors::DocsError;
use axum::extract::Path;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::{StatusCode, header};
use tracing::debug;
use utoipa::openapi::{OpenApi, Server};
use utoipa_swagger_ui::{Config, Url};

pub mod forwarded;

pub use forwarded::{
    ForwardedLocation, ForwardedPrefix, extract_host, extract_path, extract_proto,
};

pub const DEFAULT_SPEC_PATH: &str = "/swagger/v1/swagger.json";
pub const DEFAULT_UI_PATH: &str = "/swagger";

/// Serves a generated document, rewritten per request for the location the client
/// reached us through, along with a Swagger UI pointing at it.
#[derive(Debug, Clone)]
pub struct DocsPublisher {
    template: Arc<OpenApi>,
    spec_path: String,
    ui_path: Option<String>,
    mount_path: String,
}

impl DocsPublisher {
    pub fn new(document: OpenApi) -> Self {
        DocsPublisher {
            template: Arc::new(document),
            spec_path: DEFAULT_SPEC_PATH.into(),
            ui_path: Some(DEFAULT_UI_PATH.into()),
            mount_path: String::new(),
        }
    }

    pub fn with_spec_path(mut self, spec_path: impl Into<String>) -> Self {
        self.spec_path = spec_path.into();
        self
    }

    /// The UI needs a path of its own, it cannot be served from `/`.
    pub fn with_ui_path(mut self, ui_path: impl Into<String>) -> Self {
        self.ui_path = Some(ui_path.into().trim_end_matches('/').to_owned());
        self
    }

    /// Path the router gets nested under, added to every external url.
    pub fn with_mount_path(mut self, mount_path: impl Into<String>) -> Self {
        self.mount_path = mount_path.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn without_ui(mut self) -> Self {
        self.ui_path = None;
        self
    }

    pub fn spec_path(&self) -> &str {
        &self.spec_path
    }

    pub fn ui_path(&self) -> Option<&str> {
        self.ui_path.as_deref()
    }

    pub fn document_for(&self, location: &ForwardedLocation) -> OpenApi {
        rewrite_document(&self.template, location)
    }

    pub fn router<S>(self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let publisher = Arc::new(self);
        let spec_publisher = publisher.clone();
        let router = Router::new().route(
            &publisher.spec_path,
            get(move |location: ForwardedLocation| async move {
                let location = location.nested(&spec_publisher.mount_path);
                debug!(
                    "Serving document for host [{}] prefix [{}]",
                    location.host, location.base_path
                );
                Json(spec_publisher.document_for(&location))
            }),
        );

        let Some(ui_path) = publisher.ui_path.clone() else {
            return router;
        };
        let index_publisher = publisher.clone();
        let asset_publisher = publisher.clone();
        let redirect_publisher = publisher.clone();
        let redirect_target = format!("{ui_path}/");
        router
            .route(
                &ui_path,
                get(move |prefix: ForwardedPrefix| async move {
                    let prefix = prefix.nested(&redirect_publisher.mount_path);
                    Redirect::to(&prefix.external_path(&redirect_target))
                }),
            )
            .route(
                &format!("{ui_path}/"),
                get(move |prefix: ForwardedPrefix| async move {
                    index_publisher.ui_asset("index.html", prefix)
                }),
            )
            .route(
                &format!("{ui_path}/{{*tail}}"),
                get(
                    move |prefix: ForwardedPrefix, Path(tail): Path<String>| async move {
                        asset_publisher.ui_asset(&tail, prefix)
                    },
                ),
            )
    }

    fn ui_asset(&self, asset: &str, prefix: ForwardedPrefix) -> Response {
        let prefix = prefix.nested(&self.mount_path);
        let title = self.template.info.title.clone();
        let spec_url = prefix.external_path(&self.spec_path);
        let config = Arc::new(Config::new([Url::new(&title, &spec_url)]));
        match utoipa_swagger_ui::serve(asset, config) {
            Ok(Some(file)) => (
                [(header::CONTENT_TYPE, file.content_type)],
                file.bytes.to_vec(),
            )
                .into_response(),
            Ok(None) => StatusCode::NOT_FOUND.into_response(),
            Err(e) => DocsError::SwaggerUiError(e.to_string()).into_response(),
        }
    }
}

/// Copy of `template` whose only server is the scheme-relative location of the caller.
pub fn rewrite_document(template: &OpenApi, location: &ForwardedLocation) -> OpenApi {
    let mut document = template.clone();
    document.servers = Some(vec![Server::new(location.server_url())]);
    document
}
