//! HTTP surface for the documentation renderer.
//!
//! - `GET /_paths` lists the pages gathered at startup
//! - `GET /_props/{*slug}` returns page props as JSON
//! - `GET /{*slug}` renders the page as HTML

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::core::context::RenderContext;
use crate::core::render::{DocsRenderer, RenderOutcome, StaticProps};
use crate::core::slug::slug_from_path;
use crate::domain::error::RenderErrorObject;
use crate::domain::model::{DomainRecord, StaticPaths};
use crate::utils::html::escape;

#[derive(Clone)]
pub struct AppState {
    pub renderer: DocsRenderer,
    pub paths: Arc<StaticPaths>,
}

pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(renderer: DocsRenderer, paths: StaticPaths) -> Self {
        let state = AppState {
            renderer,
            paths: Arc::new(paths),
        };
        Self {
            router: Self::build_router(state),
        }
    }

    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/_paths", get(paths_handler))
            .route("/_props/{*slug}", get(props_handler))
            .route("/", get(root_handler))
            .route("/{*slug}", get(page_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Domain record serving the request host, ignoring any port.
pub fn domain_for_host<'a>(host: Option<&str>, domains: &'a [DomainRecord]) -> Option<&'a DomainRecord> {
    let host = host?;
    let host = host.split(':').next().unwrap_or(host);
    domains.iter().find(|r| r.domain.eq_ignore_ascii_case(host))
}

/// Requests arriving on a custom domain address the repository root, so
/// the repository is prepended to the slug.
pub fn rewrite_for_host(record: Option<&DomainRecord>, slug: Vec<String>) -> Vec<String> {
    match record {
        Some(record) => {
            let mut rewritten = slug_from_path(&record.repository);
            rewritten.extend(slug);
            rewritten
        }
        None => slug,
    }
}

/// On a custom domain the repository is the site root, so redirects into it
/// drop the `/owner/repo` prefix. Anything else is left untouched.
pub fn redirect_for_host(destination: &str, record: Option<&DomainRecord>) -> String {
    let Some(record) = record else {
        return destination.to_string();
    };
    let prefix = format!("/{}", record.repository);

    match destination.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(&prefix) => match &destination[prefix.len()..] {
            "" => "/".to_string(),
            rest if rest.starts_with('/') => rest.to_string(),
            _ => destination.to_string(),
        },
        _ => destination.to_string(),
    }
}

fn request_slug<'a>(
    state: &'a AppState,
    headers: &HeaderMap,
    path: &str,
) -> (Vec<String>, Option<&'a DomainRecord>) {
    let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());
    let record = domain_for_host(host, state.renderer.domains().domains_list());
    (rewrite_for_host(record, slug_from_path(path)), record)
}

fn redirect_response(destination: &str, record: Option<&DomainRecord>) -> Response {
    Redirect::temporary(&redirect_for_host(destination, record)).into_response()
}

fn cache_control(revalidate: u32) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "public, s-maxage={}, stale-while-revalidate",
        revalidate
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
}

async fn paths_handler(State(state): State<AppState>) -> Json<StaticPaths> {
    Json(state.paths.as_ref().clone())
}

async fn props_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    let (slug, record) = request_slug(&state, &headers, &slug);

    match state.renderer.static_props(slug).await {
        RenderOutcome::Redirect(redirect) => redirect_response(&redirect.destination, record),
        RenderOutcome::Props(props) => {
            let status = props
                .props
                .error
                .as_ref()
                .and_then(|e| StatusCode::from_u16(e.status_code).ok())
                .unwrap_or(StatusCode::OK);
            (
                status,
                [(header::CACHE_CONTROL, cache_control(props.revalidate))],
                Json(props),
            )
                .into_response()
        }
    }
}

async fn root_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (slug, record) = request_slug(&state, &headers, "");
    render_page(&state, slug, record).await
}

async fn page_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Response {
    let (slug, record) = request_slug(&state, &headers, &slug);
    render_page(&state, slug, record).await
}

async fn render_page(state: &AppState, slug: Vec<String>, record: Option<&DomainRecord>) -> Response {
    match state.renderer.static_props(slug).await {
        RenderOutcome::Redirect(redirect) => redirect_response(&redirect.destination, record),
        RenderOutcome::Props(props) => page_response(&props),
    }
}

fn page_response(props: &StaticProps) -> Response {
    let cache = [(header::CACHE_CONTROL, cache_control(props.revalidate))];

    if let Some(error) = &props.props.error {
        let status = StatusCode::from_u16(error.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, cache, Html(error_document(error))).into_response();
    }

    match RenderContext::from_props(&props.props) {
        Some(ctx) => (StatusCode::OK, cache, Html(ctx.render_document())).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "Incomplete page props").into_response(),
    }
}

fn error_document(error: &RenderErrorObject) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{title}</title>\n</head>\n<body>\n<main class=\"error\">\n<h1>{status}</h1>\n<h2>{title}</h2>\n<p>{description}</p>\n</main>\n</body>\n</html>\n",
        status = error.status_code,
        title = escape(&error.title),
        description = escape(&error.description),
    )
}
