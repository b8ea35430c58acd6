mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::*;
use docs_page::app::{AppState, HttpServer};
use docs_page::domain::model::{PathDescriptor, StaticPaths};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

fn router(content: MockContent, serializer: MockSerializer) -> axum::Router {
    let harness = Harness::new(MockPullRequests::default(), content, serializer);
    HttpServer::build_router(AppState {
        renderer: harness.renderer,
        paths: Arc::new(StaticPaths {
            paths: vec![PathDescriptor::new(["acme", "docs"])],
            fallback: true,
        }),
    })
}

async fn get(router: axum::Router, uri: &str, host: Option<&str>) -> (StatusCode, axum::http::HeaderMap, String) {
    let mut request = Request::builder().uri(uri);
    if let Some(host) = host {
        request = request.header(header::HOST, host);
    }
    let response = router
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_props_endpoint_success() {
    let app = router(
        MockContent::default().with_page("acme/docs", page(Some("## Intro"))),
        MockSerializer::default(),
    );

    let (status, headers, body) = get(app, "/_props/acme/docs/intro", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(header::CACHE_CONTROL).unwrap(),
        "public, s-maxage=30, stale-while-revalidate"
    );

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["revalidate"], 30);
    assert_eq!(json["props"]["source"], "compiled:## Intro");
    assert_eq!(json["props"]["error"], serde_json::Value::Null);
    assert_eq!(json["props"]["properties"]["ref"], "main");
    assert_eq!(json["props"]["content"]["baseBranch"], "main");
    assert_eq!(json["props"]["domain"], "docs.example.com");
}

#[tokio::test]
async fn test_props_endpoint_not_found() {
    let app = router(MockContent::default(), MockSerializer::default());

    let (status, _, body) = get(app, "/_props/acme/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["props"]["error"]["kind"], "repositoryNotFound");
    assert_eq!(json["props"]["source"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_page_renders_html() {
    let app = router(
        MockContent::default().with_page("acme/docs", page(Some("## Intro"))),
        MockSerializer::default(),
    );

    let (status, headers, body) = get(app, "/acme/docs", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body.contains("<title>acme/docs</title>"));
    assert!(body.contains("compiled:## Intro"));
    assert!(body.contains(r##"<a href="#intro">Intro</a>"##));
}

#[tokio::test]
async fn test_page_error_status() {
    let app = router(
        MockContent::default().with_page("acme/docs", page(Some("text"))),
        MockSerializer {
            fail: true,
            ..Default::default()
        },
    );

    let (status, _, body) = get(app, "/acme/docs/intro", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Something went wrong"));
}

#[tokio::test]
async fn test_redirect_response() {
    let app = router(
        MockContent::default().with_page("acme/docs", redirect_page("https://acme.dev/docs")),
        MockSerializer::default(),
    );

    let (status, headers, _) = get(app, "/acme/docs/old", None).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "https://acme.dev/docs");
}

#[tokio::test]
async fn test_relative_redirect_on_custom_domain() {
    let app = router(
        MockContent::default().with_page("acme/docs", redirect_page("/guides")),
        MockSerializer::default(),
    );

    let (status, headers, _) = get(app.clone(), "/old", Some("docs.example.com")).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/guides");

    let (status, headers, _) = get(app, "/_props/old", Some("docs.example.com")).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/guides");
}

#[tokio::test]
async fn test_relative_redirect_without_custom_domain() {
    let app = router(
        MockContent::default().with_page("acme/docs", redirect_page("/guides")),
        MockSerializer::default(),
    );

    let (status, headers, _) = get(app, "/acme/docs/old", None).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers.get(header::LOCATION).unwrap(), "/acme/docs/guides");
}

#[tokio::test]
async fn test_custom_domain_root() {
    let app = router(
        MockContent::default().with_page("acme/docs", page(Some("home"))),
        MockSerializer::default(),
    );

    let (status, _, body) = get(app, "/", Some("docs.example.com")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("compiled:home"));
    assert!(body.contains(r#"<link rel="canonical" href="https://docs.example.com" />"#));
}

#[tokio::test]
async fn test_paths_endpoint() {
    let app = router(MockContent::default(), MockSerializer::default());

    let (status, _, body) = get(app, "/_paths", None).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["fallback"], true);
    assert_eq!(json["paths"][0]["slug"], serde_json::json!(["acme", "docs"]));
}
