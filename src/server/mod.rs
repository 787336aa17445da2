// src/server/mod.rs
// =============================================================================
// The web front end behind `link-harvester serve`.
//
// Routes:
// - GET  /        form asking for a start URL and an extension list
// - POST /crawl   runs a crawl and renders the matching links
// - GET  /health  liveness check
//
// Every POST /crawl runs its own crawl with its own frontier and visited
// set; the only thing handlers share is the fetcher and the crawl limits.
// =============================================================================

mod render;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::crawl::{harvest, CrawlConfig, CrawlRequest};
use crate::fetch::Fetcher;

#[derive(Clone)]
pub struct AppState {
    fetcher: Arc<dyn Fetcher>,
    config: Arc<CrawlConfig>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn Fetcher>, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
        }
    }
}

// Body of POST /crawl
#[derive(Debug, Deserialize)]
pub struct CrawlForm {
    url: String,
    #[serde(default)]
    extensions: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/crawl", post(crawl_handler))
        .route("/health", get(health))
        .with_state(state)
}

// Binds `addr` and serves until the process is stopped
pub async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}...", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn home() -> Html<String> {
    Html(render::home_page())
}

async fn health() -> &'static str {
    "ok"
}

async fn crawl_handler(State(state): State<AppState>, Form(form): Form<CrawlForm>) -> Response {
    let request = match CrawlRequest::parse(&form.url, &form.extensions) {
        Ok(request) => request,
        Err(e) => {
            warn!("{}", e);
            return (StatusCode::BAD_REQUEST, "Invalid URL").into_response();
        }
    };

    let harvest = harvest(request, state.fetcher.as_ref(), &state.config).await;
    Html(render::results_page(&harvest)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use url::Url;

    struct StaticSite;

    #[async_trait]
    impl Fetcher for StaticSite {
        async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
            match url.path() {
                "/" => Ok(r#"<a href="/cat.jpg">cat</a><a href="/about">about</a>"#.to_string()),
                "/about" => Ok(r#"<a href="/team.JPG">team</a><a href="/it's&amp;more.jpg">odd</a>"#.to_string()),
                _ => Err(FetchError::Status { code: 404 }),
            }
        }
    }

    fn app() -> Router {
        router(AppState::new(Arc::new(StaticSite), CrawlConfig::default()))
    }

    fn form_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/crawl")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_home_renders_form() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<form"));
    }

    #[tokio::test]
    async fn test_crawl_rejects_invalid_url() {
        let response = app()
            .oneshot(form_request("url=not+a+url&extensions=.jpg"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "Invalid URL");
    }

    #[tokio::test]
    async fn test_crawl_renders_matching_links() {
        let response = app()
            .oneshot(form_request("url=http%3A%2F%2Fa.test%2F&extensions=.jpg"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"<a href="http://a.test/cat.jpg">"#));
        assert!(html.contains(r#"<a href="http://a.test/team.JPG">"#));
        assert!(!html.contains("http://a.test/about\""));
    }

    #[tokio::test]
    async fn test_crawl_escapes_links() {
        let response = app()
            .oneshot(form_request("url=http%3A%2F%2Fa.test%2Fabout&extensions=.jpg%2C%3Cb%3E"))
            .await
            .unwrap();

        let html = body_text(response).await;
        assert!(html.contains("&amp;more.jpg"));
        assert!(!html.contains("&more.jpg"));
        assert!(html.contains("matching .jpg,&lt;b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
