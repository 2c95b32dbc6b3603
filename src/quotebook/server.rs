//! # HTTP Service
//!
//! JSON endpoints over the quote collection, plus card images:
//!
//! | Route                              | Response                                   |
//! |------------------------------------|--------------------------------------------|
//! | `GET /api/random-quote`            | `{"id": n}`                                |
//! | `GET /api/quotes?search&category`  | filtered list of quotes                    |
//! | `GET /api/quotes/{id}`             | `{"quote": .., "related": [..]}`           |
//! | `GET /api/quotes/{id}/image`       | `image/png`, `?theme=..&size=preview`      |
//! | `GET /api/categories`              | `["全部", ..]`                             |
//! | `GET /api/tags`                    | sorted tag names                           |
//!
//! Errors are `{"error": message}` with 404 for unknown ids or an empty
//! collection and 500 for anything unexpected.
//!
//! The collection is re-read from disk on a blocking task for every request,
//! so edits to the quote files show up without a restart. Favorites are
//! client-local and have no endpoints.

use crate::commands;
use crate::error::QuoteError;
use crate::filter::QuoteFilter;
use crate::loader::QuoteLibrary;
use crate::model::{Quote, ALL_CATEGORY};
use crate::render::{ExportSize, GlyphSource, Theme};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state
pub struct AppState {
    pub quotes_dir: PathBuf,
    pub glyphs: Arc<dyn GlyphSource>,
    /// Used when an image request names no theme.
    pub default_theme: Theme,
}

impl AppState {
    pub fn new(quotes_dir: impl Into<PathBuf>, glyphs: Arc<dyn GlyphSource>) -> Self {
        Self {
            quotes_dir: quotes_dir.into(),
            glyphs,
            default_theme: Theme::default(),
        }
    }

    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }
}

/// An error response: `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Quote not found")
    }

    fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::QuoteNotFound(_) => Self::not_found(),
            QuoteError::NoQuotes => Self::new(StatusCode::NOT_FOUND, "No quotes available"),
            other => {
                tracing::error!("Request failed: {}", other);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct RandomQuoteResponse {
    pub id: u32,
}

#[derive(Debug, Serialize)]
pub struct QuoteDetailResponse {
    pub quote: Quote,
    pub related: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageQuery {
    pub theme: Option<String>,
    pub size: Option<String>,
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/random-quote", get(random_quote))
        .route("/api/quotes", get(list_quotes))
        .route("/api/quotes/{id}", get(quote_detail))
        .route("/api/quotes/{id}/image", get(quote_image))
        .route("/api/categories", get(categories))
        .route("/api/tags", get(tags))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until Ctrl-C.
pub async fn serve(addr: &str, state: Arc<AppState>) -> crate::error::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("quotebook server listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Runs `f` against a freshly loaded library on the blocking pool.
async fn with_library<T, F>(state: &Arc<AppState>, f: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&QuoteLibrary, &AppState) -> ApiResult<T> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || {
        let library = QuoteLibrary::load(&state.quotes_dir);
        f(&library, &state)
    })
    .await
    .map_err(|e| {
        tracing::error!("Request task failed: {}", e);
        ApiError::internal()
    })?
}

/// Ids that do not parse are reported like unknown ids.
fn parse_id(raw: &str) -> ApiResult<u32> {
    raw.trim().parse().map_err(|_| ApiError::not_found())
}

pub async fn random_quote(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RandomQuoteResponse>> {
    with_library(&state, |library, _| {
        let result = commands::random::run(library)?;
        let id = result
            .listed_quotes
            .first()
            .map(|q| q.id)
            .ok_or(QuoteError::NoQuotes)?;
        Ok(Json(RandomQuoteResponse { id }))
    })
    .await
}

pub async fn list_quotes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Quote>>> {
    let category = query
        .category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| ALL_CATEGORY.to_string());
    let filter = QuoteFilter::new(query.search, category);
    with_library(&state, move |library, _| {
        let result = commands::list::run(library, &filter)?;
        Ok(Json(result.listed_quotes))
    })
    .await
}

pub async fn quote_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<QuoteDetailResponse>> {
    let id = parse_id(&id)?;
    with_library(&state, move |library, _| {
        let mut result = commands::view::run(library, id)?;
        let quote = result.listed_quotes.pop().ok_or(QuoteError::QuoteNotFound(id))?;
        Ok(Json(QuoteDetailResponse {
            quote,
            related: result.related_quotes,
        }))
    })
    .await
}

pub async fn quote_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ImageQuery>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    let size = match query.size.as_deref() {
        Some(raw) => raw
            .parse::<ExportSize>()
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))?,
        None => ExportSize::Download,
    };

    let image = with_library(&state, move |library, state| {
        let theme = query
            .theme
            .as_deref()
            .map(Theme::resolve)
            .unwrap_or(state.default_theme);
        Ok(commands::export::render(library, id, theme, size, state.glyphs.as_ref())?)
    })
    .await?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename*=UTF-8''{}",
        urlencoding::encode(&image.filename)
    ))
    .map_err(|e| {
        tracing::error!("Invalid Content-Disposition: {}", e);
        ApiError::internal()
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image.bytes,
    )
        .into_response())
}

pub async fn categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    with_library(&state, |library, _| {
        Ok(Json(commands::catalog::categories(library)?.values))
    })
    .await
}

pub async fn tags(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    with_library(&state, |library, _| Ok(Json(commands::catalog::tags(library)?.values))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::BlockGlyphs;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn write_quote(dir: &std::path::Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    fn quotes_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write_quote(
            dir.path(),
            "001.md",
            "---\nid: 1\nauthor: 屈原\nsource: 离骚\ncategory: 励志\ntags: [坚持]\n---\n路漫漫其修远兮，吾将上下而求索。\n",
        );
        write_quote(
            dir.path(),
            "002.md",
            "---\nid: 2\nauthor: 孔子\nsource: 论语\ncategory: 学习\ntags: [学习]\n---\n学而时习之，不亦说乎？\n",
        );
        write_quote(
            dir.path(),
            "003.md",
            "---\nid: 3\nauthor: 孔子\nsource: 论语\ncategory: 学习\ntags: [学习, 思考]\n---\n学而不思则罔，思而不学则殆。\n",
        );
        dir
    }

    fn app(dir: &TempDir) -> Router {
        create_router(Arc::new(AppState::new(dir.path(), Arc::new(BlockGlyphs))))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>, Option<String>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec(), disposition)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body, _) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn random_quote_returns_known_id() {
        let dir = quotes_dir();
        let (status, body) = get_json(app(&dir), "/api/random-quote").await;
        assert_eq!(status, StatusCode::OK);
        let id = body["id"].as_u64().unwrap();
        assert!((1..=3).contains(&id));
    }

    #[tokio::test]
    async fn random_quote_on_empty_collection_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_json(app(&dir), "/api/random-quote").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({ "error": "No quotes available" }));
    }

    #[tokio::test]
    async fn list_filters_by_search_and_category() {
        let dir = quotes_dir();
        // search=孔子&category=学习
        let (status, body) = get_json(
            app(&dir),
            "/api/quotes?search=%E5%AD%94%E5%AD%90&category=%E5%AD%A6%E4%B9%A0",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<u64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 3]);

        let (_, all) = get_json(app(&dir), "/api/quotes").await;
        assert_eq!(all.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn detail_includes_related() {
        let dir = quotes_dir();
        let (status, body) = get_json(app(&dir), "/api/quotes/2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["quote"]["author"], "孔子");
        assert_eq!(body["related"][0]["id"], 3);
        assert_eq!(body["related"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn detail_unknown_or_malformed_id_is_404() {
        let dir = quotes_dir();
        for uri in ["/api/quotes/99", "/api/quotes/abc"] {
            let (status, body) = get_json(app(&dir), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(body, serde_json::json!({ "error": "Quote not found" }));
        }
    }

    #[tokio::test]
    async fn image_is_png_attachment() {
        let dir = quotes_dir();
        let (status, body, disposition) =
            get(app(&dir), "/api/quotes/1/image?theme=gradient&size=preview").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[1..4], b"PNG");
        assert_eq!(
            disposition.unwrap(),
            "attachment; filename*=UTF-8''%E5%90%8D%E8%A8%80-%E5%B1%88%E5%8E%9F-%E6%B8%90%E5%8F%98-1.png"
        );
    }

    #[tokio::test]
    async fn image_with_unknown_theme_falls_back_to_classic() {
        let dir = quotes_dir();
        let (status, _, disposition) =
            get(app(&dir), "/api/quotes/1/image?theme=neon&size=preview").await;
        assert_eq!(status, StatusCode::OK);
        assert!(disposition.unwrap().ends_with("%E7%BB%8F%E5%85%B8-1.png"));
    }

    #[tokio::test]
    async fn image_with_bad_size_is_400() {
        let dir = quotes_dir();
        let (status, body) = get_json(app(&dir), "/api/quotes/1/image?size=poster").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("poster"));
    }

    #[tokio::test]
    async fn categories_and_tags() {
        let dir = quotes_dir();
        let (_, categories) = get_json(app(&dir), "/api/categories").await;
        assert_eq!(categories, serde_json::json!(["全部", "励志", "学习"]));
        let (_, tags) = get_json(app(&dir), "/api/tags").await;
        assert_eq!(tags, serde_json::json!(["坚持", "学习", "思考"]));
    }
}
