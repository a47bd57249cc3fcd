//! Request handlers and wire types.
//!
//! Every response, success or not, is a JSON envelope with a `success` flag.
//! Client mistakes get 400; anything the pipeline could not turn into a
//! usable result gets 500.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use page_zen_core::{CleanedArticle, SocialMetadata, fetch::parse_page_url};
use serde::{Deserialize, Serialize};

use crate::AppState;

const URL_REQUIRED: &str = "URL parameter is required";
const ARTICLE_FAILED: &str = "Failed to extract article content";
const OPEN_GRAPH_FAILED: &str = "Failed to extract Open Graph data";

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    pub url: String,
    #[serde(default)]
    pub include_markdown: bool,
}

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    pub url: Option<String>,
    pub markdown: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpenGraphRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct OpenGraphQuery {
    pub url: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub url: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub excerpt: String,
    pub length: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<SocialMetadata>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ArticleResponse {
    fn from_article(article: CleanedArticle, include_markdown: bool) -> Self {
        Self {
            url: article.url,
            title: article.title,
            content: article.content,
            markdown: if include_markdown { article.markdown } else { None },
            author: article.author,
            excerpt: article.excerpt,
            length: article.length,
            published_at: article.published_at,
            open_graph: article.open_graph,
            success: true,
            message: None,
        }
    }

    fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self { url: url.into(), success: false, message: Some(message.into()), ..Default::default() }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OpenGraphResponse {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph: Option<SocialMetadata>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OpenGraphResponse {
    fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self { url: url.into(), open_graph: None, success: false, message: Some(message.into()) }
    }
}

type ArticleReply = (StatusCode, Json<ArticleResponse>);
type OpenGraphReply = (StatusCode, Json<OpenGraphResponse>);

/// Checks that the caller sent an absolute http(s) URL.
fn validate_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err(URL_REQUIRED.to_string());
    }
    parse_page_url(url).map(|_| ()).map_err(|e| e.to_string())
}

pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Hello World" }))
}

/// `POST /extract`
pub async fn extract_article(
    State(state): State<AppState>, payload: Result<Json<ArticleRequest>, JsonRejection>,
) -> ArticleReply {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "Invalid request body");
            let message = format!("Invalid request body: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(ArticleResponse::failure("", message)));
        }
    };

    process_article(&state, request.url, request.include_markdown).await
}

/// `GET /extract?url=...&markdown=true`
pub async fn extract_article_simple(State(state): State<AppState>, Query(query): Query<ArticleQuery>) -> ArticleReply {
    let include_markdown = query.markdown.as_deref() == Some("true");
    process_article(&state, query.url.unwrap_or_default(), include_markdown).await
}

async fn process_article(state: &AppState, url: String, include_markdown: bool) -> ArticleReply {
    if let Err(message) = validate_url(&url) {
        tracing::warn!(url = %url, reason = %message, "Rejected article request");
        return (StatusCode::BAD_REQUEST, Json(ArticleResponse::failure(url, message)));
    }

    tracing::info!(url = %url, include_markdown, "Processing article extraction request");

    match state.extractor.extract_article(&url).await {
        Ok(article) if !article.is_degenerate() => {
            tracing::info!(
                url = %url,
                title = %article.title,
                content_length = article.length,
                include_markdown,
                "Successfully extracted article"
            );
            (StatusCode::OK, Json(ArticleResponse::from_article(article, include_markdown)))
        }
        Ok(_) => {
            tracing::warn!(url = %url, "Extraction produced neither title nor content");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ArticleResponse::failure(url, ARTICLE_FAILED)))
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to extract article content");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ArticleResponse::failure(url, ARTICLE_FAILED)))
        }
    }
}

/// `POST /opengraph`
pub async fn extract_opengraph(
    State(state): State<AppState>, payload: Result<Json<OpenGraphRequest>, JsonRejection>,
) -> OpenGraphReply {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::error!(error = %rejection.body_text(), "Invalid request body");
            let message = format!("Invalid request body: {}", rejection.body_text());
            return (StatusCode::BAD_REQUEST, Json(OpenGraphResponse::failure("", message)));
        }
    };

    process_opengraph(&state, request.url).await
}

/// `GET /opengraph?url=...`
pub async fn extract_opengraph_simple(
    State(state): State<AppState>, Query(query): Query<OpenGraphQuery>,
) -> OpenGraphReply {
    process_opengraph(&state, query.url.unwrap_or_default()).await
}

async fn process_opengraph(state: &AppState, url: String) -> OpenGraphReply {
    if let Err(message) = validate_url(&url) {
        tracing::warn!(url = %url, reason = %message, "Rejected Open Graph request");
        return (StatusCode::BAD_REQUEST, Json(OpenGraphResponse::failure(url, message)));
    }

    tracing::info!(url = %url, "Processing Open Graph extraction request");

    match state.extractor.extract_metadata(&url).await {
        Ok(metadata) if !metadata.title.is_empty() => {
            tracing::info!(url = %url, title = %metadata.title, "Successfully extracted Open Graph data");
            (
                StatusCode::OK,
                Json(OpenGraphResponse { url, open_graph: Some(metadata), success: true, message: None }),
            )
        }
        Ok(_) => {
            tracing::warn!(url = %url, "Page has no title in any metadata family");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(OpenGraphResponse::failure(url, OPEN_GRAPH_FAILED)))
        }
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "Failed to extract Open Graph data");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(OpenGraphResponse::failure(url, OPEN_GRAPH_FAILED)))
        }
    }
}
