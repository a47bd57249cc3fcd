//! End-to-end pipeline tests against a local fixture server.
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::get;
use page_zen_core::*;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

async fn spawn_fixture_server() -> SocketAddr {
    let app = Router::new()
        .route("/news/night-trains", get(|| async { Html(fixture("article.html")) }))
        .route("/sitemap", get(|| async { Html(fixture("nav_only.html")) }))
        .route("/kettle", get(|| async { Html(fixture("social_only.html")) }))
        .route("/old/night-trains", get(|| async { Redirect::permanent("/news/night-trains") }))
        .route(
            "/gone",
            get(|| async { (StatusCode::NOT_FOUND, Html(fixture("article.html"))) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Html(fixture("article.html"))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn extractor() -> Extractor {
    Extractor::with_config(ExtractorConfig::builder().debug_html_path(None).timeout(5).build()).unwrap()
}

#[tokio::test]
async fn test_extract_article_end_to_end() {
    let addr = spawn_fixture_server().await;
    let url = format!("http://{}/news/night-trains", addr);

    let article = extractor().extract_article(&url).await.unwrap();

    assert!(article.title.contains("Night Trains"));
    assert!(article.content.contains("Sleeper trains are running again"));
    assert!(article.content.contains("Rolling stock remains the main constraint"));
    assert!(!article.content.contains("Follow us on"));
    assert!(!article.content.contains("Cheap flights"));
    assert!(!article.content.contains("Most read"));
    assert!(!article.content.contains("All rights reserved"));
    assert_eq!(article.url, url);
    assert_eq!(article.published_at.as_deref(), Some("2024-05-14T06:30:00Z"));
}

#[tokio::test]
async fn test_length_and_excerpt_invariants() {
    let addr = spawn_fixture_server().await;
    let article = extractor()
        .extract_article(&format!("http://{}/news/night-trains", addr))
        .await
        .unwrap();

    assert_eq!(article.length, article.content.chars().count());
    assert!(article.excerpt.ends_with("..."));
    assert!(article.excerpt.chars().count() <= DEFAULT_EXCERPT_LENGTH + 3);
    assert!(article.content.starts_with(article.excerpt.trim_end_matches("...")));
}

#[tokio::test]
async fn test_embedded_open_graph() {
    let addr = spawn_fixture_server().await;
    let url = format!("http://{}/news/night-trains", addr);
    let article = extractor().extract_article(&url).await.unwrap();

    let og = article.open_graph.unwrap();
    assert_eq!(og.title, "Night Trains Return to the Alps");
    assert_eq!(og.description, "Sleeper services are back on three cross-border routes.");
    assert_eq!(og.image, format!("http://{}/media/sleeper-cover.jpg", addr));
    assert_eq!(og.twitter_image, "https://cdn.railweekly.test/sleeper-card.jpg");
    assert_eq!(og.url, url);
    assert_eq!(og.content_type, "article");
    assert_eq!(og.section, "Travel");
    assert_eq!(og.tags, vec!["rail", "europe"]);
    assert_eq!(og.author, "Marta Keller");
}

#[tokio::test]
async fn test_images_rewritten_to_absolute() {
    let addr = spawn_fixture_server().await;
    let article = extractor()
        .extract_article(&format!("http://{}/news/night-trains", addr))
        .await
        .unwrap();
    let markdown = article.markdown.unwrap();

    assert!(markdown.contains(&format!("http://{}/media/sleeper-1920.png", addr)));
    assert!(markdown.contains(&format!("http://{}/media/route-map.png", addr)));
    assert!(!markdown.contains("loading=\"lazy\""));
    assert!(!markdown.contains("<picture"));
}

#[tokio::test]
async fn test_extract_metadata_only() {
    let addr = spawn_fixture_server().await;
    let url = format!("http://{}/kettle", addr);

    let meta = extractor().extract_metadata(&url).await.unwrap();

    assert_eq!(meta.title, "Kettle 2.0");
    assert_eq!(meta.twitter_title, "Kettle 2.0");
    assert_eq!(meta.description, "A new kettle that boils faster.");
    assert_eq!(meta.image, format!("http://{}/img/kettle.png", addr));
    assert_eq!(meta.twitter_card, "summary");
    assert_eq!(meta.url, url);
}

#[tokio::test]
async fn test_metadata_only_succeeds_on_non_article_page() {
    let addr = spawn_fixture_server().await;
    let meta = extractor()
        .extract_metadata(&format!("http://{}/sitemap", addr))
        .await
        .unwrap();

    assert_eq!(meta.title, "Site Map");
}

#[tokio::test]
async fn test_non_article_page_fails() {
    let addr = spawn_fixture_server().await;
    let result = extractor()
        .extract_article(&format!("http://{}/sitemap", addr))
        .await;

    assert!(matches!(result, Err(PageZenError::NotReadable(_))));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let addr = spawn_fixture_server().await;
    let url = format!("http://{}/old/night-trains", addr);

    let article = extractor().extract_article(&url).await.unwrap();

    assert_eq!(article.url, url);
    assert!(article.content.contains("Sleeper trains"));
}

#[tokio::test]
async fn test_error_status_is_still_processed() {
    let addr = spawn_fixture_server().await;
    let article = extractor()
        .extract_article(&format!("http://{}/gone", addr))
        .await
        .unwrap();

    assert!(article.title.contains("Night Trains"));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let addr = spawn_fixture_server().await;
    let extractor = Extractor::with_config(ExtractorConfig::builder().debug_html_path(None).timeout(1).build()).unwrap();

    let result = extractor.extract_article(&format!("http://{}/slow", addr)).await;

    assert!(matches!(result, Err(PageZenError::Timeout { timeout: 1 })));
}

#[tokio::test]
async fn test_invalid_url_rejected_before_fetch() {
    let result = extractor().extract_article("not a url").await;
    assert!(matches!(result, Err(PageZenError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_debug_artifact_written() {
    let addr = spawn_fixture_server().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tmp").join("article.html");
    let extractor = Extractor::with_config(ExtractorConfig::builder().debug_html_path(Some(path.clone())).build()).unwrap();

    extractor
        .extract_article(&format!("http://{}/news/night-trains", addr))
        .await
        .unwrap();

    let mut written = None;
    for _ in 0..50 {
        if let Ok(html) = std::fs::read_to_string(&path)
            && !html.is_empty()
        {
            written = Some(html);
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    let html = written.expect("debug artifact should be written");
    assert!(!html.contains("<nav"));
    assert!(!html.contains("<script"));
    assert!(html.contains("sleeper-1920.png"));
}

#[tokio::test]
async fn test_debug_write_failure_does_not_fail_extraction() {
    let addr = spawn_fixture_server().await;
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let extractor =
        Extractor::with_config(ExtractorConfig::builder().debug_html_path(Some(blocker.join("article.html"))).build())
            .unwrap();

    let result = extractor
        .extract_article(&format!("http://{}/news/night-trains", addr))
        .await;

    assert!(result.is_ok());
}

#[test]
fn test_offline_clean_html() {
    let html = fixture("article.html");
    let article = clean_html(&html, "https://railweekly.test/news/night-trains").unwrap();

    assert!(article.content.contains("Station staff in Innsbruck"));
    let og = article.open_graph.unwrap();
    assert_eq!(og.image, "https://railweekly.test/media/sleeper-cover.jpg");
}
