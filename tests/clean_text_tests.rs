//! Clean-text extraction: readability pass, raw fallback, and the shared
//! cleanup rules.

use mockito::Server;
use pagesift::clean_article_text;
use pagesift::extractor::clean_text::{fallback_clean_text, paragraph_text, readability_text};

#[tokio::test]
async fn fallback_reports_http_status_as_error_string() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;

    let result = fallback_clean_text(&format!("{}/missing", server.url())).await;
    assert!(result.starts_with("Error:"), "got: {result}");
    assert!(result.contains("404"), "got: {result}");
}

#[tokio::test]
async fn fallback_joins_paragraphs_with_blank_lines() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/article")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body><p> First[1] </p><p>   </p><p>Second[edit]</p></body></html>")
        .create_async()
        .await;

    let result = fallback_clean_text(&format!("{}/article", server.url())).await;
    assert_eq!(result, "First\n\nSecond");
}

#[tokio::test]
async fn fallback_with_no_paragraphs_returns_sentinel() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/bare")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body><div>not a paragraph</div></body></html>")
        .create_async()
        .await;

    let result = fallback_clean_text(&format!("{}/bare", server.url())).await;
    assert_eq!(result, "No readable paragraph text found.");
}

#[tokio::test]
async fn fallback_network_failure_is_an_error_string() {
    // Nothing listens on port 1.
    let result = fallback_clean_text("http://127.0.0.1:1/page").await;
    assert!(result.starts_with("Error:"), "got: {result}");
}

#[test]
fn paragraph_text_drops_empty_paragraphs() {
    let html = "<html><body><p>a</p><p> </p><p>b</p></body></html>";
    assert_eq!(paragraph_text(html), "a\n\nb");
}

#[test]
fn readability_extracts_article_body_without_tables() {
    let paragraph = "The extraction pipeline renders the page in a headless browser before \
        any selection happens, because modern sites assemble most of their visible copy \
        with client-side scripts and the server-delivered markup alone is hollow. \
        Rendering first keeps every downstream strategy honest about what a reader sees.";
    let html = format!(
        "<html><head><title>Pipeline notes</title></head><body>\
         <article><h1>Pipeline notes</h1>\
         <p>{paragraph}</p><p>{paragraph}</p><p>{paragraph}</p><p>{paragraph}</p>\
         </article>\
         <table><tr><td>TABLE_MARKER</td></tr></table>\
         </body></html>"
    );

    let text = readability_text(&html, "https://example.com/article")
        .expect("readability should accept a well-formed article");
    assert!(text.contains("extraction pipeline renders the page"));
    assert!(!text.contains("TABLE_MARKER"));
}

#[test]
fn cleanup_removes_footnotes_edits_and_notice() {
    let raw = "This article has multiple issues. Please help\nimprove it or discuss on the talk page. Rust[1] is nice[edit]";
    let cleaned = clean_article_text(raw);
    assert_eq!(cleaned, "Rust is nice");
    assert!(!cleaned.contains("[1]"));
    assert!(!cleaned.contains("[edit]"));
}
