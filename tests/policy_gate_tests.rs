//! Robots policy gate: allow/deny decisions and fail-open behavior.

use mockito::Server;
use pagesift::is_allowed;

#[tokio::test]
async fn disallowed_prefix_blocks_matching_urls_only() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/robots.txt")
        .with_status(200)
        .with_body("User-agent: *\nDisallow: /private/\n")
        .create_async()
        .await;

    let base = server.url();
    assert!(!is_allowed(&format!("{base}/private/page"), "*").await);
    assert!(is_allowed(&format!("{base}/public/page"), "*").await);
}

#[tokio::test]
async fn missing_robots_txt_fails_open() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/robots.txt")
        .with_status(404)
        .create_async()
        .await;

    assert!(is_allowed(&format!("{}/anything", server.url()), "*").await);
}

#[tokio::test]
async fn unreachable_host_fails_open() {
    // Nothing listens on port 1.
    assert!(is_allowed("http://127.0.0.1:1/page", "*").await);
}

#[tokio::test]
async fn unparseable_url_fails_open() {
    assert!(is_allowed("not a url", "*").await);
}

#[tokio::test]
async fn agent_specific_groups_only_bind_that_agent() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/robots.txt")
        .with_status(200)
        .with_body("User-agent: grabber\nDisallow: /\n")
        .create_async()
        .await;

    let url = format!("{}/page", server.url());
    assert!(!is_allowed(&url, "grabber").await);
    assert!(is_allowed(&url, "someone-else").await);
}
