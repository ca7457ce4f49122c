//! Mode dispatch boundary: policy gating, result shapes, and the LLM
//! handoff text.

use mockito::Server;
use pagesift::{
    ExtractionMode, ExtractionResult, Table, TagRecord, run_extraction,
};

#[tokio::test]
async fn robots_denial_short_circuits_extraction() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/robots.txt")
        .with_status(200)
        .with_body("User-agent: *\nDisallow: /\n")
        .create_async()
        .await;

    let response = run_extraction(&format!("{}/page", server.url()), ExtractionMode::Clean).await;
    assert!(response.result.is_empty());
    assert_eq!(
        response.error.as_deref(),
        Some("This page is disallowed for scraping by the site's robots.txt rules.")
    );
}

#[test]
fn flattened_text_joins_lines() {
    let result = ExtractionResult::Tags {
        lines: vec!["<p>: a".to_string(), "<p>: b".to_string()],
    };
    assert_eq!(result.flattened_text(), "<p>: a\n<p>: b");
}

#[test]
fn flattened_text_tabulates_records() {
    let result = ExtractionResult::TagsStructured {
        records: vec![TagRecord {
            tag: "a".to_string(),
            text: "Link".to_string(),
            src_or_href: "/x".to_string(),
            alt: String::new(),
        }],
    };
    assert_eq!(result.flattened_text(), "a\tLink\t/x\t");
}

#[test]
fn flattened_text_interleaves_fragments_and_table_rows() {
    let result = ExtractionResult::Full {
        tables: vec![Table {
            headers: vec!["K".to_string()],
            rows: vec![vec!["V".to_string()]],
        }],
        text: vec!["Heading".to_string()],
    };
    assert_eq!(result.flattened_text(), "Heading\nK\nV");
}

#[test]
fn clean_text_passes_through_untouched() {
    let blob = "  raw text, exactly as extracted  ".to_string();
    let result = ExtractionResult::Clean { text: blob.clone() };
    assert_eq!(result.flattened_text(), blob);
}

#[test]
fn emptiness_reflects_each_shape() {
    assert!(ExtractionResult::Tags { lines: vec![] }.is_empty());
    assert!(
        ExtractionResult::Clean {
            text: "  ".to_string()
        }
        .is_empty()
    );
    assert!(
        !ExtractionResult::Tags {
            lines: vec!["<p>: x".to_string()]
        }
        .is_empty()
    );
}

#[test]
fn result_shapes_serialize_with_a_shape_tag() {
    let result = ExtractionResult::Tags {
        lines: vec!["<p>: x".to_string()],
    };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains(r#""shape":"tags""#), "got: {json}");

    let structured = ExtractionResult::TagsStructured { records: vec![] };
    let json = serde_json::to_string(&structured).unwrap();
    assert!(json.contains(r#""shape":"tags_structured""#), "got: {json}");
}
