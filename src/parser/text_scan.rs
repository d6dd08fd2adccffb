//! Heuristic endpoint extraction from free-form documentation pages.
//!
//! Best-effort by nature: the scan runs over visible page text and picks up
//! anything shaped like `GET /path`. Kept separate from the structured-spec
//! path so the pattern set can be tested and evolved on its own.

use std::collections::HashSet;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::{Html, Node, Selector};
use tracing::debug;

use crate::models::ApiEndpoint;

/// Bump when the scan patterns change.
pub const PATTERN_VERSION: u32 = 1;

/// `METHOD /path` where the path is a plain URL segment sequence.
const ENDPOINT_PATTERN: &str = r"(GET|POST|PUT|DELETE|PATCH)\s+(/[A-Za-z0-9/_-]+)";

/// Description attached to every heuristically extracted endpoint.
pub const SCAN_DESCRIPTION: &str = "Extracted via deterministic regex";

/// Scan text for endpoint mentions, left to right.
///
/// The first occurrence of a (method, path) pair wins; later duplicates are
/// dropped.
pub fn scan_endpoints(text: &str) -> Vec<ApiEndpoint> {
    let pattern = Regex::new(ENDPOINT_PATTERN).unwrap();
    let mut seen = HashSet::new();
    let mut endpoints = Vec::new();

    for captures in pattern.captures_iter(text) {
        let method = captures[1].to_string();
        let path = captures[2].to_string();

        if seen.insert((method.clone(), path.clone())) {
            endpoints.push(ApiEndpoint {
                method,
                path,
                parameters: vec![],
                description: SCAN_DESCRIPTION.to_string(),
            });
        }
    }

    debug!(
        pattern_version = PATTERN_VERSION,
        matches = endpoints.len(),
        "text scan complete"
    );
    endpoints
}

/// Strip markup from an HTML document, keeping only text a reader would see.
///
/// Script and style subtrees are skipped entirely. Non-HTML input ends up in
/// the synthesized body and comes back roughly as-is.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    if let Ok(selector) = Selector::parse("body") {
        if let Some(body) = document.select(&selector).next() {
            collect_text(*body, &mut text);
        }
    }

    text
}

fn collect_text(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) if matches!(element.name(), "script" | "style") => return,
        _ => {}
    }

    for child in node.children() {
        collect_text(child, out);
    }
}
