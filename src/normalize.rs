//! Backend result normalization
//!
//! Pure functions turning each backend's result shape into the uniform
//! ordered sequence of [`ContentBlock`]s. Total by construction: missing or
//! empty fields degrade to placeholder strings or a fixed "no results"
//! message, never to an error.

use crate::types::{ContentBlock, ImageSearchResponse, TextSearchResponse};

const NO_TEXT_RESULTS: &str =
    "No results were found for your query. Please try a different search term.";
const NO_IMAGE_RESULTS: &str =
    "No image results were found for your query. Please try a different search term.";

const MISSING_TITLE: &str = "Title not found";
const MISSING_URL: &str = "URL not found";
const MISSING_SNIPPET: &str = "Summary not found";

/// Build the content sequence for a web-search response.
///
/// One text block: an "AI Answer" section when the backend produced an
/// answer, then a "Search Results" section listing each hit in backend
/// order with 1-based indices.
pub fn text_results(response: &TextSearchResponse) -> Vec<ContentBlock> {
    let answer = response
        .answer
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty());

    if answer.is_none() && response.results.is_empty() {
        return vec![ContentBlock::text(NO_TEXT_RESULTS)];
    }

    let mut lines: Vec<String> = Vec::new();

    if let Some(answer) = answer {
        lines.push("AI Answer:".to_string());
        lines.push(answer.to_string());
        lines.push(String::new());
    }

    if !response.results.is_empty() {
        lines.push("Search Results:".to_string());
        for (i, hit) in response.results.iter().enumerate() {
            lines.push(format!(
                "\n{}. {}",
                i + 1,
                hit.title.as_deref().unwrap_or(MISSING_TITLE)
            ));
            lines.push(format!("URL: {}", hit.url.as_deref().unwrap_or(MISSING_URL)));
            lines.push(format!(
                "Summary: {}",
                hit.snippet.as_deref().unwrap_or(MISSING_SNIPPET)
            ));
        }
    }

    vec![ContentBlock::text(lines.join("\n"))]
}

/// Build the content sequence for an image-search response.
///
/// One summary text block covering every record, followed by one image
/// block per record with a non-empty `img_src`, in backend order. Records
/// without an image URL still appear in the summary.
pub fn image_results(response: &ImageSearchResponse) -> Vec<ContentBlock> {
    if response.results.is_empty() {
        return vec![ContentBlock::text(NO_IMAGE_RESULTS)];
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(
        "Found {} image results for '{}':",
        response.results.len(),
        response.query
    ));

    for (i, hit) in response.results.iter().enumerate() {
        let title = if hit.title.is_empty() {
            MISSING_TITLE
        } else {
            hit.title.as_str()
        };
        lines.push(format!("\n{}. {}", i + 1, title));
        if !hit.source.is_empty() {
            lines.push(format!("Source: {}", hit.source));
        }
        if !hit.url.is_empty() {
            lines.push(format!("Page: {}", hit.url));
        }
        if let (Some(width), Some(height)) = (hit.width, hit.height) {
            if width > 0 && height > 0 {
                lines.push(format!("Dimensions: {width}x{height}"));
            }
        }
    }

    let mut blocks = vec![ContentBlock::text(lines.join("\n"))];
    blocks.extend(
        response
            .results
            .iter()
            .filter(|hit| !hit.img_src.is_empty())
            .map(|hit| ContentBlock::image(hit.img_src.clone(), hit.title.clone())),
    );
    blocks
}
