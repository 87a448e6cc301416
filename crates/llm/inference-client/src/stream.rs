//! Parser for the endpoint's response body: newline-separated fragments, each ideally a JSON
//! object whose optional `content` field carries the next piece of the answer.

use serde_json::Value;
use tracing::{debug, warn};

use crate::completion::{Completion, FailureKind};
use crate::lenient::parse_lenient;

/// Maps an HTTP status and body to a [`Completion`].
///
/// A non-2xx status yields the connectivity apology without looking at the body. Otherwise the
/// fragments are concatenated; an empty or whitespace-only result becomes [`FailureKind::Empty`].
pub fn parse_stream(status: u16, body: &str) -> Completion {
    if !(200..300).contains(&status) {
        warn!(status = status, "Inference endpoint returned non-success status");
        return Completion::Fallback(FailureKind::Status(status));
    }

    let text = collect_fragments(body);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        warn!(body_len = body.len(), "Inference response carried no content");
        Completion::Fallback(FailureKind::Empty)
    } else {
        Completion::Answer(trimmed.to_string())
    }
}

/// Concatenates the `content` strings of every parseable fragment, in order.
/// Blank lines, unparseable lines, non-objects and objects without a string `content` add nothing.
pub fn collect_fragments(body: &str) -> String {
    let mut text = String::new();
    let mut skipped = 0usize;

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<Value>(line)
            .ok()
            .or_else(|| parse_lenient(line));
        match parsed {
            Some(Value::Object(map)) => {
                if let Some(Value::String(content)) = map.get("content") {
                    text.push_str(content);
                }
            }
            Some(_) => {}
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped = skipped, "Skipped unparseable response fragments");
    }
    text
}
