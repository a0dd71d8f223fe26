//! Markdown fence extraction for model responses.

/// Extracts the first fenced code block from a model response.
///
/// The opening fence may carry a language tag (```` ```html ````). If the
/// response contains no complete fence, the whole text is used as-is; the
/// artifact is never validated beyond this.
pub fn extract_fenced_block(response: &str) -> String {
    if let Some(open) = response.find("```") {
        // Skip the language tag: body starts after the first newline.
        if let Some(nl) = response[open + 3..].find('\n') {
            let body_start = open + 3 + nl + 1;
            if let Some(close) = response[body_start..].find("```") {
                return response[body_start..body_start + close]
                    .trim_end_matches('\n')
                    .to_string();
            }
        }
    }
    response.to_string()
}
