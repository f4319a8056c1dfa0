//! Cleanup applied to structured-output response text before parsing.

/// Strips Markdown code fences and slices to the outermost `{...}` span.
/// Models under a JSON schema still occasionally wrap the object in fences
/// or lead with prose; both are discarded here. The result is not
/// guaranteed to parse; callers decide how a parse failure is handled.
pub(crate) fn clean_json_response(raw: &str) -> &str {
    let mut cleaned = raw.trim();
    if let Some(body) = cleaned.strip_prefix("```") {
        let body = body.strip_prefix("json").unwrap_or(body);
        cleaned = body.strip_suffix("```").unwrap_or(body).trim();
    }
    if let (Some(first), Some(last)) = (cleaned.find('{'), cleaned.rfind('}')) {
        if first < last {
            cleaned = &cleaned[first..=last];
        }
    }
    cleaned
}
