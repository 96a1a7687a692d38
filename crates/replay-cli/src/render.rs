//! Payload rendering helpers shared by both frontends.

/// Text of a table cell looked up by column name.
pub(crate) fn cell_text(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => "-".to_string(),
    }
}

/// Split `**bold**`-marked text into `(segment, is_bold)` runs.
///
/// Markers never nest in the feed; an unbalanced trailing marker just
/// bolds the tail, which matches how the original renderer behaved.
pub(crate) fn bold_segments(text: &str) -> Vec<(String, bool)> {
    text.split("**")
        .enumerate()
        .filter(|(_, part)| !part.is_empty())
        .map(|(i, part)| (part.to_string(), i % 2 == 1))
        .collect()
}

/// Drop the `**bold**` markers entirely (plain-text output).
pub(crate) fn strip_bold(text: &str) -> String {
    text.replace("**", "")
}
