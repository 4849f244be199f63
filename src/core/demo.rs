use super::content::{ContentType, Platform, Tone};

/// Fixed hashtag set, returned regardless of topic, tone, or platform.
/// Known limitation kept so old and new history entries read the same.
pub const HASHTAG_SET: &str = "#AI #Tech #Innovation #Demo";

/// Deterministic offline generator used whenever the remote path is
/// unavailable or comes back empty. Never returns an empty string.
/// Platform is part of the call contract but no template varies on it
/// yet.
pub fn generate(
    _platform: Platform,
    content_type: ContentType,
    tone: Tone,
    topic: &str,
    variation_index: u32,
) -> String {
    match content_type {
        ContentType::Caption => format!(
            "{topic} — {tone} style. Hook #{hook} 🚀 CTA: Learn more! #demo",
            hook = variation_index + 1
        ),
        ContentType::Hashtags => HASHTAG_SET.to_string(),
        ContentType::ContentIdeas => format!(
            "1) What is {topic}?\n2) 5 Benefits of {topic}\n3) How to start with {topic}"
        ),
        ContentType::ContentPlan => (1..=30)
            .map(|day| format!("Day {day}: Post about {topic} (Theme: {tone})"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
