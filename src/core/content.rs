use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platforms content can be targeted at. The wire label doubles as the
/// prompt text and the history JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    LinkedIn,
    YouTube,
    Twitter,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::YouTube,
        Platform::Twitter,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
            Platform::YouTube => "YouTube",
            Platform::Twitter => "Twitter",
        }
    }

    pub fn parse(value: &str) -> Option<Platform> {
        match value.trim().to_ascii_lowercase().as_str() {
            "instagram" | "ig" => Some(Platform::Instagram),
            "linkedin" => Some(Platform::LinkedIn),
            "youtube" | "yt" => Some(Platform::YouTube),
            "twitter" | "x" => Some(Platform::Twitter),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The four kinds of output the generator knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    Caption,
    Hashtags,
    #[serde(rename = "Content Ideas")]
    ContentIdeas,
    #[serde(rename = "30-Day Content Plan")]
    ContentPlan,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Caption,
        ContentType::Hashtags,
        ContentType::ContentIdeas,
        ContentType::ContentPlan,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Caption => "Caption",
            ContentType::Hashtags => "Hashtags",
            ContentType::ContentIdeas => "Content Ideas",
            ContentType::ContentPlan => "30-Day Content Plan",
        }
    }

    pub fn parse(value: &str) -> Option<ContentType> {
        match value.trim().to_ascii_lowercase().as_str() {
            "caption" | "captions" => Some(ContentType::Caption),
            "hashtags" | "tags" => Some(ContentType::Hashtags),
            "content ideas" | "ideas" => Some(ContentType::ContentIdeas),
            "30-day content plan" | "plan" | "30-day" => Some(ContentType::ContentPlan),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Voice the generated copy should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Professional,
    Funny,
    Bold,
    Friendly,
    Inspirational,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Professional,
        Tone::Funny,
        Tone::Bold,
        Tone::Friendly,
        Tone::Inspirational,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Funny => "Funny",
            Tone::Bold => "Bold",
            Tone::Friendly => "Friendly",
            Tone::Inspirational => "Inspirational",
        }
    }

    pub fn parse(value: &str) -> Option<Tone> {
        match value.trim().to_ascii_lowercase().as_str() {
            "professional" => Some(Tone::Professional),
            "funny" => Some(Tone::Funny),
            "bold" => Some(Tone::Bold),
            "friendly" => Some(Tone::Friendly),
            "inspirational" => Some(Tone::Inspirational),
            _ => None,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const MIN_VARIATIONS: u32 = 1;
pub const MAX_VARIATIONS: u32 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("topic must not be empty")]
    EmptyTopic,
    #[error("variation count must be between 1 and 5, got {0}")]
    VariationCount(u32),
    #[error("temperature must be between 0.0 and 1.0, got {0}")]
    Temperature(f32),
}

/// A validated generation job. Construction is the only validation
/// point; everything downstream can trust the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub platform: Platform,
    pub content_type: ContentType,
    pub tone: Tone,
    pub topic: String,
    pub variation_count: u32,
    pub model: String,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(
        platform: Platform,
        content_type: ContentType,
        tone: Tone,
        topic: &str,
        variation_count: u32,
        model: &str,
        temperature: f32,
    ) -> Result<Self, RequestError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(RequestError::EmptyTopic);
        }
        if !(MIN_VARIATIONS..=MAX_VARIATIONS).contains(&variation_count) {
            return Err(RequestError::VariationCount(variation_count));
        }
        if !(0.0..=1.0).contains(&temperature) {
            return Err(RequestError::Temperature(temperature));
        }
        Ok(Self {
            platform,
            content_type,
            tone,
            topic: topic.to_string(),
            variation_count,
            model: model.to_string(),
            temperature,
        })
    }
}

/// One generated text, numbered from 1 within its batch. The on-disk
/// field name is `variation` to match existing history files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(rename = "variation")]
    pub index: u32,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_topic(topic: &str) -> Result<GenerationRequest, RequestError> {
        GenerationRequest::new(
            Platform::Instagram,
            ContentType::Caption,
            Tone::Professional,
            topic,
            1,
            "gpt-4o-mini",
            0.7,
        )
    }

    #[test]
    fn topic_is_trimmed() {
        let request = request_with_topic("  fitness  ").unwrap();
        assert_eq!(request.topic, "fitness");
    }

    #[test]
    fn blank_topic_is_rejected() {
        assert_eq!(request_with_topic("").unwrap_err(), RequestError::EmptyTopic);
        assert_eq!(
            request_with_topic("   ").unwrap_err(),
            RequestError::EmptyTopic
        );
    }

    #[test]
    fn variation_count_is_bounded() {
        let err = GenerationRequest::new(
            Platform::Instagram,
            ContentType::Caption,
            Tone::Professional,
            "AI",
            0,
            "gpt-4o-mini",
            0.7,
        )
        .unwrap_err();
        assert_eq!(err, RequestError::VariationCount(0));

        let err = GenerationRequest::new(
            Platform::Instagram,
            ContentType::Caption,
            Tone::Professional,
            "AI",
            6,
            "gpt-4o-mini",
            0.7,
        )
        .unwrap_err();
        assert_eq!(err, RequestError::VariationCount(6));
    }

    #[test]
    fn temperature_is_bounded() {
        let err = GenerationRequest::new(
            Platform::Instagram,
            ContentType::Caption,
            Tone::Professional,
            "AI",
            1,
            "gpt-4o-mini",
            1.5,
        )
        .unwrap_err();
        assert_eq!(err, RequestError::Temperature(1.5));
    }

    #[test]
    fn parse_accepts_labels_and_aliases() {
        assert_eq!(Platform::parse("LinkedIn"), Some(Platform::LinkedIn));
        assert_eq!(Platform::parse("yt"), Some(Platform::YouTube));
        assert_eq!(Platform::parse("x"), Some(Platform::Twitter));
        assert_eq!(Platform::parse("myspace"), None);

        assert_eq!(ContentType::parse("ideas"), Some(ContentType::ContentIdeas));
        assert_eq!(
            ContentType::parse("30-Day Content Plan"),
            Some(ContentType::ContentPlan)
        );
        assert_eq!(Tone::parse("BOLD"), Some(Tone::Bold));
    }

    #[test]
    fn content_type_serializes_with_display_labels() {
        let json = serde_json::to_string(&ContentType::ContentIdeas).unwrap();
        assert_eq!(json, "\"Content Ideas\"");
        let json = serde_json::to_string(&ContentType::ContentPlan).unwrap();
        assert_eq!(json, "\"30-Day Content Plan\"");
        let back: ContentType = serde_json::from_str("\"30-Day Content Plan\"").unwrap();
        assert_eq!(back, ContentType::ContentPlan);
    }

    #[test]
    fn variation_serializes_with_wire_field_name() {
        let variation = Variation {
            index: 2,
            text: "hello".to_string(),
        };
        let json = serde_json::to_value(&variation).unwrap();
        assert_eq!(json["variation"], 2);
        assert_eq!(json["text"], "hello");
    }
}
