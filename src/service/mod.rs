//! The narrow contract through which the core consumes the generative
//! model/image service. The service is injected as a trait object so every
//! pipeline operation can be exercised against a scripted fake.

pub(crate) mod parse;
#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

use crate::config::ImageSettings;

/// Failures surfaced by a service implementation. Nothing is retried
/// inside the core; both classes propagate to the operation's caller.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Network or service-side failure, including provider timeouts.
    #[error("generative service transport failure: {0}")]
    Transport(String),
    /// Credential rejection. Callers should prompt for re-authentication
    /// before starting another chain.
    #[error("generative service rejected credentials: {0}")]
    Unauthorized(String),
}

impl ServiceError {
    /// Buckets a raw provider error message into the taxonomy. Providers
    /// signal stale or missing API keys with "entity not found"-style
    /// responses rather than a dedicated status.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_ascii_lowercase();
        if lowered.contains("entity was not found")
            || lowered.contains("api key")
            || lowered.contains("unauthorized")
        {
            ServiceError::Unauthorized(message)
        } else {
            ServiceError::Transport(message)
        }
    }
}

/// One piece of a prompt: text, or inline binary data such as a blueprint
/// scan or a previously rendered image.
#[derive(Debug, Clone)]
pub enum PromptPart {
    Text(String),
    InlineData { media_type: String, bytes: Vec<u8> },
}

impl PromptPart {
    pub fn text(content: impl Into<String>) -> Self {
        PromptPart::Text(content.into())
    }

    pub fn inline(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        PromptPart::InlineData {
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// A structured-output request: the service must answer with text that
/// parses under `response_schema`.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    pub model: String,
    pub system_framing: String,
    pub parts: Vec<PromptPart>,
    pub response_schema: serde_json::Value,
}

/// An image-generation request. `parts` may carry a prior image as a
/// reference input for image-to-image correction.
#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub model: String,
    pub system_framing: String,
    pub parts: Vec<PromptPart>,
    pub image: ImageSettings,
}

/// Payload of an image-generation response: image bytes and/or free text.
#[derive(Debug, Clone, Default)]
pub struct GeneratedContent {
    pub image: Option<Vec<u8>>,
    pub text: Option<String>,
}

/// The opaque generative capability. Implementations wrap a concrete
/// provider; the core only ever sees these two operations.
pub trait GenerativeService {
    /// Returns the raw response text for a schema-constrained request.
    /// Cleaning and parsing are the caller's responsibility.
    fn generate_structured(&self, request: StructuredRequest) -> Result<String, ServiceError>;

    /// Returns generated image bytes and/or accompanying text.
    fn generate_image(&self, request: ImageRequest) -> Result<GeneratedContent, ServiceError>;
}
