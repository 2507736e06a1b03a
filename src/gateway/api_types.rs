//! Wire types for the generative provider.
//!
//! The provider contract is deliberately opaque to the rest of the crate;
//! these structs exist only so the gateway can speak JSON over reqwest.

use serde::{Deserialize, Serialize};

/// A text-generation request (copy, analysis, chat).
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: Vec<ContentPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    /// A plain one-prompt request with no sampling overrides.
    pub fn text(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            contents: vec![ContentPart::text(prompt)],
            system_instruction: None,
            temperature: None,
            max_output_tokens: None,
        }
    }
}

/// One piece of request content: text or inline image data.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContentPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl ContentPart {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    pub fn image(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

/// Base64 payload with its MIME type.
#[derive(Debug, Serialize, Deserialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

/// The provider's reply to a generation request.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

impl GenerateResponse {
    /// The reply text, if the provider produced any.
    pub fn into_text(self) -> Option<String> {
        self.text.filter(|t| !t.is_empty())
    }

    /// The first inline image in the reply, as raw base64.
    pub fn first_image(&self) -> Option<&str> {
        self.parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
    }
}

/// Submission of an async video-generation job.
#[derive(Debug, Serialize)]
pub struct VideoSubmitRequest {
    pub model: String,
    pub prompt: String,
    pub aspect_ratio: String,
    pub resolution: String,
}

/// Handle for a submitted video job.
#[derive(Debug, Deserialize)]
pub struct VideoSubmitResponse {
    pub operation_id: String,
}

/// One poll of a video job.
#[derive(Debug, Deserialize)]
pub struct VideoStatusResponse {
    pub done: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub video_uri: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_skips_absent_optionals() {
        let request = GenerateRequest::text("text-fast", "hola");
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("system_instruction"));
        assert!(!json.contains("temperature"));
        assert!(!json.contains("inline_data"));
    }

    #[test]
    fn test_response_text_extraction() {
        let empty: GenerateResponse = serde_json::from_str(r#"{"text":""}"#).unwrap();
        assert_eq!(empty.into_text(), None);

        let reply: GenerateResponse = serde_json::from_str(r#"{"text":"¡Hola!"}"#).unwrap();
        assert_eq!(reply.into_text().as_deref(), Some("¡Hola!"));
    }

    #[test]
    fn test_response_image_extraction() {
        let json = r#"{"parts":[{"text":"listo"},{"inline_data":{"mime_type":"image/png","data":"QUJD"}}]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_image(), Some("QUJD"));
    }
}
