use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;

/// Binary payload uploaded alongside a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Bytes,
}

impl Attachment {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub attachment: Option<Attachment>,
    pub max_output_tokens: Option<u32>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachment: None,
            max_output_tokens: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Content segments in send order: the prompt, then the inline attachment.
    pub fn parts(&self) -> Vec<ContentPart> {
        let mut parts = vec![ContentPart::Text(self.prompt.clone())];

        if let Some(ref attachment) = self.attachment {
            parts.push(ContentPart::InlineData {
                mime_type: attachment.mime_type.clone(),
                data: attachment.to_base64(),
            });
        }

        parts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentPart {
    Text(String),
    /// `data` is base64 (standard alphabet, padded).
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub output_text: String,
}
