//! Image generation types

use super::chat::{AllModel, Model, ModelKind};
use serde::{Deserialize, Serialize};

/// Default image generation model
pub const DEFAULT_IMAGE_MODEL: &str = "google/nano-banana";

/// Default image size
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

/// Optional parameters for image generation
#[derive(Debug, Clone, Default)]
pub struct ImageGenerateOptions {
    pub model: Option<String>,
    pub size: Option<String>,
    pub n: Option<u32>,
    pub quality: Option<String>,
}

/// Request body of `POST /v1/images/generations`
#[derive(Debug, Clone, Serialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: String,
    pub size: String,
    pub n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
}

impl ImageGenerationRequest {
    /// Build a request, filling unset options with the defaults
    pub fn new(prompt: impl Into<String>, options: Option<&ImageGenerateOptions>) -> Self {
        let mut request = Self {
            prompt: prompt.into(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            n: 1,
            quality: None,
        };

        if let Some(options) = options {
            if let Some(model) = options.model.as_deref().filter(|m| !m.is_empty()) {
                request.model = model.to_string();
            }
            if let Some(size) = options.size.as_deref().filter(|s| !s.is_empty()) {
                request.size = size.to_string();
            }
            if let Some(n) = options.n.filter(|n| *n > 0) {
                request.n = n;
            }
            request.quality = options.quality.clone().filter(|q| !q.is_empty());
        }

        request
    }
}

/// A single generated image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageData {
    #[serde(default)]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
}

/// API response for image generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub data: Vec<ImageData>,
}

/// An available image model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageModel {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "pricePerImage", default)]
    pub price_per_image: f64,
    #[serde(rename = "supportedSizes", default, skip_serializing_if = "Vec::is_empty")]
    pub supported_sizes: Vec<String>,
    #[serde(rename = "maxPromptLength", skip_serializing_if = "Option::is_none")]
    pub max_prompt_length: Option<u32>,
    #[serde(default)]
    pub available: bool,
}

impl From<Model> for AllModel {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            provider: model.provider,
            kind: ModelKind::Llm,
            input_price: Some(model.input_price),
            output_price: Some(model.output_price),
            context_limit: Some(model.context_limit),
            price_per_image: None,
            supported_sizes: None,
        }
    }
}

impl From<ImageModel> for AllModel {
    fn from(model: ImageModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            provider: model.provider,
            kind: ModelKind::Image,
            input_price: None,
            output_price: None,
            context_limit: None,
            price_per_image: Some(model.price_per_image),
            supported_sizes: Some(model.supported_sizes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_defaults() {
        let request = ImageGenerationRequest::new("a cat", None);
        assert_eq!(request.model, DEFAULT_IMAGE_MODEL);
        assert_eq!(request.size, DEFAULT_IMAGE_SIZE);
        assert_eq!(request.n, 1);

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("quality").is_none());
    }

    #[test]
    fn test_image_request_overrides() {
        let options = ImageGenerateOptions {
            model: Some("openai/dall-e-3".to_string()),
            size: Some(String::new()),
            n: Some(2),
            quality: Some("hd".to_string()),
        };
        let request = ImageGenerationRequest::new("a dog", Some(&options));
        assert_eq!(request.model, "openai/dall-e-3");
        assert_eq!(request.size, DEFAULT_IMAGE_SIZE);
        assert_eq!(request.n, 2);
        assert_eq!(request.quality.as_deref(), Some("hd"));
    }
}
