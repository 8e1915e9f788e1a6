//! Chat completion and model listing types (OpenAI-compatible)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user", or "assistant"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Optional parameters for chat completion
#[derive(Debug, Clone, Default)]
pub struct ChatCompletionOptions {
    /// Maximum tokens to generate (defaults to 1024)
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    /// Enable xAI live search with default parameters
    pub search: bool,
    /// Full live search parameters, takes precedence over `search`
    pub search_parameters: Option<Value>,
}

impl ChatCompletionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_search(mut self, search: bool) -> Self {
        self.search = search;
        self
    }

    pub fn with_search_parameters(mut self, parameters: Value) -> Self {
        self.search_parameters = Some(parameters);
        self
    }
}

/// Request body of `POST /v1/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_parameters: Option<Value>,
}

/// API response for chat completions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Usage,
}

/// A single completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// An available LLM with pricing per 1M tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "inputPrice", default)]
    pub input_price: f64,
    #[serde(rename = "outputPrice", default)]
    pub output_price: f64,
    #[serde(rename = "contextLimit", default)]
    pub context_limit: u64,
}

/// Kind of entry in the unified model list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Llm,
    Image,
}

/// Unified entry covering both LLM and image models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllModel {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub kind: ModelKind,
    #[serde(rename = "inputPrice", skip_serializing_if = "Option::is_none")]
    pub input_price: Option<f64>,
    #[serde(rename = "outputPrice", skip_serializing_if = "Option::is_none")]
    pub output_price: Option<f64>,
    #[serde(rename = "contextLimit", skip_serializing_if = "Option::is_none")]
    pub context_limit: Option<u64>,
    #[serde(rename = "pricePerImage", skip_serializing_if = "Option::is_none")]
    pub price_per_image: Option<f64>,
    #[serde(rename = "supportedSizes", skip_serializing_if = "Option::is_none")]
    pub supported_sizes: Option<Vec<String>>,
}

/// Envelope of the model listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ModelList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}
