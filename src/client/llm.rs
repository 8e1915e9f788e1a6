//! Chat completion client

use super::orchestrator::PaymentOrchestrator;
use super::transport::{HttpTransport, Transport};
use crate::config::{ClientConfig, DEFAULT_MAX_TOKENS};
use crate::payment::Spending;
use crate::types::chat::ModelList;
use crate::types::{
    AllModel, ChatCompletionOptions, ChatCompletionRequest, ChatMessage, ChatResponse, ImageModel,
    Model,
};
use crate::validation::{validate_max_tokens, validate_model, validate_temperature, validate_top_p};
use crate::wallet::Wallet;
use crate::{BlockrunError, Result};
use serde_json::json;
use std::sync::Arc;

/// Environment variable read when no key is passed to [`LlmClient::new`]
pub const LLM_KEY_ENV: &str = "BASE_CHAIN_WALLET_KEY";

/// Pay-per-request client for the chat completion API
#[derive(Debug)]
pub struct LlmClient {
    orchestrator: PaymentOrchestrator,
}

impl LlmClient {
    /// Create a client with the default configuration
    ///
    /// An empty `private_key` falls back to `BASE_CHAIN_WALLET_KEY`. The key is
    /// only used for local signing.
    pub fn new(private_key: &str) -> Result<Self> {
        Self::with_config(private_key, ClientConfig::new())
    }

    /// Create a client with an explicit configuration
    pub fn with_config(private_key: &str, config: ClientConfig) -> Result<Self> {
        let config = config.with_env_overrides();
        config.validate()?;
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(private_key, config, Arc::new(transport))
    }

    /// Create a client over a custom transport
    pub fn with_transport(
        private_key: &str,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let key = resolve_key(private_key, &[LLM_KEY_ENV])?;
        let wallet = Wallet::from_private_key(&key)?;
        Ok(Self {
            orchestrator: PaymentOrchestrator::new(transport, wallet, config),
        })
    }

    /// Send one prompt and return the reply text
    pub async fn chat(&mut self, model: &str, prompt: &str) -> Result<String> {
        self.chat_with_system(model, prompt, None).await
    }

    /// Send one prompt with an optional system prompt
    pub async fn chat_with_system(
        &mut self,
        model: &str,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system.filter(|s| !s.is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        let response = self.chat_completion(model, messages, None).await?;
        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| BlockrunError::unexpected("No choices in response"))
    }

    /// Full OpenAI-compatible chat completion
    pub async fn chat_completion(
        &mut self,
        model: &str,
        messages: Vec<ChatMessage>,
        options: Option<&ChatCompletionOptions>,
    ) -> Result<ChatResponse> {
        let request = build_chat_request(model, messages, options)?;
        let url = self.orchestrator.config().endpoint("/v1/chat/completions");
        self.orchestrator.post_json(&url, &request).await
    }

    /// Available LLMs with pricing
    pub async fn list_models(&self) -> Result<Vec<Model>> {
        let url = self.orchestrator.config().endpoint("/v1/models");
        let list: ModelList<Model> = self.orchestrator.get_json(&url).await?;
        Ok(list.data)
    }

    /// Available image models with pricing
    pub async fn list_image_models(&self) -> Result<Vec<ImageModel>> {
        let url = self.orchestrator.config().endpoint("/v1/images/models");
        let list: ModelList<ImageModel> = self.orchestrator.get_json(&url).await?;
        Ok(list.data)
    }

    /// LLM and image models in one list, LLMs first
    pub async fn list_all_models(&self) -> Result<Vec<AllModel>> {
        let llms = self.list_models().await?;
        let images = self.list_image_models().await?;

        Ok(llms
            .into_iter()
            .map(AllModel::from)
            .chain(images.into_iter().map(AllModel::from))
            .collect())
    }

    pub fn wallet_address(&self) -> String {
        self.orchestrator.address()
    }

    pub fn spending(&self) -> Spending {
        self.orchestrator.spending()
    }
}

/// Validate inputs and fill defaults for a chat completion body
pub(crate) fn build_chat_request(
    model: &str,
    messages: Vec<ChatMessage>,
    options: Option<&ChatCompletionOptions>,
) -> Result<ChatCompletionRequest> {
    validate_model(model)?;
    if messages.is_empty() {
        return Err(BlockrunError::validation(
            "messages",
            "At least one message is required",
        ));
    }

    let mut request = ChatCompletionRequest {
        model: model.to_string(),
        messages,
        max_tokens: DEFAULT_MAX_TOKENS,
        temperature: None,
        top_p: None,
        search_parameters: None,
    };

    if let Some(options) = options {
        if let Some(max_tokens) = options.max_tokens.filter(|n| *n > 0) {
            validate_max_tokens(max_tokens)?;
            request.max_tokens = max_tokens;
        }
        if let Some(temperature) = options.temperature {
            validate_temperature(temperature)?;
            request.temperature = Some(temperature);
        }
        if let Some(top_p) = options.top_p {
            validate_top_p(top_p)?;
            request.top_p = Some(top_p);
        }
        request.search_parameters = match &options.search_parameters {
            Some(parameters) => Some(parameters.clone()),
            None if options.search => Some(json!({ "mode": "on" })),
            None => None,
        };
    }

    Ok(request)
}

/// Explicit key first, then the first non-empty environment variable
pub(crate) fn resolve_key(private_key: &str, env_vars: &[&str]) -> Result<String> {
    if !private_key.trim().is_empty() {
        return Ok(private_key.trim().to_string());
    }

    env_vars
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or_else(|| {
            BlockrunError::validation(
                "privateKey",
                format!(
                    "Private key required. Pass it explicitly or set {}",
                    env_vars.join(" or ")
                ),
            )
        })
}
