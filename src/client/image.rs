//! Image generation client

use super::llm::resolve_key;
use super::orchestrator::PaymentOrchestrator;
use super::transport::{HttpTransport, Transport};
use crate::config::{ClientConfig, DEFAULT_IMAGE_TIMEOUT};
use crate::payment::Spending;
use crate::types::chat::ModelList;
use crate::types::{ImageGenerateOptions, ImageGenerationRequest, ImageModel, ImageResponse};
use crate::wallet::Wallet;
use crate::{BlockrunError, Result};
use std::sync::Arc;

/// Environment variables read when no key is passed to [`ImageClient::new`]
pub const IMAGE_KEY_ENV: [&str; 2] = ["BLOCKRUN_WALLET_KEY", "BASE_CHAIN_WALLET_KEY"];

/// Pay-per-request client for the image generation API
#[derive(Debug)]
pub struct ImageClient {
    orchestrator: PaymentOrchestrator,
}

impl ImageClient {
    /// Create a client with the default endpoint and a 120 second timeout
    pub fn new(private_key: &str) -> Result<Self> {
        Self::with_config(
            private_key,
            ClientConfig::new().with_timeout(DEFAULT_IMAGE_TIMEOUT),
        )
    }

    pub fn with_config(private_key: &str, config: ClientConfig) -> Result<Self> {
        let config = config.with_env_overrides();
        config.validate()?;
        let transport = HttpTransport::new(config.timeout)?;
        Self::with_transport(private_key, config, Arc::new(transport))
    }

    pub fn with_transport(
        private_key: &str,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let key = resolve_key(private_key, &IMAGE_KEY_ENV)?;
        let wallet = Wallet::from_private_key(&key)?;
        Ok(Self {
            orchestrator: PaymentOrchestrator::new(transport, wallet, config),
        })
    }

    /// Generate images from a text prompt
    pub async fn generate(
        &mut self,
        prompt: &str,
        options: Option<&ImageGenerateOptions>,
    ) -> Result<ImageResponse> {
        if prompt.trim().is_empty() {
            return Err(BlockrunError::validation("prompt", "Prompt is required"));
        }

        let request = ImageGenerationRequest::new(prompt, options);
        let url = self.orchestrator.config().endpoint("/v1/images/generations");
        self.orchestrator.post_json(&url, &request).await
    }

    /// Available image models with pricing
    pub async fn list_image_models(&self) -> Result<Vec<ImageModel>> {
        let url = self.orchestrator.config().endpoint("/v1/images/models");
        let list: ModelList<ImageModel> = self.orchestrator.get_json(&url).await?;
        Ok(list.data)
    }

    pub fn wallet_address(&self) -> String {
        self.orchestrator.address()
    }

    pub fn spending(&self) -> Spending {
        self.orchestrator.spending()
    }
}
