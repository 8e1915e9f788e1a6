//! Input validation run before any network call

use crate::{BlockrunError, Result};
use url::Url;

/// Upper bound accepted for `max_tokens`
pub const MAX_TOKENS_LIMIT: u32 = 1_000_000;

/// Check that a private key is 64 hex characters with an optional `0x` prefix
pub fn validate_private_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(BlockrunError::validation(
            "privateKey",
            "Private key is required",
        ));
    }

    let hex_part = key.strip_prefix("0x").unwrap_or(key);
    if hex_part.len() != 64 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(BlockrunError::validation(
            "privateKey",
            "Private key must be a 64-character hex string (with optional 0x prefix)",
        ));
    }

    Ok(())
}

/// Check that an API URL parses and uses http or https
pub fn validate_api_url(api_url: &str) -> Result<()> {
    if api_url.is_empty() {
        return Err(BlockrunError::validation("apiUrl", "API URL is required"));
    }

    let parsed =
        Url::parse(api_url).map_err(|_| BlockrunError::validation("apiUrl", "Invalid URL format"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        _ => Err(BlockrunError::validation(
            "apiUrl",
            "URL must use http or https scheme",
        )),
    }
}

/// Check a model id of the form `model-name` or `provider/model`
pub fn validate_model(model: &str) -> Result<()> {
    if model.is_empty() {
        return Err(BlockrunError::validation("model", "Model is required"));
    }

    let (provider, name) = match model.split_once('/') {
        Some((provider, name)) => (provider, Some(name)),
        None => (model, None),
    };
    let provider_ok = !provider.is_empty()
        && provider
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    let name_ok = name.map_or(true, |name| {
        !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
    });

    if provider_ok && name_ok {
        Ok(())
    } else {
        Err(BlockrunError::validation(
            "model",
            "Invalid model format. Expected format: 'provider/model' or 'model-name'",
        ))
    }
}

pub fn validate_max_tokens(max_tokens: u32) -> Result<()> {
    if max_tokens > MAX_TOKENS_LIMIT {
        return Err(BlockrunError::validation(
            "maxTokens",
            "max_tokens exceeds maximum allowed value",
        ));
    }
    Ok(())
}

pub fn validate_temperature(temperature: f64) -> Result<()> {
    if !(0.0..=2.0).contains(&temperature) {
        return Err(BlockrunError::validation(
            "temperature",
            "temperature must be between 0 and 2.0",
        ));
    }
    Ok(())
}

pub fn validate_top_p(top_p: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&top_p) {
        return Err(BlockrunError::validation(
            "topP",
            "top_p must be between 0 and 1.0",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<()>) -> String {
        match result {
            Err(BlockrunError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_private_key_validation() {
        let key = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        assert!(validate_private_key(key).is_ok());
        assert!(validate_private_key(&format!("0x{}", key)).is_ok());
        assert_eq!(field_of(validate_private_key("")), "privateKey");
        assert_eq!(field_of(validate_private_key("0xabc")), "privateKey");
        assert_eq!(field_of(validate_private_key(&"g".repeat(64))), "privateKey");
    }

    #[test]
    fn test_api_url_validation() {
        assert!(validate_api_url("https://blockrun.ai/api").is_ok());
        assert!(validate_api_url("http://localhost:8080").is_ok());
        assert_eq!(field_of(validate_api_url("")), "apiUrl");
        assert_eq!(field_of(validate_api_url("not a url")), "apiUrl");
        assert_eq!(field_of(validate_api_url("ftp://blockrun.ai")), "apiUrl");
    }

    #[test]
    fn test_model_validation() {
        for model in ["gpt-4o", "openai/gpt-4o", "anthropic/claude-3.5-sonnet", "xai/grok_3"] {
            assert!(validate_model(model).is_ok(), "{}", model);
        }
        for model in ["", "/gpt", "openai/", "a/b/c", "gpt 4", "open.ai/gpt"] {
            assert_eq!(field_of(validate_model(model)), "model", "{}", model);
        }
    }

    #[test]
    fn test_numeric_ranges() {
        assert!(validate_max_tokens(0).is_ok());
        assert!(validate_max_tokens(MAX_TOKENS_LIMIT).is_ok());
        assert_eq!(field_of(validate_max_tokens(MAX_TOKENS_LIMIT + 1)), "maxTokens");

        assert!(validate_temperature(0.0).is_ok());
        assert!(validate_temperature(2.0).is_ok());
        assert_eq!(field_of(validate_temperature(2.5)), "temperature");
        assert_eq!(field_of(validate_temperature(-0.1)), "temperature");
        assert_eq!(field_of(validate_temperature(f64::NAN)), "temperature");

        assert!(validate_top_p(1.0).is_ok());
        assert_eq!(field_of(validate_top_p(1.01)), "topP");
    }
}
