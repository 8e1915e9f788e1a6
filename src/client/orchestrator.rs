//! The x402 request/retry state machine

use super::transport::{Transport, TransportRequest, TransportResponse};
use crate::config::ClientConfig;
use crate::crypto::signature::generate_nonce;
use crate::payment::{
    build_payment_payload, encode_payment_payload, parse_challenge, resolve_domain, select_option,
    ChallengeSource, SelectedOption, Spending, SpendingLedger,
};
use crate::types::constants::headers::PAYMENT_SIGNATURE;
use crate::wallet::{AuthorizationRequest, Wallet};
use crate::{BlockrunError, Result};
use http::{HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Stage of a paid call, as reported in logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Sent,
    ChallengeReceived,
    Signed,
    Retried,
    Settled,
    Rejected,
    Failed,
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentState::Sent => "sent",
            PaymentState::ChallengeReceived => "challenge_received",
            PaymentState::Signed => "signed",
            PaymentState::Retried => "retried",
            PaymentState::Settled => "settled",
            PaymentState::Rejected => "rejected",
            PaymentState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Signed header ready to attach to the retry
struct PreparedPayment {
    header: HeaderValue,
    atomic_amount: u128,
}

/// Issues requests and settles 402 challenges with a single paid retry
pub struct PaymentOrchestrator {
    transport: Arc<dyn Transport>,
    wallet: Wallet,
    config: ClientConfig,
    ledger: SpendingLedger,
}

impl fmt::Debug for PaymentOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentOrchestrator")
            .field("wallet", &self.wallet)
            .field("config", &self.config)
            .field("ledger", &self.ledger)
            .field("transport", &"<transport>")
            .finish()
    }
}

impl PaymentOrchestrator {
    pub fn new(transport: Arc<dyn Transport>, wallet: Wallet, config: ClientConfig) -> Self {
        Self {
            transport,
            wallet,
            config,
            ledger: SpendingLedger::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Checksummed address of the paying wallet
    pub fn address(&self) -> String {
        self.wallet.address()
    }

    /// Settled spending of this session
    pub fn spending(&self) -> Spending {
        self.ledger.snapshot()
    }

    /// POST `body` to `url`, paying once if the server asks for it
    ///
    /// At most two requests are made. The ledger only changes after a paid 200.
    pub async fn post_json<B, R>(&mut self, url: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)?;

        tracing::debug!(state = %PaymentState::Sent, url, "Sending request");
        let response = self
            .transport
            .send(TransportRequest::post_json(url, payload.clone()))
            .await?;

        match response.status {
            StatusCode::OK => {
                tracing::debug!(state = %PaymentState::Settled, url, paid = false, "Request succeeded");
                response.json()
            }
            StatusCode::PAYMENT_REQUIRED => self.pay_and_retry(url, payload, &response).await,
            status => Err(fail(url, status, &response)),
        }
    }

    async fn pay_and_retry<R: DeserializeOwned>(
        &mut self,
        url: &str,
        payload: Vec<u8>,
        challenge: &TransportResponse,
    ) -> Result<R> {
        let source = match ChallengeSource::from_response(&challenge.headers, &challenge.body) {
            Some(source) => source,
            None => {
                tracing::error!(
                    state = %PaymentState::Failed,
                    url,
                    "402 response carried no payment challenge"
                );
                return Err(BlockrunError::api(
                    StatusCode::PAYMENT_REQUIRED.as_u16(),
                    challenge.text(),
                ));
            }
        };
        tracing::debug!(state = %PaymentState::ChallengeReceived, url, "Payment required");

        let prepared = self.prepare_payment(&source, url)?;

        let mut retry = TransportRequest::post_json(url, payload);
        retry.headers.insert(PAYMENT_SIGNATURE, prepared.header);
        tracing::debug!(state = %PaymentState::Retried, url, "Retrying with payment");
        let response = self.transport.send(retry).await?;

        match response.status {
            StatusCode::OK => {
                let parsed = response.json()?;
                self.ledger.record(prepared.atomic_amount);
                tracing::debug!(
                    state = %PaymentState::Settled,
                    url,
                    amount = %prepared.atomic_amount,
                    "Payment settled"
                );
                Ok(parsed)
            }
            StatusCode::PAYMENT_REQUIRED => {
                tracing::warn!(state = %PaymentState::Rejected, url, "Payment rejected");
                Err(BlockrunError::payment(
                    "Payment was rejected. Check your wallet balance.",
                ))
            }
            status => Err(fail(url, status, &response)),
        }
    }

    /// Parse, sign and encode; any failure aborts before the retry
    fn prepare_payment(&self, source: &ChallengeSource, url: &str) -> Result<PreparedPayment> {
        let requirement = parse_challenge(source)?;
        let selected = select_option(&requirement)?;
        let SelectedOption { option, .. } = &selected;

        let domain = resolve_domain(option, &self.config)
            .map_err(|e| BlockrunError::payment_caused_by("Failed to create payment", e))?;
        let nonce = generate_nonce()
            .map_err(|e| BlockrunError::payment_caused_by("Failed to create payment", e))?;
        let signed = self
            .wallet
            .sign_transfer_authorization(&AuthorizationRequest {
                domain: &domain,
                pay_to: &option.pay_to,
                amount: selected.amount(),
                max_timeout_seconds: option.max_timeout_seconds,
                nonce,
                now: chrono::Utc::now().timestamp(),
            })
            .map_err(|e| BlockrunError::payment_caused_by("Failed to create payment", e))?;
        tracing::debug!(
            state = %PaymentState::Signed,
            network = %option.network,
            amount = %selected.amount(),
            "Signed transfer authorization"
        );

        let payload = build_payment_payload(&requirement, &selected, &domain, signed, url);
        let encoded = encode_payment_payload(&payload)
            .map_err(|e| BlockrunError::payment_caused_by("Failed to encode payment", e))?;
        let header = HeaderValue::from_str(&encoded)
            .map_err(|_| BlockrunError::payment("Failed to encode payment header"))?;

        Ok(PreparedPayment {
            header,
            atomic_amount: selected.atomic_amount,
        })
    }

    /// GET `url` without any payment handling
    pub async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        let response = self.transport.send(TransportRequest::get(url)).await?;
        if response.status != StatusCode::OK {
            return Err(fail(url, response.status, &response));
        }
        response.json()
    }
}

fn fail(url: &str, status: StatusCode, response: &TransportResponse) -> BlockrunError {
    tracing::error!(state = %PaymentState::Failed, url, status = status.as_u16(), "API error");
    BlockrunError::api(status.as_u16(), response.text())
}
