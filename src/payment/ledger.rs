//! Session spending ledger

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// USDC atomic units carry six decimals
const ATOMIC_SCALE: u32 = 6;

/// Snapshot of what a client has paid so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spending {
    /// Total settled, in USD
    #[serde(rename = "totalUsd")]
    pub total_usd: f64,
    /// Number of paid calls
    pub calls: u64,
}

/// Accumulates settled payments for one client instance
#[derive(Debug, Clone, Default)]
pub struct SpendingLedger {
    total_atomic: u128,
    calls: u64,
}

impl SpendingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one settled payment of `atomic_amount` micro-USDC
    pub fn record(&mut self, atomic_amount: u128) {
        self.total_atomic = self.total_atomic.saturating_add(atomic_amount);
        self.calls += 1;
    }

    pub fn snapshot(&self) -> Spending {
        Spending {
            total_usd: to_usd(self.total_atomic),
            calls: self.calls,
        }
    }
}

fn to_usd(atomic: u128) -> f64 {
    i128::try_from(atomic)
        .ok()
        .and_then(|value| Decimal::try_from_i128_with_scale(value, ATOMIC_SCALE).ok())
        .and_then(|usd| usd.to_f64())
        .unwrap_or(atomic as f64 / 1_000_000.0)
}
