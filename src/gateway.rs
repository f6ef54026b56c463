//! Async boundaries for everything the site "sends somewhere".
//!
//! The demo site has no backend, so [`SimulatedGateway`] answers after a
//! fixed delay with canned responses. Real implementations plug in behind
//! the same traits.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::time::sleep;

use crate::error::GatewayError;
use crate::fixtures::CHAT_RESPONSES;
use crate::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub customer: String,
    pub email: String,
    pub address: String,
    pub shipping: String,
    pub payment: String,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    Contact {
        name: String,
        email: String,
        subject: String,
        body: String,
    },
    Newsletter {
        email: String,
        name: Option<String>,
    },
    PasswordReset {
        email: String,
    },
}

#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn place_order(&self, order: Order) -> Result<OrderConfirmation, GatewayError>;
}

#[async_trait]
pub trait MessageGateway: Send + Sync {
    async fn send(&self, message: Message) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait ChatResponder: Send + Sync {
    async fn reply(&self, text: &str) -> Result<String, GatewayError>;
}

/// Delays for the simulated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub order: Duration,
    pub message: Duration,
    pub chat_base: Duration,
    /// Upper bound of the extra delay added to each chat reply
    pub chat_jitter: Duration,
}

impl Latency {
    pub const NONE: Latency = Latency {
        order: Duration::ZERO,
        message: Duration::ZERO,
        chat_base: Duration::ZERO,
        chat_jitter: Duration::ZERO,
    };
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            order: Duration::from_millis(3000),
            message: Duration::from_millis(2000),
            chat_base: Duration::from_millis(1500),
            chat_jitter: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Default)]
pub struct SimulatedGateway {
    latency: Latency,
    orders: AtomicU64,
    replies: AtomicUsize,
}

impl SimulatedGateway {
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            ..Default::default()
        }
    }

    /// No delays; used by tests.
    pub fn instant() -> Self {
        Self::new(Latency::NONE)
    }

    fn chat_delay(&self, text: &str) -> Duration {
        let jitter_ms = self.latency.chat_jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.latency.chat_base;
        }
        // Deterministic per message so replies feel uneven without a RNG
        let seed: u64 = text.bytes().map(u64::from).sum();
        self.latency.chat_base + Duration::from_millis(seed.wrapping_mul(7919) % jitter_ms)
    }
}

/// Zero latency answers without touching the timer driver.
async fn wait(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}

#[async_trait]
impl OrderGateway for SimulatedGateway {
    async fn place_order(&self, order: Order) -> Result<OrderConfirmation, GatewayError> {
        if order.total <= Money::ZERO {
            return Err(GatewayError::Rejected("order total must be positive".into()));
        }
        wait(self.latency.order).await;
        let n = self.orders.fetch_add(1, Ordering::Relaxed) + 1;
        let reference = format!("TUSK-{:06}", n);
        tracing::info!("Simulated order {} for {} ({})", reference, order.customer, order.total);
        Ok(OrderConfirmation { reference })
    }
}

#[async_trait]
impl MessageGateway for SimulatedGateway {
    async fn send(&self, message: Message) -> Result<(), GatewayError> {
        wait(self.latency.message).await;
        tracing::info!("Simulated message sent: {}", serde_json::to_string(&message).unwrap_or_default());
        Ok(())
    }
}

#[async_trait]
impl ChatResponder for SimulatedGateway {
    async fn reply(&self, text: &str) -> Result<String, GatewayError> {
        wait(self.chat_delay(text)).await;
        let i = self.replies.fetch_add(1, Ordering::Relaxed);
        Ok(CHAT_RESPONSES[i % CHAT_RESPONSES.len()].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(total: Money) -> Order {
        Order {
            customer: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            address: "12 Analytical Way".into(),
            shipping: "standard".into(),
            payment: "PayPal".into(),
            total,
        }
    }

    #[tokio::test]
    async fn test_order_references_increase() {
        let gw = SimulatedGateway::instant();
        let a = gw.place_order(order(Money::dollars(10))).await.unwrap();
        let b = gw.place_order(order(Money::dollars(10))).await.unwrap();
        assert_eq!(a.reference, "TUSK-000001");
        assert_eq!(b.reference, "TUSK-000002");
    }

    #[tokio::test]
    async fn test_zero_total_is_rejected() {
        let gw = SimulatedGateway::instant();
        let err = gw.place_order(order(Money::ZERO)).await.unwrap_err();
        assert!(matches!(err, GatewayError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_chat_replies_rotate() {
        let gw = SimulatedGateway::instant();
        let first = gw.reply("hello").await.unwrap();
        let second = gw.reply("hello").await.unwrap();
        assert_eq!(first, CHAT_RESPONSES[0]);
        assert_eq!(second, CHAT_RESPONSES[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_latency() {
        let gw = SimulatedGateway::new(Latency::default());
        let start = tokio::time::Instant::now();
        gw.send(Message::PasswordReset {
            email: "ada@example.com".into(),
        })
        .await
        .unwrap();
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[test]
    fn test_chat_delay_within_bounds() {
        let gw = SimulatedGateway::new(Latency::default());
        for text in ["hi", "pricing?", "I need help with my order"] {
            let d = gw.chat_delay(text);
            assert!(d >= Duration::from_millis(1500) && d < Duration::from_millis(2500));
        }
    }
}
