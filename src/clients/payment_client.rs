use crate::actor_framework::ResourceClient;
use crate::domain::{Money, Payment, PaymentCreate, PaymentId, PaymentMethod, PaymentStatus};
use crate::payment_actor::PaymentError;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Anything that can take money for an order.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Attempts a charge and returns the stored record, `Completed` or `Failed`.
    async fn charge(&self, amount: Money, method: PaymentMethod) -> Result<Payment, PaymentError>;
}

/// How the stub processor decides a charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentPolicy {
    #[default]
    ApproveAll,
    DeclineAll,
    /// Declines any charge strictly above the limit.
    DeclineAbove(Money),
}

impl PaymentPolicy {
    pub fn approves(&self, amount: Money) -> bool {
        match self {
            PaymentPolicy::ApproveAll => true,
            PaymentPolicy::DeclineAll => false,
            PaymentPolicy::DeclineAbove(limit) => amount <= *limit,
        }
    }
}

/// Stub processor backed by the payment store. Every attempt is recorded.
#[derive(Clone)]
pub struct PaymentClient {
    inner: ResourceClient<Payment>,
    policy: PaymentPolicy,
}

impl_client_methods!(PaymentClient, Payment, PaymentId, PaymentError, payment);

impl PaymentClient {
    pub fn new(inner: ResourceClient<Payment>, policy: PaymentPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl PaymentProcessor for PaymentClient {
    #[instrument(skip(self), fields(amount = %amount, method = %method))]
    async fn charge(&self, amount: Money, method: PaymentMethod) -> Result<Payment, PaymentError> {
        let status = if self.policy.approves(amount) {
            PaymentStatus::Completed
        } else {
            PaymentStatus::Failed
        };
        debug!("Sending request");
        let id = self.inner.create(PaymentCreate { amount, method, status }).await?;
        let payment = self.require_payment(id).await?;
        match status {
            PaymentStatus::Completed => info!(payment_id = %id, "Payment completed"),
            PaymentStatus::Failed => warn!(payment_id = %id, "Payment declined"),
        }
        Ok(payment)
    }
}
