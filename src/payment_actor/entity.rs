use super::error::PaymentError;
use crate::actor_framework::Entity;
use crate::domain::{Payment, PaymentCreate, PaymentId};
use chrono::Utc;

impl Entity for Payment {
    type Id = PaymentId;
    type CreateParams = PaymentCreate;
    type UpdateParams = ();
    type Action = ();
    type ActionResult = ();
    type Error = PaymentError;

    fn id(&self) -> &PaymentId {
        &self.id
    }

    fn from_create_params(id: PaymentId, params: PaymentCreate) -> Result<Self, PaymentError> {
        Ok(Self {
            id,
            amount: params.amount,
            method: params.method,
            status: params.status,
            timestamp: Utc::now(),
        })
    }

    fn on_update(&mut self, _update: ()) -> Result<(), PaymentError> {
        Err(PaymentError::Immutable(self.id.to_string()))
    }

    fn on_delete(&self) -> Result<(), PaymentError> {
        Err(PaymentError::Immutable(self.id.to_string()))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), PaymentError> {
        Err(PaymentError::Immutable(self.id.to_string()))
    }
}
