use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::actor_framework::Entity;
use crate::domain::{Cart, CartLine, CartOwner, ProductId};

impl Entity for Cart {
    type Id = CartOwner;
    type CreateParams = ();
    type UpdateParams = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Error = CartError;

    fn id(&self) -> &CartOwner {
        &self.owner
    }

    /// Carts are keyed by their owner and start empty.
    fn from_create_params(owner: CartOwner, _params: ()) -> Result<Self, CartError> {
        Ok(Cart::empty(owner))
    }

    /// Carts change only through actions.
    fn on_update(&mut self, _update: ()) -> Result<(), CartError> {
        Ok(())
    }

    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::AddLine(line) => {
                if line.quantity == 0 {
                    return Err(CartError::InvalidQuantity(0));
                }
                self.add_checked(line)?;
            }
            CartAction::SetQuantity { product_id, quantity } => {
                let index = self
                    .lines
                    .iter()
                    .position(|l| l.product_id == product_id)
                    .ok_or_else(|| self.missing_line(product_id))?;
                if quantity == 0 {
                    self.lines.remove(index);
                } else {
                    self.lines[index].quantity = quantity;
                }
                self.touch();
            }
            CartAction::RemoveLine(product_id) => {
                if !self.remove(product_id) {
                    return Err(self.missing_line(product_id));
                }
            }
            CartAction::Merge(lines) => {
                for line in lines {
                    self.add_checked(line)?;
                }
            }
            CartAction::Drain => {
                let lines = std::mem::take(&mut self.lines);
                self.touch();
                return Ok(CartActionResult::Drained(lines));
            }
            CartAction::RemoveCheckedOut(ordered) => {
                for (product_id, quantity) in ordered {
                    self.subtract(product_id, quantity);
                }
            }
        }
        Ok(CartActionResult::Updated(self.clone()))
    }
}

impl Cart {
    fn add_checked(&mut self, line: CartLine) -> Result<u32, CartError> {
        let quantity = line.quantity;
        self.add(line).ok_or(CartError::InvalidQuantity(quantity))
    }

    fn missing_line(&self, product_id: ProductId) -> CartError {
        CartError::LineNotFound {
            owner: self.owner.to_string(),
            product_id,
        }
    }
}
