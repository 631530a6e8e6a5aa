use crate::domain::{Cart, CartLine, ProductId};

/// Custom actions for Cart entities.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds a line, merging with an existing line for the same product.
    AddLine(CartLine),
    /// Replaces a line's quantity; zero removes the line.
    SetQuantity { product_id: ProductId, quantity: u32 },
    RemoveLine(ProductId),
    /// Adds every line of another cart (login merge).
    Merge(Vec<CartLine>),
    /// Empties the cart and hands back its lines.
    Drain,
    /// Removes the quantities that were just ordered, keeping anything added since.
    RemoveCheckedOut(Vec<(ProductId, u32)>),
}

/// Results from CartActions
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// Cart after the change
    Updated(Cart),
    /// Lines taken out by `Drain`
    Drained(Vec<CartLine>),
}
