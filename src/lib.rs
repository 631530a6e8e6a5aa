//! Order-fulfillment and catalog-consistency engine for an online storefront.
//!
//! Every record store is a [`ResourceActor`](actor_framework::ResourceActor)
//! task; the typed clients in [`clients`] are the public surface and
//! [`StorefrontSystem`](app_system::StorefrontSystem) wires them together.

pub mod actor_framework;
pub mod app_system;
pub mod cart_actor;
pub mod clients;
pub mod domain;
pub mod order_actor;
pub mod payment_actor;
pub mod product_actor;
pub mod review_actor;
pub mod user_actor;
pub mod wishlist_actor;

#[cfg(test)]
mod mock_framework;
