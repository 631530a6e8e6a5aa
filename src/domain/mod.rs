//! Business domain entities. Pure data with no actor-specific concerns.

pub mod cart;
pub mod ids;
pub mod money;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod user;
pub mod wishlist;

pub use cart::*;
pub use ids::*;
pub use money::*;
pub use order::*;
pub use payment::*;
pub use product::*;
pub use review::*;
pub use user::*;
pub use wishlist::*;
