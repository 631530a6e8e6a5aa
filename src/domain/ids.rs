//! Type-safe identifiers for every record the engine stores.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Type-safe identifier for Products.
    ProductId => "product"
);
define_id!(
    /// Type-safe identifier for Orders.
    OrderId => "order"
);
define_id!(
    /// Type-safe identifier for Reviews.
    ReviewId => "review"
);
define_id!(
    /// Type-safe identifier for Payments.
    PaymentId => "payment"
);
define_id!(
    /// Type-safe identifier for Users.
    UserId => "user"
);

/// Opaque token identifying an anonymous shopper's session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whoever a cart belongs to: a signed-in user or an anonymous session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CartOwner {
    User(UserId),
    Session(SessionToken),
}

impl From<UserId> for CartOwner {
    fn from(id: UserId) -> Self {
        Self::User(id)
    }
}

impl From<SessionToken> for CartOwner {
    fn from(token: SessionToken) -> Self {
        Self::Session(token)
    }
}

impl Display for CartOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "{id}"),
            Self::Session(token) => write!(f, "session_{token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_render_with_their_prefix() {
        assert_eq!(ProductId(7).to_string(), "product_7");
        assert_eq!(OrderId::from(2).to_string(), "order_2");
        assert_eq!(CartOwner::from(UserId(3)).to_string(), "user_3");
        assert_eq!(CartOwner::from(SessionToken::new("abc")).to_string(), "session_abc");
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&ReviewId(9)).unwrap();
        assert_eq!(json, "9");
    }
}
