use crate::domain::UserId;
use serde::{Deserialize, Serialize};

/// What a user is allowed to do, decided by their role.
pub trait Capabilities {
    fn can_moderate_reviews(&self) -> bool;
    fn can_manage_inventory(&self) -> bool;
    fn can_manage_pricing(&self) -> bool;
}

/// Kind of account, carrying only the data that role needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Customer { home_address: Option<String> },
    SalesManager,
    ProductManager,
}

impl Capabilities for Role {
    fn can_moderate_reviews(&self) -> bool {
        matches!(self, Role::ProductManager)
    }

    fn can_manage_inventory(&self) -> bool {
        matches!(self, Role::ProductManager)
    }

    fn can_manage_pricing(&self) -> bool {
        matches!(self, Role::SalesManager)
    }
}

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the actor system)
    /// * `name` - User's display name
    /// * `email` - User's email address
    /// * `role` - Account role
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
        }
    }
}

impl Capabilities for User {
    fn can_moderate_reviews(&self) -> bool {
        self.role.can_moderate_reviews()
    }

    fn can_manage_inventory(&self) -> bool {
        self.role.can_manage_inventory()
    }

    fn can_manage_pricing(&self) -> bool {
        self.role.can_manage_pricing()
    }
}

/// Params for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl UserCreate {
    pub fn customer(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: Role::Customer { home_address: None },
        }
    }
}

/// Params for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_follow_role() {
        let customer = Role::Customer { home_address: Some("1 Main St".into()) };
        assert!(!customer.can_moderate_reviews() && !customer.can_manage_inventory() && !customer.can_manage_pricing());
        assert!(Role::ProductManager.can_moderate_reviews());
        assert!(Role::ProductManager.can_manage_inventory());
        assert!(!Role::ProductManager.can_manage_pricing());
        assert!(Role::SalesManager.can_manage_pricing());
        assert!(!Role::SalesManager.can_moderate_reviews());
    }
}
