use super::error::UserError;
use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserId, UserUpdate};

impl Entity for User {
    type Id = UserId;
    type CreateParams = UserCreate;
    type UpdateParams = UserUpdate;
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    fn id(&self) -> &UserId {
        &self.id
    }

    /// Creates a new User from creation parameters.
    ///
    /// # Errors
    /// `ValidationError` when the email is blank.
    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        ensure_email(&params.email)?;
        Ok(Self::new(id, params.name, params.email, params.role))
    }

    /// Updates the user's profile information.
    ///
    /// # Fields Updated
    /// - `name`: User's display name
    /// - `email`: User's email address
    /// - `role`: Account role
    fn on_update(&mut self, update: UserUpdate) -> Result<(), UserError> {
        if let Some(email) = update.email {
            ensure_email(&email)?;
            self.email = email;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        Ok(())
    }

    /// No custom actions are defined for users.
    fn handle_action(&mut self, _action: ()) -> Result<(), UserError> {
        Ok(())
    }
}

fn ensure_email(email: &str) -> Result<(), UserError> {
    if email.trim().is_empty() {
        Err(UserError::ValidationError("Email required".to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_email_is_rejected() {
        let err = User::from_create_params(UserId(1), UserCreate::customer("Alice", " ")).unwrap_err();
        assert_eq!(err, UserError::ValidationError("Email required".into()));

        let mut user = User::from_create_params(UserId(1), UserCreate::customer("Alice", "a@example.com")).unwrap();
        let update = UserUpdate { email: Some(String::new()), name: Some("Al".into()), role: None };
        assert!(user.on_update(update).is_err());
        assert_eq!(user.name, "Alice");
    }
}
