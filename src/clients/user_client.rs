use crate::actor_framework::ResourceClient;
use crate::domain::{User, UserCreate, UserId, UserUpdate};
use crate::user_actor::UserError;
use tracing::{debug, info, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserId, UserError, user);

impl UserClient {
    #[instrument(skip(self, params), fields(user_name = %params.name, user_email = %params.email))]
    pub async fn create_user(&self, params: UserCreate) -> Result<UserId, UserError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(user_id = %id, "User created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_user(&self, id: UserId, update: UserUpdate) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, update).await
    }
}
