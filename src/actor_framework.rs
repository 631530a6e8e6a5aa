use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Params, and Actions)
// =============================================================================

/// Failures raised by the actor machinery itself rather than by an entity.
///
/// Every entity error type converts from this so clients can use `?`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Store assigns no ids; a key is required")]
    KeyRequired,
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Ord + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type UpdateParams: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + From<FrameworkError> + Send + Sync + 'static;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, update: Self::UpdateParams) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action.
    ///
    /// The actor applies the action to a working copy and only commits it when
    /// this returns `Ok`, so a handler may bail out half way without leaving a
    /// partial mutation behind.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, E>>;
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::UpdateParams,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    /// Create the entity under `id` when absent, then apply `action`.
    UpsertAction {
        id: T::Id,
        params: T::CreateParams,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    /// Apply every action or none of them.
    Transaction {
        actions: Vec<(T::Id, T::Action)>,
        respond_to: Response<Vec<T::ActionResult>, T::Error>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>, T::Error>,
    },
}

impl<T: Entity> Debug for ResourceRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { params, .. } => f.debug_struct("Create").field("params", params).finish(),
            Self::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            Self::Update { id, update, .. } => {
                f.debug_struct("Update").field("id", id).field("update", update).finish()
            }
            Self::Delete { id, .. } => f.debug_struct("Delete").field("id", id).finish(),
            Self::Action { id, action, .. } => {
                f.debug_struct("Action").field("id", id).field("action", action).finish()
            }
            Self::UpsertAction { id, action, .. } => {
                f.debug_struct("UpsertAction").field("id", id).field("action", action).finish()
            }
            Self::Transaction { actions, .. } => {
                f.debug_struct("Transaction").field("actions", actions).finish()
            }
            Self::Query { .. } => f.write_str("Query"),
        }
    }
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

type IdGenerator<I> = Box<dyn Fn() -> I + Send + Sync>;

/// Owns one entity map. Requests are served one at a time, so every request
/// is atomic with respect to every other request on the same store.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id_fn: Option<IdGenerator<T::Id>>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, Some(Box::new(next_id_fn)))
    }

    /// A store whose entities are always addressed by caller-supplied keys.
    pub fn keyed(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::build(buffer_size, None)
    }

    fn build(buffer_size: usize, next_id_fn: Option<IdGenerator<T::Id>>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id_fn,
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self) {
        let entity = std::any::type_name::<T>();
        info!(entity, "ResourceActor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::Update { id, update, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, update));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
                ResourceRequest::UpsertAction { id, params, action, respond_to } => {
                    let _ = respond_to.send(self.handle_upsert_action(id, params, action));
                }
                ResourceRequest::Transaction { actions, respond_to } => {
                    let _ = respond_to.send(self.handle_transaction(actions));
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let matches = self.store.values().filter(|item| filter(item)).cloned().collect();
                    let _ = respond_to.send(Ok(matches));
                }
            }
        }
        info!(entity, "ResourceActor stopped");
    }

    fn materialize(id: T::Id, params: T::CreateParams) -> Result<T, T::Error> {
        let mut item = T::from_create_params(id, params)?;
        item.on_create()?;
        Ok(item)
    }

    fn handle_create(&mut self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        let next_id = self.next_id_fn.as_ref().ok_or(FrameworkError::KeyRequired)?;
        let item = Self::materialize(next_id(), params)?;
        let id = item.id().clone();
        debug!(id = %id, "Entity created");
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, update: T::UpdateParams) -> Result<T, T::Error> {
        let mut item = self.existing(&id)?;
        item.on_update(update)?;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn handle_delete(&mut self, id: T::Id) -> Result<(), T::Error> {
        let item = self
            .store
            .get(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete()?;
        self.store.remove(&id);
        debug!(id = %id, "Entity deleted");
        Ok(())
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        let mut item = self.existing(&id)?;
        let result = item.handle_action(action)?;
        self.store.insert(id, item);
        Ok(result)
    }

    fn handle_upsert_action(
        &mut self,
        id: T::Id,
        params: T::CreateParams,
        action: T::Action,
    ) -> Result<T::ActionResult, T::Error> {
        let mut item = match self.store.get(&id) {
            Some(existing) => existing.clone(),
            None => Self::materialize(id.clone(), params)?,
        };
        let result = item.handle_action(action)?;
        self.store.insert(id, item);
        Ok(result)
    }

    fn handle_transaction(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
    ) -> Result<Vec<T::ActionResult>, T::Error> {
        let mut staged: BTreeMap<T::Id, T> = BTreeMap::new();
        let mut results = Vec::with_capacity(actions.len());
        for (id, action) in actions {
            let item = match staged.entry(id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let current = self
                        .store
                        .get(entry.key())
                        .cloned()
                        .ok_or_else(|| FrameworkError::NotFound(entry.key().to_string()))?;
                    entry.insert(current)
                }
            };
            results.push(item.handle_action(action)?);
        }
        self.store.extend(staged);
        Ok(results)
    }

    fn existing(&self, id: &T::Id) -> Result<T, FrameworkError> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, T::Error> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T::Id, T::Error> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, T::Error> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::UpdateParams) -> Result<T, T::Error> {
        self.request(|respond_to| ResourceRequest::Update { id, update, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), T::Error> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }

    pub async fn upsert_action(
        &self,
        id: T::Id,
        params: T::CreateParams,
        action: T::Action,
    ) -> Result<T::ActionResult, T::Error> {
        self.request(|respond_to| ResourceRequest::UpsertAction {
            id,
            params,
            action,
            respond_to,
        })
        .await
    }

    pub async fn transaction(&self, actions: Vec<(T::Id, T::Action)>) -> Result<Vec<T::ActionResult>, T::Error> {
        self.request(|respond_to| ResourceRequest::Transaction { actions, respond_to })
            .await
    }

    /// Returns clones of every entity matching `filter`, ordered by id.
    pub async fn query(&self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Result<Vec<T>, T::Error> {
        let filter: Filter<T> = Box::new(filter);
        self.request(|respond_to| ResourceRequest::Query { filter, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Bin {
        id: String,
        label: String,
        units: u32,
    }

    #[derive(Debug)]
    struct BinCreate {
        label: String,
        units: u32,
    }

    #[derive(Debug)]
    struct BinUpdate {
        label: Option<String>,
    }

    #[derive(Debug)]
    enum BinAction {
        Take(u32),
        Put(u32),
    }

    #[derive(Debug, Clone, Error, PartialEq)]
    enum BinError {
        #[error("bin not found: {0}")]
        NotFound(String),
        #[error("bin {0} is short")]
        Short(String),
        #[error("framework: {0}")]
        Framework(String),
    }

    impl From<FrameworkError> for BinError {
        fn from(e: FrameworkError) -> Self {
            match e {
                FrameworkError::NotFound(id) => Self::NotFound(id),
                other => Self::Framework(other.to_string()),
            }
        }
    }

    impl Entity for Bin {
        type Id = String;
        type CreateParams = BinCreate;
        type UpdateParams = BinUpdate;
        type Action = BinAction;
        type ActionResult = u32;
        type Error = BinError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create_params(id: String, params: BinCreate) -> Result<Self, BinError> {
            Ok(Self {
                id,
                label: params.label,
                units: params.units,
            })
        }

        fn on_update(&mut self, update: BinUpdate) -> Result<(), BinError> {
            if let Some(label) = update.label {
                self.label = label;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: BinAction) -> Result<u32, BinError> {
            match action {
                BinAction::Take(n) => {
                    self.units = self.units.checked_sub(n).ok_or_else(|| BinError::Short(self.id.clone()))?;
                    Ok(self.units)
                }
                BinAction::Put(n) => {
                    self.units += n;
                    Ok(self.units)
                }
            }
        }
    }

    fn spawn_bins() -> ResourceClient<Bin> {
        let counter = Arc::new(AtomicU64::new(1));
        let next_id = move || format!("bin_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run());
        client
    }

    async fn bin(client: &ResourceClient<Bin>, label: &str, units: u32) -> String {
        client
            .create(BinCreate { label: label.into(), units })
            .await
            .unwrap()
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let client = spawn_bins();
        let id = bin(&client, "bolts", 3).await;

        let left = client.perform_action(id.clone(), BinAction::Take(2)).await.unwrap();
        assert_eq!(left, 1);

        let err = client.perform_action(id.clone(), BinAction::Take(2)).await.unwrap_err();
        assert_eq!(err, BinError::Short(id.clone()));

        let stored = client.get(id.clone()).await.unwrap().unwrap();
        assert_eq!(stored.units, 1);

        let renamed = client
            .update(id.clone(), BinUpdate { label: Some("nuts".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.label, "nuts");
    }

    #[tokio::test]
    async fn transaction_is_all_or_nothing() {
        let client = spawn_bins();
        let a = bin(&client, "a", 5).await;
        let b = bin(&client, "b", 1).await;

        let err = client
            .transaction(vec![(a.clone(), BinAction::Take(3)), (b.clone(), BinAction::Take(2))])
            .await
            .unwrap_err();
        assert_eq!(err, BinError::Short(b.clone()));
        assert_eq!(client.get(a.clone()).await.unwrap().unwrap().units, 5);
        assert_eq!(client.get(b.clone()).await.unwrap().unwrap().units, 1);

        let results = client
            .transaction(vec![
                (a.clone(), BinAction::Take(3)),
                (a.clone(), BinAction::Take(2)),
                (b.clone(), BinAction::Put(4)),
            ])
            .await
            .unwrap();
        assert_eq!(results, vec![2, 0, 5]);
    }

    #[tokio::test]
    async fn transaction_on_missing_entity_reports_not_found() {
        let client = spawn_bins();
        let a = bin(&client, "a", 5).await;

        let err = client
            .transaction(vec![(a.clone(), BinAction::Take(1)), ("bin_99".into(), BinAction::Put(1))])
            .await
            .unwrap_err();
        assert_eq!(err, BinError::NotFound("bin_99".into()));
        assert_eq!(client.get(a).await.unwrap().unwrap().units, 5);
    }

    #[tokio::test]
    async fn upsert_creates_missing_entity_under_given_key() {
        let (actor, client) = ResourceActor::<Bin>::keyed(10);
        tokio::spawn(actor.run());

        let err = client.create(BinCreate { label: "x".into(), units: 0 }).await.unwrap_err();
        assert_eq!(err, BinError::Framework(FrameworkError::KeyRequired.to_string()));

        let params = || BinCreate { label: "shelf".into(), units: 0 };
        let units = client
            .upsert_action("shelf".into(), params(), BinAction::Put(2))
            .await
            .unwrap();
        assert_eq!(units, 2);
        let units = client
            .upsert_action("shelf".into(), params(), BinAction::Put(2))
            .await
            .unwrap();
        assert_eq!(units, 4);
    }

    #[tokio::test]
    async fn query_returns_matches_in_id_order() {
        let client = spawn_bins();
        bin(&client, "a", 0).await;
        bin(&client, "b", 7).await;
        bin(&client, "c", 9).await;

        let stocked = client.query(|b| b.units > 0).await.unwrap();
        let labels: Vec<_> = stocked.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "c"]);

        client.delete("bin_1".into()).await.unwrap();
        assert_eq!(client.get("bin_1".into()).await.unwrap(), None);
        let err = client.delete("bin_1".into()).await.unwrap_err();
        assert_eq!(err, BinError::NotFound("bin_1".into()));
    }
}
