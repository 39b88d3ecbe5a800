//! Client state manager: the local mirror of the server's tasks.
//!
//! The mirror is never edited from locally supplied values. Every change
//! goes out as an [`Intent`], the service answers, and the answer becomes a
//! [`Mutation`] that the mirror applies. A failed request produces no
//! mutation, so the mirror stays at the last state the server confirmed.

use std::sync::Arc;

use crate::client::{ClientResult, TaskApi};
use crate::error::ClientError;
use crate::fields::Status;
use crate::task::{is_blank, NewTask, Task, TaskPatch};

/// Ordered copy of every task the client knows about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mirror {
    tasks: Vec<Task>,
}

/// A server-confirmed change to apply to the mirror.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Loaded(Vec<Task>),
    Added(Task),
    Replaced(Task),
    Removed(u64),
}

impl Mirror {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks in one column, in mirror order.
    pub fn column(&self, status: Status) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// Task ids grouped by column, left to right.
    pub fn columns(&self) -> [Vec<u64>; 3] {
        Status::ALL.map(|status| self.column(status).iter().map(|t| t.id).collect())
    }

    /// Number of tasks in each column, left to right.
    pub fn counts(&self) -> [usize; 3] {
        self.columns().map(|c| c.len())
    }

    pub fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::Loaded(tasks) => self.tasks = tasks,
            Mutation::Added(task) => self.tasks.push(task),
            Mutation::Replaced(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
            }
            Mutation::Removed(id) => self.tasks.retain(|t| t.id != id),
        }
    }

    /// Intent for moving `id` into `target`, or `None` when nothing would change:
    /// the task is unknown or already sits in that column.
    pub fn move_intent(&self, id: u64, target: Status) -> Option<Intent> {
        let task = self.get(id)?;
        (task.status != target).then_some(Intent::Move { id, status: target })
    }
}

/// A user request that needs a round trip to the service.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Load,
    Add { title: String, description: String },
    Edit { id: u64, title: String, description: String },
    Remove { id: u64 },
    Move { id: u64, status: Status },
}

/// Which kind of round trip an intent is, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Load,
    Add,
    Edit,
    Remove,
    Move,
}

impl IntentKind {
    pub fn label(self) -> &'static str {
        match self {
            IntentKind::Load => "load",
            IntentKind::Add => "add",
            IntentKind::Edit => "edit",
            IntentKind::Remove => "delete",
            IntentKind::Move => "move",
        }
    }
}

impl Intent {
    /// Build an add intent, or `None` when the title is blank.
    pub fn add(title: &str, description: &str) -> Option<Intent> {
        if is_blank(title) {
            return None;
        }
        Some(Intent::Add {
            title: title.to_string(),
            description: description.to_string(),
        })
    }

    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::Load => IntentKind::Load,
            Intent::Add { .. } => IntentKind::Add,
            Intent::Edit { .. } => IntentKind::Edit,
            Intent::Remove { .. } => IntentKind::Remove,
            Intent::Move { .. } => IntentKind::Move,
        }
    }

    /// Short label for status messages and logs.
    pub fn label(&self) -> &'static str {
        self.kind().label()
    }

    /// Perform the round trip and describe the confirmed result.
    pub async fn execute<A: TaskApi + ?Sized>(self, api: &A) -> ClientResult<Mutation> {
        match self {
            Intent::Load => Ok(Mutation::Loaded(api.list().await?)),
            Intent::Add { title, description } => {
                let new = NewTask::new(title)
                    .with_description(description)
                    .with_status(Status::Todo);
                Ok(Mutation::Added(api.create(&new).await?))
            }
            Intent::Edit { id, title, description } => {
                let patch = TaskPatch::text(title, description);
                Ok(Mutation::Replaced(api.update(id, &patch).await?))
            }
            Intent::Remove { id } => {
                api.delete(id).await?;
                Ok(Mutation::Removed(id))
            }
            Intent::Move { id, status } => {
                Ok(Mutation::Replaced(api.update(id, &TaskPatch::status(status)).await?))
            }
        }
    }
}

/// Mirror plus the API it is synchronised with.
pub struct ClientState<A: TaskApi + ?Sized> {
    api: Arc<A>,
    mirror: Mirror,
}

impl<A: TaskApi + ?Sized> ClientState<A> {
    pub fn new(api: Arc<A>) -> Self {
        ClientState {
            api,
            mirror: Mirror::default(),
        }
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn mirror(&self) -> &Mirror {
        &self.mirror
    }

    /// Run an intent and apply the server's answer.
    pub async fn dispatch(&mut self, intent: Intent) -> ClientResult<Mutation> {
        let label = intent.label();
        match intent.execute(self.api.as_ref()).await {
            Ok(mutation) => {
                self.mirror.apply(mutation.clone());
                Ok(mutation)
            }
            Err(err) => {
                tracing::warn!(intent = label, error = %err, "request failed, mirror unchanged");
                Err(err)
            }
        }
    }

    /// Replace the mirror with the server's full list.
    pub async fn load(&mut self) -> ClientResult<()> {
        self.dispatch(Intent::Load).await.map(|_| ())
    }

    /// Create a task. Returns `Ok(None)` without a request when the title is blank.
    pub async fn add(&mut self, title: &str, description: &str) -> ClientResult<Option<Task>> {
        let Some(intent) = Intent::add(title, description) else {
            return Ok(None);
        };
        match self.dispatch(intent).await? {
            Mutation::Added(task) => Ok(Some(task)),
            _ => Ok(None),
        }
    }

    pub async fn edit(&mut self, id: u64, title: &str, description: &str) -> ClientResult<Task> {
        let intent = Intent::Edit {
            id,
            title: title.to_string(),
            description: description.to_string(),
        };
        self.dispatch(intent).await.and_then(|m| replaced(m, id))
    }

    pub async fn remove(&mut self, id: u64) -> ClientResult<()> {
        self.dispatch(Intent::Remove { id }).await.map(|_| ())
    }

    /// Move a task to another column. Returns `Ok(None)` without a request when
    /// the task is unknown locally or already in `status`.
    pub async fn move_task(&mut self, id: u64, status: Status) -> ClientResult<Option<Task>> {
        let Some(intent) = self.mirror.move_intent(id, status) else {
            return Ok(None);
        };
        self.dispatch(intent).await.and_then(|m| replaced(m, id)).map(Some)
    }
}

fn replaced(mutation: Mutation, id: u64) -> ClientResult<Task> {
    match mutation {
        Mutation::Replaced(task) => Ok(task),
        _ => Err(ClientError::NotFound(id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{FileStore, TaskStore};
    use crate::error::StoreError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// In-process API over a real store, with a switch to fail every call.
    /// The title is upper-cased on create so tests can tell server data from
    /// locally supplied values.
    struct FakeApi {
        store: FileStore,
        failing: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn new() -> Self {
            FakeApi {
                store: FileStore::in_memory(),
                failing: AtomicBool::new(false),
                calls: AtomicUsize::new(0),
            }
        }

        fn gate(&self) -> ClientResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Server error".into(),
                });
            }
            Ok(())
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn map(err: StoreError) -> ClientError {
        match err {
            StoreError::NotFound(id) => ClientError::NotFound(id),
            other => ClientError::Api {
                status: 400,
                message: other.to_string(),
            },
        }
    }

    #[async_trait]
    impl TaskApi for FakeApi {
        async fn list(&self) -> ClientResult<Vec<Task>> {
            self.gate()?;
            self.store.list_all().map_err(map)
        }

        async fn create(&self, new: &NewTask) -> ClientResult<Task> {
            self.gate()?;
            let mut new = new.clone();
            new.title = new.title.map(|t| t.to_uppercase());
            self.store.create(new).map_err(map)
        }

        async fn update(&self, id: u64, patch: &TaskPatch) -> ClientResult<Task> {
            self.gate()?;
            self.store.update_by_id(id, patch.clone()).map_err(map)
        }

        async fn delete(&self, id: u64) -> ClientResult<String> {
            self.gate()?;
            self.store.delete_by_id(id).map_err(map)?;
            Ok("Task deleted".into())
        }
    }

    async fn loaded_state(titles: &[&str]) -> ClientState<FakeApi> {
        let api = Arc::new(FakeApi::new());
        for title in titles {
            api.store.create(NewTask::new(*title)).unwrap();
        }
        let mut state = ClientState::new(api);
        state.load().await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_load_replaces_mirror() {
        let state = loaded_state(&["a", "b"]).await;
        assert_eq!(state.mirror().len(), 2);
        assert_eq!(state.mirror().counts(), [2, 0, 0]);
    }

    #[tokio::test]
    async fn test_add_appends_server_representation() {
        let mut state = loaded_state(&[]).await;
        let task = state.add("write spec", "desc").await.unwrap().unwrap();

        assert_eq!(task.title, "WRITE SPEC");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(state.mirror().tasks(), &[task]);
    }

    #[tokio::test]
    async fn test_add_blank_title_is_noop() {
        let mut state = loaded_state(&[]).await;
        let calls = state.api().calls();
        assert_eq!(state.add("   ", "desc").await.unwrap(), None);
        assert_eq!(state.api().calls(), calls);
        assert!(state.mirror().is_empty());
    }

    #[tokio::test]
    async fn test_failure_leaves_mirror_unchanged() {
        let mut state = loaded_state(&["a"]).await;
        let before = state.mirror().clone();
        let id = before.tasks()[0].id;
        state.api().failing.store(true, Ordering::SeqCst);

        assert!(state.add("b", "").await.is_err());
        assert!(state.edit(id, "x", "y").await.is_err());
        assert!(state.remove(id).await.is_err());
        assert!(state.move_task(id, Status::Done).await.is_err());
        assert!(state.load().await.is_err());

        assert_eq!(state.mirror(), &before);
    }

    #[tokio::test]
    async fn test_edit_replaces_entry() {
        let mut state = loaded_state(&["a", "b"]).await;
        let id = state.mirror().tasks()[1].id;

        let task = state.edit(id, "b2", "details").await.unwrap();
        assert_eq!(task.title, "b2");
        assert_eq!(state.mirror().get(id), Some(&task));
        assert_eq!(state.mirror().tasks()[0].title, "a");
    }

    #[tokio::test]
    async fn test_edit_rejected_by_server_keeps_mirror() {
        let mut state = loaded_state(&["a"]).await;
        let before = state.mirror().clone();
        let id = before.tasks()[0].id;

        assert!(state.edit(id, "", "d").await.is_err());
        assert_eq!(state.mirror(), &before);
    }

    #[tokio::test]
    async fn test_remove_filters_entry() {
        let mut state = loaded_state(&["first", "second"]).await;
        let first = state.mirror().tasks()[0].id;

        state.remove(first).await.unwrap();
        assert_eq!(state.mirror().len(), 1);
        assert_eq!(state.mirror().tasks()[0].title, "second");
        assert_eq!(state.api().store.list_all().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_move_skips_columns() {
        let mut state = loaded_state(&["a"]).await;
        let id = state.mirror().tasks()[0].id;

        let moved = state.move_task(id, Status::Done).await.unwrap().unwrap();
        assert_eq!(moved.status, Status::Done);
        assert_eq!(state.mirror().counts(), [0, 0, 1]);
    }

    #[tokio::test]
    async fn test_move_to_same_column_is_noop() {
        let mut state = loaded_state(&["a"]).await;
        let id = state.mirror().tasks()[0].id;
        let before = state.mirror().clone();
        let calls = state.api().calls();

        assert_eq!(state.move_task(id, Status::Todo).await.unwrap(), None);
        assert_eq!(state.move_task(404, Status::Done).await.unwrap(), None);
        assert_eq!(state.api().calls(), calls);
        assert_eq!(state.mirror(), &before);
    }

    #[test]
    fn test_apply_replaced_for_unknown_id_is_ignored() {
        let mut mirror = Mirror::default();
        let task = FileStore::in_memory().create(NewTask::new("x")).unwrap();
        mirror.apply(Mutation::Replaced(task.clone()));
        assert!(mirror.is_empty());

        mirror.apply(Mutation::Added(task.clone()));
        mirror.apply(Mutation::Removed(task.id));
        assert!(mirror.is_empty());
    }
}
