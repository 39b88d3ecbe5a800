//! Task store: the authoritative, durable task collection.
//!
//! The store is a single JSON document holding every task plus the id
//! counter. `FileStore` keeps the document in memory behind a mutex and
//! writes it back with an atomic temp-file rename after every mutation.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::fields::Status;
use crate::task::{is_blank, NewTask, Task, TaskPatch};

/// Operations every task store provides. Each call is one atomic operation.
pub trait TaskStore: Send + Sync {
    /// Create a task. Fails with `Validation` when the title is missing or blank.
    fn create(&self, new: NewTask) -> StoreResult<Task>;

    /// All tasks, in creation order.
    fn list_all(&self) -> StoreResult<Vec<Task>>;

    /// Merge the supplied fields into an existing task.
    fn update_by_id(&self, id: u64, patch: TaskPatch) -> StoreResult<Task>;

    /// Remove a task. Fails with `NotFound` when the id does not exist.
    fn delete_by_id(&self, id: u64) -> StoreResult<()>;
}

/// In-memory form of the JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    pub tasks: Vec<Task>,
    /// Next id to hand out. Never decreases, so deleted ids are not reused.
    #[serde(default)]
    pub next_id: u64,
}

impl Database {
    /// Load the document from a JSON file. A missing file is an empty database.
    pub fn load(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Database::default());
        }
        let mut buf = String::new();
        File::open(path)?.read_to_string(&mut buf)?;
        let mut db: Database = serde_json::from_str(&buf)?;
        // Documents written by hand may lack the counter.
        db.next_id = db.next_id.max(db.max_id() + 1);
        Ok(db)
    }

    /// Save the document using an atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let tmp = path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(self)?;
        let mut f = File::create(&tmp)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn max_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0)
    }

    /// Reserve the next task id.
    pub fn allocate_id(&mut self) -> u64 {
        let id = self.next_id.max(self.max_id() + 1);
        self.next_id = id + 1;
        id
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by id.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Insert a new task built from a create request.
    pub fn insert(&mut self, new: NewTask) -> StoreResult<Task> {
        let title = match new.title {
            Some(title) if !is_blank(&title) => title,
            _ => return Err(StoreError::title_required()),
        };
        let now = Utc::now();
        let task = Task {
            id: self.allocate_id(),
            title,
            description: new.description.unwrap_or_default(),
            status: new.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Apply the fields present in `patch` to the task with `id`.
    pub fn apply_patch(&mut self, id: u64, patch: TaskPatch) -> StoreResult<Task> {
        if patch.title.as_deref().is_some_and(is_blank) {
            return Err(StoreError::title_required());
        }
        let task = self.get_mut(id).ok_or(StoreError::NotFound(id))?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    /// Remove the task with `id`.
    pub fn remove(&mut self, id: u64) -> StoreResult<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

/// JSON-file backed store. `path: None` keeps everything in memory.
#[derive(Debug)]
pub struct FileStore {
    path: Option<PathBuf>,
    db: Mutex<Database>,
}

impl FileStore {
    /// Open (or create) the document at `path`.
    ///
    /// Fails when the file exists but cannot be read or parsed, so a corrupt
    /// document is never silently replaced by an empty board.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let db = Database::load(path)?;
        if !path.exists() {
            db.save(path)?;
        }
        tracing::info!(path = %path.display(), tasks = db.tasks.len(), "opened task store");
        Ok(FileStore {
            path: Some(path.to_path_buf()),
            db: Mutex::new(db),
        })
    }

    /// A store that never touches the filesystem.
    pub fn in_memory() -> Self {
        FileStore {
            path: None,
            db: Mutex::new(Database::default()),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Database>> {
        self.db
            .lock()
            .map_err(|_| StoreError::Storage("store lock poisoned".to_string()))
    }

    /// Run `op` against a copy of the document, persist it, then commit.
    /// Nothing changes if either the operation or the write fails.
    fn mutate<T>(&self, op: impl FnOnce(&mut Database) -> StoreResult<T>) -> StoreResult<T> {
        let mut guard = self.lock()?;
        let mut draft = guard.clone();
        let out = op(&mut draft)?;
        if let Some(path) = &self.path {
            draft.save(path)?;
        }
        *guard = draft;
        Ok(out)
    }
}

impl TaskStore for FileStore {
    fn create(&self, new: NewTask) -> StoreResult<Task> {
        let task = self.mutate(|db| db.insert(new))?;
        tracing::debug!(id = task.id, status = task.status.as_str(), "created task");
        Ok(task)
    }

    fn list_all(&self) -> StoreResult<Vec<Task>> {
        Ok(self.lock()?.tasks.clone())
    }

    fn update_by_id(&self, id: u64, patch: TaskPatch) -> StoreResult<Task> {
        let task = self.mutate(|db| db.apply_patch(id, patch))?;
        tracing::debug!(id, status = task.status.as_str(), "updated task");
        Ok(task)
    }

    fn delete_by_id(&self, id: u64) -> StoreResult<()> {
        self.mutate(|db| db.remove(id))?;
        tracing::debug!(id, "deleted task");
        Ok(())
    }
}

/// Format a task status for display.
pub fn format_status(s: Status) -> &'static str {
    s.title()
}

/// Print tasks in a formatted table grouped by column.
pub fn print_table(tasks: &[Task]) {
    println!("{:<5} {:<12} {:<30} {}", "ID", "Status", "Title", "Description");
    for status in Status::ALL {
        for t in tasks.iter().filter(|t| t.status == status) {
            println!(
                "{:<5} {:<12} {:<30} {}",
                t.id,
                format_status(t.status),
                truncate(&t.title, 30),
                truncate(&t.description, 40)
            );
        }
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
