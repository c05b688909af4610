use moka::notification::RemovalCause;
use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use super::classroom::{ClassError, ClassSession};
use crate::models::ClassKind;

/// Rerolls before `create` gives up on finding an unused class code.
const MAX_ID_ATTEMPTS: usize = 32;

/// Live classes by class code.
///
/// Nothing caps how many classes can be live at once, and anyone who knows a
/// class code can close it.
pub struct ClassRegistry {
    classes: Cache<String, Arc<ClassSession>>,
    id_length: usize,
}

impl ClassRegistry {
    /// `idle_timeout` evicts classes that have not been looked up for that long.
    /// With `None` classes live until closed.
    pub fn new(id_length: usize, idle_timeout: Option<Duration>) -> Self {
        let mut builder = Cache::builder().eviction_listener(
            |class_id: Arc<String>, _class: Arc<ClassSession>, cause: RemovalCause| {
                if cause == RemovalCause::Expired {
                    info!("Class {} expired after being idle", class_id);
                }
            },
        );
        if let Some(idle) = idle_timeout {
            builder = builder.time_to_idle(idle);
        }
        Self {
            classes: builder.build(),
            id_length: id_length.clamp(1, 32),
        }
    }

    /// Create a class and return its freshly generated code.
    pub fn create(&self, password: &str, kind: ClassKind) -> Result<String, ClassError> {
        let id_length = self.id_length;
        self.create_with(password, kind, || generate_class_id(id_length))
    }

    fn create_with(
        &self,
        password: &str,
        kind: ClassKind,
        mut next_id: impl FnMut() -> String,
    ) -> Result<String, ClassError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let class_id = next_id();
            let entry = self
                .classes
                .entry(class_id.clone())
                .or_insert_with(|| Arc::new(ClassSession::new(class_id.clone(), password, kind)));
            if entry.is_fresh() {
                info!("Created {} class {}", kind, class_id);
                return Ok(class_id);
            }
        }
        Err(ClassError::ClassIdExhausted(MAX_ID_ATTEMPTS))
    }

    /// Remove a class if it exists. Returns whether it did.
    pub fn close(&self, class_id: &str) -> bool {
        let existed = self.classes.remove(class_id).is_some();
        if existed {
            info!("Closed class {}", class_id);
        }
        existed
    }

    pub fn lookup(&self, class_id: &str) -> Option<Arc<ClassSession>> {
        self.classes.get(class_id)
    }

    /// Like [`Self::lookup`], failing with `ClassNotFound` for an unknown code.
    pub fn find(&self, class_id: &str) -> Result<Arc<ClassSession>, ClassError> {
        self.lookup(class_id).ok_or(ClassError::ClassNotFound)
    }

    pub fn active_count(&self) -> u64 {
        self.classes.run_pending_tasks();
        self.classes.entry_count()
    }

    pub fn clear(&self) {
        self.classes.invalidate_all();
        self.classes.run_pending_tasks();
    }
}

fn generate_class_id(len: usize) -> String {
    Uuid::new_v4().simple().to_string().chars().take(len).collect()
}
