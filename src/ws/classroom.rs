use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::{Mutex, MutexGuard};

use super::codeshare::{CodeshareData, CodeshareSnapshot};
use super::connctx::{ConnHandle, ConnId};
use super::pollshare::{PollshareData, PollshareSnapshot, Tally};
use crate::auth::password::Secret;
use crate::models::ClassKind;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassError {
    #[error("class code not found")]
    ClassNotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("'{0}' is not an option of the current poll")]
    InvalidOption(String),
    #[error("submissions are disabled")]
    SubmissionsDisabled,
    /// Guard in the variant accessors; requests are already filtered by class kind when parsed.
    #[error("operation is not supported by a {0} class")]
    KindMismatch(ClassKind),
    #[error("no unused class code found after {0} attempts")]
    ClassIdExhausted(usize),
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Enabled,
    Disabled,
}

impl SubmissionState {
    pub fn toggled(self) -> Self {
        match self {
            SubmissionState::Enabled => SubmissionState::Disabled,
            SubmissionState::Disabled => SubmissionState::Enabled,
        }
    }
}

/// Full state of a class as sent to a newly subscribed connection.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Snapshot {
    Codeshare(CodeshareSnapshot),
    Pollshare(PollshareSnapshot),
}

/// The `submissionList` payload: code submissions or the poll tally.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SubmissionList {
    Codeshare(Vec<Value>),
    Pollshare(Tally),
}

#[derive(Debug)]
pub enum ClassData {
    Codeshare(CodeshareData),
    Pollshare(PollshareData),
}

/// One live classroom. All reads and writes go through [`ClassSession::lock`],
/// so an authenticate, mutate, broadcast sequence run under one guard is
/// never interleaved with another message for the same class.
#[derive(Debug)]
pub struct ClassSession {
    id: String,
    kind: ClassKind,
    created_at: DateTime<Utc>,
    state: Mutex<ClassState>,
}

impl ClassSession {
    pub fn new(id: impl Into<String>, password: &str, kind: ClassKind) -> Self {
        Self {
            id: id.into(),
            kind,
            created_at: Utc::now(),
            state: Mutex::new(ClassState::new(password, kind)),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub async fn lock(&self) -> MutexGuard<'_, ClassState> {
        self.state.lock().await
    }
}

#[derive(Debug)]
pub struct ClassState {
    secret: Secret,
    submission_state: SubmissionState,
    subscribers: HashMap<ConnId, ConnHandle>,
    data: ClassData,
}

impl ClassState {
    pub fn new(password: &str, kind: ClassKind) -> Self {
        let data = match kind {
            ClassKind::Codeshare => ClassData::Codeshare(CodeshareData::default()),
            ClassKind::Pollshare => ClassData::Pollshare(PollshareData::default()),
        };
        Self {
            secret: Secret::new(password),
            submission_state: SubmissionState::Enabled,
            subscribers: HashMap::new(),
            data,
        }
    }

    pub fn kind(&self) -> ClassKind {
        match self.data {
            ClassData::Codeshare(_) => ClassKind::Codeshare,
            ClassData::Pollshare(_) => ClassKind::Pollshare,
        }
    }

    pub fn data(&self) -> &ClassData {
        &self.data
    }

    pub fn authenticate(&self, password: &str) -> bool {
        self.secret.matches(password)
    }

    pub(super) fn authorize(&self, password: &str) -> Result<(), ClassError> {
        if self.authenticate(password) {
            Ok(())
        } else {
            Err(ClassError::Unauthorized)
        }
    }

    pub(super) fn ensure_accepting(&self) -> Result<(), ClassError> {
        match self.submission_state {
            SubmissionState::Enabled => Ok(()),
            SubmissionState::Disabled => Err(ClassError::SubmissionsDisabled),
        }
    }

    pub(super) fn codeshare_mut(&mut self) -> Result<&mut CodeshareData, ClassError> {
        match &mut self.data {
            ClassData::Codeshare(data) => Ok(data),
            ClassData::Pollshare(_) => Err(ClassError::KindMismatch(ClassKind::Pollshare)),
        }
    }

    pub(super) fn pollshare_mut(&mut self) -> Result<&mut PollshareData, ClassError> {
        match &mut self.data {
            ClassData::Pollshare(data) => Ok(data),
            ClassData::Codeshare(_) => Err(ClassError::KindMismatch(ClassKind::Codeshare)),
        }
    }

    /// Returns false if the connection was already subscribed.
    pub fn subscribe(&mut self, conn: ConnHandle) -> bool {
        match self.subscribers.entry(conn.id()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(conn);
                true
            }
        }
    }

    /// Returns false if the connection was not subscribed.
    pub fn unsubscribe(&mut self, id: ConnId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    pub fn is_subscribed(&self, id: ConnId) -> bool {
        self.subscribers.contains_key(&id)
    }

    pub fn subscribers(&self) -> impl Iterator<Item = &ConnHandle> {
        self.subscribers.values()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission_state
    }

    pub fn toggle_submission_state(&mut self) -> SubmissionState {
        self.submission_state = self.submission_state.toggled();
        self.submission_state
    }

    /// Password-gated [`Self::toggle_submission_state`].
    pub fn switch_submission_state(&mut self, password: &str) -> Result<SubmissionState, ClassError> {
        self.authorize(password)?;
        Ok(self.toggle_submission_state())
    }

    /// Empty the code submissions, or zero every poll count.
    pub fn clear_submissions(&mut self, password: &str) -> Result<(), ClassError> {
        self.authorize(password)?;
        match &mut self.data {
            ClassData::Codeshare(data) => data.clear_submissions(),
            ClassData::Pollshare(data) => data.clear_submissions(),
        }
        Ok(())
    }

    pub fn submission_list(&self) -> SubmissionList {
        match &self.data {
            ClassData::Codeshare(data) => SubmissionList::Codeshare(data.submissions().to_vec()),
            ClassData::Pollshare(data) => SubmissionList::Pollshare(data.tally().clone()),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match &self.data {
            ClassData::Codeshare(data) => Snapshot::Codeshare(data.snapshot(self.submission_state)),
            ClassData::Pollshare(data) => Snapshot::Pollshare(data.snapshot(self.submission_state)),
        }
    }
}
