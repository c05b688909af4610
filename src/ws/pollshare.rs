use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

use super::classroom::{ClassError, ClassState, SubmissionState};

/// Vote counts keyed by option label, in poll option order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: Vec<(String, u64)>,
}

impl Tally {
    pub fn zeroed(options: &[String]) -> Self {
        Self {
            counts: options.iter().map(|option| (option.clone(), 0)).collect(),
        }
    }

    pub fn get(&self, option: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(label, _)| label == option)
            .map(|(_, count)| *count)
    }

    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.counts.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn increment(&mut self, option: &str) -> Result<u64, ClassError> {
        match self.counts.iter_mut().find(|(label, _)| label == option) {
            Some((_, count)) => {
                *count += 1;
                Ok(*count)
            }
            None => Err(ClassError::InvalidOption(option.to_string())),
        }
    }

    fn reset(&mut self) {
        for (_, count) in self.counts.iter_mut() {
            *count = 0;
        }
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (label, count) in &self.counts {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Current poll question, its options and the running tally.
#[derive(Debug, Default)]
pub struct PollshareData {
    poll_question: String,
    options: Vec<String>,
    tally: Tally,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct PollshareSnapshot {
    pub poll_question: String,
    pub options: Vec<String>,
    pub submissions: Tally,
    pub submission_state: SubmissionState,
}

/// The `poll` payload
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct PollData {
    pub poll_question: String,
    pub options: Vec<String>,
    pub submissions: Tally,
}

impl PollshareData {
    pub fn poll_question(&self) -> &str {
        &self.poll_question
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub(super) fn clear_submissions(&mut self) {
        self.tally.reset();
    }

    pub(super) fn snapshot(&self, submission_state: SubmissionState) -> PollshareSnapshot {
        PollshareSnapshot {
            poll_question: self.poll_question.clone(),
            options: self.options.clone(),
            submissions: self.tally.clone(),
            submission_state,
        }
    }

    fn poll_data(&self) -> PollData {
        PollData {
            poll_question: self.poll_question.clone(),
            options: self.options.clone(),
            submissions: self.tally.clone(),
        }
    }
}

/// Keep the first occurrence of each label.
fn distinct(options: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    options
        .into_iter()
        .filter(|option| seen.insert(option.clone()))
        .collect()
}

impl ClassState {
    /// Replace the question and options. The tally restarts at zero for exactly
    /// the new options, even where labels overlap with the old poll.
    pub fn set_poll(
        &mut self,
        password: &str,
        poll_question: impl Into<String>,
        options: Vec<String>,
    ) -> Result<PollData, ClassError> {
        self.authorize(password)?;
        let data = self.pollshare_mut()?;
        let options = distinct(options);
        data.tally = Tally::zeroed(&options);
        data.options = options;
        data.poll_question = poll_question.into();
        Ok(data.poll_data())
    }

    /// Count one vote for `option`.
    pub fn record_vote(&mut self, option: &str) -> Result<&Tally, ClassError> {
        self.ensure_accepting()?;
        let data = self.pollshare_mut()?;
        data.tally.increment(option)?;
        Ok(&data.tally)
    }
}
