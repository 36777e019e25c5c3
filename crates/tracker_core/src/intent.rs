//! Two-phase confirmation for destructive or replacing operations.
//!
//! A request produces a [`PendingIntent`]; each [`PendingIntent::confirm`]
//! answers one prompt, and only a fully confirmed [`ConfirmedIntent`] can be
//! committed by the tracker. Dropping or aborting an intent leaves state as
//! it was.

use shared::domain::{JobApplication, JobId};
use tracing::debug;

const DELETE_PROMPTS: &[&str] = &["Are you sure you want to delete this job application?"];
const CLEAR_PROMPTS: &[&str] = &[
    "Are you sure you want to delete ALL job applications? This cannot be undone.",
    "This will permanently delete all your data. Are you absolutely sure?",
];
const REPLACE_PROMPTS: &[&str] = &["This will replace all current data. Continue?"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentAction {
    Delete(JobId),
    ClearAll,
    ReplaceAll(Vec<JobApplication>),
}

impl IntentAction {
    fn name(&self) -> &'static str {
        match self {
            IntentAction::Delete(_) => "delete",
            IntentAction::ClearAll => "clear_all",
            IntentAction::ReplaceAll(_) => "replace_all",
        }
    }
}

#[derive(Debug)]
#[must_use = "an intent has no effect until it is confirmed and committed"]
pub struct PendingIntent {
    action: IntentAction,
    prompts: &'static [&'static str],
    answered: usize,
}

impl PendingIntent {
    pub(crate) fn delete(id: JobId) -> Self {
        Self::new(IntentAction::Delete(id), DELETE_PROMPTS)
    }

    pub(crate) fn clear_all() -> Self {
        Self::new(IntentAction::ClearAll, CLEAR_PROMPTS)
    }

    pub(crate) fn replace_all(records: Vec<JobApplication>) -> Self {
        Self::new(IntentAction::ReplaceAll(records), REPLACE_PROMPTS)
    }

    fn new(action: IntentAction, prompts: &'static [&'static str]) -> Self {
        Self {
            action,
            prompts,
            answered: 0,
        }
    }

    pub fn action(&self) -> &IntentAction {
        &self.action
    }

    /// The question that the next confirmation answers.
    pub fn prompt(&self) -> &'static str {
        self.prompts.get(self.answered).copied().unwrap_or_default()
    }

    pub fn remaining_confirmations(&self) -> usize {
        self.prompts.len().saturating_sub(self.answered)
    }

    pub fn confirm(mut self) -> Confirmation {
        self.answered += 1;
        if self.remaining_confirmations() == 0 {
            Confirmation::Ready(ConfirmedIntent {
                action: self.action,
            })
        } else {
            Confirmation::Pending(self)
        }
    }

    pub fn abort(self) {
        debug!(
            action = self.action.name(),
            answered = self.answered,
            "intent: aborted before commit"
        );
    }
}

#[derive(Debug)]
pub enum Confirmation {
    Pending(PendingIntent),
    Ready(ConfirmedIntent),
}

/// Only obtainable by answering every prompt of a [`PendingIntent`].
#[derive(Debug)]
#[must_use = "a confirmed intent must be passed to JobTracker::commit"]
pub struct ConfirmedIntent {
    action: IntentAction,
}

impl ConfirmedIntent {
    pub fn action(&self) -> &IntentAction {
        &self.action
    }

    pub(crate) fn into_action(self) -> IntentAction {
        self.action
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Deleted(JobId),
    /// The record vanished between request and commit.
    NotFound(JobId),
    Cleared { removed: usize },
    Replaced { count: usize },
}
