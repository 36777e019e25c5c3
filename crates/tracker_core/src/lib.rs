use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use shared::{
    domain::{JobApplication, JobDraft, JobId, JobStatus, SortKey, StatusFilter},
    error::ImportError,
};
use storage::KeyValueStore;
use tracing::{debug, info, warn};

pub mod intent;
pub mod sample;
pub mod snapshot;
pub mod views;

pub use intent::{CommitOutcome, Confirmation, ConfirmedIntent, IntentAction, PendingIntent};
pub use snapshot::{read_snapshot_file, write_snapshot, Snapshot};

pub const JOBS_KEY: &str = "jobTrackerJobs";
pub const FILTER_KEY: &str = "jobTrackerFilter";
pub const SORT_KEY: &str = "jobTrackerSort";
pub const DEFAULT_REMINDER_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(JobId),
    Updated(JobId),
    /// The record being edited no longer exists; nothing was written.
    Missing(JobId),
}

/// Owns the job collection, the view preferences and the in-progress draft.
/// Every mutation goes through a method here and is mirrored to the
/// key-value store; store failures are logged and otherwise ignored.
pub struct JobTracker {
    store: Arc<dyn KeyValueStore>,
    jobs: Vec<JobApplication>,
    filter: StatusFilter,
    sort: SortKey,
    draft: JobDraft,
    editing: Option<JobId>,
    last_issued_id: i64,
    reminder_window_days: i64,
}

impl JobTracker {
    /// Restores state from `store`. Missing or unreadable jobs fall back to
    /// the sample set; unreadable preferences fall back to defaults.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let jobs = load_jobs(store.as_ref()).await;
        let filter: StatusFilter =
            load_preference(store.as_ref(), FILTER_KEY, |raw| raw.parse().ok())
                .await
                .unwrap_or_default();
        let sort = load_preference(store.as_ref(), SORT_KEY, |raw| {
            Some(SortKey::parse_lenient(raw))
        })
        .await
        .unwrap_or_default();

        info!(
            jobs = jobs.len(),
            filter = filter.as_str(),
            sort = sort.as_str(),
            "tracker: state loaded"
        );

        let tracker = Self {
            store,
            jobs,
            filter,
            sort,
            draft: JobDraft::default(),
            editing: None,
            last_issued_id: 0,
            reminder_window_days: DEFAULT_REMINDER_WINDOW_DAYS,
        };
        tracker.persist_jobs().await;
        tracker
    }

    pub fn with_reminder_window(mut self, days: i64) -> Self {
        self.reminder_window_days = days.max(0);
        self
    }

    pub fn jobs(&self) -> &[JobApplication] {
        &self.jobs
    }

    pub fn get(&self, id: JobId) -> Option<&JobApplication> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub async fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.persist_value(FILTER_KEY, filter.as_str()).await;
    }

    pub async fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.persist_value(SORT_KEY, sort.as_str()).await;
    }

    /// Appends `draft` under a fresh id. No field validation happens here;
    /// required fields are the caller's concern.
    pub async fn create(&mut self, draft: JobDraft) -> JobId {
        let id = self.next_id();
        self.jobs.push(JobApplication::from_draft(id, draft.normalized()));
        debug!(job_id = id.0, "tracker: job created");
        self.persist_jobs().await;
        id
    }

    /// Replaces every field of record `id` with `draft`, keeping the id.
    /// Returns false when no such record exists.
    pub async fn update(&mut self, id: JobId, draft: JobDraft) -> bool {
        let Some(slot) = self.jobs.iter_mut().find(|job| job.id == id) else {
            debug!(job_id = id.0, "tracker: update skipped for unknown job");
            return false;
        };
        *slot = JobApplication::from_draft(id, draft.normalized());
        debug!(job_id = id.0, "tracker: job updated");
        self.persist_jobs().await;
        true
    }

    /// Replaces the whole collection, as done by a confirmed import.
    pub async fn replace_all(&mut self, records: Vec<JobApplication>) {
        self.jobs = records;
        self.editing = None;
        info!(jobs = self.jobs.len(), "tracker: collection replaced");
        self.persist_jobs().await;
    }

    pub fn request_delete(&self, id: JobId) -> Option<PendingIntent> {
        self.get(id).map(|_| PendingIntent::delete(id))
    }

    pub fn request_clear(&self) -> PendingIntent {
        PendingIntent::clear_all()
    }

    /// Validates an import payload. Nothing changes until the returned
    /// intent is confirmed and committed.
    pub fn import_snapshot(&self, blob: &str) -> Result<PendingIntent, ImportError> {
        match snapshot::parse_snapshot(blob) {
            Ok(records) => {
                debug!(records = records.len(), "import: payload accepted");
                Ok(PendingIntent::replace_all(records))
            }
            Err(err) => {
                warn!(kind = err.kind(), "import: payload rejected: {err}");
                Err(err)
            }
        }
    }

    pub async fn commit(&mut self, intent: ConfirmedIntent) -> CommitOutcome {
        match intent.into_action() {
            IntentAction::Delete(id) => {
                if self.delete(id).await {
                    CommitOutcome::Deleted(id)
                } else {
                    CommitOutcome::NotFound(id)
                }
            }
            IntentAction::ClearAll => CommitOutcome::Cleared {
                removed: self.clear().await,
            },
            IntentAction::ReplaceAll(records) => {
                let count = records.len();
                self.replace_all(records).await;
                CommitOutcome::Replaced { count }
            }
        }
    }

    /// Serializes the full collection; the filename carries today's UTC date.
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        snapshot::build_snapshot(&self.jobs, Utc::now().date_naive())
    }

    pub fn filtered_and_sorted(&self) -> Vec<&JobApplication> {
        views::filter_and_sort(&self.jobs, self.filter, self.sort)
    }

    pub fn upcoming_reminders(&self) -> Vec<&JobApplication> {
        self.upcoming_reminders_on(Utc::now().date_naive())
    }

    pub fn upcoming_reminders_on(&self, today: NaiveDate) -> Vec<&JobApplication> {
        views::upcoming_reminders(&self.jobs, today, self.reminder_window_days)
    }

    pub fn status_counts(&self) -> Vec<(JobStatus, usize)> {
        views::status_counts(&self.jobs)
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut JobDraft {
        &mut self.draft
    }

    /// Id of the record the draft was loaded from, if editing.
    pub fn editing(&self) -> Option<JobId> {
        self.editing
    }

    pub fn begin_create(&mut self) {
        self.draft = JobDraft::default();
        self.editing = None;
    }

    pub fn begin_edit(&mut self, id: JobId) -> bool {
        let Some(draft) = self.get(id).map(JobApplication::to_draft) else {
            return false;
        };
        self.draft = draft;
        self.editing = Some(id);
        true
    }

    pub fn cancel_draft(&mut self) {
        self.begin_create();
    }

    /// Commits the draft as a new record or as an edit, then resets it.
    pub async fn submit_draft(&mut self) -> SubmitOutcome {
        let draft = std::mem::take(&mut self.draft);
        match self.editing.take() {
            Some(id) => {
                if self.update(id, draft).await {
                    SubmitOutcome::Updated(id)
                } else {
                    SubmitOutcome::Missing(id)
                }
            }
            None => SubmitOutcome::Created(self.create(draft).await),
        }
    }

    async fn delete(&mut self, id: JobId) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        if self.jobs.len() == before {
            return false;
        }
        if self.editing == Some(id) {
            self.begin_create();
        }
        debug!(job_id = id.0, "tracker: job deleted");
        self.persist_jobs().await;
        true
    }

    async fn clear(&mut self) -> usize {
        let removed = self.jobs.len();
        self.jobs.clear();
        self.filter = StatusFilter::default();
        self.sort = SortKey::default();
        self.begin_create();

        for key in [FILTER_KEY, SORT_KEY] {
            if let Err(err) = self.store.remove(key).await {
                warn!(key, "persist: failed to remove key: {err:#}");
            }
        }
        // An empty saved collection keeps the sample set from coming back.
        self.persist_jobs().await;
        info!(removed, "tracker: all data cleared");
        removed
    }

    fn next_id(&mut self) -> JobId {
        let now = Utc::now().timestamp_millis();
        let floor = self
            .jobs
            .iter()
            .map(|job| job.id.0)
            .max()
            .unwrap_or(0)
            .max(self.last_issued_id);
        let id = if now > floor { now } else { floor + 1 };
        self.last_issued_id = id;
        JobId(id)
    }

    async fn persist_jobs(&self) {
        match serde_json::to_string(&self.jobs) {
            Ok(payload) => self.persist_value(JOBS_KEY, &payload).await,
            Err(err) => warn!("persist: failed to serialize job applications: {err}"),
        }
    }

    async fn persist_value(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value).await {
            warn!(key, "persist: failed to save key: {err:#}");
        }
    }
}

async fn load_jobs(store: &dyn KeyValueStore) -> Vec<JobApplication> {
    match store.get(JOBS_KEY).await {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<JobApplication>>(&raw) {
            Ok(jobs) => jobs,
            Err(err) => {
                warn!("tracker: discarding unreadable saved jobs: {err}");
                sample::sample_jobs()
            }
        },
        Ok(None) => sample::sample_jobs(),
        Err(err) => {
            warn!("tracker: failed to load saved jobs: {err:#}");
            sample::sample_jobs()
        }
    }
}

async fn load_preference<T>(
    store: &dyn KeyValueStore,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    match store.get(key).await {
        Ok(Some(raw)) => {
            let parsed = parse(&raw);
            if parsed.is_none() {
                warn!(key, value = %raw, "tracker: ignoring unrecognized saved preference");
            }
            parsed
        }
        Ok(None) => None,
        Err(err) => {
            warn!(key, "tracker: failed to load preference: {err:#}");
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
