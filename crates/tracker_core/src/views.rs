//! Derived, read-only views over the job collection.

use std::cmp::Ordering;

use chrono::NaiveDate;
use shared::domain::{JobApplication, JobStatus, SortKey, StatusFilter};

/// Applies `filter` then orders by `sort`. Sorting is stable, so ties and
/// [`SortKey::Unsorted`] keep collection order.
pub fn filter_and_sort<'a>(
    jobs: &'a [JobApplication],
    filter: StatusFilter,
    sort: SortKey,
) -> Vec<&'a JobApplication> {
    let mut visible: Vec<&JobApplication> =
        jobs.iter().filter(|job| filter.matches(job.status)).collect();

    match sort {
        SortKey::AppliedDate => visible.sort_by(|a, b| b.applied_date.cmp(&a.applied_date)),
        SortKey::Company => visible.sort_by(|a, b| compare_text(&a.company, &b.company)),
        SortKey::Status => visible.sort_by(|a, b| a.status.as_str().cmp(b.status.as_str())),
        SortKey::Unsorted => {}
    }

    visible
}

/// Case-insensitive ordering. Names differing only in case put the
/// lowercase spelling first ("acme" before "Acme").
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let folded_a = a.to_lowercase();
    let folded_b = b.to_lowercase();
    folded_a.cmp(&folded_b).then_with(|| b.cmp(a))
}

/// Records whose follow-up date is between `today` and `today + window_days`,
/// both ends inclusive.
pub fn upcoming_reminders(
    jobs: &[JobApplication],
    today: NaiveDate,
    window_days: i64,
) -> Vec<&JobApplication> {
    jobs.iter()
        .filter(|job| {
            job.follow_up_date
                .map(|follow_up| (0..=window_days).contains(&(follow_up - today).num_days()))
                .unwrap_or(false)
        })
        .collect()
}

/// Per-status totals in [`JobStatus::ALL`] order.
pub fn status_counts(jobs: &[JobApplication]) -> Vec<(JobStatus, usize)> {
    JobStatus::ALL
        .into_iter()
        .map(|status| {
            let count = jobs.iter().filter(|job| job.status == status).count();
            (status, count)
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
