use std::{fmt, str::FromStr};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainParseError;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(JobId);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Applied,
    Interview,
    Offer,
    Rejected,
}

/// Badge colours used when rendering a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPalette {
    pub background: &'static str,
    pub text: &'static str,
}

impl JobStatus {
    /// Display order for summaries and pickers.
    pub const ALL: [JobStatus; 4] = [
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Offer,
        JobStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Applied => "applied",
            JobStatus::Interview => "interview",
            JobStatus::Offer => "offer",
            JobStatus::Rejected => "rejected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "Interview",
            JobStatus::Offer => "Offer",
            JobStatus::Rejected => "Rejected",
        }
    }

    pub fn palette(self) -> StatusPalette {
        let (background, text) = match self {
            JobStatus::Applied => ("#dbeafe", "#1e40af"),
            JobStatus::Interview => ("#fef3c7", "#d97706"),
            JobStatus::Offer => ("#d1fae5", "#059669"),
            JobStatus::Rejected => ("#fee2e2", "#dc2626"),
        };
        StatusPalette { background, text }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainParseError::UnknownStatus(s.to_string()))
    }
}

/// A tracked job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub id: JobId,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub salary: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    pub applied_date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "empty_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub follow_up_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub contact_email: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_url: Option<String>,
}

impl JobApplication {
    pub fn from_draft(id: JobId, draft: JobDraft) -> Self {
        Self {
            id,
            company: draft.company,
            position: draft.position,
            location: draft.location,
            salary: draft.salary,
            status: draft.status,
            applied_date: draft.applied_date,
            follow_up_date: draft.follow_up_date,
            notes: draft.notes,
            contact_email: draft.contact_email,
            job_url: draft.job_url,
        }
    }

    pub fn to_draft(&self) -> JobDraft {
        JobDraft {
            company: self.company.clone(),
            position: self.position.clone(),
            location: self.location.clone(),
            salary: self.salary.clone(),
            status: self.status,
            applied_date: self.applied_date,
            follow_up_date: self.follow_up_date,
            notes: self.notes.clone(),
            contact_email: self.contact_email.clone(),
            job_url: self.job_url.clone(),
        }
    }
}

/// Form values for a record that has not been committed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub status: JobStatus,
    pub applied_date: NaiveDate,
    pub follow_up_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub contact_email: Option<String>,
    pub job_url: Option<String>,
}

impl JobDraft {
    pub fn blank(applied_date: NaiveDate) -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            location: None,
            salary: None,
            status: JobStatus::default(),
            applied_date,
            follow_up_date: None,
            notes: None,
            contact_email: None,
            job_url: None,
        }
    }

    /// Collapses empty optional text to `None` so stored records match
    /// what a later import reads back.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.location,
            &mut self.salary,
            &mut self.notes,
            &mut self.contact_email,
            &mut self.job_url,
        ] {
            if field.as_deref().is_some_and(|v| v.is_empty()) {
                *field = None;
            }
        }
        self
    }
}

impl Default for JobDraft {
    fn default() -> Self {
        Self::blank(Utc::now().date_naive())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

impl StatusFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        }
    }

    pub fn matches(self, status: JobStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<JobStatus>()
            .map(StatusFilter::Only)
            .map_err(|_| DomainParseError::UnknownFilter(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    AppliedDate,
    Company,
    Status,
    /// Keeps records in collection order.
    Unsorted,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::AppliedDate => "appliedDate",
            SortKey::Company => "company",
            SortKey::Status => "status",
            SortKey::Unsorted => "none",
        }
    }

    /// Unknown keys map to [`SortKey::Unsorted`] instead of failing.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(SortKey::Unsorted)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "appliedDate" | "applied_date" | "applied-date" => Ok(SortKey::AppliedDate),
            "company" => Ok(SortKey::Company),
            "status" => Ok(SortKey::Status),
            "none" => Ok(SortKey::Unsorted),
            other => Err(DomainParseError::UnknownSortKey(other.to_string())),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.is_empty()))
}

fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
