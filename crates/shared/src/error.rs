use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainParseError {
    #[error("unknown job status '{0}'")]
    UnknownStatus(String),
    #[error("unknown status filter '{0}'")]
    UnknownFilter(String),
    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),
}

/// Failure to turn an import payload into a job collection. The display
/// text is meant to be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Error reading file. Please make sure it's a valid JSON file.")]
    Read(#[source] std::io::Error),
    #[error("Error reading file. Please make sure it's a valid JSON file.")]
    Parse(#[source] serde_json::Error),
    #[error("Invalid file format. Please select a valid JSON file.")]
    NotASequence,
    #[error("Invalid file format. Please select a valid JSON file. (entry {index}: {source})")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid file format. Please select a valid JSON file. (duplicate id {0})")]
    DuplicateId(i64),
}

impl ImportError {
    /// Short machine-friendly tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Read(_) => "read",
            Self::Parse(_) => "parse",
            Self::NotASequence => "not_a_sequence",
            Self::InvalidRecord { .. } => "invalid_record",
            Self::DuplicateId(_) => "duplicate_id",
        }
    }
}
