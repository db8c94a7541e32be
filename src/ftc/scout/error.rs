use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Error type covering the different failure cases that can occur when the
/// service fetches, reshapes, or exports scouting data.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// Wrapper for IO failures such as reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when JSON parsing or serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel writer implementation.
    #[error("Excel write error: {0}")]
    ExcelWrite(#[from] rust_xlsxwriter::XlsxError),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Transport failures talking to the score service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The score service answered with a non-success status.
    #[error("score service returned {status} for team {team_number}")]
    UpstreamStatus { status: u16, team_number: u32 },

    /// Raised when the caller supplies an unusable request.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Raised when a score payload lacks the expected team/events structure.
    #[error("malformed score payload: {0}")]
    MalformedPayload(String),

    /// Raised when no exportable rows survive formatting.
    #[error("No valid match data found!")]
    NoValidData,

    /// Raised when a sheet does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when blocking file work could not be joined.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

/// Coarse classification used to decide how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input; nothing was attempted.
    Validation,
    /// The score service could not be reached or answered badly.
    Upstream,
    /// The pipeline ran but produced nothing to export.
    EmptyResult,
    /// Anything else.
    Internal,
}

impl ScoutError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScoutError::InvalidInput(_) => ErrorKind::Validation,
            ScoutError::Http(_)
            | ScoutError::UpstreamStatus { .. }
            | ScoutError::MalformedPayload(_) => ErrorKind::Upstream,
            ScoutError::NoValidData => ErrorKind::EmptyResult,
            _ => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_and_empty_data_are_caller_errors() {
        assert_eq!(ScoutError::InvalidInput("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(ScoutError::NoValidData.kind(), ErrorKind::EmptyResult);
        assert_eq!(
            ScoutError::InvalidWorkbook("no sheet".into()).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn upstream_failures_are_classified() {
        let error = ScoutError::UpstreamStatus {
            status: 502,
            team_number: 254,
        };
        assert_eq!(error.kind(), ErrorKind::Upstream);
        assert_eq!(error.to_string(), "score service returned 502 for team 254");
    }
}
