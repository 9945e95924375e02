use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observation from a single scripted HTTP request.
///
/// `redirect_target` is only populated when the response carried a
/// redirection status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub status_code: u16,
    pub redirect_target: Option<String>,
}

/// Columns identified as holding coordinate values, in their original casing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateColumns {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl CoordinateColumns {
    /// Both axes were resolved to a column
    pub fn is_complete(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Whether a check met its expectations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Passed,
    Failed,
}

/// Summary produced by a finished check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub check_name: String,
    pub status: CheckStatus,
    /// One line per observation, in the order they were made
    pub details: Vec<String>,
    pub finished_at: DateTime<Utc>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }
}

/// Core trait that all verification checks implement
#[async_trait::async_trait]
pub trait VerificationCheck: Send + Sync {
    /// Unique identifier for this check
    fn check_name(&self) -> &'static str;

    /// Whether a failure of this check should fail the whole process.
    /// The coordinate detector reports failures without setting an exit code.
    fn affects_exit_code(&self) -> bool {
        true
    }

    /// Execute the check, printing its transcript as it goes
    async fn run(&self) -> Result<CheckOutcome>;
}
