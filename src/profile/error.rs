use thiserror::Error;

use crate::calendar::HolidayError;
use crate::time_index::TimeIndexError;

/// Errors raised while validating options or generating a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Malformed factors, group sets or demand.
    #[error("configuration error: {field}: {message}")]
    Configuration { field: String, message: String },

    /// The raw factors sum to zero, so the profile cannot be normalized.
    #[error("degenerate profile: raw weights over {steps} steps sum to zero")]
    Degenerate { steps: usize },

    #[error("invalid time index: {0}")]
    TimeIndex(#[from] TimeIndexError),

    #[error(transparent)]
    Holidays(#[from] HolidayError),
}

impl ProfileError {
    pub(crate) fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted path of the offending option, for configuration errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Configuration { field, .. } => Some(field),
            _ => None,
        }
    }
}
