//! Errors raised by the generators and derived views.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Invalid year range {start}..={end}: start year is after end year")]
    InvertedRange { start: i32, end: i32 },

    #[error("Year range {start}..={end} is outside the supported horizon {first}..={last}")]
    OutsideHorizon {
        start: i32,
        end: i32,
        first: i32,
        last: i32,
    },

    #[error("Year {year} is not part of the generated range {start}..={end}")]
    YearNotInRange { year: i32, start: i32, end: i32 },

    #[error("Invalid calendar date: {0}")]
    InvalidDate(#[from] time::error::ComponentRange),
}

impl GenerationError {
    /// True for the errors caused by a bad year range in the request.
    pub fn is_invalid_range(&self) -> bool {
        matches!(
            self,
            GenerationError::InvertedRange { .. } | GenerationError::OutsideHorizon { .. }
        )
    }
}
