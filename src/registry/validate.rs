//! Precondition checks shared by the registry operations.
//!
//! Every failure is an [`AppError::InvalidArgument`] carrying a message that
//! can be shown to the end user as-is.

use std::ops::RangeInclusive;

use crate::error::{AppError, AppResult};

pub const NAME_LENGTH: RangeInclusive<usize> = 3..=20;
pub const DESCRIPTION_LENGTH: RangeInclusive<usize> = 3..=250;
pub const POLLING_INTERVAL_SECONDS: RangeInclusive<i32> = 10..=40;

pub(crate) fn require_non_empty(value: &str, message: &str) -> AppResult<()> {
    if value.is_empty() {
        return Err(AppError::InvalidArgument(message.to_string()));
    }
    Ok(())
}

pub(crate) fn require_positive<T>(value: T, message: &str) -> AppResult<()>
where
    T: PartialOrd + Default,
{
    if value <= T::default() {
        return Err(AppError::InvalidArgument(message.to_string()));
    }
    Ok(())
}

/// Inclusive on both ends. `NaN` never lies inside a range.
pub(crate) fn require_in_range<T>(value: T, range: &RangeInclusive<T>, message: &str) -> AppResult<()>
where
    T: PartialOrd,
{
    if !range.contains(&value) {
        return Err(AppError::InvalidArgument(message.to_string()));
    }
    Ok(())
}

/// Length in characters, not bytes.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_empty_string() {
        assert!(require_non_empty("u1", "id").is_ok());
        let err = require_non_empty("", "Id cannot be null!").unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(ref msg) if msg == "Id cannot be null!"));
    }

    #[test]
    fn positive_rejects_zero_and_negatives() {
        assert!(require_positive(1_i32, "id").is_ok());
        assert!(require_positive(0_i32, "id").is_err());
        assert!(require_positive(-4_i32, "id").is_err());
        assert!(require_positive(0_u64, "page").is_err());
    }

    #[test]
    fn range_is_inclusive() {
        assert!(require_in_range(3, &NAME_LENGTH, "name").is_ok());
        assert!(require_in_range(20, &NAME_LENGTH, "name").is_ok());
        assert!(require_in_range(2, &NAME_LENGTH, "name").is_err());
        assert!(require_in_range(21, &NAME_LENGTH, "name").is_err());

        assert!(require_in_range(10, &POLLING_INTERVAL_SECONDS, "interval").is_ok());
        assert!(require_in_range(40, &POLLING_INTERVAL_SECONDS, "interval").is_ok());
        assert!(require_in_range(9, &POLLING_INTERVAL_SECONDS, "interval").is_err());
        assert!(require_in_range(41, &POLLING_INTERVAL_SECONDS, "interval").is_err());
    }

    #[test]
    fn nan_is_out_of_range() {
        assert!(require_in_range(f64::NAN, &(10.0..=20.0), "min").is_err());
    }

    #[test]
    fn char_len_counts_characters() {
        assert_eq!(char_len("Küche"), 5);
        assert_eq!("Küche".len(), 6);
    }
}
