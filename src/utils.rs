use crate::config::{MAX_TARGET_MINUTES, MIN_TARGET_MINUTES};
use std::fmt;

/// Why a target duration was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    Empty,
    NotANumber(String),
    OutOfRange { value: i64, min: i64, max: i64 },
}

impl fmt::Display for DurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationError::Empty => write!(f, "Duration cannot be empty"),
            DurationError::NotANumber(raw) => {
                write!(f, "Duration must be a whole number of minutes, got \"{}\"", raw)
            }
            DurationError::OutOfRange { value, min, max } => {
                write!(f, "Duration {} is out of range ({}-{} minutes)", value, min, max)
            }
        }
    }
}

impl std::error::Error for DurationError {}

/// Generic numeric input validation against inclusive bounds.
pub fn validate_numeric_input<T>(input: &str, min: T, max: T) -> Result<T, DurationError>
where
    T: std::str::FromStr + Copy + PartialOrd + Into<i64>,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DurationError::Empty);
    }

    let val: T = trimmed
        .parse()
        .map_err(|_| DurationError::NotANumber(trimmed.to_string()))?;

    if val < min || val > max {
        return Err(DurationError::OutOfRange {
            value: val.into(),
            min: min.into(),
            max: max.into(),
        });
    }
    Ok(val)
}

/// Check an already-numeric target against the allowed range.
pub fn validate_target_minutes(minutes: u32) -> Result<u32, DurationError> {
    if (MIN_TARGET_MINUTES..=MAX_TARGET_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(DurationError::OutOfRange {
            value: minutes.into(),
            min: MIN_TARGET_MINUTES.into(),
            max: MAX_TARGET_MINUTES.into(),
        })
    }
}

/// Parse the duration field's raw text into whole minutes.
///
/// Signed parsing is used so that "-5" reports a range error rather than a
/// format error.
///
/// # Examples
/// ```
/// use target_stopwatch::utils::parse_target_minutes;
/// assert_eq!(parse_target_minutes(" 15 "), Ok(15));
/// assert!(parse_target_minutes("1000").is_err());
/// ```
pub fn parse_target_minutes(input: &str) -> Result<u32, DurationError> {
    let min = i64::from(MIN_TARGET_MINUTES);
    let max = i64::from(MAX_TARGET_MINUTES);
    let value = validate_numeric_input::<i64>(input, min, max)?;
    u32::try_from(value).map_err(|_| DurationError::OutOfRange { value, min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_bounds() {
        assert_eq!(parse_target_minutes("1"), Ok(1));
        assert_eq!(parse_target_minutes("999"), Ok(999));
        assert_eq!(parse_target_minutes("  42\n"), Ok(42));
    }

    #[test]
    fn rejects_out_of_range() {
        for raw in ["0", "-5", "1000"] {
            assert!(
                matches!(parse_target_minutes(raw), Err(DurationError::OutOfRange { .. })),
                "{raw} should be out of range"
            );
        }
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_target_minutes(""), Err(DurationError::Empty));
        assert_eq!(
            parse_target_minutes("abc"),
            Err(DurationError::NotANumber("abc".to_string()))
        );
        assert!(parse_target_minutes("2.5").is_err());
        assert!(parse_target_minutes("99999999999999999999999").is_err());
    }

    #[test]
    fn error_messages_are_readable() {
        let err = parse_target_minutes("1000").unwrap_err();
        assert_eq!(err.to_string(), "Duration 1000 is out of range (1-999 minutes)");
    }

    #[test]
    fn numeric_target_validation() {
        assert_eq!(validate_target_minutes(10), Ok(10));
        assert!(validate_target_minutes(0).is_err());
        assert!(validate_target_minutes(1000).is_err());
    }
}
