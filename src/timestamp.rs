//! Millisecond timestamps and their plain-text wire form.

use std::fmt;
use std::str::FromStr;

/// Milliseconds since the Unix epoch. Negative values are dates before 1970.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTimestampError {
    #[error("timestamp is empty")]
    Empty,
    #[error("invalid character {0:?} in timestamp")]
    InvalidCharacter(char),
    #[error("timestamp does not fit in 64 bits")]
    OutOfRange,
}

/// Parses a base-10 integer with an optional leading `-`.
///
/// Stricter than `i64::from_str`: a leading `+` is rejected.
impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() {
            return Err(ParseTimestampError::Empty);
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ParseTimestampError::InvalidCharacter(bad));
        }

        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ParseTimestampError::OutOfRange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_decimal() {
        assert_eq!("120".parse::<Timestamp>().unwrap().as_millis(), 120);
        assert_eq!("-120".parse::<Timestamp>().unwrap().as_millis(), -120);
        assert_eq!("0".parse::<Timestamp>().unwrap().as_millis(), 0);
        assert_eq!("-0".parse::<Timestamp>().unwrap().as_millis(), 0);
        assert_eq!(
            "-9223372036854775808".parse::<Timestamp>().unwrap().as_millis(),
            i64::MIN
        );
    }

    #[test]
    fn rejects_anything_but_digits() {
        assert_eq!("".parse::<Timestamp>(), Err(ParseTimestampError::Empty));
        assert_eq!("-".parse::<Timestamp>(), Err(ParseTimestampError::Empty));
        assert_eq!(
            "+1".parse::<Timestamp>(),
            Err(ParseTimestampError::InvalidCharacter('+'))
        );
        assert_eq!(
            " 1".parse::<Timestamp>(),
            Err(ParseTimestampError::InvalidCharacter(' '))
        );
        assert_eq!(
            "1\n".parse::<Timestamp>(),
            Err(ParseTimestampError::InvalidCharacter('\n'))
        );
        assert_eq!(
            "1.0".parse::<Timestamp>(),
            Err(ParseTimestampError::InvalidCharacter('.'))
        );
        assert_eq!(
            "asdfg".parse::<Timestamp>(),
            Err(ParseTimestampError::InvalidCharacter('a'))
        );
        assert_eq!(
            "--1".parse::<Timestamp>(),
            Err(ParseTimestampError::InvalidCharacter('-'))
        );
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            "9223372036854775808".parse::<Timestamp>(),
            Err(ParseTimestampError::OutOfRange)
        );
    }

    #[test]
    fn renders_as_plain_decimal() {
        assert_eq!(Timestamp::from_millis(-120).to_string(), "-120");
        assert_eq!(Timestamp::from_millis(123456789).to_string(), "123456789");
    }

    #[test]
    fn now_is_after_2020() {
        assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
    }
}
