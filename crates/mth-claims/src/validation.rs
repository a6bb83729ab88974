//! Argument validation run before any network interaction

use crate::ClaimsError;

/// Values that can be "empty" in the sense of a missing required argument.
///
/// Numbers are never empty: zero is a legitimate claim id or amount.
pub trait Presence {
    /// True when the value counts as missing
    fn is_blank(&self) -> bool;
}

impl Presence for str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Presence for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Presence for [T] {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Presence for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Presence::is_blank)
    }
}

impl<T: Presence + ?Sized> Presence for &T {
    fn is_blank(&self) -> bool {
        (**self).is_blank()
    }
}

macro_rules! never_blank {
    ($($t:ty),*) => {
        $(impl Presence for $t {
            fn is_blank(&self) -> bool {
                false
            }
        })*
    };
}

never_blank!(u8, u16, u32, u64, u128, usize, i32, i64, mth_primitives::U256);

/// Values with an element count, for length limits
pub trait Measure {
    /// Element count, or `None` when the value is absent.
    /// Strings count UTF-8 bytes, matching their on-chain size.
    fn measure(&self) -> Option<usize>;
}

impl Measure for str {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl Measure for String {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> Measure for [T] {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T> Measure for Vec<T> {
    fn measure(&self) -> Option<usize> {
        Some(self.len())
    }
}

impl<T: Measure> Measure for Option<T> {
    fn measure(&self) -> Option<usize> {
        self.as_ref().and_then(Measure::measure)
    }
}

impl<T: Measure + ?Sized> Measure for &T {
    fn measure(&self) -> Option<usize> {
        (**self).measure()
    }
}

/// Fail with [`ClaimsError::EmptyValue`] naming `name` when `value` is missing
pub fn validate_not_empty<T: Presence + ?Sized>(value: &T, name: &str) -> Result<(), ClaimsError> {
    if value.is_blank() {
        return Err(ClaimsError::empty(name));
    }
    Ok(())
}

/// Fail with [`ClaimsError::LengthExceeded`] when `value` has more than
/// `max_length` elements. Absent values pass.
pub fn validate_max_length<T: Measure + ?Sized>(
    value: &T,
    max_length: usize,
    name: &str,
) -> Result<(), ClaimsError> {
    match value.measure() {
        Some(len) if len > max_length => Err(ClaimsError::LengthExceeded {
            name: name.to_string(),
            max_length,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_name(result: Result<(), ClaimsError>) -> String {
        match result {
            Err(ClaimsError::EmptyValue { name }) => name,
            other => panic!("Expected EmptyValue, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_is_not_empty() {
        assert!(validate_not_empty(&0u64, "x").is_ok());
        assert!(validate_not_empty(&mth_primitives::U256::zero(), "x").is_ok());
        assert!(validate_not_empty(&Some(0u64), "x").is_ok());
    }

    #[test]
    fn test_missing_values_are_empty() {
        assert_eq!(empty_name(validate_not_empty(&None::<&str>, "x")), "x");
        assert_eq!(empty_name(validate_not_empty("", "x")), "x");
        assert_eq!(empty_name(validate_not_empty(&String::new(), "x")), "x");
        assert_eq!(empty_name(validate_not_empty(&None::<u64>, "x")), "x");
        assert_eq!(empty_name(validate_not_empty(&Some(""), "x")), "x");
        assert_eq!(empty_name(validate_not_empty(&Vec::<u8>::new(), "x")), "x");
    }

    #[test]
    fn test_present_values_pass() {
        assert!(validate_not_empty("reason", "x").is_ok());
        assert!(validate_not_empty(&Some("0xabc".to_string()), "x").is_ok());
        assert!(validate_not_empty(&vec![1u8], "x").is_ok());
    }

    #[test]
    fn test_max_length() {
        match validate_max_length("abcdef", 5, "x") {
            Err(ClaimsError::LengthExceeded { name, max_length }) => {
                assert_eq!(name, "x");
                assert_eq!(max_length, 5);
            }
            other => panic!("Expected LengthExceeded, got {:?}", other),
        }
        assert!(validate_max_length("abcde", 5, "x").is_ok());
        assert!(validate_max_length(&None::<&str>, 5, "x").is_ok());
        assert!(validate_max_length("", 0, "x").is_ok());
    }

    #[test]
    fn test_max_length_sequences() {
        assert!(validate_max_length(&vec![1, 2, 3], 3, "list").is_ok());
        assert!(validate_max_length(&[1, 2, 3, 4][..], 3, "list").is_err());
        assert!(validate_max_length(&Some(vec![0u8; 33]), 32, "list").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = validate_not_empty("", "payload.reason").unwrap_err();
        assert_eq!(err.to_string(), "\"payload.reason\" cannot be empty");
    }
}
