use crate::error::{RenderError, Result};

/// Largest preview edge in pixels, one pixel per document unit
pub const MAX_PREVIEW_SIZE: u32 = 16000;

/// Parse a division count, accepting only strictly positive integers.
///
/// Used as the clap value parser, so a rejected value surfaces as a usage
/// error before anything is drawn.
pub fn positive_integer(value: &str) -> Result<u32> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|_| RenderError::invalid_argument(value))?;

    if parsed <= 0 {
        return Err(RenderError::invalid_argument(value));
    }

    u32::try_from(parsed).map_err(|_| RenderError::invalid_argument(value))
}

/// Parse a raster edge length in `1..=MAX_PREVIEW_SIZE`.
pub fn preview_size(value: &str) -> Result<u32> {
    let rejected = || RenderError::InvalidPreviewSize {
        value: value.to_string(),
        max: MAX_PREVIEW_SIZE,
    };
    let parsed: i64 = value.trim().parse().map_err(|_| rejected())?;

    match u32::try_from(parsed) {
        Ok(size) if (1..=MAX_PREVIEW_SIZE).contains(&size) => Ok(size),
        _ => Err(rejected()),
    }
}

/// Same check for counts that are already integers.
pub fn ensure_positive(value: u32) -> Result<u32> {
    if value == 0 {
        Err(RenderError::invalid_argument(value))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_positive_values() {
        assert_eq!(positive_integer("1").unwrap(), 1);
        assert_eq!(positive_integer("10").unwrap(), 10);
        assert_eq!(positive_integer(" 7 ").unwrap(), 7);
        assert_eq!(positive_integer("+3").unwrap(), 3);
    }

    #[test]
    fn rejects_zero_and_negative() {
        for value in ["0", "-1", "-100"] {
            let err = positive_integer(value).unwrap_err();
            assert!(matches!(err, RenderError::InvalidArgument { .. }));
            assert_eq!(
                err.to_string(),
                format!("'{}' is an invalid number of subdivisions.", value)
            );
        }
    }

    #[test]
    fn rejects_non_integers() {
        for value in ["", "abc", "2.5", "1e3"] {
            assert!(positive_integer(value).is_err(), "accepted {:?}", value);
        }
    }

    #[test]
    fn rejects_values_beyond_u32() {
        assert!(positive_integer("4294967296").is_err());
    }

    #[test]
    fn preview_size_accepts_up_to_the_cap() {
        assert_eq!(preview_size("1").unwrap(), 1);
        assert_eq!(preview_size("1024").unwrap(), 1024);
        assert_eq!(preview_size("16000").unwrap(), MAX_PREVIEW_SIZE);
    }

    #[test]
    fn preview_size_rejects_zero_and_oversized() {
        for value in ["0", "-5", "16001", "200000", "x"] {
            let err = preview_size(value).unwrap_err();
            assert!(matches!(err, RenderError::InvalidPreviewSize { .. }));
            assert_eq!(
                err.to_string(),
                format!("'{}' is an invalid preview size, expected 1 to 16000 pixels.", value)
            );
        }
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0).is_err());
        assert_eq!(ensure_positive(4).unwrap(), 4);
    }
}
