//! String utilities for the domain layer.

/// Truncate to at most `max_chars` characters, appending `...` when cut.
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

/// Render a number without a trailing `.0` when it is whole
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsize_short_is_untouched() {
        assert_eq!(ellipsize("lac mat", 200), "lac mat");
    }

    #[test]
    fn test_ellipsize_counts_chars_not_bytes() {
        assert_eq!(ellipsize("ăăăăă", 3), "ăăă...");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(5.0), "5");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(0.0), "0");
    }
}
