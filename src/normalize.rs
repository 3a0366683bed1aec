/*!
 * Field normalizers for raw bureau values
 *
 * Bureau fields arrive as loosely formatted strings. These helpers coerce
 * them into the normalized record's conventions with safe defaults; they
 * never error, since absent or garbled values are expected input.
 */

/// Reformat a bureau `YYYYMMDD` date as ISO `YYYY-MM-DD`
///
/// Anything that is not exactly 8 ASCII digits returns `""`. No calendar
/// validity check is performed: "20231332" comes back as "2023-13-32",
/// exactly as the bureau sent it.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return String::new();
    }
    format!("{}-{}-{}", &raw[0..4], &raw[4..6], &raw[6..8])
}

/// Coerce a numeric bureau string into an integer, defaulting to 0
///
/// Decimal strings truncate toward zero. Absent, empty, or non-numeric
/// values become 0 rather than an error.
pub fn to_int(raw: &str) -> i64 {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return n;
    }
    // Some subscribers report monetary amounts with a decimal part.
    if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            return f.trunc() as i64;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_valid() {
        assert_eq!(format_date("20231115"), "2023-11-15");
        assert_eq!(format_date("19840101"), "1984-01-01");
    }

    #[test]
    fn test_format_date_slices_without_calendar_check() {
        // Out-of-range month/day pass straight through.
        assert_eq!(format_date("20231332"), "2023-13-32");
        assert_eq!(format_date("00000000"), "0000-00-00");
    }

    #[test]
    fn test_format_date_rejects_wrong_length() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("2023111"), "");
        assert_eq!(format_date("202311150"), "");
        assert_eq!(format_date("2023-11-15"), "");
    }

    #[test]
    fn test_format_date_rejects_non_digits() {
        assert_eq!(format_date("2023111a"), "");
        assert_eq!(format_date("abcdefgh"), "");
    }

    #[test]
    fn test_format_date_trims_whitespace() {
        assert_eq!(format_date(" 20231115 "), "2023-11-15");
    }

    #[test]
    fn test_to_int_numeric() {
        assert_eq!(to_int("0"), 0);
        assert_eq!(to_int("245000"), 245000);
        assert_eq!(to_int(" 1500 "), 1500);
    }

    #[test]
    fn test_to_int_negative() {
        assert_eq!(to_int("-350"), -350);
    }

    #[test]
    fn test_to_int_truncates_decimals() {
        assert_eq!(to_int("123.45"), 123);
        assert_eq!(to_int("-9.99"), -9);
    }

    #[test]
    fn test_to_int_defaults_to_zero() {
        assert_eq!(to_int(""), 0);
        assert_eq!(to_int("N/A"), 0);
        assert_eq!(to_int("12abc"), 0);
        assert_eq!(to_int("NaN"), 0);
    }
}
