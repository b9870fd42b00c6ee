use crate::constants::THOUSANDS_SEPARATOR;

/// Formats a quantity for display, grouping thousands with `.`.
///
/// `1234567` becomes `"1.234.567"`; negative values keep their sign.
pub fn format_quantity(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    if value < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_small_numbers() {
        assert_eq!(format_quantity(0), "0");
        assert_eq!(format_quantity(7), "7");
        assert_eq!(format_quantity(999), "999");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_quantity(1000), "1.000");
        assert_eq!(format_quantity(1234567), "1.234.567");
        assert_eq!(format_quantity(100000), "100.000");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_quantity(-2500), "-2.500");
    }
}
