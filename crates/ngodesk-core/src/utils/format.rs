use std::cmp::Ordering;

use chrono::NaiveDate;

/// Check whether `haystack` contains `needle`, ignoring case.
/// `needle` must already be lowercased.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() && needle.is_ascii() {
        // Fast path: no allocation for plain ASCII fields
        let hay = haystack.as_bytes();
        let pat = needle.as_bytes();
        if pat.len() > hay.len() {
            return false;
        }
        return hay
            .windows(pat.len())
            .any(|w| w.iter().zip(pat).all(|(a, b)| a.to_ascii_lowercase() == *b));
    }
    haystack.to_lowercase().contains(needle)
}

/// Case-insensitive ordering without allocating lowercased copies.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().flat_map(char::to_lowercase);
    let mut right = b.chars().flat_map(char::to_lowercase);
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match x.cmp(&y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}

/// Truncate a string to a maximum number of characters, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a dollar amount as `$1,234,567`, rounded to whole dollars
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a date for display, e.g. `Mar 04, 2025`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Format an optional date, returning a placeholder if None
pub fn format_optional_date(date: Option<&NaiveDate>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Nairobi Field Office", "field"));
        assert!(contains_ignore_case("NAIROBI", "nai"));
        assert!(!contains_ignore_case("Nairobi", "kampala"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("ab", "abc"));
    }

    #[test]
    fn test_contains_ignore_case_unicode() {
        assert!(contains_ignore_case("São Tomé Partners", "tomé"));
        assert!(contains_ignore_case("ÉCOLE", "école"));
    }

    #[test]
    fn test_cmp_ignore_case() {
        assert_eq!(cmp_ignore_case("apple", "APPLE"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("apple", "Banana"), Ordering::Less);
        assert_eq!(cmp_ignore_case("Zebra", "apple"), Ordering::Greater);
        assert_eq!(cmp_ignore_case("ab", "abc"), Ordering::Less);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(1_250_000.4), "$1,250,000");
        assert_eq!(format_currency(-45_500.0), "-$45,500");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(format_date(&date), "Mar 04, 2025");
        assert_eq!(format_optional_date(None), "-");
    }
}
