use std::fmt::Display;

/// Returns a 5-character zipcode. Shorter inputs are left-padded with '0';
/// longer inputs keep their leftmost five characters. There is no error
/// path: any input, including an empty string, yields a 5-character value.
pub fn normalize_zipcode(raw: impl Display) -> String {
    let padded = format!("{:0>5}", raw.to_string());
    padded.chars().take(5).collect()
}

/// Strips formatting from a US phone number, returning exactly ten digits or
/// `None` when no unambiguous number can be derived. Eleven digits are
/// accepted only with a leading country code of 1, which is dropped.
pub fn normalize_phone_number(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => Some(digits),
        11 if digits.starts_with('1') => Some(digits[1..].to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_zipcode_is_left_padded() {
        assert_eq!(normalize_zipcode("123"), "00123");
        assert_eq!(normalize_zipcode("7306"), "07306");
    }

    #[test]
    fn overlong_zipcode_keeps_the_leading_digits() {
        // Truncation keeps the leftmost five characters, not the ZIP+4 tail.
        assert_eq!(normalize_zipcode("1234567"), "12345");
        assert_eq!(normalize_zipcode("123456789"), "12345");
    }

    #[test]
    fn numeric_zipcode_is_accepted() {
        assert_eq!(normalize_zipcode(80123), "80123");
        assert_eq!(normalize_zipcode(123), "00123");
    }

    #[test]
    fn empty_zipcode_becomes_all_zeros() {
        assert_eq!(normalize_zipcode(""), "00000");
    }

    #[test]
    fn zipcode_normalization_is_idempotent() {
        for raw in ["123", "1234567", "80123", ""] {
            let once = normalize_zipcode(raw);
            assert_eq!(normalize_zipcode(&once), once);
        }
    }

    #[test]
    fn formatted_phone_number_is_stripped_to_digits() {
        assert_eq!(
            normalize_phone_number("123-456-7890"),
            Some("1234567890".to_string())
        );
        assert_eq!(
            normalize_phone_number("(941) 979-2000"),
            Some("9419792000".to_string())
        );
    }

    #[test]
    fn leading_country_code_is_dropped() {
        assert_eq!(
            normalize_phone_number("11234567890"),
            Some("1234567890".to_string())
        );
        assert_eq!(
            normalize_phone_number("+1 (415) 555-1212"),
            Some("4155551212".to_string())
        );
    }

    #[test]
    fn eleven_digits_without_country_code_is_rejected() {
        assert_eq!(normalize_phone_number("21234567890"), None);
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(normalize_phone_number("12345"), None);
        assert_eq!(normalize_phone_number("123456789012"), None);
        assert_eq!(normalize_phone_number(""), None);
    }
}
