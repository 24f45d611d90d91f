use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// ISO 3166-1 alpha-2 country code, either case
    /// - Valid: "JP", "kr", "Us"
    /// - Invalid: "JPN", "J", "1A", "J-"
    pub static ref COUNTRY_CODE_REGEX: Regex = Regex::new(r"^[A-Za-z]{2}$").unwrap();
}

/// Rejects strings made only of whitespace (`length(min = 1)` accepts them)
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_regex_valid() {
        assert!(COUNTRY_CODE_REGEX.is_match("JP"));
        assert!(COUNTRY_CODE_REGEX.is_match("kr"));
        assert!(COUNTRY_CODE_REGEX.is_match("Us"));
    }

    #[test]
    fn test_country_code_regex_invalid() {
        assert!(!COUNTRY_CODE_REGEX.is_match("JPN"));
        assert!(!COUNTRY_CODE_REGEX.is_match("J"));
        assert!(!COUNTRY_CODE_REGEX.is_match("1A"));
        assert!(!COUNTRY_CODE_REGEX.is_match("J-"));
        assert!(!COUNTRY_CODE_REGEX.is_match(""));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Tokyo").is_ok());
        assert!(not_blank("  Osaka ").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank(" \n\t ").is_err());
    }
}
