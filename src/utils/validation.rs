use crate::utils::error::{Result, SiteError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SiteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Simple `local@domain.tld` shape check. Deliverability is the mail
/// provider's problem; this only rejects obvious nonsense.
pub fn is_valid_email(value: &str) -> bool {
    let re = regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").unwrap();
    re.is_match(value.trim())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("generator.endpoint", "https://example.com").is_ok());
        assert!(validate_url("generator.endpoint", "http://example.com").is_ok());
        assert!(validate_url("generator.endpoint", "").is_err());
        assert!(validate_url("generator.endpoint", "invalid-url").is_err());
        assert!(validate_url("generator.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("generator.max_attempts", 5, 1).is_ok());
        assert!(validate_positive_number("generator.max_attempts", 0, 1).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("mail.from_address", "hello@studio.dev").is_ok());
        assert!(validate_non_empty_string("mail.from_address", "   ").is_err());
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("jane.doe+tag@mail.example.co"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane example@example.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("generator.max_attempts", 5, 1, 10).is_ok());
        assert!(validate_range("generator.max_attempts", 11, 1, 10).is_err());
    }
}
