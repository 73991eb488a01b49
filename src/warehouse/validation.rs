use crate::error::{Error, Result};

const MAX_IDENTIFIER_LEN: usize = 64;

fn is_valid_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Table and column names are spliced into SQL, so only plain identifiers
/// are accepted.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidIdentifier("identifier cannot be empty".to_string()));
    }
    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(Error::InvalidIdentifier(format!(
            "'{name}' exceeds {MAX_IDENTIFIER_LEN} characters"
        )));
    }
    if !name.chars().all(is_valid_identifier_char) {
        return Err(Error::InvalidIdentifier(format!(
            "'{name}' can only contain alphanumeric characters and underscores"
        )));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(Error::InvalidIdentifier(format!(
            "'{name}' cannot start with a digit"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("commit_df").is_ok());
        assert!(validate_identifier("repositories_dim").is_ok());
        assert!(validate_identifier("_x1").is_ok());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1table").is_err());
        assert!(validate_identifier("drop table; --").is_err());
        assert!(validate_identifier("a\"b").is_err());
        assert!(validate_identifier(&"x".repeat(65)).is_err());
    }
}
