//! Connection-string validation and masking

use crate::common::UriError;

/// Schemes accepted by [`validate_uri`]
pub const SCHEMES: [&str; 2] = ["mongodb://", "mongodb+srv://"];

const MASK: &str = "****";

/// Validate and normalize a MongoDB connection string.
///
/// The input is trimmed and must use one of [`SCHEMES`]. When the string
/// carries query options but no database segment before them,
/// `/<default_database>` is inserted in front of the first `?`. A bare
/// `/?` counts as a present segment and is kept.
///
/// Idempotent: validating the output again returns it unchanged.
///
/// # Example
/// ```ignore
/// let uri = validate_uri(Some("mongodb+srv://u:p@cluster0.example.net?w=majority"), "intake")?;
/// assert_eq!(uri, "mongodb+srv://u:p@cluster0.example.net/intake?w=majority");
/// ```
pub fn validate_uri(candidate: Option<&str>, default_database: &str) -> Result<String, UriError> {
    let uri = match candidate {
        Some(raw) if !raw.is_empty() => raw.trim(),
        _ => return Err(UriError::Missing),
    };

    let scheme = SCHEMES
        .iter()
        .find(|scheme| uri.starts_with(*scheme))
        .ok_or(UriError::InvalidScheme)?;

    let Some(query_start) = uri.find('?') else {
        return Ok(uri.to_string());
    };

    let before_query = &uri[scheme.len()..query_start];
    let hosts = before_query
        .rfind('@')
        .map_or(before_query, |at| &before_query[at + 1..]);

    if hosts.contains('/') {
        return Ok(uri.to_string());
    }

    Ok(format!(
        "{}/{}{}",
        &uri[..query_start],
        default_database,
        &uri[query_start..]
    ))
}

/// Whether the trimmed string starts with an accepted scheme
pub fn has_valid_scheme(uri: &str) -> bool {
    let trimmed = uri.trim();
    SCHEMES.iter().any(|scheme| trimmed.starts_with(scheme))
}

/// Replace the user-info part of a connection string with `****`.
///
/// Everything between `scheme://` and the last `@` is masked, so
/// passwords containing `@`, `:` or `/` never leak. Strings without `@`
/// are returned unchanged.
pub fn mask_credentials(uri: &str) -> String {
    let start = match uri.find("://") {
        Some(i)
            if uri[..i]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) =>
        {
            i + 3
        }
        _ => 0,
    };

    match uri[start..].rfind('@') {
        Some(at) => format!("{}{}{}", &uri[..start], MASK, &uri[start + at..]),
        None => uri.to_string(),
    }
}
