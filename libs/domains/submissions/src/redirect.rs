//! Same-origin redirect targets

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Redirect target must be a relative path such as \"/thanks\", got {0:?}")]
pub struct RedirectError(pub String);

/// A path on this server. Absolute and protocol-relative URLs are rejected,
/// so a redirect can never leave the origin that served the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRedirect(String);

impl LocalRedirect {
    pub fn parse(target: &str) -> Result<Self, RedirectError> {
        let target = target.trim();
        let local = target.starts_with('/')
            && !target.starts_with("//")
            && target.chars().all(|c| c.is_ascii_graphic() && c != '\\');

        if local {
            Ok(Self(target.to_string()))
        } else {
            Err(RedirectError(target.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocalRedirect {
    fn default() -> Self {
        Self("/".to_string())
    }
}

impl FromStr for LocalRedirect {
    type Err = RedirectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocalRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_local_paths() {
        for target in ["/", "/thanks", "/done?from=submit", " /padded "] {
            assert!(LocalRedirect::parse(target).is_ok(), "{target}");
        }
        assert_eq!(LocalRedirect::parse(" /padded ").unwrap().as_str(), "/padded");
    }

    #[test]
    fn test_rejects_anything_leaving_the_origin() {
        for target in [
            "https://example.com/",
            "http://example.com",
            "//example.com",
            "/\\example.com",
            "example.com",
            "javascript:alert(1)",
            "",
            "/with space",
            "/caf\u{e9}",
        ] {
            assert!(LocalRedirect::parse(target).is_err(), "{target}");
        }
    }

    #[test]
    fn test_default_is_root() {
        assert_eq!(LocalRedirect::default().as_str(), "/");
        assert_eq!("/x".parse::<LocalRedirect>().unwrap().to_string(), "/x");
    }
}
