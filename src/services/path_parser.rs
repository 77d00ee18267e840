//! Splits a Swift API request path into account, container and object names.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// `/v1/AUTH_<account>[/<container>[/<object>]]`; the object group takes the
/// rest of the path verbatim, slashes included.
///
/// Anchored at both ends on purpose: the whole path must match, so trailing
/// junk after the account name and empty container segments such as
/// `/v1/AUTH_a//o` are rejected instead of being partially matched.
static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/v1/AUTH_([a-zA-Z0-9]+)(?:/|/([^/]+)(?:/(.*))?)?$")
        .expect("static path pattern is valid")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Couldn't parse the specified URI `{0}`")]
    Unrecognized(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    pub account: String,
    /// Empty when the path stops at the account.
    pub container: String,
    /// Empty when the path stops at the container.
    pub object: String,
}

impl ParsedPath {
    pub fn container(&self) -> Option<&str> {
        Some(self.container.as_str()).filter(|c| !c.is_empty())
    }

    pub fn object(&self) -> Option<&str> {
        Some(self.object.as_str()).filter(|o| !o.is_empty())
    }
}

/// Extract the identifiers from `path`. No percent-decoding is applied.
pub fn parse_path(path: &str) -> Result<ParsedPath, PathError> {
    let caps = PATH_PATTERN
        .captures(path)
        .ok_or_else(|| PathError::Unrecognized(path.to_string()))?;

    let group = |i: usize| {
        caps.get(i)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    };

    Ok(ParsedPath {
        account: group(1),
        container: group(2),
        object: group(3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_object_path() {
        let parsed = parse_path("/v1/AUTH_test/mycontainer/myobj").unwrap();
        assert_eq!(parsed.account, "test");
        assert_eq!(parsed.container(), Some("mycontainer"));
        assert_eq!(parsed.object(), Some("myobj"));
    }

    #[test]
    fn object_names_keep_slashes() {
        let parsed = parse_path("/v1/AUTH_test/c/photos/2025/img.jpg").unwrap();
        assert_eq!(parsed.container, "c");
        assert_eq!(parsed.object, "photos/2025/img.jpg");
    }

    #[test]
    fn account_and_container_only() {
        let parsed = parse_path("/v1/AUTH_test").unwrap();
        assert_eq!(parsed.account, "test");
        assert_eq!(parsed.container(), None);
        assert_eq!(parsed.object(), None);

        let parsed = parse_path("/v1/AUTH_test/").unwrap();
        assert_eq!(parsed.container(), None);

        let parsed = parse_path("/v1/AUTH_test/box").unwrap();
        assert_eq!(parsed.container(), Some("box"));
        assert_eq!(parsed.object(), None);

        let parsed = parse_path("/v1/AUTH_test/box/").unwrap();
        assert_eq!(parsed.container(), Some("box"));
        assert_eq!(parsed.object(), None);
    }

    #[test]
    fn rejects_foreign_paths() {
        assert_eq!(
            parse_path("/not/a/swift/path"),
            Err(PathError::Unrecognized("/not/a/swift/path".into()))
        );
        assert!(parse_path("/v1/AUTH_").is_err());
        assert!(parse_path("/v1/AUTH_bad-name/c").is_err());
        assert!(parse_path("/v1/AUTH_test//obj").is_err());
    }

    #[test]
    fn whole_path_must_match() {
        assert!(parse_path("/v1/AUTH_test.json").is_err());
        assert!(parse_path("/proxy/v1/AUTH_test/c").is_err());
        assert!(parse_path("/v1/AUTH_test/c/o").is_ok());
    }

    #[test]
    fn leaves_percent_escapes_alone() {
        let parsed = parse_path("/v1/AUTH_test/c/a%20b").unwrap();
        assert_eq!(parsed.object, "a%20b");
    }
}
