//! Path and version assertion helpers.
//!
//! Both are pure and usable standalone: `assert_version` backs the
//! manifest's own version field and every dependency entry,
//! `assert_file_path` guards every file-touching operation.

use crate::ManifestError;
use std::path::Path;

/// Validate `value` as a semantic version and return its canonical form.
///
/// Surrounding whitespace and one leading `v`/`V` are accepted on input;
/// the returned string is the canonical `semver` rendering, so
/// `"v1.0.0"` comes back as `"1.0.0"`. `field` is the dotted payload path
/// used in the error message (e.g. `payload.dependencies.events`).
pub fn assert_version(field: &str, value: &str) -> Result<String, ManifestError> {
    let trimmed = value.trim();
    let bare = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);
    semver::Version::parse(bare)
        .map(|v| v.to_string())
        .map_err(|_| ManifestError::InvalidVersion {
            field: field.to_owned(),
        })
}

/// Check that `path` is absolute and carries the manifest extension.
pub fn assert_file_path(path: &Path) -> Result<(), ManifestError> {
    if !path.is_absolute() {
        return Err(ManifestError::PathNotAbsolute(path.to_owned()));
    }
    if !path.extension().is_some_and(|ext| ext == "toml") {
        return Err(ManifestError::WrongExtension(path.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_semver() {
        assert_eq!(assert_version("payload.version", "1.0.0").unwrap(), "1.0.0");
    }

    #[test]
    fn strips_leading_v() {
        assert_eq!(assert_version("payload.version", "v1.2.3").unwrap(), "1.2.3");
        assert_eq!(assert_version("payload.version", "V1.2.3").unwrap(), "1.2.3");
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(assert_version("payload.version", " 1.2.3 ").unwrap(), "1.2.3");
    }

    #[test]
    fn keeps_prerelease_and_build_metadata() {
        assert_eq!(
            assert_version("payload.version", "1.0.0-alpha.1").unwrap(),
            "1.0.0-alpha.1"
        );
        assert_eq!(
            assert_version("payload.version", "1.0.0+build.5").unwrap(),
            "1.0.0+build.5"
        );
    }

    #[test]
    fn rejects_non_semver() {
        let err = assert_version("payload.version", "not-a-version").unwrap_err();
        assert_eq!(err.to_string(), "payload.version must be a valid semver");
    }

    #[test]
    fn rejects_partial_versions() {
        assert!(assert_version("payload.version", "1.0").is_err());
        assert!(assert_version("payload.version", "1").is_err());
        assert!(assert_version("payload.version", "").is_err());
    }

    #[test]
    fn error_names_the_dotted_field_path() {
        let err = assert_version("payload.dependencies.events", "oops").unwrap_err();
        assert_eq!(
            err.to_string(),
            "payload.dependencies.events must be a valid semver"
        );
    }

    #[test]
    fn rejects_relative_path() {
        let err = assert_file_path(Path::new("relative/path.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::PathNotAbsolute(_)));
    }

    #[test]
    fn rejects_wrong_extension() {
        let err = assert_file_path(Path::new("/abs/path.txt")).unwrap_err();
        assert!(matches!(err, ManifestError::WrongExtension(_)));
    }

    #[test]
    fn rejects_missing_extension() {
        assert!(assert_file_path(Path::new("/abs/atelier")).is_err());
    }

    #[test]
    fn accepts_absolute_toml_path() {
        assert!(assert_file_path(Path::new("/abs/atelier.toml")).is_ok());
    }
}
