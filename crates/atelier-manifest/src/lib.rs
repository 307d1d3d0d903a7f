//! Manifest validation, normalization, and persistence for Atelier.
//!
//! This crate defines the project-descriptor layer: the raw TOML payload
//! shapes (`Payload`), the validated in-memory `Manifest` with its
//! read-only accessors and file lifecycle (`create`/`open`/`save`), the
//! project-type and platform tag enums, and the path/version assertion
//! helpers shared by every file-touching operation.

pub mod assert;
pub mod manifest;
pub mod payload;
pub mod types;

pub use assert::{assert_file_path, assert_version};
pub use manifest::{Doc, Manifest, Psp};
pub use payload::{DocPayload, Payload, PspPayload};
pub use types::{Platform, ProjectType};

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default TCP port for the generated documentation server.
pub const DEFAULT_DOC_PORT: u16 = 2000;

/// Canonical manifest file name, resolved against the working directory.
pub const MANIFEST_FILE_NAME: &str = "atelier.toml";

/// Default manifest location: `<cwd>/atelier.toml`.
///
/// Every file operation also accepts an explicit path, so this is a
/// convenience for callers that follow the standard layout.
pub fn default_manifest_path() -> Result<PathBuf, ManifestError> {
    Ok(std::env::current_dir()?.join(MANIFEST_FILE_NAME))
}

/// Fsync a directory so a preceding `rename()` is durable.
///
/// POSIX does not guarantee rename durability without an fsync of the
/// parent directory, even on filesystems where it usually holds.
pub(crate) fn fsync_dir(dir: &Path) -> Result<(), std::io::Error> {
    let f = std::fs::File::open(dir)?;
    f.sync_all()
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse manifest: {0}")]
    ParseToml(#[from] toml::de::Error),
    #[error("failed to serialize manifest: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    #[error("payload.name must be a non-empty string")]
    EmptyName,
    #[error("payload.type must be one of: {allowed} (got '{value}')")]
    UnknownProjectType { value: String, allowed: String },
    #[error("payload.platform must be one of: {allowed} (got '{value}')")]
    UnknownPlatform { value: String, allowed: String },
    #[error("{field} must be a valid semver")]
    InvalidVersion { field: String },
    #[error("dependencies are only allowed on Addon projects (manifest type is {project_type})")]
    DependenciesNotAllowed { project_type: ProjectType },
    #[error("required_core is only available for Addon projects (manifest type is {project_type})")]
    RequiredCoreNotAllowed { project_type: ProjectType },
    #[error("manifest path must be absolute: {}", .0.display())]
    PathNotAbsolute(PathBuf),
    #[error("manifest file extension must be .toml: {}", .0.display())]
    WrongExtension(PathBuf),
    #[error("a manifest already exists at {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("no manifest file found at {}", .0.display())]
    NotFound(PathBuf),
}
