//! Project-type and platform tags for the manifest schema.
//!
//! Both enums parse from the exact tag strings that appear in
//! `atelier.toml` and render back to them via `Display`.

use crate::ManifestError;
use std::fmt;
use std::str::FromStr;

/// Role of a project within the Atelier toolchain.
///
/// The tag controls which manifest fields are legal: only `Addon` projects
/// may declare `dependencies` and `required_core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Addon,
    Cli,
    Degraded,
    Napi,
    Package,
    Service,
}

impl ProjectType {
    /// Every known tag, sorted alphabetically for deterministic error output.
    pub const ALL: [ProjectType; 6] = [
        ProjectType::Addon,
        ProjectType::Cli,
        ProjectType::Degraded,
        ProjectType::Napi,
        ProjectType::Package,
        ProjectType::Service,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Addon => "Addon",
            ProjectType::Cli => "CLI",
            ProjectType::Degraded => "Degraded",
            ProjectType::Napi => "NAPI",
            ProjectType::Package => "Package",
            ProjectType::Service => "Service",
        }
    }

    pub(crate) fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ManifestError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Addon" => Ok(ProjectType::Addon),
            "CLI" => Ok(ProjectType::Cli),
            "Degraded" => Ok(ProjectType::Degraded),
            "NAPI" => Ok(ProjectType::Napi),
            "Package" => Ok(ProjectType::Package),
            "Service" => Ok(ProjectType::Service),
            _ => Err(ManifestError::UnknownProjectType {
                value: tag.to_owned(),
                allowed: Self::allowed_list(),
            }),
        }
    }
}

/// Target platform a project is restricted to. `Any` is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Platform {
    #[default]
    Any,
    Unix,
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Any, Platform::Unix, Platform::Windows];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Any => "Any",
            Platform::Unix => "Unix",
            Platform::Windows => "Windows",
        }
    }

    pub(crate) fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ManifestError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "Any" => Ok(Platform::Any),
            "Unix" => Ok(Platform::Unix),
            "Windows" => Ok(Platform::Windows),
            _ => Err(ManifestError::UnknownPlatform {
                value: tag.to_owned(),
                allowed: Self::allowed_list(),
            }),
        }
    }
}
