use crate::assert::{assert_file_path, assert_version};
use crate::payload::{DocPayload, Payload, PspPayload};
use crate::types::{Platform, ProjectType};
use crate::{fsync_dir, ManifestError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Normalized documentation settings.
///
/// `include` only ever contains paths ending in the `.js` source extension;
/// anything else is dropped silently during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doc {
    pub include: Vec<String>,
    pub port: u16,
}

/// Normalized scaffolding-protection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Psp {
    pub npmrc: bool,
    pub jsdoc: bool,
    pub disabled_dependency: Vec<String>,
    pub exclude: Vec<String>,
}

/// A validated project descriptor.
///
/// Every instance upholds the schema invariants: `version` and all
/// dependency versions are canonical semver, `type` is a known tag, and
/// `dependencies`/`required_core` appear only on `Addon` projects. Fields
/// are private and state changes only through [`Manifest::add_dependency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    name: String,
    version: String,
    project_type: ProjectType,
    org: Option<String>,
    platform: Platform,
    dependencies: BTreeMap<String, String>,
    notes: BTreeMap<String, String>,
    doc: Doc,
    psp: Psp,
    required_core: Option<String>,
    config: Option<String>,
}

/// Reduced projection written by [`Manifest::create_light`].
#[derive(Debug, Serialize)]
struct LightPayload<'a> {
    name: &'a str,
    version: &'a str,
    #[serde(rename = "type")]
    project_type: &'a str,
}

impl Manifest {
    /// Validate and normalize a raw payload.
    ///
    /// Fails atomically: on error no instance is returned and no partial
    /// state is observable. Construction is pure, nothing touches the
    /// filesystem.
    pub fn new(payload: Payload) -> Result<Self, ManifestError> {
        let name = payload.name.trim();
        if name.is_empty() {
            return Err(ManifestError::EmptyName);
        }
        let version = assert_version("payload.version", &payload.version)?;
        let project_type: ProjectType = payload.project_type.parse()?;
        let platform = match payload.platform.as_deref() {
            None | Some("") => Platform::Any,
            Some(tag) => tag.parse()?,
        };
        let org = payload.org.filter(|org| !org.is_empty());

        if payload.required_core.is_some() && project_type != ProjectType::Addon {
            return Err(ManifestError::RequiredCoreNotAllowed { project_type });
        }

        // doc.include must only carry .js source files; filtering is silent.
        let include: Vec<String> = payload
            .doc
            .include
            .into_iter()
            .filter(|file| Path::new(file).extension().is_some_and(|ext| ext == "js"))
            .collect();

        let mut manifest = Self {
            name: name.to_owned(),
            version,
            project_type,
            org,
            platform,
            dependencies: BTreeMap::new(),
            notes: payload.notes,
            doc: Doc {
                include,
                port: payload.doc.port,
            },
            psp: Psp {
                npmrc: payload.psp.npmrc,
                jsdoc: payload.psp.jsdoc,
                disabled_dependency: payload.psp.disabled_dependency,
                exclude: payload.psp.exclude,
            },
            required_core: payload.required_core,
            config: payload.config,
        };
        for (name, version) in payload.dependencies {
            manifest.add_dependency(&name, &version)?;
        }
        Ok(manifest)
    }

    /// Insert or replace one dependency entry.
    ///
    /// Only `Addon` projects may carry dependencies. The version is
    /// validated and stored in canonical semver form; repeating an
    /// identical call is a no-op.
    pub fn add_dependency(&mut self, name: &str, version: &str) -> Result<(), ManifestError> {
        if self.project_type != ProjectType::Addon {
            return Err(ManifestError::DependenciesNotAllowed {
                project_type: self.project_type,
            });
        }
        let canonical = assert_version(&format!("payload.dependencies.{name}"), version)?;
        self.dependencies.insert(name.to_owned(), canonical);
        Ok(())
    }

    /// Whether `name` is present in the dependency map.
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical semver form of the declared version.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn org(&self) -> Option<&str> {
        self.org.as_deref()
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn dependencies(&self) -> &BTreeMap<String, String> {
        &self.dependencies
    }

    pub fn notes(&self) -> &BTreeMap<String, String> {
        &self.notes
    }

    pub fn doc(&self) -> &Doc {
        &self.doc
    }

    pub fn psp(&self) -> &Psp {
        &self.psp
    }

    pub fn required_core(&self) -> Option<&str> {
        self.required_core.as_deref()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Project the normalized state back into a plain payload.
    ///
    /// The result always carries resolved defaults (platform, doc port, psp
    /// flags), never the raw input, so re-validating it is idempotent.
    pub fn to_payload(&self) -> Payload {
        Payload {
            name: self.name.clone(),
            version: self.version.clone(),
            project_type: self.project_type.to_string(),
            org: self.org.clone(),
            platform: Some(self.platform.to_string()),
            required_core: self.required_core.clone(),
            config: self.config.clone(),
            dependencies: self.dependencies.clone(),
            notes: self.notes.clone(),
            doc: DocPayload {
                include: self.doc.include.clone(),
                port: self.doc.port,
            },
            psp: PspPayload {
                npmrc: self.psp.npmrc,
                jsdoc: self.psp.jsdoc,
                disabled_dependency: self.psp.disabled_dependency.clone(),
                exclude: self.psp.exclude.clone(),
            },
        }
    }

    /// Deterministic JSON rendering of [`Manifest::to_payload`], for
    /// snapshot and equality testing.
    pub fn canonical_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_payload())
    }

    /// Parse and validate a manifest from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, ManifestError> {
        let payload: Payload = toml::from_str(input)?;
        Self::new(payload)
    }

    /// Render the manifest as TOML text.
    pub fn to_toml_string(&self) -> Result<String, ManifestError> {
        Ok(toml::to_string_pretty(&self.to_payload())?)
    }

    /// Validate `payload`, then write a new manifest file at `path`.
    ///
    /// The file must not already exist. Validation runs before any write,
    /// so a rejected payload leaves the filesystem untouched.
    pub fn create(payload: Payload, path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        Self::assert_creatable(path)?;
        let manifest = Self::new(payload)?;
        write_atomic(path, &manifest.to_toml_string()?)?;
        debug!(path = %path.display(), "created manifest");
        Ok(manifest)
    }

    /// Like [`Manifest::create`], but persist only `name`, `version`, and
    /// `type`. The returned instance is still fully normalized.
    pub fn create_light(payload: Payload, path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        Self::assert_creatable(path)?;
        let manifest = Self::new(payload)?;
        let light = LightPayload {
            name: &manifest.name,
            version: &manifest.version,
            project_type: manifest.project_type.as_str(),
        };
        write_atomic(path, &toml::to_string_pretty(&light)?)?;
        debug!(path = %path.display(), "created manifest (light)");
        Ok(manifest)
    }

    /// Read and validate an existing manifest file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        assert_file_path(path)?;
        let content = fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), name = %manifest.name, "opened manifest");
        Ok(manifest)
    }

    /// Overwrite an existing manifest file with the current state.
    ///
    /// Never creates new files; use [`Manifest::create`] for that.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let path = path.as_ref();
        assert_file_path(path)?;
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_owned()));
        }
        write_atomic(path, &self.to_toml_string()?)?;
        debug!(path = %path.display(), "saved manifest");
        Ok(())
    }

    fn assert_creatable(path: &Path) -> Result<(), ManifestError> {
        assert_file_path(path)?;
        if path.exists() {
            return Err(ManifestError::AlreadyExists(path.to_owned()));
        }
        Ok(())
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<(), ManifestError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| ManifestError::Io(e.error))?;
    fsync_dir(dir)?;
    Ok(())
}
