//! Raw payload shapes as they appear in `atelier.toml`.
//!
//! These structs are the untrusted input side of the schema: fields are
//! loosely typed (tags are plain strings) and every field is defaulted so
//! a missing entry and an empty one surface the same validation error
//! downstream. [`crate::Manifest::new`] turns a `Payload` into the
//! validated form.

use crate::DEFAULT_DOC_PORT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Payload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "type")]
    pub project_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_core: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<String, String>,
    #[serde(default)]
    pub doc: DocPayload,
    #[serde(default)]
    pub psp: PspPayload,
}

/// Documentation settings section (`[doc]`).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocPayload {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default = "default_doc_port")]
    pub port: u16,
}

impl Default for DocPayload {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            port: DEFAULT_DOC_PORT,
        }
    }
}

/// Scaffolding-protection section (`[psp]`): which generated companion
/// files are produced and what is excluded from generation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PspPayload {
    #[serde(default = "default_true")]
    pub npmrc: bool,
    #[serde(default = "default_true")]
    pub jsdoc: bool,
    #[serde(default)]
    pub disabled_dependency: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for PspPayload {
    fn default() -> Self {
        Self {
            npmrc: true,
            jsdoc: true,
            disabled_dependency: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

fn default_doc_port() -> u16 {
    DEFAULT_DOC_PORT
}

fn default_true() -> bool {
    true
}
