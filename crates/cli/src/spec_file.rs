use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SPEC_NAME: &str = "shiftopt.json";

/// Option specs stored on disk so scripts don't have to repeat them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecFile {
    /// Program name used as argv[0].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Short option string, e.g. `ab:c::`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,

    /// Long options as one spec string or a list of entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_options: Option<LongOptions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_order: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lenient: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviations: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LongOptions {
    Spec(String),
    Entries(Vec<String>),
}

impl LongOptions {
    /// The entries joined into a single long option spec.
    pub fn to_spec(&self) -> String {
        match self {
            Self::Spec(spec) => spec.clone(),
            Self::Entries(entries) => entries.join(","),
        }
    }
}

impl SpecFile {
    pub fn parse(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("failed to parse spec JSON")
    }
}

/// Load `path`, or `shiftopt.json` from the current directory when no path
/// is given. A missing default file is not an error.
pub fn load_spec_file(path: Option<&Path>) -> Result<Option<SpecFile>> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;

    let (path, explicit) = match path {
        Some(p) => (resolve_against(&cwd, p), true),
        None => (cwd.join(DEFAULT_SPEC_NAME), false),
    };

    if !path.exists() {
        if explicit {
            bail!("spec file not found: {}", path.display());
        }
        return Ok(None);
    }

    tracing::debug!(path = %path.display(), "loading spec file");
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read spec file: {}", path.display()))?;
    let spec = SpecFile::parse(&contents)
        .with_context(|| format!("invalid spec file: {}", path.display()))?;
    Ok(Some(spec))
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
