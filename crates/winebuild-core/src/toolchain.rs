//! Toolchain descriptor resolution.
//!
//! The engine source tree carries a JSON descriptor
//! (`Engine/Config/Windows/Windows_SDK.json`) describing the Windows
//! toolchain it needs: the Windows SDK version, the minimum MSVC version,
//! and the Visual Studio components to install into the AutoSDK image.
//! This module extracts and normalizes those fields into
//! [`BuildParameters`] for the container image build.
//!
//! Two input modes, mutually exclusive:
//!
//! 1. **Descriptor mode**: parse the JSON file, derive the versions, and
//!    produce a filtered package list.
//! 2. **Explicit mode**: the caller supplies the three version strings
//!    directly; no package list is produced and the image build receives
//!    the raw versions instead.
//!
//! The descriptor is produced by the upstream engine's build configuration
//! and may carry either the 2026 or the 2022 variant of each
//! version/component pair; the 2026 variant is preferred when present.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Substrings that disqualify a suggested component. ATL components do not
/// install under Wine, workload identifiers pull in the full Visual Studio
/// UI, and the engine-specific IDE components are useless in a container.
const EXCLUDED_PHRASES: &[&str] = &[".ATL", "VisualStudio.Workload", "Component.Unreal"];

/// Errors from descriptor resolution. All are terminal for the invocation;
/// nothing here is retried.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("cannot read toolchain descriptor {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("toolchain descriptor {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("toolchain descriptor is missing the `{0}` field (or its fallback variant)")]
    MissingField(&'static str),

    #[error(
        "no packages could be read from {path}; check that the path points at the engine source code"
    )]
    EmptyPackageList { path: PathBuf },
}

/// On-disk shape of `Windows_SDK.json`.
///
/// Every field is optional at the serde layer so a missing key surfaces as
/// [`ResolveError::MissingField`] with the upstream key name, rather than an
/// opaque deserialization error. Unknown keys are ignored; the upstream
/// file carries plenty of fields this tool does not consume.
#[derive(Debug, Deserialize)]
struct ToolchainDescriptor {
    #[serde(rename = "MainVersion")]
    main_version: Option<String>,

    #[serde(rename = "MinimumVisualStudio2026Version")]
    minimum_vs2026_version: Option<String>,
    #[serde(rename = "MinimumVisualStudio2022Version")]
    minimum_vs2022_version: Option<String>,

    #[serde(rename = "VisualStudioSuggestedComponents")]
    suggested_components: Option<Vec<String>>,

    #[serde(rename = "VisualStudio2026SuggestedComponents")]
    vs2026_suggested_components: Option<Vec<String>>,
    #[serde(rename = "VisualStudio2022SuggestedComponents")]
    vs2022_suggested_components: Option<Vec<String>>,
}

/// Resolved values for parametrizing the AutoSDK image build.
///
/// Descriptor mode fills `packages` and leaves `compiler_version` empty;
/// explicit mode is the reverse. The two shapes feed two distinct
/// build-argument contracts (see `winebuild-container`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildParameters {
    /// Windows SDK version, e.g. `10.0.26100`.
    pub sdk_version: String,
    /// MSVC tools major version, e.g. `17`.
    pub compiler_major_version: String,
    /// Full MSVC toolchain version. Only present in explicit mode, where the
    /// image build consumes it directly instead of a package list.
    pub compiler_version: Option<String>,
    /// Filtered Visual Studio component identifiers, in descriptor order.
    pub packages: Vec<String>,
}

/// Input mode for one resolver invocation. Constructed via
/// [`select_input_mode`], which enforces the mutual-exclusion rule before
/// any file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Read and resolve a descriptor file.
    Descriptor(PathBuf),
    /// Use caller-supplied version strings; no package list.
    Explicit {
        sdk_version: String,
        compiler_major_version: String,
        compiler_version: String,
    },
}

impl InputMode {
    pub fn resolve(&self) -> Result<BuildParameters, ResolveError> {
        match self {
            InputMode::Descriptor(path) => resolve_from_descriptor(path),
            InputMode::Explicit {
                sdk_version,
                compiler_major_version,
                compiler_version,
            } => resolve_explicit(sdk_version, compiler_major_version, compiler_version),
        }
    }
}

/// Validate the mutually-exclusive CLI inputs: either a descriptor path, or
/// all three version values; never both, never neither. Runs before any
/// file read or external process.
pub fn select_input_mode(
    descriptor: Option<&Path>,
    major_version: Option<&str>,
    msvc_version: Option<&str>,
    sdk_version: Option<&str>,
) -> Result<InputMode, ResolveError> {
    let any_version =
        major_version.is_some() || msvc_version.is_some() || sdk_version.is_some();

    match (descriptor, any_version) {
        (Some(_), true) => Err(ResolveError::InvalidArguments(
            "provide either the path to the toolchain descriptor, or all three version \
             arguments, not both"
                .to_string(),
        )),
        (Some(path), false) => Ok(InputMode::Descriptor(path.to_path_buf())),
        (None, _) => match (sdk_version, major_version, msvc_version) {
            (Some(sdk), Some(major), Some(msvc)) => Ok(InputMode::Explicit {
                sdk_version: sdk.to_string(),
                compiler_major_version: major.to_string(),
                compiler_version: msvc.to_string(),
            }),
            _ => Err(ResolveError::InvalidArguments(
                "provide either the path to the toolchain descriptor, or all three version \
                 arguments"
                    .to_string(),
            )),
        },
    }
}

/// Strip the final dot-delimited segment: `"10.0.26100.1"` becomes
/// `"10.0.26100"`. A string without a `.` is returned unchanged.
pub fn major_version(version: &str) -> &str {
    version.rsplit_once('.').map_or(version, |(head, _)| head)
}

/// Read a toolchain descriptor and derive [`BuildParameters`] from it.
///
/// The file is read once and never cached; a malformed or incomplete
/// descriptor fails the invocation.
pub fn resolve_from_descriptor(path: &Path) -> Result<BuildParameters, ResolveError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ResolveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let descriptor: ToolchainDescriptor =
        serde_json::from_str(&raw).map_err(|source| ResolveError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let main_version = descriptor
        .main_version
        .as_deref()
        .ok_or(ResolveError::MissingField("MainVersion"))?;
    let sdk_version = major_version(main_version).to_string();

    // Prefer the 2026 toolchain when the descriptor knows about it.
    let compiler_version = descriptor
        .minimum_vs2026_version
        .as_deref()
        .or(descriptor.minimum_vs2022_version.as_deref())
        .ok_or(ResolveError::MissingField("MinimumVisualStudio2026Version"))?;
    let compiler_major_version = major_version(compiler_version).to_string();

    let base = descriptor
        .suggested_components
        .as_deref()
        .ok_or(ResolveError::MissingField("VisualStudioSuggestedComponents"))?;
    let additional = descriptor
        .vs2026_suggested_components
        .as_deref()
        .or(descriptor.vs2022_suggested_components.as_deref())
        .ok_or(ResolveError::MissingField(
            "VisualStudio2026SuggestedComponents",
        ))?;

    let packages = filter_packages(base.iter().chain(additional).map(String::as_str));
    if packages.is_empty() {
        return Err(ResolveError::EmptyPackageList {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        sdk_version = %sdk_version,
        compiler_major_version = %compiler_major_version,
        package_count = packages.len(),
        "resolved toolchain descriptor"
    );

    Ok(BuildParameters {
        sdk_version,
        compiler_major_version,
        compiler_version: None,
        packages,
    })
}

/// Build [`BuildParameters`] from caller-supplied version strings.
///
/// No package list is produced in this mode; the image build passes the raw
/// version strings instead.
pub fn resolve_explicit(
    sdk_version: &str,
    compiler_major_version: &str,
    compiler_version: &str,
) -> Result<BuildParameters, ResolveError> {
    if sdk_version.is_empty() || compiler_major_version.is_empty() || compiler_version.is_empty()
    {
        return Err(ResolveError::InvalidArguments(
            "all three version values must be non-empty".to_string(),
        ));
    }
    Ok(BuildParameters {
        sdk_version: sdk_version.to_string(),
        compiler_major_version: compiler_major_version.to_string(),
        compiler_version: Some(compiler_version.to_string()),
        packages: Vec::new(),
    })
}

/// Apply the exclusion and rename rules to the concatenated component list.
/// Order is preserved and duplicates are kept.
fn filter_packages<'a>(candidates: impl Iterator<Item = &'a str>) -> Vec<String> {
    candidates
        .filter(|package| !EXCLUDED_PHRASES.iter().any(|phrase| package.contains(phrase)))
        .map(rewrite_targeting_pack)
        .collect()
}

/// The descriptor suggests .NET targeting packs, but only the matching SDK
/// component installs headlessly. Only the trailing suffix is rewritten.
fn rewrite_targeting_pack(package: &str) -> String {
    if package.starts_with("Microsoft.Net.Component") {
        if let Some(stem) = package.strip_suffix("TargetingPack") {
            return format!("{stem}SDK");
        }
    }
    package.to_string()
}
