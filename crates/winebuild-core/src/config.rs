//! Environment-driven configuration, grouped by concern.
//!
//! Every knob has a `WINEBUILD_*` environment variable and a default that
//! matches the stock repository layout; nothing is read from config files.

use std::env;
use std::path::PathBuf;

/// Read an environment variable, falling back to `default` when unset or
/// empty.
fn env_or<F>(key: &str, default: F) -> String
where
    F: FnOnce() -> String,
{
    env::var(key)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default)
}

/// Read an environment variable, treating empty values as unset.
fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

/// Parse a boolean environment variable: everything except `0`, `false`,
/// `no`, and `off` counts as true.
fn env_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(s) => truthy(&s),
        Err(_) => default,
    }
}

fn truthy(s: &str) -> bool {
    !matches!(s.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off")
}

/// Logging and audit-log settings.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Only WARN and above when set (`WINEBUILD_QUIET`).
    pub quiet: bool,
    /// Default tracing filter (`WINEBUILD_LOG_LEVEL`).
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable ones
    /// (`WINEBUILD_LOG_JSON`).
    pub log_json: bool,
    /// JSONL audit log of external command invocations
    /// (`WINEBUILD_AUDIT_LOG`); disabled when unset.
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self {
            quiet: env_bool("WINEBUILD_QUIET", false),
            log_level: env_or("WINEBUILD_LOG_LEVEL", || "winebuild=info".to_string()),
            log_json: env_bool("WINEBUILD_LOG_JSON", false),
            audit_log: env_optional("WINEBUILD_AUDIT_LOG"),
        }
    }
}

/// Image tags and build-context locations for the container pipeline.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Tag for the patched Wine base image (`WINEBUILD_BASE_IMAGE`).
    pub base_image: String,
    /// Tag for the AutoSDK-enabled image (`WINEBUILD_AUTOSDK_IMAGE`).
    pub autosdk_image: String,
    /// WineResources checkout holding `build.sh` and the generated build
    /// context (`WINEBUILD_RESOURCES_DIR`).
    pub resources_dir: PathBuf,
    /// Docker build context holding the AutoSDK Dockerfile
    /// (`WINEBUILD_AUTOSDK_CONTEXT`).
    pub autosdk_context: PathBuf,
}

impl ContainerConfig {
    pub fn from_env() -> Self {
        Self {
            base_image: env_or("WINEBUILD_BASE_IMAGE", || {
                "winebuild/wine-patched:temp".to_string()
            }),
            autosdk_image: env_or("WINEBUILD_AUTOSDK_IMAGE", || {
                "winebuild/autosdk-wine:temp".to_string()
            }),
            resources_dir: PathBuf::from(env_or("WINEBUILD_RESOURCES_DIR", || {
                "build".to_string()
            })),
            autosdk_context: PathBuf::from(env_or("WINEBUILD_AUTOSDK_CONTEXT", || {
                "docker/autosdk".to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_accepts_common_spellings() {
        assert!(truthy("1"));
        assert!(truthy("true"));
        assert!(truthy("YES"));
        assert!(!truthy("0"));
        assert!(!truthy("false"));
        assert!(!truthy(" no "));
        assert!(!truthy("off"));
    }

    #[test]
    fn unset_keys_fall_back() {
        // Fresh keys that no test or environment sets.
        assert_eq!(
            env_or("WINEBUILD_TEST_UNSET_KEY", || "fallback".to_string()),
            "fallback"
        );
        assert_eq!(env_optional("WINEBUILD_TEST_UNSET_KEY"), None);
        assert!(env_bool("WINEBUILD_TEST_UNSET_KEY", true));
    }
}
