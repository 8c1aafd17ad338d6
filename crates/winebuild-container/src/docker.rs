//! Docker command-line construction.
//!
//! Argument assembly only; nothing in this module talks to the daemon.
//! The builders produce plain argument vectors that are handed to
//! [`crate::runner::run_checked`] together with the `docker` binary.

use std::path::{Path, PathBuf};

use winebuild_core::toolchain::BuildParameters;

/// Wine prefix mount point for the engine tree inside the AutoSDK image.
pub const ENGINE_MOUNT: &str = "/home/nonroot/.local/share/wineprefixes/prefix/drive_c/UE";

/// Wine prefix mount point for a project directory.
pub const PROJECT_MOUNT: &str = "/home/nonroot/.local/share/wineprefixes/prefix/drive_c/project";

/// A `docker buildx build` invocation.
#[derive(Debug, Clone)]
pub struct ImageBuild {
    tag: String,
    context: PathBuf,
    build_args: Vec<(String, String)>,
}

impl ImageBuild {
    pub fn new(tag: impl Into<String>, context: impl Into<PathBuf>) -> Self {
        Self {
            tag: tag.into(),
            context: context.into(),
            build_args: Vec::new(),
        }
    }

    pub fn build_arg(mut self, key: &str, value: impl Into<String>) -> Self {
        self.build_args.push((key.to_string(), value.into()));
        self
    }

    /// Arguments for the `docker` binary, in invocation order.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "buildx".to_string(),
            "build".to_string(),
            "--progress=plain".to_string(),
        ];
        for (key, value) in &self.build_args {
            args.push("--build-arg".to_string());
            args.push(format!("{key}={value}"));
        }
        args.push("-t".to_string());
        args.push(self.tag.clone());
        args.push(self.context.to_string_lossy().into_owned());
        args
    }
}

/// The AutoSDK image build parametrized by the resolved toolchain.
///
/// Descriptor mode passes `MAJOR_VERSION` and the space-joined `PACKAGES`
/// list; explicit mode passes `MAJOR_VERSION`, `MSVC_VERSION`, and
/// `SDK_VERSION` instead. The two build-argument contracts stay distinct.
pub fn autosdk_build(
    params: &BuildParameters,
    base_image: &str,
    tag: &str,
    context: &Path,
) -> ImageBuild {
    let build = ImageBuild::new(tag, context)
        .build_arg("MAJOR_VERSION", params.compiler_major_version.clone());
    let build = match &params.compiler_version {
        Some(msvc_version) => build
            .build_arg("MSVC_VERSION", msvc_version.clone())
            .build_arg("SDK_VERSION", params.sdk_version.clone()),
        None => build.build_arg("PACKAGES", params.packages.join(" ")),
    };
    build.build_arg("BASE_IMAGE", base_image)
}

/// A `docker run` invocation.
#[derive(Debug, Clone)]
pub struct ContainerRun {
    image: String,
    mounts: Vec<(PathBuf, String)>,
    interactive: bool,
    command: Vec<String>,
}

impl ContainerRun {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            mounts: Vec::new(),
            interactive: false,
            command: Vec::new(),
        }
    }

    /// Bind-mount a host path into the container.
    pub fn mount(mut self, host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        self.mounts.push((host.into(), container.into()));
        self
    }

    /// Allocate an interactive terminal (`-it` instead of `-t`).
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn command<I, S>(mut self, command: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.command = command.into_iter().map(Into::into).collect();
        self
    }

    /// Arguments for the `docker` binary, in invocation order. Containers
    /// are always removed on exit.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["run".to_string(), "--rm".to_string()];
        args.push(if self.interactive { "-it" } else { "-t" }.to_string());
        for (host, container) in &self.mounts {
            args.push("-v".to_string());
            args.push(format!("{}:{}", host.display(), container));
        }
        args.push(self.image.clone());
        args.extend(self.command.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winebuild_core::toolchain::{resolve_explicit, BuildParameters};

    fn descriptor_params() -> BuildParameters {
        BuildParameters {
            sdk_version: "10.0.26100".to_string(),
            compiler_major_version: "17".to_string(),
            compiler_version: None,
            packages: vec![
                "Microsoft.VisualStudio.Component.VC.Tools.x86.x64".to_string(),
                "Microsoft.Net.Component.4.8.SDK".to_string(),
            ],
        }
    }

    // ---- Image builds ----

    #[test]
    fn base_image_build_has_no_build_args() {
        let build = ImageBuild::new("winebuild/wine-patched:temp", "build/context");
        assert_eq!(
            build.args(),
            vec![
                "buildx",
                "build",
                "--progress=plain",
                "-t",
                "winebuild/wine-patched:temp",
                "build/context"
            ]
        );
    }

    #[test]
    fn descriptor_mode_passes_packages() {
        let build = autosdk_build(
            &descriptor_params(),
            "winebuild/wine-patched:temp",
            "winebuild/autosdk-wine:temp",
            Path::new("docker/autosdk"),
        );
        let args = build.args();
        assert!(args.contains(&"MAJOR_VERSION=17".to_string()));
        let packages = "PACKAGES=Microsoft.VisualStudio.Component.VC.Tools.x86.x64 \
                        Microsoft.Net.Component.4.8.SDK";
        assert!(args.contains(&packages.to_string()));
        assert!(args.contains(&"BASE_IMAGE=winebuild/wine-patched:temp".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("MSVC_VERSION=")));
        assert!(!args.iter().any(|a| a.starts_with("SDK_VERSION=")));
    }

    #[test]
    fn explicit_mode_passes_raw_versions() {
        let params = resolve_explicit("10.0.26100", "17", "17.14").unwrap();
        let build = autosdk_build(
            &params,
            "winebuild/wine-patched:temp",
            "winebuild/autosdk-wine:temp",
            Path::new("docker/autosdk"),
        );
        let args = build.args();
        assert!(args.contains(&"MAJOR_VERSION=17".to_string()));
        assert!(args.contains(&"MSVC_VERSION=17.14".to_string()));
        assert!(args.contains(&"SDK_VERSION=10.0.26100".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("PACKAGES=")));
    }

    #[test]
    fn build_args_precede_tag_and_context() {
        let build = ImageBuild::new("img:tag", "ctx").build_arg("KEY", "value");
        let args = build.args();
        let build_arg_pos = args.iter().position(|a| a == "KEY=value").unwrap();
        let tag_pos = args.iter().position(|a| a == "img:tag").unwrap();
        assert!(build_arg_pos < tag_pos);
        assert_eq!(args.last().unwrap(), "ctx");
    }

    // ---- Container runs ----

    #[test]
    fn run_args_with_mount_and_command() {
        let run = ContainerRun::new("winebuild/autosdk-wine:temp")
            .mount("/src/UnrealEngine", ENGINE_MOUNT)
            .command(["wine", "./UE/Engine/Build/BatchFiles/RunUBT.bat", "-help"]);
        assert_eq!(
            run.args(),
            vec![
                "run",
                "--rm",
                "-t",
                "-v",
                "/src/UnrealEngine:/home/nonroot/.local/share/wineprefixes/prefix/drive_c/UE",
                "winebuild/autosdk-wine:temp",
                "wine",
                "./UE/Engine/Build/BatchFiles/RunUBT.bat",
                "-help"
            ]
        );
    }

    #[test]
    fn interactive_run_uses_it() {
        let run = ContainerRun::new("img").interactive();
        let args = run.args();
        assert!(args.contains(&"-it".to_string()));
        assert!(!args.contains(&"-t".to_string()));
    }

    #[test]
    fn mounts_preserve_order() {
        let run = ContainerRun::new("img")
            .mount("/engine", ENGINE_MOUNT)
            .mount("/proj", PROJECT_MOUNT);
        let args = run.args();
        let first = args.iter().position(|a| a.starts_with("/engine:")).unwrap();
        let second = args.iter().position(|a| a.starts_with("/proj:")).unwrap();
        assert!(first < second);
    }
}
