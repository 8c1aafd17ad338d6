//! `winebuild engine`: build an Installed Build of the engine inside the
//! AutoSDK container.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use winebuild_container::{docker, runner};
use winebuild_core::config::ContainerConfig;
use winebuild_core::toolchain;

use super::images;

/// Location of the toolchain descriptor inside an engine source tree.
pub fn descriptor_path(ue_source: &Path) -> PathBuf {
    ue_source
        .join("Engine")
        .join("Config")
        .join("Windows")
        .join("Windows_SDK.json")
}

pub fn cmd_engine(ue_source: &Path) -> Result<()> {
    let ue_source = ue_source
        .canonicalize()
        .with_context(|| format!("engine source not found at {}", ue_source.display()))?;

    let params = toolchain::resolve_from_descriptor(&descriptor_path(&ue_source))?;

    let cfg = ContainerConfig::from_env();
    images::build_images(&cfg, &params, true)?;

    remove_ado_support(&ue_source)?;

    let docker_bin = runner::find_program("docker")?;
    let run = docker::ContainerRun::new(&cfg.autosdk_image)
        .mount(&ue_source, docker::ENGINE_MOUNT)
        .command([
            "wine",
            "./UE/Engine/Build/BatchFiles/RunUAT.bat",
            "BuildGraph",
            "-target=Make Installed Build Win64",
            "-script=Engine/Build/InstalledEngineBuild.xml",
            "-set:HostPlatformOnly=true",
        ]);
    runner::run_checked(&docker_bin, &run.args())?;
    Ok(())
}

/// The ADOSupport plugin is unused and breaks container builds; drop it
/// from the source tree before building.
fn remove_ado_support(ue_source: &Path) -> Result<()> {
    let plugin = ue_source
        .join("Engine")
        .join("Plugins")
        .join("Runtime")
        .join("Database")
        .join("ADOSupport");
    if plugin.exists() {
        tracing::warn!(path = %plugin.display(), "removing ADOSupport plugin");
        std::fs::remove_dir_all(&plugin)
            .with_context(|| format!("remove {}", plugin.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_path_follows_engine_layout() {
        assert_eq!(
            descriptor_path(Path::new("/src/UnrealEngine")),
            PathBuf::from("/src/UnrealEngine/Engine/Config/Windows/Windows_SDK.json")
        );
    }

    #[test]
    fn remove_ado_support_deletes_plugin_dir() {
        let tree = tempfile::tempdir().unwrap();
        let plugin = tree
            .path()
            .join("Engine/Plugins/Runtime/Database/ADOSupport");
        std::fs::create_dir_all(&plugin).unwrap();
        std::fs::write(plugin.join("ADOSupport.uplugin"), "{}").unwrap();

        remove_ado_support(tree.path()).unwrap();
        assert!(!plugin.exists());
    }

    #[test]
    fn remove_ado_support_is_a_noop_without_plugin() {
        let tree = tempfile::tempdir().unwrap();
        remove_ado_support(tree.path()).unwrap();
    }
}
