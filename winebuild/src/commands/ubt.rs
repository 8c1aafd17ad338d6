//! `winebuild ubt`: run the engine's build tool inside the container.
//!
//! With `--ue-source` the toolchain comes from the tree's descriptor and
//! the source is bind-mounted for the run; without it the explicit version
//! flags parametrize the image build and there is nothing to mount, so the
//! command stops after the images are built.

use std::path::Path;

use anyhow::{Context, Result};
use winebuild_container::{docker, runner};
use winebuild_core::config::ContainerConfig;
use winebuild_core::toolchain;

use super::{engine, images};

pub fn cmd_ubt(
    ue_source: Option<&Path>,
    major_version: &str,
    msvc_version: &str,
    sdk_version: &str,
    ubtargs: &[String],
) -> Result<()> {
    let (params, source) = match ue_source {
        Some(source) => {
            let source = source
                .canonicalize()
                .with_context(|| format!("engine source not found at {}", source.display()))?;
            let params = toolchain::resolve_from_descriptor(&engine::descriptor_path(&source))?;
            (params, Some(source))
        }
        None => (
            toolchain::resolve_explicit(sdk_version, major_version, msvc_version)?,
            None,
        ),
    };

    let cfg = ContainerConfig::from_env();
    images::build_images(&cfg, &params, true)?;

    let Some(source) = source else {
        tracing::info!("no engine source to mount; stopping after the image build");
        return Ok(());
    };

    // UBT arguments arrive stripped of their leading hyphens so they survive
    // CLI parsing; restore them here.
    let mut command = vec![
        "wine".to_string(),
        "./UE/Engine/Build/BatchFiles/RunUBT.bat".to_string(),
    ];
    command.extend(ubtargs.iter().map(|arg| format!("-{arg}")));

    let docker_bin = runner::find_program("docker")?;
    let run = docker::ContainerRun::new(&cfg.autosdk_image)
        .mount(&source, docker::ENGINE_MOUNT)
        .command(command);
    runner::run_checked(&docker_bin, &run.args())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn ubtargs_get_their_hyphens_back() {
        let ubtargs = ["Mode=QueryTargets".to_string(), "help".to_string()];
        let restored: Vec<String> = ubtargs.iter().map(|arg| format!("-{arg}")).collect();
        assert_eq!(restored, vec!["-Mode=QueryTargets", "-help"]);
    }
}
