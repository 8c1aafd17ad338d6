//! Shared image pipeline: the patched Wine base image, then the AutoSDK
//! image parametrized by the resolved toolchain.

use anyhow::{Context, Result};
use winebuild_container::{docker, runner};
use winebuild_core::config::ContainerConfig;
use winebuild_core::toolchain::BuildParameters;

/// Build both images. `no_32bit` skips the 32-bit Wine layout in the
/// resources build (engine and UBT builds only need win64).
pub fn build_images(cfg: &ContainerConfig, params: &BuildParameters, no_32bit: bool) -> Result<()> {
    let docker_bin =
        runner::find_program("docker").context("docker is required to build the images")?;

    // Lay out the WineResources build context.
    let build_script = cfg.resources_dir.join("build.sh");
    let mut layout_args = vec!["--layout".to_string()];
    if no_32bit {
        layout_args.push("--no-32bit".to_string());
    }
    layout_args.push("--no-sudo".to_string());
    runner::run_checked(&build_script, &layout_args)
        .with_context(|| format!("wine resources layout via {}", build_script.display()))?;

    // Base image from the generated context.
    let base_build = docker::ImageBuild::new(&cfg.base_image, cfg.resources_dir.join("context"));
    runner::run_checked(&docker_bin, &base_build.args())
        .with_context(|| format!("base image build ({})", cfg.base_image))?;

    // AutoSDK image on top of it.
    let autosdk_build = docker::autosdk_build(
        params,
        &cfg.base_image,
        &cfg.autosdk_image,
        &cfg.autosdk_context,
    );
    runner::run_checked(&docker_bin, &autosdk_build.args())
        .with_context(|| format!("AutoSDK image build ({})", cfg.autosdk_image))?;

    tracing::info!(image = %cfg.autosdk_image, "AutoSDK image built");
    Ok(())
}
