//! `winebuild autosdk-image`: build the Wine base image and the AutoSDK
//! toolchain image from a descriptor file or explicit version strings.

use std::path::Path;

use anyhow::Result;
use winebuild_core::config::ContainerConfig;
use winebuild_core::toolchain;

use super::images;

pub fn cmd_autosdk_image(
    descriptor: Option<&Path>,
    major_version: Option<&str>,
    msvc_version: Option<&str>,
    sdk_version: Option<&str>,
) -> Result<()> {
    // Input-mode validation happens before any file read or process spawn.
    let mode = toolchain::select_input_mode(descriptor, major_version, msvc_version, sdk_version)?;
    let params = mode.resolve()?;

    let cfg = ContainerConfig::from_env();
    images::build_images(&cfg, &params, false)?;

    eprintln!("AutoSDK docker image built: \"{}\"", cfg.autosdk_image);
    Ok(())
}
