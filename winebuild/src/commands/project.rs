//! `winebuild project`: cook and package a project against an Installed
//! Build, inside an already-built AutoSDK container.

use std::path::Path;

use anyhow::{Context, Result};
use winebuild_container::{docker, runner};
use winebuild_core::config::ContainerConfig;

pub fn cmd_project(engine: &Path, project: &Path) -> Result<()> {
    let engine = engine
        .canonicalize()
        .with_context(|| format!("installed engine build not found at {}", engine.display()))?;
    let project = project
        .canonicalize()
        .with_context(|| format!("project file not found at {}", project.display()))?;

    let project_dir = project
        .parent()
        .context("project path has no parent directory")?;
    let project_file = project
        .file_name()
        .context("project path has no file name")?
        .to_string_lossy()
        .into_owned();

    tracing::info!(dir = %project_dir.display(), file = %project_file, "project build");

    let cfg = ContainerConfig::from_env();
    let docker_bin = runner::find_program("docker")?;

    // Bind-mount the engine and the project directory, then cook inside.
    let run = docker::ContainerRun::new(&cfg.autosdk_image)
        .interactive()
        .mount(&engine, docker::ENGINE_MOUNT)
        .mount(project_dir, docker::PROJECT_MOUNT)
        .command([
            "wine".to_string(),
            "./UE/Engine/Build/BatchFiles/RunUAT.bat".to_string(),
            "BuildCookRun".to_string(),
            format!("-project=C:/project/{project_file}"),
            "-nop4".to_string(),
            "-allmaps".to_string(),
            "-build".to_string(),
            "-cook".to_string(),
            "-stage".to_string(),
            "-pak".to_string(),
            "-platform=Win64".to_string(),
            "-clientconfig=Development".to_string(),
        ]);
    runner::run_checked(&docker_bin, &run.args())?;
    Ok(())
}
