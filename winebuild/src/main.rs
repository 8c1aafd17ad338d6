mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    winebuild_core::observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::AutosdkImage {
            descriptor,
            major_version,
            msvc_version,
            sdk_version,
        } => {
            commands::autosdk::cmd_autosdk_image(
                descriptor.as_deref(),
                major_version.as_deref(),
                msvc_version.as_deref(),
                sdk_version.as_deref(),
            )?;
        }
        Commands::Engine { ue_source } => {
            commands::engine::cmd_engine(&ue_source)?;
        }
        Commands::Project { engine, project } => {
            commands::project::cmd_project(&engine, &project)?;
        }
        Commands::Ubt {
            ue_source,
            major_version,
            msvc_version,
            sdk_version,
            ubtargs,
        } => {
            commands::ubt::cmd_ubt(
                ue_source.as_deref(),
                &major_version,
                &msvc_version,
                &sdk_version,
                &ubtargs,
            )?;
        }
    }

    Ok(())
}
