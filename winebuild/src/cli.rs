use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// winebuild: build a game-engine fork for Windows inside Docker/Wine containers
#[derive(Parser, Debug)]
#[command(name = "winebuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the patched Wine base image and the AutoSDK toolchain image
    ///
    /// Provide either the path to the Windows_SDK.json descriptor, or all
    /// three version arguments, not both.
    #[command(name = "autosdk-image")]
    AutosdkImage {
        /// Path to the Windows_SDK.json toolchain descriptor
        #[arg(value_name = "DESCRIPTOR")]
        descriptor: Option<PathBuf>,

        /// Major version of the MSVC tools to use
        #[arg(long, value_name = "VERSION")]
        major_version: Option<String>,

        /// Version of the MSVC SDK to use
        #[arg(long, value_name = "VERSION")]
        msvc_version: Option<String>,

        /// Version of the Windows SDK to use
        #[arg(long, value_name = "VERSION")]
        sdk_version: Option<String>,
    },

    /// Build an Installed Build of the engine from source inside the container
    Engine {
        /// Path to the engine source tree
        #[arg(value_name = "UE_SOURCE")]
        ue_source: PathBuf,
    },

    /// Cook and package a project against an Installed Build of the engine
    Project {
        /// Path to the Installed Build of the engine
        #[arg(long, value_name = "DIR")]
        engine: PathBuf,

        /// Path to the .uproject file to build
        #[arg(long, value_name = "FILE")]
        project: PathBuf,
    },

    /// Run the engine's build tool (UBT) inside the container
    Ubt {
        /// Path to the engine source tree (omit to use the explicit versions)
        #[arg(long, value_name = "DIR")]
        ue_source: Option<PathBuf>,

        /// Major version of the MSVC tools to use
        #[arg(long, value_name = "VERSION", default_value = "17")]
        major_version: String,

        /// Version of the MSVC SDK to use
        #[arg(long, value_name = "VERSION", default_value = "17.14")]
        msvc_version: String,

        /// Version of the Windows SDK to use
        #[arg(long, value_name = "VERSION", default_value = "10.0.26100")]
        sdk_version: String,

        /// Arguments to pass to the build tool, stripped of their leading hyphens
        #[arg(value_name = "UBTARGS")]
        ubtargs: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_autosdk_image_with_descriptor() {
        let cli = Cli::try_parse_from(["winebuild", "autosdk-image", "Windows_SDK.json"]).unwrap();
        match cli.command {
            Commands::AutosdkImage {
                descriptor,
                major_version,
                ..
            } => {
                assert_eq!(descriptor, Some(PathBuf::from("Windows_SDK.json")));
                assert_eq!(major_version, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_autosdk_image_with_explicit_versions() {
        let cli = Cli::try_parse_from([
            "winebuild",
            "autosdk-image",
            "--major-version",
            "17",
            "--msvc-version",
            "17.14",
            "--sdk-version",
            "10.0.26100",
        ])
        .unwrap();
        match cli.command {
            Commands::AutosdkImage {
                descriptor,
                major_version,
                msvc_version,
                sdk_version,
            } => {
                assert_eq!(descriptor, None);
                assert_eq!(major_version.as_deref(), Some("17"));
                assert_eq!(msvc_version.as_deref(), Some("17.14"));
                assert_eq!(sdk_version.as_deref(), Some("10.0.26100"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn ubt_collects_trailing_arguments() {
        let cli = Cli::try_parse_from([
            "winebuild",
            "ubt",
            "--ue-source",
            "/src/UnrealEngine",
            "Mode=QueryTargets",
            "help",
        ])
        .unwrap();
        match cli.command {
            Commands::Ubt {
                ue_source, ubtargs, ..
            } => {
                assert_eq!(ue_source, Some(PathBuf::from("/src/UnrealEngine")));
                assert_eq!(ubtargs, vec!["Mode=QueryTargets", "help"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn ubt_version_defaults_match_upstream() {
        let cli = Cli::try_parse_from(["winebuild", "ubt"]).unwrap();
        match cli.command {
            Commands::Ubt {
                major_version,
                msvc_version,
                sdk_version,
                ..
            } => {
                assert_eq!(major_version, "17");
                assert_eq!(msvc_version, "17.14");
                assert_eq!(sdk_version, "10.0.26100");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
