//! CLI module for NeuroTrack
//!
//! Provides subcommands:
//! - `serve`: HTTP API (and optionally the built front-end)
//! - `export`: write every collection to a snapshot file
//! - `import`: restore collections from a snapshot file

pub mod serve;
pub mod snapshot;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// NeuroTrack - personal seizure and medication tracking
#[derive(Parser)]
#[command(name = "neurotrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve(serve::ServeArgs),

    /// Export all collections as a snapshot
    Export(snapshot::ExportArgs),

    /// Import collections from a snapshot
    Import(snapshot::ImportArgs),
}

/// Loads `.env`, then layered configuration
pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();
    Ok(AppConfig::load()?)
}

/// Points the file backend at `data_dir` when one is given
pub(crate) fn override_data_dir(config: &mut AppConfig, data_dir: Option<&PathBuf>) {
    if let Some(dir) = data_dir {
        config.storage.data_dir = dir.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::parse_from([
            "neurotrack",
            "serve",
            "--port",
            "4000",
            "--memory",
            "--static-dir",
            "dist",
        ]);

        match cli.command {
            Command::Serve(args) => {
                let mut config = AppConfig::default();
                args.apply(&mut config);

                assert_eq!(config.server.port, 4000);
                assert_eq!(config.storage.backend, StorageBackend::Memory);
                assert_eq!(config.server.static_dir, Some(PathBuf::from("dist")));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_import_requires_input() {
        assert!(Cli::try_parse_from(["neurotrack", "import"]).is_err());

        let cli = Cli::try_parse_from(["neurotrack", "import", "--input", "backup.json"]).unwrap();
        assert!(matches!(cli.command, Command::Import(_)));
    }

    #[test]
    fn test_override_data_dir() {
        let mut config = AppConfig::default();
        override_data_dir(&mut config, Some(&PathBuf::from("/tmp/nt")));
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/nt"));

        override_data_dir(&mut config, None);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/nt"));
    }
}
