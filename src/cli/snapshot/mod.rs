//! Export and import commands - move every collection in and out of the file store

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::config::StorageBackend;
use crate::domain::storage::{export_snapshot, import_snapshot};
use crate::domain::{RecordStore, Snapshot};
use crate::infrastructure::logging;
use crate::infrastructure::storage::StorageFactory;

/// Arguments for the export command
#[derive(Args, Clone, Debug)]
pub struct ExportArgs {
    /// Directory holding the entity JSON files (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Snapshot file to write; stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the import command
#[derive(Args, Clone, Debug)]
pub struct ImportArgs {
    /// Snapshot file to read
    #[arg(long)]
    pub input: PathBuf,

    /// Directory holding the entity JSON files (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

pub async fn export(args: ExportArgs) -> anyhow::Result<()> {
    let store = open_store(args.data_dir.as_ref())?;

    let snapshot = export_snapshot(store.as_ref()).await?;
    let json = serde_json::to_string_pretty(&snapshot)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(
                records = snapshot.total_records(),
                "Exported snapshot to {}",
                path.display()
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

pub async fn import(args: ImportArgs) -> anyhow::Result<()> {
    let store = open_store(args.data_dir.as_ref())?;
    let snapshot = read_snapshot(&args.input).await?;

    let imported = import_snapshot(store.as_ref(), snapshot).await?;
    info!(records = imported, "Imported snapshot from {}", args.input.display());

    Ok(())
}

/// Snapshots always target the file backend; the memory backend has nothing to keep
fn open_store(data_dir: Option<&PathBuf>) -> anyhow::Result<std::sync::Arc<dyn RecordStore>> {
    let mut config = super::load_config()?;
    super::override_data_dir(&mut config, data_dir);
    config.storage.backend = StorageBackend::File;
    logging::init_logging(&config.logging);

    Ok(StorageFactory::create(&config.storage.to_storage_config()))
}

async fn read_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid snapshot", path.display()))
}
