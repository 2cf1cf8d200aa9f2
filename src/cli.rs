use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use crate::routes::export::{self, ExportData};
use crate::store::DiaryStore;

#[derive(Parser)]
#[command(name = "mood-diary", version, about = "Mood flower diary store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Write every collection as one JSON document
    Export {
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge an export document into the store
    Import { file: PathBuf },
    /// Remove the stored user profile so onboarding runs again
    ResetProfile,
}

/// Upserts every entry of an export file through the store, so existing
/// mood entries with the same date and diary entries with the same id are
/// replaced. Diary timestamps are kept as exported, so importing the same
/// file twice leaves the store unchanged. A profile in the file overwrites
/// the stored one.
pub async fn import_data(store: &DiaryStore, file_path: &Path) -> anyhow::Result<()> {
    let content = fs::read_to_string(file_path)?;
    let data: ExportData = serde_json::from_str(&content)?;

    let moods = data.mood_entries.len();
    for entry in data.mood_entries {
        store.save_mood_entry(entry).await?;
    }

    let diaries = data.diary_entries.len();
    store.restore_diary_entries(data.diary_entries).await?;

    if let Some(profile) = &data.profile {
        store.save_user_profile(profile).await?;
    }

    println!("Imported {} mood entries and {} diary entries", moods, diaries);
    Ok(())
}

pub async fn export_data(store: &DiaryStore, output: Option<&Path>) -> anyhow::Result<()> {
    let data = export::collect(store).await?;
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!("Exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub async fn reset_profile(store: &DiaryStore) -> anyhow::Result<()> {
    store.clear_user_profile().await?;
    println!("User profile cleared");
    Ok(())
}
